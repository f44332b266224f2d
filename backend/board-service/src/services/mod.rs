/// Business logic layer for board-service
///
/// - Post service: post lifecycle and post keyword search
/// - Comment service: comment lifecycle and comment keyword search
///
/// Neither service checks that a comment's post exists; the HTTP layer resolves the
/// post through `PostService` before calling into `CommentService`.
pub mod comments;
pub mod posts;

pub use comments::CommentService;
pub use posts::PostService;
