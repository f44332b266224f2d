/// Data models for board-service
///
/// - Post: a titled piece of content with an author
/// - Comment: a reply referencing its parent post by id
/// - Page: a bounded window of results plus paging metadata
/// - Search types: which fields a keyword search is matched against
mod comment;
mod page;
mod post;
mod search;

pub use comment::Comment;
pub use page::{Page, PageRequest, Pageable, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use post::Post;
pub use search::{CommentSearchType, PostSearchType};
