use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::{Document, FieldKind, FieldSpec};

/// A comment on a post.
///
/// `post_id` is a plain reference: the store does not enforce that the post exists,
/// and deleting a post leaves its comments in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub id: String,
    pub post_id: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub const POST_ID: &'static str = "postId";
    pub const CONTENT: &'static str = "content";
    pub const AUTHOR: &'static str = "author";
    pub const CREATED_AT: &'static str = "createdAt";

    pub fn new(
        post_id: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            post_id: post_id.into(),
            content: content.into(),
            author: author.into(),
            created_at: Utc::now(),
        }
    }
}

impl Document for Comment {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new(Comment::POST_ID, FieldKind::Keyword),
        FieldSpec::new(Comment::CONTENT, FieldKind::Text),
        FieldSpec::new(Comment::AUTHOR, FieldKind::Text),
        FieldSpec::new(Comment::CREATED_AT, FieldKind::Date),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
