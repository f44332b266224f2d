use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::{Document, FieldKind, FieldSpec};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Assigned by the store on first save; empty for a post that was never saved.
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub const TITLE: &'static str = "title";
    pub const CONTENT: &'static str = "content";
    pub const AUTHOR: &'static str = "author";
    pub const CREATED_AT: &'static str = "createdAt";

    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            content: content.into(),
            author: author.into(),
            created_at: Utc::now(),
        }
    }
}

impl Document for Post {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new(Post::TITLE, FieldKind::Text),
        FieldSpec::new(Post::CONTENT, FieldKind::Text),
        FieldSpec::new(Post::AUTHOR, FieldKind::Text),
        FieldSpec::new(Post::CREATED_AT, FieldKind::Date),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
