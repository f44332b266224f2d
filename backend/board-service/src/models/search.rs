use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which comment fields a keyword is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommentSearchType {
    /// Keyword contained in the comment content
    Content,
    /// Keyword equal to the comment author
    Author,
    /// Either of the above
    #[default]
    ContentAndAuthor,
}

impl CommentSearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentSearchType::Content => "content",
            CommentSearchType::Author => "author",
            CommentSearchType::ContentAndAuthor => "contentAndAuthor",
        }
    }

    /// Resolves a query parameter; absent or unrecognized values select the default mode.
    pub fn from_param(value: Option<&str>) -> Self {
        resolve_param(value)
    }
}

impl FromStr for CommentSearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "content" => Ok(CommentSearchType::Content),
            "author" => Ok(CommentSearchType::Author),
            "contentAndAuthor" => Ok(CommentSearchType::ContentAndAuthor),
            _ => Err(format!("unknown comment search type '{}'", s)),
        }
    }
}

impl fmt::Display for CommentSearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which post fields a keyword is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PostSearchType {
    Title,
    Content,
    #[default]
    TitleAndContent,
}

impl PostSearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostSearchType::Title => "title",
            PostSearchType::Content => "content",
            PostSearchType::TitleAndContent => "titleAndContent",
        }
    }

    /// Resolves a query parameter; absent or unrecognized values select the default mode.
    pub fn from_param(value: Option<&str>) -> Self {
        resolve_param(value)
    }
}

impl FromStr for PostSearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(PostSearchType::Title),
            "content" => Ok(PostSearchType::Content),
            "titleAndContent" => Ok(PostSearchType::TitleAndContent),
            _ => Err(format!("unknown post search type '{}'", s)),
        }
    }
}

impl fmt::Display for PostSearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn resolve_param<T>(value: Option<&str>) -> T
where
    T: FromStr<Err = String> + Default + fmt::Display,
{
    match value.map(str::parse::<T>) {
        Some(Ok(search_type)) => search_type,
        Some(Err(err)) => {
            let fallback = T::default();
            tracing::debug!(%fallback, "{}; falling back to default search type", err);
            fallback
        }
        None => T::default(),
    }
}
