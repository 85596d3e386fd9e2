use serde::Serialize;

use super::Article;

/// Sections in the order they are composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Trending,
    Following,
    Other,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Trending, Section::Following, Section::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Trending => "trending",
            Section::Following => "following",
            Section::Other => "other",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Section::Trending => "Trending",
            Section::Following => "Following",
            Section::Other => "Other Articles",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Load state of a single section as seen by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", content = "articles", rename_all = "lowercase")]
pub enum SectionState {
    #[default]
    Loading,
    Error,
    Success(Vec<Article>),
}

impl SectionState {
    pub fn articles(&self) -> Option<&[Article]> {
        match self {
            SectionState::Success(articles) => Some(articles),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SectionState::Error)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SectionState::Loading)
    }
}
