use serde::Serialize;

use super::{Section, SectionState};

/// Which empty-state message the Following section should end with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowingNotice {
    NothingToSee,
    UpToDate,
}

impl FollowingNotice {
    pub fn message(&self) -> &'static str {
        match self {
            FollowingNotice::NothingToSee => "Nothing to see here! Follow some student publications.",
            FollowingNotice::UpToDate => "You're up to date!",
        }
    }
}

/// Snapshot of the home feed published to the presentation layer.
///
/// Each phase produces a new value; a published state is never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomeFeedState {
    pub trending: SectionState,
    pub following: SectionState,
    pub other: SectionState,
    pub is_following_empty: bool,
}

impl HomeFeedState {
    pub fn section(&self, section: Section) -> &SectionState {
        match section {
            Section::Trending => &self.trending,
            Section::Following => &self.following,
            Section::Other => &self.other,
        }
    }

    pub fn with_section(mut self, section: Section, state: SectionState) -> Self {
        match section {
            Section::Trending => self.trending = state,
            Section::Following => self.following = state,
            Section::Other => self.other = state,
        }
        self
    }

    pub fn with_following_empty(mut self, is_following_empty: bool) -> Self {
        self.is_following_empty = is_following_empty;
        self
    }

    pub fn failed_sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|s| self.section(*s).is_error())
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.failed_sections().is_empty()
    }

    pub fn is_complete(&self) -> bool {
        Section::ALL.iter().all(|s| !self.section(*s).is_loading())
    }

    pub fn following_notice(&self) -> Option<FollowingNotice> {
        match &self.following {
            SectionState::Success(_) if self.is_following_empty => {
                Some(FollowingNotice::NothingToSee)
            }
            SectionState::Success(_) => Some(FollowingNotice::UpToDate),
            _ => None,
        }
    }
}
