/// Top-level listing definitions
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which top-level listing to read
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    #[default]
    Top,
    New,
    Best,
    Ask,
    Show,
    Job,
}

impl ListingKind {
    /// Returns the API path of the listing, relative to the base URL
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Top => "v0/topstories.json",
            Self::New => "v0/newstories.json",
            Self::Best => "v0/beststories.json",
            Self::Ask => "v0/askstories.json",
            Self::Show => "v0/showstories.json",
            Self::Job => "v0/jobstories.json",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::New => "new",
            Self::Best => "best",
            Self::Ask => "ask",
            Self::Show => "show",
            Self::Job => "job",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
