/// Item record definitions
///
/// Field names follow the Hacker News API JSON. Every field except `id` may be
/// absent from a response, so all of them fall back to their defaults.
use crate::item::ItemId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind tag of an item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Story,
    Comment,
    Job,
    Poll,
    #[serde(rename = "pollopt")]
    PollOption,
    #[default]
    #[serde(other)]
    Other,
}

impl ItemKind {
    /// Returns true for the kinds that head a thread (stories, jobs, polls)
    pub fn is_thread_root(&self) -> bool {
        matches!(self, Self::Story | Self::Job | Self::Poll)
    }

    /// Converts the kind to the API string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Story => "story",
            Self::Comment => "comment",
            Self::Job => "job",
            Self::Poll => "poll",
            Self::PollOption => "pollopt",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A remote node: a story, comment or other item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    /// Unique item id
    pub id: ItemId,

    /// Title (stories, jobs and polls only)
    pub title: Option<String>,

    /// Score
    pub score: i64,

    /// Author username
    pub by: Option<String>,

    /// Destination URL of a link story
    pub url: Option<String>,

    /// Total comment count; informational only, never used for traversal
    pub descendants: u64,

    /// Kind tag
    #[serde(rename = "type")]
    pub kind: ItemKind,

    /// Ordered child ids; the only source of truth for render order
    pub kids: Vec<ItemId>,

    /// Raw HTML body
    pub text: Option<String>,

    /// Creation time, unix seconds
    pub time: Option<i64>,

    pub deleted: bool,

    pub dead: bool,

    pub parent: Option<ItemId>,
}

impl Item {
    /// Returns true if the item has no children to fetch
    pub fn is_leaf(&self) -> bool {
        self.kids.is_empty()
    }

    /// Returns the author, or `[deleted]` when the API withheld it
    pub fn author(&self) -> &str {
        match self.by.as_deref() {
            Some(by) if !by.is_empty() => by,
            _ => "[deleted]",
        }
    }

    /// Returns the creation time as a UTC timestamp, if present and in range
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.time.and_then(|t| DateTime::from_timestamp(t, 0))
    }

    /// Returns the raw body, treating an absent body as empty
    pub fn raw_text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}
