use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::votes::VoteToggle;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Editorial badge attached to a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Trending,
    New,
}

/// Links to the places a product can be found
///
/// Every field is optional; an empty string is treated the same as a
/// missing link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl ExternalLinks {
    pub fn has_website(&self) -> bool {
        is_present(&self.website)
    }

    pub fn has_app_store(&self) -> bool {
        is_present(&self.app_store)
    }

    pub fn has_play_store(&self) -> bool {
        is_present(&self.play_store)
    }

    /// True when none of the web, iOS or Android links are set
    pub fn has_no_platform(&self) -> bool {
        !self.has_website() && !self.has_app_store() && !self.has_play_store()
    }
}

fn is_present(link: &Option<String>) -> bool {
    link.as_deref().is_some_and(|url| !url.is_empty())
}

/// Short maker reference embedded in a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakerSummary {
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_date: Option<String>,
}

/// A submitted product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub votes: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub external_links: Option<ExternalLinks>,
    #[serde(default)]
    pub makers: Vec<MakerSummary>,
}

impl Product {
    pub fn has_badge(&self, badge: Badge) -> bool {
        self.badges.contains(&badge)
    }

    /// Platform labels shown on the product card, in display order
    pub fn platform_labels(&self) -> Vec<&'static str> {
        let Some(links) = &self.external_links else {
            return Vec::new();
        };
        let mut labels = Vec::new();
        if links.has_website() {
            labels.push("Web");
        }
        if links.has_app_store() {
            labels.push("iOS");
        }
        if links.has_play_store() {
            labels.push("Android");
        }
        labels
    }

    /// Apply the counter change that came with a ledger toggle
    ///
    /// This is the only way the vote counter moves.
    pub fn apply_vote(&mut self, toggle: VoteToggle) {
        self.votes = toggle.apply_to(self.votes);
    }
}

/// Maker categories used by the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MakerCategory {
    Developer,
    Designer,
    Marketing,
    Other,
}

impl MakerCategory {
    pub const ALL: [MakerCategory; 4] = [
        MakerCategory::Developer,
        MakerCategory::Designer,
        MakerCategory::Marketing,
        MakerCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MakerCategory::Developer => "Developer",
            MakerCategory::Designer => "Designer",
            MakerCategory::Marketing => "Marketing",
            MakerCategory::Other => "Other",
        }
    }
}

impl fmt::Display for MakerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person listed in the maker directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maker {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub bio: String,
    pub category: MakerCategory,
    #[serde(default)]
    pub avatar: String,
}

impl Maker {
    /// Profile key: lower-cased name with whitespace runs replaced by `-`
    pub fn slug(&self) -> String {
        WHITESPACE_RUN
            .replace_all(&self.name.to_lowercase(), "-")
            .into_owned()
    }
}
