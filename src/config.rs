//! Configuration types for vidmaker
//!
//! Parameter structs with sensible defaults. Everything here is plain data:
//! construct with struct-update syntax over `Default`, or deserialize from
//! whatever configuration source the embedding application uses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Score/age bounds applied when listing articles
///
/// A bound of `None` means "don't filter on this attribute".
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ArticleFilter {
    /// Minimum article score to include
    #[serde(default)]
    pub min_score: Option<i64>,

    /// Minimum article age in hours to include
    #[serde(default)]
    pub min_age_hours: Option<f64>,
}

/// Parameters for comment-chain selection
///
/// Controls how many top-level comments are kept and how aggressively each
/// one is expanded into a single-best-reply chain.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommentSelection {
    /// Maximum number of top-level comments to return (default: 10, clamped to >= 1)
    #[serde(default = "default_max_comments")]
    pub max_comments: usize,

    /// Maximum reply-chain depth below each top-level comment (default: 2)
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// Proportion of a parent comment's score a reply must exceed to be
    /// chained below it (default: 0.5, clamped to >= 0)
    #[serde(default = "default_score_ratio")]
    pub score_ratio: f64,
}

impl Default for CommentSelection {
    fn default() -> Self {
        Self {
            max_comments: default_max_comments(),
            max_depth: default_max_depth(),
            score_ratio: default_score_ratio(),
        }
    }
}

/// Criteria for deciding whether an article has a scrapeable video
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VideoCriteria {
    /// Minimum video duration in seconds (None = no minimum)
    #[serde(default)]
    pub min_duration: Option<f64>,

    /// Maximum video duration in seconds (None = no maximum)
    #[serde(default)]
    pub max_duration: Option<f64>,

    /// Whether YouTube embeds count as videos (default: true)
    #[serde(default = "default_true")]
    pub include_youtube: bool,
}

impl Default for VideoCriteria {
    fn default() -> Self {
        Self {
            min_duration: None,
            max_duration: None,
            include_youtube: default_true(),
        }
    }
}

/// Retry policy for the resumable upload loop
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadPolicy {
    /// Maximum number of retries before the upload is abandoned (default: 10)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
        }
    }
}

/// Optional metadata for an upload call
///
/// `category` defaults to 22 ("People & Blogs" on YouTube) and the privacy
/// status to unlisted, matching the service's least-surprising publication
/// mode for automated uploads.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadOptions {
    /// Description for the video
    #[serde(default)]
    pub description: String,

    /// Tags for the video
    #[serde(default)]
    pub tags: BTreeSet<String>,

    /// Numeric category id to upload under (must be > 0)
    #[serde(default = "default_category")]
    pub category: i32,

    /// Privacy status for the published video
    #[serde(default)]
    pub privacy_status: crate::youtube::PrivacyStatus,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            description: String::new(),
            tags: BTreeSet::new(),
            category: default_category(),
            privacy_status: crate::youtube::PrivacyStatus::default(),
        }
    }
}

fn default_max_comments() -> usize {
    10
}

fn default_max_depth() -> u32 {
    2
}

fn default_score_ratio() -> f64 {
    0.5
}

fn default_true() -> bool {
    true
}

fn default_max_retries() -> u32 {
    10
}

fn default_category() -> i32 {
    22
}
