//! Article model: wraps a raw submission and derives video attributes

use crate::config::VideoCriteria;
use crate::error::{Error, Result};
use crate::reddit::comments::CommentNode;
use crate::video::{AudioProbe, VideoRef, derive_audio_url};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of a Reddit submission, as supplied by a
/// [`SubredditClient`](crate::reddit::SubredditClient)
///
/// All fields are read-only snapshots taken when the client built the value;
/// nothing here is refreshed after construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Submission {
    /// Unique ID for the submission as given by Reddit
    pub id: String,
    /// Title of the submission
    pub title: String,
    /// Username of the author. None if the account was deleted.
    #[serde(default)]
    pub author: Option<String>,
    /// Body text of the submission
    #[serde(default)]
    pub selftext: String,
    /// Category of the submission, if any
    #[serde(default)]
    pub category: Option<String>,
    /// HTTP/S URL for the submission
    pub url: String,
    /// Score of the submission (may be negative)
    pub score: i64,
    /// Whether the submission is labeled not safe for work
    #[serde(default)]
    pub over_18: bool,
    /// When the submission was created
    pub created_utc: DateTime<Utc>,
    /// Media descriptor, if the submission carries media
    #[serde(default)]
    pub media: Option<Media>,
    /// Raw reply tree (may include "load more" placeholder nodes)
    #[serde(default)]
    pub comments: Vec<CommentNode>,
}

/// Media descriptor attached to a submission
///
/// Either a Reddit-hosted video entry, or a marker for a third-party embed
/// provider, mirroring the shape of the platform's `media` JSON object.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Media {
    /// Reddit-hosted video entry, when the submission hosts video natively
    #[serde(default)]
    pub reddit_video: Option<NativeVideo>,
    /// Embed provider marker (e.g. "youtube.com") for third-party players
    #[serde(rename = "type", default)]
    pub embed_type: Option<String>,
}

/// Reddit-hosted (native) video entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NativeVideo {
    /// Direct URL for the video stream
    pub fallback_url: String,
    /// Duration of the video in seconds
    pub duration: f64,
    /// Whether this is a looping-image ("gif") variant with no real video
    #[serde(default)]
    pub is_gif: bool,
}

/// A Reddit article: a [`Submission`] plus derived attributes
#[derive(Clone, Debug)]
pub struct Article {
    submission: Submission,
}

impl Article {
    /// Wrap a raw submission
    pub fn new(submission: Submission) -> Self {
        Self { submission }
    }

    /// Unique ID for the article as given by Reddit
    pub fn id(&self) -> &str {
        &self.submission.id
    }

    /// Title of the article
    pub fn title(&self) -> &str {
        &self.submission.title
    }

    /// Username of the article's author. None if the account was deleted.
    pub fn author(&self) -> Option<&str> {
        self.submission.author.as_deref()
    }

    /// Body text of the article
    pub fn text(&self) -> &str {
        &self.submission.selftext
    }

    /// Category of the article, if any
    pub fn category(&self) -> Option<&str> {
        self.submission.category.as_deref()
    }

    /// HTTP/S URL for the article
    pub fn url(&self) -> &str {
        &self.submission.url
    }

    /// Score of the article
    pub fn score(&self) -> i64 {
        self.submission.score
    }

    /// Whether the article is labeled not safe for work
    pub fn nsfw(&self) -> bool {
        self.submission.over_18
    }

    /// When the article was created
    pub fn created_utc(&self) -> DateTime<Utc> {
        self.submission.created_utc
    }

    /// Hours since the article was posted, recomputed on every access
    pub fn age_hours(&self) -> f64 {
        let elapsed = Utc::now() - self.submission.created_utc;
        elapsed.num_milliseconds() as f64 / (1000.0 * 60.0 * 60.0)
    }

    pub(crate) fn submission(&self) -> &Submission {
        &self.submission
    }

    /// Check whether the article has a video that can be scraped
    ///
    /// Only Reddit-hosted videos and (optionally) YouTube embeds count.
    /// Looping-image variants are ignored. A native entry that is present but
    /// disqualified (gif, or outside the duration bounds) does not fall back
    /// to the embed check.
    pub fn has_video(&self, criteria: &VideoCriteria) -> bool {
        let Some(media) = &self.submission.media else {
            return false;
        };
        if let Some(native) = &media.reddit_video {
            if native.is_gif {
                return false;
            }
            let duration = native.duration;
            criteria.max_duration.is_none_or(|max| duration <= max)
                && criteria.min_duration.is_none_or(|min| duration >= min)
        } else if media.embed_type.as_deref() == Some("youtube.com") {
            criteria.include_youtube
        } else {
            false
        }
    }

    /// Resolve a playable video reference for the article
    ///
    /// For a Reddit-hosted video this derives the candidate audio-track URL
    /// from the fallback URL and probes it; an unreachable candidate yields
    /// `audio_url: None`, never an error.
    ///
    /// # Errors
    ///
    /// [`Error::VideoNotFound`] when [`Article::has_video`] with default
    /// criteria would return false, and [`Error::NotSupported`] for YouTube
    /// embeds, which this crate does not resolve.
    pub async fn video<P>(&self, probe: &P) -> Result<VideoRef>
    where
        P: AudioProbe + ?Sized,
    {
        if !self.has_video(&VideoCriteria::default()) {
            return Err(Error::VideoNotFound);
        }
        let Some(media) = &self.submission.media else {
            return Err(Error::VideoNotFound);
        };

        let Some(native) = &media.reddit_video else {
            return Err(Error::NotSupported(
                "resolving YouTube embeds is not implemented".into(),
            ));
        };

        let video_url = native.fallback_url.clone();
        let audio_url = match derive_audio_url(&video_url) {
            Some(candidate) => match probe.head(candidate.as_str()).await {
                Ok(200) => Some(String::from(candidate)),
                Ok(status) => {
                    tracing::debug!(status, url = %candidate, "no audio track found");
                    None
                }
                Err(e) => {
                    tracing::debug!(error = %e, url = %candidate, "audio probe failed");
                    None
                }
            },
            None => None,
        };

        Ok(VideoRef {
            title: self.submission.title.clone(),
            author: self.submission.author.clone(),
            video_url,
            audio_url,
            duration: native.duration,
        })
    }
}
