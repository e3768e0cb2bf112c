//! Video references and audio-track discovery
//!
//! Reddit serves DASH video and audio as separate streams. The video stream
//! URL comes straight from the submission's media descriptor; the audio
//! stream has to be guessed from it by swapping the final path segment, then
//! confirmed reachable with a HEAD probe before it is trusted.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Reference to a remote video, ready for downstream assembly
///
/// Produced on demand by [`Article::video`](crate::reddit::Article::video);
/// never cached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VideoRef {
    /// Title of the video (the article title)
    pub title: String,
    /// Author of the video. None if the account was deleted.
    pub author: Option<String>,
    /// Remote URL for the video stream
    pub video_url: String,
    /// Remote URL for the separate audio stream. None if the video has no
    /// audio track or none could be confirmed reachable.
    pub audio_url: Option<String>,
    /// Duration of the video in seconds
    pub duration: f64,
}

/// Lightweight existence check against a candidate audio URL
///
/// Implementations issue a HEAD-equivalent request and report the status
/// code. Only a 200 is treated as confirmation that the audio track exists;
/// any other status, and any transport failure, means "no audio".
#[async_trait]
pub trait AudioProbe: Send + Sync {
    /// Issue a HEAD request against `url`, returning the response status code
    async fn head(&self, url: &str) -> Result<u16>;
}

/// [`AudioProbe`] backed by a reqwest HTTP client
#[derive(Clone, Debug, Default)]
pub struct HttpAudioProbe {
    client: reqwest::Client,
}

impl HttpAudioProbe {
    /// Create a probe with a default client
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AudioProbe for HttpAudioProbe {
    async fn head(&self, url: &str) -> Result<u16> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| Error::SourceApi(e.to_string()))?;
        Ok(response.status().as_u16())
    }
}

/// Derive the candidate audio-track URL from a DASH video URL
///
/// Replaces the final path segment with `DASH_audio.mp4` when the video
/// segment carries the `mp4` container extension, or with the bare `audio`
/// name used by older encodes otherwise, and strips any query or fragment.
/// Returns None when the video URL cannot be parsed or has no path to edit.
pub(crate) fn derive_audio_url(video_url: &str) -> Option<Url> {
    let mut url = Url::parse(video_url).ok()?;

    let basename = {
        let last = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or("");
        if Path::new(last).extension().and_then(|e| e.to_str()) == Some("mp4") {
            "DASH_audio.mp4"
        } else {
            "audio"
        }
    };

    url.path_segments_mut().ok()?.pop().push(basename);
    url.set_query(None);
    url.set_fragment(None);
    Some(url)
}
