use super::*;
use crate::config::VideoCriteria;
use crate::error::{Error, Result};
use crate::video::AudioProbe;
use std::sync::Mutex;

fn article_with_media(media: Option<Media>) -> Article {
    let mut sub = submission("a", 100, 5.0);
    sub.media = media;
    Article::new(sub)
}

/// Probe that answers every HEAD with a fixed outcome and records the URLs
struct FixedProbe {
    status: std::result::Result<u16, String>,
    probed: Mutex<Vec<String>>,
}

impl FixedProbe {
    fn responding(status: u16) -> Self {
        Self {
            status: Ok(status),
            probed: Mutex::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            status: Err(message.into()),
            probed: Mutex::new(Vec::new()),
        }
    }

    fn probed(&self) -> Vec<String> {
        self.probed.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait::async_trait]
impl AudioProbe for FixedProbe {
    async fn head(&self, url: &str) -> Result<u16> {
        self.probed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(url.to_string());
        match &self.status {
            Ok(status) => Ok(*status),
            Err(message) => Err(Error::SourceApi(message.clone())),
        }
    }
}

#[test]
fn article_without_media_has_no_video() {
    let article = article_with_media(None);
    assert!(!article.has_video(&VideoCriteria::default()));
}

#[test]
fn native_video_counts() {
    let article = article_with_media(Some(native_video(
        "https://v.redd.it/abc/DASH_720.mp4",
        30.0,
        false,
    )));
    assert!(article.has_video(&VideoCriteria::default()));
}

#[test]
fn gif_variant_does_not_count() {
    let article = article_with_media(Some(native_video(
        "https://v.redd.it/abc/DASH_720.mp4",
        30.0,
        true,
    )));
    assert!(!article.has_video(&VideoCriteria::default()));
}

#[test]
fn duration_bounds_are_inclusive() {
    let article = article_with_media(Some(native_video(
        "https://v.redd.it/abc/DASH_720.mp4",
        30.0,
        false,
    )));

    let exact = VideoCriteria {
        min_duration: Some(30.0),
        max_duration: Some(30.0),
        ..Default::default()
    };
    assert!(article.has_video(&exact));

    let too_short = VideoCriteria {
        min_duration: Some(30.1),
        ..Default::default()
    };
    assert!(!article.has_video(&too_short));

    let too_long = VideoCriteria {
        max_duration: Some(29.9),
        ..Default::default()
    };
    assert!(!article.has_video(&too_long));
}

#[test]
fn youtube_embed_counts_only_when_enabled() {
    let article = article_with_media(Some(youtube_embed()));
    assert!(article.has_video(&VideoCriteria::default()));

    let without = VideoCriteria {
        include_youtube: false,
        ..Default::default()
    };
    assert!(!article.has_video(&without));
}

#[test]
fn other_embed_providers_do_not_count() {
    let article = article_with_media(Some(Media {
        reddit_video: None,
        embed_type: Some("vimeo.com".into()),
    }));
    assert!(!article.has_video(&VideoCriteria::default()));
}

#[test]
fn disqualified_native_video_does_not_fall_back_to_embed() {
    // A gif entry alongside an embed marker still means "no video".
    let article = article_with_media(Some(Media {
        reddit_video: Some(NativeVideo {
            fallback_url: "https://v.redd.it/abc/DASH_720.mp4".into(),
            duration: 30.0,
            is_gif: true,
        }),
        embed_type: Some("youtube.com".into()),
    }));
    assert!(!article.has_video(&VideoCriteria::default()));
}

#[tokio::test]
async fn resolving_a_videoless_article_fails() {
    let article = article_with_media(None);
    let probe = FixedProbe::responding(200);

    let err = article.video(&probe).await.unwrap_err();
    assert!(matches!(err, Error::VideoNotFound));
    assert!(probe.probed().is_empty());
}

#[tokio::test]
async fn resolving_a_youtube_embed_is_not_supported() {
    let article = article_with_media(Some(youtube_embed()));
    let probe = FixedProbe::responding(200);

    let err = article.video(&probe).await.unwrap_err();
    assert!(matches!(err, Error::NotSupported(_)));
}

#[tokio::test]
async fn native_video_resolves_with_confirmed_audio() {
    let article = article_with_media(Some(native_video(
        "https://v.redd.it/abc123/DASH_240.mp4?source=fallback",
        42.5,
        false,
    )));
    let probe = FixedProbe::responding(200);

    let video = article.video(&probe).await.unwrap();
    assert_eq!(video.title, "post a");
    assert_eq!(video.author.as_deref(), Some("author"));
    assert_eq!(
        video.video_url,
        "https://v.redd.it/abc123/DASH_240.mp4?source=fallback"
    );
    assert_eq!(
        video.audio_url.as_deref(),
        Some("https://v.redd.it/abc123/DASH_audio.mp4")
    );
    assert_eq!(video.duration, 42.5);

    // The probe saw exactly the derived candidate.
    assert_eq!(
        probe.probed(),
        vec!["https://v.redd.it/abc123/DASH_audio.mp4".to_string()]
    );
}

#[tokio::test]
async fn missing_audio_track_resolves_without_audio() {
    let article = article_with_media(Some(native_video(
        "https://v.redd.it/abc123/DASH_240.mp4",
        42.5,
        false,
    )));
    let probe = FixedProbe::responding(404);

    let video = article.video(&probe).await.unwrap();
    assert!(video.audio_url.is_none());
}

#[tokio::test]
async fn probe_failure_resolves_without_audio() {
    let article = article_with_media(Some(native_video(
        "https://v.redd.it/abc123/DASH_240.mp4",
        42.5,
        false,
    )));
    let probe = FixedProbe::failing("connection refused");

    let video = article.video(&probe).await.unwrap();
    assert!(video.audio_url.is_none());
    assert_eq!(video.video_url, "https://v.redd.it/abc123/DASH_240.mp4");
}

#[tokio::test]
async fn unparseable_fallback_url_resolves_without_probing() {
    let article = article_with_media(Some(native_video("not a url", 10.0, false)));
    let probe = FixedProbe::responding(200);

    let video = article.video(&probe).await.unwrap();
    assert!(video.audio_url.is_none());
    assert!(probe.probed().is_empty());
}
