//! # vidmaker
//!
//! Backend library for automated video-compilation pipelines: mine popular
//! video posts from Reddit, summarize their discussion as short comment
//! chains, resolve the hosted video (with audio-track discovery), and
//! publish a finished file to YouTube over a resumable, retry-tolerant
//! upload protocol.
//!
//! ## Design Philosophy
//!
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Bring your own transport** - The Reddit listing client and the
//!   YouTube upload session are traits; this crate owns ranking, selection,
//!   resolution, and the upload state machine, not the wire protocols
//! - **Sensible defaults** - Every tunable has a default matching common use
//!
//! ## Quick Start
//!
//! ```no_run
//! use vidmaker::{ArticleFilter, CommentSelection, RedditReader, TimeFilter};
//! # use vidmaker::{SubredditClient, HttpAudioProbe};
//!
//! # async fn example(client: impl SubredditClient) -> Result<(), Box<dyn std::error::Error>> {
//! let reader = RedditReader::new(client);
//! let filter = ArticleFilter {
//!     min_score: Some(1_000),
//!     ..Default::default()
//! };
//! let articles = reader
//!     .top_articles("videos", TimeFilter::Week, Some(25), &filter)
//!     .await?;
//!
//! let probe = HttpAudioProbe::new();
//! for article in &articles {
//!     let video = article.video(&probe).await?;
//!     let comments = article.comments(&CommentSelection::default());
//!     println!("{}: {} comments, video at {}", article.title(), comments.len(), video.video_url);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Reading popular articles from subreddits
pub mod reddit;
/// Retry classification and backoff
pub mod retry;
/// Video references and audio-track discovery
pub mod video;
/// Resumable uploads to YouTube
pub mod youtube;

// Re-export commonly used types
pub use config::{ArticleFilter, CommentSelection, UploadOptions, UploadPolicy, VideoCriteria};
pub use error::{Error, Result};
pub use reddit::{
    Article, ClientError, Comment, CommentNode, Media, NativeVideo, RawComment, RedditReader,
    SubredditClient, Submission, TimeFilter,
};
pub use retry::{IsRetryable, backoff_delay};
pub use video::{AudioProbe, HttpAudioProbe, VideoRef};
pub use youtube::{
    ChunkStatus, Credential, CredentialStore, JsonFileCredentialStore, PrivacyStatus,
    ResumableUpload, UploadFault, UploadRequest, UploadResponse, VideoService, YouTubeUploader,
};
