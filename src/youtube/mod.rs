//! Publishing videos to YouTube over a resumable upload protocol
//!
//! [`YouTubeUploader`] drives a chunked, resumable upload session supplied by
//! a [`VideoService`] implementation. Transient faults (connection errors and
//! the retriable 5xx statuses) are recovered locally with randomized
//! exponential backoff up to a fixed retry cap; everything else terminates
//! the upload immediately.

mod auth;


pub use auth::{Credential, CredentialStore, DEFAULT_OAUTH_PATH, JsonFileCredentialStore};

use crate::config::{UploadOptions, UploadPolicy};
use crate::error::{Error, Result};
use crate::retry::{IsRetryable, backoff_delay};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;

/// HTTP status codes that always warrant a retry
const RETRIABLE_STATUS_CODES: [u16; 4] = [500, 502, 503, 504];

/// Privacy status for a published video
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyStatus {
    /// Visible to everyone
    Public,
    /// Visible only to the owner
    Private,
    /// Reachable by link but not listed
    #[default]
    Unlisted,
}

impl PrivacyStatus {
    /// The lowercase name the service uses for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyStatus::Public => "public",
            PrivacyStatus::Private => "private",
            PrivacyStatus::Unlisted => "unlisted",
        }
    }
}

impl std::fmt::Display for PrivacyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PrivacyStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "public" => Ok(PrivacyStatus::Public),
            "private" => Ok(PrivacyStatus::Private),
            "unlisted" => Ok(PrivacyStatus::Unlisted),
            other => Err(Error::invalid_argument(
                "privacy_status",
                format!("must be \"public\", \"private\", or \"unlisted\" (got \"{other}\")"),
            )),
        }
    }
}

/// Fault raised by a [`ResumableUpload`] while sending a chunk
#[derive(Debug, ThisError)]
pub enum UploadFault {
    /// HTTP error response from the service
    #[error("HTTP error {status}: {body}")]
    Http {
        /// Response status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// Connection-level failure (reset, refused, timed out)
    #[error("transport error: {0}")]
    Transport(String),

    /// I/O failure while reading the file being uploaded
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything the session cannot classify
    #[error("{0}")]
    Other(String),
}

impl IsRetryable for UploadFault {
    fn is_retryable(&self) -> bool {
        match self {
            UploadFault::Http { status, .. } => RETRIABLE_STATUS_CODES.contains(status),
            UploadFault::Transport(_) | UploadFault::Io(_) => true,
            UploadFault::Other(_) => false,
        }
    }
}

/// Progress report for a chunk send
#[derive(Clone, Copy, Debug, Default)]
pub struct ChunkStatus {
    /// Bytes acknowledged by the server so far
    pub bytes_sent: u64,
    /// Total size of the upload, when the session knows it
    pub total_bytes: Option<u64>,
}

/// Final response from the service at the end of an upload
#[derive(Clone, Debug)]
pub struct UploadResponse {
    /// ID of the uploaded video, when the service supplied one
    pub id: Option<String>,
    /// Raw response payload, for diagnostics
    pub raw: serde_json::Value,
}

impl UploadResponse {
    /// A well-formed final response carrying the uploaded video's id
    pub fn with_id(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            raw: serde_json::json!({ "id": id }),
            id: Some(id),
        }
    }
}

/// A chunked, resumable upload session
///
/// `next_chunk` sends the next chunk and reports progress. The response is
/// None while the upload is in flight and Some once the service has answered
/// with its final payload. After a fault, calling `next_chunk` again resumes
/// from the last acknowledged byte offset.
#[async_trait]
pub trait ResumableUpload: Send {
    /// Send the next chunk
    async fn next_chunk(
        &mut self,
    ) -> std::result::Result<(ChunkStatus, Option<UploadResponse>), UploadFault>;
}

/// Metadata and target file for one upload
#[derive(Clone, Debug)]
pub struct UploadRequest {
    /// Path of the video file to upload
    pub path: PathBuf,
    /// Title for the video
    pub title: String,
    /// Description for the video
    pub description: String,
    /// Tags for the video
    pub tags: BTreeSet<String>,
    /// Numeric category id to upload under
    pub category: i32,
    /// Privacy status for the published video
    pub privacy_status: PrivacyStatus,
}

/// Network side of the video service: opens resumable upload sessions
///
/// Implementations own the wire protocol; the uploader only drives the
/// session they hand back.
#[async_trait]
pub trait VideoService: Send + Sync {
    /// Start a resumable upload session for the given request
    async fn begin_upload(
        &self,
        credential: &Credential,
        request: &UploadRequest,
    ) -> Result<Box<dyn ResumableUpload>>;
}

/// Upload loop state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum UploadState {
    /// A chunk is in flight
    Sending,
    /// Sleeping out a backoff delay before resuming
    RetryWait,
    /// Terminal: the service returned the final resource id
    Done,
    /// Terminal: non-retriable fault or retries exhausted
    Failed,
}

/// Mutable attempt state for one upload call
struct UploadTask {
    state: UploadState,
    bytes_sent: u64,
    retries: u32,
    last_error: Option<String>,
}

impl UploadTask {
    fn new() -> Self {
        Self {
            state: UploadState::Sending,
            bytes_sent: 0,
            retries: 0,
            last_error: None,
        }
    }

    fn enter(&mut self, next: UploadState) {
        tracing::trace!(from = ?self.state, to = ?next, "upload state transition");
        self.state = next;
    }
}

/// Uploads videos to YouTube
pub struct YouTubeUploader<C, S> {
    credentials: C,
    service: S,
    policy: UploadPolicy,
}

impl<C, S> YouTubeUploader<C, S>
where
    C: CredentialStore,
    S: VideoService,
{
    /// Create an uploader with the default retry policy
    pub fn new(credentials: C, service: S) -> Self {
        Self::with_policy(credentials, service, UploadPolicy::default())
    }

    /// Create an uploader with an explicit retry policy
    pub fn with_policy(credentials: C, service: S, policy: UploadPolicy) -> Self {
        Self {
            credentials,
            service,
            policy,
        }
    }

    /// Whether a valid credential is currently available
    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_authenticated()
    }

    /// Upload a video, returning the ID of the uploaded resource
    ///
    /// Inputs are validated before any network activity: `path` must be an
    /// existing regular file, and `options.category` must be greater than 0.
    /// Retriable faults are recovered in place by resuming the session after
    /// a randomized exponential backoff, up to the policy's retry cap.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for bad inputs, [`Error::NotAuthenticated`]
    /// when no valid credential is stored, and [`Error::Upload`] when the
    /// upload itself fails terminally.
    pub async fn upload(
        &self,
        path: impl AsRef<Path>,
        title: &str,
        options: UploadOptions,
    ) -> Result<String> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::invalid_argument(
                "path",
                format!("\"{}\" is not a file", path.display()),
            ));
        }
        if options.category <= 0 {
            return Err(Error::invalid_argument(
                "category",
                "category must be greater than 0",
            ));
        }

        let credential = self
            .credentials
            .load()
            .ok()
            .flatten()
            .filter(Credential::is_valid)
            .ok_or(Error::NotAuthenticated)?;

        let request = UploadRequest {
            path: path.to_path_buf(),
            title: title.to_string(),
            description: options.description,
            tags: options.tags,
            category: options.category,
            privacy_status: options.privacy_status,
        };
        tracing::info!(
            title = %request.title,
            path = %request.path.display(),
            privacy_status = %request.privacy_status,
            "starting resumable upload"
        );

        let mut session = self.service.begin_upload(&credential, &request).await?;
        self.drive(session.as_mut()).await
    }

    /// Run the upload loop to a terminal state
    async fn drive(&self, session: &mut dyn ResumableUpload) -> Result<String> {
        let mut task = UploadTask::new();
        loop {
            match session.next_chunk().await {
                Ok((status, Some(response))) => {
                    return match response.id {
                        Some(id) => {
                            task.enter(UploadState::Done);
                            tracing::info!(
                                video_id = %id,
                                bytes_sent = status.bytes_sent,
                                "upload complete"
                            );
                            Ok(id)
                        }
                        // The server gave a final answer the driver cannot
                        // interpret; retrying would not change it.
                        None => {
                            task.enter(UploadState::Failed);
                            Err(Error::Upload(format!(
                                "unexpected response: {}",
                                response.raw
                            )))
                        }
                    };
                }
                Ok((status, None)) => {
                    task.bytes_sent = status.bytes_sent;
                    tracing::debug!(
                        bytes_sent = task.bytes_sent,
                        total_bytes = ?status.total_bytes,
                        "chunk acknowledged"
                    );
                }
                Err(fault) if fault.is_retryable() => {
                    task.retries += 1;
                    task.last_error = Some(fault.to_string());
                    if task.retries > self.policy.max_retries {
                        task.enter(UploadState::Failed);
                        return Err(Error::Upload(format!(
                            "retries exhausted after {} attempts (last error: {})",
                            self.policy.max_retries,
                            task.last_error.as_deref().unwrap_or("unknown")
                        )));
                    }
                    let delay = backoff_delay(task.retries);
                    tracing::warn!(
                        error = %fault,
                        retry = task.retries,
                        max_retries = self.policy.max_retries,
                        sleep_secs = delay.as_secs_f64(),
                        "retriable upload fault, backing off"
                    );
                    task.enter(UploadState::RetryWait);
                    tokio::time::sleep(delay).await;
                    task.enter(UploadState::Sending);
                }
                Err(fault) => {
                    task.enter(UploadState::Failed);
                    return Err(Error::Upload(fault.to_string()));
                }
            }
        }
    }
}
