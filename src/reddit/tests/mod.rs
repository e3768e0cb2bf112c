//! Tests for article listing, comment selection, and video resolution

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod video;

use super::*;
use chrono::{Duration, Utc};
use std::sync::Mutex;

/// Build a submission created `age_hours` ago
fn submission(id: &str, score: i64, age_hours: f64) -> Submission {
    Submission {
        id: id.into(),
        title: format!("post {id}"),
        author: Some("author".into()),
        selftext: String::new(),
        category: None,
        url: format!("https://reddit.com/r/videos/{id}"),
        score,
        over_18: false,
        created_utc: Utc::now() - Duration::milliseconds((age_hours * 3_600_000.0) as i64),
        media: None,
        comments: Vec::new(),
    }
}

fn comment(author: Option<&str>, body: &str, score: i64, replies: Vec<CommentNode>) -> CommentNode {
    CommentNode::Comment(RawComment {
        author: author.map(str::to_string),
        body: body.into(),
        score,
        replies,
    })
}

fn native_video(fallback_url: &str, duration: f64, is_gif: bool) -> Media {
    Media {
        reddit_video: Some(NativeVideo {
            fallback_url: fallback_url.into(),
            duration,
            is_gif,
        }),
        embed_type: None,
    }
}

fn youtube_embed() -> Media {
    Media {
        reddit_video: None,
        embed_type: Some("youtube.com".into()),
    }
}

/// What a [`StaticClient`] saw when the reader called it
#[derive(Clone, Debug, PartialEq)]
struct ListingCall {
    subreddit: String,
    time_filter: Option<TimeFilter>,
    limit: Option<u32>,
}

/// Client that serves a canned set of submissions and records calls
struct StaticClient {
    submissions: Vec<Submission>,
    calls: Mutex<Vec<ListingCall>>,
}

impl StaticClient {
    fn new(submissions: Vec<Submission>) -> Self {
        Self {
            submissions,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<ListingCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, subreddit: &str, time_filter: Option<TimeFilter>, limit: Option<u32>) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ListingCall {
                subreddit: subreddit.into(),
                time_filter,
                limit,
            });
    }
}

#[async_trait::async_trait]
impl SubredditClient for StaticClient {
    async fn hot(
        &self,
        subreddit: &str,
        limit: Option<u32>,
    ) -> std::result::Result<Vec<Submission>, ClientError> {
        self.record(subreddit, None, limit);
        Ok(self.submissions.clone())
    }

    async fn top(
        &self,
        subreddit: &str,
        time_filter: TimeFilter,
        limit: Option<u32>,
    ) -> std::result::Result<Vec<Submission>, ClientError> {
        self.record(subreddit, Some(time_filter), limit);
        Ok(self.submissions.clone())
    }
}

/// Client whose every listing call fails
struct FailingClient;

#[async_trait::async_trait]
impl SubredditClient for FailingClient {
    async fn hot(
        &self,
        _subreddit: &str,
        _limit: Option<u32>,
    ) -> std::result::Result<Vec<Submission>, ClientError> {
        Err("connection reset by upstream".into())
    }

    async fn top(
        &self,
        _subreddit: &str,
        _time_filter: TimeFilter,
        _limit: Option<u32>,
    ) -> std::result::Result<Vec<Submission>, ClientError> {
        Err("connection reset by upstream".into())
    }
}
