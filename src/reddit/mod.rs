//! Reading popular articles from subreddits
//!
//! [`RedditReader`] composes a [`SubredditClient`] (the network side, owned
//! by the embedding application) with score/age filtering and ranking. The
//! client supplies raw [`Submission`] snapshots; the reader turns them into
//! [`Article`]s sorted by score.

mod article;
mod comments;

#[cfg(test)]
mod tests;

pub use article::{Article, Media, NativeVideo, Submission};
pub use comments::{Comment, CommentNode, RawComment};

use crate::config::ArticleFilter;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Error type surfaced by a [`SubredditClient`]
///
/// The reader never lets this reach callers: every client failure is
/// re-wrapped into [`Error::SourceApi`] carrying the underlying message.
pub type ClientError = Box<dyn std::error::Error + Send + Sync>;

/// Network client for subreddit listings
///
/// Implementations own the wire protocol (and any timeout policy); the
/// reader only consumes the snapshots they produce.
#[async_trait]
pub trait SubredditClient: Send + Sync {
    /// Fetch the "hot" listing for a subreddit
    ///
    /// A `limit` of None means "fetch as many as available".
    async fn hot(
        &self,
        subreddit: &str,
        limit: Option<u32>,
    ) -> std::result::Result<Vec<Submission>, ClientError>;

    /// Fetch the "top" listing for a subreddit over a period of time
    async fn top(
        &self,
        subreddit: &str,
        time_filter: TimeFilter,
        limit: Option<u32>,
    ) -> std::result::Result<Vec<Submission>, ClientError>;
}

/// Period covered by a "top" listing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFilter {
    /// All time
    All,
    /// Past day
    Day,
    /// Past hour
    Hour,
    /// Past month
    Month,
    /// Past week
    Week,
    /// Past year
    Year,
}

impl TimeFilter {
    /// The lowercase name Reddit's API uses for this period
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFilter::All => "all",
            TimeFilter::Day => "day",
            TimeFilter::Hour => "hour",
            TimeFilter::Month => "month",
            TimeFilter::Week => "week",
            TimeFilter::Year => "year",
        }
    }
}

impl std::fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TimeFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(TimeFilter::All),
            "day" => Ok(TimeFilter::Day),
            "hour" => Ok(TimeFilter::Hour),
            "month" => Ok(TimeFilter::Month),
            "week" => Ok(TimeFilter::Week),
            "year" => Ok(TimeFilter::Year),
            other => Err(Error::invalid_argument(
                "time_filter",
                format!("must be one of all, day, hour, month, week, year (got \"{other}\")"),
            )),
        }
    }
}

/// Reads popular articles from subreddits
pub struct RedditReader<C> {
    client: C,
}

impl<C: SubredditClient> RedditReader<C> {
    /// Create a reader over the given listing client
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// List popular (hot) articles from a subreddit
    ///
    /// A `limit` of None or Some(0) fetches as many articles as available;
    /// any other value is clamped to at least 1. Articles failing the filter
    /// bounds are dropped, and the result is sorted by score, descending.
    ///
    /// # Errors
    ///
    /// [`Error::SourceApi`] if the listing fetch fails.
    pub async fn hot_articles(
        &self,
        subreddit: &str,
        limit: Option<u32>,
        filter: &ArticleFilter,
    ) -> Result<Vec<Article>> {
        let limit = normalize_limit(limit);
        let submissions = self
            .client
            .hot(subreddit, limit)
            .await
            .map_err(|e| Error::SourceApi(e.to_string()))?;
        let articles = rank(submissions, filter);
        tracing::debug!(
            subreddit,
            requested = ?limit,
            returned = articles.len(),
            "listed hot articles"
        );
        Ok(articles)
    }

    /// List the top articles from a subreddit for a period of time
    ///
    /// Limit and filter semantics match [`RedditReader::hot_articles`].
    ///
    /// # Errors
    ///
    /// [`Error::SourceApi`] if the listing fetch fails.
    pub async fn top_articles(
        &self,
        subreddit: &str,
        time_filter: TimeFilter,
        limit: Option<u32>,
        filter: &ArticleFilter,
    ) -> Result<Vec<Article>> {
        let limit = normalize_limit(limit);
        let submissions = self
            .client
            .top(subreddit, time_filter, limit)
            .await
            .map_err(|e| Error::SourceApi(e.to_string()))?;
        let articles = rank(submissions, filter);
        tracing::debug!(
            subreddit,
            time_filter = %time_filter,
            requested = ?limit,
            returned = articles.len(),
            "listed top articles"
        );
        Ok(articles)
    }
}

/// Some(0) means the same as None: fetch everything available
fn normalize_limit(limit: Option<u32>) -> Option<u32> {
    limit.filter(|&n| n > 0)
}

/// Apply the filter bounds and sort by score, descending (stable)
fn rank(submissions: Vec<Submission>, filter: &ArticleFilter) -> Vec<Article> {
    let mut articles: Vec<Article> = submissions
        .into_iter()
        .map(Article::new)
        .filter(|article| {
            filter.min_score.is_none_or(|min| article.score() >= min)
                && filter
                    .min_age_hours
                    .is_none_or(|min| article.age_hours() >= min)
        })
        .collect();
    articles.sort_by(|a, b| b.score().cmp(&a.score()));
    articles
}
