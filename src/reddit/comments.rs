//! Comment-chain selection
//!
//! A full reply tree is far too large to read aloud in an automated
//! production pipeline, so each article is summarized as a handful of
//! top-level comments, each expanded downward into a single-best-reply
//! chain. The chain is a linked sequence, not a tree.

use crate::config::CommentSelection;
use crate::reddit::Article;
use serde::{Deserialize, Serialize};

/// Body text Reddit substitutes for removed comments
const DELETED_BODY: &str = "[deleted]";

/// Raw node in a submission's reply tree
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CommentNode {
    /// An actual comment
    Comment(RawComment),
    /// A "load more comments" placeholder; selection discards these
    More,
}

impl CommentNode {
    /// The comment payload, if this node is one
    pub fn as_comment(&self) -> Option<&RawComment> {
        match self {
            CommentNode::Comment(raw) => Some(raw),
            CommentNode::More => None,
        }
    }
}

/// Raw comment as supplied by the listing client
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawComment {
    /// Username of the comment's author. None if the account was deleted.
    #[serde(default)]
    pub author: Option<String>,
    /// Body of the comment
    pub body: String,
    /// Score of the comment
    pub score: i64,
    /// Direct replies
    #[serde(default)]
    pub replies: Vec<CommentNode>,
}

/// A selected comment with at most one chained child
///
/// The child, once attached, is exclusively owned by its parent;
/// [`Comment::child`] hands out an independent copy so callers cannot mutate
/// the stored chain through an aliased reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    author: Option<String>,
    body: String,
    score: i64,
    child: Option<Box<Comment>>,
}

impl Comment {
    fn from_raw(raw: &RawComment) -> Self {
        Self {
            author: raw.author.clone(),
            body: raw.body.clone(),
            score: raw.score,
            child: None,
        }
    }

    /// Username of the comment's author. None if the account was deleted.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Body of the comment
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Score of the comment
    pub fn score(&self) -> i64 {
        self.score
    }

    /// An independent copy of the chained child comment, if any
    pub fn child(&self) -> Option<Comment> {
        self.child.as_deref().cloned()
    }

    /// Number of comments in this chain, including self
    pub fn chain_len(&self) -> usize {
        1 + self.child.as_deref().map_or(0, Comment::chain_len)
    }
}

impl Article {
    /// Select the best comments for the article
    ///
    /// Top-level comments are sorted by score (descending, ties keep their
    /// original order), the first `max_comments` are taken, and comments with
    /// a deleted author or body are skipped. Each survivor is expanded into a
    /// chain: the highest-scored direct reply is attached as the child when
    /// its score exceeds `parent score * score_ratio`, repeating downward up
    /// to `max_depth` links. An article with no comments yields an empty
    /// list.
    pub fn comments(&self, selection: &CommentSelection) -> Vec<Comment> {
        let max_comments = selection.max_comments.max(1);
        let score_ratio = selection.score_ratio.max(0.0);

        let mut top: Vec<&RawComment> = self
            .submission()
            .comments
            .iter()
            .filter_map(CommentNode::as_comment)
            .collect();
        top.sort_by(|a, b| b.score.cmp(&a.score));

        let mut selected = Vec::new();
        for raw in top.into_iter().take(max_comments) {
            if raw.author.is_none() || raw.body == DELETED_BODY {
                continue;
            }
            let mut comment = Comment::from_raw(raw);
            comment.child = expand_chain(raw, selection.max_depth, score_ratio).map(Box::new);
            selected.push(comment);
        }
        selected
    }
}

/// Walk downward from `root`, collecting the single best reply at each level
/// while it qualifies, then fold the collected nodes bottom-up into an owned
/// chain
fn expand_chain(root: &RawComment, max_depth: u32, score_ratio: f64) -> Option<Comment> {
    let mut chain: Vec<&RawComment> = Vec::new();
    let mut current = root;
    for _ in 0..max_depth {
        let Some(best) = best_reply(current) else {
            break;
        };
        if best.score as f64 <= current.score as f64 * score_ratio {
            break;
        }
        chain.push(best);
        current = best;
    }

    let mut child: Option<Comment> = None;
    for raw in chain.into_iter().rev() {
        let mut comment = Comment::from_raw(raw);
        comment.child = child.take().map(Box::new);
        child = Some(comment);
    }
    child
}

/// Highest-scored direct reply; ties go to the first one seen
fn best_reply(parent: &RawComment) -> Option<&RawComment> {
    let mut best: Option<&RawComment> = None;
    for reply in parent.replies.iter().filter_map(CommentNode::as_comment) {
        match best {
            Some(current) if reply.score <= current.score => {}
            _ => best = Some(reply),
        }
    }
    best
}
