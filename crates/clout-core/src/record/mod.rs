//! Typed interaction records.
//!
//! # Overview
//!
//! An [`InteractionRecord`] is one observed post about the subject entity:
//! who wrote it, what it said, and which other accounts it touches through
//! a reshare, a reply, or explicit mentions. Each record also carries a
//! snapshot of the author's engagement counters as they were when the post
//! was collected.
//!
//! Records are never built directly from untrusted input. The raw,
//! tweet-shaped JSON form lives in [`raw`]; [`RawRecord::validate`] turns it
//! into an [`InteractionRecord`] or fails with a [`RecordError`].
//!
//! ```text
//! JSON object ──serde──▶ RawRecord ──validate()──▶ InteractionRecord
//! ```

pub mod raw;

use serde::{Deserialize, Serialize};

pub use raw::{RawMention, RawRecord, RawReshare, RawUser};

use crate::error::RecordError;

/// Author engagement counters captured alongside a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngagementSnapshot {
    /// Number of public lists the account is a member of.
    pub listed_count: u64,
    /// Number of followers.
    pub follower_count: u64,
    /// Number of posts the account has published.
    pub post_count: u64,
}

/// The original post referenced by a reshare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResharedPost {
    pub author: String,
    pub text: String,
    pub author_engagement: EngagementSnapshot,
}

/// One validated interaction event.
///
/// Immutable after construction. Use [`InteractionRecord::new`] plus the
/// `with_*` builders in tests, or [`RawRecord::validate`] for real input.
/// Not `Deserialize`: parse input into [`RawRecord`] and validate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionRecord {
    author: String,
    text: String,
    reshare_of: Option<ResharedPost>,
    reply_to: Option<String>,
    mentions: Vec<String>,
    author_engagement: EngagementSnapshot,
}

impl InteractionRecord {
    /// Create a plain post with no reshare, reply, or mentions.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::BlankAuthor`] if `author` is empty or
    /// whitespace.
    pub fn new(
        author: impl Into<String>,
        text: impl Into<String>,
        author_engagement: EngagementSnapshot,
    ) -> Result<Self, RecordError> {
        let author = author.into();
        if author.trim().is_empty() {
            return Err(RecordError::BlankAuthor { index: None });
        }

        Ok(Self {
            author,
            text: text.into(),
            reshare_of: None,
            reply_to: None,
            mentions: Vec::new(),
            author_engagement,
        })
    }

    /// Attach the post this record reshares.
    #[must_use]
    pub fn with_reshare(mut self, reshared: ResharedPost) -> Self {
        self.reshare_of = Some(reshared);
        self
    }

    /// Attach the account this record replies to.
    #[must_use]
    pub fn with_reply_to(mut self, account: impl Into<String>) -> Self {
        self.reply_to = Some(account.into());
        self
    }

    /// Replace the mention list.
    #[must_use]
    pub fn with_mentions<I, S>(mut self, mentions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mentions = mentions.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn reshare_of(&self) -> Option<&ResharedPost> {
        self.reshare_of.as_ref()
    }

    #[must_use]
    pub fn reply_to(&self) -> Option<&str> {
        self.reply_to.as_deref()
    }

    /// Mentioned account ids in the order they appear in the post.
    #[must_use]
    pub fn mentions(&self) -> &[String] {
        &self.mentions
    }

    #[must_use]
    pub const fn author_engagement(&self) -> EngagementSnapshot {
        self.author_engagement
    }
}
