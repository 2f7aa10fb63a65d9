//! Raw, tweet-shaped record schema as stored in corpus files.
//!
//! Every field is optional at the serde layer so that a missing key is
//! reported as a [`RecordError`] naming the field instead of an opaque
//! deserialization failure. Unknown keys are ignored.

use serde::{Deserialize, Serialize};

use super::{EngagementSnapshot, InteractionRecord, ResharedPost};
use crate::error::RecordError;

/// Account block attached to a post (`user` / `retweeted_status.user`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUser {
    #[serde(default)]
    pub screen_name: Option<String>,
    #[serde(default)]
    pub listed_count: Option<u64>,
    #[serde(default)]
    pub followers_count: Option<u64>,
    #[serde(default)]
    pub statuses_count: Option<u64>,
}

/// One entry of `entities.user_mentions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMention {
    #[serde(default)]
    pub screen_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntities {
    #[serde(default)]
    pub user_mentions: Vec<RawMention>,
}

/// The `retweeted_status` sub-object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReshare {
    #[serde(default)]
    pub user: Option<RawUser>,
    #[serde(default)]
    pub text: Option<String>,
}

/// A post exactly as it appears in the corpus file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub user: Option<RawUser>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub entities: Option<RawEntities>,
    #[serde(default)]
    pub retweeted_status: Option<Box<RawReshare>>,
    #[serde(default)]
    pub in_reply_to_screen_name: Option<String>,
}

impl RawUser {
    fn snapshot(&self) -> EngagementSnapshot {
        EngagementSnapshot {
            listed_count: self.listed_count.unwrap_or(0),
            follower_count: self.followers_count.unwrap_or(0),
            post_count: self.statuses_count.unwrap_or(0),
        }
    }
}

impl RawRecord {
    /// Validate into an [`InteractionRecord`].
    ///
    /// `index` is the record's position in its corpus list and is only used
    /// for error reporting.
    ///
    /// # Errors
    ///
    /// Fails when the author id, the text, a reshared post's author or
    /// text, or a mention's screen name is missing. Engagement counters are
    /// not structurally required and default to zero.
    pub fn validate(&self, index: usize) -> Result<InteractionRecord, RecordError> {
        let at = Some(index);

        let user = self.user.as_ref().ok_or(RecordError::MissingField {
            index: at,
            field: "user",
        })?;
        let author = required_account(user.screen_name.as_deref(), at, "user.screen_name")?;
        let text = self.text.clone().ok_or(RecordError::MissingField {
            index: at,
            field: "text",
        })?;

        let mut record = InteractionRecord::new(author, text, user.snapshot())
            .map_err(|_| RecordError::BlankAuthor { index: at })?;

        if let Some(reshare) = self.retweeted_status.as_deref() {
            record = record.with_reshare(validate_reshare(reshare, at)?);
        }

        if let Some(reply_to) = self
            .in_reply_to_screen_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
        {
            record = record.with_reply_to(reply_to);
        }

        let mentions = self
            .entities
            .as_ref()
            .map(|entities| entities.user_mentions.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|m| {
                required_account(
                    m.screen_name.as_deref(),
                    at,
                    "entities.user_mentions.screen_name",
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(record.with_mentions(mentions))
    }
}

fn validate_reshare(reshare: &RawReshare, at: Option<usize>) -> Result<ResharedPost, RecordError> {
    let user = reshare.user.as_ref().ok_or(RecordError::MissingField {
        index: at,
        field: "retweeted_status.user",
    })?;
    let author = required_account(
        user.screen_name.as_deref(),
        at,
        "retweeted_status.user.screen_name",
    )?;
    let text = reshare.text.clone().ok_or(RecordError::MissingField {
        index: at,
        field: "retweeted_status.text",
    })?;

    Ok(ResharedPost {
        author,
        text,
        author_engagement: user.snapshot(),
    })
}

fn required_account(
    name: Option<&str>,
    at: Option<usize>,
    field: &'static str,
) -> Result<String, RecordError> {
    match name {
        None => Err(RecordError::MissingField { index: at, field }),
        Some(name) if name.trim().is_empty() => Err(RecordError::BlankAuthor { index: at }),
        Some(name) => Ok(name.to_string()),
    }
}
