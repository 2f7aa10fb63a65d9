//! Per-account engagement snapshots, independent of the graph.
//!
//! Each record contributes up to two accounts: the author of a reshared
//! post (sampled from the embedded reshare reference) and the record's own
//! author. Within a record the reshared author is sampled first. The first
//! snapshot seen for an account wins; later ones are discarded even if the
//! counters have since changed.

use std::collections::HashMap;

use clout_core::{EngagementSnapshot, InteractionRecord};
use serde::Serialize;
use tracing::{debug, instrument};

/// One account's engagement counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngagementRecord {
    pub account: String,
    pub listed_count: u64,
    pub follower_count: u64,
    pub post_count: u64,
}

impl EngagementRecord {
    fn new(account: &str, snapshot: EngagementSnapshot) -> Self {
        Self {
            account: account.to_string(),
            listed_count: snapshot.listed_count,
            follower_count: snapshot.follower_count,
            post_count: snapshot.post_count,
        }
    }
}

/// First-seen engagement per account, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngagementTable {
    rows: Vec<EngagementRecord>,
    index: HashMap<String, usize>,
}

impl EngagementTable {
    /// Sample engagement snapshots from `records`.
    #[must_use]
    #[instrument(skip(records), fields(records = records.len()))]
    pub fn from_records(records: &[InteractionRecord]) -> Self {
        let mut table = Self::default();
        let mut observed = 0usize;

        for record in records {
            if let Some(reshared) = record.reshare_of() {
                observed += 1;
                table.observe(&reshared.author, reshared.author_engagement);
            }
            observed += 1;
            table.observe(record.author(), record.author_engagement());
        }

        debug!(
            observed,
            accounts = table.len(),
            "engagement snapshots sampled"
        );
        table
    }

    /// Keep `snapshot` only if `account` has not been seen yet.
    fn observe(&mut self, account: &str, snapshot: EngagementSnapshot) {
        if self.index.contains_key(account) {
            return;
        }
        self.index.insert(account.to_string(), self.rows.len());
        self.rows.push(EngagementRecord::new(account, snapshot));
    }

    #[must_use]
    pub fn rows(&self) -> &[EngagementRecord] {
        &self.rows
    }

    #[must_use]
    pub fn get(&self, account: &str) -> Option<&EngagementRecord> {
        self.index.get(account).map(|&i| &self.rows[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clout_core::ResharedPost;

    fn snap(listed: u64, followers: u64, posts: u64) -> EngagementSnapshot {
        EngagementSnapshot {
            listed_count: listed,
            follower_count: followers,
            post_count: posts,
        }
    }

    fn post(author: &str, s: EngagementSnapshot) -> InteractionRecord {
        InteractionRecord::new(author, "text", s).expect("valid")
    }

    #[test]
    fn empty_input_yields_empty_table() {
        assert!(EngagementTable::from_records(&[]).is_empty());
    }

    #[test]
    fn first_snapshot_wins() {
        let table = EngagementTable::from_records(&[
            post("ann", snap(1, 10, 100)),
            post("ann", snap(9, 90, 900)),
        ]);
        assert_eq!(table.len(), 1);
        let ann = table.get("ann").expect("ann");
        assert_eq!(
            (ann.listed_count, ann.follower_count, ann.post_count),
            (1, 10, 100)
        );
    }

    #[test]
    fn reshared_author_is_sampled_before_record_author() {
        let record = post("bo", snap(2, 20, 200)).with_reshare(ResharedPost {
            author: "cy".to_string(),
            text: "orig".to_string(),
            author_engagement: snap(3, 30, 300),
        });
        let table = EngagementTable::from_records(&[record]);

        let accounts: Vec<&str> = table.rows().iter().map(|r| r.account.as_str()).collect();
        assert_eq!(accounts, vec!["cy", "bo"]);
        assert_eq!(table.get("cy").map(|r| r.follower_count), Some(30));
    }

    #[test]
    fn reshare_snapshot_blocks_later_author_snapshot() {
        let reshare = post("bo", snap(0, 0, 0)).with_reshare(ResharedPost {
            author: "cy".to_string(),
            text: "orig".to_string(),
            author_engagement: snap(3, 30, 300),
        });
        let later = post("cy", snap(4, 40, 400));
        let table = EngagementTable::from_records(&[reshare, later]);
        assert_eq!(table.get("cy").map(|r| r.listed_count), Some(3));
    }

    #[test]
    fn mentioned_only_accounts_are_not_sampled() {
        let record = post("ann", snap(1, 1, 1)).with_mentions(["zed"]);
        let table = EngagementTable::from_records(&[record]);
        assert!(table.get("zed").is_none());
    }
}
