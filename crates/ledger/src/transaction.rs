use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{BookId, Entry, TagId};

/// A complete, balanced transaction ready to hand to a
/// [`TransactionSink`](crate::TransactionSink).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub book_id: BookId,
    pub date: NaiveDateTime,
    pub description: String,
    /// Selected tags, in selection order. Empty means "no tags".
    pub tag_ids: Vec<TagId>,
    pub entries: Vec<Entry>,
}

/// What the service answers once a transaction is recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTransaction {
    pub id: String,
    pub description: String,
}
