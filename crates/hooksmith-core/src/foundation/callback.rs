//! Callback batches.
//!
//! The platform POSTs a [`Callback`] containing one or more entries, each with
//! an ordered list of [`Envelope`]s:
//!
//! ```json
//! {
//!   "object": "page",
//!   "entry": [
//!     { "id": "PAGE_ID", "time": 1458692752478, "messaging": [ { ... } ] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::de::{lossy_vec, null_as_default};
use super::envelope::Envelope;
use super::error::ParseError;

/// A batch of notifications delivered in one POST.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Callback {
    /// Subscription object, usually `"page"`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub object: String,
    /// Batch entries, in arrival order. Malformed entries are dropped.
    #[serde(default, deserialize_with = "lossy_vec")]
    pub entry: Vec<CallbackEntry>,
}

impl Callback {
    /// Parses a callback from a raw request body.
    pub fn parse(body: &[u8]) -> Result<Self, ParseError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// The envelopes that get dispatched: the last envelope of every entry,
    /// in entry order. Earlier envelopes of the same entry are skipped.
    pub fn dispatchable(&self) -> impl Iterator<Item = &Envelope> {
        self.entry.iter().filter_map(CallbackEntry::last_envelope)
    }

    /// Total number of envelopes across all entries.
    pub fn envelope_count(&self) -> usize {
        self.entry.iter().map(|e| e.messaging.len()).sum()
    }
}

/// One entry of a callback batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallbackEntry {
    /// Page ID.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Batch time in epoch milliseconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: i64,
    /// Envelopes, in delivery order. Malformed envelopes are dropped.
    #[serde(default, deserialize_with = "lossy_vec")]
    pub messaging: Vec<Envelope>,
}

impl CallbackEntry {
    /// The most recent envelope of this entry.
    pub fn last_envelope(&self) -> Option<&Envelope> {
        self.messaging.last()
    }
}
