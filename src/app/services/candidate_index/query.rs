//! Identity matching against the candidate index

use super::CandidateIndex;
use crate::app::models::{ExistingRecord, Identity, IdentityKey, MatchResult};

impl CandidateIndex {
    /// Resolve an identity to at most one existing record
    ///
    /// Both halves must match after trimming and lowercasing. An empty
    /// identity never matches.
    pub fn match_identity(&self, identity: &Identity) -> MatchResult<'_> {
        if identity.is_empty() {
            return MatchResult::Unmatched;
        }

        match self.get(&identity.key()) {
            Some(record) => MatchResult::Matched(record),
            None => MatchResult::Unmatched,
        }
    }

    /// Whether a record with this identity exists
    pub fn contains(&self, identity: &Identity) -> bool {
        matches!(self.match_identity(identity), MatchResult::Matched(_))
    }

    /// Look up a record by normalized identity key
    pub fn get(&self, key: &IdentityKey) -> Option<&ExistingRecord> {
        self.by_identity
            .get(key)
            .and_then(|&position| self.records.get(position))
    }

    /// All records in fetch order
    pub fn records(&self) -> &[ExistingRecord] {
        &self.records
    }
}
