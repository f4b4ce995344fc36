//! Candidate index loading statistics

/// Statistics about building the candidate index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadStats {
    /// Records returned by the store
    pub records_fetched: usize,

    /// Records reachable through an identity lookup
    pub records_indexed: usize,

    /// Records shadowed by an earlier record with the same identity
    pub duplicate_identities: usize,

    /// Records whose first or last name is blank
    pub blank_identities: usize,

    /// Time taken to fetch and index
    pub load_duration: std::time::Duration,
}

impl LoadStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_duplicates(&self) -> bool {
        self.duplicate_identities > 0
    }

    /// Get a summary string of the loading process
    pub fn summary(&self) -> String {
        format!(
            "Fetched {} records, indexed {} identities ({} duplicate, {} blank) in {:.2}s",
            self.records_fetched,
            self.records_indexed,
            self.duplicate_identities,
            self.blank_identities,
            self.load_duration.as_secs_f64()
        )
    }
}
