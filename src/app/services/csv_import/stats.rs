//! Parsing and cleaning statistics for CSV imports

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Number of data records encountered
    pub total_records: usize,

    /// Number of rows handed to the cleaner
    pub rows_parsed: usize,

    /// Records with more cells than the header has columns
    pub ragged_records: usize,

    /// Parse errors for debugging
    pub errors: Vec<String>,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the input had to be discarded
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Row cleaning statistics
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CleanStats {
    /// Rows received from the parser
    pub input_rows: usize,

    /// Rows that survived cleaning
    pub rows_kept: usize,

    /// Rows dropped because the identity cell was empty (after any fill)
    pub dropped_empty_identity: usize,

    /// Rows dropped because a cell repeated its own column header
    pub dropped_header_rows: usize,

    /// Rows dropped because a flow-required cell was empty
    pub dropped_missing_cells: usize,

    /// Blank cells repaired by forward-fill
    pub cells_filled: usize,
}

impl CleanStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows_dropped(&self) -> usize {
        self.dropped_empty_identity + self.dropped_header_rows + self.dropped_missing_cells
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "Cleaning: {} -> {} rows | dropped {} (empty identity: {}, header rows: {}, missing cells: {}) | filled {} cells",
            self.input_rows,
            self.rows_kept,
            self.rows_dropped(),
            self.dropped_empty_identity,
            self.dropped_header_rows,
            self.dropped_missing_cells,
            self.cells_filled
        )
    }
}
