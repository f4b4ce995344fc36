//! Student name splitting

use crate::app::models::Identity;

/// Split a combined `"Last, First"` name into an [`Identity`]
///
/// Returns an empty identity (both halves blank) when there is no comma.
/// Only the first comma separates the halves; anything after a second comma
/// is ignored.
pub fn split_full_name(raw: &str) -> Identity {
    let mut parts = raw.split(',');
    match (parts.next(), parts.next()) {
        (Some(last), Some(first)) => Identity::new(first.trim(), last.trim()),
        _ => Identity::default(),
    }
}
