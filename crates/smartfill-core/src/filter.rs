use crate::path::FieldPath;
use crate::record::{RecordSet, match_text};

/// Indices of the records whose value at `path` contains `needle`.
///
/// Case-insensitive substring match; record order is preserved. Records whose
/// value is absent or `null` at `path` never match, even for an empty needle.
pub fn filter_indices(records: &RecordSet, path: &FieldPath, needle: &str) -> Vec<usize> {
    let needle = needle.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter_map(|(i, record)| {
            let text = path.resolve(record).and_then(match_text)?;
            text.to_lowercase().contains(&needle).then_some(i)
        })
        .collect()
}
