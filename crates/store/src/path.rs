use crate::store::StoreError;

/// Splits a `/`-delimited path into its non-empty segments.
///
/// Leading, trailing, and repeated separators are dropped, so `"/"`, `""`,
/// and `"//"` all denote the root (empty segment list).
pub fn segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits off the final segment, returning the parent segments and the name.
///
/// The root has no parent and no name, so root-denoting inputs fail with
/// `InvalidPath`.
pub fn split_parent(path: &str) -> Result<(Vec<String>, String), StoreError> {
    let mut segs = segments(path);
    match segs.pop() {
        Some(name) => Ok((segs, name)),
        None => Err(StoreError::InvalidPath(path.to_string())),
    }
}
