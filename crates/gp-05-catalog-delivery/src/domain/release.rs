//! Release tag filtering.

/// Version label for a release tag.
///
/// Strips one leading `v`. Returns `None` for release candidates.
pub fn release_label(tag: &str) -> Option<String> {
    let tag = tag.trim();
    let label = tag.strip_prefix('v').unwrap_or(tag);
    if label.is_empty() || label.contains("rc") {
        return None;
    }
    Some(label.to_string())
}
