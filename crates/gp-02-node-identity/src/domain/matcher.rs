//! Identity line matcher.
//!
//! The node logs its identity as a JSON-ish field: `"nodeID": "NodeID-<alnum>"`.

const NEEDLE: &str = "\"nodeID\": \"NodeID-";

/// Extract `NodeID-<alnum>` from a log line.
///
/// Returns the first occurrence whose alphanumeric run is non-empty and
/// closed by a quote. Checksum validity is not checked here.
pub fn extract_node_id(line: &str) -> Option<&str> {
    let mut search_from = 0;
    while let Some(pos) = line[search_from..].find(NEEDLE) {
        let start = search_from + pos;
        let id_start = start + NEEDLE.len() - "NodeID-".len();
        let body_start = start + NEEDLE.len();
        let body_len = line[body_start..]
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric())
            .count();
        let body_end = body_start + body_len;
        if body_len > 0 && line[body_end..].starts_with('"') {
            return Some(&line[id_start..body_end]);
        }
        search_from = body_start;
    }
    None
}
