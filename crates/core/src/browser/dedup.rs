//! Deduplication of in-page anchor data into candidates.

use std::collections::HashSet;

use super::{Candidate, RawCandidate};

/// Upper bound on candidates inspected per search term.
pub const MAX_CANDIDATES: usize = 5;

/// Turn raw anchors into candidates.
///
/// Anchors with an empty url are dropped. Repeated urls keep their first
/// occurrence, page order is preserved, and the list is cut at `limit`.
/// The title is the image alt text, falling back to the anchor text.
pub fn dedup_candidates(raw: Vec<RawCandidate>, limit: usize) -> Vec<Candidate> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut candidates = Vec::new();

    for r in raw {
        if candidates.len() >= limit {
            break;
        }
        if r.url.is_empty() || !seen.insert(r.url.clone()) {
            continue;
        }

        let alt = r.alt.trim();
        let title = if alt.is_empty() {
            r.text.trim().to_string()
        } else {
            alt.to_string()
        };

        candidates.push(Candidate {
            url: r.url,
            title,
            thumbnail_url: r.thumbnail_url,
        });
    }

    candidates
}
