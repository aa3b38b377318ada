//! Search URL construction.

use super::{RecencyWindow, SortKey};

/// Build the marketplace search URL for one term.
///
/// `{base}/{locale}/search/models?keyword=<term>`, plus
/// `designCreateSince=<days>` unless the window is all-time and
/// `orderBy=<key>` when a sort key is given.
pub fn build_search_url(
    base_url: &str,
    locale: &str,
    term: &str,
    recency: RecencyWindow,
    sort: Option<SortKey>,
) -> String {
    let base = base_url.trim_end_matches('/');
    let locale = locale.trim_matches('/');

    let mut url = if locale.is_empty() {
        format!("{}/search/models", base)
    } else {
        format!("{}/{}/search/models", base, locale)
    };

    url.push_str(&format!("?keyword={}", urlencoding::encode(term)));

    if recency != RecencyWindow::AllTime {
        url.push_str(&format!("&designCreateSince={}", recency.days()));
    }

    if let Some(sort) = sort {
        url.push_str(&format!("&orderBy={}", sort.as_param()));
    }

    url
}
