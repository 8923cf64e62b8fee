//! Text cleanup for the film opening crawl.

/// Maximum characters of crawl shown when a film is nested in another entity.
pub const CRAWL_SUMMARY_LEN: usize = 100;

/// Collapse line breaks and runs of whitespace into single spaces.
pub fn clean_crawl(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cleaned crawl cut to [`CRAWL_SUMMARY_LEN`] characters, with `...` appended
/// when anything was cut.
pub fn summarize_crawl(raw: &str) -> String {
    let cleaned = clean_crawl(raw);
    match cleaned.char_indices().nth(CRAWL_SUMMARY_LEN) {
        Some((cut, _)) => format!("{}...", &cleaned[..cut]),
        None => cleaned,
    }
}
