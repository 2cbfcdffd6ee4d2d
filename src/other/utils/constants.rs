/// Quiet period the search input must observe before a search is issued.
pub static DEBOUNCE_DELAY_MS: u64 = 500; // 500 Milliseconds
/// Queries shorter than this, in characters, never reach the remote service.
pub static MIN_QUERY_LENGTH: usize = 3;
pub static RESULTS_PER_PAGE: u32 = 40;
/// Key under which the favorites set is persisted.
pub static FAVORITES_KEY: &str = "favorites";
pub static MINIMUM_REQUEST_DELAY_MS: u64 = 10; // 10 Milliseconds
