/// The search session state machine
///
/// A session lives from the submission of a search term until it is
/// replaced by a new term. It owns the page cursor, the total-page count
/// reported by the API, the accumulated photo list, the loading flag,
/// the last error, and the current selection. It never touches the
/// network or the UI, which keeps every transition unit-testable.

use crate::state::data::{Photo, SearchPage};
use thiserror::Error;

/// Minimum number of characters a search term must have after trimming
pub const MIN_QUERY_LEN: usize = 3;

/// Why a submitted search term was not accepted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryRejection {
    /// Matches the original validation wording of the search form
    #[error("search text must be longer than 2 characters")]
    TooShort,
    #[error("already showing results for \"{0}\"")]
    Unchanged(String),
}

/// All state for the active query session.
///
/// Lifecycle: idle (no query yet) -> loading (fetch in flight)
/// -> ready (results present) -> error (last fetch failed), where
/// loading/ready/error repeat for every "load more" action.
#[derive(Debug, Default)]
pub struct SearchSession {
    /// The active search term, None until the first accepted submission
    query: Option<String>,
    /// Highest page requested so far (1-based, 0 = nothing requested).
    /// Rolled back on a failed fetch so it always ends up matching the
    /// number of pages actually in the accumulator.
    page: u32,
    /// Total pages reported by the API for this query
    total_pages: u32,
    /// Photos accumulated across pages, in fetch order
    photos: Vec<Photo>,
    /// True while a search fetch is in flight
    loading: bool,
    /// Message of the last failed fetch, cleared on the next submission
    error: Option<String>,
    /// ID of the photo shown in the detail overlay
    selected: Option<String>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new query session from raw form input.
    ///
    /// Trims the input and rejects it when it is shorter than
    /// `MIN_QUERY_LEN` or identical to the active query. On acceptance
    /// the accumulator, selection, and error are cleared, the page
    /// cursor moves to 1, the session enters loading, and the accepted
    /// term is returned so the caller can issue the fetch.
    pub fn begin_search(&mut self, input: &str) -> Result<String, QueryRejection> {
        let term = input.trim();

        if term.chars().count() < MIN_QUERY_LEN {
            return Err(QueryRejection::TooShort);
        }
        if self.query.as_deref() == Some(term) {
            return Err(QueryRejection::Unchanged(term.to_string()));
        }

        self.query = Some(term.to_string());
        self.page = 1;
        self.total_pages = 0;
        self.photos.clear();
        self.loading = true;
        self.error = None;
        self.selected = None;

        Ok(term.to_string())
    }

    /// Advance the page cursor and enter loading for a "load more" fetch.
    ///
    /// Returns the (query, page) pair to fetch, or None when there is
    /// nothing to load: no active query, a fetch already in flight, an
    /// error showing, or the last page already loaded.
    pub fn begin_load_more(&mut self) -> Option<(String, u32)> {
        if !self.has_more() {
            return None;
        }

        let query = self.query.clone()?;
        self.page += 1;
        self.loading = true;

        Some((query, self.page))
    }

    /// Whether a resolving fetch still belongs to this session.
    ///
    /// A fetch started for an earlier query (or page) may resolve after
    /// the user has already moved on; its result must be discarded
    /// instead of being merged into the wrong session.
    pub fn expects_response(&self, query: &str, page: u32) -> bool {
        self.loading && self.query.as_deref() == Some(query) && self.page == page
    }

    /// Merge a successfully fetched page into the session
    pub fn apply_page(&mut self, page: SearchPage) {
        self.total_pages = page.total_pages;
        self.photos.extend(page.results);
        self.loading = false;
        self.error = None;
    }

    /// Record a failed fetch.
    ///
    /// Previously accumulated pages are kept. The page cursor rolls back
    /// to the last page that actually succeeded, so the cursor never
    /// claims a page the accumulator does not hold.
    pub fn apply_error(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
        self.page = self.page.saturating_sub(1);
    }

    /// Open the detail overlay for a photo already in the accumulator.
    /// Selecting an unknown ID is a no-op.
    pub fn select(&mut self, id: &str) {
        if self.photos.iter().any(|photo| photo.id == id) {
            self.selected = Some(id.to_string());
        }
    }

    /// Close the detail overlay
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The photo currently shown in the detail overlay, if any
    pub fn selected_photo(&self) -> Option<&Photo> {
        let id = self.selected.as_deref()?;
        self.photos.iter().find(|photo| photo.id == id)
    }

    /// Whether a "load more" action is currently available
    pub fn has_more(&self) -> bool {
        self.query.is_some()
            && !self.loading
            && self.error.is_none()
            && self.page < self.total_pages
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Highest page the accumulator holds (or is being fetched)
    pub fn page(&self) -> u32 {
        self.page
    }
}
