/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the API layer and the UI layer. They mirror the fields of the
/// Unsplash search response that the app actually consumes.

use serde::Deserialize;

/// One page of search results as returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchPage {
    /// Total number of matching photos
    #[serde(default)]
    pub total: u64,
    /// Total number of pages available for this query
    pub total_pages: u32,
    /// The photos on this page, in API order
    pub results: Vec<Photo>,
}

/// Represents a single photo in the search results
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Photo {
    /// Unique photo ID (unique within a query session)
    pub id: String,
    /// Download URLs for the different renditions
    pub urls: PhotoUrls,
    /// Short accessibility text, missing for some photos
    #[serde(default)]
    pub alt_description: Option<String>,
    /// Longer free-form description, missing for most photos
    #[serde(default)]
    pub description: Option<String>,
    /// Like count at fetch time
    #[serde(default)]
    pub likes: u64,
    /// The photographer who took the photo
    pub user: Photographer,
}

/// The rendition URLs the app consumes
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PhotoUrls {
    /// Grid thumbnail rendition
    pub small: String,
    /// Detail view rendition
    pub regular: String,
}

/// Author metadata attached to each photo
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Photographer {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub total_photos: u64,
    #[serde(default)]
    pub portfolio_url: Option<String>,
}

impl Photo {
    /// Best available short label for the photo.
    /// Falls back to the photographer's name when the photo has no alt text.
    pub fn label(&self) -> &str {
        self.alt_description
            .as_deref()
            .filter(|alt| !alt.is_empty())
            .unwrap_or(&self.user.name)
    }
}
