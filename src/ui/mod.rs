/// UI components module
///
/// Stateless view functions: each takes read-only state and returns an
/// `Element` that emits `Message`s. No component fetches anything or
/// keeps state of its own.
///
/// - `search_bar.rs` - query input, submit button, validation notice
/// - `gallery.rs` - wrapping thumbnail grid and its footer
/// - `modal.rs` - detail overlay for the selected photo

pub mod gallery;
pub mod modal;
pub mod search_bar;
