use std::collections::HashMap;
use std::time::Duration;

use iced::widget::scrollable::RelativeOffset;
use iced::widget::{column, container, image, scrollable, text, text_input};
use iced::{Alignment, Element, Length, Task, Theme};

// Declare the application modules
mod api;
mod state;
mod ui;

use api::{UnsplashClient, DEFAULT_PER_PAGE};
use state::data::SearchPage;
use state::search::SearchSession;

/// How long a validation notice stays on screen
const NOTICE_DURATION: Duration = Duration::from_secs(2);

/// Widget ID of the gallery scrollable, so a completed "load more" can
/// snap to the end and reveal the new photos
const GALLERY_SCROLL_ID: &str = "gallery-scroll";

/// Result of one search fetch, tagged with the query and page it was
/// issued for so the update loop can discard responses that no longer
/// match the active session
#[derive(Debug, Clone)]
struct SearchOutcome {
    query: String,
    page: u32,
    result: Result<SearchPage, String>,
}

/// Result of one rendition download, keyed by photo ID.
/// `handle` is None when the download failed; the card then simply
/// stays on its placeholder.
#[derive(Debug, Clone)]
struct ImageOutcome {
    id: String,
    handle: Option<image::Handle>,
}

/// Main application state
struct PhotoSearch {
    /// API client carrying the access key
    client: UnsplashClient,
    /// The active query session: pagination, results, loading, errors
    session: SearchSession,
    /// Current contents of the search input
    input: String,
    /// Transient validation notice, if one is showing
    notice: Option<String>,
    /// Bumped for every notice so an old expiry timer cannot clear a
    /// newer notice
    notice_seq: u64,
    /// Downloaded grid thumbnails by photo ID
    thumbnails: HashMap<String, image::Handle>,
    /// Full-size rendition of the selected photo, once downloaded
    full_image: Option<(String, image::Handle)>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// The user edited the search input
    InputChanged(String),
    /// The user submitted the search form
    SearchSubmitted,
    /// The user clicked the "load more" button
    LoadMoreRequested,
    /// A search fetch resolved
    SearchLoaded(SearchOutcome),
    /// A grid thumbnail download resolved
    ThumbnailLoaded(ImageOutcome),
    /// The full-size download for the overlay resolved
    FullImageLoaded(ImageOutcome),
    /// The user clicked a card in the grid
    PhotoSelected(String),
    /// The user clicked the overlay backdrop
    OverlayDismissed,
    /// A validation notice reached the end of its lifetime
    NoticeExpired(u64),
}

impl PhotoSearch {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // The access key is a hard requirement; without it every request
        // would come back 401 anyway
        let access_key = std::env::var("UNSPLASH_ACCESS_KEY").expect(
            "UNSPLASH_ACCESS_KEY is not set. \
             Create an Unsplash access key and export it before launching.",
        );

        let client = UnsplashClient::new(&access_key)
            .expect("Failed to build the HTTP client from the provided access key.");

        println!("🔎 Photo search ready");

        (
            PhotoSearch {
                client,
                session: SearchSession::new(),
                input: String::new(),
                notice: None,
                notice_seq: 0,
                thumbnails: HashMap::new(),
                full_image: None,
            },
            text_input::focus(text_input::Id::new(ui::search_bar::INPUT_ID)),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::InputChanged(value) => {
                self.input = value;
                Task::none()
            }

            Message::SearchSubmitted => match self.session.begin_search(&self.input) {
                Ok(query) => {
                    println!("🔍 Searching for \"{query}\"");
                    self.input.clear();
                    self.notice = None;
                    self.thumbnails.clear();
                    self.full_image = None;
                    self.fetch_page(query, 1)
                }
                Err(rejection) => self.show_notice(rejection.to_string()),
            },

            Message::LoadMoreRequested => match self.session.begin_load_more() {
                Some((query, page)) => self.fetch_page(query, page),
                None => Task::none(),
            },

            Message::SearchLoaded(outcome) => {
                if !self.session.expects_response(&outcome.query, outcome.page) {
                    // A newer query superseded this fetch; drop its result
                    return Task::none();
                }

                match outcome.result {
                    Ok(page) => {
                        let renditions: Vec<(String, String)> = page
                            .results
                            .iter()
                            .map(|photo| (photo.id.clone(), photo.urls.small.clone()))
                            .collect();

                        self.session.apply_page(page);

                        let mut tasks: Vec<Task<Message>> = renditions
                            .into_iter()
                            .map(|(id, url)| {
                                self.fetch_image_task(id, url, Message::ThumbnailLoaded)
                            })
                            .collect();

                        if outcome.page > 1 {
                            // Reveal the freshly appended photos
                            tasks.push(scrollable::snap_to(
                                scrollable::Id::new(GALLERY_SCROLL_ID),
                                RelativeOffset::END,
                            ));
                        }

                        Task::batch(tasks)
                    }
                    Err(message) => {
                        eprintln!("⚠️  Search failed: {message}");
                        self.session.apply_error(message);
                        Task::none()
                    }
                }
            }

            Message::ThumbnailLoaded(outcome) => {
                if let Some(handle) = outcome.handle {
                    // Ignore downloads started for an abandoned session
                    let current = self
                        .session
                        .photos()
                        .iter()
                        .any(|photo| photo.id == outcome.id);
                    if current {
                        self.thumbnails.insert(outcome.id, handle);
                    }
                }
                Task::none()
            }

            Message::PhotoSelected(id) => {
                self.session.select(&id);

                // The overlay itself is populated from the record we
                // already hold; only the full-size bytes are fetched
                match self.session.selected_photo() {
                    Some(photo) => {
                        let id = photo.id.clone();
                        let url = photo.urls.regular.clone();
                        self.fetch_image_task(id, url, Message::FullImageLoaded)
                    }
                    None => Task::none(),
                }
            }

            Message::FullImageLoaded(outcome) => {
                let still_selected = self
                    .session
                    .selected_photo()
                    .map(|photo| photo.id == outcome.id)
                    .unwrap_or(false);

                if still_selected {
                    if let Some(handle) = outcome.handle {
                        self.full_image = Some((outcome.id, handle));
                    }
                }
                Task::none()
            }

            Message::OverlayDismissed => {
                self.session.clear_selection();
                self.full_image = None;
                Task::none()
            }

            Message::NoticeExpired(seq) => {
                if seq == self.notice_seq {
                    self.notice = None;
                }
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let header = ui::search_bar::search_bar(&self.input, self.notice.as_deref());

        let gallery: Element<Message> = if self.session.query().is_none() {
            container(text("Type a search term to find photos").size(16))
                .center_x(Length::Fill)
                .padding(40)
                .into()
        } else {
            ui::gallery::image_grid(self.session.photos(), &self.thumbnails)
        };

        let feed = column![gallery, ui::gallery::gallery_footer(&self.session)]
            .spacing(24)
            .padding(24)
            .align_x(Alignment::Center)
            .width(Length::Fill);

        let base: Element<Message> = column![
            header,
            scrollable(feed)
                .id(scrollable::Id::new(GALLERY_SCROLL_ID))
                .width(Length::Fill)
                .height(Length::Fill),
        ]
        .into();

        match self.session.selected_photo() {
            Some(photo) => {
                let full = self
                    .full_image
                    .as_ref()
                    .filter(|(id, _)| *id == photo.id)
                    .map(|(_, handle)| handle);

                ui::modal::detail_overlay(base, photo, full, self.thumbnails.get(&photo.id))
            }
            None => base,
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Launch one search fetch in the background
    fn fetch_page(&self, query: String, page: u32) -> Task<Message> {
        Task::perform(
            search_photos_async(self.client.clone(), query, page),
            Message::SearchLoaded,
        )
    }

    /// Launch one rendition download in the background
    fn fetch_image_task(
        &self,
        id: String,
        url: String,
        to_message: fn(ImageOutcome) -> Message,
    ) -> Task<Message> {
        Task::perform(fetch_image_async(self.client.clone(), id, url), to_message)
    }

    /// Show a transient notice and schedule its expiry
    fn show_notice(&mut self, message: String) -> Task<Message> {
        self.notice = Some(message);
        self.notice_seq += 1;

        let seq = self.notice_seq;
        Task::perform(tokio::time::sleep(NOTICE_DURATION), move |_| {
            Message::NoticeExpired(seq)
        })
    }
}

fn main() -> iced::Result {
    iced::application("Photo Search", PhotoSearch::update, PhotoSearch::view)
        .theme(PhotoSearch::theme)
        .centered()
        .run_with(PhotoSearch::new)
}

/// Fetch one page of results in the background.
/// Errors are flattened to their display text at this boundary so the
/// message stays cheap to clone.
async fn search_photos_async(client: UnsplashClient, query: String, page: u32) -> SearchOutcome {
    let result = client
        .search_photos(&query, page, DEFAULT_PER_PAGE)
        .await
        .map_err(|err| err.to_string());

    SearchOutcome {
        query,
        page,
        result,
    }
}

/// Download one rendition and wrap it in a widget handle.
/// A failed download only costs that one card its picture.
async fn fetch_image_async(client: UnsplashClient, id: String, url: String) -> ImageOutcome {
    let handle = match client.fetch_image(&url).await {
        Ok(bytes) => Some(image::Handle::from_bytes(bytes)),
        Err(err) => {
            eprintln!("⚠️  Could not download {url}: {err}");
            None
        }
    };

    ImageOutcome { id, handle }
}
