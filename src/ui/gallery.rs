use std::collections::HashMap;

use iced::widget::{button, container, image, mouse_area, text, Space};
use iced::{ContentFit, Element, Length};
use iced_aw::Wrap;

use crate::state::data::Photo;
use crate::state::search::SearchSession;
use crate::Message;

/// Card dimensions in the grid
const CARD_WIDTH: f32 = 240.0;
const CARD_HEIGHT: f32 = 180.0;

/// The responsive thumbnail grid: one card per photo, wrapping to the
/// window width. Cards whose thumbnail bytes have not arrived yet show
/// a text placeholder in the same footprint.
pub fn image_grid<'a>(
    photos: &'a [Photo],
    thumbnails: &HashMap<String, image::Handle>,
) -> Element<'a, Message> {
    let cards: Vec<Element<'a, Message>> = photos
        .iter()
        .map(|photo| card(photo, thumbnails.get(&photo.id)))
        .collect();

    Wrap::with_elements(cards)
        .spacing(12.0)
        .line_spacing(12.0)
        .into()
}

fn card<'a>(photo: &'a Photo, thumbnail: Option<&image::Handle>) -> Element<'a, Message> {
    let content: Element<'a, Message> = match thumbnail {
        Some(handle) => image(handle.clone())
            .width(Length::Fixed(CARD_WIDTH))
            .height(Length::Fixed(CARD_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text(photo.label()).size(13))
            .padding(8)
            .center_x(Length::Fixed(CARD_WIDTH))
            .center_y(Length::Fixed(CARD_HEIGHT))
            .style(container::bordered_box)
            .into(),
    };

    mouse_area(content)
        .on_press(Message::PhotoSelected(photo.id.clone()))
        .into()
}

/// The area below the grid. Exactly one of: loading text while a fetch
/// is in flight, the persistent error banner after a failed fetch, or
/// the "load more" button while further pages exist.
pub fn gallery_footer<'a>(session: &'a SearchSession) -> Element<'a, Message> {
    if session.is_loading() {
        let label = if session.photos().is_empty() {
            "Loading photos..."
        } else {
            "Loading more photos..."
        };
        return text(label).size(16).into();
    }

    if let Some(message) = session.error() {
        return container(text(message).style(text::danger))
            .padding(12)
            .style(container::bordered_box)
            .into();
    }

    if session.has_more() {
        return button(text("Load more ..."))
            .on_press(Message::LoadMoreRequested)
            .padding(10)
            .into();
    }

    Space::with_height(Length::Shrink).into()
}
