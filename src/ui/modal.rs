use iced::widget::{center, column, container, image, mouse_area, opaque, stack, text};
use iced::{Color, Element, Length, Theme};

use crate::state::data::Photo;
use crate::Message;

/// Width of the full-size rendition inside the overlay
const PICTURE_WIDTH: f32 = 720.0;

/// The detail overlay, stacked over the gallery.
///
/// Shows the full-size rendition once its bytes have arrived and falls
/// back to the already-downloaded grid thumbnail until then. Everything
/// else comes straight from the photo record; clicking the dimmed
/// backdrop dismisses the overlay.
pub fn detail_overlay<'a>(
    base: Element<'a, Message>,
    photo: &'a Photo,
    full_image: Option<&image::Handle>,
    thumbnail: Option<&image::Handle>,
) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match full_image.or(thumbnail) {
        Some(handle) => image(handle.clone()).width(Length::Fixed(PICTURE_WIDTH)).into(),
        None => container(text("Loading image...").size(14))
            .center_x(Length::Fixed(PICTURE_WIDTH))
            .center_y(Length::Fixed(405.0))
            .into(),
    };

    let mut details = column![
        text(photo.label()).size(24),
        picture,
        text(format!("Likes: {}", photo.likes)).size(14),
    ]
    .spacing(12);

    if let Some(description) = photo.description.as_deref() {
        details = details.push(text(description).size(14));
    }

    details = details.push(text(format!("Author name: {}", photo.user.name)).size(14));

    if let Some(location) = photo.user.location.as_deref() {
        details = details.push(text(format!("location: {location}")).size(14));
    }

    details = details.push(
        text(format!("total author photos: {}", photo.user.total_photos)).size(14),
    );

    if let Some(portfolio) = photo.user.portfolio_url.as_deref() {
        details = details.push(text(portfolio).size(14).style(text::primary));
    }

    let card = container(details)
        .padding(24)
        .max_width(780)
        .style(container::rounded_box);

    stack![
        base,
        opaque(
            mouse_area(center(opaque(card)).style(backdrop))
                .on_press(Message::OverlayDismissed)
        )
    ]
    .into()
}

/// Dims the gallery behind the overlay
fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(
            Color {
                a: 0.8,
                ..Color::BLACK
            }
            .into(),
        ),
        ..container::Style::default()
    }
}
