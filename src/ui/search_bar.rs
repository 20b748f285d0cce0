use iced::widget::{button, column, row, text, text_input};
use iced::{Alignment, Element, Length};

use crate::Message;

/// Widget ID of the query input, used to focus it on startup
pub const INPUT_ID: &str = "search-input";

/// The header: title, query input with submit button, and the transient
/// validation notice when one is showing.
pub fn search_bar<'a>(input: &'a str, notice: Option<&'a str>) -> Element<'a, Message> {
    let field = text_input("Search images and photos", input)
        .id(text_input::Id::new(INPUT_ID))
        .on_input(Message::InputChanged)
        .on_submit(Message::SearchSubmitted)
        .padding(10)
        .width(Length::Fixed(420.0));

    let controls = row![
        field,
        button(text("Search"))
            .on_press(Message::SearchSubmitted)
            .padding(10),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let mut header = column![text("Photo Search").size(36), controls]
        .spacing(16)
        .padding(24)
        .align_x(Alignment::Center)
        .width(Length::Fill);

    if let Some(notice) = notice {
        header = header.push(text(notice).size(14).style(text::danger));
    }

    header.into()
}
