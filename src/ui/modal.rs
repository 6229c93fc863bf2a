/// Full-size photo overlay
///
/// The photo card is wrapped in `opaque`, so only clicks on the dimmed
/// backdrop reach the outer `mouse_area`.
use iced::widget::{
    button, center, column, container, horizontal_space, mouse_area, opaque, row, stack, text,
    Image,
};
use iced::{Color, Element, Length};

use crate::fetch::photo::{ImageCache, ImageSlot};
use crate::state::data::Photo;
use crate::Message;

pub fn view<'a>(
    base: impl Into<Element<'a, Message>>,
    photo: &'a Photo,
    images: &'a ImageCache,
) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match images.get(&photo.full_image_url) {
        Some(ImageSlot::Ready(handle)) => Image::new(handle.clone()).width(Length::Fill).into(),
        Some(ImageSlot::Failed) => text("Image unavailable").size(14).into(),
        _ => text("Loading…").size(14).into(),
    };

    let card = container(
        column![
            row![
                horizontal_space(),
                button(text("×").size(22))
                    .on_press(Message::CloseModal)
                    .style(button::text),
            ],
            picture,
            text(&photo.title).size(22),
            text(&photo.description).size(14),
            text(format!("Year: {}", photo.date_label())).size(14),
        ]
        .spacing(10),
    )
    .max_width(960.0)
    .padding(20)
    .style(container::rounded_box);

    let backdrop = center(opaque(card)).style(|_theme| container::Style {
        background: Some(
            Color {
                a: 0.8,
                ..Color::BLACK
            }
            .into(),
        ),
        ..container::Style::default()
    });

    stack![
        base.into(),
        opaque(mouse_area(backdrop).on_press(Message::ModalBackdropClicked))
    ]
    .into()
}
