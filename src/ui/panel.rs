/// Side panel rendering
use iced::widget::{button, column, container, horizontal_space, row, scrollable, text, Image};
use iced::{Alignment, Element, Length};

use crate::fetch::photo::{ImageCache, ImageSlot};
use crate::state::app::PANEL_WIDTH;
use crate::state::panel::{LocationView, PanelContent, PanelEntry, SidePanel};
use crate::Message;

const THUMBNAIL_BOX: f32 = 120.0;

const WELCOME: [&str; 2] = [
    "Click on any purple marker on the map to view historical photos at that location.",
    "Or click the \"About\" link to learn more about this project.",
];

const ABOUT: [(&str, &str); 4] = [
    (
        "About OldSTL",
        "OldSTL is an interactive map of historical photographs of St. Louis, Missouri. \
         Each vintage image is placed where it was taken. The project is inspired by OldSF.org, \
         which does the same for San Francisco.",
    ),
    (
        "How to Use",
        "Drag and scroll to explore the map. Click the year range to open the slider and \
         narrow the photos to a period. Click a marker to list every photo at that location \
         here, and click a photo to see it full size.",
    ),
    (
        "Technology",
        "Built in Rust with iced. Map coordinates use the Web Mercator projection of \
         OpenStreetMap tiles.",
    ),
    (
        "Credits",
        "Placeholder images provided by Unsplash. Replace them with historical St. Louis \
         photos for production use.",
    ),
];

pub fn view<'a>(panel: &'a SidePanel, images: &'a ImageCache) -> Element<'a, Message> {
    let body: Element<'a, Message> = match panel.content() {
        PanelContent::Empty => column![].into(),
        PanelContent::Welcome => welcome(),
        PanelContent::About => about(),
        PanelContent::Location(view) => location(view, images),
    };

    let close = row![
        horizontal_space(),
        button(text("✕").size(16))
            .on_press(Message::ClosePanel)
            .style(button::text),
    ];

    container(column![close, scrollable(body).height(Length::Fill)].spacing(8))
        .width(Length::Fixed(PANEL_WIDTH as f32))
        .height(Length::Fill)
        .padding(12)
        .style(container::rounded_box)
        .into()
}

fn welcome<'a>() -> Element<'a, Message> {
    let mut content = column![text("Welcome to OldSTL").size(22)].spacing(10);
    for line in WELCOME {
        content = content.push(text(line).size(14));
    }
    content.into()
}

fn about<'a>() -> Element<'a, Message> {
    let mut content = column![].spacing(10);
    for (heading, body) in ABOUT {
        content = content.push(text(heading).size(20)).push(text(body).size(14));
    }
    content.into()
}

fn location<'a>(view: &'a LocationView, images: &'a ImageCache) -> Element<'a, Message> {
    let mut list = column![text(&view.heading).size(20)].spacing(12);
    for entry in &view.entries {
        list = list.push(entry_row(entry, images));
    }
    list.into()
}

fn entry_row<'a>(entry: &'a PanelEntry, images: &'a ImageCache) -> Element<'a, Message> {
    let thumbnail: Element<'a, Message> = match images.get(&entry.thumbnail_url) {
        Some(ImageSlot::Ready(handle)) => Image::new(handle.clone())
            .width(Length::Fixed(THUMBNAIL_BOX))
            .into(),
        Some(ImageSlot::Failed) => placeholder("No image"),
        _ => placeholder("Loading…"),
    };

    let info = column![
        text(&entry.title).size(15),
        text(&entry.date_label).size(13),
        text(&entry.description).size(13),
    ]
    .spacing(4);

    button(row![thumbnail, info].spacing(10).align_y(Alignment::Start))
        .on_press(Message::OpenModal(entry.id.clone()))
        .style(button::text)
        .width(Length::Fill)
        .into()
}

fn placeholder<'a>(label: &'a str) -> Element<'a, Message> {
    container(text(label).size(12))
        .width(Length::Fixed(THUMBNAIL_BOX))
        .height(Length::Fixed(THUMBNAIL_BOX * 0.75))
        .center_x(Length::Fixed(THUMBNAIL_BOX))
        .center_y(Length::Fixed(THUMBNAIL_BOX * 0.75))
        .style(container::bordered_box)
        .into()
}
