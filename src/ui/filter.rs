/// Year range slider panel
/// Two sliders (from / to) over the dataset's year domain, with a track
/// that fills the span between the selected years
use iced::widget::canvas::{self, Canvas, Path};
use iced::widget::{column, row, slider, text};
use iced::{Alignment, Color, Element, Length, Point, Rectangle, Size};

use crate::state::filter::YearFilter;
use crate::Message;

/// Selected range as normalized [0, 1] positions along the domain
#[derive(Debug, Clone, Copy)]
pub struct RangeTrack {
    pub from: f32,
    pub to: f32,
}

impl canvas::Program<Message> for RangeTrack {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let width = bounds.width;
        let height = bounds.height;

        let track = Path::rectangle(Point::ORIGIN, bounds.size());
        frame.fill(&track, Color::from_rgba(1.0, 1.0, 1.0, 0.15));

        let left = self.from.clamp(0.0, 1.0) * width;
        let right = self.to.clamp(0.0, 1.0) * width;
        if right > left {
            let fill = Path::rectangle(Point::new(left, 0.0), Size::new(right - left, height));
            frame.fill(&fill, Color::from_rgba(0.62, 0.35, 0.80, 1.0));
        }

        vec![frame.into_geometry()]
    }
}

pub fn view(filter: &YearFilter) -> Element<'_, Message> {
    let domain = filter.domain();
    let step = filter.step();
    let (from, to) = filter.fill();

    column![
        text(format!("{}–{}", filter.min(), filter.max())).size(16),
        Canvas::new(RangeTrack { from, to })
            .width(Length::Fill)
            .height(Length::Fixed(6.0)),
        row![
            text("From").size(13).width(Length::Fixed(40.0)),
            slider(domain.min..=domain.max, filter.min(), Message::MinYearChanged).step(step),
            text(domain.min.to_string()).size(12),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
        row![
            text("To").size(13).width(Length::Fixed(40.0)),
            slider(domain.min..=domain.max, filter.max(), Message::MaxYearChanged).step(step),
            text(domain.max.to_string()).size(12),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    ]
    .spacing(10)
    .padding(12)
    .into()
}
