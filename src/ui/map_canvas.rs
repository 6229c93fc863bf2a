use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Canvas, Frame, Path, Program, Stroke, Text};
use iced::{alignment, Color, Element, Length, Pixels, Point, Rectangle, Renderer, Size, Theme};

use crate::fetch::tiles::{TileCache, TileSlot, ATTRIBUTION};
use crate::map::tiles::visible_tiles;
use crate::map::viewport::MARKER_RADIUS;
use crate::map::{MapSurface, MarkerHandle, ScreenPoint, Viewport};
use crate::Message;

/// Movement below this many pixels between press and release is a click
const DRAG_THRESHOLD: f32 = 3.0;

const BACKGROUND: Color = rgb(0.93, 0.91, 0.86);
const GRID: Color = rgb(0.84, 0.81, 0.75);
const MARKER: Color = rgb(0.55, 0.27, 0.68);
const MARKER_ACTIVE: Color = rgb(0.33, 0.10, 0.45);
const ATTRIBUTION_BOX: Size = Size {
    width: 190.0,
    height: 18.0,
};

const fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color { r, g, b, a: 1.0 }
}

/// Canvas renderer for the photo map
/// Draws base map tiles and markers from the viewport, turns mouse input
/// into pan, zoom and marker-click messages
pub struct MapCanvas<'a> {
    pub viewport: &'a Viewport,
    pub tiles: &'a TileCache,
}

pub fn view<'a>(viewport: &'a Viewport, tiles: &'a TileCache) -> Element<'a, Message> {
    Canvas::new(MapCanvas { viewport, tiles })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

impl<'a> MapCanvas<'a> {
    fn marker_under(
        &self,
        viewport: &Viewport,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> Option<MarkerHandle> {
        cursor
            .position_in(bounds)
            .and_then(|pos| viewport.marker_at(ScreenPoint::new(pos.x as f64, pos.y as f64)))
    }

    fn handle_event(
        &self,
        state: &mut DragState,
        event: canvas::Event,
        viewport: &Viewport,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        match event {
            // Mouse wheel for zooming around the cursor
            canvas::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                if let Some(at) = cursor.position_in(bounds) {
                    let zoom_delta = match delta {
                        mouse::ScrollDelta::Lines { y, .. } => y * 0.5,
                        mouse::ScrollDelta::Pixels { y, .. } => y * 0.01,
                    };
                    return (
                        canvas::event::Status::Captured,
                        Some(Message::MapZoomed(zoom_delta, at)),
                    );
                }
            }

            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                // Drag math uses window coordinates, like CursorMoved
                if let (Some(_), Some(pos)) = (cursor.position_in(bounds), cursor.position()) {
                    *state = DragState {
                        pressed_at: Some(pos),
                        last_position: Some(pos),
                        dragging: false,
                    };
                    return (canvas::event::Status::Captured, None);
                }
            }

            // Release without a drag is a click: hit-test the markers
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                let was_click = state.pressed_at.is_some() && !state.dragging;
                *state = DragState::default();

                if was_click {
                    if let Some(handle) = self.marker_under(viewport, bounds, cursor) {
                        return (
                            canvas::event::Status::Captured,
                            Some(Message::MarkerClicked(handle)),
                        );
                    }
                }
                return (canvas::event::Status::Captured, None);
            }

            // Mouse move - pan if dragging
            canvas::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if let (Some(pressed_at), Some(last)) = (state.pressed_at, state.last_position) {
                    if !state.dragging && pressed_at.distance(position) > DRAG_THRESHOLD {
                        state.dragging = true;
                    }
                    if state.dragging {
                        state.last_position = Some(position);
                        return (
                            canvas::event::Status::Captured,
                            Some(Message::MapDragged(position.x - last.x, position.y - last.y)),
                        );
                    }
                }
            }

            _ => {}
        }

        (canvas::event::Status::Ignored, None)
    }
}

impl<'a> Program<Message> for MapCanvas<'a> {
    type State = DragState;

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let size = bounds.size();
        let viewport = self.viewport.fitted(size.width as f64, size.height as f64);

        let mut frame = Frame::new(renderer, size);
        frame.fill_rectangle(Point::ORIGIN, size, BACKGROUND);

        draw_tiles(&mut frame, &viewport, self.tiles);

        for (_, marker) in viewport.markers() {
            let at = viewport.project(marker.position);
            let center = Point::new(at.x as f32, at.y as f32);
            let circle = Path::circle(center, MARKER_RADIUS as f32);

            let fill = if marker.icon.active { MARKER_ACTIVE } else { MARKER };
            frame.fill(&circle, fill);
            frame.stroke(
                &circle,
                Stroke::default().with_color(Color::WHITE).with_width(2.0),
            );

            if let Some(count) = marker.icon.count {
                frame.fill_text(Text {
                    content: count.to_string(),
                    position: center,
                    color: Color::WHITE,
                    size: Pixels(13.0),
                    horizontal_alignment: alignment::Horizontal::Center,
                    vertical_alignment: alignment::Vertical::Center,
                    ..Text::default()
                });
            }
        }

        draw_attribution(&mut frame, size);

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        let size = bounds.size();
        let viewport = self.viewport.fitted(size.width as f64, size.height as f64);

        let (status, message) = self.handle_event(state, event, &viewport, bounds, cursor);

        // The stored size catches up on the first event that has nothing else to say
        match message {
            None if (size.width as f64, size.height as f64) != self.viewport.size() => {
                (status, Some(Message::MapResized(size)))
            }
            message => (status, message),
        }
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if state.dragging {
            return mouse::Interaction::Grabbing;
        }

        let size = bounds.size();
        let viewport = self.viewport.fitted(size.width as f64, size.height as f64);
        match self.marker_under(&viewport, bounds, cursor) {
            Some(_) => mouse::Interaction::Pointer,
            None => mouse::Interaction::Grab,
        }
    }
}

/// Base map tiles; tiles still loading (or failed) show as outlined squares
fn draw_tiles(frame: &mut Frame, viewport: &Viewport, tiles: &TileCache) {
    let outline = || Stroke::default().with_color(GRID).with_width(1.0);

    for tile in visible_tiles(viewport) {
        // Snap outward to whole pixels so neighbours leave no seams
        let x = tile.x.floor();
        let y = tile.y.floor();
        let rect = Rectangle {
            x: x as f32,
            y: y as f32,
            width: ((tile.x + tile.size).ceil() - x) as f32,
            height: ((tile.y + tile.size).ceil() - y) as f32,
        };

        match tiles.get(tile.coords) {
            Some(TileSlot::Ready(handle)) => frame.draw_image(rect, handle),
            _ => {
                let square = Path::rectangle(Point::new(rect.x, rect.y), rect.size());
                frame.stroke(&square, outline());
            }
        }
    }
}

fn draw_attribution(frame: &mut Frame, size: Size) {
    let top_left = Point::new(
        size.width - ATTRIBUTION_BOX.width,
        size.height - ATTRIBUTION_BOX.height,
    );
    frame.fill_rectangle(top_left, ATTRIBUTION_BOX, Color { a: 0.75, ..Color::WHITE });
    frame.fill_text(Text {
        content: ATTRIBUTION.to_string(),
        position: Point::new(size.width - 6.0, size.height - ATTRIBUTION_BOX.height / 2.0),
        color: rgb(0.2, 0.2, 0.2),
        size: Pixels(12.0),
        horizontal_alignment: alignment::Horizontal::Right,
        vertical_alignment: alignment::Vertical::Center,
        ..Text::default()
    });
}

/// State for drag interactions
#[derive(Debug, Clone, Default)]
pub struct DragState {
    pub pressed_at: Option<Point>,
    pub last_position: Option<Point>,
    pub dragging: bool,
}
