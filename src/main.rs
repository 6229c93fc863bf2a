use env_logger::Env;
use iced::widget::image::Handle;
use iced::widget::{button, column, container, horizontal_space, opaque, row, stack, text};
use iced::{keyboard, time};
use iced::{Alignment, Element, Length, Point, Size, Subscription, Task, Theme};
use log::info;
use serde_json::Value;
use std::time::{Duration, Instant};

mod config;
mod error;
mod fetch;
mod map;
mod state;
mod ui;

use config::Config;
use error::LoadError;
use fetch::photo::THUMBNAIL_WIDTH;
use fetch::{fetch_image, fetch_tile, load_dataset, DataSource, ImageCache, TileCache};
use map::tiles::{visible_tiles, TileCoords};
use map::{MarkerHandle, ScreenPoint, Viewport};
use state::data::PhotoId;
use state::modal::ClickTarget;
use state::AppState;

/// Main application state
struct OldStl {
    /// Everything the viewer knows, map included
    state: AppState<Viewport>,
    /// Decoded thumbnails and full-size photos
    images: ImageCache,
    /// Base map tiles
    tiles: TileCache,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Dataset fetch finished
    DatasetLoaded(Result<Vec<Value>, LoadError>),
    /// A photo download finished (url, result)
    ImageLoaded(String, Result<Handle, LoadError>),
    /// A base map tile download finished
    TileLoaded(TileCoords, Result<Handle, LoadError>),
    MinYearChanged(i32),
    MaxYearChanged(i32),
    ToggleSliderPanel,
    MarkerClicked(MarkerHandle),
    /// Map dragged by a pixel delta
    MapDragged(f32, f32),
    /// Wheel zoom around a canvas point
    MapZoomed(f32, Point),
    MapResized(Size),
    /// Animation frame while the map pans
    Tick(Instant),
    TogglePanel,
    ClosePanel,
    ShowAbout,
    OpenModal(PhotoId),
    CloseModal,
    ModalBackdropClicked,
    EscapePressed,
}

impl OldStl {
    /// Create the application and start the dataset fetch
    fn new(config: Config) -> (Self, Task<Message>) {
        info!("🗺️  OldSTL starting, dataset at {}", config.data_source);

        let viewport = Viewport::new(config.center, config.zoom);
        let source = DataSource::parse(&config.data_source);

        let mut app = OldStl {
            state: AppState::new(viewport),
            images: ImageCache::default(),
            tiles: TileCache::new(config.tile_url),
        };
        let tiles = app.fetch_tiles();

        (
            app,
            Task::batch([
                Task::perform(load_dataset(source), Message::DatasetLoaded),
                tiles,
            ]),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::DatasetLoaded(Ok(records)) => {
                self.state.load(records);
                return self.fetch_thumbnails();
            }
            Message::DatasetLoaded(Err(err)) => {
                self.state.load_failed(err);
            }
            Message::ImageLoaded(url, result) => {
                self.images.finish(url, result);
            }
            Message::TileLoaded(coords, result) => {
                self.tiles.finish(coords, result);
            }
            Message::MinYearChanged(year) => {
                let max = self.state.filter().max();
                self.state.set_year_range(year, max);
            }
            Message::MaxYearChanged(year) => {
                let min = self.state.filter().min();
                self.state.set_year_range(min, year);
            }
            Message::ToggleSliderPanel => {
                self.state.toggle_slider_panel();
            }
            Message::MarkerClicked(handle) => {
                self.state.click_marker(handle);
                return self.fetch_thumbnails();
            }
            Message::MapDragged(dx, dy) => {
                self.state.map_mut().pan_by(dx as f64, dy as f64);
                return self.fetch_tiles();
            }
            Message::MapZoomed(delta, at) => {
                let anchor = ScreenPoint::new(at.x as f64, at.y as f64);
                self.state.map_mut().zoom_by(delta as f64, anchor);
                return self.fetch_tiles();
            }
            Message::MapResized(size) => {
                self.state
                    .map_mut()
                    .set_size(size.width as f64, size.height as f64);
                return self.fetch_tiles();
            }
            Message::Tick(now) => {
                self.state.map_mut().tick(now);
                return self.fetch_tiles();
            }
            Message::TogglePanel => {
                self.state.toggle_panel();
            }
            Message::ClosePanel => {
                self.state.close_panel();
            }
            Message::ShowAbout => {
                self.state.show_about();
            }
            Message::OpenModal(id) => {
                self.state.open_modal(&id);
                return self.fetch_modal_photo();
            }
            Message::CloseModal => {
                self.state.close_modal();
            }
            Message::ModalBackdropClicked => {
                self.state.click_modal(ClickTarget::Backdrop);
            }
            Message::EscapePressed => {
                self.state.escape();
            }
        }

        Task::none()
    }

    /// Start downloads for thumbnails the panel lists but we do not have yet
    fn fetch_thumbnails(&mut self) -> Task<Message> {
        let Some(view) = self.state.panel().location() else {
            return Task::none();
        };

        let library = self.state.library();
        let wanted: Vec<(String, Option<u32>)> = view
            .entries
            .iter()
            .filter(|entry| self.images.request(&entry.thumbnail_url))
            .map(|entry| {
                // Scale locally only when the server has no smaller rendition
                let scaled = library
                    .find(&entry.id)
                    .map(|photo| photo.has_server_thumbnail())
                    .unwrap_or(false);
                let max_width = if scaled { None } else { Some(THUMBNAIL_WIDTH) };
                (entry.thumbnail_url.clone(), max_width)
            })
            .collect();

        Task::batch(
            wanted
                .into_iter()
                .map(|(url, max_width)| fetch_photo(url, max_width)),
        )
    }

    /// Start downloads for visible base map tiles not yet in the cache
    fn fetch_tiles(&mut self) -> Task<Message> {
        let wanted: Vec<(TileCoords, String)> = visible_tiles(self.state.map())
            .into_iter()
            .filter_map(|tile| self.tiles.request(tile.coords).map(|url| (tile.coords, url)))
            .collect();

        let client = self.tiles.client();
        Task::batch(wanted.into_iter().map(|(coords, url)| {
            Task::perform(fetch_tile(client.clone(), url), move |result| {
                Message::TileLoaded(coords, result)
            })
        }))
    }

    fn fetch_modal_photo(&mut self) -> Task<Message> {
        let Some(url) = self
            .state
            .modal_photo()
            .map(|photo| photo.full_image_url.clone())
        else {
            return Task::none();
        };

        if self.images.request(&url) {
            fetch_photo(url, None)
        } else {
            Task::none()
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let panel_arrow = if self.state.panel().is_open() { "►" } else { "◄" };

        let header = row![
            text("OldSTL").size(24),
            text(self.state.photo_count_text()).size(14),
            horizontal_space(),
            button(text(self.state.year_label()).size(14)).on_press(Message::ToggleSliderPanel),
            button(text("About").size(14))
                .on_press(Message::ShowAbout)
                .style(button::text),
            button(text(panel_arrow).size(14)).on_press(Message::TogglePanel),
        ]
        .spacing(16)
        .padding(10)
        .align_y(Alignment::Center);

        // The panel floats over the right edge of the map
        let mut body = stack![ui::map_canvas::view(self.state.map(), &self.tiles)]
            .width(Length::Fill)
            .height(Length::Fill);
        if self.state.panel().is_open() {
            body = body.push(
                row![
                    horizontal_space(),
                    opaque(ui::panel::view(self.state.panel(), &self.images)),
                ]
                .height(Length::Fill),
            );
        }

        let mut page = column![header];
        if self.state.slider_open() {
            page = page.push(ui::filter::view(self.state.filter()));
        }
        page = page.push(body);

        let base = container(page)
            .width(Length::Fill)
            .height(Length::Fill);

        match self.state.modal_photo() {
            Some(photo) => ui::modal::view(base, photo, &self.images),
            None => base.into(),
        }
    }

    /// Escape closes the viewer; frames drive the pan animation
    fn subscription(&self) -> Subscription<Message> {
        let keys = keyboard::on_key_press(|key, _modifiers| match key {
            keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::EscapePressed),
            _ => None,
        });

        if self.state.map().is_animating() {
            Subscription::batch([
                keys,
                time::every(Duration::from_millis(16)).map(|_| Message::Tick(Instant::now())),
            ])
        } else {
            keys
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Download one photo as a task
fn fetch_photo(url: String, max_width: Option<u32>) -> Task<Message> {
    let key = url.clone();
    Task::perform(fetch_image(url, max_width), move |result| {
        Message::ImageLoaded(key.clone(), result)
    })
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env();

    iced::application("OldSTL", OldStl::update, OldStl::view)
        .subscription(OldStl::subscription)
        .theme(OldStl::theme)
        .centered()
        .run_with(move || OldStl::new(config))
}
