/// Application state
///
/// `AppState` is the single owner of everything the viewer knows: the
/// dataset, the year filter, markers, side panel, modal and the map
/// surface. Each user action has exactly one entry point here and runs to
/// completion synchronously.
use log::{debug, error, info, warn};
use serde_json::Value;

use crate::error::LoadError;
use crate::map::{LatLng, MapSurface, MarkerHandle};

use super::cluster::cluster_for;
use super::data::{Photo, PhotoId};
use super::filter::YearFilter;
use super::library::PhotoLibrary;
use super::markers::MarkerLayer;
use super::modal::{ClickTarget, ModalState, ModalViewer};
use super::panel::{LocationView, SidePanel};

/// Side panel width in pixels
pub const PANEL_WIDTH: f64 = 400.0;

/// Replaces the photo count when the dataset cannot be loaded
pub const LOAD_ERROR_TEXT: &str = "Error loading photos. Please refresh the page.";

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Ready,
    /// Terminal for the session
    Failed(LoadError),
}

pub struct AppState<M: MapSurface> {
    map: M,
    library: PhotoLibrary,
    filter: YearFilter,
    markers: MarkerLayer,
    panel: SidePanel,
    modal: ModalViewer,
    slider_open: bool,
    status: LoadStatus,
    visible_count: usize,
}

impl<M: MapSurface> AppState<M> {
    pub fn new(map: M) -> Self {
        Self {
            map,
            library: PhotoLibrary::default(),
            filter: YearFilter::default(),
            markers: MarkerLayer::default(),
            panel: SidePanel::default(),
            modal: ModalViewer::default(),
            slider_open: false,
            status: LoadStatus::Loading,
            visible_count: 0,
        }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    /// Direct camera control (drag, zoom, animation frames)
    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn library(&self) -> &PhotoLibrary {
        &self.library
    }

    pub fn filter(&self) -> &YearFilter {
        &self.filter
    }

    pub fn markers(&self) -> &MarkerLayer {
        &self.markers
    }

    pub fn panel(&self) -> &SidePanel {
        &self.panel
    }

    pub fn modal(&self) -> &ModalViewer {
        &self.modal
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn slider_open(&self) -> bool {
        self.slider_open
    }

    /// Year range header, arrow reflecting the slider panel
    pub fn year_label(&self) -> String {
        self.filter.label(self.slider_open)
    }

    pub fn photo_count_text(&self) -> String {
        match &self.status {
            LoadStatus::Loading => "Loading historical photos...".to_string(),
            LoadStatus::Failed(_) => LOAD_ERROR_TEXT.to_string(),
            LoadStatus::Ready => {
                let n = self.visible_count;
                format!("Showing {} historical photo{}", n, if n == 1 { "" } else { "s" })
            }
        }
    }

    /// Photo shown by the modal viewer
    pub fn modal_photo(&self) -> Option<&Photo> {
        match self.modal.state() {
            ModalState::Open(id) => self.library.find(id).ok(),
            ModalState::Closed => None,
        }
    }

    /// Dataset arrived: derive the year domain, show every photo and open
    /// the panel for the first record
    pub fn load(&mut self, records: Vec<Value>) {
        self.library = PhotoLibrary::from_records(&records);
        if self.library.is_empty() {
            warn!("⚠️  Dataset is empty, nothing to show");
        }

        if let Some(domain) = self.library.year_domain() {
            self.filter = YearFilter::new(domain);
            info!(
                "📅 Years {}–{} (slider step {})",
                domain.min,
                domain.max,
                domain.step()
            );
        }

        self.status = LoadStatus::Ready;
        self.render_markers();
        info!(
            "📍 {} markers for {} photos",
            self.markers.markers().len(),
            self.library.len()
        );

        if let Some(first) = self.library.first().map(|photo| photo.id.clone()) {
            self.open_panel_for_photo(&first);
        }
    }

    /// Dataset could not be fetched or parsed; nothing else is initialized
    pub fn load_failed(&mut self, err: LoadError) {
        error!("❌ Error loading locations: {}", err);
        self.status = LoadStatus::Failed(err);
    }

    /// Slider moved. Either handle may cross the other.
    pub fn set_year_range(&mut self, a: i32, b: i32) {
        self.filter.set_range(a, b);
        debug!("🔎 Year filter {}–{}", self.filter.min(), self.filter.max());
        self.render_markers();
    }

    pub fn toggle_slider_panel(&mut self) {
        self.slider_open = !self.slider_open;
    }

    /// Marker clicked: highlight it and list its location
    pub fn click_marker(&mut self, handle: MarkerHandle) {
        let Some(photo) = self.markers.get(handle).map(|marker| marker.photo.clone()) else {
            warn!("⚠️  Click on unknown marker {:?}", handle);
            return;
        };

        self.markers.activate(&mut self.map, handle);
        self.show_location(&photo);
    }

    /// List every photo at `id`'s location, regardless of the year filter.
    /// Unknown ids are logged and ignored.
    pub fn open_panel_for_photo(&mut self, id: &PhotoId) {
        match self.library.find(id) {
            Ok(photo) => {
                let photo = photo.clone();
                self.show_location(&photo);
            }
            Err(err) => warn!("⚠️  {}", err),
        }
    }

    pub fn toggle_panel(&mut self) {
        self.panel.toggle();
    }

    pub fn close_panel(&mut self) {
        self.panel.close();
    }

    pub fn show_about(&mut self) {
        self.panel.show_about();
    }

    pub fn open_modal(&mut self, id: &PhotoId) {
        self.modal.open(id, &self.library);
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    pub fn escape(&mut self) {
        self.modal.escape();
    }

    pub fn click_modal(&mut self, target: ClickTarget) {
        self.modal.click(target);
    }

    /// Fill the panel with the full-dataset cluster around `reference`,
    /// highlight its marker and pan it clear of the panel
    fn show_location(&mut self, reference: &Photo) {
        let cluster = cluster_for(reference, self.library.photos());
        debug!("📍 {} photos at the location of {}", cluster.len(), reference.id);
        let view = LocationView::new(reference, &cluster);

        self.markers.activate_at(&mut self.map, reference.position);
        self.panel.show_location(view);
        self.pan_beside_panel(reference.position);
    }

    /// Rebuild markers for the filtered set and re-highlight the marker of
    /// the location the panel is showing, if it is still visible
    fn render_markers(&mut self) {
        let visible = self.filter.apply(self.library.photos());
        self.visible_count = visible.len();
        self.markers.render(&mut self.map, &visible);

        if let Some(position) = self.panel.location().map(|view| view.position) {
            self.markers.activate_at(&mut self.map, position);
        }
    }

    /// Center the map half a panel width to the right of `at`, so the
    /// marker stays clear of the panel
    fn pan_beside_panel(&mut self, at: LatLng) {
        let mut point = self.map.project(at);
        point.x += PANEL_WIDTH / 2.0;
        let center = self.map.unproject(point);
        self.map.pan_to(center, true);
    }
}
