/// Side panel state
///
/// The panel's open flag and its content are independent: toggling never
/// touches content, and filling content opens the panel.
use super::data::{Photo, PhotoId};
use crate::map::LatLng;

/// Heading used when the reference photo has no folder
pub const FALLBACK_HEADING: &str = "Historical Photos";

/// One row of the location list
#[derive(Debug, Clone, PartialEq)]
pub struct PanelEntry {
    pub id: PhotoId,
    pub title: String,
    pub thumbnail_url: String,
    /// Free-text date, or the resolved year
    pub date_label: String,
    pub description: String,
}

impl From<&Photo> for PanelEntry {
    fn from(photo: &Photo) -> Self {
        PanelEntry {
            id: photo.id.clone(),
            title: photo.title.clone(),
            thumbnail_url: photo.thumbnail_url.clone(),
            date_label: photo.date_label(),
            description: photo.description.clone(),
        }
    }
}

/// Photos at one location, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct LocationView {
    pub heading: String,
    /// Photo the location was opened for
    pub reference: PhotoId,
    /// Where that photo is; the marker to highlight is found from here
    pub position: LatLng,
    pub entries: Vec<PanelEntry>,
}

impl LocationView {
    /// Build the view for `reference` and its (already ordered) cluster
    pub fn new(reference: &Photo, cluster: &[&Photo]) -> Self {
        LocationView {
            heading: reference
                .folder
                .clone()
                .unwrap_or_else(|| FALLBACK_HEADING.to_string()),
            reference: reference.id.clone(),
            position: reference.position,
            entries: cluster.iter().map(|photo| PanelEntry::from(*photo)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelContent {
    /// Nothing rendered yet
    #[default]
    Empty,
    Welcome,
    About,
    Location(LocationView),
}

#[derive(Debug, Clone, Default)]
pub struct SidePanel {
    open: bool,
    content: PanelContent,
}

impl SidePanel {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn content(&self) -> &PanelContent {
        &self.content
    }

    /// Location currently listed, if any
    pub fn location(&self) -> Option<&LocationView> {
        match &self.content {
            PanelContent::Location(view) => Some(view),
            _ => None,
        }
    }

    /// Flip open/closed; opening an empty panel shows the welcome text
    pub fn toggle(&mut self) {
        self.open = !self.open;
        if self.open && self.content == PanelContent::Empty {
            self.content = PanelContent::Welcome;
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn show_about(&mut self) {
        self.content = PanelContent::About;
        self.open = true;
    }

    /// Replace content with a location list and make sure the panel is open
    pub fn show_location(&mut self, view: LocationView) {
        self.content = PanelContent::Location(view);
        self.open = true;
    }
}
