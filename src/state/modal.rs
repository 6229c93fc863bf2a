/// Full-size photo viewer
///
/// Closed -> open(id) -> Open(id) -> close / Escape / backdrop click -> Closed
use log::debug;

use super::data::PhotoId;
use super::library::PhotoLibrary;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open(PhotoId),
}

/// Where a click inside the modal layer landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Dimmed area around the photo
    Backdrop,
    /// The photo, its caption or the close button
    Content,
}

#[derive(Debug, Clone, Default)]
pub struct ModalViewer {
    state: ModalState,
}

impl ModalViewer {
    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    /// Show a photo. Unknown ids leave the viewer as it was.
    pub fn open(&mut self, id: &PhotoId, library: &PhotoLibrary) -> bool {
        match library.find(id) {
            Ok(photo) => {
                self.state = ModalState::Open(photo.id.clone());
                true
            }
            Err(err) => {
                debug!("🖼️  Modal not opened: {}", err);
                false
            }
        }
    }

    pub fn close(&mut self) {
        self.state = ModalState::Closed;
    }

    /// Escape only acts on an open viewer
    pub fn escape(&mut self) -> bool {
        if self.is_open() {
            self.close();
            return true;
        }
        false
    }

    /// Close on backdrop clicks; clicks on the content do nothing
    pub fn click(&mut self, target: ClickTarget) -> bool {
        if target == ClickTarget::Backdrop && self.is_open() {
            self.close();
            return true;
        }
        false
    }
}
