/// Marker layer controller
///
/// One marker per location in the visible (filtered) set. The first photo
/// at a location, in input order, is the location's representative and
/// gives the marker its position. At most one marker is active.
use crate::map::{LatLng, MapSurface, MarkerHandle, MarkerIcon};

use super::cluster::{cluster_at, same_location};
use super::data::Photo;

/// A marker placed for one location
#[derive(Debug, Clone, PartialEq)]
pub struct LocationMarker {
    pub handle: MarkerHandle,
    pub position: LatLng,
    /// Representative photo. Held by value: ids may repeat in a dataset,
    /// so looking it up again could land on another record.
    pub photo: Photo,
    /// Photos at this location within the rendered set
    pub count: usize,
}

#[derive(Debug, Default)]
pub struct MarkerLayer {
    markers: Vec<LocationMarker>,
    active: Option<MarkerHandle>,
}

impl MarkerLayer {
    /// Replace every marker with markers for `photos`.
    /// Clears the active marker.
    pub fn render<M: MapSurface>(&mut self, map: &mut M, photos: &[&Photo]) {
        for marker in self.markers.drain(..) {
            map.remove_marker(marker.handle);
        }
        self.active = None;

        for photo in photos {
            if self
                .markers
                .iter()
                .any(|marker| same_location(marker.position, photo.position))
            {
                continue;
            }

            let count = cluster_at(photo.position, photos.iter().copied()).len();
            let handle = map.add_marker(photo.position, MarkerIcon::INACTIVE);
            self.markers.push(LocationMarker {
                handle,
                position: photo.position,
                photo: (*photo).clone(),
                count,
            });
        }
    }

    pub fn markers(&self) -> &[LocationMarker] {
        &self.markers
    }

    pub fn get(&self, handle: MarkerHandle) -> Option<&LocationMarker> {
        self.markers.iter().find(|marker| marker.handle == handle)
    }

    pub fn active(&self) -> Option<&LocationMarker> {
        self.active.and_then(|handle| self.get(handle))
    }

    /// First marker whose position is at the same location as `at`
    pub fn marker_at(&self, at: LatLng) -> Option<&LocationMarker> {
        self.markers
            .iter()
            .find(|marker| same_location(marker.position, at))
    }

    /// Make `handle` the only active marker, showing its count badge.
    /// Unknown handles leave everything as it was.
    pub fn activate<M: MapSurface>(&mut self, map: &mut M, handle: MarkerHandle) -> bool {
        let Some(count) = self.get(handle).map(|marker| marker.count) else {
            return false;
        };

        if let Some(previous) = self.active.filter(|&previous| previous != handle) {
            map.set_icon(previous, MarkerIcon::INACTIVE);
        }
        map.set_icon(handle, MarkerIcon::active(count));
        self.active = Some(handle);
        true
    }

    /// Activate the marker at `at`; with no marker there, clear the active one
    pub fn activate_at<M: MapSurface>(&mut self, map: &mut M, at: LatLng) -> bool {
        match self.marker_at(at).map(|marker| marker.handle) {
            Some(handle) => self.activate(map, handle),
            None => {
                self.deactivate(map);
                false
            }
        }
    }

    pub fn deactivate<M: MapSurface>(&mut self, map: &mut M) {
        if let Some(previous) = self.active.take() {
            map.set_icon(previous, MarkerIcon::INACTIVE);
        }
    }
}
