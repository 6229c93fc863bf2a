use log::{info, warn};
use serde_json::Value;
use std::collections::HashMap;

use super::data::{Photo, PhotoId};
use super::filter::YearDomain;
use crate::error::LookupError;

/// The PhotoLibrary holds the loaded dataset for the session.
/// Records are normalized once at load and never mutated afterwards.
#[derive(Default)]
pub struct PhotoLibrary {
    photos: Vec<Photo>,
    index: HashMap<PhotoId, usize>,
}

impl PhotoLibrary {
    /// Normalize raw records, keeping load order.
    ///
    /// When two records share an id, lookups resolve to the first one.
    pub fn from_records(records: &[Value]) -> Self {
        let photos: Vec<Photo> = records
            .iter()
            .enumerate()
            .map(|(i, record)| Photo::from_record(record, i))
            .collect();

        let mut index = HashMap::with_capacity(photos.len());
        for (i, photo) in photos.iter().enumerate() {
            if index.contains_key(&photo.id) {
                warn!("⚠️  Duplicate photo id {}, keeping the first record", photo.id);
                continue;
            }
            index.insert(photo.id.clone(), i);
        }

        info!("📷 Loaded {} historical photos", photos.len());

        PhotoLibrary { photos, index }
    }

    /// All photos in load order
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn first(&self) -> Option<&Photo> {
        self.photos.first()
    }

    /// Look up a photo in the full, unfiltered dataset
    pub fn find(&self, id: &PhotoId) -> Result<&Photo, LookupError> {
        self.index
            .get(id)
            .map(|&i| &self.photos[i])
            .ok_or_else(|| LookupError::PhotoNotFound(id.clone()))
    }

    /// Span of resolved years, `None` for an empty dataset
    pub fn year_domain(&self) -> Option<YearDomain> {
        YearDomain::from_years(self.photos.iter().map(|photo| photo.year))
    }
}

// Implement Debug without dumping every record
impl std::fmt::Debug for PhotoLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoLibrary")
            .field("photos", &self.photos.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<Value> {
        vec![
            json!({ "id": 1, "date": "1901" }),
            json!({ "id": "b", "extracted": { "date_range": ["1955-06-01"] } }),
            json!({ "title": "no id", "date": "1890" }),
            json!({ "id": 1, "date": "1999" }),
        ]
    }

    #[test]
    fn test_find_by_id() {
        let library = PhotoLibrary::from_records(&records());
        assert_eq!(library.len(), 4);
        assert_eq!(library.find(&PhotoId::Text("b".into())).map(|p| p.year), Ok(1955));
        assert_eq!(library.find(&PhotoId::Generated(2)).map(|p| p.year), Ok(1890));
    }

    #[test]
    fn test_duplicate_id_resolves_to_first() {
        let library = PhotoLibrary::from_records(&records());
        assert_eq!(library.find(&PhotoId::Number(1)).map(|p| p.year), Ok(1901));
    }

    #[test]
    fn test_generated_ids_never_shadow_real_ones() {
        let records = vec![
            json!({ "id": "photo-1", "date": "1911" }),
            json!({ "date": "1922" }),
        ];
        let library = PhotoLibrary::from_records(&records);
        assert_eq!(library.find(&PhotoId::Text("photo-1".into())).map(|p| p.year), Ok(1911));
        assert_eq!(library.find(&PhotoId::Generated(1)).map(|p| p.year), Ok(1922));
    }

    #[test]
    fn test_missing_id_is_an_error() {
        let library = PhotoLibrary::from_records(&records());
        let missing = PhotoId::Number(404);
        assert_eq!(
            library.find(&missing).map(|p| p.id.clone()),
            Err(LookupError::PhotoNotFound(missing))
        );
    }

    #[test]
    fn test_year_domain() {
        let library = PhotoLibrary::from_records(&records());
        assert_eq!(library.year_domain(), Some(YearDomain { min: 1890, max: 1999 }));
        assert_eq!(PhotoLibrary::default().year_domain(), None);
    }
}
