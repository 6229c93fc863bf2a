/// Location clustering
///
/// Two photos share a location when both their latitude and longitude
/// differ by strictly less than `TOLERANCE_DEGREES`. The test is per axis,
/// not a distance, and it is pairwise: clusters are always computed
/// relative to one reference photo, so a chain of points each within
/// tolerance of its neighbour does not merge into one group.
use crate::map::LatLng;

use super::data::Photo;

/// Coordinate proximity threshold (~100 m)
pub const TOLERANCE_DEGREES: f64 = 0.001;

/// Symmetric same-location test
pub fn same_location(a: LatLng, b: LatLng) -> bool {
    (a.lat - b.lat).abs() < TOLERANCE_DEGREES && (a.lng - b.lng).abs() < TOLERANCE_DEGREES
}

/// All photos at the reference photo's location (the reference included
/// when it is part of `photos`), oldest first. Ties keep input order.
pub fn cluster_for<'a, I>(reference: &Photo, photos: I) -> Vec<&'a Photo>
where
    I: IntoIterator<Item = &'a Photo>,
{
    cluster_at(reference.position, photos)
}

/// Same as `cluster_for`, relative to a bare coordinate
pub fn cluster_at<'a, I>(at: LatLng, photos: I) -> Vec<&'a Photo>
where
    I: IntoIterator<Item = &'a Photo>,
{
    let mut cluster: Vec<&Photo> = photos
        .into_iter()
        .filter(|photo| same_location(photo.position, at))
        .collect();

    // Stable sort
    cluster.sort_by_key(|photo| photo.year);
    cluster
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::PhotoId;

    fn photo(id: i64, year: i32, lat: f64, lng: f64) -> Photo {
        Photo {
            id: PhotoId::Number(id),
            title: format!("photo {}", id),
            year,
            position: LatLng::new(lat, lng),
            thumbnail_url: String::new(),
            full_image_url: String::new(),
            description: String::new(),
            date: None,
            folder: None,
        }
    }

    fn ids(cluster: &[&Photo]) -> Vec<i64> {
        cluster
            .iter()
            .map(|p| match p.id {
                PhotoId::Number(n) => n,
                _ => unreachable!(),
            })
            .collect()
    }

    #[test]
    fn test_co_located_photos_sorted_by_year() {
        let photos = vec![
            photo(1, 2000, 38.62, -90.20),
            photo(2, 1900, 38.62, -90.20),
            photo(3, 1975, 38.70, -90.10),
            photo(4, 1950, 38.62, -90.20),
        ];

        let cluster = cluster_for(&photos[1], &photos);
        assert_eq!(ids(&cluster), vec![2, 4, 1]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let photos = vec![
            photo(10, 1920, 1.0, 1.0),
            photo(11, 1910, 1.0, 1.0),
            photo(12, 1920, 1.0, 1.0),
        ];
        assert_eq!(ids(&cluster_for(&photos[0], &photos)), vec![11, 10, 12]);
    }

    #[test]
    fn test_tolerance_is_strict_and_per_axis() {
        let origin = LatLng::new(10.0, 10.0);
        assert!(same_location(origin, LatLng::new(10.0009, 9.9991)));
        assert!(!same_location(origin, LatLng::new(10.0, 10.0015)));
        assert!(!same_location(origin, LatLng::new(9.998, 10.0)));

        // Within tolerance on each axis even though the diagonal is longer
        assert!(same_location(origin, LatLng::new(10.00095, 10.00095)));
    }

    #[test]
    fn test_membership_is_symmetric() {
        let photos = vec![
            photo(1, 1900, 0.0, 0.0),
            photo(2, 1900, 0.0007, 0.0),
            photo(3, 1900, 0.0014, 0.0),
            photo(4, 1900, 0.0, 0.0009),
            photo(5, 1900, 5.0, 5.0),
        ];

        for a in &photos {
            for b in &photos {
                let b_in_a = cluster_for(a, &photos).iter().any(|p| p.id == b.id);
                let a_in_b = cluster_for(b, &photos).iter().any(|p| p.id == a.id);
                assert_eq!(b_in_a, a_in_b, "{} / {}", a.id, b.id);
            }
        }
    }

    #[test]
    fn test_chains_do_not_merge() {
        let photos = vec![
            photo(1, 1900, 0.0, 0.0),
            photo(2, 1901, 0.0007, 0.0),
            photo(3, 1902, 0.0014, 0.0),
        ];

        assert_eq!(ids(&cluster_for(&photos[0], &photos)), vec![1, 2]);
        assert_eq!(ids(&cluster_for(&photos[1], &photos)), vec![1, 2, 3]);
        assert_eq!(ids(&cluster_for(&photos[2], &photos)), vec![2, 3]);
    }
}
