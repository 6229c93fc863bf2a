/// Year range filter
///
/// Keeps `domain.min <= min <= max <= domain.max` at all times. The two
/// range endpoints are interchangeable: setting a range whose ends are
/// reversed swaps them instead of rejecting it.
use super::data::Photo;

/// Inclusive span of years present in the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearDomain {
    pub min: i32,
    pub max: i32,
}

impl Default for YearDomain {
    /// Domain shown before a dataset arrives
    fn default() -> Self {
        Self {
            min: 1850,
            max: 2000,
        }
    }
}

impl YearDomain {
    /// Domain spanning the given years, `None` when there are none
    pub fn from_years(years: impl IntoIterator<Item = i32>) -> Option<Self> {
        years.into_iter().fold(None, |domain, year| {
            Some(match domain {
                None => YearDomain { min: year, max: year },
                Some(d) => YearDomain {
                    min: d.min.min(year),
                    max: d.max.max(year),
                },
            })
        })
    }

    /// Width of the domain; wide enough for any pair of `i32` years
    pub fn span(&self) -> i64 {
        self.max as i64 - self.min as i64
    }

    /// Slider step: decades for long spans, half-decades otherwise
    pub fn step(&self) -> i32 {
        if self.span() > 100 {
            10
        } else {
            5
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearFilter {
    domain: YearDomain,
    min: i32,
    max: i32,
}

impl Default for YearFilter {
    fn default() -> Self {
        Self::new(YearDomain::default())
    }
}

impl YearFilter {
    /// Filter over `domain` with the full range selected
    pub fn new(domain: YearDomain) -> Self {
        Self {
            domain,
            min: domain.min,
            max: domain.max,
        }
    }

    pub fn domain(&self) -> YearDomain {
        self.domain
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn step(&self) -> i32 {
        self.domain.step()
    }

    /// Set both endpoints. Reversed endpoints are swapped; values
    /// outside the domain are clamped into it.
    pub fn set_range(&mut self, a: i32, b: i32) {
        let (low, high) = if a > b { (b, a) } else { (a, b) };
        self.min = low.clamp(self.domain.min, self.domain.max);
        self.max = high.clamp(self.domain.min, self.domain.max);
    }

    /// Inclusive on both ends
    pub fn matches(&self, photo: &Photo) -> bool {
        self.min <= photo.year && photo.year <= self.max
    }

    /// Photos inside the range, in input order
    pub fn apply<'a>(&self, photos: &'a [Photo]) -> Vec<&'a Photo> {
        photos.iter().filter(|photo| self.matches(photo)).collect()
    }

    /// Position of a year along the domain in [0, 1].
    /// A single-year domain maps everything to 0.
    pub fn position(&self, year: i32) -> f32 {
        let span = self.domain.span();
        if span == 0 {
            return 0.0;
        }
        let offset = year as i64 - self.domain.min as i64;
        (offset as f64 / span as f64).clamp(0.0, 1.0) as f32
    }

    /// Normalized positions of (min, max), used for the fill between handles
    pub fn fill(&self) -> (f32, f32) {
        (self.position(self.min), self.position(self.max))
    }

    /// Header text, e.g. "1890–1950 ▼"
    pub fn label(&self, panel_open: bool) -> String {
        let arrow = if panel_open { '▲' } else { '▼' };
        format!("{}–{} {}", self.min, self.max, arrow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::LatLng;
    use crate::state::data::PhotoId;

    fn photo_from(year: i32) -> Photo {
        Photo {
            id: PhotoId::Number(year as i64),
            title: String::new(),
            year,
            position: LatLng::default(),
            thumbnail_url: String::new(),
            full_image_url: String::new(),
            description: String::new(),
            date: None,
            folder: None,
        }
    }

    #[test]
    fn test_full_range_by_default() {
        let filter = YearFilter::new(YearDomain { min: 1870, max: 1990 });
        assert_eq!((filter.min(), filter.max()), (1870, 1990));
        assert_eq!(filter.fill(), (0.0, 1.0));
    }

    #[test]
    fn test_reversed_range_is_swapped() {
        let mut filter = YearFilter::new(YearDomain { min: 1850, max: 2000 });
        filter.set_range(1960, 1920);
        assert_eq!((filter.min(), filter.max()), (1920, 1960));
    }

    #[test]
    fn test_range_is_clamped_to_domain() {
        let mut filter = YearFilter::new(YearDomain { min: 1900, max: 1950 });
        filter.set_range(1800, 2020);
        assert_eq!((filter.min(), filter.max()), (1900, 1950));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let mut filter = YearFilter::default();
        filter.set_range(1920, 1960);

        let photos: Vec<Photo> = [1919, 1920, 1940, 1960, 1961]
            .into_iter()
            .map(photo_from)
            .collect();
        let years: Vec<i32> = filter.apply(&photos).iter().map(|p| p.year).collect();
        assert_eq!(years, vec![1920, 1940, 1960]);
    }

    #[test]
    fn test_single_year_domain_positions() {
        let filter = YearFilter::new(YearDomain { min: 1904, max: 1904 });
        assert_eq!(filter.position(1904), 0.0);
        assert_eq!(filter.fill(), (0.0, 0.0));
    }

    #[test]
    fn test_step_depends_on_span() {
        assert_eq!(YearDomain { min: 1850, max: 2000 }.step(), 10);
        assert_eq!(YearDomain { min: 1900, max: 2000 }.step(), 5);
        assert_eq!(YearDomain { min: 1900, max: 1901 }.step(), 5);
    }

    #[test]
    fn test_extreme_domain_does_not_overflow() {
        let domain = YearDomain { min: i32::MIN, max: 1900 };
        assert_eq!(domain.span(), 1900 - i32::MIN as i64);
        assert_eq!(domain.step(), 10);

        let filter = YearFilter::new(YearDomain { min: i32::MIN, max: i32::MAX });
        assert_eq!(filter.fill(), (0.0, 1.0));
        assert!((filter.position(0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_domain_from_years() {
        assert_eq!(YearDomain::from_years([1950, 1890, 2001]), Some(YearDomain { min: 1890, max: 2001 }));
        assert_eq!(YearDomain::from_years(Vec::new()), None);
    }

    #[test]
    fn test_label_arrow_follows_panel() {
        let filter = YearFilter::new(YearDomain { min: 1890, max: 1950 });
        assert_eq!(filter.label(false), "1890–1950 ▼");
        assert_eq!(filter.label(true), "1890–1950 ▲");
    }
}
