/// Axis-aligned bounding box in degrees, `[lon, lat]` axes.
///
/// Boxes are derived values: build one with [`BoundingBox::from_positions`]
/// or fold positions through [`BoundingBox::including`], never mutate it in
/// place.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub const fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Degenerate box covering a single position.
    pub fn point(lon: f64, lat: f64) -> Self {
        Self::new(lon, lat, lon, lat)
    }

    /// Returns a new box grown to include `(lon, lat)`.
    pub fn including(self, lon: f64, lat: f64) -> Self {
        Self {
            min_lon: self.min_lon.min(lon),
            min_lat: self.min_lat.min(lat),
            max_lon: self.max_lon.max(lon),
            max_lat: self.max_lat.max(lat),
        }
    }

    /// Folds positions into a box. Non-finite positions are skipped.
    ///
    /// Returns `None` when no finite position was seen.
    pub fn from_positions<'a>(positions: impl IntoIterator<Item = &'a [f64; 2]>) -> Option<Self> {
        let mut acc: Option<Self> = None;
        for &[lon, lat] in positions {
            if !lon.is_finite() || !lat.is_finite() {
                continue;
            }
            acc = Some(match acc {
                Some(b) => b.including(lon, lat),
                None => Self::point(lon, lat),
            });
        }
        acc
    }

    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn center(&self) -> [f64; 2] {
        [
            (self.min_lon + self.max_lon) * 0.5,
            (self.min_lat + self.max_lat) * 0.5,
        ]
    }

    /// Component-wise comparison within `eps` degrees.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        (self.min_lon - other.min_lon).abs() <= eps
            && (self.min_lat - other.min_lat).abs() <= eps
            && (self.max_lon - other.max_lon).abs() <= eps
            && (self.max_lat - other.max_lat).abs() <= eps
    }
}
