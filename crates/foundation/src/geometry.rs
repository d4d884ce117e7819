use crate::bounds::BoundingBox;

/// `[lon, lat]` in degrees.
pub type Position = [f64; 2];
/// Linear ring; the closing vertex may or may not repeat the first one.
pub type Ring = Vec<Position>;
/// Ring 0 is the exterior, the remaining rings are holes.
pub type Polygon = Vec<Ring>;

/// Area geometry of an administrative region.
///
/// Every utility matches on the variant explicitly; `Unsupported` carries the
/// source geometry type and contributes no coordinates anywhere.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Polygon(Polygon),
    MultiPolygon(Vec<Polygon>),
    Unsupported(String),
}

impl Geometry {
    /// Polygon parts of this geometry: one for a Polygon, several for a
    /// MultiPolygon, none otherwise.
    pub fn parts(&self) -> &[Polygon] {
        match self {
            Geometry::Polygon(p) => std::slice::from_ref(p),
            Geometry::MultiPolygon(parts) => parts,
            Geometry::Unsupported(_) => &[],
        }
    }

    pub fn into_parts(self) -> Vec<Polygon> {
        match self {
            Geometry::Polygon(p) => vec![p],
            Geometry::MultiPolygon(parts) => parts,
            Geometry::Unsupported(_) => Vec::new(),
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Geometry::Unsupported(_))
    }

    fn positions(&self) -> impl Iterator<Item = &Position> + '_ {
        self.parts().iter().flatten().flatten()
    }
}

/// Bounding box over every coordinate of every ring.
///
/// Returns `None` when the geometry holds no finite position; callers must
/// read that as "cannot compute", not as an empty box at the origin.
pub fn bounding_box(geometry: &Geometry) -> Option<BoundingBox> {
    match geometry {
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) => {
            BoundingBox::from_positions(geometry.positions())
        }
        Geometry::Unsupported(_) => None,
    }
}

/// Crossing-number containment test.
///
/// A Polygon contains the point when ring 0 does and no hole does. A
/// MultiPolygon contains it when any part does.
pub fn point_in_polygon(lon: f64, lat: f64, geometry: &Geometry) -> bool {
    match geometry {
        Geometry::Polygon(rings) => polygon_contains(rings, lon, lat),
        Geometry::MultiPolygon(parts) => parts.iter().any(|p| polygon_contains(p, lon, lat)),
        Geometry::Unsupported(_) => false,
    }
}

fn polygon_contains(rings: &[Ring], lon: f64, lat: f64) -> bool {
    let Some((outer, holes)) = rings.split_first() else {
        return false;
    };
    ring_contains(outer, lon, lat) && !holes.iter().any(|h| ring_contains(h, lon, lat))
}

/// Ray casting towards +lon. Rings with fewer than 3 vertices never contain.
pub fn ring_contains(ring: &[Position], lon: f64, lat: f64) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let [xi, yi] = ring[i];
        let [xj, yj] = ring[j];
        if (yi > lat) != (yj > lat) && lon < (xj - xi) * (lat - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Signed shoelace area and area-weighted centroid sums of a ring.
fn ring_moments(ring: &[Position]) -> (f64, f64, f64) {
    if ring.len() < 3 {
        return (0.0, 0.0, 0.0);
    }
    let mut a2 = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let [x0, y0] = ring[j];
        let [x1, y1] = ring[i];
        let cross = x0 * y1 - x1 * y0;
        a2 += cross;
        cx += (x0 + x1) * cross;
        cy += (y0 + y1) * cross;
        j = i;
    }
    (a2 * 0.5, cx, cy)
}

/// Centroid of the exterior rings weighted by their absolute area.
///
/// Falls back to the mean vertex when the total area is zero (slivers,
/// collapsed rings) and to `None` when there is nothing to average.
pub fn area_weighted_centroid(geometry: &Geometry) -> Option<Position> {
    let mut total_area = 0.0;
    let mut sx = 0.0;
    let mut sy = 0.0;
    for part in geometry.parts() {
        let Some(outer) = part.first() else {
            continue;
        };
        let (area, cx, cy) = ring_moments(outer);
        if area == 0.0 || !area.is_finite() {
            continue;
        }
        // Ring centroid is (cx, cy) / (6 * area); weight it by |area|.
        let weight = area.abs();
        sx += cx / (6.0 * area) * weight;
        sy += cy / (6.0 * area) * weight;
        total_area += weight;
    }
    if total_area > 0.0 {
        return Some([sx / total_area, sy / total_area]);
    }

    let mut n = 0usize;
    let mut mx = 0.0;
    let mut my = 0.0;
    for &[lon, lat] in geometry.positions() {
        if lon.is_finite() && lat.is_finite() {
            mx += lon;
            my += lat;
            n += 1;
        }
    }
    (n > 0).then(|| [mx / n as f64, my / n as f64])
}
