use std::f64::consts::TAU;
use std::ops::RangeInclusive;

use foundation::geometry::{Geometry, area_weighted_centroid, bounding_box, point_in_polygon};

use crate::rng::SeededRng;

pub const DEFAULT_POINT_COUNT: RangeInclusive<u32> = 5..=10;
/// Rejection draws per point before giving up on it.
pub const MAX_ATTEMPTS_PER_POINT: u32 = 200;
/// Fallback jitter radius around the centroid, degrees.
pub const FALLBACK_RADIUS_DEG: f64 = 0.01;
pub const MIN_FALLBACK_POINTS: u32 = 3;

/// Placeholder marker for the focused district. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticPoint {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl SyntheticPoint {
    fn new(seed: &str, ordinal: usize, lon: f64, lat: f64) -> Self {
        Self {
            id: format!("{seed}#{ordinal}"),
            name: format!("School {ordinal}"),
            lat,
            lon,
        }
    }
}

/// Places a seeded number of points inside `geometry` by rejection sampling.
///
/// The count is drawn from `count_range`. Each point gets up to
/// [`MAX_ATTEMPTS_PER_POINT`] uniform draws in the bounding box. When nothing
/// at all lands inside (slivers, tiny islands) the points are instead
/// jittered around the area-weighted centroid; those are not guaranteed to
/// be inside. Output is a pure function of `(geometry, seed, count_range)`.
pub fn generate_points_inside(
    geometry: &Geometry,
    seed: &str,
    count_range: RangeInclusive<u32>,
) -> Vec<SyntheticPoint> {
    let mut rng = SeededRng::new(seed);
    let count = rng.next_in_range(*count_range.start(), *count_range.end());

    let Some(bbox) = bounding_box(geometry) else {
        return Vec::new();
    };

    let mut out: Vec<SyntheticPoint> = Vec::with_capacity(count as usize);
    for _ in 0..count {
        for _ in 0..MAX_ATTEMPTS_PER_POINT {
            let lon = bbox.min_lon + rng.next_f64() * bbox.width();
            let lat = bbox.min_lat + rng.next_f64() * bbox.height();
            if point_in_polygon(lon, lat, geometry) {
                out.push(SyntheticPoint::new(seed, out.len() + 1, lon, lat));
                break;
            }
        }
    }

    if !out.is_empty() {
        return out;
    }

    let [cx, cy] = area_weighted_centroid(geometry).unwrap_or_else(|| bbox.center());
    let fallback = count.max(MIN_FALLBACK_POINTS);
    (0..fallback as usize)
        .map(|i| {
            let r = rng.next_f64() * FALLBACK_RADIUS_DEG;
            let theta = rng.next_f64() * TAU;
            SyntheticPoint::new(seed, i + 1, cx + r * theta.cos(), cy + r * theta.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square() -> Geometry {
        Geometry::Polygon(vec![vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]])
    }

    #[test]
    fn same_seed_same_points() {
        let g = square();
        let a = generate_points_inside(&g, "seed-A", DEFAULT_POINT_COUNT);
        let b = generate_points_inside(&g, "seed-A", DEFAULT_POINT_COUNT);
        assert_eq!(a, b);
        assert!((5..=10).contains(&(a.len() as u32)));
        assert!(a.iter().all(|p| point_in_polygon(p.lon, p.lat, &g)));
        assert_eq!(a[0].id, "seed-A#1");
        assert_eq!(a[0].name, "School 1");
    }

    #[test]
    fn respects_holes() {
        let g = Geometry::Polygon(vec![
            vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]],
            vec![[1.0, 1.0], [9.0, 1.0], [9.0, 9.0], [1.0, 9.0]],
        ]);
        let pts = generate_points_inside(&g, "ring", DEFAULT_POINT_COUNT);
        assert!(!pts.is_empty());
        for p in &pts {
            let in_hole = p.lon > 1.0 && p.lon < 9.0 && p.lat > 1.0 && p.lat < 9.0;
            assert!(!in_hole, "{p:?} landed in the hole");
        }
    }

    #[test]
    fn no_bounding_box_means_no_points() {
        assert!(
            generate_points_inside(&Geometry::MultiPolygon(vec![]), "x", DEFAULT_POINT_COUNT)
                .is_empty()
        );
        assert!(
            generate_points_inside(&Geometry::Unsupported("Point".into()), "x", DEFAULT_POINT_COUNT)
                .is_empty()
        );
    }

    #[test]
    fn sliver_falls_back_to_centroid_jitter() {
        // A needle spanning a 10x10 box with almost no area: rejection never hits.
        let g = Geometry::Polygon(vec![vec![[0.0, 0.0], [10.0, 10.0], [10.0, 10.0 + 1e-9]]]);
        let pts = generate_points_inside(&g, "needle", DEFAULT_POINT_COUNT);
        assert!(pts.len() >= 5);
        let [cx, cy] = area_weighted_centroid(&g).unwrap();
        for p in &pts {
            let d = ((p.lon - cx).powi(2) + (p.lat - cy).powi(2)).sqrt();
            assert!(d < FALLBACK_RADIUS_DEG + 1e-12);
        }
        assert_eq!(pts, generate_points_inside(&g, "needle", DEFAULT_POINT_COUNT));
    }

    #[test]
    fn fallback_places_at_least_three() {
        let g = Geometry::Polygon(vec![vec![[0.0, 0.0], [10.0, 10.0], [10.0, 10.0 + 1e-9]]]);
        let pts = generate_points_inside(&g, "zero", 0..=0);
        assert_eq!(pts.len(), 3);
    }

    proptest! {
        #[test]
        fn deterministic_for_any_seed(seed in "[a-z0-9:-]{0,24}") {
            let g = square();
            let a = generate_points_inside(&g, &seed, DEFAULT_POINT_COUNT);
            let b = generate_points_inside(&g, &seed, DEFAULT_POINT_COUNT);
            prop_assert_eq!(&a, &b);
            prop_assert!(a.len() >= 5 && a.len() <= 10);
        }
    }
}
