use earcutr::earcut;
use foundation::geometry::{Geometry, Polygon, Position};

/// Fill mesh for a region as a flat triangle list (3 positions per
/// triangle) in lon/lat.
///
/// Triangulates directly in degrees. Parts that fail to triangulate
/// contribute nothing.
pub fn triangulate(geometry: &Geometry) -> Vec<Position> {
    geometry.parts().iter().flat_map(triangulate_polygon).collect()
}

fn triangulate_polygon(polygon: &Polygon) -> Vec<Position> {
    let mut vertices: Vec<Position> = Vec::new();
    let mut coords: Vec<f64> = Vec::new();
    let mut hole_indices: Vec<usize> = Vec::new();

    for (ring_i, ring) in polygon.iter().enumerate() {
        let ring = without_closing_duplicate(ring);
        if ring.len() < 3 {
            if ring_i == 0 {
                return Vec::new();
            }
            continue;
        }
        if ring_i > 0 {
            hole_indices.push(vertices.len());
        }
        for p in ring {
            coords.push(p[0]);
            coords.push(p[1]);
            vertices.push(*p);
        }
    }

    if vertices.len() < 3 {
        return Vec::new();
    }

    let indices = match earcut(&coords, &hole_indices, 2) {
        Ok(ix) => ix,
        Err(_) => return Vec::new(),
    };
    indices
        .into_iter()
        .filter_map(|idx| vertices.get(idx).copied())
        .collect()
}

fn without_closing_duplicate(ring: &[Position]) -> &[Position] {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last))
            if ring.len() >= 2
                && (first[0] - last[0]).abs() < 1e-12
                && (first[1] - last[1]).abs() < 1e-12 =>
        {
            &ring[..ring.len() - 1]
        }
        _ => ring,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shoelace(tri: &[Position]) -> f64 {
        let [a, b, c] = [tri[0], tri[1], tri[2]];
        ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])).abs() / 2.0
    }

    #[test]
    fn square_is_two_triangles() {
        let g = Geometry::Polygon(vec![vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 1.0],
            [0.0, 0.0],
        ]]);
        let tris = triangulate(&g);
        assert_eq!(tris.len(), 6);
        let area: f64 = tris.chunks(3).map(shoelace).sum();
        assert!((area - 1.0).abs() < 1e-12);
    }

    #[test]
    fn holes_are_left_open() {
        let g = Geometry::Polygon(vec![
            vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]],
            vec![[1.0, 1.0], [3.0, 1.0], [3.0, 3.0], [1.0, 3.0]],
        ]);
        let area: f64 = triangulate(&g).chunks(3).map(shoelace).sum();
        assert!((area - 12.0).abs() < 1e-9);
    }

    #[test]
    fn multipolygon_parts_and_degenerates() {
        let tri = vec![vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]];
        let g = Geometry::MultiPolygon(vec![tri.clone(), vec![vec![[5.0, 5.0]]], tri]);
        assert_eq!(triangulate(&g).len(), 6);
        assert!(triangulate(&Geometry::Unsupported("Point".into())).is_empty());
    }
}
