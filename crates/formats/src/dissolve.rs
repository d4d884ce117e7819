use std::collections::HashMap;

use foundation::geometry::{Geometry, Polygon};
use serde_json::Value;

use crate::feature::Feature;

/// Merges features that share a key into one MultiPolygon feature each.
///
/// Groups come out in first-seen order. Every Polygon contributes one part
/// and every MultiPolygon all of its parts; unsupported geometries add
/// nothing. Parts are concatenated, not unioned, so adjacent fragments stay
/// separate rings under one name. The merged properties are the first
/// member's with `key_field` overwritten by the group key.
pub fn dissolve_by_key<F>(features: &[Feature], key_of: F, key_field: &str) -> Vec<Feature>
where
    F: Fn(&Feature) -> String,
{
    let mut order: Vec<(String, Feature, Vec<Polygon>)> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for feature in features {
        let key = key_of(feature);
        let idx = *slots.entry(key.clone()).or_insert_with(|| {
            order.push((key, feature.clone(), Vec::new()));
            order.len() - 1
        });
        order[idx].2.extend(feature.geometry.parts().iter().cloned());
    }

    order
        .into_iter()
        .map(|(key, first, parts)| {
            let mut properties = first.properties;
            properties.insert(key_field.to_string(), Value::String(key));
            Feature::new(properties, Geometry::MultiPolygon(parts))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::dissolve_by_key;
    use crate::feature::{Feature, Properties};
    use foundation::geometry::{Geometry, Ring};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tri(offset: f64) -> Ring {
        vec![[offset, 0.0], [offset + 1.0, 0.0], [offset, 1.0]]
    }

    fn feature(name: &str, extra: i64, geometry: Geometry) -> Feature {
        let mut props = Properties::new();
        props.insert("district".into(), json!(name));
        props.insert("extra".into(), json!(extra));
        Feature::new(props, geometry)
    }

    #[test]
    fn concatenates_all_parts_of_a_group() {
        let features = vec![
            feature("x", 1, Geometry::Polygon(vec![tri(0.0)])),
            feature("x", 2, Geometry::MultiPolygon(vec![vec![tri(2.0)], vec![tri(4.0)]])),
            feature("x", 3, Geometry::Polygon(vec![tri(6.0)])),
        ];
        let merged = dissolve_by_key(&features, |_| "x".to_string(), "district");
        assert_eq!(merged.len(), 1);
        match &merged[0].geometry {
            Geometry::MultiPolygon(parts) => assert_eq!(parts.len(), 4),
            other => panic!("expected MultiPolygon, got {other:?}"),
        }
        let mut expected = features[0].properties.clone();
        expected.insert("district".into(), json!("x"));
        assert_eq!(merged[0].properties, expected);
    }

    #[test]
    fn keeps_first_seen_group_order_and_skips_unsupported() {
        let features = vec![
            feature("b", 1, Geometry::Polygon(vec![tri(0.0)])),
            feature("a", 2, Geometry::Polygon(vec![tri(1.0)])),
            feature("b", 3, Geometry::Unsupported("LineString".into())),
        ];
        let merged = dissolve_by_key(
            &features,
            |f| f.prop_str(&["district"]).unwrap_or_default(),
            "district",
        );
        let names: Vec<_> = merged.iter().map(|f| f.prop_str(&["district"]).unwrap()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(merged[0].geometry.parts().len(), 1);
    }

    #[test]
    fn key_field_is_overwritten_with_group_key() {
        let features = vec![feature("  Cilandak ", 1, Geometry::Polygon(vec![tri(0.0)]))];
        let merged = dissolve_by_key(&features, |_| "Cilandak".to_string(), "district");
        assert_eq!(merged[0].properties["district"], json!("Cilandak"));
    }
}
