use foundation::geometry::{Geometry, Polygon, Position, Ring};
use serde::Deserialize;
use serde_json::{Map, Number, Value, json};

pub type Properties = Map<String, Value>;

/// 2^53: beyond this an `f64` no longer holds every integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A boundary feature: free-form properties plus an area geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub properties: Properties,
    pub geometry: Geometry,
}

/// Parsed GeoJSON `FeatureCollection`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    Json(String),
    NotACollection(String),
}

impl std::fmt::Display for FeatureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureError::Json(msg) => write!(f, "invalid GeoJSON: {msg}"),
            FeatureError::NotACollection(kind) => {
                write!(f, "expected a FeatureCollection, found {kind}")
            }
        }
    }
}

impl std::error::Error for FeatureError {}

#[derive(Deserialize)]
struct RawCollection {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: Option<Properties>,
    #[serde(default)]
    geometry: Option<Value>,
}

impl Feature {
    pub fn new(properties: Properties, geometry: Geometry) -> Self {
        Self {
            properties,
            geometry,
        }
    }

    /// First of `keys` holding a non-empty string or a number, as a trimmed
    /// string. Integral numbers print without a fraction whether stored as
    /// `31` or `31.0`, so codes from different files compare equal.
    pub fn prop_str(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|k| match self.properties.get(*k)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(number_str(n)),
            _ => None,
        })
    }

    pub fn to_geojson(&self) -> Value {
        json!({
            "type": "Feature",
            "properties": Value::Object(self.properties.clone()),
            "geometry": geometry_to_geojson(&self.geometry),
        })
    }
}

fn number_str(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

impl FeatureCollection {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FeatureError> {
        let raw: RawCollection =
            serde_json::from_slice(bytes).map_err(|e| FeatureError::Json(e.to_string()))?;
        Self::from_raw(raw)
    }

    pub fn from_value(value: Value) -> Result<Self, FeatureError> {
        let raw: RawCollection =
            serde_json::from_value(value).map_err(|e| FeatureError::Json(e.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawCollection) -> Result<Self, FeatureError> {
        if let Some(kind) = raw.kind
            && kind != "FeatureCollection"
        {
            return Err(FeatureError::NotACollection(kind));
        }
        let features = raw
            .features
            .into_iter()
            .map(|f| Feature {
                properties: f.properties.unwrap_or_default(),
                geometry: f
                    .geometry
                    .as_ref()
                    .map(decode_geometry)
                    .unwrap_or_else(|| Geometry::Unsupported("null".to_string())),
            })
            .collect();
        Ok(Self { features })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn to_geojson(&self) -> Value {
        json!({
            "type": "FeatureCollection",
            "features": self.features.iter().map(Feature::to_geojson).collect::<Vec<_>>(),
        })
    }
}

/// Decodes a GeoJSON geometry object.
///
/// Only Polygon and MultiPolygon are kept; any other type (or a malformed
/// object) becomes [`Geometry::Unsupported`]. Coordinate leaves that are not
/// at least two finite numbers are dropped, extra ordinates are ignored.
pub fn decode_geometry(value: &Value) -> Geometry {
    let kind = value.get("type").and_then(Value::as_str).unwrap_or("null");
    let coords = value.get("coordinates");
    match (kind, coords) {
        ("Polygon", Some(c)) => Geometry::Polygon(decode_polygon(c)),
        ("MultiPolygon", Some(Value::Array(parts))) => {
            Geometry::MultiPolygon(parts.iter().map(decode_polygon).collect())
        }
        (other, _) => Geometry::Unsupported(other.to_string()),
    }
}

fn decode_polygon(value: &Value) -> Polygon {
    match value {
        Value::Array(rings) => rings.iter().map(decode_ring).collect(),
        _ => Vec::new(),
    }
}

fn decode_ring(value: &Value) -> Ring {
    match value {
        Value::Array(positions) => positions.iter().filter_map(decode_position).collect(),
        _ => Vec::new(),
    }
}

fn decode_position(value: &Value) -> Option<Position> {
    let arr = value.as_array()?;
    let lon = arr.first()?.as_f64()?;
    let lat = arr.get(1)?.as_f64()?;
    (lon.is_finite() && lat.is_finite()).then_some([lon, lat])
}

pub fn geometry_to_geojson(geometry: &Geometry) -> Value {
    match geometry {
        Geometry::Polygon(rings) => json!({ "type": "Polygon", "coordinates": rings }),
        Geometry::MultiPolygon(parts) => json!({ "type": "MultiPolygon", "coordinates": parts }),
        Geometry::Unsupported(_) => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_polygon_and_multipolygon_features() {
        let src = br#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"prov_id": 31, "prov_name": "DKI Jakarta"},
                 "geometry": {"type": "Polygon",
                              "coordinates": [[[106.7,-6.3],[106.9,-6.3],[106.9,-6.1]]]}},
                {"type": "Feature", "properties": {"name": "Kepulauan Seribu"},
                 "geometry": {"type": "MultiPolygon",
                              "coordinates": [[[[106.5,-5.8],[106.6,-5.8],[106.6,-5.7,12.0]]]]}}
            ]
        }"#;
        let fc = FeatureCollection::from_slice(src).unwrap();
        assert_eq!(fc.len(), 2);
        assert_eq!(fc.features[0].prop_str(&["prov_id"]), Some("31".to_string()));
        assert_eq!(
            fc.features[0].geometry,
            Geometry::Polygon(vec![vec![[106.7, -6.3], [106.9, -6.3], [106.9, -6.1]]])
        );
        match &fc.features[1].geometry {
            Geometry::MultiPolygon(parts) => assert_eq!(parts[0][0][2], [106.6, -5.7]),
            other => panic!("unexpected geometry {other:?}"),
        }
    }

    #[test]
    fn unsupported_and_missing_geometry_are_tagged() {
        let src = br#"{"type": "FeatureCollection", "features": [
            {"properties": {}, "geometry": {"type": "Point", "coordinates": [1, 2]}},
            {"properties": null, "geometry": null},
            {"properties": {}, "geometry": {"type": "Polygon"}}
        ]}"#;
        let fc = FeatureCollection::from_slice(src).unwrap();
        assert_eq!(fc.features[0].geometry, Geometry::Unsupported("Point".into()));
        assert_eq!(fc.features[1].geometry, Geometry::Unsupported("null".into()));
        assert_eq!(fc.features[2].geometry, Geometry::Unsupported("Polygon".into()));
        assert!(fc.features[1].properties.is_empty());
    }

    #[test]
    fn drops_malformed_positions() {
        let g = decode_geometry(&json!({
            "type": "Polygon",
            "coordinates": [[[0, 0], ["x", 1], [1], [1, 0], [1, 1]]]
        }));
        assert_eq!(g, Geometry::Polygon(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]]));
    }

    #[test]
    fn missing_features_is_empty_and_wrong_type_is_rejected() {
        let fc = FeatureCollection::from_slice(br#"{"type": "FeatureCollection"}"#).unwrap();
        assert!(fc.is_empty());
        let err = FeatureCollection::from_slice(br#"{"type": "Feature"}"#).unwrap_err();
        assert_eq!(err, FeatureError::NotACollection("Feature".into()));
        assert!(matches!(
            FeatureCollection::from_slice(b"not json"),
            Err(FeatureError::Json(_))
        ));
    }

    #[test]
    fn prop_str_skips_empty_values() {
        let mut props = Properties::new();
        props.insert("district".into(), json!("  "));
        props.insert("name".into(), json!(" Cilandak "));
        let f = Feature::new(props, Geometry::MultiPolygon(vec![]));
        assert_eq!(f.prop_str(&["district", "name"]), Some("Cilandak".to_string()));
        assert_eq!(f.prop_str(&["regency"]), None);
    }

    #[test]
    fn integral_floats_print_like_integers() {
        let mut props = Properties::new();
        props.insert("a".into(), json!(31.0));
        props.insert("b".into(), json!(31));
        props.insert("c".into(), json!(31.5));
        props.insert("d".into(), json!(-7.0));
        let f = Feature::new(props, Geometry::MultiPolygon(vec![]));
        assert_eq!(f.prop_str(&["a"]), Some("31".to_string()));
        assert_eq!(f.prop_str(&["a"]), f.prop_str(&["b"]));
        assert_eq!(f.prop_str(&["c"]), Some("31.5".to_string()));
        assert_eq!(f.prop_str(&["d"]), Some("-7".to_string()));
    }

    #[test]
    fn geojson_output_matches_input_shape() {
        let g = Geometry::Polygon(vec![vec![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]]);
        assert_eq!(
            geometry_to_geojson(&g),
            json!({"type": "Polygon", "coordinates": [[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]]})
        );
    }
}
