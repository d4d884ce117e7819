//! JSON rendering of the final view.

use formats::geometry_to_geojson;
use layers::{to_hex, RegionLayerSnapshot, RenderedRegion};
use navigation::Explorer;
use serde::Serialize;
use serde_json::{json, Value};
use streaming::LoadState;

use crate::session::Display;

#[derive(Debug, Serialize)]
pub struct Summary {
    pub path: Vec<String>,
    pub state: String,
    pub caption: Option<String>,
    pub controls: Vec<&'static str>,
    pub camera: Option<[f64; 4]>,
    pub layer: Option<LayerSummary>,
    pub points: Vec<PointSummary>,
    pub frames: u64,
}

#[derive(Debug, Serialize)]
pub struct LayerSummary {
    pub level: String,
    pub load_state: String,
    pub regions: Vec<RegionSummary>,
}

#[derive(Debug, Serialize)]
pub struct RegionSummary {
    pub key: String,
    pub tooltip: String,
    pub score: u8,
    pub fill: String,
    pub fill_opacity: f32,
    pub stroke_weight: f32,
    pub triangles: usize,
}

#[derive(Debug, Serialize)]
pub struct PointSummary {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

pub fn load_state_label(state: &LoadState) -> String {
    match state {
        LoadState::Idle => "idle".to_string(),
        LoadState::Loading => "loading".to_string(),
        LoadState::Loaded { features } => format!("loaded ({features})"),
        LoadState::Failed(reason) => format!("failed: {reason}"),
    }
}

fn fill_hex(region: &RenderedRegion) -> String {
    let [r, g, b, _] = region.style.fill;
    to_hex([r, g, b])
}

pub fn summarize(explorer: &Explorer, display: &Display, frames: u64) -> Summary {
    let layer = display.regions.as_ref().map(|snap| LayerSummary {
        level: snap.level.to_string(),
        load_state: load_state_label(&snap.load_state),
        regions: snap
            .regions
            .iter()
            .map(|r| RegionSummary {
                key: r.key.clone(),
                tooltip: r.tooltip.clone(),
                score: r.score,
                fill: fill_hex(r),
                fill_opacity: r.style.fill[3],
                stroke_weight: r.style.stroke_weight,
                triangles: r.fill_triangles.len() / 3,
            })
            .collect(),
    });
    Summary {
        path: explorer.path().key().0,
        state: explorer.state().to_string(),
        caption: display.controls.as_ref().map(|c| c.caption.clone()),
        controls: display
            .controls
            .iter()
            .flat_map(|c| c.actions.iter().map(|a| a.label()))
            .collect(),
        camera: display
            .camera
            .map(|b| [b.min_lon, b.min_lat, b.max_lon, b.max_lat]),
        layer,
        points: display
            .points
            .iter()
            .map(|p| PointSummary {
                id: p.id.clone(),
                name: p.name.clone(),
                lat: p.lat,
                lon: p.lon,
            })
            .collect(),
        frames,
    }
}

/// The displayed layer as a styled GeoJSON collection.
pub fn layer_geojson(snapshot: &RegionLayerSnapshot) -> Value {
    let features: Vec<Value> = snapshot
        .regions
        .iter()
        .map(|r| {
            json!({
                "type": "Feature",
                "properties": {
                    "key": r.key,
                    "name": r.name,
                    "level": snapshot.level.as_str(),
                    "tooltip": r.tooltip,
                    "score": r.score,
                    "fillColor": fill_hex(r),
                    "fillOpacity": r.style.fill[3],
                    "weight": r.style.stroke_weight,
                },
                "geometry": geometry_to_geojson(&r.geometry),
            })
        })
        .collect();
    json!({"type": "FeatureCollection", "features": features})
}
