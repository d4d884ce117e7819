use std::sync::Arc;

use compute::dummy_score;
use formats::score_key;
use foundation::geometry::{Geometry, Position};
use foundation::{AdminLevel, AdministrativeUnit, KeyedArena};
use streaming::LoadState;

use crate::labels::tooltip;
use crate::layer::{Layer, LayerId};
use crate::mesh::triangulate;
use crate::symbology::{Emphasis, RegionStyle, region_style};

/// A unit plus everything derived from it at load time.
#[derive(Debug, Clone, PartialEq)]
struct Region {
    unit: AdministrativeUnit,
    tooltip: String,
    score: u8,
    fill_triangles: Arc<[Position]>,
}

impl Region {
    fn prepare(unit: AdministrativeUnit) -> Self {
        Self {
            tooltip: tooltip(&unit),
            score: dummy_score(&score_key(&unit)),
            fill_triangles: triangulate(&unit.geometry).into(),
            unit,
        }
    }
}

/// The clickable regions of one level.
///
/// Built fresh from every fetch result; a new level replaces the layer
/// rather than mutating it. Triangulation and scoring happen once, in
/// [`RegionLayer::loaded`]; hover and focus only change styles.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionLayer {
    id: LayerId,
    level: AdminLevel,
    regions: KeyedArena<Region>,
    load: LoadState,
    hovered: Option<String>,
    focused: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRegion {
    pub key: String,
    pub name: String,
    pub tooltip: String,
    pub score: u8,
    pub style: RegionStyle,
    pub geometry: Arc<Geometry>,
    /// Flat triangle list of the fill, in lon/lat.
    pub fill_triangles: Arc<[Position]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionLayerSnapshot {
    pub layer: LayerId,
    pub level: AdminLevel,
    pub load_state: LoadState,
    pub regions: Vec<RenderedRegion>,
}

impl RegionLayerSnapshot {
    pub fn region(&self, key: &str) -> Option<&RenderedRegion> {
        self.regions.iter().find(|r| r.key == key)
    }

    /// Applies `restyle` if it targets this layer. Returns whether it did.
    pub fn apply(&mut self, restyle: &RegionRestyle) -> bool {
        if restyle.layer != self.layer || restyle.level != self.level {
            return false;
        }
        for (key, style) in &restyle.styles {
            if let Some(region) = self.regions.iter_mut().find(|r| &r.key == key) {
                region.style = *style;
            }
        }
        true
    }
}

/// New styles for the regions whose emphasis changed. Carries no geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRestyle {
    pub layer: LayerId,
    pub level: AdminLevel,
    pub styles: Vec<(String, RegionStyle)>,
}

impl RegionLayer {
    /// Empty placeholder shown while the level's file is in flight.
    pub fn loading(level: AdminLevel) -> Self {
        Self::with_state(level, KeyedArena::new(), LoadState::Loading)
    }

    /// Later units with an already-seen key replace the earlier one.
    pub fn loaded(level: AdminLevel, units: impl IntoIterator<Item = AdministrativeUnit>) -> Self {
        let regions: KeyedArena<Region> = units
            .into_iter()
            .filter(|u| u.level == level)
            .map(|u| (u.key.clone(), Region::prepare(u)))
            .collect();
        let load = LoadState::Loaded {
            features: regions.len(),
        };
        Self::with_state(level, regions, load)
    }

    pub fn failed(level: AdminLevel, reason: impl Into<String>) -> Self {
        Self::with_state(level, KeyedArena::new(), LoadState::Failed(reason.into()))
    }

    fn with_state(level: AdminLevel, regions: KeyedArena<Region>, load: LoadState) -> Self {
        Self {
            id: LayerId::for_level(level),
            level,
            regions,
            load,
            hovered: None,
            focused: None,
        }
    }

    pub fn level(&self) -> AdminLevel {
        self.level
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn unit(&self, key: &str) -> Option<&AdministrativeUnit> {
        self.regions.by_key(key).map(|r| &r.unit)
    }

    pub fn units(&self) -> impl Iterator<Item = &AdministrativeUnit> {
        self.regions.iter().map(|r| &r.unit)
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Moves the hover target. Unknown keys clear it.
    ///
    /// Returns the restyle for the regions that left and entered the hover,
    /// or `None` when the target did not change.
    pub fn set_hovered(&mut self, key: Option<&str>) -> Option<RegionRestyle> {
        let next = key.filter(|k| self.regions.contains_key(k)).map(str::to_string);
        if next == self.hovered {
            return None;
        }
        let previous = std::mem::replace(&mut self.hovered, next);
        let changed: Vec<&str> = previous
            .as_deref()
            .into_iter()
            .chain(self.hovered.as_deref())
            .collect();
        Some(self.restyle(&changed))
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Marks the unit the selection currently rests on, if it is part of
    /// this layer.
    pub fn set_focused(&mut self, key: Option<&str>) {
        self.focused = key.filter(|k| self.regions.contains_key(k)).map(str::to_string);
    }

    fn emphasis(&self, key: &str) -> Emphasis {
        if self.focused.as_deref() == Some(key) {
            Emphasis::Focused
        } else if self.hovered.as_deref() == Some(key) {
            Emphasis::Hovered
        } else {
            Emphasis::Normal
        }
    }

    fn style_of(&self, region: &Region) -> RegionStyle {
        region_style(self.level, region.score, self.emphasis(&region.unit.key))
    }

    fn restyle(&self, keys: &[&str]) -> RegionRestyle {
        let styles = keys
            .iter()
            .filter_map(|k| self.regions.by_key(k))
            .map(|r| (r.unit.key.clone(), self.style_of(r)))
            .collect();
        RegionRestyle {
            layer: self.id,
            level: self.level,
            styles,
        }
    }

    /// Full draw list. Geometry and triangles are shared, not copied.
    pub fn snapshot(&self) -> RegionLayerSnapshot {
        let regions = self
            .regions
            .iter()
            .map(|r| RenderedRegion {
                key: r.unit.key.clone(),
                name: r.unit.name.clone(),
                tooltip: r.tooltip.clone(),
                score: r.score,
                style: self.style_of(r),
                geometry: Arc::clone(&r.unit.geometry),
                fill_triangles: Arc::clone(&r.fill_triangles),
            })
            .collect();
        RegionLayerSnapshot {
            layer: self.id,
            level: self.level,
            load_state: self.load.clone(),
            regions,
        }
    }
}

impl Layer for RegionLayer {
    fn id(&self) -> LayerId {
        self.id
    }
}
