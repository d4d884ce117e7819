use foundation::geometry::bounding_box;
use foundation::{AdminLevel, AdministrativeUnit, BoundingBox};

/// Where the user currently is in the hierarchy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NavState {
    Root,
    ProvinceSelected,
    RegencySelected,
    DistrictSelected,
}

impl NavState {
    pub fn depth(self) -> usize {
        match self {
            NavState::Root => 0,
            NavState::ProvinceSelected => 1,
            NavState::RegencySelected => 2,
            NavState::DistrictSelected => 3,
        }
    }
}

impl std::fmt::Display for NavState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NavState::Root => "root",
            NavState::ProvinceSelected => "province-selected",
            NavState::RegencySelected => "regency-selected",
            NavState::DistrictSelected => "district-selected",
        };
        f.write_str(s)
    }
}

/// Identity of a selection path: the keys of its units, root first.
///
/// Used to tag in-flight fetches; two paths with the same keys are the same
/// place in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PathKey(pub Vec<String>);

impl std::fmt::Display for PathKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        f.write_str(&self.0.join("/"))
    }
}

/// Province, then regency, then district; at most three units.
///
/// Each unit is exactly one level deeper than the one before it. Paths are
/// values: transitions build a new path (see [`SelectionPath::apply`]).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionPath {
    pub(crate) units: Vec<AdministrativeUnit>,
}

impl SelectionPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.units.len()
    }

    pub fn state(&self) -> NavState {
        match self.units.len() {
            0 => NavState::Root,
            1 => NavState::ProvinceSelected,
            2 => NavState::RegencySelected,
            _ => NavState::DistrictSelected,
        }
    }

    pub fn units(&self) -> &[AdministrativeUnit] {
        &self.units
    }

    pub fn at(&self, level: AdminLevel) -> Option<&AdministrativeUnit> {
        self.units.get(level.depth() - 1)
    }

    pub fn province(&self) -> Option<&AdministrativeUnit> {
        self.at(AdminLevel::Province)
    }

    pub fn regency(&self) -> Option<&AdministrativeUnit> {
        self.at(AdminLevel::Regency)
    }

    pub fn district(&self) -> Option<&AdministrativeUnit> {
        self.at(AdminLevel::District)
    }

    /// Deepest selected unit.
    pub fn focus(&self) -> Option<&AdministrativeUnit> {
        self.units.last()
    }

    pub fn key(&self) -> PathKey {
        PathKey(self.units.iter().map(|u| u.key.clone()).collect())
    }

    /// Level whose regions are on screen in this state. A selected district
    /// stays among its sibling districts.
    pub fn displayed_level(&self) -> AdminLevel {
        match self.state() {
            NavState::Root => AdminLevel::Province,
            NavState::ProvinceSelected => AdminLevel::Regency,
            NavState::RegencySelected | NavState::DistrictSelected => AdminLevel::District,
        }
    }

    /// Camera target for this path; `None` at root or for a focus without
    /// usable coordinates.
    pub fn focus_bounds(&self) -> Option<BoundingBox> {
        self.focus().and_then(|u| bounding_box(&u.geometry))
    }
}
