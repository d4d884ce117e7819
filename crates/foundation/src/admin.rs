use std::sync::Arc;

use crate::geometry::Geometry;

/// Depth in the administrative hierarchy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AdminLevel {
    Province,
    Regency,
    District,
}

impl AdminLevel {
    pub const ALL: [AdminLevel; 3] = [
        AdminLevel::Province,
        AdminLevel::Regency,
        AdminLevel::District,
    ];

    /// 1-based depth: Province = 1, District = 3.
    pub fn depth(self) -> usize {
        match self {
            AdminLevel::Province => 1,
            AdminLevel::Regency => 2,
            AdminLevel::District => 3,
        }
    }

    pub fn from_depth(depth: usize) -> Option<Self> {
        match depth {
            1 => Some(AdminLevel::Province),
            2 => Some(AdminLevel::Regency),
            3 => Some(AdminLevel::District),
            _ => None,
        }
    }

    pub fn parent(self) -> Option<Self> {
        Self::from_depth(self.depth() - 1)
    }

    pub fn child(self) -> Option<Self> {
        Self::from_depth(self.depth() + 1)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AdminLevel::Province => "province",
            AdminLevel::Regency => "regency",
            AdminLevel::District => "district",
        }
    }
}

impl std::fmt::Display for AdminLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One region at one level, normalized from whichever dataset produced it.
///
/// `key` identifies the unit inside its own level (province code, or the
/// trimmed display name below that). `parent_key` joins to the level above
/// by normalized name only; see [`AdministrativeUnit::join_key`]. The
/// geometry is shared, so cloning a unit never copies its rings.
#[derive(Debug, Clone, PartialEq)]
pub struct AdministrativeUnit {
    pub level: AdminLevel,
    pub id: Option<String>,
    pub name: String,
    pub key: String,
    pub geometry: Arc<Geometry>,
    pub parent_key: Option<String>,
}

impl AdministrativeUnit {
    pub fn province(id: impl Into<String>, name: impl Into<String>, geometry: Geometry) -> Self {
        let id = id.into();
        Self {
            level: AdminLevel::Province,
            key: id.clone(),
            id: Some(id),
            name: name.into(),
            geometry: Arc::new(geometry),
            parent_key: None,
        }
    }

    /// A province drawn without a code. It is keyed by its trimmed name and
    /// has no regencies to drill into.
    pub fn uncoded_province(name: impl Into<String>, geometry: Geometry) -> Self {
        let name = name.into();
        Self {
            level: AdminLevel::Province,
            id: None,
            key: name.trim().to_string(),
            name,
            geometry: Arc::new(geometry),
            parent_key: None,
        }
    }

    /// Only coded provinces have children; lower levels always do.
    pub fn is_drillable(&self) -> bool {
        self.level != AdminLevel::Province || self.id.is_some()
    }

    pub fn regency(
        name: impl Into<String>,
        parent_key: impl Into<String>,
        geometry: Geometry,
    ) -> Self {
        Self::named(AdminLevel::Regency, name.into(), parent_key.into(), geometry)
    }

    pub fn district(
        name: impl Into<String>,
        parent_key: impl Into<String>,
        geometry: Geometry,
    ) -> Self {
        Self::named(AdminLevel::District, name.into(), parent_key.into(), geometry)
    }

    fn named(level: AdminLevel, name: String, parent_key: String, geometry: Geometry) -> Self {
        Self {
            level,
            id: None,
            key: name.trim().to_string(),
            name,
            geometry: Arc::new(geometry),
            parent_key: Some(parent_key),
        }
    }

    /// Key this unit's children carry as their `parent_key`.
    pub fn join_key(&self) -> String {
        crate::names::normalize_name(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::{AdminLevel, AdministrativeUnit};
    use crate::geometry::Geometry;

    #[test]
    fn levels_are_ordered_and_chain() {
        assert!(AdminLevel::Province < AdminLevel::Regency);
        assert!(AdminLevel::Regency < AdminLevel::District);
        assert_eq!(AdminLevel::Province.parent(), None);
        assert_eq!(AdminLevel::Regency.child(), Some(AdminLevel::District));
        assert_eq!(AdminLevel::District.child(), None);
    }

    #[test]
    fn named_units_key_by_name_and_join_by_normalized_name() {
        let r = AdministrativeUnit::regency(
            "Kota Jakarta Selatan",
            "dki jakarta",
            Geometry::MultiPolygon(vec![]),
        );
        assert_eq!(r.key, "Kota Jakarta Selatan");
        assert_eq!(r.join_key(), "jakarta selatan");
        assert_eq!(r.id, None);

        let p = AdministrativeUnit::province("31", "DKI Jakarta", Geometry::MultiPolygon(vec![]));
        assert_eq!(p.key, "31");
        assert_eq!(p.join_key(), "dki jakarta");
        assert!(p.is_drillable());
    }

    #[test]
    fn uncoded_province_is_keyed_by_name_and_not_drillable() {
        let p = AdministrativeUnit::uncoded_province(
            " Pulau Tanpa Kode ",
            Geometry::MultiPolygon(vec![]),
        );
        assert_eq!(p.key, "Pulau Tanpa Kode");
        assert_eq!(p.id, None);
        assert!(!p.is_drillable());

        let clone = p.clone();
        assert!(std::sync::Arc::ptr_eq(&clone.geometry, &p.geometry));
    }
}
