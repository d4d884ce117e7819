//! Text shown around the region layers: hover tooltips, the level caption
//! and the back-navigation controls.

use foundation::{AdminLevel, AdministrativeUnit};

/// Local name of a level, as used in tooltips.
pub fn level_title(level: AdminLevel) -> &'static str {
    match level {
        AdminLevel::Province => "Provinsi",
        AdminLevel::Regency => "Kabupaten",
        AdminLevel::District => "Kecamatan",
    }
}

/// Caption heading for a level in the breadcrumb.
pub fn level_heading(level: AdminLevel) -> &'static str {
    match level {
        AdminLevel::Province => "Provinsi",
        AdminLevel::Regency => "Kabupaten/Kota",
        AdminLevel::District => "Kecamatan",
    }
}

/// `"Provinsi: DKI Jakarta"`; a unit without a name shows only the title.
pub fn tooltip(unit: &AdministrativeUnit) -> String {
    let title = level_title(unit.level);
    let name = unit.name.trim();
    if name.is_empty() {
        title.to_string()
    } else {
        format!("{title}: {name}")
    }
}

/// Breadcrumb of level headings down to the displayed level.
pub fn level_caption(displayed: AdminLevel) -> String {
    AdminLevel::ALL
        .iter()
        .take(displayed.depth())
        .map(|l| level_heading(*l))
        .collect::<Vec<_>>()
        .join(" → ")
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ControlAction {
    /// Straight back to the province overview.
    BackToProvinces,
    /// Pop one level, back to the regencies of the selected province.
    BackToRegencies,
    /// Pop one level, back to the districts of the selected regency.
    BackToDistricts,
}

impl ControlAction {
    pub fn label(self) -> &'static str {
        match self {
            ControlAction::BackToProvinces => "Back to Provinces",
            ControlAction::BackToRegencies => "Back to Kabupaten",
            ControlAction::BackToDistricts => "Back to Kecamatan",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub caption: String,
    pub actions: Vec<ControlAction>,
}

impl Controls {
    /// Controls for a selection `depth` (0 = nothing selected, 3 = district).
    pub fn for_depth(depth: usize) -> Self {
        let displayed = match depth {
            0 => AdminLevel::Province,
            1 => AdminLevel::Regency,
            _ => AdminLevel::District,
        };
        let actions = match depth {
            0 => Vec::new(),
            1 => vec![ControlAction::BackToProvinces],
            2 => vec![ControlAction::BackToProvinces, ControlAction::BackToRegencies],
            _ => vec![
                ControlAction::BackToProvinces,
                ControlAction::BackToRegencies,
                ControlAction::BackToDistricts,
            ],
        };
        Self {
            caption: level_caption(displayed),
            actions,
        }
    }
}
