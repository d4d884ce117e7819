//! Normalizes per-level boundary files into [`AdministrativeUnit`] values.
//!
//! The three datasets were produced independently and only agree on names:
//!
//! - provinces: `prov_id` + `prov_name` (or `name`)
//! - regencies: `name` + `prov_id` of the owning province
//! - districts: `district` (or `name`) + `regency` (or `kabupaten`) naming the parent
//!
//! Every level is dissolved by its key so each name maps to exactly one
//! clickable region. Unknown property keys are ignored.

use foundation::admin::{AdminLevel, AdministrativeUnit};
use foundation::names::normalize_name;

use crate::dissolve::dissolve_by_key;
use crate::feature::{Feature, FeatureCollection};

pub const PROVINCE_ID_KEYS: [&str; 1] = ["prov_id"];
pub const PROVINCE_NAME_KEYS: [&str; 2] = ["prov_name", "name"];
pub const REGENCY_NAME_KEYS: [&str; 1] = ["name"];
pub const DISTRICT_NAME_KEYS: [&str; 2] = ["district", "name"];
pub const DISTRICT_PARENT_KEYS: [&str; 2] = ["regency", "kabupaten"];

/// Province units, dissolved by code.
///
/// Features without a province code cannot be joined to their regencies.
/// They stay on the map as uncoded units dissolved by name; features with
/// neither a code nor a name are skipped.
pub fn provinces(collection: &FeatureCollection) -> Vec<AdministrativeUnit> {
    let (coded, uncoded): (Vec<Feature>, Vec<Feature>) = collection
        .features
        .iter()
        .cloned()
        .partition(|f| f.prop_str(&PROVINCE_ID_KEYS).is_some());

    let coded = dissolve_by_key(
        &coded,
        |f| f.prop_str(&PROVINCE_ID_KEYS).unwrap_or_default(),
        PROVINCE_ID_KEYS[0],
    )
    .into_iter()
    .filter_map(|f| {
        let id = f.prop_str(&PROVINCE_ID_KEYS)?;
        let name = f.prop_str(&PROVINCE_NAME_KEYS).unwrap_or_default();
        Some(AdministrativeUnit::province(id, name, f.geometry))
    });

    let named: Vec<Feature> = uncoded
        .into_iter()
        .filter(|f| f.prop_str(&PROVINCE_NAME_KEYS).is_some())
        .collect();
    let uncoded = dissolve_by_key(
        &named,
        |f| f.prop_str(&PROVINCE_NAME_KEYS).unwrap_or_default(),
        PROVINCE_NAME_KEYS[0],
    )
    .into_iter()
    .filter_map(|f| {
        let name = f.prop_str(&PROVINCE_NAME_KEYS)?;
        Some(AdministrativeUnit::uncoded_province(name, f.geometry))
    });

    coded.chain(uncoded).collect()
}

/// Regencies whose `prov_id` equals the province's code.
///
/// The returned units carry the province's normalized name as parent key.
/// A province without a code has no regencies.
pub fn regencies_of(
    collection: &FeatureCollection,
    province: &AdministrativeUnit,
) -> Vec<AdministrativeUnit> {
    let Some(prov_id) = province.id.as_deref() else {
        return Vec::new();
    };
    let members: Vec<Feature> = collection
        .features
        .iter()
        .filter(|f| f.prop_str(&PROVINCE_ID_KEYS).as_deref() == Some(prov_id))
        .filter(|f| f.prop_str(&REGENCY_NAME_KEYS).is_some())
        .cloned()
        .collect();
    let parent_key = province.join_key();
    dissolve_by_key(
        &members,
        |f| f.prop_str(&REGENCY_NAME_KEYS).unwrap_or_default(),
        REGENCY_NAME_KEYS[0],
    )
    .into_iter()
    .filter_map(|f| {
        let name = f.prop_str(&REGENCY_NAME_KEYS)?;
        Some(AdministrativeUnit::regency(name, parent_key.clone(), f.geometry))
    })
    .collect()
}

/// Districts whose normalized parent name equals the regency's join key,
/// dissolved by district name.
pub fn districts_of(
    collection: &FeatureCollection,
    regency: &AdministrativeUnit,
) -> Vec<AdministrativeUnit> {
    let target = regency.join_key();
    let members: Vec<Feature> = collection
        .features
        .iter()
        .filter(|f| {
            f.prop_str(&DISTRICT_PARENT_KEYS)
                .is_some_and(|parent| normalize_name(&parent) == target)
        })
        .filter(|f| f.prop_str(&DISTRICT_NAME_KEYS).is_some())
        .cloned()
        .collect();
    dissolve_by_key(
        &members,
        |f| f.prop_str(&DISTRICT_NAME_KEYS).unwrap_or_default(),
        DISTRICT_NAME_KEYS[0],
    )
    .into_iter()
    .filter_map(|f| {
        let name = f.prop_str(&DISTRICT_NAME_KEYS)?;
        Some(AdministrativeUnit::district(name, target.clone(), f.geometry))
    })
    .collect()
}

/// Score key for a unit: `prov:<code>`, `kab:<normalized>`, `kec:<normalized>`.
pub fn score_key(unit: &AdministrativeUnit) -> String {
    match unit.level {
        AdminLevel::Province => format!("prov:{}", unit.key),
        AdminLevel::Regency => format!("kab:{}", unit.join_key()),
        AdminLevel::District => format!("kec:{}", unit.join_key()),
    }
}
