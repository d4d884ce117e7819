use std::collections::BTreeMap;

use foundation::admin::AdminLevel;
use foundation::bounds::BoundingBox;
use serde::{Deserialize, Serialize};

/// Camera options forwarded with every fit request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitOptions {
    pub padding_px: u32,
    pub duration_s: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            padding_px: 24,
            duration_s: 0.7,
        }
    }
}

/// Immutable description of where each level's boundary file lives.
///
/// District files are stored one per province under a folder named after
/// the province (`id31_dki_jakarta/id31_dki_jakarta_district.geojson`), so
/// the catalog carries the code → folder table. The table is configuration
/// handed to whoever builds fetch URLs; nothing mutates it at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetCatalog {
    pub base_url: String,
    pub province_file: String,
    pub regency_file: String,
    #[serde(default = "default_district_suffix")]
    pub district_suffix: String,
    pub district_folders: BTreeMap<String, String>,
    /// `[min_lon, min_lat, max_lon, max_lat]` of the whole country.
    pub country_bounds: [f64; 4],
    #[serde(default)]
    pub fit: FitOptions,
}

fn default_district_suffix() -> String {
    "_district.geojson".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    UnknownProvince(String),
    Corrupt(String),
    Invalid(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::UnknownProvince(code) => {
                write!(f, "no district folder for province code {code:?}")
            }
            CatalogError::Corrupt(msg) => write!(f, "catalog JSON corrupt: {msg}"),
            CatalogError::Invalid(msg) => write!(f, "catalog invalid: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

const INDONESIA_FOLDERS: [(&str, &str); 34] = [
    ("11", "id11_aceh"),
    ("12", "id12_sumatera_utara"),
    ("13", "id13_sumatera_barat"),
    ("14", "id14_riau"),
    ("15", "id15_jambi"),
    ("16", "id16_sumatera_selatan"),
    ("17", "id17_bengkulu"),
    ("18", "id18_lampung"),
    ("19", "id19_kepulauan_bangka_belitung"),
    ("21", "id21_kepulauan_riau"),
    ("31", "id31_dki_jakarta"),
    ("32", "id32_jawa_barat"),
    ("33", "id33_jawa_tengah"),
    ("34", "id34_daerah_istimewa_yogyakarta"),
    ("35", "id35_jawa_timur"),
    ("36", "id36_banten"),
    ("51", "id51_bali"),
    ("52", "id52_nusa_tenggara_barat"),
    ("53", "id53_nusa_tenggara_timur"),
    ("61", "id61_kalimantan_barat"),
    ("62", "id62_kalimantan_tengah"),
    ("63", "id63_kalimantan_selatan"),
    ("64", "id64_kalimantan_timur"),
    ("65", "id65_kalimantan_utara"),
    ("71", "id71_sulawesi_utara"),
    ("72", "id72_sulawesi_tengah"),
    ("73", "id73_sulawesi_selatan"),
    ("74", "id74_sulawesi_tenggara"),
    ("75", "id75_gorontalo"),
    ("76", "id76_sulawesi_barat"),
    ("81", "id81_maluku"),
    ("82", "id82_maluku_utara"),
    ("91", "id91_papua_barat"),
    ("94", "id94_papua"),
];

impl DatasetCatalog {
    /// The Indonesian province/regency/district dataset layout.
    pub fn indonesia() -> Self {
        Self {
            base_url: "/data/indonesia-district-master 3".to_string(),
            province_file: "prov 37.geojson".to_string(),
            regency_file: "kab 37.geojson".to_string(),
            district_suffix: default_district_suffix(),
            district_folders: INDONESIA_FOLDERS
                .iter()
                .map(|(code, folder)| (code.to_string(), folder.to_string()))
                .collect(),
            country_bounds: [95.0, -11.0, 141.0, 6.0],
            fit: FitOptions::default(),
        }
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, CatalogError> {
        let catalog: Self =
            serde_json::from_slice(bytes).map_err(|e| CatalogError::Corrupt(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn to_json_pretty(&self) -> Result<String, CatalogError> {
        serde_json::to_string_pretty(self).map_err(|e| CatalogError::Corrupt(e.to_string()))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let [min_lon, min_lat, max_lon, max_lat] = self.country_bounds;
        if !(min_lon <= max_lon && min_lat <= max_lat) {
            return Err(CatalogError::Invalid(format!(
                "country_bounds min exceeds max: {:?}",
                self.country_bounds
            )));
        }
        if !self.fit.duration_s.is_finite() || self.fit.duration_s < 0.0 {
            return Err(CatalogError::Invalid(format!(
                "fit.duration_s must be a non-negative number, got {}",
                self.fit.duration_s
            )));
        }
        Ok(())
    }

    pub fn country_box(&self) -> BoundingBox {
        let [min_lon, min_lat, max_lon, max_lat] = self.country_bounds;
        BoundingBox::new(min_lon, min_lat, max_lon, max_lat)
    }

    pub fn province_url(&self) -> String {
        self.join(&self.province_file)
    }

    pub fn regency_url(&self) -> String {
        self.join(&self.regency_file)
    }

    pub fn district_folder(&self, province_code: &str) -> Option<&str> {
        self.district_folders.get(province_code).map(String::as_str)
    }

    pub fn district_url(&self, province_code: &str) -> Result<String, CatalogError> {
        let folder = self
            .district_folder(province_code)
            .ok_or_else(|| CatalogError::UnknownProvince(province_code.to_string()))?;
        Ok(self.join(&format!("{folder}/{folder}{}", self.district_suffix)))
    }

    /// URL of the file holding the units *displayed* at `level`.
    ///
    /// Districts need the province code to pick their folder.
    pub fn url_for(
        &self,
        level: AdminLevel,
        province_code: Option<&str>,
    ) -> Result<String, CatalogError> {
        match level {
            AdminLevel::Province => Ok(self.province_url()),
            AdminLevel::Regency => Ok(self.regency_url()),
            AdminLevel::District => {
                let code =
                    province_code.ok_or_else(|| CatalogError::UnknownProvince(String::new()))?;
                self.district_url(code)
            }
        }
    }

    fn join(&self, path: &str) -> String {
        if self.base_url.is_empty() {
            return path.to_string();
        }
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Default for DatasetCatalog {
    fn default() -> Self {
        Self::indonesia()
    }
}
