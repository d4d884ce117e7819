/// Administrative prefixes stripped by [`normalize_name`], longest first so
/// "kota administrasi" wins over "kota".
const ADMIN_PREFIXES: [&str; 5] = ["kota administrasi", "kabupaten", "kota", "kab.", "kab"];

/// Canonical join key for a region name.
///
/// Datasets disagree on capitalization and on whether the administrative
/// prefix is present, so "Kabupaten Bogor" and "Kota Bogor" both map to
/// "bogor". Only one leading prefix is removed and it must be followed by
/// whitespace ("Kotabaru" stays intact).
pub fn normalize_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    for prefix in ADMIN_PREFIXES {
        if let Some(rest) = lowered.strip_prefix(prefix)
            && rest.starts_with(char::is_whitespace)
        {
            return rest.trim().to_string();
        }
    }
    lowered
}
