use crate::rng::hash32;

/// Scores at or above this value use the "high" colour.
pub const SCORE_THRESHOLD: u8 = 60;

/// Placeholder score in `[20, 95]` derived from a key.
///
/// Drives the two-colour region scale only; it is not real data.
pub fn dummy_score(key: &str) -> u8 {
    let raw = hash32(key) % 76 + 20;
    raw.clamp(0, 100) as u8
}
