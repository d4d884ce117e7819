use compute::SCORE_THRESHOLD;
use foundation::AdminLevel;

pub const STROKE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const STROKE_WEIGHT: f32 = 1.0;
pub const HOVER_STROKE_WEIGHT: f32 = 2.5;
pub const FOCUS_STROKE_WEIGHT: f32 = 3.0;

/// Fill for scores at or above [`SCORE_THRESHOLD`].
pub const HIGH_SCORE_FILL: [f32; 3] = [0.18, 0.49, 0.20];
/// Fill for scores below [`SCORE_THRESHOLD`].
pub const LOW_SCORE_FILL: [f32; 3] = [0.78, 0.16, 0.16];

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RegionStyle {
    pub stroke: [f32; 4],
    pub stroke_weight: f32,
    /// RGBA; alpha is the fill opacity.
    pub fill: [f32; 4],
}

/// How a region is currently being interacted with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Emphasis {
    #[default]
    Normal,
    Hovered,
    Focused,
}

/// Fill opacity per level: deeper levels sit lighter over the base map.
pub fn fill_opacity(level: AdminLevel, emphasis: Emphasis) -> f32 {
    let (base, hover) = match level {
        AdminLevel::Province => (0.3, 0.4),
        AdminLevel::Regency => (0.25, 0.35),
        AdminLevel::District => (0.2, 0.3),
    };
    match emphasis {
        Emphasis::Normal => base,
        Emphasis::Hovered | Emphasis::Focused => hover,
    }
}

pub fn score_fill(score: u8) -> [f32; 3] {
    if score >= SCORE_THRESHOLD {
        HIGH_SCORE_FILL
    } else {
        LOW_SCORE_FILL
    }
}

pub fn region_style(level: AdminLevel, score: u8, emphasis: Emphasis) -> RegionStyle {
    let [r, g, b] = score_fill(score);
    let stroke_weight = match emphasis {
        Emphasis::Normal => STROKE_WEIGHT,
        Emphasis::Hovered => HOVER_STROKE_WEIGHT,
        Emphasis::Focused => FOCUS_STROKE_WEIGHT,
    };
    RegionStyle {
        stroke: STROKE_COLOR,
        stroke_weight,
        fill: [r, g, b, fill_opacity(level, emphasis)],
    }
}

/// `#rrggbb` for an RGB triple in `[0, 1]`.
pub fn to_hex(rgb: [f32; 3]) -> String {
    let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02x}{:02x}{:02x}", c(rgb[0]), c(rgb[1]), c(rgb[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_colour_scale_splits_at_threshold() {
        assert_eq!(score_fill(SCORE_THRESHOLD), HIGH_SCORE_FILL);
        assert_eq!(score_fill(SCORE_THRESHOLD - 1), LOW_SCORE_FILL);
        assert_eq!(score_fill(95), HIGH_SCORE_FILL);
        assert_eq!(score_fill(20), LOW_SCORE_FILL);
    }

    #[test]
    fn hover_thickens_stroke_and_raises_opacity() {
        let normal = region_style(AdminLevel::Regency, 70, Emphasis::Normal);
        let hover = region_style(AdminLevel::Regency, 70, Emphasis::Hovered);
        assert_eq!(normal.stroke_weight, 1.0);
        assert_eq!(hover.stroke_weight, 2.5);
        assert_eq!(normal.fill[3], 0.25);
        assert_eq!(hover.fill[3], 0.35);
        assert_eq!(normal.stroke, STROKE_COLOR);
    }

    #[test]
    fn deeper_levels_are_lighter() {
        let p = fill_opacity(AdminLevel::Province, Emphasis::Normal);
        let r = fill_opacity(AdminLevel::Regency, Emphasis::Normal);
        let d = fill_opacity(AdminLevel::District, Emphasis::Normal);
        assert!(p > r && r > d);
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(to_hex([1.0, 1.0, 1.0]), "#ffffff");
        assert_eq!(to_hex([0.0, 0.5, 2.0]), "#0080ff");
    }
}
