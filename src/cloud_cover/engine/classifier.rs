//! Per-pixel sky/cloud classification.
//!
//! Clear sky scatters blue light more strongly than red, giving a low red/blue
//! ratio, while cloud is spectrally flat with a ratio close to 1.

use crate::cloud_cover::raster::types::Color;

/// Red/blue ratio at or above which an included pixel is cloud.
pub const CLOUD_RATIO_THRESHOLD: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Outside the mask's region of interest
    Excluded,
    Sky,
    Cloud,
}

/// A mask sample includes its pixel only when it is exactly opaque white.
pub fn is_included(mask: Color) -> bool {
    mask == Color::OPAQUE_WHITE
}

/// Red over blue, or `None` when blue is zero.
pub fn red_blue_ratio(sample: Color) -> Option<f64> {
    if sample.b == 0 {
        None
    } else {
        Some(sample.r as f64 / sample.b as f64)
    }
}

pub fn classify(mask: Color, source: Color) -> Classification {
    if !is_included(mask) {
        return Classification::Excluded;
    }
    match red_blue_ratio(source) {
        Some(ratio) if ratio < CLOUD_RATIO_THRESHOLD => Classification::Sky,
        // A sample without blue cannot be sky.
        _ => Classification::Cloud,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(r: u16, b: u16) -> Color {
        Color::new(r, 0, b, 0xffff)
    }

    #[test]
    fn test_only_opaque_white_is_included() {
        let source = opaque(0xffff, 0xffff);

        assert_eq!(classify(Color::OPAQUE_BLACK, source), Classification::Excluded);
        assert_eq!(classify(Color::TRANSPARENT, source), Classification::Excluded);
        assert_eq!(
            classify(Color::new(0xffff, 0xffff, 0xffff, 0xfffe), source),
            Classification::Excluded
        );
        assert_eq!(
            classify(Color::new(0xfefe, 0xffff, 0xffff, 0xffff), source),
            Classification::Excluded
        );
        assert_eq!(classify(Color::OPAQUE_WHITE, source), Classification::Cloud);
    }

    #[test]
    fn test_ratio_exactly_at_threshold_is_cloud() {
        assert_eq!(red_blue_ratio(opaque(19, 20)), Some(0.95));
        assert_eq!(classify(Color::OPAQUE_WHITE, opaque(19, 20)), Classification::Cloud);
        assert_eq!(classify(Color::OPAQUE_WHITE, opaque(1900, 2000)), Classification::Cloud);
    }

    #[test]
    fn test_ratio_just_below_threshold_is_sky() {
        assert_eq!(classify(Color::OPAQUE_WHITE, opaque(18999, 20000)), Classification::Sky);
        assert_eq!(classify(Color::OPAQUE_WHITE, opaque(0, 0xffff)), Classification::Sky);
    }

    #[test]
    fn test_zero_blue_is_cloud() {
        assert_eq!(red_blue_ratio(opaque(0xffff, 0)), None);
        assert_eq!(classify(Color::OPAQUE_WHITE, opaque(0xffff, 0)), Classification::Cloud);
        assert_eq!(classify(Color::OPAQUE_WHITE, Color::OPAQUE_BLACK), Classification::Cloud);
    }

    #[test]
    fn test_bright_red_is_cloud() {
        assert_eq!(classify(Color::OPAQUE_WHITE, opaque(0xffff, 0x1000)), Classification::Cloud);
    }
}
