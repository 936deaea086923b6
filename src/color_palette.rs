use std::{fmt::Display, str::FromStr};

use crate::{error::DuotoneError, utils::pixel::Rgb};

/// Shadow and highlight ink of a duotone rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    /// painted where the image is darkest
    pub shadow: Rgb,
    /// painted where the image is brightest
    pub highlight: Rgb,
}

impl ColorPair {
    pub const fn new(shadow: Rgb, highlight: Rgb) -> Self {
        Self { shadow, highlight }
    }

    /// Swap shadow and highlight.
    pub const fn reversed(self) -> Self {
        Self {
            shadow: self.highlight,
            highlight: self.shadow,
        }
    }
}

/// Navy `#1B2A6B` on amber `#FFC20A`.
///
/// Both ends sit on the blue-yellow axis, which protanopia and deuteranopia
/// leave intact, so the pair stays apart where red/green pairs such as
/// [CLASSIC] collapse. Amber's luminance is over four times the navy's, so
/// the ends also separate in grayscale.
pub const OPTIMIZED: ColorPair = ColorPair::new(Rgb::new(27, 42, 107), Rgb::new(255, 194, 10));

/// Deep green on pink.
pub const CLASSIC: ColorPair = ColorPair::new(Rgb::new(22, 80, 39), Rgb::new(249, 159, 210));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteKind {
    #[default]
    Optimized,
    Classic,
}

impl PaletteKind {
    pub const fn colors(self) -> ColorPair {
        match self {
            PaletteKind::Optimized => OPTIMIZED,
            PaletteKind::Classic => CLASSIC,
        }
    }

    /// Palette colors, swapped when `reversed` is set.
    pub const fn pair(self, reversed: bool) -> ColorPair {
        let colors = self.colors();
        if reversed { colors.reversed() } else { colors }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PaletteKind::Optimized => "optimized",
            PaletteKind::Classic => "classic",
        }
    }
}

impl FromStr for PaletteKind {
    type Err = DuotoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "optimized" => Ok(PaletteKind::Optimized),
            "classic" => Ok(PaletteKind::Classic),
            other => Err(DuotoneError::Config(format!("unknown palette `{other}`"))),
        }
    }
}

impl Display for PaletteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversed_swaps_colors() {
        let pair = PaletteKind::Classic.pair(true);
        assert_eq!(pair.shadow, CLASSIC.highlight);
        assert_eq!(pair.highlight, CLASSIC.shadow);
        assert_eq!(PaletteKind::Classic.pair(false), CLASSIC);
    }

    #[test]
    fn test_palette_names_parse_back() {
        for kind in [PaletteKind::Optimized, PaletteKind::Classic] {
            assert_eq!(kind.name().parse::<PaletteKind>().unwrap(), kind);
        }
        assert!("sepia".parse::<PaletteKind>().is_err());
    }

    #[test]
    fn test_shadow_is_darker_than_highlight() {
        for pair in [OPTIMIZED, CLASSIC] {
            assert!(pair.shadow.luminance() < pair.highlight.luminance());
        }
    }

    #[test]
    fn test_optimized_pair_splits_on_blue_yellow_axis() {
        let (navy, amber) = (OPTIMIZED.shadow, OPTIMIZED.highlight);
        assert!(navy.b > navy.r && navy.b > navy.g);
        assert!(amber.r > amber.b && amber.g > amber.b);
        assert!(amber.luminance() > 4.0 * navy.luminance());
    }
}
