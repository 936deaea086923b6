use std::{f32::consts::FRAC_PI_4, fmt::Display, str::FromStr};

use crate::error::{DuotoneError, Result};

pub const DEFAULT_CELL_SIZE: u32 = 8;
pub const DEFAULT_BRIGHTNESS: f32 = 1.3;
pub const DEFAULT_CONTRAST: f32 = 1.0;

/// Fixed tone shaping applied after brightness and contrast.
///
/// The defaults are tuned by eye; [LevelParams::PROFESSIONAL] reproduces
/// the reference look exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelParams {
    /// values at or below this clip to black
    pub shadows: f32,
    /// values at or above this clip to white
    pub highlights: f32,
    /// applied as `v^(1/gamma)`
    pub gamma: f32,
    pub lift_gain: f32,
    pub lift_offset: f32,
}

impl LevelParams {
    pub const PROFESSIONAL: LevelParams = LevelParams {
        shadows: 0.05,
        highlights: 0.95,
        gamma: 0.8,
        lift_gain: 1.1,
        lift_offset: 0.05,
    };

    /// Harder clip of the solid-block screen print look.
    pub const SCREEN_PRINT: LevelParams = LevelParams {
        shadows: 0.2,
        highlights: 0.8,
        ..LevelParams::PROFESSIONAL
    };

    pub fn validate(&self) -> Result {
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        if !in_unit(self.shadows) || !in_unit(self.highlights) {
            return Err(DuotoneError::invalid_parameter(
                "levels.shadows/highlights",
                format!(
                    "clip points must lie in [0, 1], got {} / {}",
                    self.shadows, self.highlights
                ),
            ));
        }
        if self.highlights <= self.shadows {
            return Err(DuotoneError::invalid_parameter(
                "levels.highlights",
                format!(
                    "must be above shadows ({}), got {}",
                    self.shadows, self.highlights
                ),
            ));
        }
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(DuotoneError::invalid_parameter(
                "levels.gamma",
                format!("must be a positive number, got {}", self.gamma),
            ));
        }
        if !self.lift_gain.is_finite() || !self.lift_offset.is_finite() {
            return Err(DuotoneError::invalid_parameter(
                "levels.lift",
                "gain and offset must be finite",
            ));
        }
        Ok(())
    }
}

impl Default for LevelParams {
    fn default() -> Self {
        LevelParams::PROFESSIONAL
    }
}

/// Shape of a single halftone mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotShape {
    /// Euclidean disk.
    Round,
    /// Axis aligned square (in screen space).
    Square,
}

impl DotShape {
    /// Distance from a mark's center under this shape's metric.
    #[inline(always)]
    pub fn distance(self, dx: f32, dy: f32) -> f32 {
        match self {
            DotShape::Round => (dx * dx + dy * dy).sqrt(),
            DotShape::Square => dx.abs().max(dy.abs()),
        }
    }
}

/// Screen layout derived from a [RasterStyle].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenGeometry {
    /// screen rotation in radians
    pub angle: f32,
    pub dot: DotShape,
    /// merge neighbouring dots into contiguous ink regions
    pub join: bool,
}

/// Halftone variants. All share one code path and only differ in
/// [ScreenGeometry] and default [LevelParams].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterStyle {
    /// 45° round dots fused by the join pass.
    #[default]
    Joined,
    /// 45° round dots.
    Rotated,
    /// Axis aligned round dots.
    Dots,
    /// Axis aligned solid squares with a hard level clip.
    Blocks,
}

impl RasterStyle {
    pub const ALL: [RasterStyle; 4] = [
        RasterStyle::Joined,
        RasterStyle::Rotated,
        RasterStyle::Dots,
        RasterStyle::Blocks,
    ];

    pub fn geometry(self) -> ScreenGeometry {
        match self {
            RasterStyle::Joined => ScreenGeometry {
                angle: FRAC_PI_4,
                dot: DotShape::Round,
                join: true,
            },
            RasterStyle::Rotated => ScreenGeometry {
                angle: FRAC_PI_4,
                dot: DotShape::Round,
                join: false,
            },
            RasterStyle::Dots => ScreenGeometry {
                angle: 0.0,
                dot: DotShape::Round,
                join: false,
            },
            RasterStyle::Blocks => ScreenGeometry {
                angle: 0.0,
                dot: DotShape::Square,
                join: false,
            },
        }
    }

    pub fn levels(self) -> LevelParams {
        match self {
            RasterStyle::Blocks => LevelParams::SCREEN_PRINT,
            _ => LevelParams::PROFESSIONAL,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RasterStyle::Joined => "joined",
            RasterStyle::Rotated => "rotated",
            RasterStyle::Dots => "dots",
            RasterStyle::Blocks => "blocks",
        }
    }
}

impl FromStr for RasterStyle {
    type Err = DuotoneError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        RasterStyle::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| DuotoneError::Config(format!("unknown raster style `{s}`")))
    }
}

impl Display for RasterStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Caller tunable raster settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterParams {
    /// screen pitch in pixels
    pub cell_size: u32,
    /// gain applied before the contrast curve
    pub brightness: f32,
    /// applied as `v^(1/contrast)` after the contrast curve
    pub contrast: f32,
    pub style: RasterStyle,
    pub levels: LevelParams,
}

impl Default for RasterParams {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            brightness: DEFAULT_BRIGHTNESS,
            contrast: DEFAULT_CONTRAST,
            style: RasterStyle::default(),
            levels: LevelParams::default(),
        }
    }
}

impl RasterParams {
    /// Defaults for `style`, including its level preset.
    pub fn with_style(style: RasterStyle) -> Self {
        Self {
            style,
            levels: style.levels(),
            ..Self::default()
        }
    }

    /// Reject anything that would divide by zero or produce NaN later on.
    pub fn validate(&self) -> Result {
        if self.cell_size == 0 {
            return Err(DuotoneError::invalid_parameter(
                "raster.cell_size",
                "must be at least 1",
            ));
        }
        if !self.brightness.is_finite() || self.brightness <= 0.0 {
            return Err(DuotoneError::invalid_parameter(
                "raster.brightness",
                format!("must be a positive number, got {}", self.brightness),
            ));
        }
        if !self.contrast.is_finite() || self.contrast <= 0.0 {
            return Err(DuotoneError::invalid_parameter(
                "raster.contrast",
                format!("must be a positive number, got {}", self.contrast),
            ));
        }
        self.levels.validate()
    }
}

/// Neighbourhood of the join pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoinParams {
    /// window is `(2 * half_width + 1)` pixels on each side
    pub half_width: usize,
    /// a pixel turns on when strictly more than this share of its window is on
    pub fraction: f32,
}

impl JoinParams {
    pub const FRACTION: f32 = 0.3;

    pub fn for_cell(cell_size: u32) -> Self {
        Self {
            half_width: (cell_size as usize / 4).max(1),
            fraction: Self::FRACTION,
        }
    }
}
