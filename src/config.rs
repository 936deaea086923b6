use std::{fmt::Display, fs, path::Path, str::FromStr};

use json::{JsonValue, object};

use crate::{
    color_palette::PaletteKind,
    error::{DuotoneError, Result},
    halftone::params::{LevelParams, RasterParams, RasterStyle},
};

/// Continuous gradient or halftone screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Continuous,
    Raster,
}

impl RenderMode {
    pub fn name(&self) -> &'static str {
        match self {
            RenderMode::Continuous => "continuous",
            RenderMode::Raster => "raster",
        }
    }
}

impl FromStr for RenderMode {
    type Err = DuotoneError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "continuous" => Ok(RenderMode::Continuous),
            "raster" => Ok(RenderMode::Raster),
            _ => Err(DuotoneError::Config(format!("unknown mode `{s}`"))),
        }
    }
}

impl Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Full parameter record of one render call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderConfig {
    /// swap shadow and highlight
    pub reversed: bool,
    pub palette: PaletteKind,
    pub mode: RenderMode,
    /// only read in [RenderMode::Raster]
    pub raster: RasterParams,
}

impl RenderConfig {
    /// Raster mode with default raster settings.
    pub fn raster() -> Self {
        Self {
            mode: RenderMode::Raster,
            ..Self::default()
        }
    }

    /// Raster settings are only checked when they are going to be used.
    pub fn validate(&self) -> Result {
        match self.mode {
            RenderMode::Continuous => Ok(()),
            RenderMode::Raster => self.raster.validate(),
        }
    }

    /// Parse a JSON config. Missing keys take their defaults, present keys
    /// must hold a value of the right type.
    pub fn from_json(json_string: &str) -> Result<RenderConfig> {
        let json = json::parse(json_string)?;
        expect_object(&json, "<root>")?;

        let defaults = RenderConfig::default();
        let reversed = match json["reversed"].as_bool() {
            Some(val) => val,
            None if json["reversed"].is_null() => defaults.reversed,
            None => return Err(invalid_key("reversed", "a boolean")),
        };
        let palette = parse_or(&json["palette"], "palette", defaults.palette)?;
        let mode = parse_or(&json["mode"], "mode", defaults.mode)?;

        let raster = &json["raster"];
        expect_object(raster, "raster")?;
        let style = parse_or(&raster["style"], "raster.style", RasterStyle::default())?;
        let base = RasterParams::with_style(style);

        let cell_size = match raster["cell_size"].as_u32() {
            Some(val) => val,
            None if raster["cell_size"].is_null() => base.cell_size,
            None => return Err(invalid_key("raster.cell_size", "a non-negative integer")),
        };
        let brightness = number_or(&raster["brightness"], "raster.brightness", base.brightness)?;
        let contrast = number_or(&raster["contrast"], "raster.contrast", base.contrast)?;

        let levels = &raster["levels"];
        expect_object(levels, "raster.levels")?;
        let preset = base.levels;
        let levels = LevelParams {
            shadows: number_or(&levels["shadows"], "raster.levels.shadows", preset.shadows)?,
            highlights: number_or(
                &levels["highlights"],
                "raster.levels.highlights",
                preset.highlights,
            )?,
            gamma: number_or(&levels["gamma"], "raster.levels.gamma", preset.gamma)?,
            lift_gain: number_or(
                &levels["lift_gain"],
                "raster.levels.lift_gain",
                preset.lift_gain,
            )?,
            lift_offset: number_or(
                &levels["lift_offset"],
                "raster.levels.lift_offset",
                preset.lift_offset,
            )?,
        };

        Ok(RenderConfig {
            reversed,
            palette,
            mode,
            raster: RasterParams {
                cell_size,
                brightness,
                contrast,
                style,
                levels,
            },
        })
    }

    pub fn to_json(&self) -> String {
        let mut data = JsonValue::new_object();

        data["reversed"] = self.reversed.into();
        data["palette"] = self.palette.name().into();
        data["mode"] = self.mode.name().into();
        data["raster"] = self.raster.into();

        data.pretty(2)
    }

    pub fn read_config<P: AsRef<Path>>(path: P) -> Result<RenderConfig> {
        let json_string = fs::read_to_string(path)?;
        RenderConfig::from_json(&json_string)
    }

    pub fn write_config<P: AsRef<Path>>(&self, path: P) -> Result {
        fs::write(path, self.to_json())?;
        Ok(())
    }
}

impl From<RasterParams> for JsonValue {
    fn from(params: RasterParams) -> Self {
        object! {
            cell_size: params.cell_size,
            brightness: number(params.brightness),
            contrast: number(params.contrast),
            style: params.style.name(),
            levels: params.levels
        }
    }
}

impl From<LevelParams> for JsonValue {
    fn from(levels: LevelParams) -> Self {
        object! {
            shadows: number(levels.shadows),
            highlights: number(levels.highlights),
            gamma: number(levels.gamma),
            lift_gain: number(levels.lift_gain),
            lift_offset: number(levels.lift_offset)
        }
    }
}

/// Shortest decimal form, so `1.3f32` is written as `1.3` rather than its
/// widened `f64` expansion.
fn number(value: f32) -> JsonValue {
    value
        .to_string()
        .parse::<f64>()
        .map_or(JsonValue::Null, JsonValue::from)
}

fn invalid_key(key: &str, expected: &str) -> DuotoneError {
    DuotoneError::Config(format!("couldn't parse {key}: expected {expected}"))
}

fn expect_object(value: &JsonValue, key: &str) -> Result {
    if value.is_null() || value.is_object() {
        Ok(())
    } else {
        Err(invalid_key(key, "an object"))
    }
}

fn number_or(value: &JsonValue, key: &str, default: f32) -> Result<f32> {
    match value.as_f32() {
        Some(val) => Ok(val),
        None if value.is_null() => Ok(default),
        None => Err(invalid_key(key, "a number")),
    }
}

fn parse_or<T>(value: &JsonValue, key: &str, default: T) -> Result<T>
where
    T: FromStr<Err = DuotoneError>,
{
    match value.as_str() {
        Some(val) => val
            .parse()
            .map_err(|err| DuotoneError::Config(format!("couldn't parse {key}: {err}"))),
        None if value.is_null() => Ok(default),
        None => Err(invalid_key(key, "a string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        assert_eq!(RenderConfig::from_json("{}").unwrap(), RenderConfig::default());
    }

    #[test]
    fn test_default_survives_json() {
        let config = RenderConfig::default();
        assert_eq!(RenderConfig::from_json(&config.to_json()).unwrap(), config);
    }

    #[test]
    fn test_custom_config_survives_json() {
        let config = RenderConfig {
            reversed: true,
            palette: PaletteKind::Classic,
            mode: RenderMode::Raster,
            raster: RasterParams {
                cell_size: 12,
                brightness: 0.9,
                contrast: 1.7,
                style: RasterStyle::Blocks,
                levels: LevelParams {
                    gamma: 1.2,
                    ..LevelParams::SCREEN_PRINT
                },
            },
        };
        assert_eq!(RenderConfig::from_json(&config.to_json()).unwrap(), config);
    }

    #[test]
    fn test_numbers_are_written_short() {
        let json = RenderConfig::default().to_json();
        assert!(json.contains("\"brightness\": 1.3"), "{json}");
    }

    #[test]
    fn test_style_brings_its_level_preset() {
        let config = RenderConfig::from_json(r#"{"raster": {"style": "blocks"}}"#).unwrap();
        assert_eq!(config.raster.levels, LevelParams::SCREEN_PRINT);

        let config = RenderConfig::from_json(
            r#"{"raster": {"style": "blocks", "levels": {"shadows": 0.1}}}"#,
        )
        .unwrap();
        assert_eq!(config.raster.levels.shadows, 0.1);
        assert_eq!(config.raster.levels.highlights, 0.8);
    }

    #[test]
    fn test_errors_name_the_key() {
        let cases = [
            (r#"{"reversed": "yes"}"#, "reversed"),
            (r#"{"palette": "sepia"}"#, "palette"),
            (r#"{"mode": 3}"#, "mode"),
            (r#"{"raster": {"cell_size": -2}}"#, "raster.cell_size"),
            (r#"{"raster": {"brightness": "high"}}"#, "raster.brightness"),
            (r#"{"raster": {"levels": {"gamma": []}}}"#, "raster.levels.gamma"),
            (r#"{"raster": 8}"#, "raster"),
        ];
        for (json, key) in cases {
            match RenderConfig::from_json(json) {
                Err(DuotoneError::Config(msg)) => assert!(msg.contains(key), "{msg}"),
                other => panic!("{json} gave {other:?}"),
            }
        }
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        assert!(matches!(
            RenderConfig::from_json("{ reversed: "),
            Err(DuotoneError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_validation_is_mode_aware() {
        let mut config = RenderConfig::default();
        config.raster.cell_size = 0;
        assert!(config.validate().is_ok());

        config.mode = RenderMode::Raster;
        assert!(matches!(
            config.validate(),
            Err(DuotoneError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = std::env::temp_dir().join(format!("duotoner-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("render.json");

        let config = RenderConfig::raster();
        config.write_config(&path).unwrap();
        assert_eq!(RenderConfig::read_config(&path).unwrap(), config);

        fs::remove_dir_all(&dir).unwrap();
    }
}
