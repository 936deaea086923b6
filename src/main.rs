use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use duotoner::{PaletteKind, RasterStyle, RenderConfig, RenderMode, Texture, TextureRef, render};

#[derive(Parser)]
#[command(name = "duotoner")]
#[command(about = "Render an image in two colors, as a gradient or a halftone screen")]
struct Cli {
    /// Input image, any format the `image` crate decodes
    input: PathBuf,

    /// Output PNG path
    output: PathBuf,

    /// JSON render configuration; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Halftone screen instead of a continuous gradient
    #[arg(long)]
    raster: bool,

    /// Swap shadow and highlight colors
    #[arg(long)]
    reversed: bool,

    /// Color pair: "optimized" or "classic"
    #[arg(long)]
    palette: Option<PaletteKind>,

    /// Screen pitch in pixels
    #[arg(long)]
    cell_size: Option<u32>,

    #[arg(long)]
    brightness: Option<f32>,

    #[arg(long)]
    contrast: Option<f32>,

    /// Halftone style: "joined", "rotated", "dots" or "blocks" (resets the levels to its preset)
    #[arg(long)]
    style: Option<RasterStyle>,
}

impl Cli {
    fn render_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::read_config(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => RenderConfig::default(),
        };

        if self.raster {
            config.mode = RenderMode::Raster;
        }
        if self.reversed {
            config.reversed = true;
        }
        if let Some(palette) = self.palette {
            config.palette = palette;
        }
        if let Some(style) = self.style {
            config.raster.style = style;
            config.raster.levels = style.levels();
        }
        if let Some(cell_size) = self.cell_size {
            config.raster.cell_size = cell_size;
        }
        if let Some(brightness) = self.brightness {
            config.raster.brightness = brightness;
        }
        if let Some(contrast) = self.contrast {
            config.raster.contrast = contrast;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.render_config()?;

    let image = Texture::from_rgba8_image(&cli.input)
        .with_context(|| format!("decoding {}", cli.input.display()))?;
    log::info!(
        "{}: {}x{}, {} mode",
        cli.input.display(),
        image.width(),
        image.height(),
        config.mode
    );

    let rendered = render(image.as_texture_slice(), &config)?;
    rendered
        .buffer
        .write_png(&cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    log::info!(
        "wrote {} ({}x{})",
        cli.output.display(),
        rendered.width,
        rendered.height
    );
    Ok(())
}
