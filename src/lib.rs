//! Two-color (duotone) rendering of RGBA images, either as a continuous
//! gradient or as a print-like halftone screen.
//!
//! ```no_run
//! use duotoner::{RenderConfig, Texture, render};
//!
//! let image = Texture::from_rgba8_image("photo.jpg")?;
//! let rendered = render(image.as_texture_slice(), &RenderConfig::raster())?;
//! rendered.buffer.write_png("photo-duotone.png")?;
//! # Ok::<(), duotoner::DuotoneError>(())
//! ```

pub mod color_palette;
pub mod config;
pub mod dimensions;
pub mod error;
pub mod halftone;
pub mod pipeline;
pub mod resample;
pub mod texture;
pub mod transform;
pub mod utils;


pub use color_palette::{ColorPair, PaletteKind};
pub use config::{RenderConfig, RenderMode};
pub use dimensions::{MAX_DIMENSION, normalize_dimensions};
pub use error::{DuotoneError, Result};
pub use halftone::params::{LevelParams, RasterParams, RasterStyle};
pub use pipeline::{Rendered, render, render_with};
pub use resample::{Bilinear, Nearest, Resample};
pub use texture::{PixelBuffer, Texture, TextureRef, TextureSlice};

pub mod prelude {
    pub use crate::color_palette::{ColorPair, PaletteKind};
    pub use crate::config::{RenderConfig, RenderMode};
    pub use crate::error::{DuotoneError, Result};
    pub use crate::halftone::prelude::*;
    pub use crate::pipeline::{Rendered, render, render_with};
    pub use crate::resample::{Bilinear, Nearest, Resample};
    pub use crate::texture::prelude::*;
    pub use crate::transform::prelude::*;
    pub use crate::utils::prelude::*;
}
