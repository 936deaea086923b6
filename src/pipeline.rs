use crate::{
    config::{RenderConfig, RenderMode},
    dimensions::normalize_dimensions,
    error::{DuotoneError, Result},
    halftone::HalftoneRenderer,
    resample::{Bilinear, Resample},
    texture::{PixelBuffer, RGBA_PLANES, Texture, TextureRef, TextureSlice},
    transform::{
        duotone::DuotoneTransform, luminance::LuminanceAnalyzer, strategy::Strategy,
        traits::TextureTransform,
    },
};

/// Result of one render call.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    /// RGBA8, `width * height * 4` samples
    pub buffer: PixelBuffer,
    pub width: u32,
    pub height: u32,
}

impl Rendered {
    fn new(buffer: PixelBuffer) -> Self {
        Self {
            width: buffer.width(),
            height: buffer.height(),
            buffer,
        }
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buffer.into_vec()
    }
}

/// Render `image` with the bilinear resampler.
pub fn render(image: TextureSlice<'_, u8>, config: &RenderConfig) -> Result<Rendered> {
    render_with(image, config, &Bilinear)
}

/// Render `image`, rescaling through `resampler` when it exceeds the
/// dimension bound.
///
/// Input and parameters are fully validated before any pixel is read.
pub fn render_with<R>(
    image: TextureSlice<'_, u8>,
    config: &RenderConfig,
    resampler: &R,
) -> Result<Rendered>
where
    R: Resample + ?Sized,
{
    validate_image(&image)?;
    config.validate()?;

    let (width, height) = normalize_dimensions(image.width(), image.height());
    let resampled;
    let source = if (width, height) != (image.width(), image.height()) {
        log::debug!(
            "resampling {}x{} -> {}x{} ({})",
            image.width(),
            image.height(),
            width,
            height,
            resampler.name()
        );
        resampled = resampler.resample(image, width, height)?;
        resampled.as_texture_slice()
    } else {
        image
    };

    let strategy = Strategy::auto(source.shape_2d());
    let field = LuminanceAnalyzer::new(strategy).analyze(source);
    let colors = config.palette.pair(config.reversed);

    log::debug!(
        "rendering {}x{} mode {} palette {}{}",
        width,
        height,
        config.mode,
        config.palette,
        if config.reversed { " (reversed)" } else { "" }
    );

    let buffer = match config.mode {
        RenderMode::Continuous => {
            let mut output = Texture::<u8>::new(width, height, RGBA_PLANES);
            DuotoneTransform::new(colors, field.range(), strategy)
                .once(source, output.as_texture_mut_slice());
            output
        }
        RenderMode::Raster => HalftoneRenderer::new(config.raster, colors, strategy)?.render(&field),
    };

    Ok(Rendered::new(buffer))
}

fn validate_image(image: &TextureSlice<'_, u8>) -> Result {
    if image.width() == 0 || image.height() == 0 {
        return Err(DuotoneError::InvalidInput(format!(
            "image has zero area ({}x{})",
            image.width(),
            image.height()
        )));
    }
    if image.planes() != RGBA_PLANES {
        return Err(DuotoneError::InvalidInput(format!(
            "expected RGBA8 input, got {} planes",
            image.planes()
        )));
    }
    if !image.is_consistent() {
        return Err(DuotoneError::InvalidInput(format!(
            "buffer holds {} samples, {}x{} RGBA needs {}",
            image.as_ref().len(),
            image.width(),
            image.height(),
            image.width() as usize * image.height() as usize * RGBA_PLANES as usize
        )));
    }
    Ok(())
}
