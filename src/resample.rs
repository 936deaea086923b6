use image::{ImageBuffer, Rgba, imageops};

use crate::{
    error::{DuotoneError, Result},
    texture::{RGBA_PLANES, Texture, TextureRef, TextureSlice},
    transform::strategy::Strategy,
};

/// Rescales an RGBA8 image to exact target dimensions.
pub trait Resample {
    fn resample(&self, image: TextureSlice<'_, u8>, width: u32, height: u32)
    -> Result<Texture<u8>>;

    fn name(&self) -> &'static str;
}

/// Pixel-center nearest neighbour. Never blends, so the output only holds
/// colors that were present in the source.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nearest;

impl Resample for Nearest {
    fn resample(
        &self,
        image: TextureSlice<'_, u8>,
        width: u32,
        height: u32,
    ) -> Result<Texture<u8>> {
        check_rgba(&image)?;
        let (src_width, src_height) = image.shape_2d();
        let (dst_width, dst_height) = (width as usize, height as usize);
        let planes = RGBA_PLANES as usize;

        let source = |dst: usize, dst_len: usize, src_len: usize| {
            (((dst as f64 + 0.5) * src_len as f64 / dst_len as f64) as usize).min(src_len - 1)
        };

        let src = image.as_ref();
        let mut output = Texture::<u8>::new(width, height, RGBA_PLANES);
        Strategy::auto((dst_width, dst_height)).for_each_row(
            output.as_mut(),
            dst_width * planes,
            |y, out_row| {
                let sy = source(y, dst_height, src_height);
                let src_row = &src[sy * src_width * planes..(sy + 1) * src_width * planes];
                for (x, pixel) in out_row.chunks_exact_mut(planes).enumerate() {
                    let sx = source(x, dst_width, src_width) * planes;
                    pixel.copy_from_slice(&src_row[sx..sx + planes]);
                }
            },
        );
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "nearest"
    }
}

/// Bilinear (triangle filter) resampling through `image::imageops`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bilinear;

impl Resample for Bilinear {
    fn resample(
        &self,
        image: TextureSlice<'_, u8>,
        width: u32,
        height: u32,
    ) -> Result<Texture<u8>> {
        check_rgba(&image)?;
        let view = ImageBuffer::<Rgba<u8>, &[u8]>::from_raw(
            image.width(),
            image.height(),
            image.as_ref(),
        )
        .ok_or_else(|| DuotoneError::InvalidInput("buffer does not fit its shape".to_owned()))?;

        let resized = imageops::resize(&view, width, height, imageops::FilterType::Triangle);
        Ok(Texture::from(resized))
    }

    fn name(&self) -> &'static str {
        "bilinear"
    }
}

fn check_rgba(image: &TextureSlice<'_, u8>) -> Result {
    if image.planes() != RGBA_PLANES || !image.is_consistent() {
        return Err(DuotoneError::InvalidInput(format!(
            "resampling needs a consistent RGBA8 buffer, got {:?} with {} samples",
            image.shape(),
            image.as_ref().len()
        )));
    }
    if image.width() == 0 || image.height() == 0 {
        return Err(DuotoneError::InvalidInput(
            "cannot resample an empty image".to_owned(),
        ));
    }
    Ok(())
}
