use image::{
    ExtendedColorType, ImageEncoder,
    codecs::png::{CompressionType, FilterType, PngEncoder},
};
use std::path::Path;

use crate::error::{DuotoneError, Result};

/// (width, height, planes)
pub type Shape = (usize, usize, usize);
/// (width, height)
pub type Shape2D = (usize, usize);

/// Interleaved channels per pixel in an RGBA8 buffer.
pub const RGBA_PLANES: u32 = 4;

/// Trait defining ops available on Textures with
/// lendable inner buffer
pub trait TextureRef: AsRef<[Self::Inner]> {
    type Inner;

    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn planes(&self) -> u32;

    #[inline]
    fn shape(&self) -> Shape {
        (
            self.width() as usize,
            self.height() as usize,
            self.planes() as usize,
        )
    }

    #[inline]
    fn shape_2d(&self) -> Shape2D {
        (self.width() as usize, self.height() as usize)
    }

    /// Samples in one row, all planes included.
    #[inline]
    fn row_len(&self) -> usize {
        self.width() as usize * self.planes() as usize
    }
}

/// Trait defining ops available on mutable
/// Textures
pub trait TextureMut: TextureRef + AsMut<[Self::Inner]> {}

/// Texture with owned buffer.
///
/// Samples are stored row-major, top-to-bottom, with `planes` interleaved
/// values per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture<T> {
    width: u32,
    height: u32,
    planes: u32,
    buffer: Vec<T>,
}

/// An RGBA8 image, the engine's input and output format.
pub type PixelBuffer = Texture<u8>;

impl<T> AsRef<[T]> for Texture<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.buffer
    }
}

impl<T> AsMut<[T]> for Texture<T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.buffer
    }
}

impl<T> TextureRef for Texture<T> {
    type Inner = T;

    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn planes(&self) -> u32 {
        self.planes
    }
}

impl<T> TextureMut for Texture<T> {}

impl<T> Texture<T> {
    /// Wrap an owned buffer, checking it holds exactly `width * height * planes` samples.
    pub fn from_vec(width: u32, height: u32, planes: u32, buffer: Vec<T>) -> Result<Self> {
        let expected = sample_count(width, height, planes);
        if buffer.len() != expected {
            return Err(DuotoneError::InvalidInput(format!(
                "buffer holds {} samples, {}x{}x{} needs {}",
                buffer.len(),
                width,
                height,
                planes,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            planes,
            buffer,
        })
    }

    pub fn as_texture_slice<'s>(&'s self) -> TextureSlice<'s, T> {
        TextureSlice {
            width: self.width,
            height: self.height,
            planes: self.planes,
            buffer: &self.buffer,
        }
    }

    pub fn as_texture_mut_slice<'s>(&'s mut self) -> TextureMutSlice<'s, T> {
        TextureMutSlice {
            width: self.width,
            height: self.height,
            planes: self.planes,
            buffer: &mut self.buffer,
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        self.buffer
    }
}

impl<T: Clone> Texture<T> {
    /// # Panics
    /// This function will panic if the slice does not match the requested shape.
    pub fn from_slice(width: u32, height: u32, planes: u32, slice: &[T]) -> Self {
        assert_eq!(
            slice.len(),
            sample_count(width, height, planes),
            "buffers don't match sizes"
        );
        Texture {
            width,
            height,
            planes,
            buffer: slice.to_owned(),
        }
    }
}

impl<T: Default + Copy> Texture<T> {
    pub fn new(width: u32, height: u32, planes: u32) -> Self {
        Self {
            width,
            height,
            planes,
            buffer: vec![T::default(); sample_count(width, height, planes)],
        }
    }

    pub fn with_shape(shape: Shape) -> Self {
        let (width, height, planes) = shape;
        Self::new(width as u32, height as u32, planes as u32)
    }
}

impl Texture<u8> {
    /// Wrap a caller supplied RGBA8 buffer.
    pub fn from_rgba8(width: u32, height: u32, buffer: Vec<u8>) -> Result<Self> {
        Self::from_vec(width, height, RGBA_PLANES, buffer)
    }

    /// Decode any format the `image` crate understands into RGBA8.
    pub fn from_rgba8_image<P: AsRef<Path>>(path: P) -> Result<Self> {
        let image = image::ImageReader::open(path)?
            .with_guessed_format()?
            .decode()?
            .to_rgba8();
        let (width, height) = image.dimensions();
        Self::from_rgba8(width, height, image.into_raw())
    }

    /// Encode an RGBA8 texture as PNG.
    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> Result {
        if self.planes != RGBA_PLANES {
            return Err(DuotoneError::InvalidInput(format!(
                "png output expects {} planes, texture has {}",
                RGBA_PLANES, self.planes
            )));
        }
        let file = &mut std::io::BufWriter::new(std::fs::File::create(path)?);
        let encoder =
            PngEncoder::new_with_quality(file, CompressionType::Default, FilterType::Adaptive);
        encoder.write_image(
            &self.buffer,
            self.width,
            self.height,
            ExtendedColorType::Rgba8,
        )?;
        Ok(())
    }
}

impl From<image::RgbaImage> for Texture<u8> {
    fn from(value: image::RgbaImage) -> Self {
        let (width, height) = value.dimensions();
        Texture {
            width,
            height,
            planes: RGBA_PLANES,
            buffer: value.into_raw(),
        }
    }
}

#[inline]
fn sample_count(width: u32, height: u32, planes: u32) -> usize {
    width as usize * height as usize * planes as usize
}

/// Texture with borrowed internal buffer
#[derive(Debug, Copy, Clone)]
pub struct TextureSlice<'a, T> {
    width: u32,
    height: u32,
    planes: u32,
    buffer: &'a [T],
}

impl<T> AsRef<[T]> for TextureSlice<'_, T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.buffer
    }
}

impl<T> TextureRef for TextureSlice<'_, T> {
    type Inner = T;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn planes(&self) -> u32 {
        self.planes
    }
}

impl<'a, T> TextureSlice<'a, T> {
    /// Borrow a raw buffer as a texture. The length is not checked here;
    /// [crate::render] validates it before any stage reads from it.
    pub fn new(width: u32, height: u32, planes: u32, buffer: &'a [T]) -> Self {
        Self {
            width,
            height,
            planes,
            buffer,
        }
    }

    /// Whether the buffer length matches the declared shape.
    pub fn is_consistent(&self) -> bool {
        self.buffer.len() == sample_count(self.width, self.height, self.planes)
    }
}

#[derive(Debug)]
pub struct TextureMutSlice<'a, T> {
    width: u32,
    height: u32,
    planes: u32,
    buffer: &'a mut [T],
}

impl<T> AsRef<[T]> for TextureMutSlice<'_, T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.buffer
    }
}

impl<T> AsMut<[T]> for TextureMutSlice<'_, T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.buffer
    }
}

impl<T> TextureRef for TextureMutSlice<'_, T> {
    type Inner = T;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn planes(&self) -> u32 {
        self.planes
    }
}

impl<T> TextureMut for TextureMutSlice<'_, T> {}

impl<'a, T> TextureMutSlice<'a, T> {
    pub fn new(width: u32, height: u32, planes: u32, buffer: &'a mut [T]) -> Self {
        Self {
            width,
            height,
            planes,
            buffer,
        }
    }
}

pub mod prelude {
    pub use super::{
        PixelBuffer, Shape, Shape2D, Texture, TextureMut, TextureMutSlice, TextureRef,
        TextureSlice,
    };
}
