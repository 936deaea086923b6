use rand::Rng;

use crate::texture::Texture;

/// Large enough for several screen cells, small enough for debug builds.
pub const TEST_IMAGE_SIZE: usize = 120;

pub fn rand_pixel(rng: &mut rand::rngs::ThreadRng) -> [u8; 4] {
    rng.random::<[u8; 4]>()
}

/// Random RGBA noise, alpha included.
pub fn gen_random_image(width: usize, height: usize) -> Texture<u8> {
    let mut rng = rand::rng();
    let pixels: Vec<u8> = (0..width * height)
        .flat_map(|_| rand_pixel(&mut rng))
        .collect();
    Texture::from_slice(width as u32, height as u32, 4, &pixels)
}

pub fn solid_image(width: usize, height: usize, pixel: [u8; 4]) -> Texture<u8> {
    let pixels = pixel.repeat(width * height);
    Texture::from_slice(width as u32, height as u32, 4, &pixels)
}

/// Opaque horizontal ramp from black to white.
pub fn gradient_image(width: usize, height: usize) -> Texture<u8> {
    let pixels: Vec<u8> = (0..width * height)
        .flat_map(|idx| {
            let v = ((idx % width) * 255 / (width - 1).max(1)) as u8;
            [v, v, v, 255]
        })
        .collect();
    Texture::from_slice(width as u32, height as u32, 4, &pixels)
}

/// Assert that two buffers match sample by sample, reporting the first
/// mismatching pixel position.
pub fn assert_buffers_match<T>(a: &[T], b: &[T], row_len: usize, label_a: &str, label_b: &str)
where
    T: PartialEq + std::fmt::Debug,
{
    assert_eq!(a.len(), b.len(), "buffer lengths don't match");
    for (idx, (a_sample, b_sample)) in a.iter().zip(b.iter()).enumerate() {
        assert_eq!(
            a_sample,
            b_sample,
            "sample mismatch at index {} (row {}, offset {}): {}={:?}, {}={:?}",
            idx,
            idx / row_len,
            idx % row_len,
            label_a,
            a_sample,
            label_b,
            b_sample
        );
    }
}
