use duotoner::Texture;
use rand::Rng;

pub const BENCH_IMAGE_SIZE: u32 = 600;

/// Random opaque RGBA image of `size` x `size` pixels.
pub fn gen_random_image(size: u32) -> Texture<u8> {
    let mut rng = rand::rng();
    let pixels: Vec<u8> = (0..size * size)
        .flat_map(|_| {
            let [r, g, b] = rng.random::<[u8; 3]>();
            [r, g, b, 255]
        })
        .collect();
    Texture::from_slice(size, size, 4, &pixels)
}
