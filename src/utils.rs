pub mod pixel;

pub mod prelude {
    pub use super::pixel::{Rgb, luminance};
}
