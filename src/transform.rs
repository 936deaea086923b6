//! Per-pixel stages of the engine, each expressed as a [TextureTransform].

pub mod curve;
pub mod duotone;
pub mod luminance;
pub mod pipe;
pub mod strategy;
pub mod traits;

pub mod prelude {
    pub use super::duotone::DuotoneTransform;
    pub use super::luminance::{LuminanceAnalyzer, LuminanceField, LuminanceRange};
    pub use super::pipe::{PipeableTransform, Pipeline};
    pub use super::strategy::Strategy;
    pub use super::traits::TextureTransform;
    pub use crate::texture::{TextureMutSlice, TextureSlice};
}
