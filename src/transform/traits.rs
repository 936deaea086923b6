use crate::texture::{Shape, TextureMutSlice, TextureRef, TextureSlice};

/// One stage of the render pipeline.
///
/// A stage reads its whole input and fully writes its output before
/// returning, so the next stage never observes a partially written buffer.
/// Uses associated types for Input/Output to ensure type safety when chaining.
pub trait TextureTransform: Sized {
    type Input;
    type Output;

    /// Apply the transform from input texture to output texture
    fn apply<'i, 'o>(
        &mut self,
        input: TextureSlice<'i, Self::Input>,
        output: TextureMutSlice<'o, Self::Output>,
    ) -> (
        TextureSlice<'i, Self::Input>,
        TextureMutSlice<'o, Self::Output>,
    );

    /// Preparation step that can inspect data shape before transformation
    fn prepare(&mut self, in_shape: Shape, out_shape: Shape);

    /// Short label used in log output.
    fn name(&self) -> &'static str;

    /// Apply once. Alias for [TextureTransform::prepare] followed by [TextureTransform::apply].
    fn once<'i, 'o>(
        mut self,
        input: TextureSlice<'i, Self::Input>,
        output: TextureMutSlice<'o, Self::Output>,
    ) -> (
        TextureSlice<'i, Self::Input>,
        TextureMutSlice<'o, Self::Output>,
    ) {
        self.prepare(input.shape(), output.shape());
        log::trace!(
            "{}: {:?} -> {:?}",
            self.name(),
            input.shape(),
            output.shape()
        );
        self.apply(input, output)
    }
}
