use crate::texture::{Shape, Texture, TextureMutSlice, TextureRef, TextureSlice};
use crate::transform::traits::TextureTransform;

/// Extension trait that enables pipeline chaining
pub trait PipeableTransform: TextureTransform + Sized {
    /// Chain this transform with another, creating a pipeline
    ///
    /// The intermediate buffer between the two transforms is allocated with `shape`.
    ///
    /// # Example
    /// ```ignore
    /// // adjusted grayscale -> dot mask -> RGBA
    /// let mut pipeline = screen.pipe_with_shape(paint, (width, height, 1));
    ///
    /// // Use it as a single transform
    /// pipeline.once(adjusted.as_texture_slice(), output.as_texture_mut_slice());
    /// ```
    fn pipe_with_shape<T>(
        self,
        next: T,
        shape: Shape,
    ) -> Pipeline<Self::Input, Self::Output, T::Output, Self, T>
    where
        T: TextureTransform<Input = Self::Output>,
        Self::Output: Default + Copy,
    {
        Pipeline::with_buffer(self, next, Texture::with_shape(shape))
    }
}

// Blanket implementation: all TextureTransforms are automatically pipeable
impl<T: TextureTransform> PipeableTransform for T {}

/// A pipeline that chains two transforms: A -> B -> C
///
/// The intermediate buffer B is owned by this struct and reused across invocations.
/// `t1` always finishes writing B before `t2` starts reading it.
///
/// Exposes only A -> C, hiding the intermediate type B.
pub struct Pipeline<A, B, C, T1, T2>
where
    T1: TextureTransform<Input = A, Output = B>,
    T2: TextureTransform<Input = B, Output = C>,
{
    t1: T1,
    t2: T2,
    b: Texture<B>,
}

impl<A, B, C, T1, T2> Pipeline<A, B, C, T1, T2>
where
    T1: TextureTransform<Input = A, Output = B>,
    T2: TextureTransform<Input = B, Output = C>,
{
    /// Create a new transform pipeline with a pre-allocated intermediate buffer
    pub fn with_buffer(t1: T1, t2: T2, intermediate: Texture<B>) -> Self {
        Self {
            t1,
            t2,
            b: intermediate,
        }
    }
}

impl<A, B, C, T1, T2> TextureTransform for Pipeline<A, B, C, T1, T2>
where
    T1: TextureTransform<Input = A, Output = B>,
    T2: TextureTransform<Input = B, Output = C>,
{
    type Input = A;
    type Output = C;

    #[inline(always)]
    fn apply<'i, 'o>(
        &mut self,
        input: TextureSlice<'i, A>,
        output: TextureMutSlice<'o, C>,
    ) -> (TextureSlice<'i, A>, TextureMutSlice<'o, C>) {
        let (input, _) = self.t1.apply(input, self.b.as_texture_mut_slice());
        log::trace!("{} done", self.t1.name());
        let (_, output) = self.t2.apply(self.b.as_texture_slice(), output);
        log::trace!("{} done", self.t2.name());
        (input, output)
    }

    #[inline(always)]
    fn prepare(&mut self, in_shape: Shape, out_shape: Shape) {
        let b_shape = self.b.shape();
        self.t1.prepare(in_shape, b_shape);
        self.t2.prepare(b_shape, out_shape);
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        texture::{Shape, Texture, TextureMutSlice, TextureSlice},
        transform::{pipe::PipeableTransform, traits::TextureTransform},
    };

    #[test]
    fn test_pipeline_cascades_apply() {
        let shape: Shape = (4, 4, 1);
        let input = Texture::<u8>::with_shape(shape);
        let mut output = Texture::<u8>::with_shape(shape);

        let a = IncTransform::default();
        let b = IncTransform::default();

        let mut pipeline = a.pipe_with_shape(b, shape);
        pipeline.apply(input.as_texture_slice(), output.as_texture_mut_slice());

        assert!(output.as_ref().iter().all(|p| *p == 2));
        assert!(pipeline.b.as_ref().iter().all(|p| *p == 1));
    }

    #[test]
    fn test_pipeline_cascades_prepare() {
        let mut pipeline =
            IncTransform::default().pipe_with_shape(IncTransform::default(), (4, 4, 1));

        pipeline.prepare((2, 2, 1), (8, 8, 1));

        assert_eq!(pipeline.t1.in_shape, Some((2, 2, 1)));
        assert_eq!(pipeline.t1.out_shape, Some((4, 4, 1)));
        assert_eq!(pipeline.t2.in_shape, Some((4, 4, 1)));
        assert_eq!(pipeline.t2.out_shape, Some((8, 8, 1)));
    }

    #[derive(Default)]
    struct IncTransform {
        in_shape: Option<Shape>,
        out_shape: Option<Shape>,
    }

    impl TextureTransform for IncTransform {
        type Input = u8;
        type Output = u8;

        fn apply<'i, 'o>(
            &mut self,
            input: TextureSlice<'i, Self::Input>,
            mut output: TextureMutSlice<'o, Self::Output>,
        ) -> (
            TextureSlice<'i, Self::Input>,
            TextureMutSlice<'o, Self::Output>,
        ) {
            output
                .as_mut()
                .iter_mut()
                .zip(input.as_ref().iter())
                .for_each(|(dst, src)| *dst = *src + 1);
            (input, output)
        }

        fn prepare(&mut self, in_shape: Shape, out_shape: Shape) {
            self.in_shape = Some(in_shape);
            self.out_shape = Some(out_shape);
        }

        fn name(&self) -> &'static str {
            "inc"
        }
    }
}
