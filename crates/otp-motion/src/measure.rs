//! # Layout Measurement
//!
//! The slide reads the content's natural height once at the start of every
//! transition sequence. Hosts implement [`Measure`] over their layout engine;
//! content that is not attached yet reports `None`, which reads as height 0.

/// Synchronous read of the slide content's rendered geometry.
pub trait Measure {
    /// Natural (unclipped) height of the content, if it has geometry.
    fn natural_height(&self) -> Option<f32>;
}

/// Content of a fixed natural height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedHeight(pub f32);

impl Measure for FixedHeight {
    fn natural_height(&self) -> Option<f32> {
        Some(self.0)
    }
}

/// Content with no geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl Measure for Detached {
    fn natural_height(&self) -> Option<f32> {
        None
    }
}

impl<M: Measure + ?Sized> Measure for &M {
    fn natural_height(&self) -> Option<f32> {
        (**self).natural_height()
    }
}

/// Read a height, mapping missing, negative and non-finite geometry to 0.
pub(crate) fn read_height<M: Measure + ?Sized>(content: &M) -> f32 {
    match content.natural_height() {
        Some(h) if h.is_finite() && h > 0.0 => h,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_height_passes_positive_values() {
        assert_eq!(read_height(&FixedHeight(42.5)), 42.5);
    }

    #[test]
    fn read_height_floors_bad_geometry() {
        assert_eq!(read_height(&Detached), 0.0);
        assert_eq!(read_height(&FixedHeight(-3.0)), 0.0);
        assert_eq!(read_height(&FixedHeight(f32::NAN)), 0.0);
        assert_eq!(read_height(&FixedHeight(f32::INFINITY)), 0.0);
    }
}
