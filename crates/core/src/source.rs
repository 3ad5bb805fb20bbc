//! The `WordSource` trait that feeds 32-bit words into the batch evaluator.
//!
//! The trait is object-safe so sources can be used as `dyn WordSource`, and it
//! is implemented for `&mut S` so a caller can lend a source to the evaluator
//! without giving it up.

/// A stream of 32-bit pseudo-random words.
///
/// [`Mwc32`](crate::Mwc32) is the production implementation. Anything else
/// (counting wrappers, fixed replay buffers) only exists to observe how the
/// evaluator consumes words.
pub trait WordSource {
    /// Produce the next word and advance the source.
    fn next_word(&mut self) -> u32;
}

impl<S: WordSource + ?Sized> WordSource for &mut S {
    #[inline]
    fn next_word(&mut self) -> u32 {
        (**self).next_word()
    }
}
