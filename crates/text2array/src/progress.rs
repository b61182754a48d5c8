//! # Progress Reporting
//!
//! A [`ProgressReporter`] is told about each item pulled through a
//! [`ProgressIter`]; the items themselves pass through untouched.
//!
//! With the `indicatif` feature, an `indicatif::ProgressBar` is a reporter.

/// Receives advancement notifications.
pub trait ProgressReporter {
    /// Record `delta` more items.
    fn advance(
        &mut self,
        delta: u64,
    );

    /// Called once the iteration is complete.
    fn finish(&mut self) {}
}

/// A reporter which ignores all notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn advance(
        &mut self,
        _delta: u64,
    ) {
    }
}

impl<R: ProgressReporter + ?Sized> ProgressReporter for &mut R {
    fn advance(
        &mut self,
        delta: u64,
    ) {
        (**self).advance(delta)
    }

    fn finish(&mut self) {
        (**self).finish()
    }
}

#[cfg(feature = "indicatif")]
impl ProgressReporter for indicatif::ProgressBar {
    fn advance(
        &mut self,
        delta: u64,
    ) {
        self.inc(delta);
    }

    fn finish(&mut self) {
        indicatif::ProgressBar::finish(self);
    }
}

/// An iterator which reports each yielded item to a [`ProgressReporter`].
#[derive(Debug)]
pub struct ProgressIter<I, R> {
    inner: I,
    reporter: R,
}

impl<I, R> ProgressIter<I, R>
where
    I: Iterator,
    R: ProgressReporter,
{
    /// Wrap an iterator.
    pub fn new(
        inner: I,
        reporter: R,
    ) -> Self {
        Self { inner, reporter }
    }

    /// Release the reporter.
    pub fn into_reporter(self) -> R {
        self.reporter
    }
}

impl<I, R> Iterator for ProgressIter<I, R>
where
    I: Iterator,
    R: ProgressReporter,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        self.reporter.advance(1);
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Extension trait to attach a [`ProgressReporter`] to any iterator.
pub trait ProgressIterExt: Iterator + Sized {
    /// Report each item of this iterator to `reporter`.
    fn with_progress<R: ProgressReporter>(
        self,
        reporter: R,
    ) -> ProgressIter<Self, R> {
        ProgressIter::new(self, reporter)
    }
}

impl<I: Iterator> ProgressIterExt for I {}
