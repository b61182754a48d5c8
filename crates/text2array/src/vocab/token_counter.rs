//! # Sample Token Counter

use core::borrow::Borrow;

use indexmap::IndexMap;

use crate::{
    errors::T2AResult,
    samples::Sample,
    types::{FieldName, T2AHashSet},
    vocab::{CountType, FieldShape, TokenCountMap},
};

/// The counts collected for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTally<C: CountType> {
    /// The deepest shape seen for the field.
    pub shape: FieldShape,

    /// The token counts, in first-seen order.
    pub token_counts: TokenCountMap<C>,
}

impl<C: CountType> FieldTally<C> {
    /// Create an empty tally.
    pub fn new(shape: FieldShape) -> Self {
        Self {
            shape,
            token_counts: Default::default(),
        }
    }

    /// The total number of tokens counted; saturating.
    pub fn total(&self) -> C {
        self.token_counts
            .values()
            .fold(C::zero(), |acc, &count| acc.saturating_add(count))
    }
}

/// Per-field token counter over a corpus of samples.
///
/// Fields are tallied in first-discovery order. A field that ever holds a
/// non-text value is excluded, and stays excluded for all later samples.
///
/// # Parameters
/// * `C` - the type used to store counts.
#[derive(Debug, Clone)]
pub struct SampleTokenCounter<C: CountType = u64> {
    /// The tallies of the text fields seen so far.
    tallies: IndexMap<FieldName, FieldTally<C>>,

    /// Fields which held a non-text value.
    excluded: T2AHashSet<FieldName>,

    /// The number of samples counted.
    sample_count: usize,
}

impl<C: CountType> Default for SampleTokenCounter<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CountType> SampleTokenCounter<C> {
    /// Create a new counter.
    pub fn new() -> Self {
        Self {
            tallies: Default::default(),
            excluded: Default::default(),
            sample_count: 0,
        }
    }

    /// The number of samples counted.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// The tallies so far; including fields with no tokens yet.
    pub fn tallies(&self) -> &IndexMap<FieldName, FieldTally<C>> {
        &self.tallies
    }

    /// Was `name` excluded for holding a non-text value?
    pub fn is_excluded(
        &self,
        name: &str,
    ) -> bool {
        self.excluded.contains(name)
    }

    /// Release the tallies.
    pub fn release(self) -> IndexMap<FieldName, FieldTally<C>> {
        self.tallies
    }

    /// Update the counts inplace from one sample.
    ///
    /// Counts saturate at `C::max_value()`.
    pub fn update_from_sample(
        &mut self,
        sample: &Sample,
    ) -> T2AResult<()> {
        for (name, value) in sample {
            if self.excluded.contains(name.as_str()) {
                continue;
            }

            let Some(shape) = FieldShape::classify(value) else {
                log::warn!(
                    "field '{name}' holds a non-text {} value; excluding it",
                    value.kind_name()
                );
                self.tallies.shift_remove(name.as_str());
                self.excluded.insert(name.clone());
                continue;
            };

            let tally = self
                .tallies
                .entry(name.clone())
                .or_insert_with(|| FieldTally::new(shape));
            tally.shape = tally.shape.max(shape);

            let token_counts = &mut tally.token_counts;
            shape.for_each_token(value, |token| match token_counts.get_mut(token) {
                Some(count) => *count = (*count).incremented(),
                None => {
                    token_counts.insert(token.to_string(), C::one());
                }
            })?;
        }

        self.sample_count += 1;
        log::trace!("counted sample {}", self.sample_count);
        Ok(())
    }

    /// Update the counts inplace from a sample iterator.
    ///
    /// The iterator is consumed exactly once.
    pub fn update_from_samples<I>(
        &mut self,
        samples: I,
    ) -> T2AResult<()>
    where
        I: IntoIterator,
        I::Item: Borrow<Sample>,
    {
        for sample in samples {
            self.update_from_sample(sample.borrow())?;
        }
        Ok(())
    }
}
