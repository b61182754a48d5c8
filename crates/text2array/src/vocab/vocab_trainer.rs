//! # Vocab Trainer

use core::borrow::Borrow;

use crate::{
    errors::T2AResult,
    progress::{ProgressIter, ProgressReporter},
    samples::Sample,
    vocab::{
        CountType,
        FieldOptions,
        FieldStoreMap,
        FieldTally,
        SampleTokenCounter,
        StringStore,
        Vocab,
        VocabOptions,
    },
};

/// Trainer for per-field string vocabularies.
///
/// Feed it samples with [`VocabTrainer::update_from_samples`], any number of
/// times; then build the [`Vocab`] with [`VocabTrainer::train`].
///
/// # Parameters
/// * `C` - the type used to store token counts.
#[derive(Debug, Clone)]
pub struct VocabTrainer<C: CountType = u64> {
    /// Trainer options.
    pub options: VocabOptions,

    /// The per-field token counter.
    pub counter: SampleTokenCounter<C>,
}

impl<C: CountType> VocabTrainer<C> {
    /// Initializes a [`VocabTrainer`].
    ///
    /// ## Arguments
    /// * `options` - The trainer options.
    ///
    /// ## Returns
    /// A new `VocabTrainer`; or an error if the options are invalid.
    pub fn new(options: VocabOptions) -> T2AResult<Self> {
        options.validate()?;
        Ok(Self {
            options,
            counter: SampleTokenCounter::new(),
        })
    }

    /// Update token counts inplace from a sample iterator.
    ///
    /// ## Arguments
    /// * `samples` - A finite, single-pass source of samples; consumed once.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, samples)))]
    pub fn update_from_samples<I>(
        &mut self,
        samples: I,
    ) -> T2AResult<()>
    where
        I: IntoIterator,
        I::Item: Borrow<Sample>,
    {
        self.counter.update_from_samples(samples)
    }

    /// Update token counts inplace, reporting each sample to `reporter`.
    ///
    /// ## Arguments
    /// * `samples` - A finite, single-pass source of samples; consumed once.
    /// * `reporter` - Advanced once per consumed sample; finished at the end.
    pub fn update_from_samples_with_progress<I, R>(
        &mut self,
        samples: I,
        reporter: R,
    ) -> T2AResult<()>
    where
        I: IntoIterator,
        I::Item: Borrow<Sample>,
        R: ProgressReporter,
    {
        let mut tracked = ProgressIter::new(samples.into_iter(), reporter);
        self.counter.update_from_samples(&mut tracked)?;
        tracked.into_reporter().finish();
        Ok(())
    }

    /// Build the [`Vocab`] from the counts so far.
    ///
    /// Fields which never had a token counted are left out.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn train(self) -> T2AResult<Vocab> {
        let VocabTrainer { options, counter } = self;
        let sample_count = counter.sample_count();

        let mut stores = FieldStoreMap::new();
        for (name, tally) in counter.release() {
            if tally.token_counts.is_empty() {
                log::debug!("field '{name}': no tokens counted; no vocabulary");
                continue;
            }

            let field_options = options.field_options(&name);
            let store = build_field_store(&tally, field_options)?;
            log::debug!(
                "field '{name}': {} vocabulary of {} entries from {} distinct tokens",
                tally.shape,
                store.len(),
                tally.token_counts.len()
            );
            stores.insert(name, store);
        }

        log::info!(
            "built vocabularies for {} fields from {} samples",
            stores.len(),
            sample_count
        );
        Ok(Vocab::from(stores))
    }
}

/// Rank a field's tokens: drop those under `min_count`,
/// sort by descending count, keep the top `max_size`.
///
/// Ties keep first-seen order. Tokens spelled like one of the
/// field's special tokens are left to the special token.
pub fn rank_tokens<'a, C: CountType>(
    tally: &'a FieldTally<C>,
    options: &FieldOptions,
) -> Vec<&'a str> {
    let specials = options.specials(tally.shape);

    let mut ranked: Vec<(&str, C)> = tally
        .token_counts
        .iter()
        .filter(|(token, count)| {
            (**count).reaches(options.min_count)
                && !specials.contains(&token.as_str())
        })
        .map(|(token, &count)| (token.as_str(), count))
        .collect();

    // Stable; so equal counts stay in first-seen order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    if let Some(max_size) = options.max_size {
        ranked.truncate(max_size);
    }

    ranked.into_iter().map(|(token, _)| token).collect()
}

/// Build one field's [`StringStore`]: specials first, then ranked tokens.
pub fn build_field_store<C: CountType>(
    tally: &FieldTally<C>,
    options: &FieldOptions,
) -> T2AResult<StringStore> {
    let specials = options.specials(tally.shape);
    let unk_index = options.unk.as_ref().map(|_| specials.len() - 1);

    let itos: Vec<String> = specials
        .into_iter()
        .chain(rank_tokens(tally, options))
        .map(str::to_string)
        .collect();

    StringStore::init(itos, unk_index)
}
