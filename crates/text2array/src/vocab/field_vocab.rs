//! # Field Vocabulary ``{ FieldName -> StringStore }``

use core::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{T2AResult, Text2ArrayError},
    progress::ProgressReporter,
    samples::{FieldValue, Sample},
    types::FieldName,
    vocab::{FieldShape, FieldStoreMap, StringStore, VocabOptions, VocabTrainer},
};

/// A read-only map from field name to that field's [`StringStore`].
///
/// Built by scanning a corpus ([`Vocab::from_samples`]), or directly from
/// `(field, store)` pairs. Iteration follows first-discovery order.
///
/// Equality compares the full field map: the field set, and each store's
/// tokens and unknown fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vocab {
    stores: FieldStoreMap,
}

impl From<FieldStoreMap> for Vocab {
    fn from(stores: FieldStoreMap) -> Self {
        Self { stores }
    }
}

impl<S: Into<FieldName>> FromIterator<(S, StringStore)> for Vocab {
    fn from_iter<I: IntoIterator<Item = (S, StringStore)>>(iter: I) -> Self {
        Self {
            stores: iter
                .into_iter()
                .map(|(name, store)| (name.into(), store))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Vocab {
    type Item = (&'a FieldName, &'a StringStore);
    type IntoIter = indexmap::map::Iter<'a, FieldName, StringStore>;

    fn into_iter(self) -> Self::IntoIter {
        self.stores.iter()
    }
}

impl Vocab {
    /// Build a vocabulary from a corpus, with default options.
    ///
    /// ## Arguments
    /// * `samples` - A finite, single-pass source of samples; consumed once.
    pub fn from_samples<I>(samples: I) -> T2AResult<Self>
    where
        I: IntoIterator,
        I::Item: Borrow<Sample>,
    {
        Self::from_samples_with_options(samples, &VocabOptions::default())
    }

    /// Build a vocabulary from a corpus.
    ///
    /// ## Arguments
    /// * `samples` - A finite, single-pass source of samples; consumed once.
    /// * `options` - The per-field options.
    pub fn from_samples_with_options<I>(
        samples: I,
        options: &VocabOptions,
    ) -> T2AResult<Self>
    where
        I: IntoIterator,
        I::Item: Borrow<Sample>,
    {
        let mut trainer: VocabTrainer = options.clone().init()?;
        trainer.update_from_samples(samples)?;
        trainer.train()
    }

    /// Build a vocabulary from a corpus, reporting each sample consumed.
    ///
    /// ## Arguments
    /// * `samples` - A finite, single-pass source of samples; consumed once.
    /// * `options` - The per-field options.
    /// * `reporter` - Advanced once per sample; it never sees the samples.
    pub fn from_samples_with_progress<I, R>(
        samples: I,
        options: &VocabOptions,
        reporter: R,
    ) -> T2AResult<Self>
    where
        I: IntoIterator,
        I::Item: Borrow<Sample>,
        R: ProgressReporter,
    {
        let mut trainer: VocabTrainer = options.clone().init()?;
        trainer.update_from_samples_with_progress(samples, reporter)?;
        trainer.train()
    }

    /// The number of fields with a vocabulary.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Are there no field vocabularies?
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Does `field` have a vocabulary?
    pub fn contains_field(
        &self,
        field: &str,
    ) -> bool {
        self.stores.contains_key(field)
    }

    /// The store for `field`, if any.
    pub fn get(
        &self,
        field: &str,
    ) -> Option<&StringStore> {
        self.stores.get(field)
    }

    /// The store for `field`.
    ///
    /// ## Returns
    /// The store; or [`Text2ArrayError::FieldVocabAbsent`].
    pub fn try_get(
        &self,
        field: &str,
    ) -> T2AResult<&StringStore> {
        self.get(field)
            .ok_or_else(|| Text2ArrayError::FieldVocabAbsent {
                field: field.to_string(),
            })
    }

    /// Iterate over the field names.
    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.stores.keys().map(String::as_str)
    }

    /// Iterate over ``(field, store)`` pairs.
    pub fn iter(&self) -> indexmap::map::Iter<'_, FieldName, StringStore> {
        self.stores.iter()
    }

    /// Encode one sample.
    ///
    /// Every field with a vocabulary has each of its tokens replaced by the
    /// token's index, keeping the nesting. Other fields are copied unchanged.
    ///
    /// ## Returns
    /// The encoded sample; or [`Text2ArrayError::ValueNotFound`] for a token
    /// the field's store cannot index; or [`Text2ArrayError::MalformedInput`]
    /// if a field with a vocabulary holds a non-text value.
    pub fn apply_to_sample(
        &self,
        sample: &Sample,
    ) -> T2AResult<Sample> {
        sample
            .iter()
            .map(|(name, value)| {
                let value = match self.stores.get(name.as_str()) {
                    Some(store) => encode_value(name, value, store)?,
                    None => value.clone(),
                };
                Ok((name.clone(), value))
            })
            .collect()
    }

    /// Lazily encode a stream of samples.
    ///
    /// Each sample is encoded only when pulled; so this works over unbounded
    /// streams, and an error surfaces at the sample which caused it.
    pub fn apply_to<I>(
        &self,
        samples: I,
    ) -> ApplyToSamples<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Borrow<Sample>,
    {
        ApplyToSamples {
            vocab: self,
            samples: samples.into_iter(),
        }
    }
}

fn encode_value(
    name: &str,
    value: &FieldValue,
    store: &StringStore,
) -> T2AResult<FieldValue> {
    let shape = FieldShape::classify(value).ok_or_else(|| {
        Text2ArrayError::MalformedInput(format!(
            "field '{name}' has a vocabulary, but holds a non-text {} value",
            value.kind_name()
        ))
    })?;

    shape.map_tokens(value, |token| match store.index(token) {
        Ok(index) => Ok(FieldValue::from_index(index)),
        Err(Text2ArrayError::TokenNotFound { .. }) => Err(Text2ArrayError::ValueNotFound {
            field: name.to_string(),
            value: token.to_string(),
        }),
        Err(err) => Err(err),
    })
}

/// Iterator returned by [`Vocab::apply_to`].
#[derive(Debug)]
pub struct ApplyToSamples<'a, I> {
    vocab: &'a Vocab,
    samples: I,
}

impl<I> Iterator for ApplyToSamples<'_, I>
where
    I: Iterator,
    I::Item: Borrow<Sample>,
{
    type Item = T2AResult<Sample>;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.samples.next()?;
        Some(self.vocab.apply_to_sample(sample.borrow()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.samples.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;

    fn abc_vocab() -> Vocab {
        [("ws", StringStore::from_tokens(["a", "b", "c"]).unwrap())]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_mapping_protocol() {
        let vocab = abc_vocab();

        assert_eq!(vocab.len(), 1);
        assert!(!vocab.is_empty());
        assert!(vocab.contains_field("ws"));
        assert!(!vocab.contains_field("w"));
        assert_eq!(vocab.fields().collect::<Vec<_>>(), vec!["ws"]);
        assert!(vocab.get("w").is_none());
        assert_eq!(vocab.try_get("ws").unwrap().len(), 3);

        let err = vocab.try_get("w").unwrap_err();
        assert!(matches!(&err, Text2ArrayError::FieldVocabAbsent { field } if field == "w"));
        assert!(
            err.to_string()
                .contains("no vocabulary found for field name 'w'")
        );

        let mut names = vec![];
        for (name, store) in &vocab {
            names.push((name.as_str(), store.len()));
        }
        assert_eq!(names, vec![("ws", 3)]);
        assert!(Vocab::default().is_empty());
    }

    #[test]
    fn test_apply_to_sample() {
        let vocab = abc_vocab();
        let encoded = vocab
            .apply_to_sample(&sample! { "ws" => vec!["a", "c", "c"], "i" => 1 })
            .unwrap();
        assert_eq!(encoded, sample! { "ws" => vec![0, 2, 2], "i" => 1 });
        assert_eq!(
            encoded.keys().collect::<Vec<_>>(),
            vec!["ws", "i"]
        );
    }

    #[test]
    fn test_apply_to_keeps_nesting() {
        let vocab: Vocab = [("cs", StringStore::from_tokens(["x", "y"]).unwrap())]
            .into_iter()
            .collect();
        let encoded = vocab
            .apply_to_sample(&sample! { "cs" => vec![vec!["y"], vec![], vec!["x", "y"]] })
            .unwrap();
        assert_eq!(
            encoded,
            sample! { "cs" => vec![vec![1], vec![], vec![0, 1]] }
        );
    }

    #[test]
    fn test_value_not_found() {
        let vocab: Vocab = [("ws", StringStore::from_tokens(["b"]).unwrap())]
            .into_iter()
            .collect();
        let err = vocab
            .apply_to_sample(&sample! { "ws" => vec!["a"] })
            .unwrap_err();

        assert!(matches!(
            &err,
            Text2ArrayError::ValueNotFound { field, value } if field == "ws" && value == "a"
        ));
        let message = err.to_string();
        assert!(message.contains("value 'a' not found in vocab"));
        assert!(!message.contains("not found in vocabulary"));
    }

    #[test]
    fn test_non_text_value_with_vocab() {
        let vocab = abc_vocab();
        let err = vocab
            .apply_to_sample(&sample! { "ws" => 3 })
            .unwrap_err();
        assert!(matches!(err, Text2ArrayError::MalformedInput(_)));
    }

    #[test]
    fn test_apply_to_is_lazy() {
        let vocab = abc_vocab();
        let mut pulled = 0;
        let stream = core::iter::repeat_with(|| {
            pulled += 1;
            sample! { "ws" => vec!["b"] }
        });

        let encoded: Vec<Sample> = vocab
            .apply_to(stream)
            .take(3)
            .collect::<T2AResult<_>>()
            .unwrap();
        assert_eq!(encoded, vec![sample! { "ws" => vec![1] }; 3]);
        assert_eq!(pulled, 3);
    }

    #[test]
    fn test_apply_to_error_surfaces_at_failing_sample() {
        let vocab = abc_vocab();
        let samples = vec![
            sample! { "ws" => vec!["a"] },
            sample! { "ws" => vec!["z"] },
            sample! { "ws" => vec!["c"] },
        ];

        let mut it = vocab.apply_to(&samples);
        assert_eq!(it.size_hint(), (3, Some(3)));
        assert_eq!(it.next().unwrap().unwrap(), sample! { "ws" => vec![0] });
        assert!(it.next().unwrap().is_err());
        assert_eq!(it.next().unwrap().unwrap(), sample! { "ws" => vec![2] });
        assert!(it.next().is_none());
    }

    #[test]
    fn test_serde() {
        let vocab: Vocab = [
            ("w", StringStore::from_tokens_with_unk(["<unk>", "a"], "<unk>").unwrap()),
            ("ws", StringStore::from_tokens(["b"]).unwrap()),
        ]
        .into_iter()
        .collect();

        let text = serde_json::to_string(&vocab).unwrap();
        assert_eq!(
            text,
            r#"{"w":{"itos":["<unk>","a"],"unk_index":0},"ws":{"itos":["b"],"unk_index":null}}"#
        );
        let loaded: Vocab = serde_json::from_str(&text).unwrap();
        assert_eq!(loaded, vocab);
        assert_eq!(loaded.fields().collect::<Vec<_>>(), vec!["w", "ws"]);
    }
}
