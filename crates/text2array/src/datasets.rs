//! # Datasets And Batches
//!
//! A [`Dataset`] holds its samples in memory; a [`StreamDataset`] pulls them
//! from any iterator. Both group samples into [`Batch`]es, which gather a
//! field across their samples and pad it into a rectangular [`PaddedArray`].

use num_traits::NumCast;
use rand::{Rng, seq::SliceRandom};

use crate::{
    errors::{T2AResult, Text2ArrayError},
    samples::{FieldValue, Sample},
};

fn check_batch_size(batch_size: usize) -> T2AResult<()> {
    if batch_size == 0 {
        return Err(Text2ArrayError::InvalidArgument(
            "batch size must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// An in-memory dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl From<Vec<Sample>> for Dataset {
    fn from(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
}

impl FromIterator<Sample> for Dataset {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = core::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl Dataset {
    /// The number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Is the dataset empty?
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The sample at `index`, if in range.
    pub fn get(
        &self,
        index: usize,
    ) -> Option<&Sample> {
        self.samples.get(index)
    }

    /// Iterate over the samples, in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// The samples, in order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Release the samples.
    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    /// Shuffle inplace with the thread rng.
    pub fn shuffle(&mut self) -> &mut Self {
        self.shuffle_with(&mut rand::rng())
    }

    /// Shuffle inplace with the given rng.
    pub fn shuffle_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> &mut Self {
        self.samples.shuffle(rng);
        self
    }

    /// Group the samples into batches of at most `batch_size`.
    ///
    /// ## Returns
    /// The batches, in order; or an error if `batch_size` is 0.
    pub fn batch(
        &self,
        batch_size: usize,
    ) -> T2AResult<impl Iterator<Item = Batch> + '_> {
        check_batch_size(batch_size)?;
        Ok(self
            .samples
            .chunks(batch_size)
            .map(|chunk| Batch::from(chunk.to_vec())))
    }

    /// Group the samples into batches of exactly `batch_size`;
    /// a short last batch is dropped.
    pub fn batch_exactly(
        &self,
        batch_size: usize,
    ) -> T2AResult<impl Iterator<Item = Batch> + '_> {
        check_batch_size(batch_size)?;
        Ok(self
            .samples
            .chunks_exact(batch_size)
            .map(|chunk| Batch::from(chunk.to_vec())))
    }
}

/// A dataset which streams its samples.
///
/// Samples are pulled only as batches are pulled.
#[derive(Debug, Clone)]
pub struct StreamDataset<I> {
    stream: I,
}

impl<I> StreamDataset<I>
where
    I: IntoIterator<Item = Sample>,
{
    /// Wrap a sample stream.
    pub fn new(stream: I) -> Self {
        Self { stream }
    }

    /// Group the samples into batches of at most `batch_size`.
    ///
    /// ## Returns
    /// The lazy batch iterator; or an error if `batch_size` is 0.
    pub fn batch(
        self,
        batch_size: usize,
    ) -> T2AResult<StreamBatches<I::IntoIter>> {
        check_batch_size(batch_size)?;
        Ok(StreamBatches {
            samples: self.stream.into_iter().fuse(),
            batch_size,
        })
    }

    /// Group the samples into batches of exactly `batch_size`;
    /// a short last batch is dropped.
    pub fn batch_exactly(
        self,
        batch_size: usize,
    ) -> T2AResult<impl Iterator<Item = Batch>> {
        Ok(self
            .batch(batch_size)?
            .filter(move |batch| batch.len() == batch_size))
    }
}

impl<I> IntoIterator for StreamDataset<I>
where
    I: IntoIterator<Item = Sample>,
{
    type Item = Sample;
    type IntoIter = I::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.stream.into_iter()
    }
}

/// Iterator returned by [`StreamDataset::batch`].
#[derive(Debug)]
pub struct StreamBatches<I> {
    samples: core::iter::Fuse<I>,
    batch_size: usize,
}

impl<I> Iterator for StreamBatches<I>
where
    I: Iterator<Item = Sample>,
{
    type Item = Batch;

    fn next(&mut self) -> Option<Self::Item> {
        let samples: Vec<Sample> = self.samples.by_ref().take(self.batch_size).collect();
        if samples.is_empty() {
            None
        } else {
            Some(Batch::from(samples))
        }
    }
}

/// A group of samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    samples: Vec<Sample>,
}

impl From<Vec<Sample>> for Batch {
    fn from(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
}

impl Batch {
    /// The number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Is the batch empty?
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The samples, in order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Gather one field across the batch.
    ///
    /// ## Returns
    /// The field's value from each sample, in order;
    /// or [`Text2ArrayError::FieldMissing`] for the first sample without it.
    pub fn get(
        &self,
        field: &str,
    ) -> T2AResult<Vec<&FieldValue>> {
        self.samples
            .iter()
            .enumerate()
            .map(|(sample, s)| {
                s.get(field).ok_or_else(|| Text2ArrayError::FieldMissing {
                    field: field.to_string(),
                    sample,
                })
            })
            .collect()
    }

    /// Pad one numeric field into a rectangular array.
    ///
    /// The first dimension is the batch; each further dimension is as long
    /// as the longest list at that depth. Shorter lists are filled with `pad`.
    ///
    /// ## Arguments
    /// * `field` - The field to gather.
    /// * `pad` - The fill value.
    ///
    /// ## Returns
    /// The array; or [`Text2ArrayError::MalformedInput`] if the field holds
    /// strings, nests unevenly, or has a value `N` cannot represent.
    pub fn to_array<N: NumCast + Copy>(
        &self,
        field: &str,
        pad: N,
    ) -> T2AResult<PaddedArray<N>> {
        let values = self.get(field)?;

        let mut dims = vec![values.len()];
        let mut leaf_level = None;
        for value in &values {
            measure(value, 1, &mut dims, &mut leaf_level)?;
        }

        let mut array = PaddedArray::filled(dims, pad);
        let strides = array.strides();
        for (i, value) in values.iter().enumerate() {
            fill(value, 1, i * strides[0], &strides, &mut array.data)?;
        }
        Ok(array)
    }
}

fn nesting_error(level: usize) -> Text2ArrayError {
    Text2ArrayError::MalformedInput(format!("inconsistent nesting at depth {level}"))
}

fn measure(
    value: &FieldValue,
    level: usize,
    dims: &mut Vec<usize>,
    leaf_level: &mut Option<usize>,
) -> T2AResult<()> {
    match value {
        FieldValue::Str(s) => Err(Text2ArrayError::MalformedInput(format!(
            "cannot convert string '{s}' to a number; apply a vocab first"
        ))),
        FieldValue::Int(_) | FieldValue::UInt(_) | FieldValue::Float(_) => {
            if dims.len() > level || leaf_level.is_some_and(|l| l != level) {
                return Err(nesting_error(level));
            }
            *leaf_level = Some(level);
            Ok(())
        }
        FieldValue::List(items) => {
            if leaf_level.is_some_and(|l| l <= level) {
                return Err(nesting_error(level));
            }
            if dims.len() == level {
                dims.push(0);
            }
            dims[level] = dims[level].max(items.len());
            for item in items {
                measure(item, level + 1, dims, leaf_level)?;
            }
            Ok(())
        }
    }
}

fn fill<N: NumCast>(
    value: &FieldValue,
    level: usize,
    offset: usize,
    strides: &[usize],
    data: &mut [N],
) -> T2AResult<()> {
    let cast = match value {
        FieldValue::Int(v) => <N as NumCast>::from(*v),
        FieldValue::UInt(v) => <N as NumCast>::from(*v),
        FieldValue::Float(v) => <N as NumCast>::from(*v),
        FieldValue::List(items) => {
            for (i, item) in items.iter().enumerate() {
                fill(item, level + 1, offset + i * strides[level], strides, data)?;
            }
            return Ok(());
        }
        FieldValue::Str(_) => return Err(nesting_error(level)),
    };

    data[offset] = cast.ok_or_else(|| {
        Text2ArrayError::MalformedInput(format!(
            "{value:?} does not fit the array element type"
        ))
    })?;
    Ok(())
}

/// A dense, row-major array.
#[derive(Debug, Clone, PartialEq)]
pub struct PaddedArray<N> {
    /// The length of each dimension.
    pub shape: Vec<usize>,

    /// The elements, in row-major order.
    pub data: Vec<N>,
}

impl<N: Copy> PaddedArray<N> {
    fn filled(
        shape: Vec<usize>,
        value: N,
    ) -> Self {
        let size = shape.iter().product();
        Self {
            shape,
            data: vec![value; size],
        }
    }

    /// The number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// The element step of each dimension.
    pub fn strides(&self) -> Vec<usize> {
        let mut strides = vec![1; self.shape.len()];
        for d in (0..self.shape.len().saturating_sub(1)).rev() {
            strides[d] = strides[d + 1] * self.shape[d + 1];
        }
        strides
    }

    /// The element at `index`, if in range.
    pub fn get(
        &self,
        index: &[usize],
    ) -> Option<N> {
        if index.len() != self.shape.len() || index.iter().zip(&self.shape).any(|(i, n)| i >= n) {
            return None;
        }
        let offset: usize = index
            .iter()
            .zip(self.strides())
            .map(|(i, stride)| i * stride)
            .sum();
        self.data.get(offset).copied()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::sample;

    fn numbered(n: i64) -> Vec<Sample> {
        (0..n).map(|i| sample! { "i" => i }).collect()
    }

    fn ids(batch: &Batch) -> Vec<i64> {
        batch
            .get("i")
            .unwrap()
            .into_iter()
            .map(|v| match v {
                FieldValue::Int(i) => *i,
                _ => panic!("not an int: {v:?}"),
            })
            .collect()
    }

    #[test]
    fn test_dataset_access() {
        let dataset = Dataset::from(numbered(3));
        assert_eq!(dataset.len(), 3);
        assert!(!dataset.is_empty());
        assert_eq!(dataset.get(1), Some(&sample! { "i" => 1 }));
        assert_eq!(dataset.get(3), None);
        assert_eq!(dataset.iter().count(), 3);
        assert_eq!((&dataset).into_iter().count(), 3);
    }

    #[test]
    fn test_dataset_batch() {
        let dataset: Dataset = numbered(5).into_iter().collect();

        let batches: Vec<Batch> = dataset.batch(2).unwrap().collect();
        assert_eq!(
            batches.iter().map(ids).collect::<Vec<_>>(),
            vec![vec![0, 1], vec![2, 3], vec![4]]
        );

        let batches: Vec<Batch> = dataset.batch_exactly(2).unwrap().collect();
        assert_eq!(
            batches.iter().map(ids).collect::<Vec<_>>(),
            vec![vec![0, 1], vec![2, 3]]
        );

        assert!(matches!(
            dataset.batch(0).err(),
            Some(Text2ArrayError::InvalidArgument(_))
        ));
        assert!(dataset.batch_exactly(0).is_err());
    }

    #[test]
    fn test_dataset_shuffle() {
        let mut dataset = Dataset::from(numbered(20));
        dataset.shuffle_with(&mut StdRng::seed_from_u64(42));

        let mut again = Dataset::from(numbered(20));
        again.shuffle_with(&mut StdRng::seed_from_u64(42));
        assert_eq!(dataset, again);

        let mut sorted = dataset.clone().into_samples();
        sorted.sort_by_key(|s| match s["i"] {
            FieldValue::Int(i) => i,
            _ => unreachable!(),
        });
        assert_eq!(sorted, numbered(20));

        assert_eq!(dataset.shuffle().len(), 20);
    }

    #[test]
    fn test_stream_batch_is_lazy() {
        let mut pulled = 0;
        let stream = (0..).map(|i| {
            pulled += 1;
            sample! { "i" => i }
        });

        let first: Vec<Batch> = StreamDataset::new(stream)
            .batch(3)
            .unwrap()
            .take(2)
            .collect();
        assert_eq!(
            first.iter().map(ids).collect::<Vec<_>>(),
            vec![vec![0, 1, 2], vec![3, 4, 5]]
        );
        assert_eq!(pulled, 6);
    }

    #[test]
    fn test_stream_batch_exactly() {
        let batches: Vec<Batch> = StreamDataset::new(numbered(7))
            .batch(3)
            .unwrap()
            .collect();
        assert_eq!(batches.len(), 3);
        assert_eq!(ids(&batches[2]), vec![6]);

        let batches: Vec<Batch> = StreamDataset::new(numbered(7))
            .batch_exactly(3)
            .unwrap()
            .collect();
        assert_eq!(batches.len(), 2);

        assert!(StreamDataset::new(numbered(1)).batch(0).is_err());
        assert_eq!(StreamDataset::new(numbered(4)).into_iter().count(), 4);
    }

    #[test]
    fn test_batch_get_missing_field() {
        let batch = Batch::from(vec![sample! { "i" => 1 }, sample! { "j" => 2 }]);
        let err = batch.get("i").unwrap_err();
        assert!(matches!(
            &err,
            Text2ArrayError::FieldMissing { field, sample: 1 } if field == "i"
        ));
    }

    #[test]
    fn test_to_array_scalar() {
        let batch = Batch::from(numbered(3));
        let array = batch.to_array::<i64>("i", -1).unwrap();
        assert_eq!(array.shape, vec![3]);
        assert_eq!(array.data, vec![0, 1, 2]);
    }

    #[test]
    fn test_to_array_ragged() {
        let batch = Batch::from(vec![
            sample! { "ws" => vec![vec![1, 2], vec![3]] },
            sample! { "ws" => vec![vec![4]] },
            sample! { "ws" => Vec::<Vec<i64>>::new() },
        ]);

        let array = batch.to_array::<u32>("ws", 0).unwrap();
        assert_eq!(array.shape, vec![3, 2, 2]);
        assert_eq!(array.ndim(), 3);
        assert_eq!(array.data, vec![1, 2, 3, 0, 4, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(array.get(&[0, 1, 0]), Some(3));
        assert_eq!(array.get(&[1, 0, 0]), Some(4));
        assert_eq!(array.get(&[3, 0, 0]), None);
    }

    #[test]
    fn test_to_array_floats() {
        let batch = Batch::from(vec![
            sample! { "f" => vec![0.5, 1.5] },
            sample! { "f" => vec![2.0] },
        ]);
        let array = batch.to_array::<f32>("f", 0.0).unwrap();
        assert_eq!(array.shape, vec![2, 2]);
        assert_eq!(array.data, vec![0.5, 1.5, 2.0, 0.0]);
    }

    #[test]
    fn test_to_array_errors() {
        let batch = Batch::from(vec![sample! { "w" => "a" }]);
        assert!(matches!(
            batch.to_array::<i64>("w", 0),
            Err(Text2ArrayError::MalformedInput(_))
        ));

        let batch = Batch::from(vec![sample! { "x" => vec![1] }, sample! { "x" => 2 }]);
        assert!(matches!(
            batch.to_array::<i64>("x", 0),
            Err(Text2ArrayError::MalformedInput(_))
        ));

        let batch = Batch::from(vec![sample! { "x" => 2 }, sample! { "x" => vec![1] }]);
        assert!(batch.to_array::<i64>("x", 0).is_err());

        let batch = Batch::from(vec![sample! { "x" => -1 }]);
        assert!(batch.to_array::<u8>("x", 0).is_err());

        let batch = Batch::from(vec![sample! { "x" => u64::MAX }]);
        assert!(batch.to_array::<i64>("x", 0).is_err());
        assert_eq!(batch.to_array::<u64>("x", 0).unwrap().data, vec![u64::MAX]);

        assert!(matches!(
            batch.to_array::<i64>("y", 0),
            Err(Text2ArrayError::FieldMissing { .. })
        ));
    }
}
