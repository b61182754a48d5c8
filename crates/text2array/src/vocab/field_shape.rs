//! # Field Shapes
//!
//! The textual nesting depth of a field: a scalar string, a sequence of strings,
//! or a sequence of sequences of strings.
//!
//! Both counting (corpus scan) and rewriting (encoding) dispatch on this one
//! closed variant.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{T2AResult, Text2ArrayError},
    samples::FieldValue,
};

/// The structural depth of a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldShape {
    /// Depth 0: `"tok"`.
    Scalar,

    /// Depth 1: `["tok", ...]`.
    Seq,

    /// Depth 2: `[["tok", ...], ...]`.
    SeqOfSeq,
}

impl fmt::Display for FieldShape {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            FieldShape::Scalar => "scalar",
            FieldShape::Seq => "seq",
            FieldShape::SeqOfSeq => "seq-of-seq",
        })
    }
}

impl FieldShape {
    /// The nesting depth: 0, 1 or 2.
    pub fn depth(self) -> usize {
        match self {
            FieldShape::Scalar => 0,
            FieldShape::Seq => 1,
            FieldShape::SeqOfSeq => 2,
        }
    }

    /// The shape for a depth, if supported.
    pub fn from_depth(depth: usize) -> Option<Self> {
        match depth {
            0 => Some(FieldShape::Scalar),
            1 => Some(FieldShape::Seq),
            2 => Some(FieldShape::SeqOfSeq),
            _ => None,
        }
    }

    /// Does this shape carry positions, and so a padding token?
    pub fn is_sequence(self) -> bool {
        self.depth() >= 1
    }

    /// Classify a value by its shape.
    ///
    /// An empty list classifies as [`FieldShape::Seq`].
    ///
    /// ## Returns
    /// `None` if the value is not text at any supported depth;
    /// numbers, lists holding numbers, and lists mixing strings with lists.
    pub fn classify(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Str(_) => Some(FieldShape::Scalar),
            FieldValue::List(items) => {
                if items.iter().all(|item| matches!(item, FieldValue::Str(_))) {
                    Some(FieldShape::Seq)
                } else if items.iter().all(|item| {
                    item.as_list()
                        .is_some_and(|inner| inner.iter().all(|v| matches!(v, FieldValue::Str(_))))
                }) {
                    Some(FieldShape::SeqOfSeq)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Visit every leaf token of `value`, in order.
    ///
    /// ## Returns
    /// An error if `value` does not have this shape.
    pub fn for_each_token<'a, F>(
        self,
        value: &'a FieldValue,
        mut f: F,
    ) -> T2AResult<()>
    where
        F: FnMut(&'a str),
    {
        visit_tokens(value, self.depth(), self, &mut f)
    }

    /// Rebuild `value` with every leaf token replaced by `f(token)`.
    ///
    /// The nesting is kept exactly; empty lists stay empty lists.
    ///
    /// ## Returns
    /// The first error from `f`, or an error if `value` does not have this shape.
    pub fn map_tokens<F>(
        self,
        value: &FieldValue,
        mut f: F,
    ) -> T2AResult<FieldValue>
    where
        F: FnMut(&str) -> T2AResult<FieldValue>,
    {
        map_leaves(value, self.depth(), self, &mut f)
    }
}

fn shape_mismatch(
    shape: FieldShape,
    value: &FieldValue,
) -> Text2ArrayError {
    Text2ArrayError::MalformedInput(format!(
        "expected {shape} text value, found {}",
        value.kind_name()
    ))
}

fn visit_tokens<'a, F>(
    value: &'a FieldValue,
    depth: usize,
    shape: FieldShape,
    f: &mut F,
) -> T2AResult<()>
where
    F: FnMut(&'a str),
{
    match value {
        FieldValue::Str(token) if depth == 0 => {
            f(token);
            Ok(())
        }
        FieldValue::List(items) if depth > 0 => {
            for item in items {
                visit_tokens(item, depth - 1, shape, f)?;
            }
            Ok(())
        }
        _ => Err(shape_mismatch(shape, value)),
    }
}

fn map_leaves<F>(
    value: &FieldValue,
    depth: usize,
    shape: FieldShape,
    f: &mut F,
) -> T2AResult<FieldValue>
where
    F: FnMut(&str) -> T2AResult<FieldValue>,
{
    match value {
        FieldValue::Str(token) if depth == 0 => f(token),
        FieldValue::List(items) if depth > 0 => items
            .iter()
            .map(|item| map_leaves(item, depth - 1, shape, f))
            .collect::<T2AResult<Vec<_>>>()
            .map(FieldValue::List),
        _ => Err(shape_mismatch(shape, value)),
    }
}
