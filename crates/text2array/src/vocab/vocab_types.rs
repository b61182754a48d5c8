//! # Vocabulary Types
use core::{fmt::Debug, hash::Hash};

use indexmap::IndexMap;
use num_traits::PrimInt;

use crate::{types::FieldName, vocab::StringStore};

/// A type that can be used as a token count.
///
/// Counting saturates at `Self::max_value()`; a saturated count still
/// ranks above every smaller count.
pub trait CountType: 'static + PrimInt + Hash + Default + Debug + Send + Sync {
    /// This count plus one; saturating.
    fn incremented(self) -> Self {
        self.saturating_add(Self::one())
    }

    /// Does this count reach `min_count`?
    ///
    /// Counts too large for `usize` always do.
    fn reaches(
        self,
        min_count: usize,
    ) -> bool {
        self.to_usize().is_none_or(|count| count >= min_count)
    }
}

impl<T> CountType for T where T: 'static + PrimInt + Hash + Default + Debug + Send + Sync {}

/// `{ String -> C }` map, in first-seen order.
///
/// ## Style Hints
/// Instance names should prefer `token_counts`.
pub type TokenCountMap<C> = IndexMap<String, C>;

/// `{ FieldName -> StringStore }` map, in first-discovery order.
///
/// ## Style Hints
/// Instance names should prefer `stores`, or `field_stores`.
pub type FieldStoreMap = IndexMap<FieldName, StringStore>;
