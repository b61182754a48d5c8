//! # String Store ``{ String <-> usize }`` Vocabulary

use serde::{Deserialize, Serialize};

use crate::{
    errors::{T2AResult, Text2ArrayError},
    types::{T2AHashMap, TokenIndex},
};

/// A bidirectional mapping between tokens and dense indices, for one field.
///
/// Indices are `0..len()`, in token order. An optional unknown index is
/// returned by [`StringStore::index`] for tokens which are not in the store.
///
/// ## Style Hints
/// Instance names should prefer `store`, or `string_store`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "StringStoreRepr", into = "StringStoreRepr")]
pub struct StringStore {
    /// ``index -> token``.
    itos: Vec<String>,

    /// ``token -> index``.
    stoi: T2AHashMap<String, TokenIndex>,

    /// The fallback index for unknown tokens.
    unk_index: Option<TokenIndex>,
}

/// Serialized form; the inverse map is rebuilt on load.
#[derive(Serialize, Deserialize)]
struct StringStoreRepr {
    itos: Vec<String>,

    #[serde(default)]
    unk_index: Option<TokenIndex>,
}

impl TryFrom<StringStoreRepr> for StringStore {
    type Error = Text2ArrayError;

    fn try_from(repr: StringStoreRepr) -> T2AResult<Self> {
        Self::init(repr.itos, repr.unk_index)
    }
}

impl From<StringStore> for StringStoreRepr {
    fn from(store: StringStore) -> Self {
        StringStoreRepr {
            itos: store.itos,
            unk_index: store.unk_index,
        }
    }
}

impl PartialEq for StringStore {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.itos == other.itos && self.unk_index == other.unk_index
    }
}

impl Eq for StringStore {}

impl StringStore {
    /// Initialize a [`StringStore`].
    ///
    /// ## Arguments
    /// * `itos` - The tokens, in index order.
    /// * `unk_index` - The optional fallback index for unknown tokens.
    ///
    /// ## Returns
    /// The new store; or an error if `itos` has duplicates,
    /// or `unk_index` is out of range.
    pub fn init(
        itos: Vec<String>,
        unk_index: Option<TokenIndex>,
    ) -> T2AResult<Self> {
        if let Some(unk) = unk_index
            && unk >= itos.len()
        {
            return Err(Text2ArrayError::InvalidArgument(format!(
                "unknown index {unk} out of range for {} tokens",
                itos.len()
            )));
        }

        let mut stoi: T2AHashMap<String, TokenIndex> = Default::default();
        stoi.reserve(itos.len());
        for (index, token) in itos.iter().enumerate() {
            if stoi.insert(token.clone(), index).is_some() {
                return Err(Text2ArrayError::InvalidArgument(format!(
                    "duplicate token '{token}' in vocabulary"
                )));
            }
        }

        Ok(Self {
            itos,
            stoi,
            unk_index,
        })
    }

    /// Build a store from tokens, with no unknown fallback.
    ///
    /// ## Arguments
    /// * `tokens` - The tokens, in index order.
    pub fn from_tokens<I, S>(tokens: I) -> T2AResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::init(tokens.into_iter().map(Into::into).collect(), None)
    }

    /// Build a store from tokens, falling back to `unk` for unknown tokens.
    ///
    /// ## Arguments
    /// * `tokens` - The tokens, in index order; must contain `unk`.
    /// * `unk` - The unknown token.
    pub fn from_tokens_with_unk<I, S>(
        tokens: I,
        unk: &str,
    ) -> T2AResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::from_tokens(tokens)?;
        match store.get_index(unk) {
            Some(index) => Ok(Self {
                unk_index: Some(index),
                ..store
            }),
            None => Err(Text2ArrayError::InvalidArgument(format!(
                "unknown token '{unk}' is not in the token list"
            ))),
        }
    }

    /// The number of tokens, including special tokens.
    pub fn len(&self) -> usize {
        self.itos.len()
    }

    /// Is the store empty?
    pub fn is_empty(&self) -> bool {
        self.itos.is_empty()
    }

    /// Is `token` in the store?
    ///
    /// The unknown fallback does not count; only stored tokens do.
    pub fn contains(
        &self,
        token: &str,
    ) -> bool {
        self.stoi.contains_key(token)
    }

    /// Iterate over the tokens in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.itos.iter().map(String::as_str)
    }

    /// The tokens in index order.
    pub fn tokens(&self) -> &[String] {
        &self.itos
    }

    /// The fallback index for unknown tokens, if any.
    pub fn unk_index(&self) -> Option<TokenIndex> {
        self.unk_index
    }

    /// The unknown token, if any.
    pub fn unk_token(&self) -> Option<&str> {
        self.unk_index.map(|index| self.itos[index].as_str())
    }

    /// The index of `token`, without the unknown fallback.
    pub fn get_index(
        &self,
        token: &str,
    ) -> Option<TokenIndex> {
        self.stoi.get(token).copied()
    }

    /// The index of `token`.
    ///
    /// ## Returns
    /// The stored index; else the unknown index;
    /// else [`Text2ArrayError::TokenNotFound`].
    pub fn index(
        &self,
        token: &str,
    ) -> T2AResult<TokenIndex> {
        self.get_index(token)
            .or(self.unk_index)
            .ok_or_else(|| Text2ArrayError::TokenNotFound {
                token: token.to_string(),
            })
    }

    /// The token at `index`, if in range.
    pub fn token(
        &self,
        index: TokenIndex,
    ) -> Option<&str> {
        self.itos.get(index).map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a StringStore {
    type Item = &'a str;
    type IntoIter = core::iter::Map<core::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.itos
            .iter()
            .map(String::as_str as fn(&'a String) -> &'a str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tokens() {
        let store = StringStore::from_tokens("abc".chars().map(String::from)).unwrap();

        assert_eq!(store.len(), 3);
        assert!(!store.is_empty());
        assert_eq!(store.iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        for (i, t) in ["a", "b", "c"].into_iter().enumerate() {
            assert!(store.contains(t));
            assert_eq!(store.index(t).unwrap(), i);
            assert_eq!(store.token(i), Some(t));
        }

        assert_eq!(store.unk_index(), None);
        assert_eq!(store.unk_token(), None);
        assert!(!store.contains("d"));
        assert_eq!(store.get_index("d"), None);
        assert_eq!(store.token(3), None);
    }

    #[test]
    fn test_token_not_found() {
        let store = StringStore::from_tokens(["b"]).unwrap();
        let err = store.index("foo").unwrap_err();
        assert!(matches!(&err, Text2ArrayError::TokenNotFound { token } if token == "foo"));
        assert!(err.to_string().contains("'foo' not found in vocabulary"));
    }

    #[test]
    fn test_unk_fallback() {
        let store = StringStore::from_tokens_with_unk(["<unk>", "c", "b"], "<unk>").unwrap();

        assert_eq!(store.unk_index(), Some(0));
        assert_eq!(store.unk_token(), Some("<unk>"));
        assert_eq!(store.index("c").unwrap(), 1);
        assert_eq!(store.index("foo").unwrap(), 0);
        assert!(!store.contains("foo"));
        assert!(store.contains("<unk>"));

        assert!(StringStore::from_tokens_with_unk(["a"], "<unk>").is_err());
    }

    #[test]
    fn test_init_validation() {
        assert!(matches!(
            StringStore::from_tokens(["a", "b", "a"]),
            Err(Text2ArrayError::InvalidArgument(_))
        ));
        assert!(matches!(
            StringStore::init(vec!["a".to_string()], Some(1)),
            Err(Text2ArrayError::InvalidArgument(_))
        ));
        assert!(StringStore::init(vec![], None).unwrap().is_empty());
    }

    #[test]
    fn test_eq() {
        let a = StringStore::from_tokens(["x", "y"]).unwrap();
        let b = StringStore::from_tokens(vec!["x".to_string(), "y".to_string()]).unwrap();
        let c = StringStore::from_tokens(["y", "x"]).unwrap();
        let d = StringStore::from_tokens_with_unk(["x", "y"], "x").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_serde() {
        let store = StringStore::from_tokens_with_unk(["<pad>", "<unk>", "a"], "<unk>").unwrap();
        let text = serde_json::to_string(&store).unwrap();
        assert_eq!(text, r#"{"itos":["<pad>","<unk>","a"],"unk_index":1}"#);

        let loaded: StringStore = serde_json::from_str(&text).unwrap();
        assert_eq!(loaded, store);
        assert_eq!(loaded.index("zzz").unwrap(), 1);

        let loaded: StringStore = serde_json::from_str(r#"{"itos":["a"]}"#).unwrap();
        assert_eq!(loaded.unk_index(), None);

        assert!(serde_json::from_str::<StringStore>(r#"{"itos":["a","a"]}"#).is_err());
    }

    #[test]
    fn test_into_iter() {
        let store = StringStore::from_tokens(["a", "b"]).unwrap();
        let mut seen = vec![];
        for t in &store {
            seen.push(t);
        }
        assert_eq!(seen, vec!["a", "b"]);
    }
}
