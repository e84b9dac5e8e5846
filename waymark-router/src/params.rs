use std::{ops::Index, sync::Arc};

use serde::{de, Deserialize};

use crate::de::ParamsDeserializer;

/// Values captured by a successful match.
///
/// Named parameters (`:name`) are stored with their percent-decoded values. Wildcard (`*`)
/// captures are unnamed and kept in left-to-right template order as _splats_.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    /// Name->value pairs in template order.
    named: Vec<(Arc<str>, String)>,

    /// Positional wildcard captures.
    splats: Vec<String>,
}

impl Params {
    pub fn new() -> Params {
        Params::default()
    }

    pub(crate) fn add(&mut self, name: Arc<str>, value: String) {
        self.named.push((name, value));
    }

    pub(crate) fn add_splat(&mut self, value: String) {
        self.splats.push(value);
    }

    /// Check if there are any captured values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.splats.is_empty()
    }

    /// Returns number of named parameters.
    #[inline]
    pub fn len(&self) -> usize {
        self.named.len()
    }

    /// Get matched parameter by name.
    ///
    /// Names are case-sensitive; `a` and `A` are different parameters.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.named
            .iter()
            .find(|(key, _)| &**key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the splat captured by the `idx`-th wildcard, if any.
    #[inline]
    pub fn splat(&self, idx: usize) -> Option<&str> {
        self.splats.get(idx).map(String::as_str)
    }

    /// Returns all splats in left-to-right template order.
    #[inline]
    pub fn splats(&self) -> &[String] {
        &self.splats
    }

    /// Return iterator to named items in parameter container.
    pub fn iter(&self) -> ParamsIter<'_> {
        ParamsIter {
            inner: self.named.iter(),
        }
    }

    /// Deserializes named parameters to a specified type `U`.
    ///
    /// # Errors
    ///
    /// Returns error when named parameters cannot be deserialized into a `U` type.
    pub fn load<'de, U: Deserialize<'de>>(&'de self) -> Result<U, de::value::Error> {
        Deserialize::deserialize(ParamsDeserializer::new(self))
    }
}

#[derive(Debug)]
pub struct ParamsIter<'a> {
    inner: std::slice::Iter<'a, (Arc<str>, String)>,
}

impl<'a> Iterator for ParamsIter<'a> {
    type Item = (&'a str, &'a str);

    #[inline]
    fn next(&mut self) -> Option<(&'a str, &'a str)> {
        self.inner
            .next()
            .map(|(name, value)| (&**name, value.as_str()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ParamsIter<'_> {}

impl<'a> Index<&'a str> for Params {
    type Output = str;

    fn index(&self, name: &'a str) -> &str {
        self.get(name)
            .expect("Value for parameter is not available")
    }
}

impl Index<usize> for Params {
    type Output = str;

    fn index(&self, idx: usize) -> &str {
        &self.named[idx].1
    }
}
