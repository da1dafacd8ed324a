//! ## Summary
//! Field-keyed validation failures.
//!
//! Validators collect every problem they find into a [`FieldErrors`] map keyed
//! by the request's wire field name, then either hand back the validated value
//! or the whole map. Nothing is partially applied.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Map of field name to human readable reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map holding a single field error.
    #[must_use]
    pub fn single(field: impl Into<String>, reason: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, reason);
        errors
    }

    /// Records a failure for `field`. The first reason recorded for a field wins.
    pub fn insert(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.errors.entry(field.into()).or_insert_with(|| reason.into());
    }

    /// Folds `other` into this map, keeping reasons already recorded.
    pub fn merge(&mut self, other: Self) {
        for (field, reason) in other.errors {
            self.errors.entry(field).or_insert(reason);
        }
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// ## Summary
    /// Returns `value` when no errors were recorded.
    ///
    /// ## Errors
    /// Returns `self` when at least one field failed.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, reason) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {reason}")?;
            first = false;
        }
        Ok(())
    }
}
