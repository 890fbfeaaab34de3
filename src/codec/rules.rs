//! Matching rules attached to a codec descriptor
//!
//! Rules belong to an external rule engine. Descriptors only store them in
//! order and render them for diagnostics.

use std::fmt;
use std::sync::Arc;

/// An opaque matching rule
pub trait Rule: fmt::Display + fmt::Debug + Send + Sync {}

impl<T: fmt::Display + fmt::Debug + Send + Sync> Rule for T {}

/// Ordered rule collection
#[derive(Debug, Clone, Default)]
pub struct Rules {
    rules: Vec<Arc<dyn Rule>>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule, keeping insertion order
    pub fn push(&mut self, rule: impl Rule + 'static) {
        self.rules.push(Arc::new(rule));
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Rule>> {
        self.rules.iter()
    }

    /// Rendered rules, in order
    pub fn descriptions(&self) -> Vec<String> {
        self.rules.iter().map(|rule| rule.to_string()).collect()
    }
}

impl FromIterator<Arc<dyn Rule>> for Rules {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Rule>>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
