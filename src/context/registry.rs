//! Formatter registry: named and positional formatters for one expansion site

use std::collections::HashMap;

use crate::error::FormatError;
use crate::formatter::Formatter;

/// A stored formatter entry
#[derive(Debug, Clone, PartialEq)]
struct Entry {
    /// Registered name; positional values have none
    name: Option<String>,
    formatter: Formatter,
}

/// Builder for [`Context`]
///
/// Registration is infallible; name conflicts are reported by [`ContextBuilder::build`].
#[derive(Debug, Default, Clone)]
pub struct ContextBuilder {
    entries: Vec<Entry>,
}

impl ContextBuilder {
    /// Create a new empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named formatter
    pub fn add_formatter(
        mut self,
        name: impl Into<String>,
        formatter: impl Into<Formatter>,
    ) -> Self {
        self.entries.push(Entry {
            name: Some(name.into()),
            formatter: formatter.into(),
        });
        self
    }

    /// Register an unnamed formatter, reachable by index or the implicit cursor
    pub fn push(mut self, formatter: impl Into<Formatter>) -> Self {
        self.entries.push(Entry {
            name: None,
            formatter: formatter.into(),
        });
        self
    }

    /// Freeze the registry
    pub fn build(self) -> Result<Context, FormatError> {
        let mut names = HashMap::new();
        for (index, entry) in self.entries.iter().enumerate() {
            if let Some(name) = &entry.name {
                if names.insert(name.clone(), index).is_some() {
                    return Err(FormatError::DuplicateName { name: name.clone() });
                }
            }
        }

        Ok(Context {
            entries: self.entries,
            names,
        })
    }
}

/// Immutable set of formatters that templates are expanded against
///
/// Entries keep registration order for `${0}`-style and implicit references.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Context {
    entries: Vec<Entry>,
    names: HashMap<String, usize>,
}

impl Context {
    /// Build a context of unnamed positional values
    pub fn from_values<I, F>(values: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Formatter>,
    {
        Self {
            entries: values
                .into_iter()
                .map(|value| Entry {
                    name: None,
                    formatter: value.into(),
                })
                .collect(),
            names: HashMap::new(),
        }
    }

    /// Get a formatter by name
    pub fn get(&self, name: &str) -> Option<&Formatter> {
        self.names.get(name).map(|&index| &self.entries[index].formatter)
    }

    /// Get a formatter by registration position
    pub fn get_index(&self, index: usize) -> Option<&Formatter> {
        self.entries.get(index).map(|entry| &entry.formatter)
    }

    /// Check if a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Number of entries, named and positional
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|entry| entry.name.as_deref())
    }

    /// Start a builder holding this context's entries, to extend it
    pub fn to_builder(&self) -> ContextBuilder {
        ContextBuilder {
            entries: self.entries.clone(),
        }
    }
}
