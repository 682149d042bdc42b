//! Reference resolution against a [`Context`]

use crate::error::FormatError;
use crate::formatter::Formatter;
use crate::parser::ast::{Reference, Spanned};

use super::registry::Context;

/// Per-expansion resolution state
///
/// Holds the implicit cursor, so one resolver must never be shared between two
/// expansions.
#[derive(Debug)]
pub struct Resolver<'c> {
    context: &'c Context,
    cursor: usize,
}

impl<'c> Resolver<'c> {
    /// Create a resolver with the cursor at the first entry
    pub fn new(context: &'c Context) -> Self {
        Self { context, cursor: 0 }
    }

    /// Position the next implicit reference will take
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Resolve a reference to its formatter
    ///
    /// Only implicit references move the cursor.
    pub fn resolve(
        &mut self,
        reference: &Spanned<Reference>,
    ) -> Result<&'c Formatter, FormatError> {
        match &reference.node {
            Reference::Named(name) => {
                self.context
                    .get(name)
                    .ok_or_else(|| FormatError::UnknownFormatter {
                        name: name.clone(),
                        span: reference.span.clone(),
                    })
            }
            Reference::Indexed(index) => self.by_index(*index, reference),
            Reference::Implicit => {
                let index = self.cursor;
                self.cursor += 1;
                self.by_index(index, reference)
            }
        }
    }

    fn by_index(
        &self,
        index: usize,
        reference: &Spanned<Reference>,
    ) -> Result<&'c Formatter, FormatError> {
        self.context
            .get_index(index)
            .ok_or_else(|| FormatError::IndexOutOfRange {
                index,
                len: self.context.len(),
                span: reference.span.clone(),
            })
    }
}
