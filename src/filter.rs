//! Boolean filters derived from finished trees.
//!
//! An array of boolean leaves such as `[true, false]` describes the accepted
//! values of one field. Each leaf becomes an equality predicate on that field
//! and the predicates are or-ed together:
//!
//! - no boolean leaf -- no filter
//! - one leaf -- that predicate on its own
//! - several leaves -- `Or` of all of them, in document order
//!
//! The single-leaf collapse is specific to this boolean form; other
//! combinations are not assumed to collapse the same way.

use smol_str::SmolStr;

use crate::tree::{Node, NodeKind, Scalar};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Equals { field: SmolStr, value: bool },
    Or(Vec<Filter>),
}

impl Filter {
    pub fn equals(field: &str, value: bool) -> Self {
        Filter::Equals {
            field: SmolStr::new(field),
            value,
        }
    }

    /// Evaluate against a record; `lookup` returns the field's boolean value.
    /// A missing field never matches.
    pub fn matches<F>(&self, lookup: &F) -> bool
    where
        F: Fn(&str) -> Option<bool>,
    {
        match self {
            Filter::Equals { field, value } => lookup(field.as_str()) == Some(*value),
            Filter::Or(filters) => filters.iter().any(|filter| filter.matches(lookup)),
        }
    }
}

/// Build a filter on `field` from the boolean children of an array node.
///
/// A property slot is looked through to its value. Non-boolean children
/// are skipped; anything other than an array yields `None`.
///
/// # Examples
///
/// ```
/// use doctree::{boolean_filter, Filter, TreeWriter};
///
/// let mut writer = TreeWriter::new();
/// writer.start_array()?;
/// writer.value(true)?;
/// writer.end_array()?;
/// let doc = writer.finish()?;
///
/// let filter = boolean_filter(doc.root().unwrap(), "active");
/// assert_eq!(filter, Some(Filter::equals("active", true)));
/// # Ok::<(), doctree::Error>(())
/// ```
pub fn boolean_filter(node: Node<'_>, field: &str) -> Option<Filter> {
    let node = match node.kind() {
        NodeKind::Property(_) => node.first_child()?,
        _ => node,
    };
    if !matches!(node.kind(), NodeKind::Array) {
        return None;
    }

    let mut predicates: Vec<Filter> = node
        .children()
        .filter_map(|child| match child.value() {
            Some(Scalar::Boolean(value)) => Some(Filter::equals(field, *value)),
            _ => None,
        })
        .collect();

    match predicates.len() {
        0 => None,
        1 => predicates.pop(),
        _ => Some(Filter::Or(predicates)),
    }
}
