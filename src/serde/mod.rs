//! Build documents from any `Serialize` value.
//!
//! Scalars follow the writer's kind mapping. Sequences and tuples become
//! arrays, tuple structs become named constructors, maps and structs become
//! objects, and data-carrying enum variants become a one-property object
//! keyed by the variant name.

mod ser;

use serde::Serialize;

use crate::options::WriterOptions;
use crate::tree::Document;
use crate::writer::TreeWriter;
use crate::Result;

pub use ser::NodeSerializer;

/// Serialize `value` into a finished document.
pub fn to_document<T>(value: &T, options: &WriterOptions) -> Result<Document>
where
    T: ?Sized + Serialize,
{
    let mut writer = TreeWriter::with_options(options.clone());
    writer.serialize(value)?;
    writer.finish()
}

impl TreeWriter {
    /// Write `value` at the current position.
    pub fn serialize<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(NodeSerializer::new(self))
    }
}
