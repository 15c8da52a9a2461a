//! # doctree
//!
//! Build an in-memory document tree from a stream of write events, without
//! going through text.
//!
//! ```
//! use doctree::{Scalar, TreeWriter};
//!
//! let mut writer = TreeWriter::new();
//! writer.start_object()?;
//! writer.property_name("a")?;
//! writer.value(5)?;
//! writer.end_object()?;
//!
//! let doc = writer.finish()?;
//! let a = doc.root().and_then(|root| root.property("a")).unwrap();
//! assert_eq!(a.value(), Some(&Scalar::Integer(5)));
//! assert_eq!(a.path(), "a");
//! # Ok::<(), doctree::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`tree`] -- node arena, node kinds and navigation handles
//! - [`writer`] -- the event-driven [`TreeWriter`]
//! - [`mod@serde`] -- build documents from `Serialize` values
//! - [`filter`] -- boolean filters derived from finished trees
//! - [`error`] -- the crate's error type

pub mod constants;
pub mod error;
pub mod filter;
pub(crate) mod num;
pub mod options;
pub mod serde;
pub(crate) mod text;
pub mod tree;
pub mod writer;

pub use crate::error::{Error, ErrorKind};
pub use crate::filter::{boolean_filter, Filter};
pub use crate::options::WriterOptions;
pub use crate::serde::{to_document, NodeSerializer};
pub use crate::tree::{
    ContainerKind, DateValue, Document, Node, NodeId, NodeKind, PresentationTag, Scalar,
    ValueKind,
};
pub use crate::writer::{Event, EventKind, TreeWriter, WriterState};

pub type Result<T> = std::result::Result<T, Error>;
