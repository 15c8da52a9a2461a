//! Forward-only builder that turns write events into a [`Document`].
//!
//! The writer keeps a single "current parent" handle. Nesting lives in the
//! tree itself: closing a container moves to its parent, skipping the
//! property slot the container was the value of. A property slot closes
//! itself as soon as it receives its one value.

mod event;
mod replay;

use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::error::Error;
use crate::options::WriterOptions;
use crate::tree::{ContainerKind, Document, Node, NodeId, NodeKind, PresentationTag, Scalar};
use crate::Result;

pub use event::{Event, EventKind, WriterState};

#[derive(Debug)]
pub struct TreeWriter {
    doc: Document,
    current: Option<NodeId>,
    depth: usize,
    tag: PresentationTag,
    options: WriterOptions,
}

impl Default for TreeWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeWriter {
    pub fn new() -> Self {
        Self::with_options(WriterOptions::default())
    }

    pub fn with_options(options: WriterOptions) -> Self {
        Self {
            doc: Document::new(),
            current: None,
            depth: 0,
            tag: options.default_tag,
            options,
        }
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Tag stamped on nodes created by the convenience methods.
    pub fn tag(&self) -> PresentationTag {
        self.tag
    }

    pub fn set_tag(&mut self, tag: PresentationTag) {
        self.tag = tag;
    }

    pub fn state(&self) -> WriterState {
        match self.current.and_then(|id| self.doc.kind_of(id)) {
            Some(NodeKind::Object) => WriterState::InsideObject,
            Some(NodeKind::Array) => WriterState::InsideArray,
            Some(NodeKind::Constructor(_)) => WriterState::InsideConstructor,
            Some(NodeKind::Property(_)) => WriterState::AwaitingPropertyValue,
            // values never become the current parent
            Some(NodeKind::Value(_)) | None => WriterState::TopLevel,
        }
    }

    /// Number of open objects, arrays and constructors.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Id of the current parent, `None` at top level.
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// True once a root exists and every container opened has been closed.
    pub fn is_complete(&self) -> bool {
        self.current.is_none() && self.doc.root_id().is_some()
    }

    /// Root built so far. Before completion this is a partial tree.
    pub fn root(&self) -> Option<Node<'_>> {
        self.doc.root()
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Discard everything written so far.
    pub fn reset(&mut self) {
        self.doc.clear();
        self.current = None;
        self.depth = 0;
        self.tag = self.options.default_tag;
    }

    /// Apply one event, stamping `tag` on the node it creates.
    ///
    /// End events create no node and ignore `tag`.
    pub fn write(&mut self, event: Event, tag: PresentationTag) -> Result<()> {
        let kind = event.kind();
        let result = match event {
            Event::StartObject => self.start_container(ContainerKind::Object, kind, tag),
            Event::StartArray => self.start_container(ContainerKind::Array, kind, tag),
            Event::StartConstructor(name) => {
                self.start_container(ContainerKind::Constructor(name), kind, tag)
            }
            Event::PropertyName(name) => self.push_property(name, tag),
            Event::Value(value) => self.push_value(value, tag),
            Event::EndObject | Event::EndArray | Event::EndConstructor => self.end_container(kind),
        };
        match &result {
            Ok(()) => trace!(event = %kind, state = %self.state(), depth = self.depth, "accepted"),
            Err(err) => debug!(error = %err, "rejected"),
        }
        result
    }

    pub fn start_object(&mut self) -> Result<()> {
        self.write(Event::StartObject, self.tag)
    }

    pub fn end_object(&mut self) -> Result<()> {
        self.write(Event::EndObject, self.tag)
    }

    pub fn start_array(&mut self) -> Result<()> {
        self.write(Event::StartArray, self.tag)
    }

    pub fn end_array(&mut self) -> Result<()> {
        self.write(Event::EndArray, self.tag)
    }

    pub fn start_constructor(&mut self, name: &str) -> Result<()> {
        self.write(Event::StartConstructor(SmolStr::new(name)), self.tag)
    }

    pub fn end_constructor(&mut self) -> Result<()> {
        self.write(Event::EndConstructor, self.tag)
    }

    pub fn property_name(&mut self, name: &str) -> Result<()> {
        self.write(Event::PropertyName(SmolStr::new(name)), self.tag)
    }

    /// Close whichever container is currently open.
    ///
    /// At top level or with a property awaiting its value this is rejected
    /// as a mismatched `EndObject`.
    pub fn end(&mut self) -> Result<()> {
        let event = match self.state() {
            WriterState::InsideArray => Event::EndArray,
            WriterState::InsideConstructor => Event::EndConstructor,
            WriterState::InsideObject
            | WriterState::TopLevel
            | WriterState::AwaitingPropertyValue => Event::EndObject,
        };
        self.write(event, self.tag)
    }

    /// Write any scalar; see [`Scalar`]'s `From` impls for the kind mapping.
    pub fn value(&mut self, value: impl Into<Scalar>) -> Result<()> {
        self.write(Event::Value(value.into()), self.tag)
    }

    pub fn write_null(&mut self) -> Result<()> {
        self.value(Scalar::Null)
    }

    pub fn write_undefined(&mut self) -> Result<()> {
        self.value(Scalar::Undefined)
    }

    /// `None` is written as an empty string, never as null.
    pub fn write_string(&mut self, value: Option<&str>) -> Result<()> {
        self.value(Scalar::string(value))
    }

    /// Fixed-point decimal `mantissa * 10^-scale`, written as a Float.
    pub fn write_decimal(&mut self, mantissa: i128, scale: u32) -> Result<()> {
        self.value(Scalar::decimal(mantissa, scale))
    }

    /// URIs are kept as their canonical text.
    pub fn write_uri(&mut self, uri: &str) -> Result<()> {
        self.value(Scalar::from(uri))
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.value(Scalar::from(bytes))
    }

    /// Verbatim text, stored unescaped.
    pub fn write_raw_value(&mut self, text: &str) -> Result<()> {
        self.value(Scalar::raw(text))
    }

    pub fn write_comment(&mut self, text: &str) -> Result<()> {
        self.value(Scalar::comment(text))
    }

    /// Hand over the tree, closing open containers when the options allow.
    pub fn finish(mut self) -> Result<Document> {
        if self.current.is_some() {
            if !self.options.auto_complete {
                return Err(Error::invalid_structure("unclosed container").with_state(self.state()));
            }
            debug!(depth = self.depth, "auto-completing open containers");
            while self.current.is_some() {
                if self.state() == WriterState::AwaitingPropertyValue {
                    self.write(Event::Value(Scalar::Null), self.tag)?;
                } else {
                    self.end()?;
                }
            }
        }
        Ok(self.doc)
    }

    /// Hand over the tree as-is, partial or not.
    pub fn into_document(self) -> Document {
        self.doc
    }

    fn start_container(
        &mut self,
        kind: ContainerKind,
        event: EventKind,
        tag: PresentationTag,
    ) -> Result<()> {
        self.check_value_slot(event)?;
        if self.depth >= self.options.max_depth {
            return Err(self.structure_error(
                format!("maximum nesting depth of {} exceeded", self.options.max_depth),
                event,
            ));
        }
        let id = self.doc.create_container(kind, tag)?;
        self.attach(id, event)?;
        self.current = Some(id);
        self.depth += 1;
        Ok(())
    }

    fn push_property(&mut self, name: SmolStr, tag: PresentationTag) -> Result<()> {
        if self.state() != WriterState::InsideObject {
            return Err(self.structure_error("property name outside object", EventKind::PropertyName));
        }
        let id = self.doc.create_container(ContainerKind::Property(name), tag)?;
        self.attach(id, EventKind::PropertyName)?;
        self.current = Some(id);
        Ok(())
    }

    fn push_value(&mut self, value: Scalar, tag: PresentationTag) -> Result<()> {
        let event = EventKind::Value(value.kind());
        self.check_value_slot(event)?;
        let id = self.doc.create_value(value, tag)?;
        self.attach(id, event)?;
        if let Some(current) = self.current {
            if matches!(self.doc.kind_of(current), Some(NodeKind::Property(_))) {
                self.current = self.doc.parent_of(current);
            }
        }
        Ok(())
    }

    fn end_container(&mut self, event: EventKind) -> Result<()> {
        let matches = matches!(
            (event, self.state()),
            (EventKind::EndObject, WriterState::InsideObject)
                | (EventKind::EndArray, WriterState::InsideArray)
                | (EventKind::EndConstructor, WriterState::InsideConstructor)
        );
        let closed = match self.current {
            Some(id) if matches => id,
            _ => return Err(self.structure_error("mismatched close", event)),
        };
        self.current = self.pop_target(closed);
        self.depth -= 1;
        Ok(())
    }

    /// Parent to return to after `closed`, skipping a property slot.
    fn pop_target(&self, closed: NodeId) -> Option<NodeId> {
        let parent = self.doc.parent_of(closed)?;
        match self.doc.kind_of(parent) {
            Some(NodeKind::Property(_)) => self.doc.parent_of(parent),
            _ => Some(parent),
        }
    }

    /// Reject values and starts where no node may go.
    fn check_value_slot(&self, event: EventKind) -> Result<()> {
        match self.state() {
            WriterState::TopLevel if self.doc.root_id().is_some() => {
                Err(self.structure_error("multiple root values", event))
            }
            WriterState::InsideObject => {
                Err(self.structure_error("object members need a property name", event))
            }
            _ => Ok(()),
        }
    }

    fn attach(&mut self, id: NodeId, event: EventKind) -> Result<()> {
        let state = self.state();
        let attached = match self.current {
            Some(parent) => self.doc.append(parent, id),
            None => self.doc.set_root(id),
        };
        attached.map_err(|err| err.with_event(event).with_state(state))
    }

    fn structure_error(&self, message: impl Into<String>, event: EventKind) -> Error {
        Error::invalid_structure(message)
            .with_event(event)
            .with_state(self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ValueKind;

    #[rstest::rstest]
    fn test_property_auto_closes_after_value() {
        let mut writer = TreeWriter::new();
        writer.start_object().unwrap();
        let object = writer.current();
        writer.property_name("a").unwrap();
        assert_eq!(writer.state(), WriterState::AwaitingPropertyValue);
        writer.value(5).unwrap();
        assert_eq!(writer.state(), WriterState::InsideObject);
        assert_eq!(writer.current(), object);
    }

    #[rstest::rstest]
    fn test_container_value_closes_property_on_end() {
        let mut writer = TreeWriter::new();
        writer.start_object().unwrap();
        let object = writer.current();
        writer.property_name("list").unwrap();
        writer.start_array().unwrap();
        assert_eq!(writer.depth(), 2);
        writer.end_array().unwrap();
        assert_eq!(writer.current(), object);
        assert_eq!(writer.state(), WriterState::InsideObject);
        assert_eq!(writer.depth(), 1);
    }

    #[rstest::rstest]
    fn test_mismatched_close_names_event_and_state() {
        let mut writer = TreeWriter::new();
        writer.start_array().unwrap();
        let err = writer.end_object().unwrap_err();
        assert!(err.is_invalid_structure());
        assert_eq!(err.event, Some(EventKind::EndObject));
        assert_eq!(err.state, Some(WriterState::InsideArray));
        assert_eq!(writer.state(), WriterState::InsideArray);
    }

    #[rstest::rstest]
    fn test_end_with_pending_property_is_mismatched() {
        let mut writer = TreeWriter::new();
        writer.start_object().unwrap();
        writer.property_name("a").unwrap();
        let err = writer.end_object().unwrap_err();
        assert_eq!(err.message, "mismatched close");
        assert_eq!(err.state, Some(WriterState::AwaitingPropertyValue));
    }

    #[rstest::rstest]
    fn test_rejected_value_creates_no_node() {
        let mut writer = TreeWriter::new();
        writer.start_object().unwrap();
        let before = writer.document().len();
        let err = writer.value(1).unwrap_err();
        assert_eq!(err.event, Some(EventKind::Value(ValueKind::Integer)));
        assert_eq!(writer.document().len(), before);
    }

    #[rstest::rstest]
    fn test_end_closes_current_container() {
        let mut writer = TreeWriter::new();
        writer.start_constructor("Date").unwrap();
        writer.value(2024).unwrap();
        writer.end().unwrap();
        assert!(writer.is_complete());
    }

    #[rstest::rstest]
    #[case::top_level(&[], WriterState::TopLevel)]
    #[case::pending_property(
        &[Event::StartObject, Event::PropertyName("a".into())],
        WriterState::AwaitingPropertyValue
    )]
    #[case::after_root(&[Event::Value(Scalar::Null)], WriterState::TopLevel)]
    fn test_end_without_open_container_is_mismatched_close(
        #[case] prefix: &[Event],
        #[case] state: WriterState,
    ) {
        let mut writer = TreeWriter::new();
        for event in prefix {
            writer.write(event.clone(), PresentationTag::Cell).unwrap();
        }
        let before = writer.document().len();
        let err = writer.end().unwrap_err();
        assert_eq!(err.message, "mismatched close");
        assert_eq!(err.event, Some(EventKind::EndObject));
        assert_eq!(err.state, Some(state));
        assert_eq!(writer.state(), state);
        assert_eq!(writer.document().len(), before);
    }

    #[rstest::rstest]
    fn test_reset_discards_tree() {
        let mut writer = TreeWriter::new();
        writer.set_tag(PresentationTag::Muted);
        writer.start_array().unwrap();
        writer.reset();
        assert!(writer.root().is_none());
        assert_eq!(writer.depth(), 0);
        assert_eq!(writer.tag(), PresentationTag::Cell);
        writer.value("fresh").unwrap();
        assert!(writer.is_complete());
    }

    #[rstest::rstest]
    fn test_finish_auto_completes_when_enabled() {
        let options = WriterOptions::new().with_auto_complete(true);
        let mut writer = TreeWriter::with_options(options);
        writer.start_object().unwrap();
        writer.property_name("list").unwrap();
        writer.start_array().unwrap();
        writer.value(1).unwrap();
        writer.start_object().unwrap();
        writer.property_name("pending").unwrap();

        let doc = writer.finish().unwrap();
        let root = doc.root().unwrap();
        let pending = root
            .property("list")
            .and_then(|list| list.child(1))
            .and_then(|object| object.property("pending"))
            .unwrap();
        assert_eq!(pending.value(), Some(&Scalar::Null));
    }

    #[rstest::rstest]
    fn test_finish_with_open_containers_fails_by_default() {
        let mut writer = TreeWriter::new();
        writer.start_array().unwrap();
        let err = writer.finish().unwrap_err();
        assert_eq!(err.message, "unclosed container");
        assert_eq!(err.state, Some(WriterState::InsideArray));

        let mut writer = TreeWriter::new();
        writer.start_object().unwrap();
        writer.property_name("a").unwrap();
        let err = writer.finish().unwrap_err();
        assert_eq!(err.message, "unclosed container");
        assert_eq!(err.state, Some(WriterState::AwaitingPropertyValue));
    }

    #[rstest::rstest]
    fn test_default_tag_from_options() {
        let options = WriterOptions::new().with_default_tag(PresentationTag::Code);
        let mut writer = TreeWriter::with_options(options);
        writer.value(1).unwrap();
        assert_eq!(writer.root().unwrap().tag(), PresentationTag::Code);
    }
}
