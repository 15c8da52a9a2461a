use serde_json::Value;

use super::{Event, TreeWriter};
use crate::error::Error;
use crate::options::WriterOptions;
use crate::tree::{Children, Document, Node, NodeId, NodeKind, PresentationTag, Scalar};
use crate::Result;

impl Node<'_> {
    /// Re-emit the events that build this node, depth first.
    ///
    /// End events carry the tag of the container they close.
    pub fn events(&self) -> Vec<(Event, PresentationTag)> {
        let mut out = Vec::new();
        emit(*self, &mut out);
        out
    }
}

fn emit(root: Node<'_>, out: &mut Vec<(Event, PresentationTag)>) {
    let mut stack: Vec<(Node<'_>, Children<'_>)> = Vec::new();
    open(root, out, &mut stack);
    while let Some((node, children)) = stack.last_mut() {
        match children.next() {
            Some(child) => open(child, out, &mut stack),
            None => {
                let node = *node;
                stack.pop();
                if let Some(end) = end_event(node.kind()) {
                    out.push((end, node.tag()));
                }
            }
        }
    }
}

/// Push the event that starts `node`; containers stay on the stack until
/// their children are drained.
fn open<'doc>(
    node: Node<'doc>,
    out: &mut Vec<(Event, PresentationTag)>,
    stack: &mut Vec<(Node<'doc>, Children<'doc>)>,
) {
    let start = match node.kind() {
        NodeKind::Object => Event::StartObject,
        NodeKind::Array => Event::StartArray,
        NodeKind::Constructor(name) => Event::StartConstructor(name.clone()),
        NodeKind::Property(name) => Event::PropertyName(name.clone()),
        NodeKind::Value(value) => {
            out.push((Event::Value(value.clone()), node.tag()));
            return;
        }
    };
    out.push((start, node.tag()));
    stack.push((node, node.children()));
}

fn end_event(kind: &NodeKind) -> Option<Event> {
    match kind {
        NodeKind::Object => Some(Event::EndObject),
        NodeKind::Array => Some(Event::EndArray),
        NodeKind::Constructor(_) => Some(Event::EndConstructor),
        NodeKind::Property(_) | NodeKind::Value(_) => None,
    }
}

impl Document {
    /// Events that rebuild this document, empty when there is no root.
    pub fn events(&self) -> Vec<(Event, PresentationTag)> {
        self.root().map(|root| root.events()).unwrap_or_default()
    }

    /// Detach a copy of the subtree at `id` as a standalone document.
    ///
    /// For a property slot the copy holds the property's value.
    pub fn subtree(&self, id: NodeId) -> Result<Document> {
        let node = self
            .get(id)
            .ok_or_else(|| Error::invalid_structure(format!("unknown node #{}", id.index())))?;
        let node = match node.kind() {
            NodeKind::Property(_) => match node.first_child() {
                Some(value) => value,
                None => return Ok(Document::new()),
            },
            _ => node,
        };
        let options = WriterOptions::new()
            .with_max_depth(usize::MAX)
            .with_auto_complete(false);
        let mut writer = TreeWriter::with_options(options);
        writer.write_node(node)?;
        writer.finish()
    }
}

impl TreeWriter {
    /// Copy a node and everything below it at the current position,
    /// keeping each node's tag.
    pub fn write_node(&mut self, node: Node<'_>) -> Result<()> {
        for (event, tag) in node.events() {
            self.write(event, tag)?;
        }
        Ok(())
    }

    /// Replay a JSON value, tagging every node with the current tag.
    pub fn write_json_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.write_null(),
            Value::Bool(value) => self.value(*value),
            Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    self.value(value)
                } else if let Some(value) = number.as_u64() {
                    self.value(value)
                } else {
                    self.value(Scalar::Float(number.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Value::String(value) => self.value(value.as_str()),
            Value::Array(items) => {
                self.start_array()?;
                for item in items {
                    self.write_json_value(item)?;
                }
                self.end_array()
            }
            Value::Object(map) => {
                self.start_object()?;
                for (key, item) in map {
                    self.property_name(key)?;
                    self.write_json_value(item)?;
                }
                self.end_object()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::tree::ValueKind;

    #[rstest::rstest]
    fn test_events_reproduce_input() {
        let input = vec![
            (Event::StartObject, PresentationTag::Header),
            (Event::PropertyName("a".into()), PresentationTag::Label),
            (Event::StartConstructor("Date".into()), PresentationTag::Cell),
            (Event::Value(Scalar::Integer(2024)), PresentationTag::Code),
            (Event::EndConstructor, PresentationTag::Cell),
            (Event::PropertyName("b".into()), PresentationTag::Label),
            (Event::Value(Scalar::raw("<b/>")), PresentationTag::Muted),
            (Event::EndObject, PresentationTag::Header),
        ];
        let mut writer = TreeWriter::new();
        for (event, tag) in input.clone() {
            writer.write(event, tag).unwrap();
        }
        let doc = writer.finish().unwrap();
        assert_eq!(doc.events(), input);
    }

    #[rstest::rstest]
    fn test_deep_nesting_replays_without_recursion() {
        const LEVELS: usize = 100_000;
        let options = WriterOptions::new().with_max_depth(usize::MAX);
        let mut writer = TreeWriter::with_options(options);
        for _ in 0..LEVELS {
            writer.start_array().unwrap();
        }
        writer.value(true).unwrap();
        for _ in 0..LEVELS {
            writer.end_array().unwrap();
        }
        let doc = writer.finish().unwrap();

        let events = doc.events();
        assert_eq!(events.len(), LEVELS * 2 + 1);
        assert_eq!(events[LEVELS].0, Event::Value(Scalar::Boolean(true)));
        assert_eq!(events.last().map(|(event, _)| event), Some(&Event::EndArray));

        let copy = doc.subtree(doc.root_id().unwrap()).unwrap();
        assert_eq!(copy.len(), doc.len());
    }

    #[rstest::rstest]
    fn test_empty_document_has_no_events() {
        assert!(Document::new().events().is_empty());
    }

    #[rstest::rstest]
    fn test_write_node_copies_into_open_container() {
        let mut source = TreeWriter::new();
        source.write_json_value(&json!({"x": [1, 2]})).unwrap();
        let source = source.finish().unwrap();

        let mut writer = TreeWriter::new();
        writer.start_array().unwrap();
        writer.write_node(source.root().unwrap()).unwrap();
        writer.write_node(source.root().unwrap()).unwrap();
        writer.end_array().unwrap();
        let doc = writer.finish().unwrap();

        let root = doc.root().unwrap();
        assert_eq!(root.child_count(), 2);
        let copy = root.child(1).unwrap().property("x").unwrap();
        assert_eq!(copy.child_count(), 2);
        assert_eq!(copy.path(), "[1].x");
    }

    #[rstest::rstest]
    fn test_subtree_detaches_copy() {
        let mut writer = TreeWriter::new();
        writer
            .write_json_value(&json!({"outer": {"inner": [true, null]}}))
            .unwrap();
        let doc = writer.finish().unwrap();
        let outer_prop = doc.root().unwrap().first_child().unwrap();

        let detached = doc.subtree(outer_prop.id()).unwrap();
        let root = detached.root().unwrap();
        assert!(root.parent().is_none());
        assert_eq!(root.path(), "");
        let inner = root.property("inner").unwrap();
        assert_eq!(inner.path(), "inner");
        assert_eq!(inner.child(1).unwrap().value(), Some(&Scalar::Null));
        assert_eq!(detached.events(), outer_prop.first_child().unwrap().events());
    }

    #[rstest::rstest]
    fn test_json_value_mapping() {
        let mut writer = TreeWriter::new();
        writer
            .write_json_value(&json!([null, true, -3, 18446744073709551615u64, 1.5, "s"]))
            .unwrap();
        let doc = writer.finish().unwrap();
        let kinds: Vec<_> = doc
            .root()
            .unwrap()
            .children()
            .filter_map(|child| child.kind().value_kind())
            .collect();
        assert_eq!(
            kinds,
            [
                ValueKind::Null,
                ValueKind::Boolean,
                ValueKind::Integer,
                ValueKind::Integer,
                ValueKind::Float,
                ValueKind::String
            ]
        );
        let big = doc.root().unwrap().child(3).unwrap();
        assert_eq!(big.value(), Some(&Scalar::Integer(u64::MAX as i128)));
    }

    #[rstest::rstest]
    fn test_json_object_keeps_insertion_order() {
        let mut writer = TreeWriter::new();
        writer
            .write_json_value(&json!({"zeta": 1, "alpha": 2, "mid": 3}))
            .unwrap();
        let doc = writer.finish().unwrap();
        let names: Vec<_> = doc
            .root()
            .unwrap()
            .children()
            .filter_map(|child| child.name())
            .collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }
}
