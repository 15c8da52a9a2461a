use std::fmt;

use smallvec::SmallVec;

use super::{Document, NodeId, NodeKind, PresentationTag, Scalar};
use crate::text::path::{push_index_segment, push_name_segment};

/// A borrowed handle for navigating a [`Document`].
#[derive(Clone, Copy)]
pub struct Node<'doc> {
    doc: &'doc Document,
    id: NodeId,
}

impl<'doc> Node<'doc> {
    pub(crate) fn new(doc: &'doc Document, id: NodeId) -> Self {
        Node { doc, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'doc Document {
        self.doc
    }

    pub fn kind(&self) -> &'doc NodeKind {
        &self.doc.data(self.id).kind
    }

    pub fn tag(&self) -> PresentationTag {
        self.doc.data(self.id).tag
    }

    pub fn is_container(&self) -> bool {
        self.kind().is_container()
    }

    /// Property or constructor name.
    pub fn name(&self) -> Option<&'doc str> {
        self.kind().name()
    }

    /// Scalar payload of a value node.
    pub fn value(&self) -> Option<&'doc Scalar> {
        self.kind().scalar()
    }

    pub fn parent(&self) -> Option<Node<'doc>> {
        self.doc
            .parent_of(self.id)
            .map(|id| Node::new(self.doc, id))
    }

    pub fn children(&self) -> Children<'doc> {
        Children {
            doc: self.doc,
            ids: self.doc.data(self.id).children.iter(),
        }
    }

    pub fn child_count(&self) -> usize {
        self.doc.data(self.id).children.len()
    }

    pub fn child(&self, index: usize) -> Option<Node<'doc>> {
        self.doc
            .data(self.id)
            .children
            .get(index)
            .map(|&id| Node::new(self.doc, id))
    }

    pub fn first_child(&self) -> Option<Node<'doc>> {
        self.child(0)
    }

    pub fn last_child(&self) -> Option<Node<'doc>> {
        self.doc
            .data(self.id)
            .children
            .last()
            .map(|&id| Node::new(self.doc, id))
    }

    pub fn next_sibling(&self) -> Option<Node<'doc>> {
        let (siblings, pos) = self.position_in_parent()?;
        siblings.get(pos + 1).map(|&id| Node::new(self.doc, id))
    }

    pub fn prev_sibling(&self) -> Option<Node<'doc>> {
        let (siblings, pos) = self.position_in_parent()?;
        let prev = pos.checked_sub(1)?;
        siblings.get(prev).map(|&id| Node::new(self.doc, id))
    }

    fn position_in_parent(&self) -> Option<(&'doc [NodeId], usize)> {
        let data = self.doc.data(self.id);
        let parent = data.parent?;
        Some((self.doc.data(parent).children.as_slice(), data.position))
    }

    /// Value of the named property when this is an object.
    pub fn property(&self, name: &str) -> Option<Node<'doc>> {
        if !matches!(self.kind(), NodeKind::Object) {
            return None;
        }
        self.children()
            .find(|child| child.name() == Some(name))
            .and_then(|prop| prop.first_child())
    }

    /// Nesting depth, counting enclosing objects, arrays and constructors.
    pub fn depth(&self) -> usize {
        self.ancestors()
            .filter(|node| !matches!(node.kind(), NodeKind::Property(_)))
            .count()
    }

    pub fn ancestors(&self) -> Ancestors<'doc> {
        Ancestors {
            doc: self.doc,
            next: self.doc.parent_of(self.id),
        }
    }

    /// Pre-order walk of everything below this node.
    pub fn descendants(&self) -> Descendants<'doc> {
        let mut stack: Vec<NodeId> = self.doc.data(self.id).children.clone();
        stack.reverse();
        Descendants {
            doc: self.doc,
            stack,
        }
    }

    /// Location from the root, e.g. `items[2].name` or `['a.b']`.
    pub fn path(&self) -> String {
        let mut chain: SmallVec<[NodeId; 16]> = SmallVec::new();
        chain.push(self.id);
        let mut cursor = self.id;
        while let Some(parent) = self.doc.parent_of(cursor) {
            chain.push(parent);
            cursor = parent;
        }

        let mut out = String::new();
        for &id in chain.iter().rev() {
            let Some(parent) = self.doc.parent_of(id) else {
                continue;
            };
            let parent_data = self.doc.data(parent);
            match &parent_data.kind {
                NodeKind::Object => {
                    if let Some(name) = self.doc.data(id).kind.name() {
                        push_name_segment(&mut out, name);
                    }
                }
                NodeKind::Array | NodeKind::Constructor(_) => {
                    push_index_segment(&mut out, self.doc.data(id).position);
                }
                NodeKind::Property(_) | NodeKind::Value(_) => {}
            }
        }
        out
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", self.kind())
            .field("tag", &self.tag())
            .finish()
    }
}

pub struct Children<'doc> {
    doc: &'doc Document,
    ids: std::slice::Iter<'doc, NodeId>,
}

impl<'doc> Iterator for Children<'doc> {
    type Item = Node<'doc>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|&id| Node::new(self.doc, id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids.next_back().map(|&id| Node::new(self.doc, id))
    }
}

impl ExactSizeIterator for Children<'_> {}

pub struct Ancestors<'doc> {
    doc: &'doc Document,
    next: Option<NodeId>,
}

impl<'doc> Iterator for Ancestors<'doc> {
    type Item = Node<'doc>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.doc.parent_of(id);
        Some(Node::new(self.doc, id))
    }
}

pub struct Descendants<'doc> {
    doc: &'doc Document,
    stack: Vec<NodeId>,
}

impl<'doc> Iterator for Descendants<'doc> {
    type Item = Node<'doc>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.data(id).children.iter().rev().copied());
        Some(Node::new(self.doc, id))
    }
}
