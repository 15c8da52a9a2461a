//! In-memory document model.
//!
//! Nodes live in a single arena owned by [`Document`] and refer to each other
//! by [`NodeId`]. A node's parent link is a plain index, so it never keeps
//! the parent alive and dropping the document frees the whole tree at once.

mod node;
mod scalar;
mod tag;

use smol_str::SmolStr;

use crate::error::Error;
use crate::Result;

pub use node::{Ancestors, Children, Descendants, Node};
pub use scalar::{DateValue, Scalar, ValueKind};
pub use tag::PresentationTag;

/// Index into the document's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    fn new(index: usize) -> Result<Self> {
        u32::try_from(index)
            .map(NodeId)
            .map_err(|_| Error::invalid_structure("node arena is full"))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kinds accepted by [`Document::create_container`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerKind {
    Object,
    Array,
    Constructor(SmolStr),
    /// Single-value slot pairing a name with its value inside an object.
    Property(SmolStr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Object,
    Array,
    Constructor(SmolStr),
    Property(SmolStr),
    Value(Scalar),
}

impl NodeKind {
    pub fn is_container(&self) -> bool {
        !matches!(self, NodeKind::Value(_))
    }

    /// Name of a property or constructor.
    pub fn name(&self) -> Option<&str> {
        match self {
            NodeKind::Constructor(name) | NodeKind::Property(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn scalar(&self) -> Option<&Scalar> {
        match self {
            NodeKind::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn value_kind(&self) -> Option<ValueKind> {
        self.scalar().map(Scalar::kind)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Object => "Object",
            NodeKind::Array => "Array",
            NodeKind::Constructor(_) => "Constructor",
            NodeKind::Property(_) => "Property",
            NodeKind::Value(value) => value.kind().as_str(),
        }
    }
}

impl From<ContainerKind> for NodeKind {
    fn from(kind: ContainerKind) -> Self {
        match kind {
            ContainerKind::Object => NodeKind::Object,
            ContainerKind::Array => NodeKind::Array,
            ContainerKind::Constructor(name) => NodeKind::Constructor(name),
            ContainerKind::Property(name) => NodeKind::Property(name),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) parent: Option<NodeId>,
    /// Index in the parent's `children`, set on append.
    pub(crate) position: usize,
    pub(crate) children: Vec<NodeId>,
    pub(crate) kind: NodeKind,
    pub(crate) tag: PresentationTag,
}

/// A document tree: an arena of nodes plus an optional root.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: Option<NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the arena, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate an empty, unattached container.
    pub fn create_container(
        &mut self,
        kind: ContainerKind,
        tag: PresentationTag,
    ) -> Result<NodeId> {
        self.push_node(NodeKind::from(kind), tag)
    }

    /// Allocate an unattached value node.
    pub fn create_value(&mut self, value: Scalar, tag: PresentationTag) -> Result<NodeId> {
        self.push_node(NodeKind::Value(value), tag)
    }

    fn push_node(&mut self, kind: NodeKind, tag: PresentationTag) -> Result<NodeId> {
        let id = NodeId::new(self.nodes.len())?;
        self.nodes.push(NodeData {
            parent: None,
            position: 0,
            children: Vec::new(),
            kind,
            tag,
        });
        Ok(id)
    }

    /// Append `child` to `parent`'s children and point `child` back at it.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if parent == child {
            return Err(Error::invalid_structure("cannot append a node to itself"));
        }
        let child_data = self
            .nodes
            .get(child.index())
            .ok_or_else(|| unknown_node(child))?;
        if child_data.parent.is_some() || self.root == Some(child) {
            return Err(Error::invalid_structure("node already has a parent"));
        }
        let child_is_property = matches!(child_data.kind, NodeKind::Property(_));

        let parent_data = self
            .nodes
            .get(parent.index())
            .ok_or_else(|| unknown_node(parent))?;
        match &parent_data.kind {
            NodeKind::Value(value) => {
                return Err(Error::invalid_structure(format!(
                    "cannot append to a {} value node",
                    value.kind()
                )));
            }
            NodeKind::Property(name) if !parent_data.children.is_empty() => {
                return Err(Error::invalid_structure(format!(
                    "property '{name}' already has a value"
                )));
            }
            NodeKind::Object if !child_is_property => {
                return Err(Error::invalid_structure(
                    "object children must be properties",
                ));
            }
            NodeKind::Array | NodeKind::Constructor(_) | NodeKind::Property(_)
                if child_is_property =>
            {
                return Err(Error::invalid_structure(format!(
                    "property cannot be a child of {}",
                    parent_data.kind.type_name()
                )));
            }
            _ => {}
        }

        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(Error::invalid_structure("append would create a cycle"));
            }
            cursor = self.nodes[id.index()].parent;
        }

        let siblings = &mut self.nodes[parent.index()].children;
        let position = siblings.len();
        siblings.push(child);
        let child_data = &mut self.nodes[child.index()];
        child_data.parent = Some(parent);
        child_data.position = position;
        Ok(())
    }

    /// Parent back-reference of `id`, if any.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|data| data.parent)
    }

    /// Make an unattached node the document root.
    pub fn set_root(&mut self, id: NodeId) -> Result<()> {
        let data = self.nodes.get(id.index()).ok_or_else(|| unknown_node(id))?;
        if self.root.is_some() {
            return Err(Error::invalid_structure("multiple root values"));
        }
        if data.parent.is_some() {
            return Err(Error::invalid_structure("root node cannot have a parent"));
        }
        if matches!(data.kind, NodeKind::Property(_)) {
            return Err(Error::invalid_structure("property cannot be the root"));
        }
        self.root = Some(id);
        Ok(())
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root(&self) -> Option<Node<'_>> {
        self.root.map(|id| Node::new(self, id))
    }

    pub fn get(&self, id: NodeId) -> Option<Node<'_>> {
        if id.index() < self.nodes.len() {
            Some(Node::new(self, id))
        } else {
            None
        }
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    pub(crate) fn kind_of(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.index()).map(|data| &data.kind)
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }
}

fn unknown_node(id: NodeId) -> Error {
    Error::invalid_structure(format!("unknown node #{}", id.index()))
}
