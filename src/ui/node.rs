use crate::core::schema::FieldType;
use crate::core::value_path::ValuePath;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNode {
    pub path: ValuePath,
    pub depth: usize,
    pub title: String,
    pub collapsible: bool,
    pub has_children: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    pub path: ValuePath,
    pub depth: usize,
    pub key: String,
    pub field_type: FieldType,
    pub display_value: String,
    /// False when the path cannot address the value (see `ValuePath::validate`).
    pub editable: bool,
}

/// One line of the default dock view, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderNode {
    Group(GroupNode),
    Leaf(LeafNode),
}

impl RenderNode {
    pub fn path(&self) -> &ValuePath {
        match self {
            Self::Group(group) => &group.path,
            Self::Leaf(leaf) => &leaf.path,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Self::Group(group) => group.depth,
            Self::Leaf(leaf) => leaf.depth,
        }
    }

    pub fn as_group(&self) -> Option<&GroupNode> {
        match self {
            Self::Group(group) => Some(group),
            Self::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafNode> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Group(_) => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }
}
