use crate::core::value_path::ValuePath;
use crate::ui::node::RenderNode;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeVisibility {
    pub visible: bool,
    /// Only meaningful for groups.
    pub collapsed: bool,
}

/// Per-path expand/collapse overrides on top of the default policy.
///
/// Keys are the display form of the node path, so state survives re-renders
/// as long as the structural address is stable.
#[derive(Debug, Clone, Default)]
pub struct CollapseStore {
    overrides: HashMap<String, bool>,
    primary: String,
}

impl CollapseStore {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            overrides: HashMap::new(),
            primary: primary.into(),
        }
    }

    /// Default: the primary top-level group is expanded, everything else
    /// (including the entries directly under it) starts collapsed.
    pub fn is_collapsed(&self, path: &str, display_name: &str) -> bool {
        if let Some(collapsed) = self.overrides.get(path) {
            return *collapsed;
        }
        let top_level = !path.contains('.');
        !(top_level && display_name == self.primary)
    }

    pub fn set_collapsed(&mut self, path: &str, collapsed: bool) {
        self.overrides.insert(path.to_string(), collapsed);
    }

    /// Flips the effective state and returns the new one.
    pub fn toggle(&mut self, path: &str, display_name: &str) -> bool {
        let next = !self.is_collapsed(path, display_name);
        self.set_collapsed(path, next);
        next
    }

    pub fn clear(&mut self) {
        self.overrides.clear();
    }

    pub fn is_group_collapsed(&self, path: &ValuePath, title: &str) -> bool {
        self.is_collapsed(&path.to_string(), title)
    }

    /// Single pass over document order. Nodes under a collapsed group are
    /// marked hidden rather than dropped.
    pub fn apply_visibility(&self, nodes: &[RenderNode]) -> Vec<NodeVisibility> {
        let mut out = Vec::with_capacity(nodes.len());
        let mut collapsed_depths: Vec<usize> = Vec::new();

        for node in nodes {
            let depth = node.depth();
            while collapsed_depths.last().is_some_and(|d| *d >= depth) {
                collapsed_depths.pop();
            }

            let visible = collapsed_depths.is_empty();
            let collapsed = match node {
                RenderNode::Group(group) if group.has_children => {
                    self.is_group_collapsed(&group.path, &group.title)
                }
                _ => false,
            };
            if visible && collapsed {
                collapsed_depths.push(depth);
            }
            out.push(NodeVisibility { visible, collapsed });
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::{CollapseStore, NodeVisibility};
    use crate::core::value_path::ValuePath;
    use crate::ui::node::{GroupNode, LeafNode, RenderNode};
    use pretty_assertions::assert_eq;

    fn group(path: &str, depth: usize, title: &str) -> RenderNode {
        RenderNode::Group(GroupNode {
            path: ValuePath::parse(path),
            depth,
            title: title.to_string(),
            collapsible: true,
            has_children: true,
        })
    }

    fn leaf(path: &str, depth: usize) -> RenderNode {
        RenderNode::Leaf(LeafNode {
            path: ValuePath::parse(path),
            depth,
            key: "k".to_string(),
            field_type: Default::default(),
            display_value: String::new(),
            editable: true,
        })
    }

    #[test]
    fn default_policy_expands_only_primary_top_level() {
        let store = CollapseStore::new("Main");
        assert!(!store.is_collapsed("Main", "Main"));
        assert!(store.is_collapsed("Other", "Other"));
        assert!(store.is_collapsed("Main.Mira", "Mira"));
        assert!(store.is_collapsed("Other.Main", "Main"));
    }

    #[test]
    fn override_wins_and_toggle_flips() {
        let mut store = CollapseStore::new("Main");
        assert!(!store.toggle("Other", "Other"));
        assert!(!store.is_collapsed("Other", "Other"));
        store.set_collapsed("Main", true);
        assert!(store.is_collapsed("Main", "Main"));
        assert!(store.toggle("Other", "Other"));
    }

    #[test]
    fn collapsed_group_hides_descendants_until_depth_returns() {
        let mut store = CollapseStore::new("Main");
        store.set_collapsed("Main.Mira", false);
        let nodes = vec![
            group("Main", 0, "Main"),
            group("Main.Mira", 1, "Mira"),
            leaf("Main.Mira.hp", 2),
            group("Main.Bo", 1, "Bo"),
            leaf("Main.Bo.hp", 2),
            group("Other", 0, "Other"),
            leaf("Other.x", 1),
            leaf("Time", 0),
        ];
        let visibility = store.apply_visibility(&nodes);
        let visible: Vec<bool> = visibility.iter().map(|v| v.visible).collect();
        assert_eq!(
            visible,
            vec![true, true, true, true, false, true, false, true]
        );
        assert_eq!(
            visibility[3],
            NodeVisibility {
                visible: true,
                collapsed: true
            }
        );
    }

    #[test]
    fn hidden_collapsed_groups_do_not_stack() {
        let mut store = CollapseStore::new("Main");
        store.set_collapsed("Other", true);
        store.set_collapsed("Other.a", true);
        let nodes = vec![
            group("Other", 0, "Other"),
            group("Other.a", 1, "a"),
            leaf("Other.a.x", 2),
            leaf("Next", 0),
        ];
        let visible: Vec<bool> = store
            .apply_visibility(&nodes)
            .iter()
            .map(|v| v.visible)
            .collect();
        assert_eq!(visible, vec![true, false, false, true]);
    }
}
