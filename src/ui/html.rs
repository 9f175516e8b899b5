use crate::state::collapse::NodeVisibility;
use crate::ui::node::{GroupNode, LeafNode, RenderNode};
use std::fmt::Write;

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Projects render nodes to the dock body markup. `visibility` is indexed in
/// parallel with `nodes`; missing entries render visible and expanded.
pub fn render_nodes(nodes: &[RenderNode], visibility: &[NodeVisibility]) -> String {
    let mut out = String::new();
    for (idx, node) in nodes.iter().enumerate() {
        let vis = visibility.get(idx).copied().unwrap_or(NodeVisibility {
            visible: true,
            collapsed: false,
        });
        match node {
            RenderNode::Group(group) => render_group(&mut out, group, vis),
            RenderNode::Leaf(leaf) => render_leaf(&mut out, leaf, vis),
        }
    }
    out
}

fn render_group(out: &mut String, group: &GroupNode, vis: NodeVisibility) {
    let mut classes = String::from("tr-line tr-group");
    if group.collapsible {
        classes.push_str(" is-collapsible");
    }
    if vis.collapsed {
        classes.push_str(" is-collapsed");
    }
    if !vis.visible {
        classes.push_str(" is-hidden");
    }
    let _ = write!(
        out,
        "<div class=\"{classes}\" data-path=\"{}\" data-depth=\"{}\"><div class=\"tr-group-title\">{}:</div></div>",
        escape_html(&group.path.to_string()),
        group.depth,
        escape_html(&group.title),
    );
}

fn render_leaf(out: &mut String, leaf: &LeafNode, vis: NodeVisibility) {
    let line_class = if vis.visible {
        "tr-line tr-leaf"
    } else {
        "tr-line tr-leaf is-hidden"
    };
    let value_class = if leaf.editable { "tr-editable" } else { "tr-readonly" };
    let key = escape_html(&leaf.key);
    let _ = write!(
        out,
        "<div class=\"{line_class}\" data-path=\"{}\" data-type=\"{}\" data-depth=\"{}\"><span class=\"tr-key\">{key}:</span><span class=\"{value_class}\" data-key=\"{key}\">{}</span></div>",
        escape_html(&leaf.path.to_string()),
        escape_html(leaf.field_type.as_str()),
        leaf.depth,
        escape_html(&leaf.display_value),
    );
}
