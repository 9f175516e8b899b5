use crate::core::schema::{FieldType, Schema, SchemaNode};
use crate::core::value::TrackerValue;
use crate::core::value_path::ValuePath;
use crate::ui::node::{GroupNode, LeafNode, RenderNode};
use crate::ui::roster::RosterPolicy;

/// Walks a schema together with the live tracker object and flattens the
/// result into render nodes in document order.
///
/// Order is schema declaration order; map-typed fields follow the data's own
/// key order. The walk never fails: missing or mistyped data renders empty.
pub struct SchemaWalker<'a> {
    roster: &'a RosterPolicy,
}

impl<'a> SchemaWalker<'a> {
    pub fn new(roster: &'a RosterPolicy) -> Self {
        Self { roster }
    }

    pub fn walk(
        &self,
        data: &TrackerValue,
        schema: &Schema,
        base_path: &ValuePath,
        depth: usize,
    ) -> Vec<RenderNode> {
        let mut out = Vec::new();
        self.walk_fields(&mut out, data, schema, base_path, depth);
        out
    }

    fn walk_fields(
        &self,
        out: &mut Vec<RenderNode>,
        data: &TrackerValue,
        schema: &Schema,
        base_path: &ValuePath,
        depth: usize,
    ) {
        for field in schema.fields() {
            let path = base_path.child_key(field.name.as_str());
            let value = data.get(field.name.as_str());
            let top_level = base_path.is_empty();

            // Group types without nested fields have nothing to expand into.
            if field.nested_fields.is_empty() || field.field_type.is_scalar() {
                push_leaf(
                    out,
                    path,
                    depth,
                    field.name.as_str(),
                    field.field_type.clone(),
                    value,
                );
                continue;
            }

            match &field.field_type {
                FieldType::Object => {
                    let group = open_group(out, path.clone(), depth, field.name.as_str());
                    let nested = value.cloned().unwrap_or_default();
                    self.walk_fields(out, &nested, &field.nested_fields, &path, depth + 1);
                    close_group(out, group);
                }
                FieldType::ForEachObject | FieldType::ForEachArray => {
                    let auxiliary = top_level && self.roster.is_auxiliary(field.name.as_str());
                    let entries: Vec<(&String, &TrackerValue)> = value
                        .and_then(TrackerValue::as_object)
                        .map(|map| {
                            map.iter()
                                .filter(|(key, item)| !auxiliary || self.roster.keeps_entry(key, item))
                                .collect()
                        })
                        .unwrap_or_default();
                    if auxiliary && entries.is_empty() {
                        continue;
                    }

                    let group = open_group(out, path.clone(), depth, field.name.as_str());
                    for (key, item) in entries {
                        self.walk_map_entry(out, field, &path, key, item, depth + 1);
                    }
                    close_group(out, group);
                }
                FieldType::ArrayObject => {
                    let group = open_group(out, path.clone(), depth, field.name.as_str());
                    let items = value.and_then(TrackerValue::as_list).unwrap_or_default();
                    self.walk_items(out, items, &field.nested_fields, &path, depth + 1);
                    close_group(out, group);
                }
                FieldType::Array | FieldType::String | FieldType::Other(_) => {
                    push_leaf(
                        out,
                        path,
                        depth,
                        field.name.as_str(),
                        field.field_type.clone(),
                        value,
                    );
                }
            }
        }
    }

    fn walk_map_entry(
        &self,
        out: &mut Vec<RenderNode>,
        field: &SchemaNode,
        field_path: &ValuePath,
        key: &str,
        item: &TrackerValue,
        depth: usize,
    ) {
        let entry_path = field_path.child_key(key);
        let group = open_group(out, entry_path.clone(), depth, key);

        match field.field_type {
            FieldType::ForEachArray if field.nested_fields.is_single_scalar() => {
                let list = match item {
                    TrackerValue::List(_) => item.clone(),
                    _ => TrackerValue::List(Vec::new()),
                };
                push_leaf(out, entry_path, depth + 1, key, FieldType::Array, Some(&list));
            }
            FieldType::ForEachArray => {
                let items = item.as_list().unwrap_or_default();
                self.walk_items(out, items, &field.nested_fields, &entry_path, depth + 1);
            }
            _ => {
                self.walk_fields(out, item, &field.nested_fields, &entry_path, depth + 1);
            }
        }

        close_group(out, group);
    }

    fn walk_items(
        &self,
        out: &mut Vec<RenderNode>,
        items: &[TrackerValue],
        nested: &Schema,
        parent: &ValuePath,
        depth: usize,
    ) {
        for (idx, item) in items.iter().enumerate() {
            let item_path = parent.child_index(idx);
            let group = open_group(out, item_path.clone(), depth, &format!("[{idx}]"));
            self.walk_fields(out, item, nested, &item_path, depth + 1);
            close_group(out, group);
        }
    }
}

fn open_group(out: &mut Vec<RenderNode>, path: ValuePath, depth: usize, title: &str) -> usize {
    out.push(RenderNode::Group(GroupNode {
        path,
        depth,
        title: title.to_string(),
        collapsible: false,
        has_children: false,
    }));
    out.len() - 1
}

fn close_group(out: &mut [RenderNode], idx: usize) {
    let has_children = out.len() > idx + 1;
    if let Some(RenderNode::Group(group)) = out.get_mut(idx) {
        group.has_children = has_children;
        group.collapsible = has_children;
    }
}

fn push_leaf(
    out: &mut Vec<RenderNode>,
    path: ValuePath,
    depth: usize,
    key: &str,
    field_type: FieldType,
    value: Option<&TrackerValue>,
) {
    let editable = match path.validate() {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(path = %path, error = %err, "rendering field read-only");
            false
        }
    };
    out.push(RenderNode::Leaf(LeafNode {
        path,
        depth,
        key: key.to_string(),
        field_type,
        display_value: value.map(TrackerValue::display_string).unwrap_or_default(),
        editable,
    }));
}

#[cfg(test)]
mod tests {
    use super::SchemaWalker;
    use crate::core::schema::{FieldType, Schema, SchemaNode};
    use crate::core::value::TrackerValue;
    use crate::core::value_path::ValuePath;
    use crate::ui::node::RenderNode;
    use crate::ui::roster::RosterPolicy;
    use pretty_assertions::assert_eq;

    fn lines(nodes: &[RenderNode]) -> Vec<String> {
        nodes
            .iter()
            .map(|node| match node {
                RenderNode::Group(g) => format!("{}G {} ({})", g.depth, g.title, g.path),
                RenderNode::Leaf(l) => {
                    format!("{}L {}={} ({})", l.depth, l.key, l.display_value, l.path)
                }
            })
            .collect()
    }

    fn walk(data: &str, schema: &Schema) -> Vec<RenderNode> {
        let roster = RosterPolicy::default();
        let data = TrackerValue::from_json(data).expect("json parses");
        SchemaWalker::new(&roster).walk(&data, schema, &ValuePath::empty(), 0)
    }

    fn enemies_schema(name: &str) -> Schema {
        Schema::new().with_field(
            "f0",
            SchemaNode::new(name, FieldType::ForEachObject)
                .with_nested("f1", SchemaNode::new("hp", FieldType::String)),
        )
    }

    #[test]
    fn scalars_and_objects_follow_schema_order() {
        let schema = Schema::new()
            .with_field("a", SchemaNode::new("Time", FieldType::String))
            .with_field(
                "b",
                SchemaNode::new("Stats", FieldType::Object)
                    .with_nested("c", SchemaNode::new("hp", FieldType::String))
                    .with_nested("d", SchemaNode::new("Items", FieldType::Array)),
            );
        let nodes = walk(
            r#"{"Stats":{"Items":["Rope","Torch"],"hp":"10"},"Time":"dusk"}"#,
            &schema,
        );
        assert_eq!(
            lines(&nodes),
            vec![
                "0L Time=dusk (Time)",
                "0G Stats (Stats)",
                "1L hp=10 (Stats.hp)",
                "1L Items=Rope; Torch (Stats.Items)",
            ]
        );
        let group = nodes[1].as_group().expect("group");
        assert!(group.has_children);
    }

    #[test]
    fn missing_data_renders_empty_leaves() {
        let schema = Schema::new().with_field(
            "b",
            SchemaNode::new("Stats", FieldType::Object)
                .with_nested("c", SchemaNode::new("hp", FieldType::String)),
        );
        let nodes = walk("{}", &schema);
        assert_eq!(lines(&nodes), vec!["0G Stats (Stats)", "1L hp= (Stats.hp)"]);
    }

    #[test]
    fn map_of_objects_follows_data_key_order() {
        let nodes = walk(
            r#"{"Party":{"zed":{"hp":"3"},"amy":{"hp":"8"}}}"#,
            &enemies_schema("Party"),
        );
        assert_eq!(
            lines(&nodes),
            vec![
                "0G Party (Party)",
                "1G zed (Party.zed)",
                "2L hp=3 (Party.zed.hp)",
                "1G amy (Party.amy)",
                "2L hp=8 (Party.amy.hp)",
            ]
        );
    }

    #[test]
    fn map_of_arrays_with_single_string_field_is_a_list_leaf() {
        let schema = Schema::new().with_field(
            "f0",
            SchemaNode::new("Inventory", FieldType::ForEachArray)
                .with_nested("f1", SchemaNode::new("item", FieldType::String)),
        );
        let nodes = walk(r#"{"Inventory":{"Mira":["Rope","Lamp"]}}"#, &schema);
        assert_eq!(
            lines(&nodes),
            vec![
                "0G Inventory (Inventory)",
                "1G Mira (Inventory.Mira)",
                "2L Mira=Rope; Lamp (Inventory.Mira)",
            ]
        );
        let leaf = nodes[2].as_leaf().expect("leaf");
        assert_eq!(leaf.field_type, FieldType::Array);
    }

    #[test]
    fn map_of_arrays_of_objects_numbers_items() {
        let schema = Schema::new().with_field(
            "f0",
            SchemaNode::new("Wounds", FieldType::ForEachArray)
                .with_nested("f1", SchemaNode::new("where", FieldType::String))
                .with_nested("f2", SchemaNode::new("depth", FieldType::String)),
        );
        let nodes = walk(
            r#"{"Wounds":{"Mira":[{"where":"arm","depth":"shallow"}]}}"#,
            &schema,
        );
        assert_eq!(
            lines(&nodes),
            vec![
                "0G Wounds (Wounds)",
                "1G Mira (Wounds.Mira)",
                "2G [0] (Wounds.Mira.[0])",
                "3L where=arm (Wounds.Mira.[0].where)",
                "3L depth=shallow (Wounds.Mira.[0].depth)",
            ]
        );
    }

    #[test]
    fn array_of_objects_numbers_items() {
        let schema = Schema::new().with_field(
            "f0",
            SchemaNode::new("Quests", FieldType::ArrayObject)
                .with_nested("f1", SchemaNode::new("title", FieldType::String)),
        );
        let nodes = walk(r#"{"Quests":[{"title":"Find the key"}]}"#, &schema);
        assert_eq!(
            lines(&nodes),
            vec![
                "0G Quests (Quests)",
                "1G [0] (Quests.[0])",
                "2L title=Find the key (Quests.[0].title)",
            ]
        );
    }

    #[test]
    fn auxiliary_category_with_only_placeholders_is_suppressed() {
        let nodes = walk(
            r#"{"OtherCharacters":{"<none>":{"hp":"5"}}}"#,
            &enemies_schema("OtherCharacters"),
        );
        assert!(nodes.is_empty());

        let nodes = walk(
            r#"{"OtherCharacters":{"Goblin":{"hp":"5"},"Ghost":{"hp":"<hp>"}}}"#,
            &enemies_schema("OtherCharacters"),
        );
        assert_eq!(
            lines(&nodes),
            vec![
                "0G OtherCharacters (OtherCharacters)",
                "1G Goblin (OtherCharacters.Goblin)",
                "2L hp=5 (OtherCharacters.Goblin.hp)",
            ]
        );
    }

    #[test]
    fn primary_and_plain_maps_keep_empty_headers_and_placeholders() {
        let nodes = walk(r#"{"MainCharacters":{}}"#, &enemies_schema("MainCharacters"));
        assert_eq!(lines(&nodes), vec!["0G MainCharacters (MainCharacters)"]);
        assert!(!nodes[0].as_group().expect("group").has_children);

        let nodes = walk(
            r#"{"MainCharacters":{"<none>":{}}}"#,
            &enemies_schema("MainCharacters"),
        );
        assert_eq!(nodes.len(), 3);
    }

    #[test]
    fn keys_with_separator_render_read_only() {
        let nodes = walk(
            r#"{"Party":{"Mr. Smith":{"hp":"4"}}}"#,
            &enemies_schema("Party"),
        );
        let leaf = nodes[2].as_leaf().expect("leaf");
        assert_eq!(leaf.display_value, "4");
        assert!(!leaf.editable);
    }

    #[test]
    fn group_type_without_nested_fields_is_a_leaf() {
        let schema = Schema::new().with_field("a", SchemaNode::new("Notes", FieldType::Object));
        let nodes = walk(r#"{"Notes":{"k":"v"}}"#, &schema);
        assert_eq!(lines(&nodes), vec![r#"0L Notes={"k":"v"} (Notes)"#]);
    }
}
