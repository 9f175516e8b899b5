use crate::core::schema::{FieldType, Schema};
use crate::ui::roster::RosterPolicy;

/// Which top-level fields the macro list covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacroGroup {
    All,
    /// Fields that are not roster categories.
    General,
    Field(String),
}

impl MacroGroup {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "all" => Self::All,
            "general" => Self::General,
            name => Self::Field(name.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::All => "all",
            Self::General => "general",
            Self::Field(name) => name.as_str(),
        }
    }
}

/// Groups worth offering for `schema`: `All`, `General` when at least one
/// non-roster field exists, then each top-level field.
pub fn macro_groups(schema: &Schema, roster: &RosterPolicy) -> Vec<MacroGroup> {
    let mut groups = vec![MacroGroup::All];
    if schema.fields().any(|field| !roster.is_category(&field.name)) {
        groups.push(MacroGroup::General);
    }
    for field in schema.fields() {
        let group = MacroGroup::Field(field.name.clone());
        if !groups.contains(&group) {
            groups.push(group);
        }
    }
    groups
}

/// Placeholder snippets a template author can insert for `schema`.
pub fn macro_catalog(schema: &Schema, group: &MacroGroup, roster: &RosterPolicy) -> Vec<String> {
    let mut macros = Vec::new();

    for field in schema.fields() {
        let name = field.name.as_str();
        let included = match group {
            MacroGroup::All => true,
            MacroGroup::General => !roster.is_category(name),
            MacroGroup::Field(selected) => selected == name,
        };
        if !included {
            continue;
        }

        match field.field_type {
            FieldType::ForEachObject | FieldType::ForEachArray => {
                let alias = lower_camel(&singularize(name));
                macros.push(format!("{{{{#foreach {name} {alias}}}}}"));
                macros.push(format!("{{{{{alias}}}}}"));
                for nested in field.nested_fields.fields() {
                    macros.push(format!("{{{{{alias}.{}}}}}", nested.name));
                }
                macros.push("{{/foreach}}".to_string());
            }
            FieldType::Object if !field.nested_fields.is_empty() => {
                for nested in field.nested_fields.fields() {
                    macros.push(format!("{{{{{name}.{}}}}}", nested.name));
                }
            }
            FieldType::Array => macros.push(format!("{{{{#join \"; \" {name}}}}}")),
            _ => macros.push(format!("{{{{{name}}}}}")),
        }
    }

    macros
}

pub fn singularize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        format!("{stem}y")
    } else if name.ends_with("ses") {
        name[..name.len() - 2].to_string()
    } else if let Some(stem) = name.strip_suffix('s') {
        stem.to_string()
    } else {
        name.to_string()
    }
}

pub fn lower_camel(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{MacroGroup, lower_camel, macro_catalog, macro_groups, singularize};
    use crate::core::schema::{FieldType, Schema, SchemaNode};
    use crate::ui::roster::RosterPolicy;
    use pretty_assertions::assert_eq;

    fn schema() -> Schema {
        Schema::new()
            .with_field("a", SchemaNode::new("Time", FieldType::String))
            .with_field("b", SchemaNode::new("Items", FieldType::Array))
            .with_field(
                "c",
                SchemaNode::new("Stats", FieldType::Object)
                    .with_nested("d", SchemaNode::new("hp", FieldType::String)),
            )
            .with_field(
                "e",
                SchemaNode::new("SmallEnemies", FieldType::ForEachObject)
                    .with_nested("f", SchemaNode::new("hp", FieldType::String)),
            )
    }

    #[test]
    fn singular_aliases() {
        assert_eq!(lower_camel(&singularize("SmallEnemies")), "smallEnemy");
        assert_eq!(singularize("Bosses"), "Boss");
        assert_eq!(singularize("Items"), "Item");
        assert_eq!(singularize("Gear"), "Gear");
        assert_eq!(lower_camel(""), "");
    }

    #[test]
    fn catalog_for_all_fields() {
        let roster = RosterPolicy::default();
        assert_eq!(
            macro_catalog(&schema(), &MacroGroup::All, &roster),
            vec![
                "{{Time}}",
                "{{#join \"; \" Items}}",
                "{{Stats.hp}}",
                "{{#foreach SmallEnemies smallEnemy}}",
                "{{smallEnemy}}",
                "{{smallEnemy.hp}}",
                "{{/foreach}}",
            ]
        );
    }

    #[test]
    fn general_group_skips_roster_categories() {
        let roster = RosterPolicy::default();
        let general = macro_catalog(&schema(), &MacroGroup::General, &roster);
        assert_eq!(general.len(), 3);
        let single = macro_catalog(&schema(), &MacroGroup::parse("Stats"), &roster);
        assert_eq!(single, vec!["{{Stats.hp}}"]);
    }

    #[test]
    fn groups_list_general_only_when_useful() {
        let roster = RosterPolicy::default();
        let ids: Vec<String> = macro_groups(&schema(), &roster)
            .iter()
            .map(|g| g.id().to_string())
            .collect();
        assert_eq!(ids, vec!["all", "general", "Time", "Items", "Stats", "SmallEnemies"]);

        let only_roster = Schema::new().with_field(
            "a",
            SchemaNode::new("MainCharacters", FieldType::ForEachObject),
        );
        assert_eq!(
            macro_groups(&only_roster, &roster),
            vec![
                MacroGroup::All,
                MacroGroup::Field("MainCharacters".to_string())
            ]
        );
    }
}
