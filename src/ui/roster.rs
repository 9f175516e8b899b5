use crate::config::RosterConfig;
use crate::core::value::TrackerValue;
use regex::Regex;
use std::sync::LazyLock;

static ANGLE_WRAPPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<[^<>]*>$").expect("static regex is valid"));

/// Classifies top-level map fields as roster categories and decides which of
/// their entries are stand-ins rather than real entities.
#[derive(Debug, Clone)]
pub struct RosterPolicy {
    primary: String,
    auxiliary: Vec<String>,
    tokens: Vec<String>,
}

impl RosterPolicy {
    pub fn new(config: &RosterConfig) -> Self {
        Self {
            primary: config.primary.clone(),
            auxiliary: config.auxiliary.clone(),
            tokens: config
                .placeholder_tokens
                .iter()
                .map(|token| token.trim().to_lowercase())
                .collect(),
        }
    }

    pub fn primary(&self) -> &str {
        self.primary.as_str()
    }

    pub fn is_primary(&self, field_name: &str) -> bool {
        field_name == self.primary
    }

    pub fn is_auxiliary(&self, field_name: &str) -> bool {
        !self.is_primary(field_name) && self.auxiliary.iter().any(|name| name == field_name)
    }

    pub fn is_category(&self, field_name: &str) -> bool {
        self.is_primary(field_name) || self.is_auxiliary(field_name)
    }

    /// Empty, `<...>`, unresolved `{{`/`}}` braces, or a configured token.
    pub fn is_placeholder_token(&self, raw: &str) -> bool {
        let text = raw.trim();
        if text.is_empty() || text.contains("{{") || text.contains("}}") {
            return true;
        }
        if ANGLE_WRAPPED.is_match(text) {
            return true;
        }
        let lowered = text.to_lowercase();
        self.tokens.iter().any(|token| *token == lowered)
    }

    /// True when every scalar in the subtree is a placeholder. Numbers and
    /// booleans always count as real data.
    pub fn is_placeholder_subtree(&self, value: &TrackerValue) -> bool {
        match value {
            TrackerValue::Null => true,
            TrackerValue::Bool(_) | TrackerValue::Number(_) => false,
            TrackerValue::Text(text) => self.is_placeholder_token(text),
            TrackerValue::List(items) => items.iter().all(|item| self.is_placeholder_subtree(item)),
            TrackerValue::Object(map) => map.values().all(|item| self.is_placeholder_subtree(item)),
        }
    }

    pub fn keeps_entry(&self, key: &str, value: &TrackerValue) -> bool {
        !self.is_placeholder_token(key) && !self.is_placeholder_subtree(value)
    }
}

impl Default for RosterPolicy {
    fn default() -> Self {
        Self::new(&RosterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::RosterPolicy;
    use crate::core::value::TrackerValue;

    #[test]
    fn placeholder_tokens() {
        let policy = RosterPolicy::default();
        for raw in ["", "  ", "<none>", "<Enemy Name>", "{{name}}", "x }}", "None", "N/A"] {
            assert!(policy.is_placeholder_token(raw), "{raw:?}");
        }
        for raw in ["Goblin", "Mira <the bold>", "a < b"] {
            assert!(!policy.is_placeholder_token(raw), "{raw:?}");
        }
    }

    #[test]
    fn subtree_is_placeholder_only_when_every_scalar_is() {
        let policy = RosterPolicy::default();
        let blank = TrackerValue::from_json(r#"{"hp":"<hp>","gear":["", "none"],"x":null}"#)
            .expect("json parses");
        let real = TrackerValue::from_json(r#"{"hp":"5","gear":[]}"#).expect("json parses");
        let numeric = TrackerValue::from_json(r#"{"hp":5}"#).expect("json parses");
        assert!(policy.is_placeholder_subtree(&blank));
        assert!(!policy.is_placeholder_subtree(&real));
        assert!(!policy.is_placeholder_subtree(&numeric));
    }

    #[test]
    fn primary_is_never_auxiliary() {
        let policy = RosterPolicy::default();
        assert!(policy.is_primary("MainCharacters"));
        assert!(!policy.is_auxiliary("MainCharacters"));
        assert!(policy.is_auxiliary("SmallEnemies"));
        assert!(!policy.is_auxiliary("Inventory"));
    }
}
