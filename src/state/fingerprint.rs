use crate::core::value::TrackerValue;
use crate::template::TemplateAssets;
use std::fmt::Write;

/// Full structural snapshot of everything a render depends on. Kept as the
/// serialized text itself, so equal fingerprints always mean equal inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(data: &TrackerValue, assets: &TemplateAssets) -> Self {
        let mut out = data.to_json();
        out.push('\u{1f}');
        out.push(if assets.enabled { '1' } else { '0' });
        // Length prefixes keep field boundaries unambiguous.
        for part in [&assets.html, &assets.css, &assets.js] {
            let _ = write!(out, "\u{1f}{}:{}", part.len(), part);
        }
        Self(out)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshDecision {
    Skip,
    Render,
}

#[derive(Debug, Clone, Default)]
pub struct ChangeDetector {
    last: Option<Fingerprint>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, data: &TrackerValue, assets: &TemplateAssets) -> RefreshDecision {
        let next = Fingerprint::of(data, assets);
        if self.last.as_ref() == Some(&next) {
            return RefreshDecision::Skip;
        }
        self.last = Some(next);
        RefreshDecision::Render
    }

    /// Forces the next `check` to render.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn last(&self) -> Option<&Fingerprint> {
        self.last.as_ref()
    }
}
