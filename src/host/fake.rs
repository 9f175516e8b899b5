use super::{DockHost, StyleHandle};
use crate::config::DockSide;
use crate::core::value_path::ValuePath;

/// In-memory page that records every call the panel makes.
#[derive(Debug, Default)]
pub(crate) struct FakeHost {
    pub(crate) mounted: bool,
    pub(crate) side: Option<DockSide>,
    pub(crate) toggle_visible: bool,
    pub(crate) body: String,
    pub(crate) body_writes: usize,
    pub(crate) next_style: u64,
    pub(crate) styles: Vec<StyleHandle>,
    pub(crate) editors: Vec<String>,
    /// Paths whose lines are reported as gone from the document.
    pub(crate) detached: Vec<String>,
    pub(crate) busy: Vec<bool>,
    pub(crate) original: Option<String>,
}

impl FakeHost {
    pub(crate) fn with_original(display: &str) -> Self {
        Self {
            original: Some(display.to_string()),
            ..Self::default()
        }
    }
}

impl DockHost for FakeHost {
    fn mount_dock(&mut self, side: DockSide) {
        self.mounted = true;
        self.side = Some(side);
    }

    fn unmount_dock(&mut self) {
        self.mounted = false;
    }

    fn set_side(&mut self, side: DockSide) {
        self.side = Some(side);
    }

    fn set_toggle_visible(&mut self, visible: bool) {
        self.toggle_visible = visible;
    }

    fn set_body_html(&mut self, html: &str) {
        self.body = html.to_string();
        self.body_writes += 1;
    }

    fn inject_style(&mut self, _css: &str) -> StyleHandle {
        self.next_style += 1;
        self.styles.push(StyleHandle(self.next_style));
        StyleHandle(self.next_style)
    }

    fn remove_style(&mut self, handle: StyleHandle) {
        self.styles.retain(|h| *h != handle);
    }

    fn begin_edit(&mut self, path: &ValuePath, value: &str) {
        self.editors.push(format!("begin {path}={value}"));
    }

    fn end_edit(&mut self, path: &ValuePath, display: &str) {
        self.editors.push(format!("end {path}={display}"));
    }

    fn is_attached(&self, path: &ValuePath) -> bool {
        !self.detached.contains(&path.to_string())
    }

    fn set_regenerate_busy(&mut self, busy: bool) {
        self.busy.push(busy);
    }

    fn original_display(&self) -> Option<String> {
        self.original.clone()
    }

    fn set_original_display(&mut self, display: &str) {
        self.original = Some(display.to_string());
    }
}
