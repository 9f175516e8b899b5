#[cfg(test)]
pub(crate) mod fake;

use crate::config::DockSide;
use crate::core::schema::Schema;
use crate::core::value::TrackerValue;
use crate::core::value_path::ValuePath;
use crate::error::StoreError;

/// Outcome of asking the store to regenerate the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regeneration {
    /// Running in the background; the host reports
    /// `DockEvent::RegenerationFinished` when done.
    Pending,
    Completed,
    Unsupported,
}

/// The host application's tracker instance and schema.
pub trait TrackerStore {
    fn tracker(&self) -> Option<&TrackerValue>;

    fn tracker_mut(&mut self) -> Option<&mut TrackerValue>;

    fn schema(&self) -> Option<&Schema>;

    /// Persists the current tracker object.
    fn on_save(&mut self) -> Result<(), StoreError>;

    fn regenerate(&mut self) -> Result<Regeneration, StoreError> {
        Ok(Regeneration::Unsupported)
    }
}

/// Opaque id of an injected stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleHandle(pub u64);

/// Everything the panel does to the page goes through this trait.
pub trait DockHost {
    fn mount_dock(&mut self, side: DockSide);

    fn unmount_dock(&mut self);

    fn set_side(&mut self, side: DockSide);

    /// Floating button that reopens a closed dock.
    fn set_toggle_visible(&mut self, visible: bool);

    fn set_body_html(&mut self, html: &str);

    fn inject_style(&mut self, css: &str) -> StyleHandle;

    fn remove_style(&mut self, handle: StyleHandle);

    /// Replaces the value span of the leaf line at `path` with an input
    /// seeded with `value`. A list leaf can share its path with the entry
    /// group above it; edit calls always address the `tr-leaf` line, never
    /// the `tr-group` one.
    fn begin_edit(&mut self, path: &ValuePath, value: &str);

    /// Unmounts the input and shows `display` in its place.
    fn end_edit(&mut self, path: &ValuePath, display: &str);

    /// Whether the leaf line at `path` is still in the document.
    fn is_attached(&self, path: &ValuePath) -> bool;

    fn set_regenerate_busy(&mut self, busy: bool);

    /// Current display of the original tracker surface; `None` when absent.
    fn original_display(&self) -> Option<String>;

    fn set_original_display(&mut self, display: &str);
}
