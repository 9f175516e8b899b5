use crate::host::DockHost;

const HIDDEN: &str = "none";
const FALLBACK_DISPLAY: &str = "block";

/// Hides and restores the host's own tracker surface, remembering the display
/// value it had before being hidden.
#[derive(Debug, Clone)]
pub struct OriginalVisibility {
    previous_display: Option<String>,
    auto_hide_pending: bool,
}

impl OriginalVisibility {
    pub fn new(auto_hide: bool) -> Self {
        Self {
            previous_display: None,
            auto_hide_pending: auto_hide,
        }
    }

    pub fn hide<H: DockHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let Some(current) = host.original_display() else {
            return false;
        };
        if !current.is_empty() && current != HIDDEN {
            self.previous_display = Some(current);
        }
        host.set_original_display(HIDDEN);
        true
    }

    pub fn show<H: DockHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if host.original_display().is_none() {
            return false;
        }
        let display = self
            .previous_display
            .as_deref()
            .filter(|d| *d != HIDDEN)
            .unwrap_or(FALLBACK_DISPLAY);
        host.set_original_display(display);
        true
    }

    pub fn toggle<H: DockHost + ?Sized>(&mut self, host: &mut H) -> bool {
        match host.original_display() {
            None => {
                tracing::warn!("original tracker not found, cannot toggle");
                false
            }
            Some(display) if display == HIDDEN => self.show(host),
            Some(_) => self.hide(host),
        }
    }

    /// Hides the original the first time it is seen visible; later calls are
    /// no-ops.
    pub fn auto_hide_once<H: DockHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if !self.auto_hide_pending {
            return false;
        }
        match host.original_display() {
            Some(display) if display != HIDDEN => {
                self.hide(host);
                self.auto_hide_pending = false;
                tracing::debug!("original tracker auto-hidden");
                true
            }
            _ => false,
        }
    }
}
