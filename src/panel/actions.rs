use super::DockPanel;
use crate::error::DockError;
use crate::host::{DockHost, Regeneration, TrackerStore};
use crate::runtime::event::{DockAction, DockEvent};
use crate::runtime::scheduler::{REGENERATE_KEY, SchedulerCommand};
use std::time::Instant;

impl<S: TrackerStore, H: DockHost> DockPanel<S, H> {
    /// Header buttons and `data-dock-action` elements inside template output
    /// both land here.
    pub(super) fn dispatch_action(
        &mut self,
        action: DockAction,
        now: Instant,
    ) -> Result<(), DockError> {
        if action == DockAction::Open {
            self.open(now);
            return Ok(());
        }
        if !self.ui.open {
            tracing::debug!(action = action.id(), "action ignored while dock is closed");
            return Ok(());
        }

        match action {
            DockAction::Open => {}
            DockAction::Regenerate => self.start_regeneration(now),
            DockAction::Close => self.close(),
            DockAction::ToggleSide => {
                self.ui.side = self.ui.side.toggled();
                self.host.set_side(self.ui.side);
            }
            DockAction::ToggleOriginal => {
                self.ui.original.toggle(&mut self.host);
            }
        }
        Ok(())
    }

    fn start_regeneration(&mut self, now: Instant) {
        if self.runtime.regenerating {
            tracing::debug!("regeneration already pending");
            return;
        }

        if let Some(edit) = self.runtime.session.cancel() {
            if self.host.is_attached(&edit.path) {
                self.host.end_edit(&edit.path, &edit.original);
            }
            tracing::debug!(path = %edit.path, "edit cancelled by regeneration");
        }

        self.runtime.regenerating = true;
        self.host.set_regenerate_busy(true);

        match self.store.regenerate() {
            Ok(Regeneration::Pending) => {
                self.runtime.scheduler.schedule(
                    SchedulerCommand::EmitAfter {
                        key: REGENERATE_KEY.to_string(),
                        delay: self.config.regenerate_timeout(),
                        event: DockEvent::RegenerationTimedOut,
                    },
                    now,
                );
            }
            Ok(Regeneration::Completed) => self.finish_regeneration(true, now),
            Ok(Regeneration::Unsupported) => {
                tracing::debug!("store does not support regeneration");
                self.finish_regeneration(false, now);
            }
            Err(err) => {
                tracing::warn!(error = %err, "regeneration failed");
                self.finish_regeneration(false, now);
            }
        }
        self.flush_deferred_refresh(now);
    }

    pub(super) fn finish_regeneration(&mut self, ok: bool, now: Instant) {
        if !self.runtime.regenerating {
            return;
        }
        self.runtime.regenerating = false;
        self.runtime.scheduler.schedule(
            SchedulerCommand::Cancel {
                key: REGENERATE_KEY.to_string(),
            },
            now,
        );
        self.host.set_regenerate_busy(false);
        if ok {
            self.refresh(now, false);
        } else {
            tracing::debug!("regeneration ended without new data");
        }
    }
}
