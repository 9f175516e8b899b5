use super::DockPanel;
use crate::core::value_path::{self, ValuePath};
use crate::error::DockError;
use crate::host::{DockHost, TrackerStore};
use crate::runtime::event::DockEvent;
use crate::runtime::scheduler::{REFRESH_KEY, SchedulerCommand};
use crate::state::edit::{EditTarget, OpenOutcome};
use crate::ui::node::RenderNode;
use std::time::Instant;

impl<S: TrackerStore, H: DockHost> DockPanel<S, H> {
    pub(super) fn open_leaf(&mut self, path: &ValuePath, now: Instant) -> Result<(), DockError> {
        if self.runtime.regenerating {
            tracing::debug!(path = %path, "edit ignored while regenerating");
            return Ok(());
        }
        if self
            .runtime
            .session
            .active()
            .is_some_and(|edit| edit.path == *path)
        {
            return Ok(());
        }

        // Never cancel a different open editor; commit it first.
        let committed = if self.runtime.session.is_editing() {
            self.commit_edit(now)
        } else {
            Ok(false)
        };

        let target = self.current_nodes().into_iter().find_map(|node| match node {
            RenderNode::Leaf(leaf) if leaf.path == *path && leaf.editable => Some(leaf),
            _ => None,
        });
        if let Some(leaf) = target {
            let original = leaf.display_value.clone();
            let outcome = self.runtime.session.open(
                EditTarget {
                    path: leaf.path,
                    key: leaf.key,
                    field_type: leaf.field_type,
                },
                original.clone(),
            );
            if outcome == OpenOutcome::Opened {
                self.host.begin_edit(path, &original);
            }
        } else {
            tracing::debug!(path = %path, "click did not resolve to an editable field");
        }

        committed.map(|_| ())
    }

    /// Writes the open editor's value back and saves. Returns whether a write
    /// happened. A save error is returned after the session is idle and any
    /// deferred refresh has been replayed.
    pub(super) fn commit_edit(&mut self, now: Instant) -> Result<bool, DockError> {
        let Some(edit) = self.runtime.session.finish() else {
            return Ok(false);
        };

        if !self.host.is_attached(&edit.path) {
            tracing::debug!(path = %edit.path, "edit target detached, commit abandoned");
            self.flush_deferred_refresh(now);
            return Ok(false);
        }

        let value = edit.committed_value();
        self.host.end_edit(&edit.path, &value.display_string());

        let written = match self.store.tracker_mut() {
            Some(tracker) => value_path::write(tracker, &edit.path, value),
            None => {
                tracing::debug!(path = %edit.path, "no tracker to write the edit into");
                false
            }
        };
        let saved = if written {
            tracing::debug!(path = %edit.path, "edit committed");
            self.store.on_save()
        } else {
            tracing::debug!(path = %edit.path, "edit not written, nothing saved");
            Ok(())
        };

        self.runtime.scheduler.schedule(
            SchedulerCommand::Debounce {
                key: REFRESH_KEY.to_string(),
                delay: self.config.debounce(),
                event: DockEvent::Refresh,
            },
            now,
        );
        self.flush_deferred_refresh(now);

        saved?;
        Ok(written)
    }

    pub(super) fn cancel_edit(&mut self, now: Instant) {
        let Some(edit) = self.runtime.session.cancel() else {
            return;
        };
        if self.host.is_attached(&edit.path) {
            self.host.end_edit(&edit.path, &edit.original);
        }
        tracing::debug!(path = %edit.path, "edit cancelled");
        self.flush_deferred_refresh(now);
    }

    pub(super) fn toggle_group(&mut self, path: &ValuePath, now: Instant) {
        let title = self.current_nodes().into_iter().find_map(|node| match node {
            RenderNode::Group(group) if group.path == *path => Some(group.title),
            _ => None,
        });
        let Some(title) = title else {
            return;
        };
        let collapsed = self.ui.collapse.toggle(&path.to_string(), &title);
        tracing::debug!(path = %path, collapsed, "group toggled");
        self.ui.detector.reset();
        self.refresh(now, true);
    }
}
