use super::DockPanel;
use crate::core::value_path::ValuePath;
use crate::host::{DockHost, TrackerStore};
use crate::runtime::event::DockEvent;
use crate::runtime::scheduler::SchedulerCommand;
use crate::state::fingerprint::RefreshDecision;
use crate::ui::html::render_nodes;
use crate::ui::node::RenderNode;
use crate::ui::walker::SchemaWalker;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Dock is not mounted.
    Absent,
    /// An editor is open; the refresh replays once it closes.
    Deferred,
    /// No tracker or schema yet.
    Placeholder,
    /// Fingerprint unchanged.
    Skipped,
    Rendered { via_template: bool },
}

impl<S: TrackerStore, H: DockHost> DockPanel<S, H> {
    pub(super) fn refresh(&mut self, now: Instant, force: bool) -> RefreshOutcome {
        if !self.ui.open {
            return RefreshOutcome::Absent;
        }
        if self.runtime.session.is_editing() {
            self.runtime.session.defer_refresh();
            tracing::debug!("refresh deferred while editing");
            return RefreshOutcome::Deferred;
        }

        let assets = self.template.active().clone();
        if self.ui.overlay.apply(&assets, &mut self.host) {
            self.ui.detector.reset();
        }

        let (Some(data), Some(schema)) = (self.store.tracker(), self.store.schema()) else {
            self.ui.detector.reset();
            self.host.set_body_html(&self.config.placeholder_html);
            return RefreshOutcome::Placeholder;
        };

        if force {
            self.ui.detector.reset();
        }
        if self.ui.detector.check(data, &assets) == RefreshDecision::Skip {
            return RefreshOutcome::Skipped;
        }

        let mut body = String::new();
        if assets.is_active() {
            body = self.ui.overlay.render_body(data, &assets.html);
        }
        let via_template = !body.trim().is_empty();
        if !via_template {
            let nodes = SchemaWalker::new(&self.roster).walk(data, schema, &ValuePath::empty(), 0);
            let visibility = self.ui.collapse.apply_visibility(&nodes);
            body = render_nodes(&nodes, &visibility);
        }
        self.host.set_body_html(&body);
        tracing::debug!(via_template, "dock rendered");

        if self.ui.overlay.init_pending() {
            self.runtime
                .scheduler
                .schedule(SchedulerCommand::EmitNow(DockEvent::FrameReady), now);
        }

        RefreshOutcome::Rendered { via_template }
    }

    /// Replays a refresh that was deferred by an open editor, at most once.
    pub(super) fn flush_deferred_refresh(&mut self, now: Instant) {
        if self.runtime.session.take_deferred_refresh() {
            self.refresh(now, false);
        }
    }

    /// Default-view nodes for the current data, used to resolve clicks.
    pub(super) fn current_nodes(&self) -> Vec<RenderNode> {
        match (self.store.tracker(), self.store.schema()) {
            (Some(data), Some(schema)) => {
                SchemaWalker::new(&self.roster).walk(data, schema, &ValuePath::empty(), 0)
            }
            _ => Vec::new(),
        }
    }
}
