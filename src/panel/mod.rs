mod actions;
mod editing;
mod refresh;


pub use refresh::RefreshOutcome;

use crate::config::{DockConfig, DockSide};
use crate::core::value_path::ValuePath;
use crate::error::DockError;
use crate::host::{DockHost, TrackerStore};
use crate::runtime::event::{DockEvent, EditKey};
use crate::runtime::scheduler::{REFRESH_KEY, Scheduler, SchedulerCommand, TICK_KEY};
use crate::state::collapse::CollapseStore;
use crate::state::edit::{ActiveEdit, EditSession};
use crate::state::fingerprint::ChangeDetector;
use crate::state::original::OriginalVisibility;
use crate::template::{ScriptContext, ScriptEngine, TemplateAssets, TemplateOverlay, TemplateRenderer};
use crate::ui::roster::RosterPolicy;
use std::time::{Duration, Instant};

struct UiState {
    open: bool,
    side: DockSide,
    collapse: CollapseStore,
    detector: ChangeDetector,
    overlay: TemplateOverlay,
    original: OriginalVisibility,
}

#[derive(Default)]
struct RuntimeState {
    scheduler: Scheduler,
    session: EditSession,
    regenerating: bool,
    user_closed: bool,
}

#[derive(Default)]
struct TemplateState {
    saved: TemplateAssets,
    preview: Option<TemplateAssets>,
}

impl TemplateState {
    fn active(&self) -> &TemplateAssets {
        self.preview.as_ref().unwrap_or(&self.saved)
    }
}

/// The dock controller. Owns every piece of panel state; the host drives it
/// by forwarding `DockEvent`s and calling `poll` when `poll_timeout` elapses.
pub struct DockPanel<S: TrackerStore, H: DockHost> {
    config: DockConfig,
    roster: RosterPolicy,
    store: S,
    host: H,
    ui: UiState,
    runtime: RuntimeState,
    template: TemplateState,
}

impl<S: TrackerStore, H: DockHost> DockPanel<S, H> {
    pub fn new(
        config: DockConfig,
        store: S,
        mut host: H,
        renderer: Box<dyn TemplateRenderer>,
        engine: Box<dyn ScriptEngine>,
    ) -> Self {
        host.set_toggle_visible(true);
        Self {
            roster: RosterPolicy::new(&config.roster),
            ui: UiState {
                open: false,
                side: config.side,
                collapse: CollapseStore::new(config.roster.primary.clone()),
                detector: ChangeDetector::new(),
                overlay: TemplateOverlay::new(renderer, engine),
                original: OriginalVisibility::new(config.auto_hide_original),
            },
            runtime: RuntimeState::default(),
            template: TemplateState::default(),
            config,
            store,
            host,
        }
    }

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn is_open(&self) -> bool {
        self.ui.open
    }

    pub fn side(&self) -> DockSide {
        self.ui.side
    }

    pub fn is_regenerating(&self) -> bool {
        self.runtime.regenerating
    }

    pub fn is_editing(&self) -> bool {
        self.runtime.session.is_editing()
    }

    pub fn active_edit(&self) -> Option<&ActiveEdit> {
        self.runtime.session.active()
    }

    pub fn is_collapsed(&self, path: &ValuePath, title: &str) -> bool {
        self.ui.collapse.is_group_collapsed(path, title)
    }

    /// Preview if one is set, otherwise the saved template.
    pub fn active_template(&self) -> &TemplateAssets {
        self.template.active()
    }

    pub fn set_template(&mut self, assets: TemplateAssets, now: Instant) {
        self.template.saved = assets;
        self.request_refresh(now);
    }

    /// Shows an unsaved draft until `clear_template_preview`.
    pub fn preview_template(&mut self, assets: TemplateAssets, now: Instant) {
        self.template.preview = Some(assets);
        self.request_refresh(now);
    }

    pub fn clear_template_preview(&mut self, now: Instant) {
        if self.template.preview.take().is_some() {
            self.request_refresh(now);
        }
    }

    /// Mounts the dock, renders immediately and starts the refresh interval.
    pub fn open(&mut self, now: Instant) {
        if self.ui.open {
            return;
        }
        self.ui.open = true;
        self.runtime.user_closed = false;
        self.host.mount_dock(self.ui.side);
        self.host.set_toggle_visible(false);
        self.ui.detector.reset();
        self.refresh(now, true);
        self.schedule_tick(now);
        tracing::debug!(side = self.ui.side.as_str(), "dock opened");
    }

    /// User-initiated close: stops every timer, drops any open editor without
    /// writing, and blocks automatic reopening until the dock is opened again.
    pub fn close(&mut self) {
        if !self.ui.open {
            return;
        }
        self.runtime.scheduler.clear();
        if self.runtime.session.cancel().is_some() {
            tracing::debug!("edit discarded on close");
        }
        self.runtime.session.take_deferred_refresh();
        if self.runtime.regenerating {
            self.runtime.regenerating = false;
            self.host.set_regenerate_busy(false);
        }
        self.ui.overlay.teardown(&mut self.host);
        self.ui.detector.reset();
        self.host.unmount_dock();
        self.host.set_toggle_visible(true);
        self.ui.open = false;
        self.runtime.user_closed = true;
        tracing::debug!("dock closed");
    }

    /// Refreshes right away instead of waiting for the next tick.
    pub fn refresh_now(&mut self, now: Instant) -> RefreshOutcome {
        self.refresh(now, false)
    }

    /// Coalesces bursts of change notifications into one refresh.
    pub fn request_refresh(&mut self, now: Instant) {
        if !self.ui.open {
            return;
        }
        self.runtime.scheduler.schedule(
            SchedulerCommand::Debounce {
                key: REFRESH_KEY.to_string(),
                delay: self.config.debounce(),
                event: DockEvent::Refresh,
            },
            now,
        );
    }

    pub fn handle_event(&mut self, event: DockEvent, now: Instant) -> Result<(), DockError> {
        match event {
            DockEvent::Action(action) => return self.dispatch_action(action, now),
            DockEvent::ChatChanged => {
                if !self.runtime.user_closed {
                    self.open(now);
                }
                return Ok(());
            }
            DockEvent::OriginalAppeared => {
                self.ui.original.auto_hide_once(&mut self.host);
                return Ok(());
            }
            _ => {}
        }

        if !self.ui.open {
            return Ok(());
        }

        match event {
            DockEvent::Tick => {
                self.refresh(now, false);
                self.schedule_tick(now);
            }
            DockEvent::Refresh => {
                self.refresh(now, false);
            }
            DockEvent::DataChanged => self.request_refresh(now),
            DockEvent::LeafClicked { path } => self.open_leaf(&path, now)?,
            DockEvent::GroupClicked { path } => self.toggle_group(&path, now),
            DockEvent::EditorInput { text } => {
                self.runtime.session.set_buffer(text);
            }
            DockEvent::Key(EditKey::Enter) => {
                self.commit_edit(now)?;
            }
            DockEvent::Key(EditKey::Escape) => self.cancel_edit(now),
            DockEvent::PointerDown { inside_editor } => {
                if !inside_editor && self.runtime.session.is_editing() {
                    self.commit_edit(now)?;
                }
            }
            DockEvent::RegenerationFinished { ok } => self.finish_regeneration(ok, now),
            DockEvent::RegenerationTimedOut => {
                if self.runtime.regenerating {
                    tracing::warn!(
                        timeout_ms = self.config.regenerate_timeout_ms,
                        "regeneration did not finish in time"
                    );
                    self.finish_regeneration(false, now);
                }
            }
            DockEvent::FrameReady => {
                let ctx = ScriptContext {
                    root_id: self.config.body_element_id.clone(),
                    dock_id: self.config.dock_element_id.clone(),
                };
                self.ui.overlay.run_init(&ctx);
            }
            DockEvent::Action(_) | DockEvent::ChatChanged | DockEvent::OriginalAppeared => {}
        }
        Ok(())
    }

    /// Handles every due timer event. All of them run even if one fails; the
    /// first error is returned.
    pub fn poll(&mut self, now: Instant) -> Result<(), DockError> {
        let mut first_error = None;
        for event in self.runtime.scheduler.drain_ready(now) {
            if let Err(err) = self.handle_event(event, now)
                && first_error.is_none()
            {
                first_error = Some(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        self.runtime.scheduler.poll_timeout(now, default_timeout)
    }

    fn schedule_tick(&mut self, now: Instant) {
        self.runtime.scheduler.schedule(
            SchedulerCommand::EmitAfter {
                key: TICK_KEY.to_string(),
                delay: self.config.refresh_interval(),
                event: DockEvent::Tick,
            },
            now,
        );
    }
}
