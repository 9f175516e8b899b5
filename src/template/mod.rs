pub mod macros;
pub mod script;

use crate::core::value::TrackerValue;
use crate::error::RenderError;
use crate::host::{DockHost, StyleHandle};
use serde::{Deserialize, Serialize};

pub use macros::{MacroGroup, macro_catalog, macro_groups};
pub use script::{EvalMode, ScriptContext, ScriptEngine, ScriptFactory, ScriptValue, TemplateScript};

/// User-authored replacement for the default dock view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateAssets {
    pub enabled: bool,
    pub html: String,
    pub css: String,
    pub js: String,
}

impl TemplateAssets {
    /// Identity of the installed side effects (stylesheet and script).
    /// `None` while disabled.
    pub fn asset_key(&self) -> Option<String> {
        if !self.enabled {
            return None;
        }
        Some(format!("{}:{}\u{1f}{}", self.css.len(), self.css, self.js))
    }

    /// Enabled with non-blank markup.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.html.trim().is_empty()
    }
}

/// Mustache-like substitution of tracker data into template markup.
pub trait TemplateRenderer {
    fn render(&self, data: &TrackerValue, html: &str) -> Result<String, RenderError>;
}

/// Owns the injected stylesheet and the running template script, and swaps
/// them when the template's CSS or JS changes.
pub struct TemplateOverlay {
    renderer: Box<dyn TemplateRenderer>,
    engine: Box<dyn ScriptEngine>,
    style: Option<StyleHandle>,
    script: Option<Box<dyn TemplateScript>>,
    init_pending: bool,
    applied_key: Option<String>,
}

impl TemplateOverlay {
    pub fn new(renderer: Box<dyn TemplateRenderer>, engine: Box<dyn ScriptEngine>) -> Self {
        Self {
            renderer,
            engine,
            style: None,
            script: None,
            init_pending: false,
            applied_key: None,
        }
    }

    pub fn has_script(&self) -> bool {
        self.script.is_some()
    }

    pub fn has_style(&self) -> bool {
        self.style.is_some()
    }

    pub fn init_pending(&self) -> bool {
        self.init_pending
    }

    /// Reinstalls style and script when the asset key changed. Returns whether
    /// anything was torn down or installed.
    pub fn apply<H: DockHost + ?Sized>(&mut self, assets: &TemplateAssets, host: &mut H) -> bool {
        let key = assets.asset_key();
        if key == self.applied_key {
            return false;
        }

        self.teardown(host);

        if key.is_some() {
            if !assets.css.trim().is_empty() {
                self.style = Some(host.inject_style(&assets.css));
            }
            if !assets.js.trim().is_empty() {
                match script::instantiate(&mut *self.engine, &assets.js) {
                    Ok(installed) => {
                        self.script = Some(installed);
                        self.init_pending = true;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "template script not installed");
                    }
                }
            }
        }

        self.applied_key = key;
        true
    }

    /// Empty output means "fall back to the default view".
    pub fn render_body(&self, data: &TrackerValue, html: &str) -> String {
        match self.renderer.render(data, html) {
            Ok(out) => out,
            Err(err) => {
                tracing::warn!(error = %err, "template render failed, using default view");
                String::new()
            }
        }
    }

    /// Runs the script's `init` once per install. Returns whether it ran.
    pub fn run_init(&mut self, ctx: &ScriptContext) -> bool {
        if !std::mem::take(&mut self.init_pending) {
            return false;
        }
        let Some(installed) = self.script.as_mut() else {
            return false;
        };
        if let Err(err) = installed.init(ctx) {
            tracing::warn!(error = %err, "template script init failed");
        }
        true
    }

    /// Removes the stylesheet and cleans up the script.
    pub fn teardown<H: DockHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(handle) = self.style.take() {
            host.remove_style(handle);
        }
        if let Some(mut installed) = self.script.take()
            && let Err(err) = installed.cleanup()
        {
            tracing::warn!(error = %err, "template script cleanup failed");
        }
        self.init_pending = false;
        self.applied_key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{
        EvalMode, ScriptContext, ScriptEngine, ScriptValue, TemplateAssets, TemplateOverlay,
        TemplateRenderer, TemplateScript,
    };
    use crate::core::value::TrackerValue;
    use crate::error::{RenderError, ScriptError};
    use crate::host::StyleHandle;
    use crate::host::fake::FakeHost;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        log: Log,
        fail_cleanup: bool,
    }

    impl TemplateScript for Recorder {
        fn init(&mut self, _ctx: &ScriptContext) -> Result<(), ScriptError> {
            self.log.borrow_mut().push("init".to_string());
            Ok(())
        }

        fn cleanup(&mut self) -> Result<(), ScriptError> {
            self.log.borrow_mut().push("cleanup".to_string());
            if self.fail_cleanup {
                return Err(ScriptError::Hook {
                    hook: "cleanup",
                    message: "boom".to_string(),
                });
            }
            Ok(())
        }
    }

    struct Engine {
        log: Log,
    }

    impl ScriptEngine for Engine {
        fn evaluate(&mut self, source: &str, _mode: EvalMode) -> Result<ScriptValue, ScriptError> {
            if source.contains("syntax error") {
                return Err(ScriptError::Evaluate("bad".to_string()));
            }
            Ok(ScriptValue::Object(Box::new(Recorder {
                log: self.log.clone(),
                fail_cleanup: source.contains("fail cleanup"),
            })))
        }
    }

    struct Upper;

    impl TemplateRenderer for Upper {
        fn render(&self, _data: &TrackerValue, html: &str) -> Result<String, RenderError> {
            if html.contains("{{#broken") {
                return Err(RenderError("unclosed block".to_string()));
            }
            Ok(html.to_uppercase())
        }
    }

    fn overlay(log: &Log) -> TemplateOverlay {
        TemplateOverlay::new(Box::new(Upper), Box::new(Engine { log: log.clone() }))
    }

    fn assets(css: &str, js: &str) -> TemplateAssets {
        TemplateAssets {
            enabled: true,
            html: "<p>{{Time}}</p>".to_string(),
            css: css.to_string(),
            js: js.to_string(),
        }
    }

    fn ctx() -> ScriptContext {
        ScriptContext {
            root_id: "body".to_string(),
            dock_id: "dock".to_string(),
        }
    }

    #[test]
    fn unchanged_assets_are_not_reinstalled() {
        let log = Log::default();
        let mut overlay = overlay(&log);
        let mut host = FakeHost::default();
        assert!(overlay.apply(&assets(".a{}", "script"), &mut host));
        assert!(!overlay.apply(&assets(".a{}", "script"), &mut host));
        assert_eq!(host.styles, vec![StyleHandle(1)]);
        assert!(overlay.run_init(&ctx()));
        assert!(!overlay.run_init(&ctx()));
        assert_eq!(*log.borrow(), vec!["init"]);
    }

    #[test]
    fn change_swaps_style_and_cleans_up_previous_script() {
        let log = Log::default();
        let mut overlay = overlay(&log);
        let mut host = FakeHost::default();
        overlay.apply(&assets(".a{}", "script fail cleanup"), &mut host);
        overlay.run_init(&ctx());
        assert!(overlay.apply(&assets(".b{}", "script"), &mut host));
        assert_eq!(host.styles, vec![StyleHandle(2)]);
        assert!(overlay.init_pending());
        assert_eq!(*log.borrow(), vec!["init", "cleanup"]);
    }

    #[test]
    fn blank_css_injects_nothing_and_bad_script_installs_nothing() {
        let log = Log::default();
        let mut overlay = overlay(&log);
        let mut host = FakeHost::default();
        overlay.apply(&assets("  ", "syntax error"), &mut host);
        assert!(host.styles.is_empty());
        assert!(!overlay.has_script());
        assert!(!overlay.run_init(&ctx()));
    }

    #[test]
    fn disabling_tears_everything_down() {
        let log = Log::default();
        let mut overlay = overlay(&log);
        let mut host = FakeHost::default();
        overlay.apply(&assets(".a{}", "script"), &mut host);
        let disabled = TemplateAssets {
            enabled: false,
            ..assets(".a{}", "script")
        };
        assert!(overlay.apply(&disabled, &mut host));
        assert!(host.styles.is_empty());
        assert!(!overlay.has_script());
        assert_eq!(*log.borrow(), vec!["cleanup"]);
    }

    #[test]
    fn render_errors_yield_empty_body() {
        let log = Log::default();
        let overlay = overlay(&log);
        let data = TrackerValue::empty_object();
        assert_eq!(overlay.render_body(&data, "<b>x</b>"), "<B>X</B>");
        assert_eq!(overlay.render_body(&data, "{{#broken}}"), "");
    }
}
