use crate::error::ScriptError;

/// Element ids handed to a template script's `init` hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptContext {
    /// Body element the template output is rendered into.
    pub root_id: String,
    pub dock_id: String,
}

/// Capabilities a template script may expose. Both hooks are optional.
pub trait TemplateScript {
    fn init(&mut self, _ctx: &ScriptContext) -> Result<(), ScriptError> {
        Ok(())
    }

    fn cleanup(&mut self) -> Result<(), ScriptError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalMode {
    /// Source is a single expression, e.g. `(() => ({ init, cleanup }))`.
    Expression,
    /// Source is a statement body that returns the script.
    Statements,
}

pub type ScriptFactory = Box<dyn FnOnce() -> Result<Box<dyn TemplateScript>, ScriptError>>;

/// What evaluating template source produced.
pub enum ScriptValue {
    Factory(ScriptFactory),
    Object(Box<dyn TemplateScript>),
    /// Anything else; carries a short description of the value's kind.
    Other(String),
}

/// Evaluates template source in whatever sandbox the host provides.
pub trait ScriptEngine {
    fn evaluate(&mut self, source: &str, mode: EvalMode) -> Result<ScriptValue, ScriptError>;
}

/// Evaluates `source` as an expression, then as statements, and resolves the
/// result to a script instance. Factories are invoked with no arguments.
pub fn instantiate(
    engine: &mut dyn ScriptEngine,
    source: &str,
) -> Result<Box<dyn TemplateScript>, ScriptError> {
    let value = match engine.evaluate(source, EvalMode::Expression) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(error = %err, "expression evaluation failed, retrying as statements");
            engine.evaluate(source, EvalMode::Statements)?
        }
    };

    match value {
        ScriptValue::Factory(factory) => factory(),
        ScriptValue::Object(script) => Ok(script),
        ScriptValue::Other(kind) => Err(ScriptError::Shape(kind)),
    }
}
