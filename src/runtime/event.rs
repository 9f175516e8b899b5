use crate::core::value_path::ValuePath;
use std::str::FromStr;

/// Header and template controls, identified by their `data-dock-action` id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockAction {
    Open,
    Regenerate,
    Close,
    ToggleSide,
    ToggleOriginal,
}

impl DockAction {
    pub fn id(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Regenerate => "regenerate",
            Self::Close => "close",
            Self::ToggleSide => "toggle-side",
            Self::ToggleOriginal => "toggle-og",
        }
    }
}

impl FromStr for DockAction {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "regenerate" => Ok(Self::Regenerate),
            "close" => Ok(Self::Close),
            "toggle-side" => Ok(Self::ToggleSide),
            "toggle-og" => Ok(Self::ToggleOriginal),
            other => Err(format!("unknown dock action {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Enter,
    Escape,
}

/// Every input the panel reacts to, from the host or from its own timers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockEvent {
    /// Interval timer.
    Tick,
    /// Debounced or replayed refresh request.
    Refresh,
    /// The host saw the tracker change.
    DataChanged,
    Action(DockAction),
    LeafClicked {
        path: ValuePath,
    },
    GroupClicked {
        path: ValuePath,
    },
    EditorInput {
        text: String,
    },
    Key(EditKey),
    PointerDown {
        inside_editor: bool,
    },
    RegenerationFinished {
        ok: bool,
    },
    RegenerationTimedOut,
    /// Next animation frame after a template install.
    FrameReady,
    ChatChanged,
    OriginalAppeared,
}
