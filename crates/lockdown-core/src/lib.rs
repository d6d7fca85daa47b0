pub mod config;
pub mod error;
pub mod escalation;
pub mod monitor;
pub mod panel;
pub mod record;
pub mod rules;
pub mod session;
pub mod stop;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{Config, DetectionLevel, RuleSet};
pub use error::{Error, Result};
pub use escalation::{EscalationState, MonitorState, Outcome};
pub use monitor::{Monitor, MonitorSettings};
pub use panel::{ConsolePanel, PANEL_TITLE, PanelEvent, PasswordGate};
pub use record::{Category, Entry, RecordLog};
pub use rules::{Action, Policy, RuleKind};
pub use stop::{ExitBarrier, StopSignal};
pub use window::{Desktop, ProcessId, ProcessSnapshot, WindowEntry, WindowHandle, WindowRegistry};
