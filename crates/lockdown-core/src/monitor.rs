//! The timed foreground-window monitor loop.

use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::escalation::{KillAbort, MonitorState, Outcome};
use crate::panel::PANEL_TITLE;
use crate::record::{Category, Entry, RecordLog};
use crate::rules::{Policy, RuleKind};
use crate::stop::StopSignal;
use crate::window::Desktop;

/// Loop settings taken from the config at start-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorSettings {
    pub interval: Duration,
    pub record_all: bool,
}

impl From<&Config> for MonitorSettings {
    fn from(config: &Config) -> Self {
        Self {
            interval: config.interval(),
            record_all: config.record_all,
        }
    }
}

/// Polls the foreground window and acts on it until stopped.
///
/// Strictly sequential: one foreground read, one classification and at
/// most one action per iteration, followed by a blocking sleep. The
/// stop signal is checked once per iteration, so shutdown latency is at
/// most one interval.
pub struct Monitor<D> {
    desktop: D,
    policy: Policy,
    settings: MonitorSettings,
    record: RecordLog,
    state: MonitorState,
}

impl<D: Desktop> Monitor<D> {
    pub fn new(desktop: D, policy: Policy, settings: MonitorSettings, record: RecordLog) -> Self {
        Self {
            desktop,
            policy,
            settings,
            record,
            state: MonitorState::new(),
        }
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Runs iterations until `stop` is set.
    pub fn run(mut self, stop: &StopSignal) {
        while !stop.is_stopped() {
            self.tick();
            thread::sleep(self.settings.interval);
        }
    }

    /// Runs a single iteration and records what it did.
    pub fn tick(&mut self) -> Outcome {
        let Some(hwnd) = self.desktop.foreground_window() else {
            return Outcome::Skipped;
        };
        let title = self.desktop.window_title(Some(hwnd));
        if title.is_empty() || title == PANEL_TITLE {
            return Outcome::Skipped;
        }

        let outcome = self.state.step(&self.desktop, &self.policy, hwnd, &title);
        if let Some(entry) = entry_for(&outcome, self.settings.record_all) {
            self.record.append(&entry);
        }
        outcome
    }
}

/// Builds the record line for an outcome, if it deserves one.
pub fn entry_for(outcome: &Outcome, record_all: bool) -> Option<Entry> {
    let entry = match outcome {
        Outcome::Skipped | Outcome::Unchanged => return None,
        Outcome::Unmatched { title } => {
            if !record_all {
                return None;
            }
            Entry::plain(title.as_str())
        }
        Outcome::Protected { title } => Entry::new(
            Category::Protect,
            format!("visitor is using protected window [{title}]"),
        ),
        Outcome::CloseRequested {
            title,
            rule,
            delivered,
        } => {
            let pattern = rule
                .pattern
                .as_deref()
                .map(|p| format!("({p})"))
                .unwrap_or_default();
            let action = match (rule.kind.escalates(), *delivered) {
                (_, false) => "close request could not be delivered",
                (true, true) => "trying to close window",
                (false, true) => "close request sent",
            };
            Entry::new(
                category_for(rule.kind),
                format!("visitor tried to open [{title}]{pattern}>>>{action}"),
            )
        }
        Outcome::Killed {
            title,
            pid,
            terminated,
        } => {
            let result = if *terminated { "succeeded" } else { "failed" };
            Entry::new(
                Category::Kill,
                format!("force closing [{title}] (pid {pid})>>>{result}"),
            )
        }
        Outcome::KillAborted { title, reason } => {
            let message = match reason {
                KillAbort::Protected(_) => format!(
                    "window [{title}] failed to close, it may belong to a protected process"
                ),
                KillAbort::Vanished => {
                    format!("window [{title}] disappeared before it could be force closed")
                }
            };
            Entry::new(Category::Kill, message)
        }
    };
    Some(entry)
}

fn category_for(kind: RuleKind) -> Category {
    match kind {
        RuleKind::Ordinary => Category::Ordinary,
        RuleKind::Force => Category::Force,
        RuleKind::Include => Category::Include,
        RuleKind::ExInclude => Category::ExInclude,
    }
}
