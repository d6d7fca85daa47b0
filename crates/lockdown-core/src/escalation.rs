//! Per-iteration close/kill decisions.
//!
//! A window matched by an escalating rule gets a cooperative close
//! request and is marked pending. If the next poll still sees the same
//! handle in the foreground with the same title, the close was ignored
//! and the owning process is terminated. Any title change clears the
//! pending mark, so a reused handle value never inherits a stale kill.

use crate::rules::{Action, Policy, RuleMatch};
use crate::window::{Desktop, ProcessId, WindowHandle};

/// Escalation state between two polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscalationState {
    /// No close request is awaiting escalation.
    #[default]
    Idle,
    /// A close was requested on this handle by an escalating rule.
    PendingKill(WindowHandle),
}

/// Why an escalation did not terminate anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillAbort {
    /// The owning process is in the start-up Protect set.
    Protected(ProcessId),
    /// The window was gone from the enumeration.
    Vanished,
}

/// What one iteration did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to look at: no foreground window, empty title, or the
    /// control panel itself.
    Skipped,
    /// Same title as last time and nothing pending for this window.
    Unchanged,
    /// A protected title came to the foreground.
    Protected { title: String },
    /// A new title matched no rule.
    Unmatched { title: String },
    /// A close request was sent.
    CloseRequested {
        title: String,
        rule: RuleMatch,
        delivered: bool,
    },
    /// An ignored close escalated to a terminate attempt.
    Killed {
        title: String,
        pid: ProcessId,
        terminated: bool,
    },
    /// An escalation fired but nothing was terminated.
    KillAborted { title: String, reason: KillAbort },
}

/// Monitor state: the last title seen and any pending escalation.
///
/// Lives only as long as one monitor run; nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct MonitorState {
    last_title: String,
    escalation: EscalationState,
}

impl MonitorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_title(&self) -> &str {
        &self.last_title
    }

    pub fn escalation(&self) -> EscalationState {
        self.escalation
    }

    /// Runs one transition for the foreground window `hwnd` titled
    /// `title`.
    pub fn step<D: Desktop + ?Sized>(
        &mut self,
        desktop: &D,
        policy: &Policy,
        hwnd: WindowHandle,
        title: &str,
    ) -> Outcome {
        if title.is_empty() {
            return Outcome::Skipped;
        }

        if title == self.last_title {
            return match self.escalation {
                EscalationState::PendingKill(target) if target == hwnd => {
                    self.escalation = EscalationState::Idle;
                    escalate(desktop, policy, hwnd, title)
                }
                _ => Outcome::Unchanged,
            };
        }

        self.last_title = title.to_string();
        self.escalation = EscalationState::Idle;

        match policy.classify(title) {
            Action::Observe => Outcome::Protected {
                title: title.to_string(),
            },
            Action::Record => Outcome::Unmatched {
                title: title.to_string(),
            },
            Action::CloseOnce(rule) => Outcome::CloseRequested {
                title: title.to_string(),
                delivered: desktop.request_close(hwnd),
                rule,
            },
            Action::CloseAndEscalate(rule) => {
                let delivered = desktop.request_close(hwnd);
                self.escalation = EscalationState::PendingKill(hwnd);
                Outcome::CloseRequested {
                    title: title.to_string(),
                    rule,
                    delivered,
                }
            }
        }
    }
}

/// Terminates the owner of `hwnd` unless it is protected.
///
/// The owner is looked up in a fresh enumeration so the pid reflects the
/// window as it is now.
fn escalate<D: Desktop + ?Sized>(
    desktop: &D,
    policy: &Policy,
    hwnd: WindowHandle,
    title: &str,
) -> Outcome {
    let title = title.to_string();
    let Some(entry) = desktop.enumerate_windows().remove(&hwnd) else {
        return Outcome::KillAborted {
            title,
            reason: KillAbort::Vanished,
        };
    };
    if policy.is_protected(entry.pid) {
        return Outcome::KillAborted {
            title,
            reason: KillAbort::Protected(entry.pid),
        };
    }
    Outcome::Killed {
        title,
        pid: entry.pid,
        terminated: desktop.force_terminate(entry.pid),
    }
}

#[cfg(test)]
#[path = "escalation_tests.rs"]
mod tests;
