//! Control panel boundary: the password gate and a console rendition.
//!
//! The panel is the only way monitoring stops. It reports a single
//! terminal [`PanelEvent`] carrying whether the password was entered.

use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

/// Title of the panel window. The monitor never acts on a window with
/// this title.
pub const PANEL_TITLE: &str = "Lockdown Panel";

/// Lockout after the first wrong password.
pub const INITIAL_WAIT: Duration = Duration::from_secs(2);
/// The lockout stops doubling once it reaches this length.
pub const MAX_DOUBLING_WAIT: Duration = Duration::from_secs(60);

/// The terminal event that ends a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// Sent by the panel itself as it closes.
    Closed { password_correct: bool },
    /// Sent from outside the panel (e.g. a console close handler) while
    /// the panel may still be blocked on input.
    Interrupted,
}

impl PanelEvent {
    pub fn password_correct(self) -> bool {
        match self {
            Self::Closed { password_correct } => password_correct,
            Self::Interrupted => false,
        }
    }
}

/// Result of one password attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Accepted,
    /// Wrong password; input is locked for `wait`.
    Rejected { wait: Duration },
    /// Input is still locked from an earlier failure.
    Locked { remaining: Duration },
}

/// Verifies passwords with a doubling lockout after each failure.
#[derive(Debug, Clone)]
pub struct PasswordGate {
    password: String,
    next_wait: Duration,
    locked_until: Option<Instant>,
}

impl PasswordGate {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            next_wait: INITIAL_WAIT,
            locked_until: None,
        }
    }

    /// Checks `input` at time `now`.
    pub fn attempt(&mut self, input: &str, now: Instant) -> Attempt {
        if let Some(until) = self.locked_until
            && now < until
        {
            return Attempt::Locked {
                remaining: until - now,
            };
        }
        self.locked_until = None;

        if input == self.password {
            return Attempt::Accepted;
        }

        let wait = self.next_wait;
        self.locked_until = Some(now + wait);
        if wait < MAX_DOUBLING_WAIT {
            self.next_wait = wait * 2;
        }
        Attempt::Rejected { wait }
    }
}

/// A panel that reads passwords line by line from a console.
///
/// Closes with `password_correct: true` once the gate accepts a line,
/// or with `false` when input ends.
pub struct ConsolePanel<R, W> {
    gate: PasswordGate,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePanel<R, W> {
    pub fn new(gate: PasswordGate, input: R, output: W) -> Self {
        Self {
            gate,
            input,
            output,
        }
    }

    /// Prompts until the password is accepted or input runs out.
    pub fn run(mut self) -> PanelEvent {
        let mut line = String::new();
        loop {
            let _ = write!(self.output, "Enter password to stop monitoring: ");
            let _ = self.output.flush();

            line.clear();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => return PanelEvent::Closed { password_correct: false },
                Ok(_) => {}
            }

            let input = line.trim_end_matches(['\r', '\n']);
            match self.gate.attempt(input, Instant::now()) {
                Attempt::Accepted => {
                    let _ = writeln!(self.output, "Password accepted.");
                    return PanelEvent::Closed {
                        password_correct: true,
                    };
                }
                Attempt::Rejected { wait } => {
                    let _ = writeln!(
                        self.output,
                        "Invalid password, wait {}s before trying again.",
                        wait.as_secs()
                    );
                }
                Attempt::Locked { remaining } => {
                    let _ = writeln!(
                        self.output,
                        "Input locked, {}s remaining.",
                        remaining.as_secs().max(1)
                    );
                }
            }
        }
    }
}
