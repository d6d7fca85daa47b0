use std::collections::HashMap;
use std::fmt;

/// Opaque identifier for a top-level window.
///
/// The OS may invalidate a handle at any time (the window closes between
/// two queries). Operations on a stale handle are expected to fail
/// quietly, never to abort the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(pub usize);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// Opaque OS process identifier. One process may own many windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(pub u32);

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owning process and title of an enumerated top-level window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowEntry {
    pub pid: ProcessId,
    pub title: String,
}

/// Point-in-time mapping of process id to executable name.
pub type ProcessSnapshot = HashMap<ProcessId, String>;

/// Full top-level window enumeration, rebuilt on every call.
///
/// Only windows with a non-empty title are present.
pub type WindowRegistry = HashMap<WindowHandle, WindowEntry>;

/// The capability set the monitor needs from the desktop.
///
/// Each platform crate (e.g. `lockdown-windows`) provides one
/// implementation against native bindings. Read-side queries degrade to
/// empty results on failure and control operations report failure as
/// `false`; nothing here returns an error.
pub trait Desktop {
    /// Returns the current foreground window, if the OS reports one.
    fn foreground_window(&self) -> Option<WindowHandle>;

    /// Returns the title of `handle`, or of the foreground window when
    /// `None`. Invalid handles and untitled windows yield an empty string.
    fn window_title(&self, handle: Option<WindowHandle>) -> String;

    /// Best-effort snapshot of running processes. Empty on failure.
    fn enumerate_processes(&self) -> ProcessSnapshot;

    /// Enumerates all titled top-level windows.
    fn enumerate_windows(&self) -> WindowRegistry;

    /// Sends a cooperative close request without waiting for it to be
    /// handled. Returns whether the request was delivered.
    fn request_close(&self, handle: WindowHandle) -> bool;

    /// Terminates the process unconditionally. Returns `false` if the
    /// process could not be opened or termination failed.
    fn force_terminate(&self, pid: ProcessId) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_displays_as_hex() {
        assert_eq!(WindowHandle(0x1A2B).to_string(), "0x1A2B");
    }

    #[test]
    fn pid_displays_as_decimal() {
        assert_eq!(ProcessId(4242).to_string(), "4242");
    }
}
