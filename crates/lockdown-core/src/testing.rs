//! Scripted [`Desktop`] for unit tests.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::window::{
    Desktop, ProcessId, ProcessSnapshot, WindowEntry, WindowHandle, WindowRegistry,
};

#[derive(Debug, Default)]
pub(crate) struct FakeState {
    pub foreground: Option<WindowHandle>,
    pub windows: WindowRegistry,
    pub processes: ProcessSnapshot,
    pub closes: Vec<WindowHandle>,
    pub kills: Vec<ProcessId>,
    pub close_delivered: bool,
    pub terminate_succeeds: bool,
}

/// A desktop whose windows and processes are set by the test.
///
/// Clones share state, so a test can keep a handle while the monitor
/// owns another.
#[derive(Debug, Clone)]
pub(crate) struct FakeDesktop(Arc<Mutex<FakeState>>);

impl FakeDesktop {
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(FakeState {
            close_delivered: true,
            terminate_succeeds: true,
            ..FakeState::default()
        })))
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.0.lock().unwrap()
    }

    /// Adds a titled window owned by `pid`.
    pub fn add_window(&self, handle: usize, pid: u32, title: &str) {
        self.state().windows.insert(
            WindowHandle(handle),
            WindowEntry {
                pid: ProcessId(pid),
                title: title.to_string(),
            },
        );
    }

    pub fn add_process(&self, pid: u32, name: &str) {
        self.state().processes.insert(ProcessId(pid), name.to_string());
    }

    /// Brings `handle` to the foreground.
    pub fn focus(&self, handle: usize) {
        self.state().foreground = Some(WindowHandle(handle));
    }

    pub fn remove_window(&self, handle: usize) {
        self.state().windows.remove(&WindowHandle(handle));
    }

    pub fn closes(&self) -> Vec<WindowHandle> {
        self.state().closes.clone()
    }

    pub fn kills(&self) -> Vec<ProcessId> {
        self.state().kills.clone()
    }
}

impl Desktop for FakeDesktop {
    fn foreground_window(&self) -> Option<WindowHandle> {
        self.state().foreground
    }

    fn window_title(&self, handle: Option<WindowHandle>) -> String {
        let state = self.state();
        handle
            .or(state.foreground)
            .and_then(|h| state.windows.get(&h))
            .map(|entry| entry.title.clone())
            .unwrap_or_default()
    }

    fn enumerate_processes(&self) -> ProcessSnapshot {
        self.state().processes.clone()
    }

    fn enumerate_windows(&self) -> WindowRegistry {
        self.state().windows.clone()
    }

    fn request_close(&self, handle: WindowHandle) -> bool {
        let mut state = self.state();
        state.closes.push(handle);
        state.close_delivered
    }

    fn force_terminate(&self, pid: ProcessId) -> bool {
        let mut state = self.state();
        state.kills.push(pid);
        state.terminate_succeeds
    }
}
