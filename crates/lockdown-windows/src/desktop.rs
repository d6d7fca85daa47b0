use lockdown_core::{Desktop, ProcessId, ProcessSnapshot, WindowHandle, WindowRegistry};

use crate::{enumerate, process, window};

/// The Win32 desktop of the current session.
#[derive(Debug, Clone, Copy, Default)]
pub struct WinDesktop;

impl Desktop for WinDesktop {
    fn foreground_window(&self) -> Option<WindowHandle> {
        window::foreground_window()
    }

    fn window_title(&self, handle: Option<WindowHandle>) -> String {
        match handle.or_else(window::foreground_window) {
            Some(handle) => window::title(window::hwnd(handle)),
            None => String::new(),
        }
    }

    fn enumerate_processes(&self) -> ProcessSnapshot {
        process::snapshot_processes()
    }

    fn enumerate_windows(&self) -> WindowRegistry {
        enumerate::enumerate_windows()
    }

    fn request_close(&self, handle: WindowHandle) -> bool {
        window::request_close(window::hwnd(handle))
    }

    fn force_terminate(&self, pid: ProcessId) -> bool {
        process::terminate_process(pid)
    }
}
