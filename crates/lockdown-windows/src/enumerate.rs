use lockdown_core::{ProcessId, WindowEntry, WindowRegistry};

use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::{EnumWindows, GetWindowThreadProcessId};
use windows::core::BOOL;

use crate::window;

/// Enumerates every titled top-level window with its owning process.
///
/// Untitled windows are left out. An enumeration failure yields
/// whatever was collected before it, possibly nothing.
pub fn enumerate_windows() -> WindowRegistry {
    let mut windows = WindowRegistry::new();

    // SAFETY: EnumWindows runs synchronously and calls our callback for
    // each top-level window. The registry pointer passed as LPARAM
    // outlives the call.
    unsafe {
        let _ = EnumWindows(
            Some(enum_window_callback),
            LPARAM(&mut windows as *mut _ as isize),
        );
    }

    windows
}

/// Callback invoked by `EnumWindows` for each top-level window.
///
/// Returns `TRUE` to continue enumeration.
unsafe extern "system" fn enum_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is the registry pointer from enumerate_windows().
    let windows = unsafe { &mut *(lparam.0 as *mut WindowRegistry) };

    let title = window::title(hwnd);
    if !title.is_empty() {
        let mut pid: u32 = 0;
        // SAFETY: writes the owning process id into `pid`.
        unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) };
        windows.insert(
            window::handle(hwnd),
            WindowEntry {
                pid: ProcessId(pid),
                title,
            },
        );
    }

    BOOL(1) // TRUE — continue enumerating
}
