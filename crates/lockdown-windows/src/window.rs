use lockdown_core::WindowHandle;

use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, GetWindowTextLengthW, GetWindowTextW, PostMessageW, WM_CLOSE,
};

/// Converts a core handle back into a Win32 `HWND`.
pub(crate) fn hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.0 as *mut _)
}

/// Converts a Win32 `HWND` into a core handle.
pub(crate) fn handle(hwnd: HWND) -> WindowHandle {
    WindowHandle(hwnd.0 as usize)
}

/// Returns the foreground window, or `None` when the OS reports none
/// (e.g. while the secure desktop is shown).
pub fn foreground_window() -> Option<WindowHandle> {
    // SAFETY: GetForegroundWindow takes no arguments and only reads state.
    let hwnd = unsafe { GetForegroundWindow() };
    if hwnd.is_invalid() {
        None
    } else {
        Some(handle(hwnd))
    }
}

/// Returns the title of `hwnd`, or an empty string for untitled or
/// invalid windows.
pub fn title(hwnd: HWND) -> String {
    // SAFETY: both calls only read window text. A stale HWND makes them
    // return 0, which maps to an empty title.
    unsafe {
        let length = GetWindowTextLengthW(hwnd);
        if length <= 0 {
            return String::new();
        }

        // +1 for the null terminator that Windows requires
        let mut buffer = vec![0u16; (length + 1) as usize];
        let copied = GetWindowTextW(hwnd, &mut buffer);
        if copied <= 0 {
            return String::new();
        }
        String::from_utf16_lossy(&buffer[..copied as usize])
    }
}

/// Posts `WM_CLOSE` so the window can shut down on its own terms.
///
/// Does not wait for the window to handle it. Returns whether the
/// message was queued.
pub fn request_close(hwnd: HWND) -> bool {
    // SAFETY: PostMessageW with a stale HWND fails with an error result
    // instead of touching memory.
    unsafe { PostMessageW(Some(hwnd), WM_CLOSE, WPARAM(0), LPARAM(0)).is_ok() }
}
