//! Console helpers for the panel: window title and close events.
//!
//! The close handler is registered through `SetConsoleCtrlHandler`,
//! which only accepts a bare function, so the event sender lives in a
//! process-wide slot written once.

use std::sync::OnceLock;
use std::sync::mpsc::Sender;
use std::time::Duration;

use lockdown_core::{ExitBarrier, PanelEvent};

use windows::Win32::System::Console::{
    CTRL_BREAK_EVENT, CTRL_C_EVENT, CTRL_CLOSE_EVENT, CTRL_LOGOFF_EVENT, CTRL_SHUTDOWN_EVENT,
    SetConsoleCtrlHandler, SetConsoleTitleW,
};
use windows::core::HSTRING;

/// Global sender, written once by `set_close_handler` and read by the callback.
static SENDER: OnceLock<Sender<PanelEvent>> = OnceLock::new();

/// Released by `release_close_handler` once the session has finished.
static EXIT: ExitBarrier = ExitBarrier::new();

/// How long a close, logoff or shutdown event may hold the process open.
/// Windows terminates the process about 5s after one of these events.
const CLOSE_GRACE: Duration = Duration::from_millis(4500);

/// Sets the console window title so the monitor can recognize the panel.
pub fn set_title(title: &str) -> bool {
    // SAFETY: SetConsoleTitleW copies the string; HSTRING keeps it alive
    // for the duration of the call.
    unsafe { SetConsoleTitleW(&HSTRING::from(title)).is_ok() }
}

/// Treats Ctrl+C, Ctrl+Break and console close, logoff or shutdown as
/// an interruption of the session.
///
/// Windows kills the process as soon as the handler returns from a
/// close, logoff or shutdown event, so for those the handler blocks
/// until [`release_close_handler`] is called or the grace period ends.
///
/// Returns `false` if the handler could not be installed or was already
/// installed.
pub fn set_close_handler(tx: Sender<PanelEvent>) -> bool {
    if SENDER.set(tx).is_err() {
        return false;
    }
    unsafe { SetConsoleCtrlHandler(Some(handler), true) }.is_ok()
}

/// Lets a blocked close handler return once the final record line is
/// written.
pub fn release_close_handler() {
    EXIT.release();
}

unsafe extern "system" fn handler(ctrl_type: u32) -> windows::core::BOOL {
    let terminating = matches!(
        ctrl_type,
        CTRL_CLOSE_EVENT | CTRL_LOGOFF_EVENT | CTRL_SHUTDOWN_EVENT
    );
    let interrupt = matches!(ctrl_type, CTRL_C_EVENT | CTRL_BREAK_EVENT);
    if !(terminating || interrupt) {
        return windows::core::BOOL(0);
    }

    if let Some(tx) = SENDER.get() {
        let _ = tx.send(PanelEvent::Interrupted);
        if terminating {
            EXIT.wait(CLOSE_GRACE);
        }
    }
    windows::core::BOOL(1)
}
