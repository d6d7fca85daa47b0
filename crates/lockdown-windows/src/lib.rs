//! Windows implementation of the Lockdown desktop boundary.
//!
//! Everything that touches Win32 is compiled only on Windows; other
//! hosts get [`SUPPORTED`] = `false` and nothing else.

/// Whether this build can run the monitor.
pub const SUPPORTED: bool = cfg!(windows);

/// Console title and close-event handling for the panel.
#[cfg(windows)]
pub mod console;

/// The `Desktop` implementation.
#[cfg(windows)]
pub mod desktop;

/// Win32 top-level window enumeration.
#[cfg(windows)]
pub mod enumerate;

/// Process snapshot and termination.
#[cfg(windows)]
pub mod process;

/// Foreground window, titles, and close requests.
#[cfg(windows)]
pub mod window;

#[cfg(windows)]
pub use desktop::WinDesktop;
#[cfg(windows)]
pub use enumerate::enumerate_windows;
