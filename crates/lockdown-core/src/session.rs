//! Runs the monitor and the control panel side by side.

use std::sync::mpsc;
use std::thread;

use crate::monitor::Monitor;
use crate::panel::PanelEvent;
use crate::record::{Category, Entry, RecordLog};
use crate::stop::StopSignal;
use crate::window::Desktop;

/// Runs one lockdown session and returns whether it ended with the
/// correct password.
///
/// The monitor runs on its own thread. `panel` runs on another and
/// must send exactly one [`PanelEvent::Closed`] on the sender it is
/// given; extra senders (e.g. a console close handler) may be cloned
/// from it and send [`PanelEvent::Interrupted`]. The first event
/// received stops the monitor. A channel that closes with no event
/// counts as closing without the password.
///
/// After the monitor thread has finished, a final `Exit` line is
/// recorded. The panel thread is joined when the event came from the
/// panel itself. After an interruption the panel may still be blocked
/// on input, so it is left behind for process exit to reclaim.
pub fn run<D, P>(monitor: Monitor<D>, stop: StopSignal, panel: P, record: &RecordLog) -> bool
where
    D: Desktop + Send + 'static,
    P: FnOnce(mpsc::Sender<PanelEvent>) + Send + 'static,
{
    let (tx, rx) = mpsc::channel();

    let monitor_stop = stop.clone();
    let monitor_thread = thread::spawn(move || monitor.run(&monitor_stop));
    let panel_thread = thread::spawn(move || panel(tx));

    let event = rx.recv().unwrap_or(PanelEvent::Interrupted);

    stop.stop();
    let _ = monitor_thread.join();
    if let PanelEvent::Closed { .. } = event {
        let _ = panel_thread.join();
    }

    let password_correct = event.password_correct();

    record.append(&exit_entry(password_correct));
    password_correct
}

/// The final record line for a session.
pub fn exit_entry(password_correct: bool) -> Entry {
    let message = if password_correct {
        "password correct, exited"
    } else {
        "exited for an unknown reason"
    };
    Entry::new(Category::Exit, message)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::config::{DetectionLevel, RuleSet};
    use crate::monitor::MonitorSettings;
    use crate::rules::Policy;
    use crate::testing::FakeDesktop;

    fn setup(dir: &tempfile::TempDir) -> (FakeDesktop, Monitor<FakeDesktop>, RecordLog) {
        let desktop = FakeDesktop::new();
        desktop.add_window(1, 7, "Notepad");
        desktop.focus(1);
        let rules = RuleSet {
            ordinary: vec!["Notepad".into()],
            ..RuleSet::default()
        };
        let record = RecordLog::new(dir.path().join("record.log"));
        let monitor = Monitor::new(
            desktop.clone(),
            Policy::new(rules, DetectionLevel::new(1), &desktop.enumerate_processes()),
            MonitorSettings {
                interval: Duration::from_millis(1),
                record_all: false,
            },
            record.clone(),
        );
        (desktop, monitor, record)
    }

    #[test]
    fn correct_password_stops_monitor_and_records_exit() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let (desktop, monitor, record) = setup(&dir);
        let watched = desktop.clone();

        // Act
        let correct = run(
            monitor,
            StopSignal::new(),
            move |tx| {
                while watched.closes().is_empty() {
                    std::thread::sleep(Duration::from_millis(1));
                }
                let _ = tx.send(PanelEvent::Closed {
                    password_correct: true,
                });
            },
            &record,
        );

        // Assert
        assert!(correct);
        assert_eq!(desktop.closes().len(), 1);
        let text = std::fs::read_to_string(record.path()).unwrap();
        let last = text.lines().last().unwrap();
        assert!(last.ends_with("[Exit]password correct, exited;"));
    }

    #[test]
    fn panel_closing_without_event_counts_as_unverified() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let (_, monitor, record) = setup(&dir);

        // Act
        let correct = run(monitor, StopSignal::new(), |tx| drop(tx), &record);

        // Assert
        assert!(!correct);
        let text = std::fs::read_to_string(record.path()).unwrap();
        assert!(text.contains("[Exit]exited for an unknown reason;"));
    }

    #[test]
    fn first_event_wins() {
        let dir = tempfile::tempdir().unwrap();
        let (_, monitor, record) = setup(&dir);

        let correct = run(
            monitor,
            StopSignal::new(),
            |tx| {
                let _ = tx.send(PanelEvent::Closed {
                    password_correct: false,
                });
                let _ = tx.send(PanelEvent::Closed {
                    password_correct: true,
                });
            },
            &record,
        );

        assert!(!correct);
    }

    #[test]
    fn panel_thread_is_joined_after_it_reports_closed() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let (_, monitor, record) = setup(&dir);
        let cleaned_up = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cleaned_up);

        // Act
        let correct = run(
            monitor,
            StopSignal::new(),
            move |tx| {
                let _ = tx.send(PanelEvent::Closed {
                    password_correct: true,
                });
                std::thread::sleep(Duration::from_millis(50));
                flag.store(true, Ordering::SeqCst);
            },
            &record,
        );

        // Assert
        assert!(correct);
        assert!(cleaned_up.load(Ordering::SeqCst));
    }

    #[test]
    fn interruption_does_not_wait_for_a_blocked_panel() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let (_, monitor, record) = setup(&dir);
        let (release_tx, release_rx) = mpsc::channel::<()>();

        // Act
        let correct = run(
            monitor,
            StopSignal::new(),
            move |tx| {
                let _ = tx.send(PanelEvent::Interrupted);
                // Stands in for a panel stuck reading input.
                let _ = release_rx.recv();
            },
            &record,
        );

        // Assert
        assert!(!correct);
        let text = std::fs::read_to_string(record.path()).unwrap();
        assert!(text.contains("[Exit]exited for an unknown reason;"));
        drop(release_tx);
    }
}
