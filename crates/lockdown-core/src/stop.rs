use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

/// Cooperative, one-way stop flag shared between the panel side and the
/// monitor loop.
///
/// The flag only ever moves from running to stopped. The monitor reads
/// it once per iteration, so shutdown takes at most one poll interval.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the monitor to stop. Idempotent.
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One-shot latch released once the session has written its final
/// record line.
///
/// A console close handler waits on it so the process is not torn down
/// before the `Exit` line reaches disk. Usable as a `static`.
#[derive(Debug, Default)]
pub struct ExitBarrier {
    released: Mutex<bool>,
    cond: Condvar,
}

impl ExitBarrier {
    pub const fn new() -> Self {
        Self {
            released: Mutex::new(false),
            cond: Condvar::new(),
        }
    }

    /// Wakes every waiter, now and later. Idempotent.
    pub fn release(&self) {
        let mut released = self.released.lock().unwrap_or_else(PoisonError::into_inner);
        *released = true;
        self.cond.notify_all();
    }

    /// Blocks until released or `timeout` passes. Returns whether the
    /// barrier was released.
    pub fn wait(&self, timeout: Duration) -> bool {
        let released = self.released.lock().unwrap_or_else(PoisonError::into_inner);
        let (released, _) = self
            .cond
            .wait_timeout_while(released, timeout, |released| !*released)
            .unwrap_or_else(PoisonError::into_inner);
        *released
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Instant;

    use super::*;

    #[test]
    fn clones_observe_the_same_flag() {
        // Arrange
        let signal = StopSignal::new();
        let observer = signal.clone();

        // Act
        signal.stop();

        // Assert
        assert!(observer.is_stopped());
    }

    #[test]
    fn stop_is_idempotent() {
        let signal = StopSignal::new();
        assert!(!signal.is_stopped());

        signal.stop();
        signal.stop();

        assert!(signal.is_stopped());
    }

    #[test]
    fn exit_barrier_wakes_a_blocked_waiter() {
        // Arrange
        let barrier = Arc::new(ExitBarrier::new());
        let waiter = {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || barrier.wait(Duration::from_secs(10)))
        };

        // Act
        thread::sleep(Duration::from_millis(20));
        barrier.release();

        // Assert
        assert!(waiter.join().unwrap());
    }

    #[test]
    fn exit_barrier_released_early_does_not_block() {
        let barrier = ExitBarrier::new();
        barrier.release();

        let start = Instant::now();
        assert!(barrier.wait(Duration::from_secs(10)));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn exit_barrier_wait_gives_up_after_timeout() {
        static BARRIER: ExitBarrier = ExitBarrier::new();

        assert!(!BARRIER.wait(Duration::from_millis(10)));
    }
}
