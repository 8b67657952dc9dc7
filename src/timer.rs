use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// The interval between timer ticks (60 Hz)
const TICK_INTERVAL: Duration = Duration::from_micros(1_000_000 / 60);

/// The delay and sound timer registers, decremented together at 60 Hz by a [TimerClock].
///
/// These are the only pieces of state shared across threads; the instruction set reads
/// and writes them under the same mutex the clock thread ticks them under.
#[derive(Debug, Default)]
pub(crate) struct Timers {
    /// The delay timer, readable and writable by programs
    pub(crate) delay: u8,
    /// The sound timer; a tone should sound while this is non-zero
    pub(crate) sound: u8,
}

impl Timers {
    pub(crate) fn new() -> Self {
        Timers { delay: 0x0, sound: 0x0 }
    }

    /// Decrements both timers by one, saturating at zero.
    pub(crate) fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(0x1);
        self.sound = self.sound.saturating_sub(0x1);
    }
}

/// A background thread that ticks a shared [Timers] instance at 60 Hz.
///
/// The thread runs until [stop()](TimerClock::stop) is called (or the clock is dropped),
/// at which point it is signalled and joined, so timer activity never outlives the
/// processor that started it.
#[derive(Debug)]
pub(crate) struct TimerClock {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl TimerClock {
    /// Spawns the clock thread against the supplied shared timer state.
    pub(crate) fn start(timers: Arc<Mutex<Timers>>) -> Self {
        let running: Arc<AtomicBool> = Arc::new(AtomicBool::new(true));
        let running_flag: Arc<AtomicBool> = Arc::clone(&running);
        let handle: JoinHandle<()> = thread::spawn(move || {
            debug!("timer clock thread started");
            // Sleep until each successive tick boundary rather than for a fixed interval
            // after waking, so the tick rate does not drift with scheduling latency
            let mut next_tick: Instant = Instant::now() + TICK_INTERVAL;
            while running_flag.load(Ordering::Relaxed) {
                let now: Instant = Instant::now();
                if now < next_tick {
                    thread::sleep(next_tick - now);
                }
                next_tick += TICK_INTERVAL;
                match timers.lock() {
                    Ok(mut timers) => timers.tick(),
                    // The owning thread panicked while holding the lock; nothing left to tick
                    Err(_) => break,
                }
            }
            debug!("timer clock thread stopped");
        });
        TimerClock {
            running,
            handle: Some(handle),
        }
    }

    /// Signals the clock thread to finish and blocks until it has.  Idempotent.
    pub(crate) fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for TimerClock {
    fn drop(&mut self) {
        self.stop();
    }
}
