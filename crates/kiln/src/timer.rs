//! Frame pacing and performance measurement.

use std::{
    cell::Cell,
    fmt::{self, Arguments},
    mem,
    sync::Mutex,
    thread,
    time::{Duration, Instant},
};

const EMA_ALPHA: f32 = 0.3;

/// A timer that can measure and average the time an operation takes.
///
/// Measurements are smoothed with an exponential moving average. Collected timings are reset
/// when the timer is displayed using `{}` ([`std::fmt::Display`]).
pub struct Timer {
    name: &'static str,
    state: Mutex<State>,
}

struct State {
    /// The current average time in seconds, or `None` if nothing was recorded since the last
    /// reset.
    avg: Option<f32>,
    /// The number of time measurements that contributed to the current `avg`.
    count: usize,
}

impl Timer {
    /// Creates a new timer.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Mutex::new(State {
                avg: None,
                count: 0,
            }),
        }
    }

    /// Invokes a closure, measuring and recording the time it takes.
    pub fn time<T>(&self, timee: impl FnOnce() -> T) -> T {
        let _guard = self.start();
        timee()
    }

    /// Starts timing an operation using a drop guard.
    ///
    /// When the returned [`TimerGuard`] is dropped, the time between the call to `start` and the
    /// drop is measured and recorded.
    pub fn start(&self) -> TimerGuard<'_> {
        TimerGuard {
            start: Instant::now(),
            timer: self,
        }
    }

    fn stop(&self, start: Instant) {
        self.record(start.elapsed());
    }

    fn record(&self, duration: Duration) {
        let secs = duration.as_secs_f32();
        let mut state = self.state.lock().unwrap();
        state.avg = Some(match state.avg {
            Some(last) => EMA_ALPHA * secs + (1.0 - EMA_ALPHA) * last,
            None => secs,
        });
        state.count += 1;
    }
}

/// Displays the average recorded time and resets it.
impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut state = self.state.lock().unwrap();

        let avg = state.avg.take().unwrap_or(0.0);
        let len = mem::replace(&mut state.count, 0);
        let avg_ms = avg * 1000.0;

        write!(f, "{}: {len}x{avg_ms:.01}ms", self.name)
    }
}

/// Cloning a timer resets its collected timings.
impl Clone for Timer {
    fn clone(&self) -> Self {
        Self::new(self.name)
    }
}

/// Guard returned by [`Timer::start`]. Stops timing the operation when dropped.
pub struct TimerGuard<'a> {
    start: Instant,
    timer: &'a Timer,
}

impl Drop for TimerGuard<'_> {
    fn drop(&mut self) {
        self.timer.stop(self.start);
    }
}

/// Logs ticks per second with optional extra data.
pub struct FpsCounter {
    name: String,
    frames: u32,
    start: Instant,
}

impl FpsCounter {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            frames: 0,
            start: Instant::now(),
        }
    }

    /// Advances the frame counter by 1 and logs FPS if one second has passed.
    pub fn tick(&mut self) {
        self.tick_impl(format_args!(""));
    }

    /// Advances the frame counter by 1 and logs FPS and `extra` data if one second has passed.
    ///
    /// `extra` is typically a list of [`Timer`]s, which are reset by being displayed.
    pub fn tick_with<D: fmt::Display, I: IntoIterator<Item = D>>(&mut self, extra: I) {
        struct DisplayExtra<D: fmt::Display, I: Iterator<Item = D>>(Cell<Option<I>>);

        impl<D: fmt::Display, I: Iterator<Item = D>> fmt::Display for DisplayExtra<D, I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let Some(mut iter) = self.0.take() else {
                    return Ok(());
                };
                match iter.next() {
                    Some(item) => {
                        write!(f, " ({item}")?;
                        for item in iter {
                            write!(f, ", {item}")?;
                        }
                        f.write_str(")")
                    }
                    None => Ok(()),
                }
            }
        }

        self.tick_impl(format_args!(
            "{}",
            DisplayExtra(Cell::new(Some(extra.into_iter())))
        ));
    }

    fn tick_impl(&mut self, args: Arguments<'_>) {
        self.frames += 1;
        if self.start.elapsed() > Duration::from_secs(1) {
            log::debug!("{}: {} FPS{}", self.name, self.frames, args);

            self.frames = 0;
            self.start = Instant::now();
        }
    }
}

/// Fixed-interval scheduler.
///
/// Each call to [`Ticker::wait`] blocks until the next deadline. Deadlines are spaced by the
/// interval, so time spent between calls does not accumulate as drift. A caller that falls behind
/// by more than a full interval does not get a burst of immediate ticks; the schedule restarts
/// from the current time instead.
pub struct Ticker {
    interval: Duration,
    next: Instant,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: Instant::now() + interval,
        }
    }

    /// Sleeps until the next tick is due.
    ///
    /// Returns `false` if the deadline had already passed, meaning the caller is running late.
    pub fn wait(&mut self) -> bool {
        let now = Instant::now();
        if now < self.next {
            thread::sleep(self.next - now);
            self.next += self.interval;
            true
        } else {
            log::trace!(
                "tick is late by {:?}, rescheduling",
                now.duration_since(self.next)
            );
            self.next = now + self.interval;
            false
        }
    }
}
