use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent};

pub enum Event {
    Key(KeyEvent),
    FocusLost,
}

/// Reads terminal events on a background thread and hands them to the
/// game loop, which drains them at the start of every tick.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(poll_interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            if !event::poll(poll_interval).unwrap_or(false) {
                continue;
            }
            let forwarded = match event::read() {
                Ok(crossterm::event::Event::Key(key)) => Some(Event::Key(key)),
                Ok(crossterm::event::Event::FocusLost) => Some(Event::FocusLost),
                _ => None,
            };
            if let Some(ev) = forwarded {
                if tx.send(ev).is_err() {
                    return;
                }
            }
        });

        Self { rx }
    }

    /// Every event received since the last call, without blocking.
    pub fn drain(&self) -> impl Iterator<Item = Event> + '_ {
        self.rx.try_iter()
    }
}

/// Fixed-rate tick scheduler on the monotonic clock.
///
/// The only suspension point of the game loop is `wait`, called once at the
/// end of each tick. A loop that falls behind is re-anchored to now rather
/// than running a burst of catch-up ticks.
pub struct Ticker {
    period: Duration,
    next: Instant,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self::starting_at(period, Instant::now())
    }

    fn starting_at(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next: now + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn wait(&mut self) {
        if let Some(pause) = self.schedule(Instant::now()) {
            thread::sleep(pause);
        }
    }

    /// Book the next deadline and return how long to sleep until the
    /// current one, or `None` if it has already passed.
    fn schedule(&mut self, now: Instant) -> Option<Duration> {
        if now >= self.next {
            self.next = now + self.period;
            None
        } else {
            let pause = self.next - now;
            self.next += self.period;
            Some(pause)
        }
    }
}
