// SPDX-License-Identifier: GPL-3.0-only

//! Press-and-hold repetition for repeating keys.
//!
//! A press fires once immediately. After the initial delay a repeating
//! interval starts, so repeat `k` (k ≥ 1) is due at
//! `start + initial_delay + k * interval`. Like an interval timer, a late
//! poll fires once and drops the repeats it missed. Time is passed in explicitly;
//! hosts feed [`ContinuousPress::poll`] from their own timer, or from the
//! [`ticks`] stream when running on tokio.

use std::time::{Duration, Instant};

use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::app_settings::{PRESS_INITIAL_DELAY_MS, PRESS_INTERVAL_MS};

/// Timing and gesture options for repeating keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressOptions {
    /// Delay before the first repeat, in milliseconds.
    pub initial_delay_ms: u64,
    /// Interval between repeats, in milliseconds.
    pub interval_ms: u64,
    /// Whether touch gestures suppress native scrolling and zooming.
    pub prevent_default_on_touch: bool,
}

impl Default for PressOptions {
    fn default() -> Self {
        Self {
            initial_delay_ms: PRESS_INITIAL_DELAY_MS,
            interval_ms: PRESS_INTERVAL_MS,
            prevent_default_on_touch: true,
        }
    }
}

impl PressOptions {
    /// Initial delay as a duration.
    #[must_use]
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    /// Repeat interval as a duration, never shorter than one millisecond.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

/// Pointer and touch gestures on a repeating key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressEvent {
    /// Mouse or pen button pressed.
    PointerDown,
    /// Mouse or pen button released.
    PointerUp,
    /// Pointer left the key while pressed.
    PointerLeave,
    /// Finger touched the key.
    TouchStart,
    /// Finger lifted.
    TouchEnd,
}

/// Result of handling a [`PressEvent`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PressResponse {
    /// How many times the key action must run now.
    pub fires: u32,
    /// Whether the host must suppress the gesture's default action.
    pub prevent_default: bool,
}

/// Press-and-hold session of one key.
///
/// At most one session is active; starting again replaces it.
#[derive(Debug, Clone)]
pub struct ContinuousPress {
    options: PressOptions,
    started_at: Option<Instant>,
    repeats_fired: u32,
}

impl ContinuousPress {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(options: PressOptions) -> Self {
        Self {
            options,
            started_at: None,
            repeats_fired: 0,
        }
    }

    /// Starts a session at `now`, stopping any previous one.
    ///
    /// Returns the number of immediate fires, which is always 1.
    pub fn start(&mut self, now: Instant) -> u32 {
        if self.is_active() {
            tracing::trace!("restarting continuous press");
        }
        self.stop();
        self.started_at = Some(now);
        1
    }

    /// Cancels the session. Safe to call when idle.
    pub fn stop(&mut self) {
        self.started_at = None;
        self.repeats_fired = 0;
    }

    /// Returns `true` while a session is active.
    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    /// Returns 1 if a repeat became due since the last poll, 0 otherwise.
    ///
    /// Missed repeats are coalesced into the one returned.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(started_at) = self.started_at else {
            return 0;
        };

        let repeating_from = started_at + self.options.initial_delay();
        let Some(elapsed) = now.checked_duration_since(repeating_from) else {
            return 0;
        };

        let due = u32::try_from(elapsed.as_nanos() / self.options.interval().as_nanos())
            .unwrap_or(u32::MAX);
        if due <= self.repeats_fired {
            return 0;
        }
        if due > self.repeats_fired.saturating_add(1) {
            tracing::trace!("coalesced {} missed repeats", due - self.repeats_fired - 1);
        }
        self.repeats_fired = due;
        1
    }

    /// When the next repeat is due, if a session is active.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.started_at.map(|started_at| {
            started_at
                + self.options.initial_delay()
                + self.options.interval() * self.repeats_fired.saturating_add(1)
        })
    }

    /// Maps a gesture onto the session.
    pub fn handle(&mut self, event: PressEvent, now: Instant) -> PressResponse {
        match event {
            PressEvent::PointerDown => PressResponse {
                fires: self.start(now),
                prevent_default: true,
            },
            PressEvent::TouchStart => PressResponse {
                fires: self.start(now),
                prevent_default: self.options.prevent_default_on_touch,
            },
            PressEvent::PointerUp | PressEvent::PointerLeave => {
                self.stop();
                PressResponse::default()
            }
            PressEvent::TouchEnd => {
                self.stop();
                PressResponse {
                    fires: 0,
                    prevent_default: self.options.prevent_default_on_touch,
                }
            }
        }
    }
}

impl Default for ContinuousPress {
    fn default() -> Self {
        Self::new(PressOptions::default())
    }
}

/// Yields the current instant every `interval` on the tokio clock.
///
/// Feed each item to [`ContinuousPress::poll`] (or as a `Tick` message).
pub fn ticks(interval: Duration) -> impl Stream<Item = Instant> {
    futures::stream::unfold((), move |()| async move {
        tokio::time::sleep(interval).await;
        Some((tokio::time::Instant::now().into_std(), ()))
    })
}
