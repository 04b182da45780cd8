//! Cooperative execution state.
//!
//! The interpreter never sleeps. Instead each tick asks the state whether
//! the next statement may run:
//!
//! ```text
//!            pause(d)                        timeout(d, cb)
//! PAUSED ◀─────────── RUNNING ───────────────▶ TIMING_OUT
//!   │  deadline passed   ▲ ▲   deadline passed: cb(ctx)  │
//!   └────────────────────┘ └────────────────────────────┘
//!                          │ ▲
//!                 suspend()│ │resume()
//!                          ▼ │
//!                       SUSPENDED
//! ```

use std::fmt;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::EngineContext;

/// One-shot callback run when a timeout expires.
///
/// Returning `true` skips the stalled statement; `false` runs it again.
pub type TimeoutCallback = Box<dyn FnOnce(&mut EngineContext) -> bool + Send>;

/// Scheduling state of an interpreter.
#[derive(Default)]
pub enum ExecutionState {
    #[default]
    Running,
    Paused {
        until: Instant,
    },
    Suspended,
    TimingOut {
        until: Instant,
        on_expire: Option<TimeoutCallback>,
    },
}

/// What a tick should do, as decided by [`ExecutionState::poll`].
pub enum Gate {
    /// Not due yet, or suspended.
    Wait,
    /// Execute the next statement.
    Run,
    /// A timeout expired; run its callback instead of a statement.
    Expired(Option<TimeoutCallback>),
}

impl ExecutionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Running => "RUNNING",
            Self::Paused { .. } => "PAUSED",
            Self::Suspended => "SUSPENDED",
            Self::TimingOut { .. } => "TIMING_OUT",
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    #[inline]
    pub fn is_suspended(&self) -> bool {
        matches!(self, Self::Suspended)
    }

    /// Pause for `duration`. No-op unless running.
    pub fn pause(&mut self, duration: Duration) -> bool {
        if !self.is_running() {
            return false;
        }
        debug!(?duration, "pause");
        *self = Self::Paused {
            until: Instant::now() + duration,
        };
        true
    }

    /// Start a timeout. No-op unless running.
    pub fn timeout(&mut self, duration: Duration, on_expire: TimeoutCallback) -> bool {
        if !self.is_running() {
            return false;
        }
        debug!(?duration, "timeout");
        *self = Self::TimingOut {
            until: Instant::now() + duration,
            on_expire: Some(on_expire),
        };
        true
    }

    /// Drop a pending timeout, if any.
    pub fn clear_timeout(&mut self) {
        if matches!(self, Self::TimingOut { .. }) {
            *self = Self::Running;
        }
    }

    /// Suspend until [`resume`](Self::resume), discarding any pause or timeout.
    pub fn suspend(&mut self) {
        debug!(from = self.name(), "suspend");
        *self = Self::Suspended;
    }

    /// Leave the suspended state. No-op otherwise.
    pub fn resume(&mut self) {
        if self.is_suspended() {
            debug!("resume");
            *self = Self::Running;
        }
    }

    /// Decide what the tick at `now` does, leaving PAUSED or TIMING_OUT
    /// once their deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Gate {
        match self {
            Self::Running => Gate::Run,
            Self::Suspended => Gate::Wait,
            Self::Paused { until } => {
                if now < *until {
                    return Gate::Wait;
                }
                *self = Self::Running;
                Gate::Run
            }
            Self::TimingOut { until, on_expire } => {
                if now < *until {
                    return Gate::Wait;
                }
                let callback = on_expire.take();
                *self = Self::Running;
                Gate::Expired(callback)
            }
        }
    }
}

impl fmt::Debug for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paused { until } | Self::TimingOut { until, .. } => f
                .debug_struct(self.name())
                .field("until", until)
                .finish(),
            Self::Running | Self::Suspended => f.write_str(self.name()),
        }
    }
}
