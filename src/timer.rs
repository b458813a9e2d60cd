//! Pomodoro-style focus timer.
//!
//! The timer is a plain state machine driven by one `tick()` per elapsed
//! second; it never reads the clock itself. See `ticker` for the tick source.

/// Ticks spent on a finished phase before the next one starts
pub const GRACE_TICKS: u32 = 2;

/// Interval lengths in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    pub work_minutes: u32,
    pub break_minutes: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            break_minutes: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    Break,
}

impl TimerConfig {
    /// Interval length in seconds, saturating for out-of-range minutes
    pub fn phase_secs(&self, phase: Phase) -> u32 {
        let minutes = match phase {
            Phase::Work => self.work_minutes,
            Phase::Break => self.break_minutes,
        };
        minutes.saturating_mul(60)
    }
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => "Focus",
            Phase::Break => "Break",
        }
    }

    fn other(&self) -> Self {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }
}

/// What happened on a tick, for the caller to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The countdown reached zero; carries the phase that ended
    PhaseComplete(Phase),
    /// The grace delay passed and the next phase began
    PhaseStarted(Phase),
}

#[derive(Debug, Clone)]
pub struct FocusTimer {
    config: TimerConfig,
    remaining_secs: u32,
    phase: Phase,
    running: bool,
    completed_cycles: u32,
    /// Ticks left before switching phase, while a finished phase waits
    advance_in: Option<u32>,
    /// Whether the next phase starts running by itself
    resume_after_advance: bool,
}

impl FocusTimer {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            remaining_secs: config.phase_secs(Phase::Work),
            phase: Phase::Work,
            running: false,
            completed_cycles: 0,
            advance_in: None,
            resume_after_advance: false,
        }
    }

    pub fn config(&self) -> TimerConfig {
        self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    /// True while a finished phase waits out the grace delay
    pub fn is_advancing(&self) -> bool {
        self.advance_in.is_some()
    }

    fn phase_secs(&self, phase: Phase) -> u32 {
        self.config.phase_secs(phase)
    }

    pub fn start(&mut self) {
        if self.running || self.advance_in.is_some() || self.remaining_secs == 0 {
            return;
        }
        self.running = true;
    }

    /// Pausing during the grace delay keeps the phase switch but stops the
    /// next phase from starting by itself. The web client this replaces
    /// always resumed after the delay; here a pause is always honored.
    pub fn pause(&mut self) {
        self.running = false;
        self.resume_after_advance = false;
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.phase = Phase::Work;
        self.remaining_secs = self.phase_secs(Phase::Work);
        self.completed_cycles = 0;
        self.advance_in = None;
        self.resume_after_advance = false;
    }

    /// Advance by one second
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if let Some(left) = self.advance_in {
            if left > 1 {
                self.advance_in = Some(left - 1);
                return None;
            }
            return Some(self.advance());
        }

        if !self.running {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }

        self.running = false;
        self.advance_in = Some(GRACE_TICKS);
        self.resume_after_advance = true;
        Some(TimerEvent::PhaseComplete(self.phase))
    }

    fn advance(&mut self) -> TimerEvent {
        if self.phase == Phase::Break {
            self.completed_cycles += 1;
        }
        self.phase = self.phase.other();
        self.remaining_secs = self.phase_secs(self.phase);
        self.advance_in = None;
        self.running = self.resume_after_advance;
        self.resume_after_advance = false;
        TimerEvent::PhaseStarted(self.phase)
    }

    /// Fraction of the current phase already elapsed, 0.0..=1.0
    pub fn progress(&self) -> f64 {
        let total = self.phase_secs(self.phase);
        if total == 0 {
            return 0.0;
        }
        f64::from(total - self.remaining_secs.min(total)) / f64::from(total)
    }

    /// Remaining time as MM:SS
    pub fn formatted(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }
}
