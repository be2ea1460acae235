// SessionCollector - step-on / step-off state machine
//
// A session waits for the first total at or above the threshold, then keeps
// every total until the user steps off (a total below the threshold) or the
// sample target is reached. Both endings are normal completions.

use serde::{Deserialize, Serialize};

/// How a session completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEnd {
    SteppedOff,
    TargetReached,
}

/// Current phase of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    WaitingForStepOn,
    Collecting,
    Done(SessionEnd),
}

/// Notifications emitted to the caller as the session progresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    /// First accepted sample; emitted once per session
    MeasurementStarted,
    SteppedOff,
    TargetReached,
}

/// Outcome of offering one sample total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStep {
    /// Total was appended to the collected list
    pub accepted: bool,
    /// This offer moved the session out of `WaitingForStepOn`
    pub started: bool,
    /// This offer completed the session
    pub finished: Option<SessionEnd>,
}

impl SessionStep {
    /// Notifications for this step, in emission order
    pub fn events(&self) -> impl Iterator<Item = SessionEvent> {
        let started = self.started.then_some(SessionEvent::MeasurementStarted);
        let finished = self.finished.map(|end| match end {
            SessionEnd::SteppedOff => SessionEvent::SteppedOff,
            SessionEnd::TargetReached => SessionEvent::TargetReached,
        });
        started.into_iter().chain(finished)
    }
}

/// Collects validated sample totals for one measurement session
pub struct SessionCollector {
    threshold: f64,
    target: usize,
    collected: Vec<f64>,
    phase: SessionPhase,
}

impl SessionCollector {
    /// Create a collector
    ///
    /// # Arguments
    /// * `threshold` - Minimum total (kg) that counts as someone standing on the board
    /// * `target` - Number of samples after which the session ends on its own
    pub fn new(threshold: f64, target: usize) -> Self {
        Self {
            threshold,
            target,
            collected: Vec::with_capacity(target),
            phase: SessionPhase::WaitingForStepOn,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_started(&self) -> bool {
        self.phase != SessionPhase::WaitingForStepOn
    }

    pub fn is_done(&self) -> bool {
        matches!(self.phase, SessionPhase::Done(_))
    }

    pub fn collected(&self) -> &[f64] {
        &self.collected
    }

    /// Offer one sample total to the state machine.
    ///
    /// Offers after the session is done are ignored.
    pub fn offer(&mut self, total: f64) -> SessionStep {
        let above = total >= self.threshold;

        match self.phase {
            SessionPhase::WaitingForStepOn if !above => SessionStep::default(),
            SessionPhase::WaitingForStepOn => {
                tracing::info!("[SessionCollector] Measurement started at {:.2} kg", total);
                let mut step = self.accept(total);
                step.started = true;
                step
            }
            SessionPhase::Collecting if !above => {
                tracing::info!(
                    "[SessionCollector] User stepped off after {} samples",
                    self.collected.len()
                );
                self.phase = SessionPhase::Done(SessionEnd::SteppedOff);
                SessionStep {
                    finished: Some(SessionEnd::SteppedOff),
                    ..SessionStep::default()
                }
            }
            SessionPhase::Collecting => self.accept(total),
            SessionPhase::Done(_) => SessionStep::default(),
        }
    }

    fn accept(&mut self, total: f64) -> SessionStep {
        self.collected.push(total);
        let mut step = SessionStep {
            accepted: true,
            ..SessionStep::default()
        };

        if self.collected.len() >= self.target {
            tracing::info!("[SessionCollector] Sample target of {} reached", self.target);
            self.phase = SessionPhase::Done(SessionEnd::TargetReached);
            step.finished = Some(SessionEnd::TargetReached);
        } else {
            self.phase = SessionPhase::Collecting;
        }
        step
    }

    /// Consume the collector, returning the collected totals
    pub fn into_collected(self) -> Vec<f64> {
        self.collected
    }
}
