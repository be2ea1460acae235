use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::device::EventSource;
use crate::error::DeviceError;
use crate::measurement::{Channel, Corner, RawEvent, UNITS_PER_KG};

// Uneven stance so per-corner values differ
const CORNER_SHARE: [f64; 4] = [0.27, 0.23, 0.26, 0.24];
const CORNER_JITTER_KG: f64 = 0.15;
const IDLE_NOISE_KG: f64 = 0.4;
const DROP_CORNER_EVERY: usize = 7;
const NOISE_EVENT_PROBABILITY: f64 = 0.05;

/// Shape of a simulated weighing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationProfile {
    pub weight_kg: f64,
    /// Empty-board frames before the user steps on
    pub idle_frames: usize,
    /// Frames with the user standing on the board
    pub loaded_frames: usize,
    /// Empty-board frames after the user steps off, before the stream ends
    pub trailing_frames: usize,
    pub seed: u64,
}

impl SimulationProfile {
    pub fn new(weight_kg: f64) -> Self {
        Self {
            weight_kg,
            idle_frames: 25,
            loaded_frames: 120,
            trailing_frames: 25,
            seed: 0x5eed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Idle,
    Loaded,
    SteppedOff,
    Exhausted,
}

/// Deterministic stand-in for a physical board.
///
/// Produces idle noise, then `loaded_frames` frames around the profile
/// weight, then `trailing_frames` empty-board frames. After that it returns
/// [`DeviceError::StreamEnded`] like an exhausted replay, so a profile that
/// never crosses the threshold still terminates. Some loaded frames miss a corner
/// and a few ignorable sync events are mixed in, so a session against it
/// exercises the same paths as real hardware.
pub struct SimulatedBoard {
    profile: SimulationProfile,
    rng: StdRng,
    pending: VecDeque<RawEvent>,
    frame: usize,
    closed: bool,
}

impl SimulatedBoard {
    pub fn new(profile: SimulationProfile) -> Self {
        Self {
            rng: StdRng::seed_from_u64(profile.seed),
            profile,
            pending: VecDeque::new(),
            frame: 0,
            closed: false,
        }
    }

    fn stage(&self) -> Stage {
        let loaded_end = self.profile.idle_frames + self.profile.loaded_frames;
        if self.frame < self.profile.idle_frames {
            Stage::Idle
        } else if self.frame < loaded_end {
            Stage::Loaded
        } else if self.frame < loaded_end + self.profile.trailing_frames {
            Stage::SteppedOff
        } else {
            Stage::Exhausted
        }
    }

    fn queue_frame(&mut self) {
        let stage = self.stage();
        if stage == Stage::Exhausted {
            return;
        }
        let loaded_index = self.frame.saturating_sub(self.profile.idle_frames);
        let dropped = match stage {
            Stage::Loaded if loaded_index % DROP_CORNER_EVERY == DROP_CORNER_EVERY - 1 => {
                Some(Corner::ALL[self.rng.gen_range(0..4)])
            }
            _ => None,
        };

        for (corner, share) in Corner::ALL.into_iter().zip(CORNER_SHARE) {
            if Some(corner) == dropped {
                continue;
            }
            let kg = match stage {
                Stage::Loaded => {
                    self.profile.weight_kg * share
                        + self.rng.gen_range(-CORNER_JITTER_KG..CORNER_JITTER_KG)
                }
                Stage::Idle | Stage::SteppedOff | Stage::Exhausted => {
                    self.rng.gen_range(0.0..IDLE_NOISE_KG)
                }
            };
            self.pending
                .push_back(RawEvent::sensor(corner, (kg * UNITS_PER_KG).round() as i32));
        }

        if self.rng.gen_bool(NOISE_EVENT_PROBABILITY) {
            let noise = if self.rng.gen_bool(0.5) {
                RawEvent::new(Channel::Report, 3)
            } else {
                RawEvent::new(Channel::SyncDropped, 0)
            };
            self.pending.push_back(noise);
        }

        self.pending.push_back(RawEvent::end_of_sample());
        self.frame += 1;
    }
}

impl EventSource for SimulatedBoard {
    fn next_event(&mut self) -> Result<RawEvent, DeviceError> {
        if self.closed {
            return Err(DeviceError::StreamEnded);
        }
        if self.pending.is_empty() {
            self.queue_frame();
        }
        self.pending.pop_front().ok_or(DeviceError::StreamEnded)
    }

    fn close(&mut self) -> Result<(), DeviceError> {
        self.closed = true;
        self.pending.clear();
        Ok(())
    }
}
