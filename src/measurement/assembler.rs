// Sample assembly - folds per-corner updates into complete frames
//
// Corner channels report independently, and a frame may close before every
// sensor has reported. Only frames where all four corners are present leave
// this module; anything partial is dropped at the frame boundary.

use serde::{Deserialize, Serialize};

use crate::measurement::event::Corner;

/// One complete four-corner reading in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    corners: [f64; 4],
}

impl Sample {
    pub fn corner(&self, corner: Corner) -> f64 {
        self.corners[corner.index()]
    }

    /// Total weight on the board (sum of the corners, not the mean)
    pub fn total(&self) -> f64 {
        self.corners.iter().sum()
    }
}

/// Frame buffer holding the latest value per corner.
#[derive(Debug, Clone, Default)]
pub struct PartialSample {
    slots: [Option<f64>; 4],
}

impl PartialSample {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a corner update. The last write wins.
    pub fn set(&mut self, corner: Corner, kg: f64) {
        self.slots[corner.index()] = Some(kg);
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn missing(&self) -> impl Iterator<Item = Corner> + '_ {
        Corner::ALL
            .into_iter()
            .filter(move |corner| self.slots[corner.index()].is_none())
    }

    /// Close the current frame.
    ///
    /// Returns the sample when every corner has reported. The buffer is reset
    /// in both cases so the next frame starts clean.
    pub fn finish_frame(&mut self) -> Option<Sample> {
        let slots = std::mem::take(&mut self.slots);
        match slots {
            [Some(tl), Some(tr), Some(bl), Some(br)] => Some(Sample {
                corners: [tl, tr, bl, br],
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(buffer: &mut PartialSample, values: [f64; 4]) {
        for (corner, value) in Corner::ALL.into_iter().zip(values) {
            buffer.set(corner, value);
        }
    }

    #[test]
    fn test_complete_frame_emits_sum() {
        let mut buffer = PartialSample::new();
        fill(&mut buffer, [20.0, 21.5, 19.0, 22.5]);

        let sample = buffer.finish_frame().expect("complete frame");
        assert_eq!(sample.total(), 83.0);
        assert_eq!(sample.corner(Corner::TopRight), 21.5);
    }

    #[test]
    fn test_last_write_wins() {
        let mut buffer = PartialSample::new();
        fill(&mut buffer, [1.0, 1.0, 1.0, 1.0]);
        buffer.set(Corner::TopLeft, 5.0);

        let sample = buffer.finish_frame().unwrap();
        assert_eq!(sample.corner(Corner::TopLeft), 5.0);
        assert_eq!(sample.total(), 8.0);
    }

    #[test]
    fn test_incomplete_frame_discarded_and_reset() {
        let mut buffer = PartialSample::new();
        buffer.set(Corner::TopLeft, 10.0);
        buffer.set(Corner::TopRight, 10.0);
        buffer.set(Corner::BottomLeft, 10.0);

        assert!(!buffer.is_complete());
        assert_eq!(buffer.missing().collect::<Vec<_>>(), vec![Corner::BottomRight]);
        assert!(buffer.finish_frame().is_none());

        // Values from the discarded frame must not leak into the next one
        buffer.set(Corner::BottomRight, 10.0);
        assert!(buffer.finish_frame().is_none());
    }

    #[test]
    fn test_reset_after_emit() {
        let mut buffer = PartialSample::new();
        fill(&mut buffer, [1.0, 2.0, 3.0, 4.0]);
        assert!(buffer.finish_frame().is_some());
        assert!(!buffer.is_complete());
        assert!(buffer.finish_frame().is_none());
    }
}
