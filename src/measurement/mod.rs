// Measurement module - sensor fusion pipeline for one weighing session
//
// Pipeline: EventSource → classify → PartialSample → SessionCollector → median
//
// The reader turns raw corner events into complete samples, the collector
// applies the step-on / step-off rules, and the estimator reduces the kept
// totals to one weight. Nothing here prints or exits the process; progress
// is reported through `SessionEvent` callbacks and failures are returned.

pub mod assembler;
pub mod estimator;
pub mod event;
pub mod reader;
pub mod session;

use serde::{Deserialize, Serialize};

use crate::device::EventSource;
use crate::error::MeasurementError;

pub use assembler::{PartialSample, Sample};
pub use estimator::{estimate, median, Estimate};
pub use event::{classify, Channel, Corner, EventClass, IgnoreReason, RawEvent, UNITS_PER_KG};
pub use reader::{FrameStats, SampleReader};
pub use session::{SessionCollector, SessionEnd, SessionEvent, SessionPhase, SessionStep};

/// Default minimum total weight (kg) for someone standing on the board
pub const DEFAULT_THRESHOLD_KG: f64 = 20.0;

/// Default number of samples after which a session ends on its own
pub const DEFAULT_SAMPLE_TARGET: usize = 200;

/// Parameters for one measurement session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSettings {
    /// Offset added to the median (kg, may be negative)
    pub adjust: f64,
    /// Step-on / step-off threshold (kg)
    pub threshold: f64,
    /// Maximum number of samples kept
    pub target: usize,
}

impl Default for MeasurementSettings {
    fn default() -> Self {
        Self {
            adjust: 0.0,
            threshold: DEFAULT_THRESHOLD_KG,
            target: DEFAULT_SAMPLE_TARGET,
        }
    }
}

impl MeasurementSettings {
    pub fn validate(&self) -> Result<(), MeasurementError> {
        if self.target == 0 {
            return Err(MeasurementError::InvalidTarget {
                target: self.target,
            });
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(MeasurementError::InvalidThreshold {
                threshold: self.threshold,
            });
        }
        if !self.adjust.is_finite() {
            return Err(MeasurementError::InvalidAdjust {
                adjust: self.adjust,
            });
        }
        Ok(())
    }
}

/// Outcome of a completed session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    /// Accepted sample totals in arrival order
    pub raw_samples: Vec<f64>,
    pub median: f64,
    /// `median + adjust`
    pub adjusted: f64,
    pub end: SessionEnd,
    pub stats: FrameStats,
}

/// Run one measurement session against `source`.
///
/// Blocks until the user steps off or the sample target is reached.
/// Invalid settings are rejected before the source is touched; it is neither
/// read nor closed. Once reading starts the source is closed exactly once
/// before returning, on success and on every error path. A close failure is
/// logged and does not replace the session outcome.
///
/// # Errors
/// * `MeasurementError::InvalidTarget` / `InvalidThreshold` / `InvalidAdjust` -
///   rejected before any read
/// * `MeasurementError::Aborted` - board button pressed mid-session
/// * `MeasurementError::Device` - the source failed
pub fn measure_weight<S, F>(
    source: &mut S,
    settings: &MeasurementSettings,
    mut on_event: F,
) -> Result<MeasurementResult, MeasurementError>
where
    S: EventSource + ?Sized,
    F: FnMut(SessionEvent),
{
    settings.validate()?;

    let outcome = {
        let mut reader = SampleReader::new(source);
        collect_session(&mut reader, settings, &mut on_event).map(|(collected, end)| {
            (collected, end, reader.stats())
        })
    };

    if let Err(err) = source.close() {
        tracing::warn!("[measure_weight] Failed to close event source: {}", err);
    }

    let (collected, end, stats) = outcome?;
    let Estimate { median, adjusted } = estimate(&collected, settings.adjust)?;

    tracing::info!(
        "[measure_weight] {} samples, median {:.2} kg, adjusted {:.2} kg ({:?})",
        collected.len(),
        median,
        adjusted,
        end
    );

    Ok(MeasurementResult {
        raw_samples: collected,
        median,
        adjusted,
        end,
        stats,
    })
}

fn collect_session<S, F>(
    reader: &mut SampleReader<'_, S>,
    settings: &MeasurementSettings,
    on_event: &mut F,
) -> Result<(Vec<f64>, SessionEnd), MeasurementError>
where
    S: EventSource + ?Sized,
    F: FnMut(SessionEvent),
{
    let mut collector = SessionCollector::new(settings.threshold, settings.target);

    loop {
        let sample = reader.next_sample()?;
        let step = collector.offer(sample.total());
        step.events().for_each(&mut *on_event);

        if let SessionPhase::Done(end) = collector.phase() {
            return Ok((collector.into_collected(), end));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::ReplaySource;

    fn frame_of_total(kg: i32) -> Vec<RawEvent> {
        // Spread evenly in raw units (kg * 100 / 4 per corner)
        let per_corner = kg * 25;
        let mut events: Vec<RawEvent> = Corner::ALL
            .into_iter()
            .map(|corner| RawEvent::sensor(corner, per_corner))
            .collect();
        events.push(RawEvent::end_of_sample());
        events
    }

    fn frames(totals: &[i32]) -> Vec<RawEvent> {
        totals.iter().flat_map(|&kg| frame_of_total(kg)).collect()
    }

    #[test]
    fn test_default_settings() {
        let settings = MeasurementSettings::default();
        assert_eq!(settings.threshold, 20.0);
        assert_eq!(settings.target, 200);
        assert_eq!(settings.adjust, 0.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let zero_target = MeasurementSettings {
            target: 0,
            ..MeasurementSettings::default()
        };
        assert_eq!(
            zero_target.validate(),
            Err(MeasurementError::InvalidTarget { target: 0 })
        );

        let nan_threshold = MeasurementSettings {
            threshold: f64::NAN,
            ..MeasurementSettings::default()
        };
        assert!(matches!(
            nan_threshold.validate(),
            Err(MeasurementError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn test_non_finite_adjust_rejected() {
        for adjust in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let settings = MeasurementSettings {
                adjust,
                ..MeasurementSettings::default()
            };
            assert!(matches!(
                settings.validate(),
                Err(MeasurementError::InvalidAdjust { .. })
            ));
        }

        let negative = MeasurementSettings {
            adjust: -2.5,
            ..MeasurementSettings::default()
        };
        assert!(negative.validate().is_ok());
    }

    #[test]
    fn test_nan_adjust_leaves_source_untouched() {
        let mut source = ReplaySource::from_events(frames(&[80, 0]));
        let settings = MeasurementSettings {
            adjust: f64::NAN,
            ..MeasurementSettings::default()
        };

        assert!(matches!(
            measure_weight(&mut source, &settings, |_| {}),
            Err(MeasurementError::InvalidAdjust { .. })
        ));
        assert_eq!(source.remaining(), 10);
        assert!(!source.is_closed());
    }

    #[test]
    fn test_invalid_settings_do_not_read() {
        let mut source = ReplaySource::from_events(frames(&[80]));
        let settings = MeasurementSettings {
            target: 0,
            ..MeasurementSettings::default()
        };

        assert!(measure_weight(&mut source, &settings, |_| {}).is_err());
        assert_eq!(source.remaining(), 5);
        assert!(!source.is_closed());
    }

    #[test]
    fn test_session_result_and_events() {
        let mut source = ReplaySource::from_events(frames(&[5, 8, 40, 44, 42, 2]));
        let mut events = Vec::new();

        let result = measure_weight(
            &mut source,
            &MeasurementSettings {
                adjust: 0.5,
                ..MeasurementSettings::default()
            },
            |event| events.push(event),
        )
        .unwrap();

        assert_eq!(result.raw_samples, vec![40.0, 44.0, 42.0]);
        assert_eq!(result.median, 42.0);
        assert_eq!(result.adjusted, 42.5);
        assert_eq!(result.end, SessionEnd::SteppedOff);
        assert_eq!(result.stats.complete_frames, 6);
        assert_eq!(
            events,
            vec![SessionEvent::MeasurementStarted, SessionEvent::SteppedOff]
        );
        assert!(source.is_closed());
    }

    #[test]
    fn test_abort_closes_source() {
        let mut events = frames(&[60, 61]);
        events.push(RawEvent::button(1));
        events.extend(frames(&[62, 5]));
        let mut source = ReplaySource::from_events(events);

        let result = measure_weight(&mut source, &MeasurementSettings::default(), |_| {});

        assert_eq!(result, Err(MeasurementError::Aborted));
        assert!(source.is_closed());
    }
}
