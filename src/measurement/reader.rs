// SampleReader - pulls raw events from a source until a full frame is ready

use serde::{Deserialize, Serialize};

use crate::device::EventSource;
use crate::error::MeasurementError;
use crate::measurement::assembler::{PartialSample, Sample};
use crate::measurement::event::{classify, EventClass};

/// Diagnostic counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStats {
    /// Frames that produced a sample
    pub complete_frames: u64,
    /// Frames closed before all four corners reported
    pub discarded_frames: u64,
    /// Dropped-sync and ambiguous report events
    pub ignored_events: u64,
    pub unrecognized_events: u64,
}

/// Reads complete samples from a blocking event source.
pub struct SampleReader<'a, S: EventSource + ?Sized> {
    source: &'a mut S,
    buffer: PartialSample,
    stats: FrameStats,
}

impl<'a, S: EventSource + ?Sized> SampleReader<'a, S> {
    pub fn new(source: &'a mut S) -> Self {
        Self {
            source,
            buffer: PartialSample::new(),
            stats: FrameStats::default(),
        }
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Block until the next complete sample.
    ///
    /// Incomplete frames, ignorable syncs and unrecognized events are absorbed
    /// here. Returns `MeasurementError::Aborted` as soon as the board button
    /// is seen; nothing further is read after that.
    pub fn next_sample(&mut self) -> Result<Sample, MeasurementError> {
        loop {
            let event = self.source.next_event()?;

            match classify(&event) {
                EventClass::Corner(corner, kg) => self.buffer.set(corner, kg),
                EventClass::EndOfSample => {
                    if !self.buffer.is_complete() {
                        tracing::debug!(
                            "[SampleReader] Discarding incomplete frame, missing {:?}",
                            self.buffer.missing().collect::<Vec<_>>()
                        );
                    }
                    match self.buffer.finish_frame() {
                        Some(sample) => {
                            self.stats.complete_frames += 1;
                            return Ok(sample);
                        }
                        None => self.stats.discarded_frames += 1,
                    }
                }
                EventClass::Abort => {
                    tracing::warn!("[SampleReader] Board button pressed, aborting session");
                    return Err(MeasurementError::Aborted);
                }
                EventClass::Ignored(reason) => {
                    self.stats.ignored_events += 1;
                    tracing::trace!("[SampleReader] Ignoring {:?}", reason);
                }
                EventClass::Unrecognized => {
                    self.stats.unrecognized_events += 1;
                    tracing::debug!("[SampleReader] Got unexpected event: {:?}", event);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::ReplaySource;
    use crate::error::DeviceError;
    use crate::measurement::event::{Channel, Corner, RawEvent};

    fn frame(values: [i32; 4]) -> Vec<RawEvent> {
        let mut events: Vec<RawEvent> = Corner::ALL
            .into_iter()
            .zip(values)
            .map(|(corner, value)| RawEvent::sensor(corner, value))
            .collect();
        events.push(RawEvent::end_of_sample());
        events
    }

    #[test]
    fn test_reads_complete_frame() {
        let mut source = ReplaySource::from_events(frame([1000, 2000, 3000, 4000]));
        let mut reader = SampleReader::new(&mut source);

        let sample = reader.next_sample().unwrap();
        assert_eq!(sample.total(), 100.0);
        assert_eq!(reader.stats().complete_frames, 1);
    }

    #[test]
    fn test_skips_partial_frame_then_reads_next() {
        let mut events = vec![
            RawEvent::sensor(Corner::TopLeft, 9900),
            RawEvent::sensor(Corner::TopRight, 9900),
            RawEvent::end_of_sample(),
        ];
        events.extend(frame([500, 500, 500, 500]));

        let mut source = ReplaySource::from_events(events);
        let mut reader = SampleReader::new(&mut source);

        let sample = reader.next_sample().unwrap();
        assert_eq!(sample.total(), 20.0);
        assert_eq!(reader.stats().discarded_frames, 1);
        assert_eq!(reader.stats().complete_frames, 1);
    }

    #[test]
    fn test_noise_events_absorbed() {
        let mut events = vec![
            RawEvent::new(Channel::SyncDropped, 0),
            RawEvent::new(Channel::Report, 3),
            RawEvent::new(Channel::Unknown { kind: 4, code: 4 }, 1),
        ];
        events.extend(frame([100, 100, 100, 100]));

        let mut source = ReplaySource::from_events(events);
        let mut reader = SampleReader::new(&mut source);

        assert_eq!(reader.next_sample().unwrap().total(), 4.0);
        let stats = reader.stats();
        assert_eq!(stats.ignored_events, 2);
        assert_eq!(stats.unrecognized_events, 1);
    }

    #[test]
    fn test_ambiguous_report_does_not_close_frame() {
        let events = vec![
            RawEvent::sensor(Corner::TopLeft, 100),
            RawEvent::sensor(Corner::TopRight, 100),
            RawEvent::new(Channel::Report, 3),
            RawEvent::sensor(Corner::BottomLeft, 100),
            RawEvent::sensor(Corner::BottomRight, 100),
            RawEvent::end_of_sample(),
        ];

        let mut source = ReplaySource::from_events(events);
        let mut reader = SampleReader::new(&mut source);

        assert_eq!(reader.next_sample().unwrap().total(), 4.0);
        assert_eq!(reader.stats().discarded_frames, 0);
    }

    #[test]
    fn test_button_aborts() {
        let mut events = vec![RawEvent::sensor(Corner::TopLeft, 100), RawEvent::button(1)];
        events.extend(frame([100, 100, 100, 100]));

        let mut source = ReplaySource::from_events(events);
        let mut reader = SampleReader::new(&mut source);

        assert_eq!(reader.next_sample(), Err(MeasurementError::Aborted));
    }

    #[test]
    fn test_source_exhaustion_surfaces_as_device_error() {
        let mut source = ReplaySource::from_events(vec![RawEvent::sensor(Corner::TopLeft, 1)]);
        let mut reader = SampleReader::new(&mut source);

        assert_eq!(
            reader.next_sample(),
            Err(MeasurementError::from(DeviceError::StreamEnded))
        );
    }
}
