//! TrackerPipeline for combining detection with tracking.

use log::warn;

use crate::error::PipelineError;
use crate::tracker::{ObjectTracker, TrackedObject, TrackerConfig};

use super::DetectionSource;

/// Bundles a detector with an [`ObjectTracker`] for one image sequence.
///
/// The tracker's coordinate space is fixed at construction, normally to the
/// size of the first image of the sequence.
pub struct TrackerPipeline<D: DetectionSource> {
    detector: D,
    tracker: ObjectTracker,
}

impl<D: DetectionSource> TrackerPipeline<D> {
    /// Create a new tracking pipeline with the given detector and tracker config.
    pub fn new(
        detector: D,
        width: u32,
        height: u32,
        config: TrackerConfig,
    ) -> Result<Self, PipelineError<D::Error>> {
        Ok(Self {
            detector,
            tracker: ObjectTracker::with_config(width, height, config)?,
        })
    }

    /// Create a new tracking pipeline with default tracker configuration.
    pub fn with_default_config(
        detector: D,
        width: u32,
        height: u32,
    ) -> Result<Self, PipelineError<D::Error>> {
        Self::new(detector, width, height, TrackerConfig::default())
    }

    /// Run detection on one frame and feed the result to the tracker.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    ///
    /// A frame whose size differs from the tracker's coordinate space is
    /// still processed.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<TrackedObject>, PipelineError<D::Error>> {
        let (tw, th) = self.tracker.frame_size();
        if (width, height) != (tw, th) {
            warn!(
                "Frame of {}x{} differs from tracker coordinate space {}x{}",
                width, height, tw, th
            );
        }

        let detections = self
            .detector
            .detect(input, width, height)
            .map_err(PipelineError::Detector)?;
        Ok(self.tracker.analyse(&detections)?)
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &ObjectTracker {
        &self.tracker
    }
}
