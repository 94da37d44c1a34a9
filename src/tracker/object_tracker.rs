//! Frame-to-frame IoU tracker.

use std::collections::BTreeMap;

use log::{debug, trace, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};
use crate::tracker::detection::{Detection, TrackedObject};
use crate::tracker::matching::{AssignmentResult, MatchStrategy};
use crate::tracker::rect::{Rect, iou_batch};
use crate::tracker::track::Track;

/// Minimum IoU (exclusive) for a detection to continue an existing track.
pub const DEFAULT_MATCH_THRESHOLD: f32 = 0.3;
/// Unmatched frames a track survives. Zero means strict per-frame matching.
pub const DEFAULT_GRACE_PERIOD: u32 = 0;
/// Identity given to the first track of a tracker.
pub const FIRST_TRACK_ID: u64 = 1;

/// Configuration for the ObjectTracker.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrackerConfig {
    pub match_threshold: f32,
    pub grace_period: u32,
    pub first_id: u64,
    pub strategy: MatchStrategy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            grace_period: DEFAULT_GRACE_PERIOD,
            first_id: FIRST_TRACK_ID,
            strategy: MatchStrategy::default(),
        }
    }
}

impl TrackerConfig {
    pub fn with_match_threshold(mut self, match_threshold: f32) -> Self {
        self.match_threshold = match_threshold;
        self
    }

    pub fn with_grace_period(mut self, grace_period: u32) -> Self {
        self.grace_period = grace_period;
        self
    }

    pub fn with_first_id(mut self, first_id: u64) -> Self {
        self.first_id = first_id;
        self
    }

    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.match_threshold.is_finite() || !(0.0..1.0).contains(&self.match_threshold) {
            return Err(TrackerError::InvalidConfig(format!(
                "match threshold {} must lie in [0, 1)",
                self.match_threshold
            )));
        }
        if self.first_id == 0 {
            return Err(TrackerError::InvalidConfig(
                "first track id must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Assigns stable identities to detections across the frames of one sequence.
///
/// Each call to [`analyse`](Self::analyse) consumes the detections of the next
/// frame. Tracks are matched to detections by IoU against their last known
/// box; unmatched detections start new tracks and unmatched tracks age out
/// after the configured grace period. Identities are never reused.
///
/// Create one tracker per image sequence and drop it when the sequence ends.
#[derive(Debug, Clone)]
pub struct ObjectTracker {
    width: u32,
    height: u32,
    /// Live tracks keyed by identity; iteration is oldest first.
    tracks: BTreeMap<u64, Track>,
    next_id: u64,
    frame_id: u64,
    config: TrackerConfig,
}

impl ObjectTracker {
    /// Create a tracker for frames of `width` x `height` pixels with the
    /// default configuration.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_config(width, height, TrackerConfig::default())
    }

    pub fn with_config(width: u32, height: u32, config: TrackerConfig) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TrackerError::InvalidFrameSize { width, height });
        }
        config.validate()?;

        debug!(
            "Creating tracker for {}x{} frames: match threshold {}, grace period {}, {:?} matching",
            width, height, config.match_threshold, config.grace_period, config.strategy
        );

        Ok(Self {
            width,
            height,
            tracks: BTreeMap::new(),
            next_id: config.first_id,
            frame_id: 0,
            config,
        })
    }

    /// Process the detections of the next frame.
    ///
    /// Returns one [`TrackedObject`] per detection, in input order. A batch
    /// containing a malformed detection is rejected as a whole and leaves the
    /// tracker untouched.
    pub fn analyse(&mut self, detections: &[Detection]) -> Result<Vec<TrackedObject>> {
        if let Err(e) = validate_batch(detections) {
            warn!("Rejecting frame {}: {}", self.frame_id + 1, e);
            return Err(e);
        }

        // Step 1: Similarity between last known track boxes and detections
        let track_ids: Vec<u64> = self.tracks.keys().copied().collect();
        let track_rects: Vec<Rect> = self.tracks.values().map(|t| t.rect).collect();
        let det_rects: Vec<Rect> = detections.iter().map(|d| d.bbox).collect();
        let ious = iou_batch(&track_rects, &det_rects);

        // Step 2: Association. Nothing has been mutated if this fails.
        let AssignmentResult {
            matches,
            unmatched_tracks,
            unmatched_detections,
        } = self
            .config
            .strategy
            .assign(&ious, self.config.match_threshold)?;

        if self
            .next_id
            .checked_add(unmatched_detections.len() as u64)
            .is_none()
        {
            warn!(
                "Rejecting frame {}: {} new tracks would overflow identity {}",
                self.frame_id + 1,
                unmatched_detections.len(),
                self.next_id
            );
            return Err(TrackerError::IdentitiesExhausted {
                next_id: self.next_id,
                requested: unmatched_detections.len(),
            });
        }

        self.frame_id += 1;
        let frame_id = self.frame_id;
        let mut assigned: Vec<Option<u64>> = vec![None; detections.len()];

        for (itrack, idet) in matches {
            let track_id = track_ids[itrack];
            if let Some(track) = self.tracks.get_mut(&track_id) {
                trace!(
                    "Frame {}: track {} matched detection {} (IoU {:.3})",
                    frame_id,
                    track_id,
                    idet,
                    ious[[itrack, idet]]
                );
                track.update(&detections[idet], frame_id);
                assigned[idet] = Some(track_id);
            }
        }

        // Step 3: Age unmatched tracks and drop the ones past the grace period
        for itrack in unmatched_tracks {
            if let Some(track) = self.tracks.get_mut(&track_ids[itrack]) {
                track.mark_missed(self.config.grace_period);
            }
        }
        self.tracks.retain(|_, track| {
            if track.is_retired() {
                debug!(
                    "Frame {}: retiring track {} (frames {}..={}, seen {} times)",
                    frame_id,
                    track.track_id,
                    track.start_frame,
                    track.last_frame,
                    track.frames_seen
                );
            }
            !track.is_retired()
        });

        // Step 4: Init new tracks
        for idet in unmatched_detections {
            // Cannot overflow: checked against the batch size above.
            let track_id = self.next_id;
            self.next_id += 1;
            let track = Track::new(track_id, &detections[idet], frame_id);
            debug!(
                "Frame {}: new track {} at {:?} ({:?}, confidence {:.2})",
                frame_id, track.track_id, track.rect, track.label, track.confidence
            );
            self.tracks.insert(track_id, track);
            assigned[idet] = Some(track_id);
        }

        debug!(
            "Frame {}: {} detections, {} live tracks",
            frame_id,
            detections.len(),
            self.tracks.len()
        );

        Ok(detections
            .iter()
            .zip(assigned)
            .filter_map(|(det, track_id)| track_id.map(|id| TrackedObject::new(id, det)))
            .collect())
    }

    /// Number of tracks currently kept, matched or within their grace period.
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Number of frames successfully analysed so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_id
    }

    /// Coordinate space declared at construction, as (width, height).
    pub fn frame_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}

fn validate_batch(detections: &[Detection]) -> Result<()> {
    for (index, det) in detections.iter().enumerate() {
        det.validate()
            .map_err(|reason| TrackerError::InvalidDetection { index, reason })?;
    }
    Ok(())
}
