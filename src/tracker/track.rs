//! Single object track owned by the tracker.

use crate::tracker::detection::Detection;
use crate::tracker::rect::Rect;
use crate::tracker::track_state::TrackState;

/// Internal record of one physical object's identity and last-known geometry.
#[derive(Debug, Clone)]
pub struct Track {
    /// Unique track identifier
    pub track_id: u64,
    /// Current track state
    pub state: TrackState,
    /// Last matched bounding box
    pub rect: Rect,
    /// Confidence of the last matched detection
    pub confidence: f32,
    /// Label of the last matched detection
    pub label: Option<String>,
    /// Number of frames this track was matched on, including its first
    pub frames_seen: u32,
    /// Consecutive frames without a matching detection
    pub frames_since_matched: u32,
    /// Frame ID when track was started
    pub start_frame: u64,
    /// Frame ID of the last match
    pub last_frame: u64,
}

impl Track {
    /// Start a new track from an unmatched detection.
    pub fn new(track_id: u64, detection: &Detection, frame_id: u64) -> Self {
        Self {
            track_id,
            state: TrackState::New,
            rect: detection.bbox,
            confidence: detection.confidence,
            label: detection.label.clone(),
            frames_seen: 1,
            frames_since_matched: 0,
            start_frame: frame_id,
            last_frame: frame_id,
        }
    }

    /// Bind this track to the detection it was matched with.
    pub fn update(&mut self, detection: &Detection, frame_id: u64) {
        self.rect = detection.bbox;
        self.confidence = detection.confidence;
        if detection.label.is_some() {
            self.label = detection.label.clone();
        }
        self.frames_seen += 1;
        self.frames_since_matched = 0;
        self.last_frame = frame_id;
        self.state = TrackState::Active;
    }

    /// Age an unmatched track, retiring it once it outlives `grace_period`.
    pub fn mark_missed(&mut self, grace_period: u32) {
        self.frames_since_matched += 1;
        self.state = if self.frames_since_matched > grace_period {
            TrackState::Retired
        } else {
            TrackState::Stale
        };
    }

    pub fn is_retired(&self) -> bool {
        self.state == TrackState::Retired
    }
}
