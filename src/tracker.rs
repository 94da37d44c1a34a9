mod detection;
mod matching;
mod object_tracker;
mod rect;
mod track;
mod track_state;

pub use detection::{Detection, TrackedObject};
pub use matching::{AssignmentResult, MatchStrategy, greedy_assignment, linear_assignment};
pub use object_tracker::{
    DEFAULT_GRACE_PERIOD, DEFAULT_MATCH_THRESHOLD, FIRST_TRACK_ID, ObjectTracker, TrackerConfig,
};
pub use rect::{Rect, iou_batch};
pub use track_state::TrackState;
