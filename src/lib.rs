//! Frame-to-frame object tracking.
//!
//! [`ObjectTracker`] turns the unordered, identity-less detection sets an
//! object detector produces for each frame into [`TrackedObject`]s that keep
//! the same `id` while the object stays in view. Tracks are associated by
//! IoU of their last known box, greedily by default or optimally with
//! [`MatchStrategy::Optimal`].
//!
//! ```
//! use objtrack_rs::{Detection, ObjectTracker};
//!
//! let mut tracker = ObjectTracker::new(640, 480).unwrap();
//! let first = tracker.analyse(&[Detection::new(10.0, 10.0, 50.0, 50.0, 0.9)]).unwrap();
//! let second = tracker.analyse(&[Detection::new(12.0, 11.0, 50.0, 50.0, 0.85)]).unwrap();
//! assert_eq!(first[0].id, second[0].id);
//! ```

pub mod error;
pub mod integration;
pub mod tracker;

pub use error::{PipelineError, Result, TrackerError};
pub use integration::{DetectionBuilder, DetectionSource, IntoDetections, TrackerPipeline};
pub use tracker::{
    Detection, MatchStrategy, ObjectTracker, Rect, TrackState, TrackedObject, TrackerConfig,
};
