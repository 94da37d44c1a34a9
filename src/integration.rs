//! Integration module for connecting object detection backends with the tracker.
//!
//! The detector itself is external: implement [`DetectionSource`] for it and
//! drive it together with an [`ObjectTracker`](crate::tracker::ObjectTracker)
//! through a [`TrackerPipeline`].

mod builder;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use pipeline::TrackerPipeline;
