//! Tracker input and output records.

use crate::tracker::rect::Rect;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Detection input for the tracker: one detector observation for one frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Detection {
    /// Bounding box in TLWH format
    pub bbox: Rect,
    /// Detection confidence in `[0, 1]`
    pub confidence: f32,
    /// Class label reported by the detector, if any
    pub label: Option<String>,
}

impl Detection {
    /// Create an unlabelled detection from TLWH coordinates.
    pub fn new(x: f32, y: f32, width: f32, height: f32, confidence: f32) -> Self {
        Self::from_rect(Rect::new(x, y, width, height), confidence)
    }

    pub fn from_rect(bbox: Rect, confidence: f32) -> Self {
        Self {
            bbox,
            confidence,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Checks geometry and confidence, describing the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        self.bbox.validate()?;
        if !self.confidence.is_finite() {
            return Err(format!("non-finite confidence {}", self.confidence));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!("confidence {} outside [0, 1]", self.confidence));
        }
        Ok(())
    }
}

/// A detection enriched with the persistent identity of the track it belongs to.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackedObject {
    /// Track identity, stable across frames
    pub id: u64,
    pub bbox: Rect,
    pub confidence: f32,
    pub label: Option<String>,
}

impl TrackedObject {
    pub(crate) fn new(id: u64, detection: &Detection) -> Self {
        Self {
            id,
            bbox: detection.bbox,
            confidence: detection.confidence,
            label: detection.label.clone(),
        }
    }
}
