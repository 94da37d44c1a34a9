//! Trait for object detection inference backends.

use crate::tracker::{Detection, Rect};

/// Trait for object detection inference backends.
///
/// Implement this trait to connect any detection model to the tracker.
///
/// # Example
///
/// ```ignore
/// use objtrack_rs::{Detection, DetectionSource};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<Detection>, Self::Error> {
///         // Run inference and return detections
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error: std::error::Error + 'static;

    /// Run inference on raw image data and return detections.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    ///
    /// Boxes must be expressed in the pixel space of the given image.
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error>;
}

/// Helper trait for converting model-specific outputs to `Detection`.
pub trait IntoDetections {
    /// Convert the output into a vector of detections.
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}

/// Unlabelled `(box, confidence)` pairs.
impl IntoDetections for Vec<(Rect, f32)> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter()
            .map(|(bbox, confidence)| Detection::from_rect(bbox, confidence))
            .collect()
    }
}

/// `(label, confidence, box)` triples, as produced by class-aware detectors.
impl<L: Into<String>> IntoDetections for Vec<(L, f32, Rect)> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter()
            .map(|(label, confidence, bbox)| {
                Detection::from_rect(bbox, confidence).with_label(label)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_into_detections() {
        let dets = vec![(Rect::new(1.0, 2.0, 3.0, 4.0), 0.5)].into_detections();
        assert_eq!(dets.len(), 1);
        assert_eq!(dets[0].confidence, 0.5);
        assert!(dets[0].label.is_none());
    }

    #[test]
    fn test_labelled_triples_into_detections() {
        let dets = vec![("person", 0.8, Rect::new(0.0, 0.0, 10.0, 20.0))].into_detections();
        assert_eq!(dets[0].label.as_deref(), Some("person"));
        assert_eq!(dets[0].bbox.height, 20.0);
    }
}
