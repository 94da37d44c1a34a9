use ndarray::Array2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in image pixel coordinates.
///
/// Stored as TLWH: top-left x, top-left y, width, height. Coordinates outside
/// the frame are ordinary numbers and are never clipped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Top-left x coordinate
    pub x: f32,
    /// Top-left y coordinate
    pub y: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Create a Rect from its center point and dimensions.
    #[inline]
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x, self.y, self.right(), self.bottom()]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [f32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get the center point of the bounding box.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Checks that the box can be scored: finite coordinates, finite
    /// non-negative dimensions, and a far corner and area that fit in `f32`.
    pub fn validate(&self) -> Result<(), String> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(format!("non-finite position ({}, {})", self.x, self.y));
        }
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(format!("non-finite size {}x{}", self.width, self.height));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(format!("negative size {}x{}", self.width, self.height));
        }
        if !self.right().is_finite() || !self.bottom().is_finite() {
            return Err(format!(
                "far corner ({}, {}) overflows",
                self.right(),
                self.bottom()
            ));
        }
        if !self.area().is_finite() {
            return Err(format!("area of {}x{} overflows", self.width, self.height));
        }
        Ok(())
    }

    /// Calculate Intersection over Union (IoU) with another bounding box.
    ///
    /// Symmetric, in `[0, 1]`, and `0` for disjoint or degenerate boxes.
    /// Areas are accumulated in `f64` so the union of two boxes that pass
    /// [`validate`](Self::validate) cannot overflow.
    pub fn iou(&self, other: &Rect) -> f32 {
        let x1 = self.x.max(other.x) as f64;
        let y1 = self.y.max(other.y) as f64;
        let x2 = self.right().min(other.right()) as f64;
        let y2 = self.bottom().min(other.bottom()) as f64;

        let inter_area = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
        let union_area = area_f64(self) + area_f64(other) - inter_area;

        if union_area > 0.0 {
            (inter_area / union_area).clamp(0.0, 1.0) as f32
        } else {
            0.0
        }
    }
}

#[inline]
fn area_f64(rect: &Rect) -> f64 {
    rect.width as f64 * rect.height as f64
}

/// Calculate the IoU similarity matrix between two sets of bounding boxes.
///
/// Returns a matrix of shape (M, N) where M is the length of `boxes_a`
/// and N is the length of `boxes_b`.
pub fn iou_batch(boxes_a: &[Rect], boxes_b: &[Rect]) -> Array2<f32> {
    let mut ious = Array2::zeros((boxes_a.len(), boxes_b.len()));
    for (i, a) in boxes_a.iter().enumerate() {
        for (j, b) in boxes_b.iter().enumerate() {
            ious[[i, j]] = a.iou(b);
        }
    }
    ious
}
