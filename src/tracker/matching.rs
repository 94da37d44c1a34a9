//! Association of existing tracks with the detections of a new frame.
//!
//! Both strategies work on an IoU similarity matrix whose rows are tracks and
//! whose columns are detections. Rows are expected in ascending track
//! identity, so "lower row index" means "older track" when breaking ties.

use std::cmp::Ordering;

use ndarray::Array2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

/// Cost given to padding cells of the square matrix handed to the solver.
const PADDING_COST: f64 = 1e6;

/// How correspondences are resolved from the similarity matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MatchStrategy {
    /// Highest IoU first. Low latency, adequate at low object density.
    #[default]
    Greedy,
    /// Minimum total cost (1 - IoU) via the Jonker-Volgenant solver.
    Optimal,
}

impl MatchStrategy {
    /// Resolve correspondences, keeping only pairs whose IoU exceeds `thresh`.
    pub fn assign(self, ious: &Array2<f32>, thresh: f32) -> Result<AssignmentResult> {
        match self {
            MatchStrategy::Greedy => Ok(greedy_assignment(ious, thresh)),
            MatchStrategy::Optimal => linear_assignment(ious, thresh),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentResult {
    /// `(row, column)` pairs, i.e. `(track index, detection index)`
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_detections: Vec<usize>,
}

impl AssignmentResult {
    fn from_matches(matches: Vec<(usize, usize)>, num_rows: usize, num_cols: usize) -> Self {
        let mut row_used = vec![false; num_rows];
        let mut col_used = vec![false; num_cols];
        for &(row, col) in &matches {
            row_used[row] = true;
            col_used[col] = true;
        }

        Self {
            matches,
            unmatched_tracks: unused_indices(&row_used),
            unmatched_detections: unused_indices(&col_used),
        }
    }
}

fn unused_indices(used: &[bool]) -> Vec<usize> {
    used.iter()
        .enumerate()
        .filter_map(|(i, &u)| if u { None } else { Some(i) })
        .collect()
}

/// Greedy highest-IoU-first assignment.
///
/// Repeatedly binds the best remaining pair while its IoU is strictly above
/// `thresh`. Equal scores go to the lower row, then the lower column.
pub fn greedy_assignment(ious: &Array2<f32>, thresh: f32) -> AssignmentResult {
    let (num_rows, num_cols) = ious.dim();

    let mut candidates: Vec<(usize, usize, f32)> = ious
        .indexed_iter()
        .filter(|&(_, &iou)| iou > thresh)
        .map(|((row, col), &iou)| (row, col, iou))
        .collect();

    candidates.sort_by(|a, b| {
        b.2.partial_cmp(&a.2)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
            .then(a.1.cmp(&b.1))
    });

    let mut row_used = vec![false; num_rows];
    let mut col_used = vec![false; num_cols];
    let mut matches = Vec::with_capacity(num_rows.min(num_cols));

    for (row, col, _) in candidates {
        if row_used[row] || col_used[col] {
            continue;
        }
        row_used[row] = true;
        col_used[col] = true;
        matches.push((row, col));
    }

    AssignmentResult::from_matches(matches, num_rows, num_cols)
}

/// Optimal assignment minimizing the total `1 - IoU` cost.
///
/// The solver needs a square matrix, so the IoU matrix is padded with
/// prohibitive costs. Solver assignments at or below `thresh` are discarded.
pub fn linear_assignment(ious: &Array2<f32>, thresh: f32) -> Result<AssignmentResult> {
    let (num_rows, num_cols) = ious.dim();

    if num_rows == 0 || num_cols == 0 {
        return Ok(AssignmentResult::from_matches(vec![], num_rows, num_cols));
    }

    let size = num_rows.max(num_cols);
    let mut padded = Array2::<f64>::from_elem((size, size), PADDING_COST);
    for ((row, col), &iou) in ious.indexed_iter() {
        padded[[row, col]] = 1.0 - iou as f64;
    }

    let (row_to_col, _) =
        lapjv::lapjv(&padded).map_err(|e| TrackerError::Assignment(format!("{e:?}")))?;

    let matches = row_to_col
        .iter()
        .enumerate()
        .take(num_rows)
        .filter(|&(row, &col)| col < num_cols && ious[[row, col]] > thresh)
        .map(|(row, &col)| (row, col))
        .collect();

    Ok(AssignmentResult::from_matches(matches, num_rows, num_cols))
}
