//! # Point Space
//!
//! An immutable, non-empty set of points of a fixed dimensionality together
//! with their per-dimension bounds. The space is built once by whoever loads
//! the data and is then shared read-only (behind an `Arc`) by every chromosome.

use crate::error::{GeneticError, Result};

/// A point of the data set, or a centroid placed among them.
pub type Point = Vec<f64>;

/// Closed interval covered by the data along one dimension.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Euclidean distance between two vectors of equal length.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointSpace {
    points: Vec<Point>,
    dimensions: usize,
    bounds: Vec<Bounds>,
}

impl PointSpace {
    /// Builds a point space, deriving the per-dimension bounds.
    ///
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if there are no points, if
    /// the points have zero or differing dimensionality, or if any coordinate is
    /// not finite.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        let dimensions = points
            .first()
            .map(Vec::len)
            .ok_or_else(|| GeneticError::Configuration("Point space cannot be empty".to_string()))?;

        if dimensions == 0 {
            return Err(GeneticError::Configuration(
                "Points must have at least one dimension".to_string(),
            ));
        }

        let mut bounds = vec![
            Bounds {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            };
            dimensions
        ];

        for (idx, point) in points.iter().enumerate() {
            if point.len() != dimensions {
                return Err(GeneticError::Configuration(format!(
                    "Point {} has {} dimensions, expected {}",
                    idx,
                    point.len(),
                    dimensions
                )));
            }
            for (bound, &coord) in bounds.iter_mut().zip(point) {
                if !coord.is_finite() {
                    return Err(GeneticError::Configuration(format!(
                        "Point {} has a non-finite coordinate",
                        idx
                    )));
                }
                bound.min = bound.min.min(coord);
                bound.max = bound.max.max(coord);
            }
        }

        Ok(Self {
            points,
            dimensions,
            bounds,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: construction rejects empty point sets.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<&[f64]> {
        self.points.get(index).map(Vec::as_slice)
    }

    pub fn bounds(&self) -> &[Bounds] {
        &self.bounds
    }

    pub fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        euclidean_distance(a, b)
    }
}
