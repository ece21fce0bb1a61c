//! Regular 2D binning of projected points.
//!
//! A **HistogramGrid** divides an axis-aligned **Extent** into
//! `bins_x` × `bins_y` equal cells and counts the points falling into
//! each cell. Point `p` goes to column `floor((p.x - x_min) / width)`
//! and row `floor((p.y - y_min) / height)`; a coordinate equal to the
//! upper bound lands in the last cell.
//!
//! Points outside the extent follow the **OutOfRange** policy:
//!
//! - `Drop`: the point is not binned and the `dropped` counter grows.
//! - `Clamp`: the point is moved into the nearest edge cell.
//!
//! Points with a non-finite coordinate are dropped under both
//! policies. In every case `total() + dropped() == seen()`.
//!
//! Counts are integers, so building a grid from the same points always
//! gives the same grid, and grids built from parts of a cloud can be
//! merged cell by cell in any order.

// others
use serde::{de, Deserialize, Deserializer, Serialize};
use strum_macros::{Display, EnumString};
// hypersphere
use crate::core::error::{Error, Result};
use crate::core::geometry::DiscPoint;
use crate::core::hypersphere::{Float, DISC_RADIUS};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub x_min: Float,
    pub x_max: Float,
    pub y_min: Float,
    pub y_max: Float,
}

impl Extent {
    pub fn new(x_min: Float, x_max: Float, y_min: Float, y_max: Float) -> Self {
        Extent {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }
    /// The square [-half_width, half_width]².
    pub fn square(half_width: Float) -> Self {
        Extent::new(-half_width, half_width, -half_width, half_width)
    }
    /// The square enclosing the projection disc of the unit sphere.
    pub fn disc() -> Self {
        Extent::square(DISC_RADIUS)
    }
    pub fn width(&self) -> Float {
        self.x_max - self.x_min
    }
    pub fn height(&self) -> Float {
        self.y_max - self.y_min
    }
    pub fn contains(&self, p: &DiscPoint) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }
    pub fn validate(&self) -> Result<()> {
        let finite = self.x_min.is_finite()
            && self.x_max.is_finite()
            && self.y_min.is_finite()
            && self.y_max.is_finite();
        if !finite || self.x_min >= self.x_max || self.y_min >= self.y_max {
            return Err(Error::InvalidConfig(format!("empty extent {:?}", self)));
        }
        // bin widths are computed from these
        if !self.width().is_finite() || !self.height().is_finite() {
            return Err(Error::InvalidConfig(format!(
                "extent {:?} is too wide to bin",
                self
            )));
        }
        Ok(())
    }
}

impl Default for Extent {
    fn default() -> Self {
        Extent::disc()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum OutOfRange {
    Drop,
    Clamp,
}

impl Default for OutOfRange {
    fn default() -> Self {
        OutOfRange::Drop
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    pub bins_x: usize,
    pub bins_y: usize,
    pub extent: Extent,
    pub policy: OutOfRange,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        HistogramConfig {
            bins_x: 64,
            bins_y: 64,
            extent: Extent::disc(),
            policy: OutOfRange::Drop,
        }
    }
}

impl HistogramConfig {
    pub fn new(bins_x: usize, bins_y: usize, extent: Extent, policy: OutOfRange) -> Self {
        HistogramConfig {
            bins_x,
            bins_y,
            extent,
            policy,
        }
    }
    pub fn validate(&self) -> Result<()> {
        if self.bins_x == 0 || self.bins_y == 0 {
            return Err(Error::InvalidConfig(format!(
                "histogram needs at least one bin per axis, got {} x {}",
                self.bins_x, self.bins_y
            )));
        }
        if self.bins_x.checked_mul(self.bins_y).is_none() {
            return Err(Error::InvalidConfig(format!(
                "{} x {} bins do not fit in memory",
                self.bins_x, self.bins_y
            )));
        }
        self.extent.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramGrid {
    pub bins_x: usize,
    pub bins_y: usize,
    pub extent: Extent,
    pub policy: OutOfRange,
    /// Row-major counts, `counts[iy * bins_x + ix]`, row 0 at `y_min`.
    counts: Vec<u64>,
    dropped: u64,
}

/// A grid as read from JSON, before its shape is checked.
#[derive(Deserialize)]
struct GridFile {
    bins_x: usize,
    bins_y: usize,
    extent: Extent,
    policy: OutOfRange,
    counts: Vec<u64>,
    dropped: u64,
}

impl GridFile {
    fn into_grid(self) -> Result<HistogramGrid> {
        let GridFile {
            bins_x,
            bins_y,
            extent,
            policy,
            counts,
            dropped,
        } = self;
        let mut grid = HistogramGrid::new(&HistogramConfig::new(bins_x, bins_y, extent, policy))?;
        if counts.len() != grid.counts.len() {
            return Err(Error::DimensionMismatch {
                expected: grid.counts.len(),
                got: counts.len(),
            });
        }
        grid.counts = counts;
        grid.dropped = dropped;
        Ok(grid)
    }
}

impl<'de> Deserialize<'de> for HistogramGrid {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        GridFile::deserialize(deserializer)?
            .into_grid()
            .map_err(de::Error::custom)
    }
}

/// Bin of *coord* along one axis, or `None` if the point is dropped.
fn bin_index(coord: Float, min: Float, max: Float, bins: usize, policy: OutOfRange) -> Option<usize> {
    if !coord.is_finite() {
        return None;
    }
    if coord < min || coord > max {
        return match policy {
            OutOfRange::Drop => None,
            OutOfRange::Clamp => Some(if coord < min { 0 } else { bins - 1 }),
        };
    }
    let width: Float = (max - min) / bins as Float;
    let index: usize = ((coord - min) / width).floor() as usize;
    Some(index.min(bins - 1))
}

impl HistogramGrid {
    /// An empty grid.
    pub fn new(config: &HistogramConfig) -> Result<Self> {
        config.validate()?;
        Ok(HistogramGrid {
            bins_x: config.bins_x,
            bins_y: config.bins_y,
            extent: config.extent,
            policy: config.policy,
            counts: vec![0_u64; config.bins_x * config.bins_y],
            dropped: 0_u64,
        })
    }
    /// Bin all *points*.
    pub fn build(points: &[DiscPoint], config: &HistogramConfig) -> Result<Self> {
        let mut grid = HistogramGrid::new(config)?;
        for p in points {
            grid.add(p);
        }
        Ok(grid)
    }
    pub fn config(&self) -> HistogramConfig {
        HistogramConfig::new(self.bins_x, self.bins_y, self.extent, self.policy)
    }
    /// Bin one point, returning whether it was counted.
    pub fn add(&mut self, p: &DiscPoint) -> bool {
        let ix = bin_index(
            p.x,
            self.extent.x_min,
            self.extent.x_max,
            self.bins_x,
            self.policy,
        );
        let iy = bin_index(
            p.y,
            self.extent.y_min,
            self.extent.y_max,
            self.bins_y,
            self.policy,
        );
        match (ix, iy) {
            (Some(ix), Some(iy)) => {
                self.counts[iy * self.bins_x + ix] += 1;
                true
            }
            _ => {
                self.dropped += 1;
                false
            }
        }
    }
    /// Record a point that could not be projected.
    pub fn mark_dropped(&mut self) {
        self.dropped += 1;
    }
    pub fn count(&self, ix: usize, iy: usize) -> u64 {
        self.counts[iy * self.bins_x + ix]
    }
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
    /// Number of points offered to the grid, binned or not.
    pub fn seen(&self) -> u64 {
        self.total() + self.dropped
    }
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
    /// Corners (x0, x1, y0, y1) of a cell.
    pub fn cell_bounds(&self, ix: usize, iy: usize) -> (Float, Float, Float, Float) {
        let w: Float = self.extent.width() / self.bins_x as Float;
        let h: Float = self.extent.height() / self.bins_y as Float;
        let x0: Float = self.extent.x_min + ix as Float * w;
        let y0: Float = self.extent.y_min + iy as Float * h;
        (x0, x0 + w, y0, y0 + h)
    }
    /// Add the counts of *other*, which must have the same bins,
    /// extent and policy.
    pub fn merge(&mut self, other: &HistogramGrid) -> Result<()> {
        if self.counts.len() != other.counts.len() {
            return Err(Error::DimensionMismatch {
                expected: self.counts.len(),
                got: other.counts.len(),
            });
        }
        if self.config() != other.config() {
            return Err(Error::InvalidConfig(format!(
                "can not merge {:?} into {:?}",
                other.config(),
                self.config()
            )));
        }
        for (a, b) in self.counts.iter_mut().zip(other.counts.iter()) {
            *a += *b;
        }
        self.dropped += other.dropped;
        Ok(())
    }
    /// Coefficient of variation (standard deviation over mean) of the
    /// counts of all cells lying completely inside the disc of
    /// *radius* around the origin. `None` if there is no such cell or
    /// they are all empty.
    pub fn coefficient_of_variation_within(&self, radius: Float) -> Option<Float> {
        let mut inside: Vec<Float> = Vec::new();
        for iy in 0..self.bins_y {
            for ix in 0..self.bins_x {
                let (x0, x1, y0, y1) = self.cell_bounds(ix, iy);
                let far_x: Float = x0.abs().max(x1.abs());
                let far_y: Float = y0.abs().max(y1.abs());
                if far_x * far_x + far_y * far_y <= radius * radius {
                    inside.push(self.count(ix, iy) as Float);
                }
            }
        }
        if inside.is_empty() {
            return None;
        }
        let n: Float = inside.len() as Float;
        let mean: Float = inside.iter().sum::<Float>() / n;
        if mean == 0.0 as Float {
            return None;
        }
        let variance: Float = inside.iter().map(|c| (c - mean) * (c - mean)).sum::<Float>() / n;
        Some(variance.sqrt() / mean)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn unit_square(bins: usize, policy: OutOfRange) -> HistogramConfig {
        HistogramConfig::new(bins, bins, Extent::new(0.0, 1.0, 0.0, 1.0), policy)
    }

    fn points() -> Vec<DiscPoint> {
        vec![
            DiscPoint { x: 0.1, y: 0.1 },
            DiscPoint { x: 0.6, y: 0.1 },
            DiscPoint { x: 1.0, y: 1.0 },
            DiscPoint { x: 0.0, y: 0.0 },
            DiscPoint { x: -0.5, y: 0.2 },
            DiscPoint { x: 0.3, y: 7.0 },
            DiscPoint {
                x: Float::NAN,
                y: 0.5,
            },
        ]
    }

    #[test]
    fn dropping_outside_points() {
        let grid = HistogramGrid::build(&points(), &unit_square(2, OutOfRange::Drop)).unwrap();
        assert_eq!(grid.count(0, 0), 2);
        assert_eq!(grid.count(1, 0), 1);
        assert_eq!(grid.count(1, 1), 1);
        assert_eq!(grid.count(0, 1), 0);
        assert_eq!(grid.total(), 4);
        assert_eq!(grid.dropped(), 3);
        assert_eq!(grid.seen(), 7);
    }

    #[test]
    fn clamping_outside_points() {
        let grid = HistogramGrid::build(&points(), &unit_square(2, OutOfRange::Clamp)).unwrap();
        // (-0.5, 0.2) clamps into (0, 0), (0.3, 7.0) into (0, 1)
        assert_eq!(grid.count(0, 0), 3);
        assert_eq!(grid.count(0, 1), 1);
        assert_eq!(grid.count(1, 0), 1);
        assert_eq!(grid.count(1, 1), 1);
        // NaN is never clamped
        assert_eq!(grid.dropped(), 1);
        assert_eq!(grid.seen(), 7);
    }

    #[test]
    fn upper_edge_goes_to_last_bin() {
        let config = unit_square(4, OutOfRange::Drop);
        let grid = HistogramGrid::build(&[DiscPoint { x: 1.0, y: 0.25 }], &config).unwrap();
        assert_eq!(grid.count(3, 1), 1);
        assert_eq!(grid.dropped(), 0);
    }

    #[test]
    fn invalid_configurations() {
        let zero = HistogramConfig::new(0, 4, Extent::disc(), OutOfRange::Drop);
        assert!(matches!(HistogramGrid::new(&zero), Err(Error::InvalidConfig(_))));
        let empty = HistogramConfig::new(4, 4, Extent::new(1.0, 1.0, 0.0, 1.0), OutOfRange::Drop);
        assert!(matches!(HistogramGrid::new(&empty), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn extent_too_wide_to_bin() {
        let huge = Extent::new(-1.0e308, 1.0e308, -1.0e308, 1.0e308);
        assert!(huge.width().is_infinite());
        let config = HistogramConfig::new(4, 4, huge, OutOfRange::Drop);
        assert!(matches!(HistogramGrid::new(&config), Err(Error::InvalidConfig(_))));
        // half of it still bins into the expected corner
        let half = Extent::new(-0.5e308, 0.5e308, -0.5e308, 0.5e308);
        let config = HistogramConfig::new(4, 4, half, OutOfRange::Drop);
        let grid = HistogramGrid::build(&[DiscPoint { x: 4.5e307, y: 4.5e307 }], &config).unwrap();
        assert_eq!(grid.count(3, 3), 1);
        assert_eq!(grid.count(0, 0), 0);
    }

    #[test]
    fn json_grid_shape_is_checked() {
        let grid = HistogramGrid::build(&points(), &unit_square(2, OutOfRange::Drop)).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: HistogramGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
        let short = r#"{"bins_x":4,"bins_y":4,
            "extent":{"x_min":-2.0,"x_max":2.0,"y_min":-2.0,"y_max":2.0},
            "policy":"drop","counts":[1],"dropped":0}"#;
        assert!(serde_json::from_str::<HistogramGrid>(short).is_err());
        let no_bins = r#"{"bins_x":0,"bins_y":4,
            "extent":{"x_min":-2.0,"x_max":2.0,"y_min":-2.0,"y_max":2.0},
            "policy":"drop","counts":[],"dropped":0}"#;
        assert!(serde_json::from_str::<HistogramGrid>(no_bins).is_err());
    }

    #[test]
    fn merging_is_order_independent() {
        let config = unit_square(3, OutOfRange::Drop);
        let all = points();
        let (left, right) = all.split_at(3);
        let mut a = HistogramGrid::build(left, &config).unwrap();
        a.merge(&HistogramGrid::build(right, &config).unwrap()).unwrap();
        let mut b = HistogramGrid::build(right, &config).unwrap();
        b.merge(&HistogramGrid::build(left, &config).unwrap()).unwrap();
        let whole = HistogramGrid::build(&all, &config).unwrap();
        assert_eq!(a, whole);
        assert_eq!(b, whole);
    }

    #[test]
    fn merging_different_grids_fails() {
        let mut a = HistogramGrid::new(&unit_square(3, OutOfRange::Drop)).unwrap();
        let b = HistogramGrid::new(&unit_square(4, OutOfRange::Drop)).unwrap();
        assert!(matches!(a.merge(&b), Err(Error::DimensionMismatch { .. })));
        let c = HistogramGrid::new(&unit_square(3, OutOfRange::Clamp)).unwrap();
        assert!(matches!(a.merge(&c), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn flat_grid_has_no_variation() {
        let config = HistogramConfig::new(4, 4, Extent::square(2.0), OutOfRange::Drop);
        let mut grid = HistogramGrid::new(&config).unwrap();
        for iy in 0..4 {
            for ix in 0..4 {
                let (x0, x1, y0, y1) = grid.cell_bounds(ix, iy);
                let center = DiscPoint {
                    x: 0.5 * (x0 + x1),
                    y: 0.5 * (y0 + y1),
                };
                grid.add(&center);
                grid.add(&center);
            }
        }
        assert_eq!(grid.coefficient_of_variation_within(2.0), Some(0.0));
        // no cell of side 1 fits in a disc of radius 0.5
        assert_eq!(grid.coefficient_of_variation_within(0.5), None);
    }
}
