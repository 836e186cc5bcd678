//! Plot-ready views of a wellbore path

use crate::integrator::Position;

/// Closed value range of one plot axis
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisRange {
    /// Minimum value
    pub minimum: f64,
    /// Maximum value
    pub maximum: f64,
}

impl AxisRange {
    /// Range covering a single value
    pub fn point(value: f64) -> Self {
        Self {
            minimum: value,
            maximum: value,
        }
    }

    /// Widen the range to include `value`
    pub fn include(&mut self, value: f64) {
        self.minimum = self.minimum.min(value);
        self.maximum = self.maximum.max(value);
    }

    /// `maximum - minimum`
    pub fn span(&self) -> f64 {
        self.maximum - self.minimum
    }
}

/// Bounding box of a path
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlotExtents {
    pub x: AxisRange,
    pub y: AxisRange,
    pub z: AxisRange,
}

impl PlotExtents {
    /// Extents of `positions`, `None` for an empty path
    pub fn of(positions: &[Position]) -> Option<Self> {
        let (first, rest) = positions.split_first()?;
        let mut extents = Self {
            x: AxisRange::point(first.x),
            y: AxisRange::point(first.y),
            z: AxisRange::point(first.z),
        };
        for p in rest {
            extents.x.include(p.x);
            extents.y.include(p.y);
            extents.z.include(p.z);
        }
        Some(extents)
    }

    /// Largest horizontal distance covered, for equal-aspect plots
    pub fn horizontal_span(&self) -> f64 {
        self.x.span().max(self.y.span())
    }
}

/// Column-wise coordinates of a path, the shape 3D line plots consume
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlotSeries {
    /// Series name
    pub name: Option<String>,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub zs: Vec<f64>,
}

impl PlotSeries {
    /// Split positions into coordinate columns
    pub fn from_positions(positions: &[Position]) -> Self {
        Self {
            name: None,
            xs: positions.iter().map(|p| p.x).collect(),
            ys: positions.iter().map(|p| p.y).collect(),
            zs: positions.iter().map(|p| p.z).collect(),
        }
    }

    /// Set series name
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Negate `z` so depth points down on a plot with an upward z axis
    pub fn depth_down(mut self) -> Self {
        for z in &mut self.zs {
            *z = -*z;
        }
        self
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Check whether the series has no points
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn path() -> Vec<Position> {
        vec![
            Position::ORIGIN,
            Position::new(3.0, -1.0, 50.0),
            Position::new(-2.0, 4.0, 90.0),
        ]
    }

    #[test]
    fn test_extents() {
        let extents = PlotExtents::of(&path()).unwrap();
        assert_eq!(extents.x, AxisRange { minimum: -2.0, maximum: 3.0 });
        assert_eq!(extents.y, AxisRange { minimum: -1.0, maximum: 4.0 });
        assert_eq!(extents.z.span(), 90.0);
        assert_eq!(extents.horizontal_span(), 5.0);

        assert!(PlotExtents::of(&[]).is_none());
    }

    #[test]
    fn test_series() {
        let series = PlotSeries::from_positions(&path())
            .with_name("Скв. 1")
            .depth_down();
        assert_eq!(series.len(), 3);
        assert_eq!(series.name.as_deref(), Some("Скв. 1"));
        assert_eq!(series.xs, vec![0.0, 3.0, -2.0]);
        assert_eq!(series.zs, vec![-0.0, -50.0, -90.0]);
    }
}
