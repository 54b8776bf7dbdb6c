//! Edge anchoring.
//!
//! Given the rectangles of an edge's two endpoints, an [`AnchorPolicy`]
//! decides where the arrow starts and ends. Coordinates are snapped to
//! integers so that exported arrows line up with the integer rectangles.

use serde::Deserialize;

use trellis_core::geometry::{Bounds, Point};

/// Where an arrow meets the rectangles it connects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorPolicy {
    /// Attach at the midpoint of a facing side.
    ///
    /// When the centers are further apart vertically than horizontally the
    /// arrow runs from the bottom (or top) side of the source to the top (or
    /// bottom) side of the target; otherwise it runs between the facing left
    /// and right sides. Ties go horizontal.
    #[default]
    Axis,

    /// Follow the straight line between the centers.
    ///
    /// Each end is pushed out of its rectangle along that line and then
    /// further by the configured offset, leaving a small gap.
    Direct,
}

impl AnchorPolicy {
    /// Resolve the arrow between `source` and `target`.
    ///
    /// `offset` is only used by [`AnchorPolicy::Direct`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis::layout::AnchorPolicy;
    /// # use trellis_core::geometry::{Point, Size};
    /// let size = Size::new(100.0, 50.0);
    /// let a = Point::new(0.0, 0.0).to_bounds(size);
    /// let b = Point::new(200.0, 0.0).to_bounds(size);
    ///
    /// let geometry = AnchorPolicy::Axis.resolve(a, b, 10.0);
    /// assert_eq!(geometry.start(), Point::new(100.0, 25.0));
    /// assert_eq!(geometry.relative_end(), Point::new(100.0, 0.0));
    /// ```
    pub fn resolve(self, source: Bounds, target: Bounds, offset: f32) -> EdgeGeometry {
        let (start, end) = match self {
            Self::Axis => axis_anchors(source, target),
            Self::Direct => direct_anchors(source, target, offset),
        };
        EdgeGeometry::new(start.round(), end.round())
    }
}

fn axis_anchors(source: Bounds, target: Bounds) -> (Point, Point) {
    let from = source.center();
    let to = target.center();
    let delta = to.sub_point(from);

    if delta.y().abs() > delta.x().abs() {
        if delta.y() > 0.0 {
            (
                Point::new(from.x(), source.max_y()),
                Point::new(to.x(), target.min_y()),
            )
        } else {
            (
                Point::new(from.x(), source.min_y()),
                Point::new(to.x(), target.max_y()),
            )
        }
    } else if delta.x() > 0.0 {
        (
            Point::new(source.max_x(), from.y()),
            Point::new(target.min_x(), to.y()),
        )
    } else {
        (
            Point::new(source.min_x(), from.y()),
            Point::new(target.max_x(), to.y()),
        )
    }
}

fn direct_anchors(source: Bounds, target: Bounds, offset: f32) -> (Point, Point) {
    let from = source.center();
    let to = target.center();
    let delta = to.sub_point(from);
    let length = delta.hypot();

    if length == 0.0 {
        return (from, from);
    }

    let direction = delta.scale(1.0 / length);
    let start = from.add_point(direction.scale(exit_distance(source, direction) + offset));
    let end = to.sub_point(direction.scale(exit_distance(target, direction) + offset));
    (start, end)
}

/// Distance from the center of `bounds` to its border along unit `direction`.
fn exit_distance(bounds: Bounds, direction: Point) -> f32 {
    let along = |half: f32, component: f32| {
        if component == 0.0 {
            f32::INFINITY
        } else {
            half / component.abs()
        }
    };

    along(bounds.width() / 2.0, direction.x()).min(along(bounds.height() / 2.0, direction.y()))
}

/// Resolved endpoints of one arrow, in absolute integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeGeometry {
    start: Point,
    end: Point,
}

impl EdgeGeometry {
    fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// End point relative to the start.
    pub fn relative_end(&self) -> Point {
        self.end.sub_point(self.start)
    }

    /// The two-point polyline relative to the start: `[[0, 0], [dx, dy]]`.
    pub fn relative_points(&self) -> [[f32; 2]; 2] {
        let end = self.relative_end();
        [[0.0, 0.0], [end.x(), end.y()]]
    }

    /// True when the arrow has zero length.
    pub fn is_degenerate(&self) -> bool {
        self.relative_end().is_zero()
    }
}

#[cfg(test)]
mod tests {
    use trellis_core::geometry::Size;

    use super::*;

    fn bounds(x: f32, y: f32) -> Bounds {
        Point::new(x, y).to_bounds(Size::new(100.0, 50.0))
    }

    #[test]
    fn test_axis_horizontal() {
        let geometry = AnchorPolicy::Axis.resolve(bounds(0.0, 0.0), bounds(200.0, 0.0), 0.0);

        assert_eq!(geometry.start(), Point::new(100.0, 25.0));
        assert_eq!(geometry.end(), Point::new(200.0, 25.0));
        assert_eq!(geometry.relative_points(), [[0.0, 0.0], [100.0, 0.0]]);
    }

    #[test]
    fn test_axis_vertical() {
        let geometry = AnchorPolicy::Axis.resolve(bounds(0.0, 0.0), bounds(0.0, 200.0), 0.0);

        assert_eq!(geometry.start(), Point::new(50.0, 50.0));
        assert_eq!(geometry.relative_end(), Point::new(0.0, 150.0));
    }

    #[test]
    fn test_axis_upward_and_leftward() {
        let up = AnchorPolicy::Axis.resolve(bounds(0.0, 300.0), bounds(20.0, 0.0), 0.0);
        assert_eq!(up.start(), Point::new(50.0, 300.0));
        assert_eq!(up.end(), Point::new(70.0, 50.0));

        let left = AnchorPolicy::Axis.resolve(bounds(400.0, 10.0), bounds(0.0, 0.0), 0.0);
        assert_eq!(left.start(), Point::new(400.0, 35.0));
        assert_eq!(left.end(), Point::new(100.0, 25.0));
    }

    #[test]
    fn test_axis_tie_goes_horizontal() {
        let geometry = AnchorPolicy::Axis.resolve(bounds(0.0, 0.0), bounds(200.0, 200.0), 0.0);

        assert_eq!(geometry.start(), Point::new(100.0, 25.0));
        assert_eq!(geometry.end(), Point::new(200.0, 225.0));
    }

    #[test]
    fn test_axis_rounds_endpoints() {
        let a = Point::new(0.5, 0.25).to_bounds(Size::new(100.0, 50.0));
        let b = Point::new(300.0, 0.0).to_bounds(Size::new(100.0, 50.0));
        let geometry = AnchorPolicy::Axis.resolve(a, b, 0.0);

        // 100.5 rounds up and 25.25 rounds down
        assert_eq!(geometry.start(), Point::new(101.0, 25.0));
    }

    #[test]
    fn test_self_loop() {
        let a = bounds(40.0, 40.0);

        // Coincident centers fall through to the leftward horizontal case
        let axis = AnchorPolicy::Axis.resolve(a, a, 10.0);
        assert_eq!(axis.start(), Point::new(40.0, 65.0));
        assert_eq!(axis.end(), Point::new(140.0, 65.0));

        let direct = AnchorPolicy::Direct.resolve(a, a, 10.0);
        assert!(direct.is_degenerate());
        assert_eq!(direct.start(), Point::new(90.0, 65.0));
    }

    #[test]
    fn test_zero_size_boxes_are_degenerate() {
        let point = Point::new(30.0, 30.0).to_bounds(Size::default());
        let geometry = AnchorPolicy::Axis.resolve(point, point, 0.0);

        assert!(geometry.is_degenerate());
        assert_eq!(geometry.relative_points(), [[0.0, 0.0], [0.0, 0.0]]);
    }

    #[test]
    fn test_direct_horizontal() {
        let geometry = AnchorPolicy::Direct.resolve(bounds(0.0, 0.0), bounds(200.0, 0.0), 10.0);

        assert_eq!(geometry.start(), Point::new(110.0, 25.0));
        assert_eq!(geometry.end(), Point::new(190.0, 25.0));
    }

    #[test]
    fn test_direct_diagonal_leaves_gap() {
        let a = bounds(0.0, 0.0);
        let b = bounds(300.0, 300.0);
        let geometry = AnchorPolicy::Direct.resolve(a, b, 10.0);

        // The line leaves through the bottom side, whose half height is 25
        let diagonal = 2.0_f32.sqrt();
        let step = (25.0 * diagonal + 10.0) / diagonal;
        let expected = Point::new(50.0 + step, 25.0 + step);
        assert_eq!(geometry.start(), expected.round());
        assert!(geometry.start().y() > a.max_y());
        assert!(geometry.end().y() < b.min_y());
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        fn integer_bounds() -> impl Strategy<Value = Bounds> {
            (-1000i32..1000, -1000i32..1000, 1i32..500, 1i32..500).prop_map(|(x, y, w, h)| {
                Point::new(x as f32, y as f32).to_bounds(Size::new(w as f32, h as f32))
            })
        }

        fn check_axis_endpoints_on_border(
            source: Bounds,
            target: Bounds,
        ) -> Result<(), TestCaseError> {
            let geometry = AnchorPolicy::Axis.resolve(source, target, 0.0);

            prop_assert!(source.is_on_border(geometry.start()));
            prop_assert!(target.is_on_border(geometry.end()));
            prop_assert_eq!(geometry.start(), geometry.start().round());
            prop_assert_eq!(geometry.end(), geometry.end().round());
            Ok(())
        }

        fn check_relative_end_consistent(
            source: Bounds,
            target: Bounds,
            offset: f32,
        ) -> Result<(), TestCaseError> {
            for policy in [AnchorPolicy::Axis, AnchorPolicy::Direct] {
                let geometry = policy.resolve(source, target, offset);
                let rebuilt = geometry.start().add_point(geometry.relative_end());
                prop_assert_eq!(rebuilt, geometry.end());
                prop_assert_eq!(geometry.relative_points()[0], [0.0, 0.0]);
            }
            Ok(())
        }

        proptest! {
            #[test]
            fn axis_endpoints_on_border(source in integer_bounds(), target in integer_bounds()) {
                check_axis_endpoints_on_border(source, target)?;
            }

            #[test]
            fn relative_end_consistent(
                source in integer_bounds(),
                target in integer_bounds(),
                offset in 0.0f32..50.0,
            ) {
                check_relative_end_consistent(source, target, offset)?;
            }
        }
    }
}
