//! Relative size and position descriptors, resolved against a parent size.

use crate::core::geometry::Vec2;

/// Size as a fixed component plus a percentage of the parent, added together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeSpec {
    pub fixed: Vec2,
    pub percentage: Vec2,
}

impl SizeSpec {
    pub const fn new(fixed: Vec2, percentage: Vec2) -> Self {
        Self { fixed, percentage }
    }

    pub const fn fixed(width: i32, height: i32) -> Self {
        Self::new(Vec2::new(width, height), Vec2::ZERO)
    }

    pub const fn percent(width: i32, height: i32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    /// Whole parent area.
    pub const fn fill() -> Self {
        Self::percent(100, 100)
    }
}

/// Placement of a child inside its parent.
///
/// `anchor` is a percentage point shared by parent and child: `(100, 0)` puts the
/// child's top-right corner on the parent's top-right corner. `offset` is in
/// cells, `percentage_offset` in percent of the parent size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub anchor: Vec2,
    pub offset: Vec2,
    pub percentage_offset: Vec2,
}

impl Position {
    pub const TOP_LEFT: Position = Position::anchored(0, 0);
    pub const TOP_CENTER: Position = Position::anchored(50, 0);
    pub const TOP_RIGHT: Position = Position::anchored(100, 0);
    pub const CENTER_LEFT: Position = Position::anchored(0, 50);
    pub const CENTER: Position = Position::anchored(50, 50);
    pub const CENTER_RIGHT: Position = Position::anchored(100, 50);
    pub const BOTTOM_LEFT: Position = Position::anchored(0, 100);
    pub const BOTTOM_CENTER: Position = Position::anchored(50, 100);
    pub const BOTTOM_RIGHT: Position = Position::anchored(100, 100);

    pub const fn new(offset: Vec2, percentage_offset: Vec2, anchor: Vec2) -> Self {
        Self {
            anchor,
            offset,
            percentage_offset,
        }
    }

    pub const fn anchored(x: i32, y: i32) -> Self {
        Self::new(Vec2::ZERO, Vec2::ZERO, Vec2::new(x, y))
    }

    pub const fn with_offset(mut self, x: i32, y: i32) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }

    pub const fn with_percentage_offset(mut self, x: i32, y: i32) -> Self {
        self.percentage_offset = Vec2::new(x, y);
        self
    }
}

fn percent_of(value: i32, percent: i32) -> i32 {
    (f64::from(value) * f64::from(percent) / 100.0).round() as i32
}

/// Absolute size for `spec` inside a parent of `parent` cells.
///
/// Not clamped: zero or negative results are returned as-is and collapsed to
/// 1x1 by the surface that applies them.
pub fn resolve_size(spec: SizeSpec, parent: Vec2) -> Vec2 {
    Vec2::new(
        percent_of(parent.x, spec.percentage.x) + spec.fixed.x,
        percent_of(parent.y, spec.percentage.y) + spec.fixed.y,
    )
}

/// Top-left origin of a `child`-sized surface placed at `position` in `parent`.
pub fn resolve_origin(position: Position, parent: Vec2, child: Vec2) -> Vec2 {
    let axis = |parent: i32, child: i32, anchor: i32, offset: i32, pct_offset: i32| {
        percent_of(parent - child, anchor) + offset + percent_of(parent, pct_offset)
    };
    Vec2::new(
        axis(
            parent.x,
            child.x,
            position.anchor.x,
            position.offset.x,
            position.percentage_offset.x,
        ),
        axis(
            parent.y,
            child.y,
            position.anchor.y,
            position.offset.y,
            position.percentage_offset.y,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_combines_percentage_and_fixed() {
        let cases = [
            (SizeSpec::fixed(6, 3), Vec2::new(20, 10), Vec2::new(6, 3)),
            (SizeSpec::fill(), Vec2::new(20, 10), Vec2::new(20, 10)),
            (
                SizeSpec::new(Vec2::new(-1, 0), Vec2::new(100, 100)),
                Vec2::new(20, 10),
                Vec2::new(19, 10),
            ),
            (SizeSpec::percent(50, 50), Vec2::new(15, 7), Vec2::new(8, 4)),
            (
                SizeSpec::new(Vec2::new(-5, -5), Vec2::ZERO),
                Vec2::new(3, 3),
                Vec2::new(-5, -5),
            ),
        ];
        for (spec, parent, expected) in cases {
            assert_eq!(resolve_size(spec, parent), expected, "spec {spec:?}");
        }
    }

    #[test]
    fn origin_anchor_matrix_all_presets() {
        let cases = [
            (Position::TOP_LEFT, Vec2::new(0, 0)),
            (Position::TOP_CENTER, Vec2::new(7, 0)),
            (Position::TOP_RIGHT, Vec2::new(14, 0)),
            (Position::CENTER_LEFT, Vec2::new(0, 4)),
            (Position::CENTER, Vec2::new(7, 4)),
            (Position::CENTER_RIGHT, Vec2::new(14, 4)),
            (Position::BOTTOM_LEFT, Vec2::new(0, 7)),
            (Position::BOTTOM_CENTER, Vec2::new(7, 7)),
            (Position::BOTTOM_RIGHT, Vec2::new(14, 7)),
        ];
        for (position, expected) in cases {
            let origin = resolve_origin(position, Vec2::new(20, 10), Vec2::new(6, 3));
            assert_eq!(origin, expected, "position {position:?}");
        }
    }

    #[test]
    fn offsets_are_additive_to_anchor() {
        let position = Position::TOP_RIGHT
            .with_offset(-1, 2)
            .with_percentage_offset(0, 10);
        let origin = resolve_origin(position, Vec2::new(20, 10), Vec2::new(6, 3));
        assert_eq!(origin, Vec2::new(13, 3));
    }

    #[test]
    fn oversized_child_may_land_off_surface() {
        let origin = resolve_origin(Position::BOTTOM_RIGHT, Vec2::new(4, 4), Vec2::new(10, 6));
        assert_eq!(origin, Vec2::new(-6, -2));
    }
}
