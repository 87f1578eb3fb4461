//! Border-zone classification and resize math

use crate::geometry::{LocalPoint, MinimumSize, WindowBounds};

/// Default resize border thickness in pixels
pub const DEFAULT_BORDER_THICKNESS: i32 = 8;

/// Edge or corner grabbed by a resize gesture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResizeDirection {
    #[default]
    None,
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// System cursor shown for a direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorShape {
    #[default]
    Arrow,
    SizeWestEast,
    SizeNorthSouth,
    /// Top-left to bottom-right diagonal
    SizeNwse,
    /// Top-right to bottom-left diagonal
    SizeNesw,
}

impl ResizeDirection {
    /// Classify a window-local point against a border of `thickness` pixels.
    ///
    /// Corners win over edges; on windows narrower than two borders the
    /// left/top edge wins.
    pub fn classify(point: LocalPoint, width: i32, height: i32, thickness: i32) -> Self {
        let left = point.x < thickness;
        let right = !left && point.x >= width - thickness;
        let top = point.y < thickness;
        let bottom = !top && point.y >= height - thickness;

        match (left, right, top, bottom) {
            (true, _, true, _) => ResizeDirection::TopLeft,
            (_, true, true, _) => ResizeDirection::TopRight,
            (true, _, _, true) => ResizeDirection::BottomLeft,
            (_, true, _, true) => ResizeDirection::BottomRight,
            (true, _, _, _) => ResizeDirection::Left,
            (_, true, _, _) => ResizeDirection::Right,
            (_, _, true, _) => ResizeDirection::Top,
            (_, _, _, true) => ResizeDirection::Bottom,
            _ => ResizeDirection::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ResizeDirection::None)
    }

    pub fn moves_left_edge(&self) -> bool {
        matches!(
            self,
            ResizeDirection::Left | ResizeDirection::TopLeft | ResizeDirection::BottomLeft
        )
    }

    pub fn moves_right_edge(&self) -> bool {
        matches!(
            self,
            ResizeDirection::Right | ResizeDirection::TopRight | ResizeDirection::BottomRight
        )
    }

    pub fn moves_top_edge(&self) -> bool {
        matches!(
            self,
            ResizeDirection::Top | ResizeDirection::TopLeft | ResizeDirection::TopRight
        )
    }

    pub fn moves_bottom_edge(&self) -> bool {
        matches!(
            self,
            ResizeDirection::Bottom | ResizeDirection::BottomLeft | ResizeDirection::BottomRight
        )
    }

    pub fn cursor(&self) -> CursorShape {
        match self {
            ResizeDirection::Left | ResizeDirection::Right => CursorShape::SizeWestEast,
            ResizeDirection::Top | ResizeDirection::Bottom => CursorShape::SizeNorthSouth,
            ResizeDirection::TopLeft | ResizeDirection::BottomRight => CursorShape::SizeNwse,
            ResizeDirection::TopRight | ResizeDirection::BottomLeft => CursorShape::SizeNesw,
            ResizeDirection::None => CursorShape::Arrow,
        }
    }
}

/// Apply a pointer delta to the bounds captured at gesture start.
///
/// Both dimensions are clamped to `min`, including the axis the direction
/// does not touch. When the clamped edge is the one that moves the origin,
/// the origin is recomputed so the opposite edge stays where it was in
/// `start`; otherwise the origin stays put and the far edge grows.
pub fn resize_bounds(
    start: WindowBounds,
    direction: ResizeDirection,
    dx: i32,
    dy: i32,
    min: MinimumSize,
) -> WindowBounds {
    let mut bounds = start;

    if direction.moves_left_edge() {
        bounds.x = start.x + dx;
        bounds.width = start.width - dx;
        if bounds.width < min.width {
            bounds.x = start.right() - min.width;
            bounds.width = min.width;
        }
    } else {
        if direction.moves_right_edge() {
            bounds.width = start.width + dx;
        }
        bounds.width = bounds.width.max(min.width);
    }

    if direction.moves_top_edge() {
        bounds.y = start.y + dy;
        bounds.height = start.height - dy;
        if bounds.height < min.height {
            bounds.y = start.bottom() - min.height;
            bounds.height = min.height;
        }
    } else {
        if direction.moves_bottom_edge() {
            bounds.height = start.height + dy;
        }
        bounds.height = bounds.height.max(min.height);
    }

    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ResizeDirection; 9] = [
        ResizeDirection::None,
        ResizeDirection::Left,
        ResizeDirection::Right,
        ResizeDirection::Top,
        ResizeDirection::Bottom,
        ResizeDirection::TopLeft,
        ResizeDirection::TopRight,
        ResizeDirection::BottomLeft,
        ResizeDirection::BottomRight,
    ];

    #[test]
    fn test_classify_reference_points() {
        for t in [1, 4, 8, 12] {
            for (w, h) in [(800, 600), (400, 300), (1920, 1080)] {
                let classify = |x, y| ResizeDirection::classify(LocalPoint::new(x, y), w, h, t);
                assert_eq!(classify(t - 1, t - 1), ResizeDirection::TopLeft, "t={t} {w}x{h}");
                assert_eq!(classify(w / 2, t - 1), ResizeDirection::Top, "t={t} {w}x{h}");
                assert_eq!(
                    classify(w - t + 1, h - t + 1),
                    ResizeDirection::BottomRight,
                    "t={t} {w}x{h}"
                );
                assert_eq!(classify(w / 2, h / 2), ResizeDirection::None, "t={t} {w}x{h}");
            }
        }
    }

    #[test]
    fn test_classify_edges_and_remaining_corners() {
        let classify = |x, y| ResizeDirection::classify(LocalPoint::new(x, y), 800, 600, 8);
        assert_eq!(classify(0, 300), ResizeDirection::Left);
        assert_eq!(classify(799, 300), ResizeDirection::Right);
        assert_eq!(classify(792, 300), ResizeDirection::Right);
        assert_eq!(classify(791, 300), ResizeDirection::None);
        assert_eq!(classify(400, 599), ResizeDirection::Bottom);
        assert_eq!(classify(799, 0), ResizeDirection::TopRight);
        assert_eq!(classify(0, 599), ResizeDirection::BottomLeft);
    }

    #[test]
    fn test_cursor_shapes() {
        assert_eq!(ResizeDirection::Left.cursor(), CursorShape::SizeWestEast);
        assert_eq!(ResizeDirection::Bottom.cursor(), CursorShape::SizeNorthSouth);
        assert_eq!(ResizeDirection::BottomRight.cursor(), CursorShape::SizeNwse);
        assert_eq!(ResizeDirection::BottomLeft.cursor(), CursorShape::SizeNesw);
        assert_eq!(ResizeDirection::None.cursor(), CursorShape::Arrow);
    }

    #[test]
    fn test_right_edge_grows_width_only() {
        let start = WindowBounds::new(100, 100, 800, 600);
        let bounds = resize_bounds(start, ResizeDirection::Right, 51, 0, MinimumSize::default());
        assert_eq!(bounds, WindowBounds::new(100, 100, 851, 600));
    }

    #[test]
    fn test_top_left_clamps_and_pins_bottom_right() {
        let start = WindowBounds::new(100, 100, 800, 600);
        let bounds = resize_bounds(start, ResizeDirection::TopLeft, 750, 550, MinimumSize::default());
        assert_eq!(bounds, WindowBounds::new(500, 400, 400, 300));
        assert_eq!(bounds.right(), start.right());
        assert_eq!(bounds.bottom(), start.bottom());
    }

    #[test]
    fn test_left_edge_moves_origin() {
        let start = WindowBounds::new(100, 100, 800, 600);
        let bounds = resize_bounds(start, ResizeDirection::Left, -50, 0, MinimumSize::default());
        assert_eq!(bounds, WindowBounds::new(50, 100, 850, 600));
    }

    #[test]
    fn test_minimum_size_holds_for_any_delta() {
        let min = MinimumSize::default();
        let start = WindowBounds::new(100, 100, 800, 600);
        let deltas = [-2000, -801, -400, -1, 0, 1, 399, 400, 401, 599, 800, 2000];

        for direction in ALL {
            for dx in deltas {
                for dy in deltas {
                    let bounds = resize_bounds(start, direction, dx, dy, min);
                    assert!(bounds.width >= min.width, "{direction:?} dx={dx}");
                    assert!(bounds.height >= min.height, "{direction:?} dy={dy}");

                    if direction.moves_left_edge() {
                        assert_eq!(bounds.right(), start.right(), "{direction:?} dx={dx}");
                    }
                    if direction.moves_top_edge() {
                        assert_eq!(bounds.bottom(), start.bottom(), "{direction:?} dy={dy}");
                    }
                    if direction.moves_right_edge() || direction.moves_bottom_edge() {
                        if !direction.moves_left_edge() {
                            assert_eq!(bounds.x, start.x);
                        }
                        if !direction.moves_top_edge() {
                            assert_eq!(bounds.y, start.y);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_single_axis_resize_clamps_both_dimensions() {
        let min = MinimumSize::default();
        let start = WindowBounds::new(0, 0, 50, 40);

        let bounds = resize_bounds(start, ResizeDirection::Left, 0, 0, min);
        assert_eq!(bounds, WindowBounds::new(-350, 0, 400, 300));
        assert_eq!(bounds.right(), start.right());

        let bounds = resize_bounds(start, ResizeDirection::Bottom, 0, 10, min);
        assert_eq!(bounds, WindowBounds::new(0, 0, 400, 300));

        for direction in ALL {
            let bounds = resize_bounds(start, direction, 0, 0, min);
            assert!(bounds.width >= min.width, "{direction:?}");
            assert!(bounds.height >= min.height, "{direction:?}");
        }
    }

    #[test]
    fn test_none_direction_keeps_bounds() {
        let start = WindowBounds::new(10, 20, 500, 400);
        let bounds = resize_bounds(start, ResizeDirection::None, 99, -99, MinimumSize::default());
        assert_eq!(bounds, start);
    }
}
