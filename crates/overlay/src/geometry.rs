//! Screen/window geometry primitives

use serde::Deserialize;

/// Point in screen coordinates (physical pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset of `self` relative to `origin`
    pub fn delta_from(&self, origin: ScreenPoint) -> (i32, i32) {
        (self.x - origin.x, self.y - origin.y)
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Point relative to the window's top-left corner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalPoint {
    pub x: i32,
    pub y: i32,
}

impl LocalPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Window rectangle in screen coordinates.
///
/// Width and height are signed so resize deltas can be applied before
/// clamping without wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WindowBounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowBounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn origin(&self) -> ScreenPoint {
        ScreenPoint::new(self.x, self.y)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Same size, new origin
    pub fn with_origin(&self, origin: ScreenPoint) -> Self {
        Self::new(origin.x, origin.y, self.width, self.height)
    }

    pub fn to_local(&self, point: ScreenPoint) -> LocalPoint {
        LocalPoint::new(point.x - self.x, point.y - self.y)
    }

    pub fn to_screen(&self, point: LocalPoint) -> ScreenPoint {
        ScreenPoint::new(point.x + self.x, point.y + self.y)
    }
}

/// Smallest size a resize gesture may produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimumSize {
    pub width: i32,
    pub height: i32,
}

impl MinimumSize {
    pub const MIN_WIDTH: i32 = 400;
    pub const MIN_HEIGHT: i32 = 300;

    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl Default for MinimumSize {
    fn default() -> Self {
        Self::new(Self::MIN_WIDTH, Self::MIN_HEIGHT)
    }
}

/// Native window handle, borrowed from the OS.
///
/// Never closed or destroyed through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(isize);

impl WindowHandle {
    pub fn from_raw(raw: isize) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }

    pub fn raw(&self) -> isize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_and_screen_conversion() {
        let bounds = WindowBounds::new(100, 100, 800, 600);
        let local = bounds.to_local(ScreenPoint::new(899, 400));
        assert_eq!(local, LocalPoint::new(799, 300));
        assert_eq!(bounds.to_screen(local), ScreenPoint::new(899, 400));
    }

    #[test]
    fn test_contains_excludes_far_edges() {
        let bounds = WindowBounds::new(0, 0, 10, 10);
        assert!(bounds.contains(ScreenPoint::new(0, 0)));
        assert!(bounds.contains(ScreenPoint::new(9, 9)));
        assert!(!bounds.contains(ScreenPoint::new(10, 5)));
        assert!(!bounds.contains(ScreenPoint::new(5, 10)));
    }

    #[test]
    fn test_null_handle_is_rejected() {
        assert!(WindowHandle::from_raw(0).is_none());
        assert_eq!(WindowHandle::from_raw(0x1234).map(|h| h.raw()), Some(0x1234));
    }
}
