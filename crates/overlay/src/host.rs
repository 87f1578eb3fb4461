//! Native windowing contract used by the overlay core

use crate::geometry::{ScreenPoint, WindowBounds, WindowHandle};
use crate::resize::CursorShape;
use crate::OverlayResult;

/// Win32 `COLORREF` layout: `0x00BBGGRR`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorRef(pub u32);

impl ColorRef {
    pub const WHITE: ColorRef = ColorRef(0x00FF_FFFF);
    pub const BLACK: ColorRef = ColorRef(0x0000_0000);

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(r as u32 | (g as u32) << 8 | (b as u32) << 16)
    }

    /// Visually identical color that never matches `self` as a key
    pub fn nearest_distinct(&self) -> Self {
        Self(self.0 ^ 0x01)
    }
}

/// Layered window attribute modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayeredAttributes {
    /// Pixels matching the key are fully transparent
    ColorKey(ColorRef),
    /// Whole-window constant alpha (0 = invisible, 255 = opaque)
    Alpha(u8),
}

/// Operations the overlay needs from the host windowing system.
///
/// All calls happen on the UI thread that owns the window.
pub trait WindowHost {
    /// Extended style bits (`GWL_EXSTYLE`)
    fn ex_style(&self) -> OverlayResult<u32>;
    fn set_ex_style(&mut self, bits: u32) -> OverlayResult<()>;

    /// Normal style bits (`GWL_STYLE`)
    fn style(&self) -> OverlayResult<u32>;
    fn set_style(&mut self, bits: u32) -> OverlayResult<()>;

    fn set_layered_attributes(&mut self, attributes: LayeredAttributes) -> OverlayResult<()>;

    fn window_bounds(&self) -> OverlayResult<WindowBounds>;
    fn set_window_bounds(&mut self, bounds: WindowBounds) -> OverlayResult<()>;
    fn move_window(&mut self, origin: ScreenPoint) -> OverlayResult<()>;

    /// Top-level window under `point`, excluding the overlay itself
    fn window_from_point(&self, point: ScreenPoint) -> Option<WindowHandle>;
    fn activate_window(&mut self, target: WindowHandle) -> OverlayResult<()>;
    /// Inject a left button down followed by a left button up
    fn send_left_click(&mut self) -> OverlayResult<()>;

    fn is_topmost(&self) -> bool;
    fn set_topmost(&mut self, topmost: bool) -> OverlayResult<()>;

    fn capture_pointer(&mut self);
    fn release_pointer(&mut self);
    fn set_cursor(&mut self, shape: CursorShape);
}

/// Read-only view of the OS theme
pub trait ThemeSource {
    fn is_dark_theme(&self) -> bool;
}

/// Fixed theme, for hosts without a theme store
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTheme {
    pub dark: bool,
}

impl ThemeSource for FixedTheme {
    fn is_dark_theme(&self) -> bool {
        self.dark
    }
}
