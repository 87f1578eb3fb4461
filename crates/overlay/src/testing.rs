//! Recording `WindowHost` for unit tests

use crate::geometry::{ScreenPoint, WindowBounds, WindowHandle};
use crate::host::{LayeredAttributes, WindowHost};
use crate::resize::CursorShape;
use crate::{OverlayError, OverlayResult};

#[derive(Debug)]
pub struct FakeHost {
    pub ex_style: u32,
    pub style: u32,
    pub layered: Vec<LayeredAttributes>,
    pub bounds: WindowBounds,
    pub topmost: bool,
    pub below: Option<WindowHandle>,
    pub activated: Vec<WindowHandle>,
    pub clicks: usize,
    pub captured: bool,
    pub cursor: CursorShape,
    /// Native calls in order, for sequencing assertions
    pub calls: Vec<&'static str>,
    pub fail_style_calls: bool,
    pub fail_activate: bool,
    pub fail_bounds: bool,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            ex_style: 0,
            style: 0,
            layered: Vec::new(),
            bounds: WindowBounds::new(100, 100, 800, 600),
            topmost: true,
            below: None,
            activated: Vec::new(),
            clicks: 0,
            captured: false,
            cursor: CursorShape::Arrow,
            calls: Vec::new(),
            fail_style_calls: false,
            fail_activate: false,
            fail_bounds: false,
        }
    }

    pub fn with_bounds(bounds: WindowBounds) -> Self {
        Self {
            bounds,
            ..Self::new()
        }
    }

    fn failure(what: &str) -> OverlayError {
        OverlayError::Host(format!("{what} failed"))
    }
}

impl WindowHost for FakeHost {
    fn ex_style(&self) -> OverlayResult<u32> {
        if self.fail_style_calls {
            return Err(Self::failure("GetWindowLongPtr"));
        }
        Ok(self.ex_style)
    }

    fn set_ex_style(&mut self, bits: u32) -> OverlayResult<()> {
        self.calls.push("set_ex_style");
        self.ex_style = bits;
        Ok(())
    }

    fn style(&self) -> OverlayResult<u32> {
        if self.fail_style_calls {
            return Err(Self::failure("GetWindowLongPtr"));
        }
        Ok(self.style)
    }

    fn set_style(&mut self, bits: u32) -> OverlayResult<()> {
        self.calls.push("set_style");
        self.style = bits;
        Ok(())
    }

    fn set_layered_attributes(&mut self, attributes: LayeredAttributes) -> OverlayResult<()> {
        self.calls.push("set_layered_attributes");
        self.layered.push(attributes);
        Ok(())
    }

    fn window_bounds(&self) -> OverlayResult<WindowBounds> {
        if self.fail_bounds {
            return Err(Self::failure("GetWindowRect"));
        }
        Ok(self.bounds)
    }

    fn set_window_bounds(&mut self, bounds: WindowBounds) -> OverlayResult<()> {
        self.calls.push("set_window_bounds");
        self.bounds = bounds;
        Ok(())
    }

    fn move_window(&mut self, origin: ScreenPoint) -> OverlayResult<()> {
        self.calls.push("move_window");
        self.bounds = self.bounds.with_origin(origin);
        Ok(())
    }

    fn window_from_point(&self, _point: ScreenPoint) -> Option<WindowHandle> {
        self.below
    }

    fn activate_window(&mut self, target: WindowHandle) -> OverlayResult<()> {
        self.calls.push("activate_window");
        if self.fail_activate {
            return Err(Self::failure("SetForegroundWindow"));
        }
        self.activated.push(target);
        Ok(())
    }

    fn send_left_click(&mut self) -> OverlayResult<()> {
        self.calls.push("send_left_click");
        self.clicks += 1;
        Ok(())
    }

    fn is_topmost(&self) -> bool {
        self.topmost
    }

    fn set_topmost(&mut self, topmost: bool) -> OverlayResult<()> {
        self.calls.push(if topmost { "topmost_on" } else { "topmost_off" });
        self.topmost = topmost;
        Ok(())
    }

    fn capture_pointer(&mut self) {
        self.captured = true;
    }

    fn release_pointer(&mut self) {
        self.captured = false;
    }

    fn set_cursor(&mut self, shape: CursorShape) {
        self.cursor = shape;
    }
}
