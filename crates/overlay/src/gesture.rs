//! Drag/resize gesture state machine
//!
//! Pointer capture is the session lock: once a press starts a drag or a
//! resize, further presses are ignored until the pointer is released or
//! capture is lost. Loss of capture is treated exactly like a release.

use crate::click_through::{ClickThroughForwarder, ForwardOutcome};
use crate::config::OverlayConfig;
use crate::geometry::{LocalPoint, MinimumSize, ScreenPoint, WindowBounds};
use crate::hit_test::{is_click_through_stack, ElementKind, SurfaceLayout};
use crate::host::{ColorRef, LayeredAttributes, ThemeSource, WindowHost};
use crate::resize::{resize_bounds, CursorShape, ResizeDirection};
use crate::style::WindowStyleController;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
}

/// Pointer and window position captured when a drag starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub start: ScreenPoint,
    pub window_origin: ScreenPoint,
}

/// Grabbed edge and bounds snapshot captured when a resize starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSession {
    pub direction: ResizeDirection,
    pub start: ScreenPoint,
    pub snapshot: WindowBounds,
}

/// Pointer position and panel width captured when a splitter drag starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSession {
    pub start: ScreenPoint,
    pub panel_width: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(DragSession),
    Resizing(ResizeSession),
    Splitting(SplitSession),
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }
}

/// What a pointer event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Ignored,
    DragStarted,
    ResizeStarted(ResizeDirection),
    SplitStarted,
    Forwarded(ForwardOutcome),
    Moved(ScreenPoint),
    Resized(WindowBounds),
    /// New panel width after a splitter move
    Split(i32),
    Hover(CursorShape),
    Released,
    /// Right press; the application should close
    ExitRequested,
}

/// Owns the overlay's gesture state and drives the host window
pub struct OverlayController<H: WindowHost> {
    host: H,
    state: GestureState,
    hover: CursorShape,
    layout: SurfaceLayout,
    min_size: MinimumSize,
    click_through: bool,
    opacity_percent: i32,
    forwarder: ClickThroughForwarder,
    style: WindowStyleController,
}

impl<H: WindowHost> OverlayController<H> {
    pub fn new(host: H, config: &OverlayConfig, theme: &dyn ThemeSource) -> Self {
        Self {
            host,
            state: GestureState::Idle,
            hover: CursorShape::Arrow,
            layout: SurfaceLayout::new(config.panel_width, config.border_thickness),
            min_size: config.min_size(),
            click_through: config.click_through,
            opacity_percent: config.opacity_percent,
            forwarder: ClickThroughForwarder::from_config(config),
            style: WindowStyleController::new(theme),
        }
    }

    /// Apply transparency and chrome removal.
    ///
    /// Failures leave the window visible but opaque; they are logged and
    /// never affect gesture handling.
    pub fn initialize(&mut self) {
        match self.style.enable_transparency(&mut self.host) {
            Ok(true) => tracing::info!("Overlay transparency enabled"),
            Ok(false) => tracing::debug!("Overlay already layered"),
            Err(e) => tracing::warn!("Failed to enable transparency: {}", e),
        }

        if self.opacity_percent < 100 {
            self.set_opacity(self.opacity_percent);
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn layout(&self) -> SurfaceLayout {
        self.layout
    }

    /// Elements under a window-local point; empty if the bounds are unreadable
    pub fn hit_test(&self, local: LocalPoint) -> Vec<ElementKind> {
        match self.host.window_bounds() {
            Ok(bounds) => self.layout.elements_at(local, bounds.width, bounds.height),
            Err(_) => Vec::new(),
        }
    }

    pub fn color_key(&self) -> ColorRef {
        self.style.color_key()
    }

    pub fn click_through_enabled(&self) -> bool {
        self.click_through
    }

    pub fn set_click_through(&mut self, enabled: bool) {
        tracing::info!("Click-through {}", if enabled { "enabled" } else { "disabled" });
        self.click_through = enabled;
    }

    pub fn opacity_percent(&self) -> i32 {
        self.opacity_percent
    }

    /// Switch the layered window to constant alpha.
    ///
    /// Alpha mode replaces the color key, so the surface stops being
    /// see-through until transparency is reapplied at full opacity.
    pub fn set_opacity(&mut self, percent: i32) {
        let percent = percent.clamp(0, 100);
        self.opacity_percent = percent;

        let result = if percent == 100 {
            let key = self.color_key();
            self.host.set_layered_attributes(LayeredAttributes::ColorKey(key))
        } else {
            WindowStyleController::set_opacity(&mut self.host, percent)
        };
        if let Err(e) = result {
            tracing::warn!("Failed to set opacity to {}%: {}", percent, e);
        }
    }

    /// Cursor for the active gesture, else for the hovered element
    pub fn cursor(&self) -> CursorShape {
        match self.state {
            GestureState::Resizing(session) => session.direction.cursor(),
            GestureState::Splitting(_) => CursorShape::SizeWestEast,
            GestureState::Dragging(_) => CursorShape::Arrow,
            GestureState::Idle => self.hover,
        }
    }

    pub fn pointer_down(
        &mut self,
        button: PointerButton,
        screen: ScreenPoint,
        local: LocalPoint,
        stack: &[ElementKind],
    ) -> GestureOutcome {
        if button == PointerButton::Right {
            tracing::info!("Right press, exit requested");
            return GestureOutcome::ExitRequested;
        }

        if !self.state.is_idle() {
            return GestureOutcome::Ignored;
        }

        let bounds = match self.host.window_bounds() {
            Ok(bounds) => bounds,
            Err(e) => {
                tracing::warn!("Failed to read window bounds: {}", e);
                return GestureOutcome::Ignored;
            }
        };

        let direction = ResizeDirection::classify(
            local,
            bounds.width,
            bounds.height,
            self.layout.border_thickness,
        );

        if !direction.is_none() {
            self.state = GestureState::Resizing(ResizeSession {
                direction,
                start: screen,
                snapshot: bounds,
            });
            self.host.capture_pointer();
            self.host.set_cursor(direction.cursor());
            tracing::debug!("Resize started: {:?} from {:?}", direction, bounds);
            return GestureOutcome::ResizeStarted(direction);
        }

        if stack.first() == Some(&ElementKind::Splitter) {
            self.state = GestureState::Splitting(SplitSession {
                start: screen,
                panel_width: self.layout.panel_width,
            });
            self.host.capture_pointer();
            self.host.set_cursor(CursorShape::SizeWestEast);
            tracing::debug!("Splitter drag started at panel width {}", self.layout.panel_width);
            return GestureOutcome::SplitStarted;
        }

        if self.click_through && is_click_through_stack(stack) {
            let outcome = self.forwarder.forward(&mut self.host, screen);
            return GestureOutcome::Forwarded(outcome);
        }

        self.state = GestureState::Dragging(DragSession {
            start: screen,
            window_origin: bounds.origin(),
        });
        self.host.capture_pointer();
        tracing::debug!("Drag started at ({}, {})", screen.x, screen.y);
        GestureOutcome::DragStarted
    }

    pub fn pointer_move(&mut self, screen: ScreenPoint, local: LocalPoint) -> GestureOutcome {
        match self.state {
            GestureState::Dragging(session) => {
                let (dx, dy) = screen.delta_from(session.start);
                let origin = session.window_origin.offset(dx, dy);
                if let Err(e) = self.host.move_window(origin) {
                    tracing::warn!("Failed to move window: {}", e);
                }
                GestureOutcome::Moved(origin)
            }
            GestureState::Resizing(session) => {
                let (dx, dy) = screen.delta_from(session.start);
                let bounds = resize_bounds(session.snapshot, session.direction, dx, dy, self.min_size);
                if let Err(e) = self.host.set_window_bounds(bounds) {
                    tracing::warn!("Failed to resize window: {}", e);
                }
                GestureOutcome::Resized(bounds)
            }
            GestureState::Splitting(session) => {
                let (dx, _) = screen.delta_from(session.start);
                let window_width = match self.host.window_bounds() {
                    Ok(bounds) => bounds.width,
                    Err(e) => {
                        tracing::warn!("Failed to read window bounds: {}", e);
                        return GestureOutcome::Ignored;
                    }
                };
                // Dragging right widens the surface and narrows the panel
                let width = self
                    .layout
                    .clamp_panel_width(session.panel_width - dx, window_width);
                self.layout.panel_width = width;
                GestureOutcome::Split(width)
            }
            GestureState::Idle => self.hover_at(local),
        }
    }

    pub fn pointer_up(&mut self) -> GestureOutcome {
        self.end_gesture("released")
    }

    /// The OS revoked pointer capture; abandon any active gesture
    pub fn capture_lost(&mut self) -> GestureOutcome {
        self.end_gesture("capture lost")
    }

    fn end_gesture(&mut self, reason: &str) -> GestureOutcome {
        if self.state.is_idle() {
            return GestureOutcome::Ignored;
        }

        tracing::debug!("Gesture ended ({}): {:?}", reason, self.state);
        self.state = GestureState::Idle;
        self.hover = CursorShape::Arrow;
        self.host.release_pointer();
        self.host.set_cursor(CursorShape::Arrow);
        GestureOutcome::Released
    }

    fn hover_at(&mut self, local: LocalPoint) -> GestureOutcome {
        let cursor = match self.host.window_bounds() {
            Ok(bounds) => {
                let t = self.layout.border_thickness;
                let direction = ResizeDirection::classify(local, bounds.width, bounds.height, t);
                let over_splitter = self
                    .layout
                    .elements_at(local, bounds.width, bounds.height)
                    .first()
                    == Some(&ElementKind::Splitter);

                if !direction.is_none() {
                    direction.cursor()
                } else if over_splitter {
                    CursorShape::SizeWestEast
                } else {
                    CursorShape::Arrow
                }
            }
            Err(_) => CursorShape::Arrow,
        };

        self.hover = cursor;
        self.host.set_cursor(cursor);
        GestureOutcome::Hover(cursor)
    }
}
