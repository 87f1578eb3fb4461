//! Overlay module for VN Companion
//!
//! Transparent, click-through overlay chrome: layered window styles,
//! click forwarding to the window underneath, and borderless drag/resize.

pub mod click_through;
pub mod config;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod resize;
pub mod style;
#[cfg(windows)]
pub mod win32;

#[cfg(test)]
pub(crate) mod testing;

pub use click_through::{ClickThroughForwarder, ForwardOutcome};
pub use config::OverlayConfig;
pub use geometry::{LocalPoint, MinimumSize, ScreenPoint, WindowBounds, WindowHandle};
pub use gesture::{GestureOutcome, GestureState, OverlayController, PointerButton};
pub use hit_test::{ElementKind, SurfaceLayout};
pub use host::{ColorRef, FixedTheme, LayeredAttributes, ThemeSource, WindowHost};
pub use resize::{CursorShape, ResizeDirection};
pub use style::WindowStyleController;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    Windows(#[from] windows::core::Error),

    #[error("Window host error: {0}")]
    Host(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type OverlayResult<T> = Result<T, OverlayError>;
