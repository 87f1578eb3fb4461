//! Layered-window transparency and chrome removal

use crate::host::{ColorRef, LayeredAttributes, ThemeSource, WindowHost};
use crate::OverlayResult;

/// `WS_EX_LAYERED`
pub const WS_EX_LAYERED: u32 = 0x0008_0000;
/// `WS_CAPTION` (border + dialog frame)
pub const WS_CAPTION: u32 = 0x00C0_0000;
/// `WS_THICKFRAME`
pub const WS_THICKFRAME: u32 = 0x0004_0000;

/// Applies the overlay's window style bits.
///
/// Stripping the caption and frame is one-way: once applied, the OS no
/// longer draws resize borders or handles caption double-clicks.
#[derive(Debug, Clone, Copy)]
pub struct WindowStyleController {
    color_key: ColorRef,
}

impl WindowStyleController {
    pub fn new(theme: &dyn ThemeSource) -> Self {
        Self {
            color_key: Self::color_key_for(theme.is_dark_theme()),
        }
    }

    /// Light theme keys out white, dark theme keys out black
    pub fn color_key_for(dark: bool) -> ColorRef {
        if dark {
            ColorRef::BLACK
        } else {
            ColorRef::WHITE
        }
    }

    pub fn color_key(&self) -> ColorRef {
        self.color_key
    }

    /// Make the window layered with a color key and remove its chrome.
    ///
    /// Returns whether the layered bit was newly set. Calling again is a
    /// no-op for both the layered flag and the stripped style bits.
    pub fn enable_transparency<H: WindowHost>(&self, host: &mut H) -> OverlayResult<bool> {
        let ex_style = host.ex_style()?;
        let newly_layered = ex_style & WS_EX_LAYERED == 0;

        if newly_layered {
            host.set_ex_style(ex_style | WS_EX_LAYERED)?;
            host.set_layered_attributes(LayeredAttributes::ColorKey(self.color_key))?;
            tracing::debug!("Layered style applied, color key {:#08x}", self.color_key.0);
        }

        let style = host.style()?;
        let stripped = style & !(WS_CAPTION | WS_THICKFRAME);
        if stripped != style {
            host.set_style(stripped)?;
        }

        Ok(newly_layered)
    }

    /// Whole-window alpha from a percentage; values outside 0..=100 are clamped
    pub fn set_opacity<H: WindowHost>(host: &mut H, percent: i32) -> OverlayResult<()> {
        let alpha = Self::alpha_for(percent);
        host.set_layered_attributes(LayeredAttributes::Alpha(alpha))
    }

    pub fn alpha_for(percent: i32) -> u8 {
        (255 * percent.clamp(0, 100) / 100) as u8
    }
}
