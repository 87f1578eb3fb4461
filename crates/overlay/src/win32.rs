//! Win32 implementation of the window host

use crate::geometry::{ScreenPoint, WindowBounds, WindowHandle};
use crate::host::{LayeredAttributes, ThemeSource, WindowHost};
use crate::resize::CursorShape;
use crate::{OverlayError, OverlayResult};
use std::mem::size_of;
use windows::core::{w, Error as WinError, PCWSTR};
use windows::Win32::Foundation::{
    SetLastError, COLORREF, ERROR_SUCCESS, HWND, POINT, RECT, WIN32_ERROR,
};
use windows::Win32::Graphics::Dwm::{DwmGetWindowAttribute, DWMWA_CLOAKED};
use windows::Win32::System::Registry::{RegGetValueW, HKEY_CURRENT_USER, RRF_RT_REG_DWORD};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    ReleaseCapture, SendInput, SetCapture, INPUT, INPUT_0, INPUT_MOUSE, MOUSEEVENTF_LEFTDOWN,
    MOUSEEVENTF_LEFTUP, MOUSEINPUT, MOUSE_EVENT_FLAGS,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetAncestor, GetCursorPos, GetWindow, GetWindowLongPtrW, GetWindowRect, IsWindowVisible,
    LoadCursorW, SetCursor, SetForegroundWindow, SetLayeredWindowAttributes, SetWindowLongPtrW,
    SetWindowPos, GA_ROOT, GWL_EXSTYLE, GWL_STYLE, GW_HWNDNEXT, HWND_NOTOPMOST, HWND_TOPMOST,
    IDC_ARROW, IDC_SIZENESW, IDC_SIZENS, IDC_SIZENWSE, IDC_SIZEWE, LWA_ALPHA, LWA_COLORKEY,
    SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER,
    WINDOW_LONG_PTR_INDEX, WS_DISABLED, WS_EX_TOPMOST, WS_EX_TRANSPARENT,
};

pub fn hwnd_from_raw(raw: isize) -> HWND {
    HWND(raw as *mut std::ffi::c_void)
}

pub fn hwnd_to_raw(hwnd: HWND) -> isize {
    hwnd.0 as isize
}

/// Current cursor position in screen coordinates
pub fn cursor_position() -> OverlayResult<ScreenPoint> {
    let mut pt = POINT::default();
    unsafe { GetCursorPos(&mut pt)? };
    Ok(ScreenPoint::new(pt.x, pt.y))
}

/// `WindowHost` backed by a real top-level window
#[derive(Debug)]
pub struct Win32Host {
    hwnd: HWND,
}

impl Win32Host {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    fn read_long(&self, index: WINDOW_LONG_PTR_INDEX) -> u32 {
        unsafe { GetWindowLongPtrW(self.hwnd, index) as u32 }
    }

    /// `SetWindowLongPtrW` returns 0 both on failure and when the previous
    /// value was 0, so the last error decides.
    fn write_long(&self, index: WINDOW_LONG_PTR_INDEX, bits: u32) -> OverlayResult<()> {
        unsafe {
            SetLastError(WIN32_ERROR(0));
            let previous = SetWindowLongPtrW(self.hwnd, index, bits as isize);
            if previous == 0 {
                let err = WinError::from_win32();
                if err.code().is_err() {
                    return Err(err.into());
                }
            }
        }
        Ok(())
    }

    /// Whether a window below the overlay can take a forwarded click
    unsafe fn is_click_target(hwnd: HWND, point: ScreenPoint) -> bool {
        if !IsWindowVisible(hwnd).as_bool() {
            return false;
        }

        let style = GetWindowLongPtrW(hwnd, GWL_STYLE) as u32;
        if style & WS_DISABLED.0 != 0 {
            return false;
        }

        // Other click-through overlays
        let ex_style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE) as u32;
        if ex_style & WS_EX_TRANSPARENT.0 != 0 {
            return false;
        }

        // Cloaked windows live on another virtual desktop
        let mut cloaked: u32 = 0;
        if DwmGetWindowAttribute(
            hwnd,
            DWMWA_CLOAKED,
            &mut cloaked as *mut _ as *mut _,
            size_of::<u32>() as u32,
        )
        .is_ok()
            && cloaked != 0
        {
            return false;
        }

        if GetAncestor(hwnd, GA_ROOT) != hwnd {
            return false;
        }

        let mut rect = RECT::default();
        if GetWindowRect(hwnd, &mut rect).is_err() {
            return false;
        }
        let bounds = WindowBounds::new(
            rect.left,
            rect.top,
            rect.right - rect.left,
            rect.bottom - rect.top,
        );
        bounds.contains(point)
    }
}

impl WindowHost for Win32Host {
    fn ex_style(&self) -> OverlayResult<u32> {
        Ok(self.read_long(GWL_EXSTYLE))
    }

    fn set_ex_style(&mut self, bits: u32) -> OverlayResult<()> {
        self.write_long(GWL_EXSTYLE, bits)
    }

    fn style(&self) -> OverlayResult<u32> {
        Ok(self.read_long(GWL_STYLE))
    }

    fn set_style(&mut self, bits: u32) -> OverlayResult<()> {
        self.write_long(GWL_STYLE, bits)?;
        // Frame changes only take effect after a SWP_FRAMECHANGED
        unsafe {
            SetWindowPos(
                self.hwnd,
                None,
                0,
                0,
                0,
                0,
                SWP_FRAMECHANGED | SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
            )?;
        }
        Ok(())
    }

    fn set_layered_attributes(&mut self, attributes: LayeredAttributes) -> OverlayResult<()> {
        unsafe {
            match attributes {
                LayeredAttributes::ColorKey(key) => {
                    SetLayeredWindowAttributes(self.hwnd, COLORREF(key.0), 255, LWA_COLORKEY)?
                }
                LayeredAttributes::Alpha(alpha) => {
                    SetLayeredWindowAttributes(self.hwnd, COLORREF(0), alpha, LWA_ALPHA)?
                }
            }
        }
        Ok(())
    }

    fn window_bounds(&self) -> OverlayResult<WindowBounds> {
        let mut rect = RECT::default();
        unsafe { GetWindowRect(self.hwnd, &mut rect)? };
        Ok(WindowBounds::new(
            rect.left,
            rect.top,
            rect.right - rect.left,
            rect.bottom - rect.top,
        ))
    }

    fn set_window_bounds(&mut self, bounds: WindowBounds) -> OverlayResult<()> {
        unsafe {
            SetWindowPos(
                self.hwnd,
                None,
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height,
                SWP_NOZORDER | SWP_NOACTIVATE,
            )?;
        }
        Ok(())
    }

    fn move_window(&mut self, origin: ScreenPoint) -> OverlayResult<()> {
        unsafe {
            SetWindowPos(
                self.hwnd,
                None,
                origin.x,
                origin.y,
                0,
                0,
                SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
            )?;
        }
        Ok(())
    }

    /// Walks the z-order below the overlay, so the overlay itself is
    /// never returned.
    fn window_from_point(&self, point: ScreenPoint) -> Option<WindowHandle> {
        unsafe {
            let mut current = self.hwnd;
            while let Ok(next) = GetWindow(current, GW_HWNDNEXT) {
                if next.is_invalid() {
                    break;
                }
                if Self::is_click_target(next, point) {
                    return WindowHandle::from_raw(hwnd_to_raw(next));
                }
                current = next;
            }
        }
        None
    }

    fn activate_window(&mut self, target: WindowHandle) -> OverlayResult<()> {
        let activated = unsafe { SetForegroundWindow(hwnd_from_raw(target.raw())) };
        if !activated.as_bool() {
            return Err(OverlayError::Host(format!(
                "SetForegroundWindow refused {:#x}",
                target.raw()
            )));
        }
        Ok(())
    }

    fn send_left_click(&mut self) -> OverlayResult<()> {
        let mouse = |flags: MOUSE_EVENT_FLAGS| INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dx: 0,
                    dy: 0,
                    mouseData: 0,
                    dwFlags: flags,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        };
        let inputs = [mouse(MOUSEEVENTF_LEFTDOWN), mouse(MOUSEEVENTF_LEFTUP)];

        let sent = unsafe { SendInput(&inputs, size_of::<INPUT>() as i32) };
        if sent as usize != inputs.len() {
            return Err(WinError::from_win32().into());
        }
        Ok(())
    }

    fn is_topmost(&self) -> bool {
        self.read_long(GWL_EXSTYLE) & WS_EX_TOPMOST.0 != 0
    }

    fn set_topmost(&mut self, topmost: bool) -> OverlayResult<()> {
        let insert_after = if topmost { HWND_TOPMOST } else { HWND_NOTOPMOST };
        unsafe {
            SetWindowPos(
                self.hwnd,
                insert_after,
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            )?;
        }
        Ok(())
    }

    fn capture_pointer(&mut self) {
        unsafe {
            let _ = SetCapture(self.hwnd);
        }
    }

    fn release_pointer(&mut self) {
        unsafe {
            let _ = ReleaseCapture();
        }
    }

    fn set_cursor(&mut self, shape: CursorShape) {
        let id: PCWSTR = match shape {
            CursorShape::Arrow => IDC_ARROW,
            CursorShape::SizeWestEast => IDC_SIZEWE,
            CursorShape::SizeNorthSouth => IDC_SIZENS,
            CursorShape::SizeNwse => IDC_SIZENWSE,
            CursorShape::SizeNesw => IDC_SIZENESW,
        };
        unsafe {
            if let Ok(cursor) = LoadCursorW(None, id) {
                let _ = SetCursor(cursor);
            }
        }
    }
}

/// Theme read from `AppsUseLightTheme` under the current user's
/// personalization key. A missing value counts as dark.
#[derive(Debug, Clone, Copy)]
pub struct SystemTheme {
    dark: bool,
}

impl SystemTheme {
    pub fn detect() -> Self {
        let mut value: u32 = 0;
        let mut size = size_of::<u32>() as u32;
        let status = unsafe {
            RegGetValueW(
                HKEY_CURRENT_USER,
                w!("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize"),
                w!("AppsUseLightTheme"),
                RRF_RT_REG_DWORD,
                None,
                Some(&mut value as *mut u32 as *mut std::ffi::c_void),
                Some(&mut size),
            )
        };

        if status != ERROR_SUCCESS {
            tracing::debug!("AppsUseLightTheme unreadable ({:?}), assuming dark", status);
            return Self { dark: true };
        }
        Self { dark: value != 1 }
    }
}

impl ThemeSource for SystemTheme {
    fn is_dark_theme(&self) -> bool {
        self.dark
    }
}
