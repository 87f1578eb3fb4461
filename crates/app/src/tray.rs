//! System tray implementation

use crate::menu::{
    ID_TRAY_CLICK_THROUGH, ID_TRAY_EXIT, ID_TRAY_OPACITY_100, ID_TRAY_OPACITY_60,
    ID_TRAY_OPACITY_80, OPACITY_PRESETS,
};
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{HWND, POINT};
use windows::Win32::UI::Shell::{
    Shell_NotifyIconW, NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NOTIFYICONDATAW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, DestroyMenu, GetCursorPos, LoadIconW, SetForegroundWindow,
    TrackPopupMenu, IDI_APPLICATION, MF_CHECKED, MF_SEPARATOR, MF_STRING,
    TPM_BOTTOMALIGN, TPM_LEFTALIGN, WM_USER,
};

/// Tray icon message
pub const WM_TRAYICON: u32 = WM_USER + 1;

/// System tray manager
pub struct SystemTray {
    hwnd: HWND,
    nid: NOTIFYICONDATAW,
    visible: bool,
}

impl SystemTray {
    pub fn new(hwnd: HWND) -> Self {
        let mut nid = NOTIFYICONDATAW::default();
        nid.cbSize = std::mem::size_of::<NOTIFYICONDATAW>() as u32;
        nid.hWnd = hwnd;
        nid.uID = 1;
        nid.uFlags = NIF_ICON | NIF_MESSAGE | NIF_TIP;
        nid.uCallbackMessage = WM_TRAYICON;

        let tip_wide: Vec<u16> = "VN Companion overlay".encode_utf16().collect();
        let len = tip_wide.len().min(127);
        nid.szTip[..len].copy_from_slice(&tip_wide[..len]);

        Self {
            hwnd,
            nid,
            visible: false,
        }
    }

    pub fn show(&mut self) -> windows::core::Result<()> {
        if self.visible {
            return Ok(());
        }

        unsafe {
            self.nid.hIcon = LoadIconW(None, IDI_APPLICATION).unwrap_or_default();
            let _ = Shell_NotifyIconW(NIM_ADD, &self.nid);
        }
        self.visible = true;
        Ok(())
    }

    pub fn hide(&mut self) {
        if !self.visible {
            return;
        }

        unsafe {
            let _ = Shell_NotifyIconW(NIM_DELETE, &self.nid);
        }
        self.visible = false;
    }

    /// Show the context menu; the choice arrives as `WM_COMMAND`
    pub fn show_context_menu(&self, click_through: bool, opacity: i32) -> windows::core::Result<()> {
        let checked = |on: bool| if on { MF_STRING | MF_CHECKED } else { MF_STRING };

        unsafe {
            let menu = CreatePopupMenu()?;

            let _ = AppendMenuW(
                menu,
                checked(click_through),
                ID_TRAY_CLICK_THROUGH as usize,
                w!("Click-through"),
            );
            let _ = AppendMenuW(menu, MF_SEPARATOR, 0, PCWSTR::null());

            for (id, percent) in OPACITY_PRESETS {
                let _ = AppendMenuW(menu, checked(percent == opacity), id as usize, opacity_label(id));
            }
            let _ = AppendMenuW(menu, MF_SEPARATOR, 0, PCWSTR::null());
            let _ = AppendMenuW(menu, MF_STRING, ID_TRAY_EXIT as usize, w!("Exit"));

            let mut pt = POINT::default();
            let _ = GetCursorPos(&mut pt);

            let _ = SetForegroundWindow(self.hwnd);
            let _ = TrackPopupMenu(
                menu,
                TPM_LEFTALIGN | TPM_BOTTOMALIGN,
                pt.x,
                pt.y,
                0,
                self.hwnd,
                None,
            );

            let _ = DestroyMenu(menu);
        }
        Ok(())
    }
}

fn opacity_label(id: u32) -> PCWSTR {
    match id {
        ID_TRAY_OPACITY_100 => w!("Opacity 100%"),
        ID_TRAY_OPACITY_80 => w!("Opacity 80%"),
        ID_TRAY_OPACITY_60 => w!("Opacity 60%"),
        _ => w!("Opacity"),
    }
}

impl Drop for SystemTray {
    fn drop(&mut self) {
        self.hide();
    }
}
