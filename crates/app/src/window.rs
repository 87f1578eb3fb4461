//! Overlay window: creation, message loop and pointer routing

use crate::menu::TrayCommand;
use crate::paint::SurfacePainter;
use crate::state::with_state;
use crate::tray::{SystemTray, WM_TRAYICON};
use overlay::win32::{cursor_position, SystemTheme, Win32Host};
use overlay::{
    GestureOutcome, LocalPoint, OverlayConfig, OverlayController, PointerButton, WindowHost,
};
use std::cell::{Cell, RefCell};
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Gdi::{InvalidateRect, UpdateWindow};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW, LoadCursorW,
    PostQuitMessage, RegisterClassExW, ShowWindow, TranslateMessage, CS_HREDRAW, CS_VREDRAW,
    HMENU, HTCLIENT, IDC_ARROW, MSG, SW_SHOW, WM_CAPTURECHANGED, WM_COMMAND, WM_DESTROY,
    WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MOUSEMOVE, WM_PAINT, WM_RBUTTONDOWN, WM_RBUTTONUP,
    WM_SETCURSOR, WNDCLASSEXW, WS_EX_APPWINDOW, WS_EX_TOPMOST, WS_OVERLAPPEDWINDOW,
};

thread_local! {
    static CONTROLLER: RefCell<Option<OverlayController<Win32Host>>> = const { RefCell::new(None) };
    static PAINTER: Cell<Option<SurfacePainter>> = const { Cell::new(None) };
    static TRAY: RefCell<Option<SystemTray>> = const { RefCell::new(None) };
}

fn with_controller<R>(f: impl FnOnce(&mut OverlayController<Win32Host>) -> R) -> Option<R> {
    CONTROLLER.with(|c| with_state(c, f))
}

fn update_painter(f: impl FnOnce(&mut SurfacePainter)) {
    PAINTER.with(|p| {
        if let Some(mut painter) = p.get() {
            f(&mut painter);
            p.set(Some(painter));
        }
    });
}

fn local_from_lparam(lparam: LPARAM) -> LocalPoint {
    let x = (lparam.0 & 0xFFFF) as i16 as i32;
    let y = ((lparam.0 >> 16) & 0xFFFF) as i16 as i32;
    LocalPoint::new(x, y)
}

/// The borderless, color-keyed overlay window
pub struct OverlayWindow {
    hwnd: HWND,
}

impl OverlayWindow {
    const CLASS_NAME: PCWSTR = w!("VNCompanionOverlay");

    pub fn create(config: &OverlayConfig) -> anyhow::Result<Self> {
        unsafe {
            let hmodule = GetModuleHandleW(None)?;
            let hinstance = HINSTANCE(hmodule.0);

            let wc = WNDCLASSEXW {
                cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(Self::wnd_proc),
                hInstance: hinstance,
                hCursor: LoadCursorW(None, IDC_ARROW)?,
                lpszClassName: Self::CLASS_NAME,
                ..Default::default()
            };

            RegisterClassExW(&wc);

            // Created with full chrome; the controller strips caption and frame
            let bounds = config.initial_bounds;
            let hwnd = CreateWindowExW(
                WS_EX_TOPMOST | WS_EX_APPWINDOW,
                Self::CLASS_NAME,
                w!("VN Companion"),
                WS_OVERLAPPEDWINDOW,
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height,
                HWND::default(),
                HMENU::default(),
                hinstance,
                None,
            )?;

            let theme = SystemTheme::detect();
            let mut controller = OverlayController::new(Win32Host::new(hwnd), config, &theme);
            controller.initialize();

            PAINTER.with(|p| {
                p.set(Some(SurfacePainter {
                    color_key: controller.color_key(),
                    layout: controller.layout(),
                    click_through: controller.click_through_enabled(),
                }))
            });
            CONTROLLER.with(|c| *c.borrow_mut() = Some(controller));

            TRAY.with(|tray| {
                let mut tray_icon = SystemTray::new(hwnd);
                if let Err(e) = tray_icon.show() {
                    tracing::warn!("Failed to show tray icon: {}", e);
                }
                *tray.borrow_mut() = Some(tray_icon);
            });

            tracing::info!("Overlay window created at {:?}", bounds);
            Ok(Self { hwnd })
        }
    }

    pub fn show(&self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_SHOW);
            let _ = UpdateWindow(self.hwnd);
        }
    }

    pub fn run_message_loop() -> i32 {
        unsafe {
            let mut msg = MSG::default();
            while GetMessageW(&mut msg, None, 0, 0).into() {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
            msg.wParam.0 as i32
        }
    }

    unsafe extern "system" fn wnd_proc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        match msg {
            WM_PAINT => {
                match PAINTER.with(|p| p.get()) {
                    Some(painter) => painter.paint(hwnd),
                    None => return DefWindowProcW(hwnd, msg, wparam, lparam),
                }
                LRESULT(0)
            }

            WM_LBUTTONDOWN => {
                Self::handle_pointer_down(hwnd, PointerButton::Left, lparam);
                LRESULT(0)
            }

            WM_RBUTTONDOWN => {
                Self::handle_pointer_down(hwnd, PointerButton::Right, lparam);
                LRESULT(0)
            }

            WM_MOUSEMOVE => {
                let local = local_from_lparam(lparam);
                let outcome = with_controller(|c| {
                    let screen = cursor_position().unwrap_or_else(|_| {
                        c.host()
                            .window_bounds()
                            .map(|b| b.to_screen(local))
                            .unwrap_or_default()
                    });
                    c.pointer_move(screen, local)
                });
                if let Some(GestureOutcome::Split(panel_width)) = outcome {
                    update_painter(|p| p.layout.panel_width = panel_width);
                    let _ = InvalidateRect(hwnd, None, false);
                }
                LRESULT(0)
            }

            WM_LBUTTONUP => {
                with_controller(|c| c.pointer_up());
                LRESULT(0)
            }

            // Also raised by our own ReleaseCapture, while the controller is
            // borrowed and already idle; with_state skips that one
            WM_CAPTURECHANGED => {
                with_controller(|c| c.capture_lost());
                LRESULT(0)
            }

            WM_SETCURSOR if (lparam.0 & 0xFFFF) as u32 == HTCLIENT => {
                let handled = with_controller(|c| {
                    let cursor = c.cursor();
                    c.host_mut().set_cursor(cursor);
                });
                match handled {
                    Some(()) => LRESULT(1),
                    None => DefWindowProcW(hwnd, msg, wparam, lparam),
                }
            }

            WM_TRAYICON => {
                let event = (lparam.0 & 0xFFFF) as u32;
                if event == WM_RBUTTONUP {
                    let state = with_controller(|c| (c.click_through_enabled(), c.opacity_percent()));
                    if let Some((click_through, opacity)) = state {
                        TRAY.with(|tray| {
                            if let Some(ref tray) = *tray.borrow() {
                                let _ = tray.show_context_menu(click_through, opacity);
                            }
                        });
                    }
                }
                LRESULT(0)
            }

            WM_COMMAND => {
                let id = (wparam.0 & 0xFFFF) as u32;
                if let Some(command) = TrayCommand::from_id(id) {
                    Self::handle_tray_command(hwnd, command);
                }
                LRESULT(0)
            }

            WM_DESTROY => {
                TRAY.with(|tray| {
                    *tray.borrow_mut() = None;
                });
                PostQuitMessage(0);
                LRESULT(0)
            }

            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }

    unsafe fn handle_pointer_down(hwnd: HWND, button: PointerButton, lparam: LPARAM) {
        let local = local_from_lparam(lparam);

        let outcome = with_controller(|c| {
            let bounds = match c.host().window_bounds() {
                Ok(bounds) => bounds,
                Err(e) => {
                    tracing::warn!("Failed to read window bounds: {}", e);
                    return GestureOutcome::Ignored;
                }
            };
            let screen = cursor_position().unwrap_or_else(|_| bounds.to_screen(local));
            let stack = c.hit_test(local);
            c.pointer_down(button, screen, local, &stack)
        });

        if let Some(GestureOutcome::ExitRequested) = outcome {
            let _ = DestroyWindow(hwnd);
        }
    }

    unsafe fn handle_tray_command(hwnd: HWND, command: TrayCommand) {
        match command {
            TrayCommand::ToggleClickThrough => {
                let enabled = with_controller(|c| {
                    let enabled = !c.click_through_enabled();
                    c.set_click_through(enabled);
                    enabled
                });
                if let Some(enabled) = enabled {
                    update_painter(|p| p.click_through = enabled);
                    let _ = InvalidateRect(hwnd, None, false);
                }
            }
            TrayCommand::SetOpacity(percent) => {
                with_controller(|c| c.set_opacity(percent));
            }
            TrayCommand::Exit => {
                let _ = DestroyWindow(hwnd);
            }
        }
    }
}
