//! GDI painting for the overlay surface
//!
//! Only pixels painted exactly in the color key let input fall through to
//! the window below; everything else reaches the overlay. The fill plan
//! therefore keys the render surface only while click-through is on, and
//! always paints the resize bands and the splitter in non-key colors.

use overlay::{ColorRef, ElementKind, SurfaceLayout, WindowBounds};

/// Accent used for the surface outline and the splitter
const ACCENT_COLOR: ColorRef = ColorRef(0x00D7_7800);
#[cfg(windows)]
const OUTLINE_THICKNESS: i32 = 2;

/// Everything the painter needs; copied out of the controller so painting
/// never borrows gesture state.
#[derive(Debug, Clone, Copy)]
pub struct SurfacePainter {
    pub color_key: ColorRef,
    pub layout: SurfaceLayout,
    pub click_through: bool,
}

impl SurfacePainter {
    fn is_dark(&self) -> bool {
        self.color_key == ColorRef::BLACK
    }

    /// Fill color for a layout element
    pub fn fill_for(&self, element: ElementKind) -> ColorRef {
        match element {
            ElementKind::RenderSurface | ElementKind::Container if self.click_through => {
                self.color_key
            }
            ElementKind::RenderSurface | ElementKind::Container | ElementKind::ResizeBorder => {
                self.color_key.nearest_distinct()
            }
            ElementKind::Splitter => ACCENT_COLOR,
            ElementKind::Panel if self.is_dark() => ColorRef::rgb(0x20, 0x20, 0x20),
            ElementKind::Panel => ColorRef::rgb(0xF3, 0xF3, 0xF3),
        }
    }

    fn text_color(&self) -> ColorRef {
        if self.is_dark() {
            ColorRef::rgb(0xF0, 0xF0, 0xF0)
        } else {
            ColorRef::rgb(0x1A, 0x1A, 0x1A)
        }
    }

    /// Rectangles to fill, in paint order; later entries cover earlier ones
    pub fn fills(&self, width: i32, height: i32) -> Vec<(WindowBounds, ColorRef)> {
        let mut fills = vec![
            (
                self.layout.render_area(width, height),
                self.fill_for(ElementKind::RenderSurface),
            ),
            (
                self.layout.splitter_area(width, height),
                self.fill_for(ElementKind::Splitter),
            ),
            (
                self.layout.panel_area(width, height),
                self.fill_for(ElementKind::Panel),
            ),
        ];
        let border = self.fill_for(ElementKind::ResizeBorder);
        fills.extend(self.layout.border_bands(width, height).map(|band| (band, border)));
        fills.retain(|(rect, _)| rect.width > 0 && rect.height > 0);
        fills
    }

    fn status_lines(&self) -> [&'static str; 7] {
        let click_through = if self.click_through {
            "Click-through: on"
        } else {
            "Click-through: off"
        };
        [
            "VN Companion",
            "",
            "Drag: move window",
            "Edges: resize",
            "Splitter: resize panel",
            "Right click: exit",
            click_through,
        ]
    }
}

#[cfg(windows)]
mod gdi {
    use super::{SurfacePainter, OUTLINE_THICKNESS};
    use overlay::{ColorRef, WindowBounds};
    use windows::Win32::Foundation::{COLORREF, HWND, RECT};
    use windows::Win32::Graphics::Gdi::{
        BeginPaint, CreatePen, CreateSolidBrush, DeleteObject, EndPaint, FillRect,
        GetStockObject, Rectangle, SelectObject, SetBkMode, SetTextColor, TextOutW, HDC,
        NULL_BRUSH, PAINTSTRUCT, PS_SOLID, TRANSPARENT,
    };
    use windows::Win32::UI::WindowsAndMessaging::GetClientRect;

    fn to_rect(bounds: WindowBounds) -> RECT {
        RECT {
            left: bounds.x,
            top: bounds.y,
            right: bounds.right(),
            bottom: bounds.bottom(),
        }
    }

    impl SurfacePainter {
        pub fn paint(&self, hwnd: HWND) {
            unsafe {
                let mut ps = PAINTSTRUCT::default();
                let hdc = BeginPaint(hwnd, &mut ps);

                let mut client = RECT::default();
                let _ = GetClientRect(hwnd, &mut client);
                let width = client.right - client.left;
                let height = client.bottom - client.top;

                for (bounds, color) in self.fills(width, height) {
                    let brush = CreateSolidBrush(COLORREF(color.0));
                    FillRect(hdc, &to_rect(bounds), brush);
                    let _ = DeleteObject(brush);
                }
                self.draw_outline(hdc, width, height);
                self.draw_text(hdc, width, height);

                let _ = EndPaint(hwnd, &ps);
            }
        }

        unsafe fn draw_outline(&self, hdc: HDC, width: i32, height: i32) {
            let area = self.layout.render_area(width, height);
            if area.width <= 0 {
                return;
            }

            let pen = CreatePen(PS_SOLID, OUTLINE_THICKNESS, COLORREF(super::ACCENT_COLOR.0));
            let old_pen = SelectObject(hdc, pen);
            let old_brush = SelectObject(hdc, GetStockObject(NULL_BRUSH));

            let rect = to_rect(area);
            let _ = Rectangle(hdc, rect.left, rect.top, rect.right, rect.bottom);

            SelectObject(hdc, old_brush);
            SelectObject(hdc, old_pen);
            let _ = DeleteObject(pen);
        }

        unsafe fn draw_text(&self, hdc: HDC, width: i32, height: i32) {
            let area = self.layout.panel_area(width, height);
            if area.width <= 0 {
                return;
            }

            let ColorRef(foreground) = self.text_color();
            SetBkMode(hdc, TRANSPARENT);
            SetTextColor(hdc, COLORREF(foreground));

            for (i, line) in self.status_lines().iter().enumerate() {
                let text: Vec<u16> = line.encode_utf16().collect();
                let _ = TextOutW(hdc, area.x + 16, area.y + 16 + i as i32 * 22, &text);
            }
        }
    }
}
