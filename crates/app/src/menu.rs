//! Tray menu commands

/// Tray menu command IDs
pub const ID_TRAY_CLICK_THROUGH: u32 = 1001;
pub const ID_TRAY_OPACITY_100: u32 = 1002;
pub const ID_TRAY_OPACITY_80: u32 = 1003;
pub const ID_TRAY_OPACITY_60: u32 = 1004;
pub const ID_TRAY_EXIT: u32 = 1005;

/// Opacity presets offered in the tray menu, with their command IDs
pub const OPACITY_PRESETS: [(u32, i32); 3] = [
    (ID_TRAY_OPACITY_100, 100),
    (ID_TRAY_OPACITY_80, 80),
    (ID_TRAY_OPACITY_60, 60),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayCommand {
    ToggleClickThrough,
    SetOpacity(i32),
    Exit,
}

impl TrayCommand {
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            ID_TRAY_CLICK_THROUGH => Some(TrayCommand::ToggleClickThrough),
            ID_TRAY_EXIT => Some(TrayCommand::Exit),
            _ => OPACITY_PRESETS
                .iter()
                .find(|(preset_id, _)| *preset_id == id)
                .map(|(_, percent)| TrayCommand::SetOpacity(*percent)),
        }
    }
}
