//! VN Companion - transparent overlay window for visual novel assistance

#![windows_subsystem = "windows"]

#[cfg_attr(not(windows), allow(dead_code))]
mod menu;
#[cfg_attr(not(windows), allow(dead_code))]
mod paint;
#[cfg_attr(not(windows), allow(dead_code))]
mod state;
#[cfg(windows)]
mod tray;
#[cfg(windows)]
mod window;

#[cfg(windows)]
fn main() -> anyhow::Result<()> {
    use crate::window::OverlayWindow;
    use overlay::OverlayConfig;
    use tracing_subscriber::EnvFilter;
    use windows::Win32::UI::HiDpi::{
        SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Set DPI awareness
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }

    let config = match OverlayConfig::default_path() {
        Some(path) => OverlayConfig::load(&path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring config at {}: {}", path.display(), e);
            OverlayConfig::default()
        }),
        None => OverlayConfig::default(),
    };
    tracing::debug!("Config: {:?}", config);

    let window = OverlayWindow::create(&config)?;
    window.show();

    let code = OverlayWindow::run_message_loop();
    tracing::info!("Message loop exited with code {}", code);
    Ok(())
}

#[cfg(not(windows))]
fn main() -> anyhow::Result<()> {
    anyhow::bail!("VN Companion requires Windows")
}
