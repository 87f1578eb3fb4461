//! Forward clicks on the transparent surface to the window underneath

use crate::config::OverlayConfig;
use crate::geometry::{ScreenPoint, WindowHandle};
use crate::host::WindowHost;
use std::ops::{Deref, DerefMut};
use std::thread;
use std::time::Duration;

/// Result of one forwarded click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardOutcome {
    /// Focus switched and a click was injected
    Forwarded(WindowHandle),
    /// Nothing under the cursor; no input was sent
    NoTarget,
    /// Target found but the focus switch or injection failed
    Aborted(WindowHandle),
}

/// Drops always-on-top for its lifetime and re-enables it on drop, even if
/// the forward bails out half way.
struct TopmostGuard<'a, H: WindowHost> {
    host: &'a mut H,
}

impl<'a, H: WindowHost> TopmostGuard<'a, H> {
    fn lower(host: &'a mut H) -> Self {
        if let Err(e) = host.set_topmost(false) {
            tracing::warn!("Failed to clear always-on-top: {}", e);
        }
        Self { host }
    }
}

impl<H: WindowHost> Deref for TopmostGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: WindowHost> DerefMut for TopmostGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: WindowHost> Drop for TopmostGuard<'_, H> {
    fn drop(&mut self) {
        if let Err(e) = self.host.set_topmost(true) {
            tracing::warn!("Failed to restore always-on-top: {}", e);
        }
    }
}

/// Click-through forwarder.
///
/// The delays give the compositor time to apply the z-order and focus
/// changes; they are empirical and tunable.
#[derive(Debug, Clone, Copy)]
pub struct ClickThroughForwarder {
    pre_switch_delay: Duration,
    post_switch_delay: Duration,
}

impl ClickThroughForwarder {
    pub fn new(pre_switch_delay: Duration, post_switch_delay: Duration) -> Self {
        Self {
            pre_switch_delay,
            post_switch_delay,
        }
    }

    pub fn from_config(config: &OverlayConfig) -> Self {
        Self::new(config.pre_switch_delay(), config.post_switch_delay())
    }

    /// Forward a left click at `cursor` to the window below the overlay.
    ///
    /// Always leaves the overlay topmost, whether or not a target was found.
    pub fn forward<H: WindowHost>(&self, host: &mut H, cursor: ScreenPoint) -> ForwardOutcome {
        if !host.is_topmost() {
            if let Err(e) = host.set_topmost(true) {
                tracing::warn!("Failed to set always-on-top: {}", e);
            }
        }

        let Some(target) = host.window_from_point(cursor) else {
            tracing::debug!("No window under ({}, {}), click dropped", cursor.x, cursor.y);
            return ForwardOutcome::NoTarget;
        };

        let mut host = TopmostGuard::lower(host);
        pause(self.pre_switch_delay);

        if let Err(e) = host.activate_window(target) {
            tracing::warn!("Failed to activate window {:#x}: {}", target.raw(), e);
            return ForwardOutcome::Aborted(target);
        }
        pause(self.post_switch_delay);

        if let Err(e) = host.send_left_click() {
            tracing::warn!("Failed to inject click into {:#x}: {}", target.raw(), e);
            return ForwardOutcome::Aborted(target);
        }

        tracing::debug!("Forwarded click at ({}, {}) to {:#x}", cursor.x, cursor.y, target.raw());
        ForwardOutcome::Forwarded(target)
    }
}

impl Default for ClickThroughForwarder {
    fn default() -> Self {
        Self::from_config(&OverlayConfig::default())
    }
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHost;

    fn instant() -> ClickThroughForwarder {
        ClickThroughForwarder::new(Duration::ZERO, Duration::ZERO)
    }

    fn handle(raw: isize) -> WindowHandle {
        WindowHandle::from_raw(raw).unwrap()
    }

    #[test]
    fn test_forward_sequence() {
        let mut host = FakeHost::new();
        host.below = Some(handle(0x42));

        let outcome = instant().forward(&mut host, ScreenPoint::new(300, 300));

        assert_eq!(outcome, ForwardOutcome::Forwarded(handle(0x42)));
        assert_eq!(host.activated, vec![handle(0x42)]);
        assert_eq!(host.clicks, 1);
        assert!(host.topmost);
        assert_eq!(
            host.calls,
            vec!["topmost_off", "activate_window", "send_left_click", "topmost_on"]
        );
    }

    #[test]
    fn test_no_target_is_noop_and_stays_topmost() {
        let mut host = FakeHost::new();

        let outcome = instant().forward(&mut host, ScreenPoint::new(0, 0));

        assert_eq!(outcome, ForwardOutcome::NoTarget);
        assert_eq!(host.clicks, 0);
        assert!(host.activated.is_empty());
        assert!(host.topmost);
    }

    #[test]
    fn test_topmost_restored_when_not_topmost_before() {
        let mut host = FakeHost::new();
        host.topmost = false;

        instant().forward(&mut host, ScreenPoint::new(0, 0));
        assert!(host.topmost);
    }

    #[test]
    fn test_failed_activation_skips_click_and_restores_topmost() {
        let mut host = FakeHost::new();
        host.below = Some(handle(7));
        host.fail_activate = true;

        let outcome = instant().forward(&mut host, ScreenPoint::new(10, 10));

        assert_eq!(outcome, ForwardOutcome::Aborted(handle(7)));
        assert_eq!(host.clicks, 0);
        assert!(host.topmost);
        assert_eq!(host.calls.last(), Some(&"topmost_on"));
    }

    #[test]
    fn test_delays_are_observed() {
        let mut host = FakeHost::new();
        host.below = Some(handle(1));
        let forwarder =
            ClickThroughForwarder::new(Duration::from_millis(5), Duration::from_millis(5));

        let start = std::time::Instant::now();
        forwarder.forward(&mut host, ScreenPoint::new(1, 1));
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
