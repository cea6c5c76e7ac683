//! Bluetooth connection indicator
//!
//! Shows the Bluetooth icon while the phone is disconnected and nudges the
//! wearer with a long vibration pulse.

use super::layer::BitmapLayer;
use crate::system::Haptics;

/// When a disconnect triggers a vibration pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisconnectPulse {
    /// Pulse on every disconnected callback, repeats included
    EveryCallback,
    /// Pulse only when the link goes from connected (or unknown) to disconnected
    OnTransition,
}

pub struct ConnectionIndicator {
    policy: DisconnectPulse,
    /// Last reported state, `None` until the first update
    connected: Option<bool>,
}

impl ConnectionIndicator {
    pub fn new(policy: DisconnectPulse) -> Self {
        Self {
            policy,
            connected: None,
        }
    }

    pub fn connected(&self) -> Option<bool> {
        self.connected
    }

    /// Forget the last state, the next update counts as the initial check
    pub fn reset(&mut self) {
        self.connected = None;
    }

    /// Apply a connection state to the icon
    pub fn update<H: Haptics>(&mut self, connected: bool, icon: &mut BitmapLayer, haptics: &mut H) {
        // Show icon if disconnected
        icon.set_hidden(connected);

        let previous = self.connected.replace(connected);
        if connected {
            return;
        }

        let pulse = match self.policy {
            DisconnectPulse::EveryCallback => true,
            DisconnectPulse::OnTransition => previous != Some(false),
        };
        if pulse {
            info!("Bluetooth disconnected");
            haptics.long_pulse();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{
        layout::DisplayProfile,
        resources::{FlashResources, ImageId, ResourceStore},
    };

    #[derive(Default)]
    struct CountingHaptics {
        pulses: usize,
    }

    impl Haptics for CountingHaptics {
        fn long_pulse(&mut self) {
            self.pulses += 1;
        }
    }

    fn icon() -> BitmapLayer {
        let profile = DisplayProfile::PineTime240;
        let bitmap = FlashResources::new(profile).load_bitmap(ImageId::BluetoothIcon);
        BitmapLayer::new(profile.layout().bt_icon, bitmap)
    }

    #[test]
    fn test_connected_hides_icon_without_pulse() {
        let mut indicator = ConnectionIndicator::new(DisconnectPulse::EveryCallback);
        let mut icon = icon();
        let mut haptics = CountingHaptics::default();

        indicator.update(true, &mut icon, &mut haptics);
        assert!(icon.is_hidden());
        assert_eq!(haptics.pulses, 0);
        assert_eq!(indicator.connected(), Some(true));
    }

    #[test]
    fn test_disconnect_shows_icon_and_pulses() {
        let mut indicator = ConnectionIndicator::new(DisconnectPulse::EveryCallback);
        let mut icon = icon();
        let mut haptics = CountingHaptics::default();

        indicator.update(true, &mut icon, &mut haptics);
        indicator.update(false, &mut icon, &mut haptics);
        assert!(!icon.is_hidden());
        assert_eq!(haptics.pulses, 1);
    }

    #[test]
    fn test_every_callback_repeats_pulse() {
        let mut indicator = ConnectionIndicator::new(DisconnectPulse::EveryCallback);
        let mut icon = icon();
        let mut haptics = CountingHaptics::default();

        indicator.update(false, &mut icon, &mut haptics);
        indicator.update(false, &mut icon, &mut haptics);
        assert!(!icon.is_hidden());
        assert_eq!(haptics.pulses, 2);
    }

    #[test]
    fn test_on_transition_pulses_once_per_disconnect() {
        let mut indicator = ConnectionIndicator::new(DisconnectPulse::OnTransition);
        let mut icon = icon();
        let mut haptics = CountingHaptics::default();

        // Initial check while disconnected counts as a transition
        indicator.update(false, &mut icon, &mut haptics);
        indicator.update(false, &mut icon, &mut haptics);
        assert_eq!(haptics.pulses, 1);

        indicator.update(true, &mut icon, &mut haptics);
        indicator.update(true, &mut icon, &mut haptics);
        assert!(icon.is_hidden());
        assert_eq!(haptics.pulses, 1);

        indicator.update(false, &mut icon, &mut haptics);
        assert_eq!(haptics.pulses, 2);
        assert!(!icon.is_hidden());
    }
}
