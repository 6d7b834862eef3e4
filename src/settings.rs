//! Game settings and preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

/// Which input scheme drives the character. One mode is authoritative
/// per session; the other's events are ignored by the sim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlMode {
    /// Arrow keys with acceleration/friction physics
    #[default]
    Keys,
    /// Absolute pointer position / touch drag, bypassing velocity
    Pointer,
}

impl ControlMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMode::Keys => "Keys",
            ControlMode::Pointer => "Pointer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "keys" | "keyboard" => Some(ControlMode::Keys),
            "pointer" | "touch" | "mouse" => Some(ControlMode::Pointer),
            _ => None,
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Authoritative control scheme
    pub controls: ControlMode,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute while the tab is hidden
    pub mute_on_hidden: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            controls: ControlMode::Keys,
            master_volume: 0.8,
            sfx_volume: 1.0,
            mute_on_hidden: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "snack_dash_settings";

    /// Effective sound-effect volume
    pub fn effective_sfx_volume(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Volume for an effect fired right now. Events drained on the frame
    /// of an auto-resume can play while the tab is still reported hidden.
    pub fn sound_volume(&self, tab_hidden: bool) -> f32 {
        if tab_hidden && self.mute_on_hidden {
            0.0
        } else {
            self.effective_sfx_volume()
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_volume_scales_master_and_sfx() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            ..Settings::default()
        };
        assert_eq!(settings.sound_volume(false), 0.25);
    }

    #[test]
    fn test_hidden_tab_mutes_when_configured() {
        let settings = Settings::default();
        assert_eq!(settings.sound_volume(true), 0.0);

        let settings = Settings {
            mute_on_hidden: false,
            ..Settings::default()
        };
        assert_eq!(settings.sound_volume(true), settings.effective_sfx_volume());
    }

    #[test]
    fn test_control_mode_names_round_trip() {
        for mode in [ControlMode::Keys, ControlMode::Pointer] {
            assert_eq!(ControlMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(ControlMode::from_str("touch"), Some(ControlMode::Pointer));
        assert!(ControlMode::from_str("gamepad").is_none());
    }
}
