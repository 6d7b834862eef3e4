//! Persisted high score
//!
//! A single non-negative integer in LocalStorage. Read once at startup
//! (missing or corrupt values degrade to 0), written back only when the
//! finished run's score strictly beats it. The value is stored as a bare
//! decimal string for compatibility with earlier releases of the game.

/// LocalStorage key
#[allow(dead_code)]
const STORAGE_KEY: &str = "highScore";

/// Load the stored high score (WASM only). Never fails; absent or
/// unparsable entries yield 0.
#[cfg(target_arch = "wasm32")]
pub fn load() -> u32 {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if let Ok(Some(raw)) = storage.get_item(STORAGE_KEY) {
            match raw.trim().parse::<u32>() {
                Ok(score) => {
                    log::info!("Loaded high score: {score}");
                    return score;
                }
                Err(_) => {
                    log::warn!("Stored high score {raw:?} is not a number, using 0");
                }
            }
        }
    }

    0
}

/// Persist a new high score (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn save(score: u32) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        let _ = storage.set_item(STORAGE_KEY, &score.to_string());
        log::info!("High score saved: {score}");
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> u32 {
    0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_score: u32) {
    // No-op for native
}
