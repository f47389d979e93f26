//! Best score persistence
//!
//! A single all-time best. In the browser it lives in LocalStorage as a plain
//! integer string; natively it can be kept in a small JSON file.

use serde::{Deserialize, Serialize};

/// All-time best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BestScore {
    pub value: u64,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    const STORAGE_KEY: &'static str = "floating-dodge-highscore-points";

    pub fn new(value: u64) -> Self {
        Self { value }
    }

    /// Record a finished run's score; returns true if it set a new best
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.value {
            log::info!("New best score: {} (was {})", score, self.value);
            self.value = score;
            true
        } else {
            false
        }
    }

    /// Parse the stored representation; anything unreadable counts as no best yet
    pub fn parse(raw: &str) -> Self {
        Self {
            value: raw.trim().parse().unwrap_or(0),
        }
    }

    /// Load from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                let best = Self::parse(&raw);
                log::info!("Loaded best score {}", best.value);
                return best;
            }
        }

        log::info!("No best score found, starting fresh");
        Self::default()
    }

    /// Save to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if storage
                .set_item(Self::STORAGE_KEY, &self.value.to_string())
                .is_err()
            {
                log::warn!("Failed to save best score");
            }
        }
    }

    /// Load from a JSON file; a missing or corrupt file yields zero
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No best score at {} ({}), starting fresh", path.display(), e);
                return Self::default();
            }
        };
        match serde_json::from_str::<BestScore>(&json) {
            Ok(best) => {
                log::info!("Loaded best score {} from {}", best.value, path.display());
                best
            }
            Err(e) => {
                log::warn!("Ignoring unreadable best score file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save to a JSON file; failures are logged, not fatal
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) {
        let path = path.as_ref();
        let result = serde_json::to_string(self)
            .map_err(std::io::Error::from)
            .and_then(|json| std::fs::write(path, json));
        match result {
            Ok(()) => log::info!("Best score saved to {}", path.display()),
            Err(e) => log::warn!("Failed to save best score to {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_only_improvements() {
        let mut best = BestScore::new(100);
        assert!(!best.record(100));
        assert!(!best.record(50));
        assert!(best.record(101));
        assert_eq!(best.value, 101);
    }

    #[test]
    fn test_parse_plain_integer() {
        assert_eq!(BestScore::parse("1234").value, 1234);
        assert_eq!(BestScore::parse(" 77\n").value, 77);
        assert_eq!(BestScore::parse("garbage").value, 0);
        assert_eq!(BestScore::parse("").value, 0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_round_trip_and_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("best.json");
        assert_eq!(BestScore::load_from(&path), BestScore::default());

        BestScore::new(4200).save_to(&path);
        assert_eq!(BestScore::load_from(&path).value, 4200);

        std::fs::write(&path, "{ not json").expect("write");
        assert_eq!(BestScore::load_from(&path), BestScore::default());
    }
}
