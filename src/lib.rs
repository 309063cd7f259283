pub mod allocator;
pub mod config;
pub mod error;
#[cfg(not(target_arch = "wasm32"))]
pub mod printer;
pub mod sampling;
pub mod shuffle;
pub mod types;

pub use allocator::Allocator;
pub use config::ShuffleConfig;
pub use error::{ConfigError, ShuffleError};
pub use sampling::RandomSource;
pub use shuffle::{Shuffle, ShuffleReport};
pub use types::*;

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Run a seeded shuffle from settings JSON and return the report as JSON
#[wasm_bindgen]
pub fn shuffle_groups(config_json: &str, seed: u64) -> Result<String, JsValue> {
    let config = ShuffleConfig::from_json(config_json)
        .map_err(|e| JsValue::from_str(&format!("Config parse error: {}", e)))?;
    let report = run_seeded(&config, seed)
        .map_err(|e| JsValue::from_str(&format!("Shuffle error: {}", e)))?;

    serde_json::to_string(&report)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Get default config as JSON
#[wasm_bindgen]
pub fn default_config() -> String {
    serde_json::to_string(&ShuffleConfig::default()).unwrap_or_default()
}

/// Validate, shuffle with `StdRng` seeded from `seed`, and report
pub fn run_seeded(config: &ShuffleConfig, seed: u64) -> Result<ShuffleReport, ShuffleError> {
    let mut shuffle = Shuffle::new(config)?;
    let mut rng = StdRng::seed_from_u64(seed);
    shuffle.run(&mut rng)?;
    Ok(shuffle.report())
}
