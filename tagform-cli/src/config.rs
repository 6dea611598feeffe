use crate::constants::TAGFORM_CLI;
use confy::ConfyError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tagform_core::{EngineConfig, TemplateEngine};

#[derive(Serialize, Deserialize, Default)]
pub struct TagformCliConfig {
    pub engine: EngineConfig,
}

/// The engine settings of the stored CLI configuration, once they pass the engine checks.
pub fn stored_engine_config(
    stored: Result<TagformCliConfig, ConfyError>,
) -> Result<EngineConfig, String> {
    let engine = stored.map_err(|e| e.to_string())?.engine;
    engine.check().map_err(|e| e.to_string())?;
    Ok(engine)
}

/// Builds the engine from `--config` when given, otherwise from the stored CLI settings.
pub fn get_engine(config_path: Option<&str>) -> TemplateEngine {
    let config = match config_path {
        Some(path) => EngineConfig::load(Path::new(path)).map_err(|e| e.to_string()),
        None => stored_engine_config(confy::load(TAGFORM_CLI, None)),
    };

    match config {
        Ok(config) => TemplateEngine::new(config),
        Err(e) => {
            eprintln!("Error: Problem loading config: {}. Exiting...", e);
            std::process::exit(exitcode::CONFIG);
        }
    }
}
