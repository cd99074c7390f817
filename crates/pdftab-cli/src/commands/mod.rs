pub mod extract;
pub mod rows;
pub mod scan;

use pdftab_core::config::{self, ExtractConfig};
use pdftab_core::error::PdftabError;

use crate::ExtractOptions;

/// Resolve the effective config: file (if given), then command-line overrides.
pub fn resolve_config(options: &ExtractOptions) -> Result<ExtractConfig, PdftabError> {
    let mut config = match &options.config {
        Some(path) => config::load_config(path)?,
        None => ExtractConfig::default(),
    };

    if let Some(delimiter) = options.delimiter {
        config.delimiter = delimiter;
    }
    if let Some(ref binary) = options.pdftotext {
        config.pdftotext_path = binary.clone();
    }
    if options.no_layout {
        config.layout = false;
    }

    config::validate_config(&config)?;
    tracing::debug!(?config, "resolved extraction config");
    Ok(config)
}
