use crate::error::PdftabError;
use crate::extraction::pdftotext::PdftotextExtractor;
use crate::writer::DelimitedWriter;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Extraction settings, loadable from a JSON file. Missing fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// pdftotext binary to invoke.
    pub pdftotext_path: PathBuf,
    /// Run pdftotext with `-layout`.
    pub layout: bool,
    /// Field delimiter for the output file.
    pub delimiter: char,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        ExtractConfig {
            pdftotext_path: PathBuf::from("pdftotext"),
            layout: true,
            delimiter: ',',
        }
    }
}

impl ExtractConfig {
    pub fn extractor(&self) -> PdftotextExtractor {
        PdftotextExtractor::new()
            .with_binary(&self.pdftotext_path)
            .with_layout(self.layout)
    }

    pub fn writer(&self) -> DelimitedWriter {
        DelimitedWriter::new(self.delimiter)
    }
}

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<ExtractConfig, PdftabError> {
    let content = std::fs::read_to_string(path).map_err(|e| PdftabError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse a config from a JSON string.
pub fn parse_config(json: &str, source: &Path) -> Result<ExtractConfig, PdftabError> {
    let config: ExtractConfig = serde_json::from_str(json).map_err(|e| PdftabError::ConfigLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a config is usable.
pub fn validate_config(config: &ExtractConfig) -> Result<(), PdftabError> {
    if !config.delimiter.is_ascii() {
        return Err(PdftabError::ConfigInvalid(format!(
            "delimiter '{}' must be an ASCII character",
            config.delimiter
        )));
    }

    if matches!(config.delimiter, '"' | '\r' | '\n') {
        return Err(PdftabError::ConfigInvalid(format!(
            "delimiter {:?} cannot be a quote or line break",
            config.delimiter
        )));
    }

    if config.pdftotext_path.as_os_str().is_empty() {
        return Err(PdftabError::ConfigInvalid(
            "pdftotext_path must not be empty".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse_config(r#"{ "delimiter": ";" }"#, Path::new("t.json")).unwrap();
        assert_eq!(config.delimiter, ';');
        assert!(config.layout);
        assert_eq!(config.pdftotext_path, PathBuf::from("pdftotext"));
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = parse_config("{}", Path::new("t.json")).unwrap();
        assert_eq!(config, ExtractConfig::default());
    }

    #[test]
    fn test_rejects_quote_delimiter() {
        let err = parse_config(r#"{ "delimiter": "\"" }"#, Path::new("t.json")).unwrap_err();
        assert!(matches!(err, PdftabError::ConfigInvalid(_)));
    }

    #[test]
    fn test_rejects_non_ascii_delimiter() {
        let err = parse_config(r#"{ "delimiter": "§" }"#, Path::new("t.json")).unwrap_err();
        assert!(matches!(err, PdftabError::ConfigInvalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_config("{ layout: yes", Path::new("bad.json")).unwrap_err();
        match err {
            PdftabError::ConfigLoad { path, .. } => assert_eq!(path, PathBuf::from("bad.json")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/nonexistent/pdftab.json")).unwrap_err();
        assert!(matches!(err, PdftabError::ConfigLoad { .. }));
    }
}
