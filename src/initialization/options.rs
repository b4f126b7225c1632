//! Options file loading.

use std::path::Path;

use log::debug;

use crate::config::ClientOptions;
use crate::error_handling::InitializationError;

/// Reads `ClientOptions` from a JSON document.
///
/// Missing keys keep their defaults and unknown keys are ignored, so a file
/// only needs the settings it changes:
///
/// ```json
/// { "max_redirects": 3, "transport_options": { "proxy": "http://127.0.0.1:3128" } }
/// ```
///
/// # Errors
///
/// `OptionsFileError` if the file cannot be read, `OptionsParseError` if it
/// is not a valid options document.
pub fn load_client_options(path: impl AsRef<Path>) -> Result<ClientOptions, InitializationError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let options: ClientOptions = serde_json::from_str(&content)?;
    debug!("Loaded client options from {}", path.display());
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_partial_options_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            r#"{{"max_redirects": 2, "use_cookies": false, "transport_options": {{"timeout": 1}}}}"#
        )
        .expect("write options");

        let options = load_client_options(file.path()).expect("valid options file");
        assert_eq!(options.max_redirects, 2);
        assert!(!options.use_cookies);
        assert!(options.follow_redirects);
        assert_eq!(options.transport_options["timeout"], serde_json::json!(1));
    }

    #[test]
    fn test_missing_file() {
        let err = load_client_options("/nonexistent/wire_client/options.json")
            .expect_err("file does not exist");
        assert!(matches!(err, InitializationError::OptionsFileError(_)));
    }

    #[test]
    fn test_invalid_document() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"timeout": "ten"}}"#).expect("write options");
        let err = load_client_options(file.path()).expect_err("timeout must be a number");
        assert!(matches!(err, InitializationError::OptionsParseError(_)));
    }
}
