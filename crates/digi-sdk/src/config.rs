use std::path::Path;

use serde::{Deserialize, Serialize};

use digi_crypto::{HashAlgorithm, HashEngine};

use crate::error::{SdkError, SdkResult};

/// Session settings, usually read from a TOML file.
///
/// ```toml
/// hash_algorithm = "sha256"
/// delimiter = ","
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DigiConfig {
    /// Digest used for tree nodes and object IDs.
    pub hash_algorithm: HashAlgorithm,
    /// Separator used when splitting a word list into tree contents.
    pub delimiter: char,
}

impl Default for DigiConfig {
    fn default() -> Self {
        Self {
            hash_algorithm: HashAlgorithm::Sha256,
            delimiter: ',',
        }
    }
}

impl DigiConfig {
    /// Load a config file. Missing keys take their default values.
    pub fn load(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| SdkError::Config(format!("{}: {e}", path.display())))
    }

    pub fn from_toml_str(text: &str) -> SdkResult<Self> {
        toml::from_str(text).map_err(|e| SdkError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> SdkResult<String> {
        toml::to_string(self).map_err(|e| SdkError::Serialization(e.to_string()))
    }

    /// The hash engine selected by this config.
    pub fn engine(&self) -> HashEngine {
        HashEngine::new(self.hash_algorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = DigiConfig::default();
        assert_eq!(c.hash_algorithm, HashAlgorithm::Sha256);
        assert_eq!(c.delimiter, ',');
        assert_eq!(c.engine(), HashEngine::SHA256);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(DigiConfig::from_toml_str("").unwrap(), DigiConfig::default());
    }

    #[test]
    fn parses_all_keys() {
        let c = DigiConfig::from_toml_str("hash_algorithm = \"blake3\"\ndelimiter = \";\"\n").unwrap();
        assert_eq!(c.hash_algorithm, HashAlgorithm::Blake3);
        assert_eq!(c.delimiter, ';');
        assert_eq!(c.engine(), HashEngine::BLAKE3);
    }

    #[test]
    fn rejects_unknown_keys_and_algorithms() {
        assert!(matches!(
            DigiConfig::from_toml_str("cache_size = 10"),
            Err(SdkError::Config(_))
        ));
        assert!(matches!(
            DigiConfig::from_toml_str("hash_algorithm = \"md5\""),
            Err(SdkError::Config(_))
        ));
    }

    #[test]
    fn toml_string_parses_back() {
        let c = DigiConfig {
            hash_algorithm: HashAlgorithm::Blake3,
            delimiter: '|',
        };
        let text = c.to_toml_string().unwrap();
        assert_eq!(DigiConfig::from_toml_str(&text).unwrap(), c);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hash_algorithm = \"blake3\"").unwrap();
        let c = DigiConfig::load(file.path()).unwrap();
        assert_eq!(c.hash_algorithm, HashAlgorithm::Blake3);
        assert_eq!(c.delimiter, ',');
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DigiConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, SdkError::Io(_)));
    }
}
