use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = ".web3-typegen.toml";

/// Configuration for web3-typegen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypegenConfig {
    #[serde(default)]
    pub output: OutputOptions,
    #[serde(default)]
    pub input: InputOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    #[serde(default = "default_out_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_out_extension")]
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputOptions {
    #[serde(default = "default_input_extensions")]
    pub extensions: Vec<String>,
    pub ignore: Option<Vec<String>>,
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("types/web3")
}

fn default_out_extension() -> String {
    "d.ts".to_string()
}

fn default_input_extensions() -> Vec<String> {
    vec!["json".to_string(), "abi".to_string()]
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            dir: default_out_dir(),
            extension: default_out_extension(),
        }
    }
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            extensions: default_input_extensions(),
            ignore: None,
        }
    }
}

impl Default for TypegenConfig {
    fn default() -> Self {
        Self {
            output: OutputOptions::default(),
            input: InputOptions::default(),
        }
    }
}

impl TypegenConfig {
    /// Load config from file or use defaults
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        if let Some(path) = config_path {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            let config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path))?;
            debug!(path, "loaded config");
            Ok(config)
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            let content = fs::read_to_string(DEFAULT_CONFIG_FILE)?;
            toml::from_str(&content).context("Failed to parse .web3-typegen.toml")
        } else {
            Ok(Self::default())
        }
    }

    /// Check if a path should be ignored
    pub fn should_ignore(&self, path: &str) -> bool {
        let normalized = path.replace('\\', "/");
        self.input
            .ignore
            .as_ref()
            .map_or(false, |paths| paths.iter().any(|p| normalized.contains(p.as_str())))
    }

    /// Whether a file looks like an ABI input by its extension
    pub fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| {
                self.input
                    .extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }

    /// Where the declaration for `contract_name` is written
    pub fn output_path(&self, contract_name: &str) -> PathBuf {
        let extension = self.output.extension.trim_start_matches('.');
        self.output
            .dir
            .join(format!("{}.{}", contract_name, extension))
    }

    /// Save config to file
    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TypegenConfig::default();
        assert_eq!(config.output.dir, PathBuf::from("types/web3"));
        assert_eq!(
            config.output_path("Token"),
            PathBuf::from("types/web3/Token.d.ts")
        );
        assert!(config.accepts_extension(Path::new("abi/Token.json")));
        assert!(config.accepts_extension(Path::new("abi/Token.ABI")));
        assert!(!config.accepts_extension(Path::new("abi/Token.sol")));
        assert!(!config.accepts_extension(Path::new("abi/README")));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: TypegenConfig = toml::from_str(
            r#"
            [output]
            dir = "generated"
            "#,
        )
        .unwrap();
        assert_eq!(config.output.dir, PathBuf::from("generated"));
        assert_eq!(config.output.extension, "d.ts");
        assert_eq!(config.input, InputOptions::default());
    }

    #[test]
    fn test_output_extension_leading_dot() {
        let mut config = TypegenConfig::default();
        config.output.extension = ".ts".to_string();
        assert_eq!(
            config.output_path("Token"),
            PathBuf::from("types/web3/Token.ts")
        );
    }

    #[test]
    fn test_ignore_paths() {
        let mut config = TypegenConfig::default();
        config.input.ignore = Some(vec!["node_modules/".to_string(), "build/".to_string()]);
        assert!(config.should_ignore("node_modules/pkg/Token.json"));
        assert!(config.should_ignore("contracts\\build\\Token.json"));
        assert!(!config.should_ignore("abi/Token.json"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typegen.toml");
        let path = path.to_str().unwrap();

        let mut config = TypegenConfig::default();
        config.input.ignore = Some(vec!["vendor/".to_string()]);
        config.save(path).unwrap();

        assert_eq!(TypegenConfig::load(Some(path)).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = TypegenConfig::load(Some("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
