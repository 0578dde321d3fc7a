//! `tslx.toml` project configuration
//!
//! ```toml
//! [compiler]
//! root_dir = "src"
//! out_dir = "dist"
//! include = ["src"]
//!
//! [extensions]
//! replaceDotWithDash = true
//! simplifyDelete = true
//! ```
//!
//! Relative paths are taken from the directory holding the config file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tslx_transform::ExtensionOptions;

pub const DEFAULT_CONFIG_FILE: &str = "tslx.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub compiler: CompilerConfig,
    pub extensions: ExtensionOptions,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub root_dir: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    /// Files and directories to compile
    pub include: Vec<PathBuf>,
    /// Declarations file for the intrinsics, instead of the bundled one
    pub declarations: Option<PathBuf>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            root_dir: None,
            out_dir: None,
            include: vec![PathBuf::from(".")],
            declarations: None,
        }
    }
}

impl ProjectConfig {
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path`, or the defaults if it does not exist. Relative paths in
    /// the result are resolved against the config file's directory.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        let base = path.parent().unwrap_or(Path::new("."));
        if !path.exists() {
            log::debug!("{} not found, using defaults", path.display());
            return Ok(Self::default().resolved(base));
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text, path)?.resolved(base))
    }

    fn resolved(mut self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };
        self.compiler.root_dir = self.compiler.root_dir.map(resolve);
        self.compiler.out_dir = self.compiler.out_dir.map(resolve);
        self.compiler.declarations = self.compiler.declarations.map(resolve);
        self.compiler.include = self.compiler.include.into_iter().map(resolve).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProjectConfig::parse("", Path::new("tslx.toml")).unwrap();
        assert_eq!(config.compiler.include, vec![PathBuf::from(".")]);
        assert_eq!(config.extensions, ExtensionOptions::default());
    }

    #[test]
    fn test_parse_sections() {
        let text = r#"
            [compiler]
            out_dir = "dist"
            include = ["src", "test"]

            [extensions]
            replaceDotWithDash = true
            warnUseDoubleEquals = true
        "#;
        let config = ProjectConfig::parse(text, Path::new("tslx.toml")).unwrap();
        assert_eq!(config.compiler.out_dir, Some(PathBuf::from("dist")));
        assert_eq!(config.compiler.include.len(), 2);
        assert!(config.extensions.replace_dot_with_dash);
        assert!(config.extensions.warn_use_double_equals);
        assert!(!config.extensions.simplify_delete);
    }

    #[test]
    fn test_relative_paths_follow_config_location() {
        let config = ProjectConfig::parse("[compiler]\nout_dir = \"dist\"\n", Path::new("/p/tslx.toml"))
            .unwrap()
            .resolved(Path::new("/p"));
        assert_eq!(config.compiler.out_dir, Some(PathBuf::from("/p/dist")));
        assert_eq!(config.compiler.include, vec![PathBuf::from("/p/.")]);
    }

    #[test]
    fn test_invalid_config() {
        let err = ProjectConfig::parse("[compiler\n", Path::new("tslx.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
