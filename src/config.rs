//! Named clade definitions for clade queries.
//!
//! Clades are read from TOML:
//! ```toml
//! [[clade]]
//! name = "Porifera"
//! taxa = ["Oscarella_carmela", "Sycon_ciliatum", "Amphimedon_queenslandica"]
//!
//! [[clade]]
//! name = "Ratites"
//! taxa = ["Kiwi", "Emu", "Ostrich"]
//! ```
//! or given inline as `NAME=TAXON,TAXON,...` (see [CladeSpec::from_str]).

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Error while loading clade definitions.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read clade config - {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid clade config - {0}")]
    Toml(#[from] toml::de::Error),
    #[error("clade {0:?} defined more than once")]
    DuplicateClade(String),
    #[error("clade {0:?} has no taxa")]
    EmptyClade(String),
    #[error("invalid clade definition {0:?}, expected NAME=TAXON,TAXON,...")]
    InvalidSpec(String),
}

/// A named set of taxa (leaf labels).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CladeSpec {
    pub name: String,
    pub taxa: Vec<String>,
}

impl FromStr for CladeSpec {
    type Err = ConfigError;

    /// Parses `NAME=TAXON,TAXON,...`; surrounding whitespace is trimmed.
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let (name, taxa) = spec
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidSpec(spec.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::InvalidSpec(spec.to_string()));
        }

        let taxa: Vec<String> = taxa
            .split(',')
            .map(str::trim)
            .filter(|taxon| !taxon.is_empty())
            .map(String::from)
            .collect();
        if taxa.is_empty() {
            return Err(ConfigError::EmptyClade(name.to_string()));
        }

        Ok(CladeSpec {
            name: name.to_string(),
            taxa,
        })
    }
}

/// A validated list of clade definitions: names are unique and
/// every clade has at least one taxon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawCladeConfig")]
pub struct CladeConfig {
    clades: Vec<CladeSpec>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCladeConfig {
    #[serde(default, rename = "clade")]
    clades: Vec<CladeSpec>,
}

impl TryFrom<RawCladeConfig> for CladeConfig {
    type Error = ConfigError;

    fn try_from(raw: RawCladeConfig) -> Result<Self, Self::Error> {
        Self::from_clades(raw.clades)
    }
}

impl CladeConfig {
    /// Creates a config from the given clades, validating them.
    pub fn from_clades(clades: Vec<CladeSpec>) -> Result<Self, ConfigError> {
        let mut names = HashSet::new();
        for clade in &clades {
            if clade.taxa.is_empty() {
                return Err(ConfigError::EmptyClade(clade.name.clone()));
            }
            if !names.insert(clade.name.as_str()) {
                return Err(ConfigError::DuplicateClade(clade.name.clone()));
            }
        }

        Ok(Self { clades })
    }

    /// Parses clade definitions from a TOML string.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        // Validation errors surface as TOML errors through `try_from`
        Ok(toml::from_str(toml)?)
    }

    /// Reads clade definitions from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Adds another clade.
    ///
    /// # Errors
    /// [ConfigError::DuplicateClade] if a clade with that name exists.
    pub fn push(&mut self, clade: CladeSpec) -> Result<(), ConfigError> {
        if self.get(&clade.name).is_some() {
            return Err(ConfigError::DuplicateClade(clade.name));
        }
        self.clades.push(clade);
        Ok(())
    }

    /// Returns all clades in definition order.
    pub fn clades(&self) -> &[CladeSpec] {
        &self.clades
    }

    /// Returns the clade with the given name.
    pub fn get(&self, name: &str) -> Option<&CladeSpec> {
        self.clades.iter().find(|clade| clade.name == name)
    }

    /// Returns whether no clade is defined.
    pub fn is_empty(&self) -> bool {
        self.clades.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml() {
        let config = CladeConfig::from_toml_str(
            r#"
            [[clade]]
            name = "Ratites"
            taxa = ["Kiwi", "Emu", "Ostrich"]

            [[clade]]
            name = "Kiwis"
            taxa = ["Apteryx_haastii", "Apteryx_owenii"]
            "#,
        )
        .unwrap();

        assert_eq!(config.clades().len(), 2);
        assert_eq!(config.get("Ratites").unwrap().taxa, vec!["Kiwi", "Emu", "Ostrich"]);
        assert!(config.get("Penguins").is_none());
    }

    #[test]
    fn test_empty_toml() {
        assert!(CladeConfig::from_toml_str("").unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_clade_in_toml() {
        let result = CladeConfig::from_toml_str(
            r#"
            [[clade]]
            name = "Ratites"
            taxa = ["Kiwi"]

            [[clade]]
            name = "Ratites"
            taxa = ["Emu"]
            "#,
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_empty_taxa() {
        let err = CladeConfig::from_clades(vec![CladeSpec {
            name: "Moa".to_string(),
            taxa: vec![],
        }])
        .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyClade(name) if name == "Moa"));
    }

    #[test]
    fn test_clade_spec_from_str() {
        let spec: CladeSpec = " Ratites = Kiwi, Emu ,Ostrich ".parse().unwrap();
        assert_eq!(spec.name, "Ratites");
        assert_eq!(spec.taxa, vec!["Kiwi", "Emu", "Ostrich"]);

        assert!(matches!(
            "Ratites".parse::<CladeSpec>(),
            Err(ConfigError::InvalidSpec(_))
        ));
        assert!(matches!(
            "=Kiwi".parse::<CladeSpec>(),
            Err(ConfigError::InvalidSpec(_))
        ));
        assert!(matches!(
            "Ratites=,".parse::<CladeSpec>(),
            Err(ConfigError::EmptyClade(_))
        ));
    }

    #[test]
    fn test_push_duplicate() {
        let mut config = CladeConfig::default();
        config.push("A=x".parse().unwrap()).unwrap();
        assert!(matches!(
            config.push("A=y".parse().unwrap()),
            Err(ConfigError::DuplicateClade(_))
        ));
    }
}
