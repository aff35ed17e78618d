//! Output formatting for different formats.

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable, colored
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

impl OutputFormat {
    /// Print `value` as JSON or YAML. Returns `false` for [`OutputFormat::Pretty`],
    /// leaving rendering to the caller.
    pub fn print_structured<T: Serialize>(self, value: &T) -> Result<bool> {
        match self {
            Self::Json => println!("{}", serde_json::to_string_pretty(value)?),
            Self::Yaml => print!("{}", serde_yaml::to_string(value)?),
            Self::Pretty => return Ok(false),
        }
        Ok(true)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_flag_values() {
        for format in [OutputFormat::Pretty, OutputFormat::Json, OutputFormat::Yaml] {
            let parsed = OutputFormat::from_str(&format.to_string(), false).unwrap();
            assert_eq!(parsed, format);
        }
        assert!(OutputFormat::from_str("csv", false).is_err());
    }

    #[test]
    fn pretty_is_left_to_caller() {
        assert!(!OutputFormat::Pretty.print_structured(&"x").unwrap());
    }
}
