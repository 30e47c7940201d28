use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::CityPopError;

/// How the dashboard treats numeric fields that fail to coerce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoercionMode {
    /// Keep the record; the field becomes NaN.
    #[default]
    Lenient,
    /// Drop the record.
    Strict,
}

impl FromStr for CoercionMode {
    type Err = CityPopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(CoercionMode::Lenient),
            "strict" => Ok(CoercionMode::Strict),
            other => Err(CityPopError::Config(format!(
                "NUMERIC_COERCION must be 'lenient' or 'strict', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for CoercionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercionMode::Lenient => write!(f, "lenient"),
            CoercionMode::Strict => write!(f, "strict"),
        }
    }
}

/// Application configuration loaded from environment variables.
///
/// Every variable is optional; missing ones fall back to local-development
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    // Query service
    pub api_host: String,
    pub api_port: u16,
    pub database_url: String,
    /// Serve a JSON seed file from memory instead of Postgres.
    pub seed_file: Option<String>,

    // Dashboard
    pub web_host: String,
    pub web_port: u16,
    pub api_url: String,
    pub coercion: CoercionMode,
}

impl Config {
    pub fn from_env() -> Result<Self, CityPopError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CityPopError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            api_host: or("HOST", "0.0.0.0"),
            api_port: parse_port("PORT", &or("PORT", "5000"))?,
            database_url: or("DATABASE_URL", "postgres://localhost:5432/population"),
            seed_file: lookup("SEED_FILE").filter(|path| !path.trim().is_empty()),
            web_host: or("WEB_HOST", "0.0.0.0"),
            web_port: parse_port("WEB_PORT", &or("WEB_PORT", "3000"))?,
            api_url: or("API_URL", "http://localhost:5000/api/data/getAll"),
            coercion: or("NUMERIC_COERCION", "lenient").parse()?,
        })
    }

    pub fn api_addr(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    pub fn web_addr(&self) -> String {
        format!("{}:{}", self.web_host, self.web_port)
    }
}

fn parse_port(key: &str, value: &str) -> Result<u16, CityPopError> {
    value
        .trim()
        .parse()
        .map_err(|_| CityPopError::Config(format!("{key} must be a port number, got '{value}'")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_with(vars: &[(&str, &str)]) -> Result<Config, CityPopError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_with(&[]).unwrap();
        assert_eq!(config.api_port, 5000);
        assert_eq!(config.web_port, 3000);
        assert_eq!(config.database_url, "postgres://localhost:5432/population");
        assert_eq!(config.api_url, "http://localhost:5000/api/data/getAll");
        assert_eq!(config.coercion, CoercionMode::Lenient);
        assert_eq!(config.seed_file, None);
        assert_eq!(config.api_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn env_overrides_defaults() {
        let config = config_with(&[("PORT", "8000"), ("NUMERIC_COERCION", "Strict")]).unwrap();
        assert_eq!(config.api_port, 8000);
        assert_eq!(config.coercion, CoercionMode::Strict);
    }

    #[test]
    fn invalid_port_is_a_config_error() {
        let err = config_with(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, CityPopError::Config(_)));
    }

    #[test]
    fn unknown_coercion_mode_is_rejected() {
        assert!(config_with(&[("NUMERIC_COERCION", "loose")]).is_err());
    }
}
