//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honored for local development.

use crate::services::claim::ClaimPolicy;
use crate::services::territory::DEFAULT_MIN_AREA_SQ_KM;
use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Allowed CORS origins; `*` allows any origin without credentials
    pub cors_origins: Vec<String>,
    /// GeoJSON file with sponsored zones
    pub brand_territories_path: String,
    /// Loops smaller than this are not territories (km²)
    pub min_territory_area_sq_km: f64,
    /// How contested claims are decided
    pub claim_policy: ClaimPolicy,
}

impl Config {
    /// Config for tests: no network, default rules.
    pub fn test_default() -> Self {
        Self {
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            cors_origins: vec!["http://localhost:3000".to_string()],
            brand_territories_path: "data/brand_territories.geojson".to_string(),
            min_territory_area_sq_km: DEFAULT_MIN_AREA_SQ_KM,
            claim_policy: ClaimPolicy::Unconditional,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            cors_origins: parse_origins(&env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".into())),
            brand_territories_path: env::var("BRAND_TERRITORIES_PATH")
                .unwrap_or_else(|_| "data/brand_territories.geojson".to_string()),
            min_territory_area_sq_km: match env::var("MIN_TERRITORY_AREA_SQ_KM") {
                Ok(raw) => parse_non_negative("MIN_TERRITORY_AREA_SQ_KM", &raw)?,
                Err(_) => DEFAULT_MIN_AREA_SQ_KM,
            },
            claim_policy: match env::var("CLAIM_MIN_OVERLAP") {
                Ok(raw) => parse_claim_policy(&raw)?,
                Err(_) => ClaimPolicy::Unconditional,
            },
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_non_negative(name: &'static str, raw: &str) -> Result<f64, ConfigError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(ConfigError::Invalid(name, raw.to_string())),
    }
}

/// Empty or `0` keeps claims unconditional; otherwise a fraction in (0, 1].
fn parse_claim_policy(raw: &str) -> Result<ClaimPolicy, ConfigError> {
    if raw.trim().is_empty() {
        return Ok(ClaimPolicy::Unconditional);
    }
    let fraction = parse_non_negative("CLAIM_MIN_OVERLAP", raw)?;
    if fraction == 0.0 {
        Ok(ClaimPolicy::Unconditional)
    } else if fraction <= 1.0 {
        Ok(ClaimPolicy::MinOverlap { fraction })
    } else {
        Err(ConfigError::Invalid("CLAIM_MIN_OVERLAP", raw.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
