use crate::utils::error::{Result, RxError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-service endpoints and credentials, loaded from a TOML file. Keys are
/// written as `${ENV_VAR}` placeholders so they stay out of the file itself;
/// everything is injected into the adapter constructors from here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    pub ocr: OcrConfig,
    pub reasoning: ReasoningConfig,
    pub geocoding: GeocodingConfig,
    pub ip_location: IpLocationConfig,
    pub places: PlacesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    pub endpoint: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    pub endpoint: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpLocationConfig {
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    pub endpoint: String,
    pub api_key: String,
    pub radius_meters: Option<u32>,
    pub category: Option<String>,
}

impl ServicesConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| RxError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` placeholders with environment values. Unset
    /// variables are left as-is so validation reports them by field name.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").expect("env placeholder regex");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn radius_meters(&self) -> u32 {
        self.places.radius_meters.unwrap_or(5000)
    }

    pub fn category(&self) -> &str {
        self.places.category.as_deref().unwrap_or("doctor")
    }
}

impl Validate for ServicesConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("ocr.endpoint", &self.ocr.endpoint)?;
        validation::validate_non_empty_string("ocr.api_key", &self.ocr.api_key)?;

        validation::validate_url("reasoning.endpoint", &self.reasoning.endpoint)?;
        validation::validate_non_empty_string("reasoning.api_key", &self.reasoning.api_key)?;
        validation::validate_non_empty_string("reasoning.model", &self.reasoning.model)?;

        validation::validate_url("geocoding.endpoint", &self.geocoding.endpoint)?;
        validation::validate_non_empty_string("geocoding.api_key", &self.geocoding.api_key)?;

        validation::validate_url("ip_location.endpoint", &self.ip_location.endpoint)?;

        validation::validate_url("places.endpoint", &self.places.endpoint)?;
        validation::validate_non_empty_string("places.api_key", &self.places.api_key)?;
        if let Some(radius) = self.places.radius_meters {
            validation::validate_range("places.radius_meters", radius, 100, 50_000)?;
        }
        if let Some(category) = &self.places.category {
            validation::validate_non_empty_string("places.category", category)?;
        }

        // A leftover placeholder means the environment variable was not set.
        for (field, value) in [
            ("ocr.api_key", &self.ocr.api_key),
            ("reasoning.api_key", &self.reasoning.api_key),
            ("geocoding.api_key", &self.geocoding.api_key),
            ("places.api_key", &self.places.api_key),
        ] {
            if value.starts_with("${") {
                return Err(RxError::MissingConfigError {
                    field: field.to_string(),
                });
            }
        }

        Ok(())
    }
}
