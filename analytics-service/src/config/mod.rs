use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub internal_api: InternalApiConfig,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: Secret<String>,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Gemini model used for widget generation (e.g., gemini-2.0-flash-exp)
    pub text_model: String,
}

#[derive(Debug, Clone)]
pub struct InternalApiConfig {
    /// Base URL of the internal service cluster (leads, Sankhya listings).
    pub base_url: String,
}

impl AnalyticsConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(AnalyticsConfig {
            common,
            google: GoogleConfig {
                api_key: Secret::new(get_env("GEMINI_API_KEY", Some(""), is_prod)?),
            },
            models: ModelConfig {
                text_model: get_env("GEMINI_TEXT_MODEL", Some("gemini-2.0-flash-exp"), is_prod)?,
            },
            internal_api: InternalApiConfig {
                base_url: get_env(
                    "INTERNAL_API_BASE_URL",
                    Some("http://localhost:5000"),
                    is_prod,
                )?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
