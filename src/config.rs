//! Configuration handling for the funnel

use crate::state::WizardPlan;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default gateway address (local backend stack)
const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:54321";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User configuration for the funnel
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FunnelConfig {
    /// Gateway base URL
    pub gateway_url: Option<String>,
    /// Gateway API key
    pub gateway_api_key: Option<String>,
    /// Wizard variant: "standard" or "extended"
    pub wizard_variant: Option<String>,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: Option<u64>,
}

impl FunnelConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "funnel", "funnel-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: FunnelConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Gateway base URL; environment wins over file, then the default
    pub fn gateway_url(&self) -> String {
        std::env::var("FUNNEL_GATEWAY_URL")
            .ok()
            .or_else(|| self.gateway_url.clone())
            .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string())
    }

    /// Gateway API key; environment wins over file
    pub fn gateway_api_key(&self) -> String {
        std::env::var("FUNNEL_GATEWAY_API_KEY")
            .ok()
            .or_else(|| self.gateway_api_key.clone())
            .unwrap_or_default()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// The configured wizard plan; the richer extended funnel is the
    /// default.
    pub fn wizard_plan(&self) -> WizardPlan {
        match self.wizard_variant.as_deref() {
            Some("standard") => WizardPlan::standard(),
            _ => WizardPlan::extended(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FunnelConfig::default();
        assert!(config.gateway_url.is_none());
        assert!(config.gateway_api_key.is_none());
        assert!(config.wizard_variant.is_none());
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_serialization_round_trip() {
        let config = FunnelConfig {
            gateway_url: Some("https://example.supabase.co".to_string()),
            gateway_api_key: Some("anon-key".to_string()),
            wizard_variant: Some("standard".to_string()),
            request_timeout_secs: Some(10),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: FunnelConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.gateway_url, config.gateway_url);
        assert_eq!(parsed.gateway_api_key, config.gateway_api_key);
        assert_eq!(parsed.wizard_variant, Some("standard".to_string()));
        assert_eq!(parsed.request_timeout_secs, Some(10));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: FunnelConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.gateway_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"gateway_url": "http://localhost:54321", "unknown_field": "value"}"#;
        let parsed: FunnelConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.gateway_url, Some("http://localhost:54321".to_string()));
    }

    #[test]
    fn test_wizard_plan_selection() {
        let mut config = FunnelConfig::default();
        assert_eq!(config.wizard_plan().steps().len(), 13);
        config.wizard_variant = Some("standard".to_string());
        assert_eq!(config.wizard_plan().steps().len(), 10);
        config.wizard_variant = Some("unknown".to_string());
        assert_eq!(config.wizard_plan().steps().len(), 13);
    }

    #[test]
    fn test_request_timeout_default() {
        let config = FunnelConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }
}
