//! Club configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Club configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClubConfig {
    /// Display name of the club
    #[serde(default = "default_name")]
    pub name: String,

    /// Public base URL used in notification links
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Member ids eligible to vote (comma-separated)
    pub members: Option<String>,
}

impl ClubConfig {
    /// Get the configured members as a vector
    pub fn members_list(&self) -> Vec<String> {
        self.members
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Validate club configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("club.name"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if *environment == Environment::Production && !self.base_url.starts_with("https://") {
            return Err(ValidationError::BaseUrlMustBeHttps);
        }
        Ok(())
    }
}

impl Default for ClubConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            base_url: default_base_url(),
            members: None,
        }
    }
}

fn default_name() -> String {
    "Book Club".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}
