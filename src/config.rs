//! Loading and serving the application config file.
//!
//! The config file lists the household's members, the advisory category
//! names offered by the UI, and the categories excluded from trend analysis.
//! It is loaded once at startup and shared read-only for the lifetime of the
//! process.

use std::{fs, path::Path, sync::Arc};

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error};

/// A user entry in the application config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConfigUser {
    /// The user's display name.
    pub name: String,
}

/// The application config, parsed from `cofi.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// The registered household members.
    pub users: Vec<ConfigUser>,

    /// Category names offered by the UI. Advisory only, transactions may use
    /// any non-empty category.
    #[serde(default)]
    pub predefined_categories: Vec<String>,

    /// Categories removed from trend analysis and the top public expenses,
    /// e.g. fixed recurring payments that would drown out everything else.
    #[serde(default = "default_excluded_categories")]
    pub excluded_categories: Vec<String>,
}

fn default_excluded_categories() -> Vec<String> {
    vec!["Mortgage".to_owned()]
}

/// Read and parse the config file at `path`.
///
/// # Errors
/// Returns [Error::InvalidConfig] if the file cannot be read, is not valid
/// TOML, or lists no users.
pub fn load_config(path: &Path) -> Result<AppConfig, Error> {
    let text = fs::read_to_string(path).map_err(|error| {
        Error::InvalidConfig(format!("could not read {}: {error}", path.display()))
    })?;

    parse_config(&text)
}

/// Parse config file contents.
///
/// # Errors
/// Returns [Error::InvalidConfig] if `text` is not valid TOML or lists no
/// users.
pub fn parse_config(text: &str) -> Result<AppConfig, Error> {
    let config: AppConfig =
        toml::from_str(text).map_err(|error| Error::InvalidConfig(error.to_string()))?;

    if config.users.is_empty() {
        return Err(Error::InvalidConfig(
            "the config file must list at least one user".to_owned(),
        ));
    }

    Ok(config)
}

/// The state needed for serving the app config.
#[derive(Debug, Clone)]
pub struct AppConfigState {
    /// The application config loaded at startup.
    pub config: Arc<AppConfig>,
}

impl FromRef<AppState> for AppConfigState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            config: state.config.clone(),
        }
    }
}

/// The subset of the config the UI needs.
#[derive(Debug, Serialize)]
pub struct AppConfigResponse {
    /// Category names to offer in category pickers.
    pub predefined_categories: Vec<String>,
    /// The display names of the registered users.
    pub users: Vec<String>,
}

/// Route handler that serves the advisory category list and user names.
pub async fn get_app_config_endpoint(
    State(state): State<AppConfigState>,
) -> Json<AppConfigResponse> {
    Json(AppConfigResponse {
        predefined_categories: state.config.predefined_categories.clone(),
        users: state
            .config
            .users
            .iter()
            .map(|user| user.name.clone())
            .collect(),
    })
}
