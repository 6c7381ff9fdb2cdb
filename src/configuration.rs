use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::service_query::ServiceQuery;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub api_keys: ApiKeys,
    pub search: SearchSettings,
    pub llm: LlmSettings,
    pub spreadsheet: SpreadsheetSettings,
    pub services: Vec<ServiceQuery>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApiKeys {
    pub google_search: String,
    pub google_cx: String,
    pub anthropic: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SearchSettings {
    pub base_url: String,
    pub query_suffix: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct LlmSettings {
    pub api_base: String,
    pub model: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_tokens: u32,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SpreadsheetSettings {
    pub id: String,
    pub credentials_path: PathBuf,
    pub column: String,
    pub sheet_name: Option<String>,
    pub base_url: String,
}

impl Settings {
    /// Rejects settings that would make every downstream call fail.
    pub fn validate(&self) -> anyhow::Result<()> {
        let required = [
            ("api_keys.google_search (GOOGLE_API_KEY)", &self.api_keys.google_search),
            ("api_keys.google_cx (GOOGLE_CX)", &self.api_keys.google_cx),
            ("api_keys.anthropic (ANTHROPIC_API_KEY)", &self.api_keys.anthropic),
            ("spreadsheet.id (GOOGLE_SHEETS_ID)", &self.spreadsheet.id),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                bail!("Missing required credential: {}", key);
            }
        }

        let column = &self.spreadsheet.column;
        if column.is_empty() || !column.chars().all(|c| c.is_ascii_alphabetic()) {
            bail!("Invalid spreadsheet column: {:?}", column);
        }

        if let Some(service) = self.services.iter().find(|s| s.row == 0) {
            bail!("Service {} has an invalid target row 0", service.name);
        }

        Ok(())
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> anyhow::Result<Settings> {
    let base_path = std::env::current_dir().context("Failed to determine the current directory")?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(anyhow::Error::msg)?;

    load_configuration(&configuration_directory, environment)
}

pub fn load_configuration(
    configuration_directory: &Path,
    environment: Environment,
) -> anyhow::Result<Settings> {
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename)).required(false),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        // Variable names used by existing deployments
        .set_override_option("api_keys.google_search", std::env::var("GOOGLE_API_KEY").ok())?
        .set_override_option("api_keys.google_cx", std::env::var("GOOGLE_CX").ok())?
        .set_override_option("api_keys.anthropic", std::env::var("ANTHROPIC_API_KEY").ok())?
        .set_override_option("spreadsheet.id", std::env::var("GOOGLE_SHEETS_ID").ok())?
        .build()?;

    settings
        .try_deserialize::<Settings>()
        .context("Failed to deserialize configuration")
}
