use rocket::figment::{self, Figment};
use serde::{Deserialize, Serialize};

use crate::todo::data::CycleKind;

/// Settings read from `Rocket.toml` / `ROCKET_*`; anything unset keeps its default.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    pub db_path: String,
    pub static_dir: String,
    pub status_cycle: CycleKind,
    pub todo_templates: Vec<String>,
}

pub const DEFAULT_TODO_TEMPLATES: [&str; 6] = [
    "Confirm booking with client",
    "Send contract and invoice",
    "Plan shot list",
    "Charge batteries and format cards",
    "Cull and edit photos",
    "Deliver final gallery",
];

impl Default for TrackerConfig {
    fn default() -> TrackerConfig {
        TrackerConfig {
            db_path: "snaptrack.db".to_string(),
            static_dir: "web".to_string(),
            status_cycle: CycleKind::Standard,
            todo_templates: DEFAULT_TODO_TEMPLATES
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

impl TrackerConfig {
    pub fn from_figment(figment: &Figment) -> Result<TrackerConfig, figment::Error> {
        figment.extract()
    }

    pub fn load() -> Result<TrackerConfig, figment::Error> {
        TrackerConfig::from_figment(&rocket::Config::figment())
    }
}
