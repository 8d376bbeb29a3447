use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// how the retired deployment sends visitors to the new one
#[derive(Serialize, Deserialize, ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RedirectMode {
    /// HTTP 301 for every path
    Permanent,
    /// a "we've moved" page that refreshes to the target after a delay
    #[default]
    Notice,
}

impl Display for RedirectMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RedirectMode::Permanent => write!(f, "permanent"),
            RedirectMode::Notice => write!(f, "notice"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RedirectConfig {
    pub target_url: String,
    pub mode: RedirectMode,
    /// seconds before the notice page refreshes to the target
    pub delay_secs: u64,
    /// health path of the redirect front end, never redirected
    pub health_path: String,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            target_url: String::from("https://tax-lookup-751008504644.us-west1.run.app"),
            mode: RedirectMode::default(),
            delay_secs: 10,
            health_path: String::from("/_stcore/health"),
        }
    }
}
