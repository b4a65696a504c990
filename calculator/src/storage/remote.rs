use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::calculator_config::RemoteConfig;
use crate::config::constants::CARBON_FOOTPRINTS_ENDPOINT;
use crate::models::breakdown::EmissionBreakdown;
use crate::models::input::EmissionInput;
use crate::models::suggestion::Suggestion;

// Longest slice of an error response body kept for messages
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug)]
pub enum RemoteError {
    NotConfigured,
    Network(reqwest::Error),
    Status { code: u16, body: String },
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        RemoteError::Network(err)
    }
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteError::NotConfigured => write!(f, "No remote backend configured"),
            RemoteError::Network(e) => write!(f, "Network error: {}", e),
            RemoteError::Status { code, body } if body.is_empty() => {
                write!(f, "Server responded with status {}", code)
            }
            RemoteError::Status { code, body } => {
                write!(f, "Server responded with status {}: {}", code, body)
            }
        }
    }
}

impl std::error::Error for RemoteError {}

/// Document sent to the backend: the raw inputs plus the computed categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteReport {
    #[serde(flatten)]
    pub input: EmissionInput,
    pub transport_co2e: f64,
    pub electricity_co2e: f64,
    pub diet_co2e: f64,
    pub waste_co2e: f64,
    pub total_co2e: f64,
    pub suggestions: Vec<Suggestion>,
}

impl RemoteReport {
    pub fn new(input: &EmissionInput, breakdown: &EmissionBreakdown, suggestions: &[Suggestion]) -> Self {
        Self {
            input: input.clone(),
            transport_co2e: breakdown.transport,
            electricity_co2e: breakdown.electricity,
            diet_co2e: breakdown.diet,
            waste_co2e: breakdown.waste,
            total_co2e: breakdown.total,
            suggestions: suggestions.to_vec(),
        }
    }
}

/// Remote persistence for footprint reports.
pub trait RemoteStore {
    fn save_report(&self, report: &RemoteReport) -> Result<(), RemoteError>;
}

/// Posts reports to the backend's carbon footprint endpoint.
pub struct HttpRemoteStore {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
}

impl HttpRemoteStore {
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: endpoint_url(&config.base_url),
            api_token: config.api_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RemoteStore for HttpRemoteStore {
    fn save_report(&self, report: &RemoteReport) -> Result<(), RemoteError> {
        debug!(endpoint = %self.endpoint, "Posting footprint report");

        let mut request = self.client.post(&self.endpoint).json(report);
        if let Some(token) = &self.api_token {
            request = request.header(AUTHORIZATION, format!("Token {}", token));
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            debug!(status = status.as_u16(), body_len = body.len(), "Backend rejected footprint report");
            return Err(RemoteError::Status { code: status.as_u16(), body: error_excerpt(&body) });
        }

        info!(status = status.as_u16(), "Footprint report saved remotely");
        Ok(())
    }
}

/// First line of an error body, cut to `MAX_ERROR_BODY_CHARS` characters.
fn error_excerpt(body: &str) -> String {
    let line = body.trim().lines().next().unwrap_or_default().trim();
    if line.chars().count() <= MAX_ERROR_BODY_CHARS {
        return line.to_string();
    }
    let mut excerpt: String = line.chars().take(MAX_ERROR_BODY_CHARS).collect();
    excerpt.push_str("...");
    excerpt
}

fn endpoint_url(base_url: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), CARBON_FOOTPRINTS_ENDPOINT)
}
