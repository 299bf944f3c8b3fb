//! Access to the backend calculation history.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::api::{CALCULATIONS_PATH, CalculationRecord, NewCalculation, ValidationError};

#[async_trait]
pub trait HistoryProvider: Send + Sync {
    async fn save(&self, calculation: &NewCalculation) -> Result<CalculationRecord>;
    async fn list(&self) -> Result<Vec<CalculationRecord>>;
}

/// Talks to the calculations REST endpoint.
pub struct HttpHistoryProvider {
    base_url: String,
}

impl HttpHistoryProvider {
    pub fn new(base_url: &str) -> Self {
        HttpHistoryProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn client(&self) -> Result<reqwest::Client> {
        Ok(reqwest::Client::builder()
            .user_agent("cpacalc/1.0")
            .build()?)
    }
}

#[async_trait]
impl HistoryProvider for HttpHistoryProvider {
    async fn save(&self, calculation: &NewCalculation) -> Result<CalculationRecord> {
        let url = format!("{}{}", self.base_url, CALCULATIONS_PATH);
        debug!("Posting calculation to {}", url);

        let response = self
            .client()?
            .post(&url)
            .json(calculation)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        match response.status() {
            StatusCode::CREATED => Ok(response.json::<CalculationRecord>().await?),
            StatusCode::BAD_REQUEST => {
                let err = response.json::<ValidationError>().await?;
                Err(anyhow!("Validation failed: {}", err))
            }
            status => Err(anyhow!("Unexpected response {} from {}", status, url)),
        }
    }

    async fn list(&self) -> Result<Vec<CalculationRecord>> {
        let url = format!("{}{}", self.base_url, CALCULATIONS_PATH);
        debug!("Requesting calculation history from {}", url);

        let response = self
            .client()?
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if response.status() != StatusCode::OK {
            return Err(anyhow!(
                "Unexpected response {} from {}",
                response.status(),
                url
            ));
        }
        Ok(response.json::<Vec<CalculationRecord>>().await?)
    }
}
