use crate::config::PaystackConfig;
use crate::error::{AppError, AppResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
struct PaystackEnvelope<T> {
    pub status: bool,
    pub message: String,
    pub data: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaystackAuthorization {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaystackTransaction {
    /// `success`, `failed` or `abandoned`.
    pub status: String,
    pub reference: String,
    /// Amount in kobo.
    pub amount: i64,
    pub paid_at: Option<String>,
    pub channel: Option<String>,
}

impl PaystackTransaction {
    pub fn is_successful(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Clone)]
pub struct PaystackClient {
    client: Client,
    config: PaystackConfig,
}

impl PaystackClient {
    pub fn new(config: PaystackConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Start a card transaction; the buyer is redirected to the returned
    /// authorization URL.
    pub async fn initialize_transaction(
        &self,
        email: &str,
        amount_kobo: i64,
        reference: &str,
    ) -> AppResult<PaystackAuthorization> {
        let url = format!("{}/transaction/initialize", self.config.base_url);

        let body = json!({
            "email": email,
            "amount": amount_kobo,
            "reference": reference,
            "callback_url": self.config.callback_url,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.secret_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::error!("Paystack initialize failed: {error_text}");
            return Err(AppError::ExternalApiError(format!(
                "Paystack initialize failed: {error_text}"
            )));
        }

        let envelope: PaystackEnvelope<PaystackAuthorization> = response.json().await?;
        if !envelope.status {
            return Err(AppError::ExternalApiError(format!(
                "Paystack initialize rejected: {}",
                envelope.message
            )));
        }

        envelope
            .data
            .ok_or_else(|| AppError::ExternalApiError("Paystack returned no data".to_string()))
    }

    /// Fetch the authoritative state of a transaction. Webhook handling calls
    /// this too, so an event is never trusted on its own say-so.
    pub async fn verify_transaction(&self, reference: &str) -> AppResult<PaystackTransaction> {
        let url = format!("{}/transaction/verify/{reference}", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.secret_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::error!("Paystack verify failed for {reference}: {error_text}");
            return Err(AppError::ExternalApiError(format!(
                "Paystack verify failed: {error_text}"
            )));
        }

        let envelope: PaystackEnvelope<PaystackTransaction> = response.json().await?;
        if !envelope.status {
            return Err(AppError::ExternalApiError(format!(
                "Paystack verify rejected: {}",
                envelope.message
            )));
        }

        envelope
            .data
            .ok_or_else(|| AppError::ExternalApiError("Paystack returned no data".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_success_flag() {
        let txn = PaystackTransaction {
            status: "success".to_string(),
            reference: "bk_123".to_string(),
            amount: 1_000_000,
            paid_at: Some("2026-04-01T10:00:00Z".to_string()),
            channel: Some("card".to_string()),
        };
        assert!(txn.is_successful());

        let txn = PaystackTransaction {
            status: "abandoned".to_string(),
            reference: "bk_124".to_string(),
            amount: 1_000_000,
            paid_at: None,
            channel: None,
        };
        assert!(!txn.is_successful());
    }
}
