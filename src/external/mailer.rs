use crate::config::MailerConfig;
use crate::error::{AppError, AppResult};
use reqwest::Client;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    #[serde(rename = "From")]
    from: &'a str,
    #[serde(rename = "To")]
    to: &'a str,
    #[serde(rename = "Subject")]
    subject: &'a str,
    #[serde(rename = "HtmlBody")]
    html_body: &'a str,
}

/// Transactional email over the provider HTTP API. Every caller treats sends
/// as fire-and-forget: failures are logged at the call site and never
/// propagate into the transition that triggered them.
#[derive(Clone)]
pub struct Mailer {
    client: Client,
    config: MailerConfig,
}

impl Mailer {
    pub fn new(config: MailerConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub async fn send(&self, to: &str, subject: &str, html_body: &str) -> AppResult<()> {
        let url = format!("{}/email", self.config.base_url);

        let body = SendEmailRequest {
            from: &self.config.from_email,
            to,
            subject,
            html_body,
        };

        let response = self
            .client
            .post(&url)
            .header("X-Postmark-Server-Token", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if response.status().is_success() {
            log::info!("Email sent to {to}: {subject}");
            Ok(())
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::error!("Email to {to} failed: {error_text}");
            Err(AppError::ExternalApiError(format!(
                "Email sending failed: {error_text}"
            )))
        }
    }

    /// Send the same message to a list of recipients, one request each.
    pub async fn send_many(&self, recipients: &[String], subject: &str, html_body: &str) {
        for to in recipients {
            if let Err(e) = self.send(to, subject, html_body).await {
                log::error!("Digest email to {to} failed: {e:?}");
            }
        }
    }
}
