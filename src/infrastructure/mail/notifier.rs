use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::Serialize;
use url::Url;
use zeroize::Zeroizing;

use crate::{entities::contact::ContactSubmission, errors::MailError, settings::AppConfig};

/// Outbound alert sent to the site operator when a submission is saved.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_new_contact(&self, contact: &ContactSubmission) -> Result<(), MailError>;
}

#[async_trait]
impl<T> Notifier for Arc<T>
where
    T: Notifier + ?Sized,
{
    async fn notify_new_contact(&self, contact: &ContactSubmission) -> Result<(), MailError> {
        (**self).notify_new_contact(contact).await
    }
}

/// Installed when no relay is configured.
#[derive(Debug, Clone, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify_new_contact(&self, _contact: &ContactSubmission) -> Result<(), MailError> {
        Err(MailError::NotConfigured)
    }
}

#[derive(Debug, Serialize)]
struct MailRequest<'a> {
    from: &'a str,
    to: &'a str,
    reply_to: &'a str,
    subject: String,
    text: String,
}

/// Client for an HTTP mail relay that accepts JSON messages with bearer auth.
pub struct HttpMailer {
    http_client: reqwest::Client,
    relay_url: Url,
    api_token: Zeroizing<String>,
    sender: String,
    operator_email: String,
    timeout: Duration,
}

impl HttpMailer {
    pub fn new(
        relay_url: Url,
        api_token: &str,
        sender: String,
        operator_email: String,
        timeout: Duration,
    ) -> Result<Self, MailError> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| MailError::InvalidSettings(e.to_string()))?;

        Ok(HttpMailer {
            http_client,
            relay_url,
            api_token: Zeroizing::new(api_token.to_string()),
            sender,
            operator_email,
            timeout,
        })
    }
}

#[async_trait]
impl Notifier for HttpMailer {
    async fn notify_new_contact(&self, contact: &ContactSubmission) -> Result<(), MailError> {
        let request = MailRequest {
            from: &self.sender,
            to: &self.operator_email,
            reply_to: &contact.email,
            subject: format!("New contact form submission: {}", contact.subject),
            text: compose_body(contact),
        };

        self.http_client
            .post(self.relay_url.clone())
            .bearer_auth(self.api_token.as_str())
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

fn compose_body(contact: &ContactSubmission) -> String {
    format!(
        "Name: {}\nEmail: {}\nSubject: {}\nReceived: {}\nIP address: {}\nUser agent: {}\n\n{}",
        contact.name,
        contact.email,
        contact.subject,
        contact.created_at.to_rfc3339(),
        contact.ip_address.as_deref().unwrap_or("unknown"),
        contact.user_agent.as_deref().unwrap_or("unknown"),
        contact.message,
    )
}

/// Picks the relay client when one is configured, the disabled notifier otherwise.
pub fn build_notifier(config: &AppConfig) -> Result<Arc<dyn Notifier>, MailError> {
    match &config.mail_relay_url {
        Some(url) => {
            let mailer = HttpMailer::new(
                url.clone(),
                &config.mail_api_token,
                config.mail_from.clone(),
                config.operator_email.clone(),
                Duration::from_secs(config.mail_timeout_secs),
            )?;
            tracing::info!(relay = %url, "Contact notifications enabled");
            Ok(Arc::new(mailer))
        }
        None => {
            tracing::warn!("No mail relay configured; contact notifications are disabled");
            Ok(Arc::new(DisabledNotifier))
        }
    }
}
