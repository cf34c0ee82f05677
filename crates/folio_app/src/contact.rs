//! Contact form and email relay
//!
//! The form is the only asynchronous part of the app. Submitting validates
//! the fields, moves the form to `Sending` and hands the message to an
//! [`EmailRelay`] on a tokio task; the frame loop polls for the outcome so
//! the scroll and animation state never waits on the network.
//!
//! A successful send shows a confirmation that dismisses itself after
//! `dismiss_after_ms`. A failure shows a generic retry message and is logged;
//! nothing is retried automatically.

use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use crate::config::ContactSettings;
use crate::content::{SENDING_LABEL, SEND_FAILED, SEND_LABEL, SENT_NOTICE};
use crate::error::{AppError, Result};

// =============================================================================
// Message
// =============================================================================

/// The fields a visitor fills in. Serialized as the relay's template parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl ContactMessage {
    pub fn new(
        from_name: impl Into<String>,
        from_email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            from_name: from_name.into(),
            from_email: from_email.into(),
            message: message.into(),
        }
    }

    /// All fields are required and the email must look like an address
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("from_name", &self.from_name),
            ("from_email", &self.from_email),
            ("message", &self.message),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::Validation {
                    field,
                    reason: "is required",
                });
            }
        }
        if !is_plausible_email(self.from_email.trim()) {
            return Err(AppError::Validation {
                field: "from_email",
                reason: "is not an email address",
            });
        }
        Ok(())
    }
}

fn is_plausible_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

// =============================================================================
// Relay
// =============================================================================

/// Outbound delivery of a contact message
#[async_trait::async_trait]
pub trait EmailRelay: Send + Sync {
    async fn send(&self, message: &ContactMessage) -> Result<()>;
}

/// Identifiers the relay service needs to route a message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl RelayCredentials {
    pub fn from_settings(settings: &ContactSettings) -> Result<Self> {
        let require = |value: &str, name: &'static str| {
            if value.trim().is_empty() {
                Err(AppError::MissingCredential(name))
            } else {
                Ok(value.trim().to_string())
            }
        };
        Ok(Self {
            service_id: require(&settings.service_id, "service_id")?,
            template_id: require(&settings.template_id, "template_id")?,
            public_key: require(&settings.public_key, "public_key")?,
        })
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a ContactMessage,
}

/// Relay backed by the EmailJS REST API
pub struct EmailJsRelay {
    client: Client,
    endpoint: String,
    credentials: RelayCredentials,
}

impl EmailJsRelay {
    pub fn new(settings: &ContactSettings) -> Result<Self> {
        let credentials = RelayCredentials::from_settings(settings)?;
        let client = Client::builder().timeout(settings.timeout()).build()?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            credentials,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl EmailRelay for EmailJsRelay {
    async fn send(&self, message: &ContactMessage) -> Result<()> {
        let request = SendRequest {
            service_id: &self.credentials.service_id,
            template_id: &self.credentials.template_id,
            user_id: &self.credentials.public_key,
            template_params: message,
        };

        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::RelayStatus {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!("relay accepted message from {}", message.from_email);
        Ok(())
    }
}

// =============================================================================
// Form
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum FormStatus {
    Idle,
    Sending,
    /// Confirmation shown; returns to `Idle` when `remaining_ms` runs out
    Sent { remaining_ms: f32 },
    /// User-facing failure text
    Failed(String),
}

pub struct ContactForm {
    message: ContactMessage,
    status: FormStatus,
    pending: Option<oneshot::Receiver<Result<()>>>,
    dismiss_after_ms: f32,
}

impl ContactForm {
    pub fn new(dismiss_after_ms: f32) -> Self {
        Self {
            message: ContactMessage::default(),
            status: FormStatus::Idle,
            pending: None,
            dismiss_after_ms,
        }
    }

    pub fn message(&self) -> &ContactMessage {
        &self.message
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.message.from_name,
            FormField::Email => &mut self.message.from_email,
            FormField::Message => &mut self.message.message,
        };
        *slot = value.into();
    }

    pub fn fill(&mut self, message: ContactMessage) {
        self.message = message;
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn is_sending(&self) -> bool {
        self.status == FormStatus::Sending
    }

    /// Submit button text
    pub fn button_label(&self) -> &'static str {
        if self.is_sending() {
            SENDING_LABEL
        } else {
            SEND_LABEL
        }
    }

    /// Confirmation or error line under the form, if any
    pub fn notice(&self) -> Option<&str> {
        match &self.status {
            FormStatus::Sent { .. } => Some(SENT_NOTICE),
            FormStatus::Failed(text) => Some(text.as_str()),
            FormStatus::Idle | FormStatus::Sending => None,
        }
    }

    /// Validate and hand the message to `relay` on the current tokio runtime.
    ///
    /// Rejected while a send is in flight. Invalid input leaves the status
    /// unchanged.
    pub fn submit(&mut self, relay: Arc<dyn EmailRelay>) -> Result<()> {
        if self.is_sending() {
            return Err(AppError::Busy);
        }
        self.message.validate()?;
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| AppError::NoRuntime)?;

        let (tx, rx) = oneshot::channel();
        let message = self.message.clone();
        runtime.spawn(async move {
            let result = relay.send(&message).await;
            let _ = tx.send(result);
        });

        self.pending = Some(rx);
        self.status = FormStatus::Sending;
        tracing::info!("contact: sending message from {}", self.message.from_email);
        Ok(())
    }

    /// Pick up a finished send and count down the confirmation.
    /// Returns whether the status moved to another state.
    pub fn poll(&mut self, dt_ms: f32) -> bool {
        let before = std::mem::discriminant(&self.status);

        if let Some(rx) = self.pending.as_mut() {
            match rx.try_recv() {
                Ok(result) => {
                    self.pending = None;
                    self.finish(result);
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Closed) => {
                    self.pending = None;
                    self.finish(Err(AppError::RelayAborted));
                }
            }
        } else if let FormStatus::Sent { remaining_ms } = &mut self.status {
            *remaining_ms -= dt_ms;
            if *remaining_ms <= 0.0 {
                self.status = FormStatus::Idle;
            }
        }

        std::mem::discriminant(&self.status) != before
    }

    /// Wait for the in-flight send, if any, and apply its outcome
    pub async fn settle(&mut self) {
        if let Some(rx) = self.pending.take() {
            let result = rx.await.unwrap_or(Err(AppError::RelayAborted));
            self.finish(result);
        }
    }

    fn finish(&mut self, result: Result<()>) {
        match result {
            Ok(()) => {
                tracing::info!("contact: message sent");
                self.message = ContactMessage::default();
                self.status = FormStatus::Sent {
                    remaining_ms: self.dismiss_after_ms,
                };
            }
            Err(err) => {
                tracing::error!("contact: relay failed: {}", err);
                self.status = FormStatus::Failed(SEND_FAILED.to_string());
            }
        }
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new(ContactSettings::default().dismiss_after_ms)
    }
}
