use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

#[cfg(feature = "mailer-emailjs")]
use reqwest::Client;
#[cfg(feature = "mailer-emailjs")]
use std::time::Duration;
#[cfg(feature = "mailer-emailjs")]
use url::Url;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("contact form invalid: {0}")]
    Invalid(String),
    #[error("contact mailer misconfigured: {0}")]
    Config(String),
    #[error("contact request failed: {0}")]
    Request(String),
    #[error("contact message rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Trims every field and checks the required ones are present.
    ///
    /// # Examples
    ///
    /// ```
    /// use mycobrew_core::mailer::ContactForm;
    ///
    /// let form = ContactForm::new(" Ada ", "ada@example.com", "hello").validated().unwrap();
    /// assert_eq!(form.name, "Ada");
    /// assert!(ContactForm::new("Ada", "not-an-email", "hi").validated().is_err());
    /// ```
    pub fn validated(&self) -> Result<ContactForm, ContactError> {
        let form = ContactForm {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        };
        if form.name.is_empty() {
            return Err(ContactError::Invalid("name is required".to_string()));
        }
        if form.message.is_empty() {
            return Err(ContactError::Invalid("message is required".to_string()));
        }
        if !looks_like_email(&form.email) {
            return Err(ContactError::Invalid(format!(
                "`{}` is not a valid email address",
                form.email
            )));
        }
        Ok(form)
    }
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Outcome reported by the mail provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub provider: String,
    pub response: String,
}

#[async_trait]
pub trait ContactMailer: Send + Sync {
    async fn send(&self, form: &ContactForm) -> Result<Delivery, ContactError>;
}

#[async_trait]
impl<T> ContactMailer for Box<T>
where
    T: ContactMailer + ?Sized,
{
    async fn send(&self, form: &ContactForm) -> Result<Delivery, ContactError> {
        (**self).send(form).await
    }
}

#[cfg(feature = "mailer-emailjs")]
#[derive(Debug, Clone)]
pub struct EmailJsMailer {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: Option<String>,
    pub contact_number: String,
    client: Client,
}

#[cfg(feature = "mailer-emailjs")]
impl EmailJsMailer {
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.emailjs.com/api/v1.0/email/send";

    pub fn new(
        endpoint: String,
        service_id: String,
        template_id: String,
        public_key: Option<String>,
        contact_number: String,
        timeout: Duration,
    ) -> Result<Self, ContactError> {
        Url::parse(&endpoint)
            .map_err(|e| ContactError::Config(format!("bad endpoint {endpoint}: {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ContactError::Request(e.to_string()))?;
        Ok(Self {
            endpoint,
            service_id,
            template_id,
            public_key,
            contact_number,
            client,
        })
    }

    fn payload(&self, form: &ContactForm) -> Result<EmailJsRequest, ContactError> {
        let user_id = self
            .public_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ContactError::Config("EmailJS public key is not set".to_string()))?;
        Ok(EmailJsRequest {
            service_id: self.service_id.clone(),
            template_id: self.template_id.clone(),
            user_id,
            template_params: TemplateParams {
                user_name: form.name.clone(),
                user_email: form.email.clone(),
                message: form.message.clone(),
                contact_number: self.contact_number.clone(),
            },
        })
    }
}

#[cfg(feature = "mailer-emailjs")]
#[derive(Debug, Serialize)]
struct EmailJsRequest {
    service_id: String,
    template_id: String,
    user_id: String,
    template_params: TemplateParams,
}

#[cfg(feature = "mailer-emailjs")]
#[derive(Debug, Serialize)]
struct TemplateParams {
    user_name: String,
    user_email: String,
    message: String,
    contact_number: String,
}

#[cfg(feature = "mailer-emailjs")]
#[async_trait]
impl ContactMailer for EmailJsMailer {
    async fn send(&self, form: &ContactForm) -> Result<Delivery, ContactError> {
        let form = form.validated()?;
        let payload = self.payload(&form)?;
        debug!("sending contact message via {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ContactError::Request(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ContactError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(ContactError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        info!("contact message from {} accepted", form.email);
        Ok(Delivery {
            provider: "emailjs".to_string(),
            response: body,
        })
    }
}

/// Keeps sent messages in memory.
#[derive(Debug, Default)]
pub struct MockMailer {
    sent: Mutex<Vec<ContactForm>>,
}

impl MockMailer {
    pub fn sent(&self) -> Vec<ContactForm> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ContactMailer for MockMailer {
    async fn send(&self, form: &ContactForm) -> Result<Delivery, ContactError> {
        let form = form.validated()?;
        debug!("mock mailer storing message from {}", form.email);
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(form);
        Ok(Delivery {
            provider: "mock".to_string(),
            response: "OK".to_string(),
        })
    }
}
