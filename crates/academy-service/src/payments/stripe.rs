//! Stripe adapter speaking the form-encoded REST API

use std::time::Duration;

use academy_common::PaymentConfig;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{PaymentError, PaymentGateway, PaymentIntent, PaymentIntentParams};

/// Stripe REST client
#[derive(Clone)]
pub struct StripeGateway {
    client: reqwest::Client,
    secret_key: String,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct CustomerObject {
    id: String,
}

#[derive(Debug, Deserialize)]
struct PaymentIntentObject {
    id: String,
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorObject,
}

#[derive(Debug, Deserialize)]
struct ErrorObject {
    message: Option<String>,
}

impl StripeGateway {
    /// Create a client for `api_base` (normally `https://api.stripe.com`)
    pub fn new(secret_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .unwrap_or_default();

        Self {
            client,
            secret_key: secret_key.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build from configuration; `None` when no secret key is configured
    pub fn from_config(config: &PaymentConfig) -> Option<Self> {
        config
            .stripe_secret_key
            .as_ref()
            .map(|key| Self::new(key.clone(), config.api_base.clone()))
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(String, String)],
    ) -> Result<T, PaymentError> {
        let response = self
            .client
            .post(format!("{}{path}", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or_else(|| status.to_string());
            warn!(status = status.as_u16(), %message, "Stripe request rejected");
            return Err(PaymentError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| PaymentError::InvalidResponse(e.to_string()))
    }
}

/// Form fields of a payment intent; metadata uses Stripe's bracket syntax
fn intent_form(params: &PaymentIntentParams) -> Vec<(String, String)> {
    let mut form = vec![
        ("amount".to_string(), params.amount_minor.to_string()),
        ("currency".to_string(), params.currency.to_lowercase()),
    ];
    if let Some(customer) = &params.customer {
        form.push(("customer".to_string(), customer.clone()));
    }
    for (key, value) in &params.metadata {
        form.push((format!("metadata[{key}]"), value.clone()));
    }
    form
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    #[instrument(skip(self))]
    async fn create_customer(
        &self,
        email: Option<&str>,
        name: Option<&str>,
    ) -> Result<String, PaymentError> {
        let mut form = Vec::new();
        if let Some(email) = email {
            form.push(("email".to_string(), email.to_string()));
        }
        if let Some(name) = name {
            form.push(("name".to_string(), name.to_string()));
        }

        let customer: CustomerObject = self.post_form("/v1/customers", &form).await?;
        debug!(customer_id = %customer.id, "Stripe customer created");
        Ok(customer.id)
    }

    #[instrument(skip(self, params), fields(amount = params.amount_minor, currency = %params.currency))]
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> Result<PaymentIntent, PaymentError> {
        let intent: PaymentIntentObject = self
            .post_form("/v1/payment_intents", &intent_form(params))
            .await?;

        let client_secret = intent
            .client_secret
            .ok_or_else(|| PaymentError::InvalidResponse("missing client_secret".to_string()))?;

        debug!(payment_intent_id = %intent.id, "Stripe payment intent created");
        Ok(PaymentIntent {
            id: intent.id,
            client_secret,
        })
    }
}

impl std::fmt::Debug for StripeGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeGateway")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}
