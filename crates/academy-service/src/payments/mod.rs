//! Payment gateway port
//!
//! Checkout talks to the payment processor only through [`PaymentGateway`].
//! [`StripeGateway`] is the production adapter.

mod stripe;

use std::collections::BTreeMap;

use academy_common::AppError;
use async_trait::async_trait;

pub use stripe::StripeGateway;

/// A payment intent created at the processor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    /// Handed to the browser to complete the payment
    pub client_secret: String,
}

/// Parameters of a new payment intent
#[derive(Debug, Clone, Default)]
pub struct PaymentIntentParams {
    /// Amount in the currency's minor unit (paise, cents)
    pub amount_minor: i64,
    /// Lowercase ISO currency code
    pub currency: String,
    /// Processor-side customer reference
    pub customer: Option<String>,
    pub metadata: BTreeMap<String, String>,
}

/// Payment processor failures
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment gateway unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Payment gateway rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected payment gateway response: {0}")]
    InvalidResponse(String),
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        AppError::ExternalService(err.to_string())
    }
}

/// Outbound port to the payment processor
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Register a billing customer, returning its processor id
    async fn create_customer(
        &self,
        email: Option<&str>,
        name: Option<&str>,
    ) -> Result<String, PaymentError>;

    /// Create a payment intent for the given amount
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> Result<PaymentIntent, PaymentError>;
}
