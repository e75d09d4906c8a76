//! # academy-service
//!
//! Application layer containing business logic, services, DTOs and the
//! payment gateway port with its Stripe adapter.

pub mod dto;
pub mod payments;
pub mod services;

pub use payments::{PaymentError, PaymentGateway, PaymentIntent, PaymentIntentParams, StripeGateway};
pub use services::{ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult};
