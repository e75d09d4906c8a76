//! # academy-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, JwtService};
pub use config::{
    AppConfig, AppSettings, AuthConfig, ConfigError, CorsConfig, DatabaseConfig, Environment,
    PaymentConfig, RateLimitConfig, ServerConfig,
};
pub use error::{domain_status, AppError};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
