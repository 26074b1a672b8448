//! ADSMedia Domain
//!
//! Client for the ADSMedia transactional email API and the adapters that
//! expose it to host applications.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐ ┌──────────────┐ ┌──────────────┐
//! │    Tools     │ │ EmailBackend │ │   Handlers   │  ← Host adapters
//! └──────┬───────┘ └──────┬───────┘ └──────┬───────┘
//!        └────────────────┼────────────────┘
//!                  ┌──────▼──────┐
//!                  │  EmailApi   │  ← Trait (AdsMediaClient + mocks)
//!                  └──────┬──────┘
//!                  ┌──────▼──────┐
//!                  │  Envelope   │  ← {success, data | error} decoding
//!                  └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_adsmedia::{AdsMediaClient, EmailApi, EmailMessage};
//!
//! # async fn example() -> Result<(), domain_adsmedia::AdsMediaError> {
//! let client = AdsMediaClient::from_env()?;
//! let receipt = client
//!     .send(&EmailMessage::new("user@example.com", "Hello", "<h1>Hi!</h1>"))
//!     .await?;
//! println!("sent {}", receipt.message_id);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod models;
pub mod tools;

// Re-export commonly used types
pub use backend::{BackendSettings, DeliveryReport, EmailBackend, OutgoingMessage};
pub use client::{AdsMediaClient, EmailApi};
pub use config::{AdsMediaConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{AdsMediaError, AdsMediaResult};
pub use handlers::{EmailApiDoc, router};
pub use models::{
    BatchEmailRequest, BatchRecipient, BatchSummary, ContentType, EmailMessage, SendReceipt,
    StatusLookup, StatusQuery, SuppressionQuery, SuppressionStatus,
};
pub use tools::{Tool, ToolMessage, ToolParameters, ToolRuntime, find_tool, registry};
