//! # Gestão AI
//!
//! Answers free-form questions about a roster of professionals. Questions go
//! to hosted chat-completion providers in priority order; when none answers,
//! a local statistical summarizer does. Answers are cached per normalized
//! question and replayed verbatim.
//!
//! ```rust,no_run
//! use gestao_ai::{config::AppConfig, roster::load_roster, service::AnswerService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load(None)?;
//!     let roster = load_roster("profissionais.json".as_ref())?;
//!
//!     let mut service = AnswerService::create(&config);
//!     let resolution = service.ask("Quantos profissionais sabem React?", &roster).await;
//!     println!("{}", resolution.answer());
//!
//!     service.dispose()?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cache;
pub mod classify;
pub mod config;
pub mod error;
pub mod logging;
pub mod resolver;
pub mod roster;
pub mod service;
pub mod stats;
pub mod summarizer;

pub use adapters::{AnswerProvider, AnswerSource};
pub use cache::{AnswerCache, AnswerEnvelope};
pub use error::AppError;
pub use resolver::{AnswerResolver, Resolution};
pub use roster::Professional;
pub use service::AnswerService;
