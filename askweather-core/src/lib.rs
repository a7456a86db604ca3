//! Core library for the `askweather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap provider and the Gemini client
//! - Formatting of weather reports into a prompt
//! - The session that ties one lookup to one question
//!
//! It is used by `askweather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod format;
pub mod llm;
pub mod model;
pub mod provider;
pub mod session;

pub use config::{Config, Credentials, GeminiConfig, OpenWeatherConfig};
pub use error::ProviderError;
pub use llm::{GeminiClient, LanguageModel};
pub use model::WeatherReport;
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use session::{Exchange, Prompter, Session};
