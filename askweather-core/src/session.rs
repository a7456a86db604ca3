use anyhow::{Context, Result};
use std::io::Write;

use crate::{
    Config,
    format::{build_prompt, display_block, llm_summary},
    llm::{LanguageModel, generate_reply, model_from_config},
    provider::{WeatherProvider, fetch_weather, provider_from_config},
};

pub const CITY_PROMPT: &str = "Enter the city name: ";
pub const QUESTION_PROMPT: &str = "What would you like to ask Gemini about the weather?";

/// Source of the user's answers.
pub trait Prompter {
    fn ask(&mut self, message: &str) -> Result<String>;
}

/// What one run produced, for callers that want more than the printed transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub weather_available: bool,
    pub prompt: String,
    pub reply: String,
}

/// One weather lookup followed by one question to the language model.
#[derive(Debug)]
pub struct Session {
    weather: Box<dyn WeatherProvider>,
    model: Box<dyn LanguageModel>,
}

impl Session {
    /// Build clients from config. Fails before any network access if a key is missing.
    pub fn new(config: &Config) -> Result<Self> {
        let credentials = config.credentials()?;

        Ok(Self::with_backends(
            provider_from_config(&config.openweather, &credentials),
            model_from_config(&config.gemini, &credentials),
        ))
    }

    pub fn with_backends(weather: Box<dyn WeatherProvider>, model: Box<dyn LanguageModel>) -> Self {
        Self { weather, model }
    }

    pub async fn run<P, W>(&self, prompter: &mut P, out: &mut W) -> Result<Exchange>
    where
        P: Prompter + ?Sized,
        W: Write,
    {
        let city = prompter.ask(CITY_PROMPT).context("Failed to read city name")?;
        let city = city.trim();
        tracing::info!(city, "looking up weather");

        let report = fetch_weather(self.weather.as_ref(), city, out).await?;
        writeln!(out, "{}", display_block(report.as_ref()))?;

        let summary = llm_summary(report.as_ref());

        let question = prompter.ask(QUESTION_PROMPT).context("Failed to read question")?;
        let prompt = build_prompt(&summary, &question);
        writeln!(out, "\nSending to Gemini with prompt: --\n{prompt}\n--")?;

        let reply = generate_reply(self.model.as_ref(), &prompt, out).await?;
        writeln!(out, "\n--- Gemini's Response: ---\n{reply}\n--------------------------")?;
        out.flush()?;

        Ok(Exchange { weather_available: report.is_some(), prompt, reply })
    }
}
