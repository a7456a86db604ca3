use crate::{
    Credentials, OpenWeatherConfig, ProviderError, WeatherReport, config::DEFAULT_OPENWEATHER_URL,
};
use async_trait::async_trait;
use std::{fmt::Debug, io::Write};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, ProviderError>;
}

/// Construct the weather provider from config and resolved credentials.
pub fn provider_from_config(
    config: &OpenWeatherConfig,
    credentials: &Credentials,
) -> Box<dyn WeatherProvider> {
    let api_key = credentials.openweather_api_key.clone();
    if config.base_url == DEFAULT_OPENWEATHER_URL {
        Box::new(OpenWeatherProvider::new(api_key))
    } else {
        Box::new(OpenWeatherProvider::with_base_url(api_key, config.base_url.clone()))
    }
}

/// Look up `city`, reporting any failure to `out` and returning `None` in its place.
pub async fn fetch_weather<W: Write>(
    provider: &dyn WeatherProvider,
    city: &str,
    out: &mut W,
) -> std::io::Result<Option<WeatherReport>> {
    match provider.current_weather(city).await {
        Ok(report) => Ok(Some(report)),
        Err(err) => {
            tracing::debug!(city, error = ?err, "weather lookup failed");
            writeln!(out, "Error fetching weather data: {err}")?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Fixed(Option<WeatherReport>);

    #[async_trait]
    impl WeatherProvider for Fixed {
        async fn current_weather(&self, _city: &str) -> Result<WeatherReport, ProviderError> {
            self.0.clone().ok_or(ProviderError::EmptyReply { service: "OpenWeather" })
        }
    }

    fn report() -> WeatherReport {
        WeatherReport {
            city: "Oslo".into(),
            country: "NO".into(),
            temperature_c: -2.5,
            feels_like_c: -6.0,
            description: "light snow".into(),
            humidity_pct: 90,
            wind_speed_mps: 3.1,
        }
    }

    #[tokio::test]
    async fn success_writes_nothing() {
        let mut out = Vec::new();
        let got = fetch_weather(&Fixed(Some(report())), "Oslo", &mut out).await.unwrap();
        assert_eq!(got, Some(report()));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn failure_is_reported_and_becomes_none() {
        let mut out = Vec::new();
        let got = fetch_weather(&Fixed(None), "Oslo", &mut out).await.unwrap();
        assert!(got.is_none());

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Error fetching weather data: "));
    }

    fn creds() -> Credentials {
        Credentials { openweather_api_key: "OW-SECRET".into(), gemini_api_key: "GM".into() }
    }

    #[test]
    fn provider_from_config_uses_configured_endpoint() {
        let cfg = OpenWeatherConfig { api_key: None, base_url: "http://localhost:1".into() };
        let provider = provider_from_config(&cfg, &creds());
        assert!(format!("{provider:?}").contains("http://localhost:1"));
    }

    #[test]
    fn provider_from_default_config_targets_public_api() {
        let provider = provider_from_config(&OpenWeatherConfig::default(), &creds());
        let dbg = format!("{provider:?}");
        assert!(dbg.contains(DEFAULT_OPENWEATHER_URL));
        assert!(!dbg.contains("OW-SECRET"));
    }
}
