//! Text rendering of weather reports and the Gemini prompt.

use crate::WeatherReport;

pub const NO_DISPLAY_DATA: &str = "No weather data to display.";
pub const NO_SUMMARY_DATA: &str = "Could not retrieve current weather data.";

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Human-readable block shown after the lookup.
pub fn display_block(report: Option<&WeatherReport>) -> String {
    let Some(r) = report else {
        return NO_DISPLAY_DATA.to_string();
    };

    format!(
        "\n--- Current Weather in {}, {} ---\n\
         Temperature: {}°C\n\
         Feels like: {}°C\n\
         Description: {}\n\
         Humidity: {}%\n\
         Wind Speed: {} m/s\n\
         --------------------------------------",
        r.city,
        r.country,
        r.temperature_c,
        r.feels_like_c,
        capitalize(&r.description),
        r.humidity_pct,
        r.wind_speed_mps,
    )
}

/// Compact summary embedded in the prompt.
pub fn llm_summary(report: Option<&WeatherReport>) -> String {
    let Some(r) = report else {
        return NO_SUMMARY_DATA.to_string();
    };

    format!(
        "Current weather in {}, {}\n\
         Temperature: {}°C (feels like: {})\n\
         Conditions: {}\n\
         Humidity: {}%\n\
         Wind Speed: {} m/s",
        r.city,
        r.country,
        r.temperature_c,
        r.feels_like_c,
        capitalize(&r.description),
        r.humidity_pct,
        r.wind_speed_mps,
    )
}

pub fn build_prompt(summary: &str, question: &str) -> String {
    format!(
        "You are an AI assistant. Here is the current weather data:\n\n\
         {summary}\n\n\
         Please respond to the following request: \"{question}\""
    )
}
