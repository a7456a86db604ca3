use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, bail};
use askweather_core::{Config, Prompter, Session};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "askweather",
    version,
    about = "Ask Gemini about the current weather in a city"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store API keys and the Gemini model in the config file.
    Configure,

    /// Print the location of the config file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            None => ask().await,
            Some(Command::Configure) => configure(),
            Some(Command::ConfigPath) => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

/// Prompts through inquire on a terminal, plain line reads otherwise.
struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, message: &str) -> anyhow::Result<String> {
        if io::stdin().is_terminal() {
            return Ok(Text::new(message.trim_end()).prompt()?);
        }
        read_answer(&mut io::stdin().lock(), &mut io::stdout(), message)
    }
}

/// Print `message` and read one line from `input`, without the line ending.
fn read_answer<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> anyhow::Result<String> {
    write!(out, "{message}")?;
    out.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read from stdin")?;
    if read == 0 {
        bail!("Unexpected end of input while waiting for: {}", message.trim_end());
    }

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn ask() -> anyhow::Result<()> {
    let config = Config::load()?.with_env();
    let session = Session::new(&config)?;

    let mut stdout = std::io::stdout().lock();
    session.run(&mut TerminalPrompter, &mut stdout).await?;
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let openweather = secret_prompt("OpenWeatherMap API key:", config.openweather.api_key.is_some())?;
    let gemini = secret_prompt("Gemini API key:", config.gemini.api_key.is_some())?;
    config.upsert_api_keys(openweather, gemini);

    let model = Text::new("Gemini model:")
        .with_default(&config.gemini.model)
        .prompt()
        .context("Failed to read model name")?;
    if !model.trim().is_empty() {
        config.gemini.model = model.trim().to_string();
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Masked prompt; an empty answer keeps the stored key.
fn secret_prompt(label: &str, has_existing: bool) -> anyhow::Result<Option<String>> {
    let help = if has_existing {
        "Leave empty to keep the current key"
    } else {
        "Not set yet"
    };

    let value = Password::new(label)
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message(help)
        .prompt()
        .with_context(|| format!("Failed to read {label}"))?;

    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_runs_the_session() {
        let cli = Cli::try_parse_from(["askweather"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn subcommands_parse() {
        let cli = Cli::try_parse_from(["askweather", "configure"]).expect("parses");
        assert!(matches!(cli.command, Some(Command::Configure)));

        let cli = Cli::try_parse_from(["askweather", "config-path"]).expect("parses");
        assert!(matches!(cli.command, Some(Command::ConfigPath)));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["askweather", "--city", "Paris"]).is_err());
    }

    #[test]
    fn piped_answers_are_read_line_by_line() {
        let mut input: &[u8] = b"London\r\nShould I run?\n";
        let mut out = Vec::new();

        let city = read_answer(&mut input, &mut out, "Enter the city name: ").unwrap();
        let question = read_answer(&mut input, &mut out, "Question?").unwrap();

        assert_eq!(city, "London");
        assert_eq!(question, "Should I run?");
        assert_eq!(String::from_utf8(out).unwrap(), "Enter the city name: Question?");
    }

    #[test]
    fn last_line_without_newline_is_accepted() {
        let mut input: &[u8] = b"Paris";
        let answer = read_answer(&mut input, &mut Vec::new(), "City: ").unwrap();
        assert_eq!(answer, "Paris");
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut input: &[u8] = b"";
        let err = read_answer(&mut input, &mut Vec::new(), "Enter the city name: ").unwrap_err();
        assert!(err.to_string().contains("Unexpected end of input"));
        assert!(err.to_string().contains("Enter the city name:"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
