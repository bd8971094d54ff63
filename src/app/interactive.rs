use crate::app::actions::{get_movies, random_pick};
use crate::app::render::{format_outcome, OutputFormat};
use crate::app::session::SessionState;
use crate::core::client::MovieQueryClient;
use crate::utils::error::Result;
use rand::Rng;
use std::io::{BufRead, Write};

const HELP: &str = "\
Commands:
  year <n>          select a year
  month <n|name>    select a month (1-12 or January..December)
  key <api-key>     set the TMDb API key for this session (the key is echoed;
                    prefer the TMDB_API_KEY environment variable)
  get               show the top 5 movies for the selection
  random            pick a random year and month
  show              print the current selection
  help              this text
  quit              leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Year(String),
    Month(String),
    Key(String),
    Get,
    Random,
    Show,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_ascii_lowercase().as_str() {
            "" => Command::Empty,
            "year" | "y" => Command::Year(rest.to_string()),
            "month" | "m" => Command::Month(rest.to_string()),
            "key" => Command::Key(rest.to_string()),
            "get" | "g" => Command::Get,
            "random" | "r" => Command::Random,
            "show" | "s" => Command::Show,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

/// Prompt loop: reads commands until `quit` or end of input.
pub async fn run_session<I, O, R>(
    input: I,
    output: &mut O,
    session: &mut SessionState,
    client: &MovieQueryClient,
    format: OutputFormat,
    rng: &mut R,
) -> Result<()>
where
    I: BufRead,
    O: Write,
    R: Rng,
{
    let bounds = session.bounds();
    writeln!(output, "🎬 Top 5 Movies by Month")?;
    writeln!(
        output,
        "Pick a year ({}-{}) and month, then `get`. Type `help` for commands.",
        bounds.min, bounds.max
    )?;
    writeln!(output, "Selected: {}", session.describe())?;

    for line in input.lines() {
        let line = line?;
        match Command::parse(&line) {
            Command::Empty => continue,
            Command::Quit => break,
            Command::Help => writeln!(output, "{}", HELP)?,
            Command::Show => writeln!(output, "Selected: {}", session.describe())?,
            Command::Year(value) => {
                let applied = value
                    .parse::<i32>()
                    .map_err(|_| format!("'{}' is not a year", value))
                    .and_then(|year| {
                        session
                            .set_year(year)
                            .map_err(|e| e.user_friendly_message())
                    });
                match applied {
                    Ok(()) => writeln!(output, "Selected: {}", session.describe())?,
                    Err(message) => writeln!(output, "❌ {}", message)?,
                }
            }
            Command::Month(value) => match session.set_month_str(&value) {
                Ok(()) => writeln!(output, "Selected: {}", session.describe())?,
                Err(e) => writeln!(output, "❌ {}", e.user_friendly_message())?,
            },
            Command::Key(value) => {
                session.set_api_key(value);
                if session.has_api_key() {
                    writeln!(output, "API key set.")?;
                } else {
                    writeln!(output, "API key cleared.")?;
                }
            }
            Command::Random => {
                let label = random_pick(session, rng);
                writeln!(output, "🎲 Selected: {}", label)?;
            }
            Command::Get => {
                if session.has_api_key() {
                    writeln!(output, "⏳ Fetching movies for {}...", session.describe())?;
                    output.flush()?;
                }
                let outcome = get_movies(session, client).await;
                writeln!(output, "{}", format_outcome(&outcome, format, client)?)?;
            }
            Command::Unknown(text) => {
                writeln!(output, "Unknown command '{}'. Type `help`.", text)?;
            }
        }
    }

    Ok(())
}
