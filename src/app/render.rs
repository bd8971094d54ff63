use crate::app::actions::Outcome;
use crate::core::client::MovieQueryClient;
use crate::domain::model::MovieResult;
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// A movie with its poster resolved to a full image URL.
#[derive(Debug, Clone, Serialize)]
pub struct MovieCard<'a> {
    pub title: &'a str,
    pub poster_url: Option<String>,
    pub overview: &'a str,
    pub release_date: &'a str,
    pub vote_average: Option<f64>,
}

impl<'a> MovieCard<'a> {
    pub fn from_result(movie: &'a MovieResult, client: &MovieQueryClient) -> Self {
        Self {
            title: movie.display_title(),
            poster_url: movie.poster_path.as_deref().map(|p| client.poster_url(p)),
            overview: movie.display_overview(),
            release_date: movie.display_release_date(),
            vote_average: movie.vote_average,
        }
    }
}

pub fn render_text(movies: &[MovieResult], client: &MovieQueryClient) -> String {
    let mut lines = Vec::new();
    for movie in movies {
        let card = MovieCard::from_result(movie, client);
        lines.push("---".to_string());
        lines.push(card.title.to_string());
        lines.push(match &card.poster_url {
            Some(url) => format!("Poster: {}", url),
            None => "No image".to_string(),
        });
        lines.push(format!("Release Date: {}", card.release_date));
        lines.push(format!("Rating: ⭐ {}", movie.display_rating()));
        lines.push(format!("Overview: {}", card.overview));
    }
    lines.join("\n")
}

pub fn render_json(movies: &[MovieResult], client: &MovieQueryClient) -> Result<String> {
    let cards: Vec<MovieCard> = movies
        .iter()
        .map(|m| MovieCard::from_result(m, client))
        .collect();
    Ok(serde_json::to_string_pretty(&cards)?)
}

pub fn format_outcome(
    outcome: &Outcome,
    format: OutputFormat,
    client: &MovieQueryClient,
) -> Result<String> {
    Ok(match outcome {
        Outcome::Movies(movies) => match format {
            OutputFormat::Text => render_text(movies, client),
            OutputFormat::Json => render_json(movies, client)?,
        },
        Outcome::Warning(message) => format!("⚠️  {}", message),
        Outcome::Error(message) => format!("❌ {}", message),
    })
}

/// Movies go to stdout, warnings and errors to stderr.
pub fn print_outcome(
    outcome: &Outcome,
    format: OutputFormat,
    client: &MovieQueryClient,
) -> Result<()> {
    let rendered = format_outcome(outcome, format, client)?;
    match outcome {
        Outcome::Movies(_) => println!("{}", rendered),
        Outcome::Warning(_) | Outcome::Error(_) => eprintln!("{}", rendered),
    }
    Ok(())
}
