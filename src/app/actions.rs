use crate::app::session::SessionState;
use crate::domain::model::MovieResult;
use crate::domain::ports::MovieSource;
use crate::utils::error::MovieError;
use rand::Rng;

pub const NO_MOVIES_MESSAGE: &str = "No movies found or invalid API key.";

/// What the front-end should show after "Get Movies".
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Movies(Vec<MovieResult>),
    Warning(String),
    Error(String),
}

impl Outcome {
    pub fn from_error(e: &MovieError) -> Self {
        Outcome::Error(format!(
            "{} 💡 {}",
            e.user_friendly_message(),
            e.recovery_suggestion()
        ))
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Movies(_) => 0,
            Outcome::Warning(_) => 2,
            Outcome::Error(_) => 1,
        }
    }
}

pub async fn get_movies<S: MovieSource + ?Sized>(session: &SessionState, source: &S) -> Outcome {
    if !session.has_api_key() {
        tracing::warn!("No API key set, not contacting TMDb");
        return Outcome::from_error(&MovieError::MissingApiKey);
    }

    let query = match session.query() {
        Ok(query) => query,
        Err(e) => return Outcome::from_error(&e),
    };

    tracing::info!("Fetching top movies for {}", session.describe());
    let movies = source.fetch(&query).await;

    if movies.is_empty() {
        Outcome::Warning(NO_MOVIES_MESSAGE.to_string())
    } else {
        Outcome::Movies(movies)
    }
}

/// Re-rolls the selection; does not fetch.
pub fn random_pick<R: Rng>(session: &mut SessionState, rng: &mut R) -> String {
    session.randomize(rng);
    tracing::debug!("Random pick: {}-{:02}", session.year(), session.month());
    session.describe()
}
