use crate::app::actions::{get_movies, random_pick, Outcome};
use crate::app::session::SessionState;
use crate::config::CliConfig;
use crate::domain::ports::MovieSource;
use rand::Rng;

/// `--year Y --month M` or `--random`: apply the selection, then fetch once.
pub async fn run_once<S, R>(
    config: &CliConfig,
    session: &mut SessionState,
    source: &S,
    rng: &mut R,
) -> Outcome
where
    S: MovieSource + ?Sized,
    R: Rng,
{
    if config.random {
        let label = random_pick(session, rng);
        tracing::info!("🎲 Random pick: {}", label);
    } else if let (Some(year), Some(month)) = (config.year, config.month.as_deref()) {
        let selected = session
            .set_year(year)
            .and_then(|_| session.set_month_str(month));
        if let Err(e) = selected {
            tracing::warn!("Rejected selection {}/{}: {}", year, month, e);
            return Outcome::from_error(&e);
        }
    }

    get_movies(session, source).await
}
