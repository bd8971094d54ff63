use clap::Parser;
use monthly_movies::app::interactive::run_session;
use monthly_movies::app::oneshot::run_once;
use monthly_movies::app::render::print_outcome;
use monthly_movies::utils::error::ErrorSeverity;
use monthly_movies::utils::{logger, validation::Validate};
use monthly_movies::{CliConfig, MovieError, MovieQueryClient, SessionState, Settings};

fn exit_with(e: &MovieError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Critical => 3,
        _ => 1,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    // 合併並驗證配置
    let settings = match Settings::from_cli(&config) {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };
    if let Err(e) = settings.validate() {
        exit_with(&e);
    }
    let bounds = match settings.year_bounds() {
        Ok(bounds) => bounds,
        Err(e) => exit_with(&e),
    };

    let client = MovieQueryClient::with_base_urls(&settings.api_base, &settings.image_base);
    let mut session = SessionState::new(bounds, settings.api_key.clone());
    let mut rng = rand::thread_rng();

    if config.is_interactive() {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        run_session(
            stdin.lock(),
            &mut stdout,
            &mut session,
            &client,
            config.format,
            &mut rng,
        )
        .await?;
        return Ok(());
    }

    // 單次模式
    let outcome = run_once(&config, &mut session, &client, &mut rng).await;
    if config.random {
        eprintln!("🎲 {}", session.describe());
    }
    print_outcome(&outcome, config.format, &client)?;

    let exit_code = outcome.exit_code();
    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
