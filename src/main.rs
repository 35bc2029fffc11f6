// src/main.rs — heropick entry point

use clap::Parser;

use heropick::cli::{self, Cli, Commands};
use heropick::infra::config::Config;
use heropick::infra::logger;

fn main() {
    let cli = Cli::parse();

    // HEROPICK_LOG / RUST_LOG still take precedence
    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    logger::init_logging(level);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Falls back to defaults if no config.toml
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    let catalog = || cli::load_catalog(&cli, &config);
    match &cli.command {
        Commands::Db { action } => cli::db::run_db(action, &config),
        Commands::Heroes { role, json } => {
            cli::heroes::run_heroes(&catalog()?, role.as_deref(), *json)
        }
        Commands::Roles => cli::heroes::run_roles(&catalog()?),
        Commands::Evaluate {
            hero_id,
            prefs,
            explain,
            json,
        } => {
            let prefs = prefs.resolve(&config)?;
            cli::evaluate::run_evaluate(&catalog()?, &config, hero_id, &prefs, *explain, *json)
        }
        Commands::Recommend {
            role,
            limit,
            prefs,
            save,
            json,
        } => {
            let prefs = prefs.resolve(&config)?;
            cli::evaluate::run_recommend(
                &catalog()?,
                &config,
                role.as_deref(),
                *limit,
                &prefs,
                *save,
                *json,
            )
        }
    }
}
