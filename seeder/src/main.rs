use colored::*;
use common::config::AppConfig;
use common::logger::init_logger;
use migration::{Migrator, MigratorTrait};
use seeder::{GenerationConfig, SeedError, run_generation};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let (banner, log_level, log_file, log_to_stdout) = {
        let config = AppConfig::global();
        (
            format!("{} [{}]", config.project_name, config.env),
            config.log_level.clone(),
            config.log_file.clone(),
            config.log_to_stdout,
        )
    };
    if let Err(e) = init_logger(&log_level, &log_file, log_to_stdout) {
        eprintln!("Failed to initialise logger at {}: {}", log_file, e);
    }

    let mut config = match GenerationConfig::from_env() {
        Ok(config) => config,
        Err(e) => return fail(&e),
    };
    config.show_progress = true;

    println!("{} {}", "Seeding".bold(), banner);
    log::info!("seeding {} with {:?}", banner, config);

    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{} {}", "Failed to connect to database:".red(), e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        eprintln!("{} {}", "Migration failed:".red(), e);
        return ExitCode::FAILURE;
    }

    match run_generation(&db, &config).await {
        Ok(report) => {
            println!(
                "{} {}",
                format!("Seeded in {:.2?}:", report.elapsed).green().bold(),
                report.counts()
            );
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn fail(err: &SeedError) -> ExitCode {
    match err.stage() {
        Some(stage) => eprintln!("{} {}", format!("Seeding failed at {}:", stage).red().bold(), err),
        None => eprintln!("{} {}", "Seeding failed:".red().bold(), err),
    }
    ExitCode::FAILURE
}
