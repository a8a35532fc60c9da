use common::config::AppConfig;
use std::{fs, path::Path, process::ExitCode};

mod runner;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let (url, db_file) = {
        let config = AppConfig::global();
        (config.database_url(), config.sqlite_file().map(str::to_owned))
    };
    let args: Vec<String> = std::env::args().collect();

    let outcome = match (args.get(1).map(|s| s.as_str()), db_file.as_deref()) {
        (Some("clean"), Some(path)) => remove_db_file(path),
        (Some("fresh"), Some(path)) => match remove_db_file(path).and_then(|_| create_db_dir(path)) {
            Ok(()) => run(&url).await,
            Err(e) => Err(e),
        },
        (Some(cmd @ ("clean" | "fresh")), None) => Err(format!(
            "'{}' only applies to a sqlite file, DATABASE_PATH is a connection URL",
            cmd
        )),
        (_, Some(path)) => match create_db_dir(path) {
            Ok(()) => run(&url).await,
            Err(e) => Err(e),
        },
        (_, None) => run(&url).await,
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(url: &str) -> Result<(), String> {
    runner::run_all_migrations(url)
        .await
        .map_err(|e| format!("Migration failed: {}", e))
}

fn remove_db_file(path: &str) -> Result<(), String> {
    let db_path = Path::new(path);
    if db_path.exists() {
        fs::remove_file(db_path)
            .map_err(|e| format!("Failed to delete DB {}: {}", db_path.display(), e))?;
        println!("Deleted DB: {}", db_path.display());
    } else {
        println!("DB file does not exist: {}", db_path.display());
    }
    Ok(())
}

fn create_db_dir(path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create DB directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}
