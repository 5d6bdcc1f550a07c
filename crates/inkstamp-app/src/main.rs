//! Main application entry point.

use inkstamp_app::{App, AppConfig, AppError, AppResult, Session, ShortcutRegistry};
use std::path::PathBuf;

const USAGE: &str =
    "usage: inkstamp [--config <config.json>] <session.json>\n       inkstamp --shortcuts";

fn main() {
    env_logger::init();

    if let Err(e) = run(std::env::args().skip(1).collect()) {
        log::error!("{e}");
        eprintln!("inkstamp: {e}");
        std::process::exit(1);
    }
}

fn run(args: Vec<String>) -> AppResult<()> {
    let mut config_path: Option<PathBuf> = None;
    let mut session_path: Option<PathBuf> = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--shortcuts" => {
                ShortcutRegistry::print_all();
                return Ok(());
            }
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| AppError::Usage(format!("--config needs a path\n{USAGE}")))?;
                config_path = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ if session_path.is_none() => session_path = Some(PathBuf::from(arg)),
            _ => return Err(AppError::Usage(format!("unexpected argument {arg:?}\n{USAGE}"))),
        }
    }

    let session_path = session_path.ok_or_else(|| AppError::Usage(USAGE.to_string()))?;
    let config = match config_path {
        Some(path) => AppConfig::load(&path)?,
        None => AppConfig::default(),
    };

    let mut app = App::new(config)?;
    Session::load(&session_path)?.replay(&mut app)?;

    for path in app.exported() {
        println!("{}", path.display());
    }
    log::info!("Session finished with {} strokes", app.pad().command_count());
    Ok(())
}
