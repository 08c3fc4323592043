//! CLI smoke entry point.
//!
//! # Responsibility
//! - Initialize file logging under the system temp directory.
//! - Exercise the actor model setters on a sample entity.
//! - Round-trip that entity through a JSON repository in a scratch file.

use actors_core::{Actor, ActorService, JsonActorRepository, ValidationError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("actors_core ping={}", actors_core::ping());
    println!("actors_core version={}", actors_core::core_version());

    match start_logging() {
        Ok(log_dir) => println!(
            "logging level={} dir={}",
            actors_core::default_log_level(),
            log_dir.display()
        ),
        Err(err) => eprintln!("warning: logging disabled: {err}"),
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ValidationError> {
    let mut actor = Actor::new(
        1,
        "Круз Том Сергеевич",
        20.0,
        "Заслуженный артист РФ",
        ["Оскар"],
    )?;
    println!("{actor}");

    actor.set_fio("Кузнецов Том Сергеевич")?;
    actor.set_staz(15.0)?;
    actor.add_award("Золотой глобус")?;
    println!("{actor}");
    println!("{}", actor.short_str());

    let path = std::env::temp_dir().join(format!("actors-cli-{}.json", std::process::id()));
    let mut service = ActorService::new(JsonActorRepository::open(&path));
    match service.create_actor(&actor) {
        Some(id) => match service.get_actor(id)? {
            Some(stored) => println!("stored id={id}: {stored}"),
            None => println!("stored id={id} but it could not be read back"),
        },
        None => println!("failed to store actor in {}", path.display()),
    }
    if let Some(warning) = remove_scratch_file(&path) {
        eprintln!("{warning}");
    }

    Ok(())
}

fn start_logging() -> Result<PathBuf, String> {
    let log_dir = std::env::temp_dir().join("actors-cli-logs");
    actors_core::init_logging(actors_core::default_log_level(), &log_dir.to_string_lossy())?;
    Ok(log_dir)
}

/// Returns the warning to print when the scratch file cannot be removed.
fn remove_scratch_file(path: &Path) -> Option<String> {
    std::fs::remove_file(path)
        .err()
        .map(|err| format!("warning: failed to remove {}: {err}", path.display()))
}
