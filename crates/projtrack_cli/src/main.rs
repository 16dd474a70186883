//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `projtrack_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use projtrack_core::db::open_store_in_memory;
use projtrack_core::{ListQuery, ProjectDraft, ProjectService, SqliteProjectRepository};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("projtrack_core version={}", projtrack_core::core_version());

    match smoke_round_trip() {
        Ok(count) => {
            println!("projtrack_core smoke projects={count}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("projtrack_core smoke failed: {message}");
            ExitCode::FAILURE
        }
    }
}

// Exercises the store end to end against a throwaway in-memory slot.
fn smoke_round_trip() -> Result<usize, String> {
    let conn = open_store_in_memory().map_err(|err| err.to_string())?;
    let repo = SqliteProjectRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let service = ProjectService::new(repo);

    let draft = ProjectDraft {
        name: "Smoke".to_string(),
        client: "Local".to_string(),
        start_date: "2024-01-01".to_string(),
        end_date: "2024-06-01".to_string(),
        cover_image: None,
    };
    service.create(&draft).map_err(|err| err.to_string())?;

    Ok(service.list(&ListQuery::default()).len())
}
