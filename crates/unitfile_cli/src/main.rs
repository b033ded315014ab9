//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `unitfile_core` linkage.
//! - Optionally open one collection file and print its shape, keeping
//!   output deterministic for quick local sanity checks.

use std::process::ExitCode;

use unitfile_core::Collection;

fn main() -> ExitCode {
    println!("unitfile_core ping={}", unitfile_core::ping());
    println!("unitfile_core version={}", unitfile_core::core_version());

    let Some(path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    match Collection::open(&path) {
        Ok(collection) => {
            println!("collection path={path} units={}", collection.size());
            if let Ok(labels) = collection.labels() {
                for label in labels {
                    println!("label={label}");
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
