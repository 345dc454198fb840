//! rattendlog main entrypoint.

use rattendlog::errors::AppError;
use rattendlog::run;
use rattendlog::ui::messages::permission;

fn main() {
    if let Err(e) = run() {
        match e {
            AppError::PermissionDenied(msg) => permission(msg),
            other => eprintln!("Error: {}", other),
        }
        std::process::exit(1);
    }
}
