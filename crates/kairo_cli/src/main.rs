//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `kairo_core` linkage.
//! - Print a deterministic summary of the configured store.
//! - Start file logging from `KAIRO_LOG_LEVEL` and `KAIRO_LOG_DIR`.

use kairo_core::query::{badges, DashboardStats};
use kairo_core::{Clock, CoreConfig, SqliteKvStore, Store, SystemClock};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("kairo_core ping={}", kairo_core::ping());
    println!("kairo_core version={}", kairo_core::core_version());

    let config = CoreConfig::from_env();
    match config.init_logging() {
        Ok(()) => println!(
            "kairo_core log_level={} log_dir={}",
            config.log_level.as_str(),
            config.log_dir.display()
        ),
        Err(err) => eprintln!("kairo_core logging disabled error={err}"),
    }
    let storage = match SqliteKvStore::open(&config.db_path) {
        Ok(storage) => storage,
        Err(err) => {
            eprintln!("kairo_core store={} error={err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };

    let today = SystemClock.today();
    let store = Store::open(storage, today);
    let state = store.state();
    let stats = DashboardStats::from_tasks(state.all_tasks(), today);
    let unread = badges(state);

    println!("kairo_core store={}", config.db_path.display());
    println!(
        "kairo_core client_tasks={} personal_tasks={} first_time_user={}",
        state.client_tasks.len(),
        state.personal_tasks.len(),
        state.is_first_time_user
    );
    println!(
        "kairo_core overdue={} due_soon={} completed={} unread_notifications={} unread_messages={}",
        stats.overdue,
        stats.due_soon,
        stats.completed,
        unread.unread_notifications,
        unread.unread_messages
    );
    ExitCode::SUCCESS
}
