use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::colors;
use crate::utils::table::strip_ansi;
use ansi_term::Colour;

const OP_TARGET_MAX: usize = 60;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "user_del" => Colour::Red,
        "threshold" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        other if other.starts_with("event_") || other.starts_with("user_") => Colour::Cyan,
        _ => Colour::White,
    }
}

/// "op (target)" with only the operation colored, cut to 60 visible chars.
fn op_target_cell(operation: &str, target: &str) -> String {
    let color = color_for_operation(operation);
    let visible = if target.is_empty() {
        operation.to_string()
    } else {
        format!("{operation} ({target})")
    };

    let visible = if visible.chars().count() > OP_TARGET_MAX {
        let mut s: String = visible.chars().take(OP_TARGET_MAX - 3).collect();
        s.push_str("...");
        s
    } else {
        visible
    };

    let paint = |op: &str| {
        if colors::enabled() {
            color.paint(op).to_string()
        } else {
            op.to_string()
        }
    };

    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", paint(op), rest),
        None => paint(&visible),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = DbPool::new(&cfg.database)?;
        let rows = load_log(&pool.conn)?;

        if rows.is_empty() {
            info("Internal log is empty.");
            return Ok(());
        }

        let cells: Vec<(i64, String, String, String)> = rows
            .into_iter()
            .map(|(id, raw_date, operation, target, message)| {
                let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(raw_date);
                (id, date, op_target_cell(&operation, &target), message)
            })
            .collect();

        let id_w = cells.iter().map(|c| c.0.to_string().len()).max().unwrap_or(1);
        let date_w = cells.iter().map(|c| c.1.len()).max().unwrap_or(10);
        let op_w = cells
            .iter()
            .map(|c| strip_ansi(&c.2).chars().count())
            .max()
            .unwrap_or(10);

        println!("📜 Internal log:\n");

        for (id, date, op_target, message) in cells {
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&op_target).chars().count()));
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                op_target,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }
    }

    Ok(())
}
