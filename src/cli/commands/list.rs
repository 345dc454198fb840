use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::{AttendanceRecord, Core};
use crate::core::pairing::{PairingScope, pair_logs};
use crate::core::range::{DateRange, parse_period, validate_range};
use crate::db::pool::DbPool;
use crate::db::queries::{load_entries, load_entries_for_user, write_badges};
use crate::db::settings::load_thresholds;
use crate::db::users::load_roster;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info};
use crate::utils::colors::{colorize_in_out, colorize_optional};
use crate::utils::date;
use crate::utils::formatting::{describe_status, mins2readable};
use crate::utils::table::{Column, Table};
use chrono::{Datelike, Local, NaiveDate};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        period,
        date: date_arg,
        user,
        now,
    } = cmd
    {
        let scope = resolve_scope(period, date_arg, *now)?;

        let pool = DbPool::new(&cfg.database)?;
        let thresholds = load_thresholds(&pool.conn, &cfg.thresholds()?)?;

        let entries = match user {
            Some(u) => load_entries_for_user(&pool.conn, u)?,
            None => load_entries(&pool.conn)?,
        };
        let roster = load_roster(&pool.conn)?;

        let pairings = pair_logs(&entries, &scope, &Local);
        let records = Core::records(&pairings, &roster, &thresholds, &Local);

        if records.is_empty() {
            info("No attendance records for the selected period.");
            return Ok(());
        }

        print_records(&records);

        // cache the computed badges on the time-in entries
        let changed = write_badges(&pool.conn, &Core::pending_badges(&records))?;
        if changed > 0 {
            tracing::debug!(changed, "attendance badges refreshed");
        }
    }
    Ok(())
}

fn resolve_scope(period: &Option<String>, date_arg: &Option<String>, now: bool) -> AppResult<PairingScope> {
    if now {
        return Ok(PairingScope::Day(date::today()));
    }

    if let Some(d) = date_arg {
        let day = date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?;
        return Ok(PairingScope::Day(day));
    }

    if let Some(p) = period {
        return Ok(PairingScope::Range(parse_period(p)?));
    }

    // default: current month
    let today = date::today();
    let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);
    let range: DateRange = validate_range(Some(first), Some(today))?;
    Ok(PairingScope::Range(range))
}

fn print_records(records: &[AttendanceRecord]) {
    let mut current_date: Option<&str> = None;
    let mut table: Option<Table> = None;

    for r in records {
        if current_date != Some(r.date.as_str()) {
            if let Some(t) = table.take() {
                print!("{}", t.render());
                println!();
            }
            header(&r.date);
            current_date = Some(r.date.as_str());
            table = Some(Table::new(vec![
                Column::new("#", 3),
                Column::new("FACULTY", 24),
                Column::new("IN", 6),
                Column::new("OUT", 6),
                Column::new("DURATION", 9),
                Column::new("STATUS", 10),
            ]));
        }

        let out = r.time_out.clone().unwrap_or_else(|| "--:--".to_string());
        let duration = r
            .duration_minutes
            .map(|m| mins2readable(m, false, false))
            .unwrap_or_else(|| "active".to_string());

        if let Some(t) = table.as_mut() {
            t.add_row(vec![
                r.entry_number.to_string(),
                r.name.clone(),
                colorize_in_out(&r.time_in, true),
                colorize_in_out(&out, false),
                colorize_optional(&duration),
                describe_status(r.status),
            ]);
        }
    }

    if let Some(t) = table {
        print!("{}", t.render());
    }
}
