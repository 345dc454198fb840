use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pairing::{PairingScope, pair_logs};
use crate::core::range::{DateRange, parse_period, validate_range};
use crate::core::stats::{aggregate, aggregate_range};
use crate::db::pool::DbPool;
use crate::db::queries::{load_entries, load_entries_between};
use crate::db::settings::load_thresholds;
use crate::db::users::load_roster;
use crate::errors::{AppError, AppResult};
use crate::models::stats::AttendanceStats;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREEN, RED, YELLOW, paint};
use crate::utils::date;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats {
        date: date_arg,
        period,
        from,
        to,
    } = cmd
    {
        let range = resolve_range(period, from, to)?;

        let pool = DbPool::new(&cfg.database)?;
        let thresholds = load_thresholds(&pool.conn, &cfg.thresholds()?)?;
        let roster = load_roster(&pool.conn)?;

        match range {
            Some(range) => {
                let entries = if range.is_unbounded() {
                    load_entries(&pool.conn)?
                } else {
                    let (lo, hi) = PairingScope::Range(range).bounds_ms(&Local);
                    load_entries_between(&pool.conn, lo, hi)?
                };

                let report = aggregate_range(&roster, &entries, &range, thresholds.late_threshold, &Local);

                header(format!("Attendance {}", range.label()));
                for day in &report.days {
                    println!("{}  {}", day.date.format("%Y-%m-%d"), format_counts(&day.stats));
                }
                println!("{}       {}", paint(CYAN, "TOTAL"), format_counts(&report.totals));
            }
            None => {
                let day = match date_arg {
                    Some(d) => date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
                    None => date::today(),
                };

                let scope = PairingScope::Day(day);
                let (lo, hi) = scope.bounds_ms(&Local);
                let entries = load_entries_between(&pool.conn, lo, hi)?;
                let pairings = pair_logs(&entries, &scope, &Local);
                let stats = aggregate(&roster, &pairings, thresholds.late_threshold, day, &Local);

                header(format!("Attendance {}", day.format("%Y-%m-%d")));
                println!("{}", format_counts(&stats));
            }
        }
    }
    Ok(())
}

/// `--period` wins; otherwise `--from`/`--to` build a validated range.
fn resolve_range(
    period: &Option<String>,
    from: &Option<String>,
    to: &Option<String>,
) -> AppResult<Option<DateRange>> {
    if let Some(p) = period {
        return parse_period(p).map(Some);
    }

    if from.is_none() && to.is_none() {
        return Ok(None);
    }

    let parse = |s: &Option<String>| -> AppResult<_> {
        s.as_ref()
            .map(|v| date::parse_date(v).ok_or_else(|| AppError::InvalidDate(v.clone())))
            .transpose()
    };

    validate_range(parse(from)?, parse(to)?).map(Some)
}

pub(crate) fn format_counts(stats: &AttendanceStats) -> String {
    format!(
        "present: {}  late: {}  absent: {}  total: {}",
        paint(GREEN, &stats.present.to_string()),
        paint(YELLOW, &stats.late.to_string()),
        paint(RED, &stats.absent.to_string()),
        stats.total()
    )
}
