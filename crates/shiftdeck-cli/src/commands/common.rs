use std::io::{self, BufRead, IsTerminal, Write};

use chrono::NaiveDate;
use serde::Serialize;
use shiftdeck_core::api::{DateRange, TimeClockApiClient};
use shiftdeck_core::classify::{classify, ConflictKind};
use shiftdeck_core::models::{Conflict, PreviewRow, TimeClockEntry};
use shiftdeck_core::session::Session;
use shiftdeck_core::timefmt::TimeParser;

use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

/// JSON projection of one conflict group with its classification.
#[derive(Debug, Serialize)]
pub struct ConflictListItem {
    pub number: usize,
    pub formatted_date: String,
    pub kind: &'static str,
    pub items: Vec<ConflictItemView>,
}

#[derive(Debug, Serialize)]
pub struct ConflictItemView {
    pub shift_name: String,
    pub start: String,
    pub end: String,
    pub worklog_id: Option<i64>,
}

pub fn resolve_session(profile_flag: Option<&str>) -> Result<Session, CliError> {
    let config = CliProfilesConfig::load()?;
    let profile_name = config.resolve_profile_name(profile_flag);
    let profile = config.profile(&profile_name);
    Ok(profile.into_session_config().into_session()?)
}

pub fn build_client(profile_flag: Option<&str>) -> Result<TimeClockApiClient, CliError> {
    let session = resolve_session(profile_flag)?;
    Ok(TimeClockApiClient::new(session)?)
}

pub fn parse_date_range(from: &str, to: &str) -> Result<DateRange, CliError> {
    let start = parse_date(from)?;
    let end = parse_date(to)?;
    Ok(DateRange::new(start, end)?)
}

fn parse_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::InvalidDate(raw.to_string()))
}

pub fn conflict_list_item(number: usize, conflict: &Conflict) -> ConflictListItem {
    let mut parser = TimeParser::new();
    ConflictListItem {
        number,
        formatted_date: conflict.formatted_date.clone(),
        kind: classify(&mut parser, &conflict.items).as_str(),
        items: conflict
            .items
            .iter()
            .map(|item| ConflictItemView {
                shift_name: item.shift_name.clone(),
                start: item.start.clone(),
                end: item.end.clone(),
                worklog_id: item.worklog_id.map(|id| id.as_i64()),
            })
            .collect(),
    }
}

pub fn format_entry_lines(entries: &[TimeClockEntry]) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<12} {:<18} {:<18} {:>7} {:>7} {:>7}",
        "DATE", "USER", "SHIFT", "IN", "OUT", "TOTAL"
    )];
    lines.extend(entries.iter().map(|entry| {
        format!(
            "{:<12} {:<18} {:<18} {:>7} {:>7} {:>7}",
            entry.date, entry.user_name, entry.shift_name, entry.clock_in, entry.clock_out,
            entry.total
        )
    }));
    lines
}

pub fn format_conflict_lines(conflicts: &[ConflictListItem]) -> Vec<String> {
    let mut lines = Vec::new();
    for conflict in conflicts {
        lines.push(format!(
            "#{} {} [{}]",
            conflict.number, conflict.formatted_date, conflict.kind
        ));
        for (index, item) in conflict.items.iter().enumerate() {
            let worklog = item
                .worklog_id
                .map_or_else(|| "-".to_string(), |id| id.to_string());
            lines.push(format!(
                "  {}. {:<18} {} - {}  (worklog {worklog})",
                index + 1,
                item.shift_name,
                item.start,
                item.end
            ));
        }
    }
    lines
}

pub fn format_preview_lines(kind: ConflictKind, rows: &[PreviewRow]) -> Vec<String> {
    let mut lines = vec![format!("Resulting worklogs ({}):", kind.as_str())];
    lines.extend(rows.iter().map(|row| {
        format!(
            "  {:<18} {:>5} - {:<5}  total {}",
            row.shift_name, row.start, row.end, row.total
        )
    }));
    lines
}

/// Ask for confirmation on stdin unless `--yes` was passed.
///
/// A non-interactive stdin without `--yes` declines, so scripts must opt in
/// explicitly.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool, CliError> {
    if assume_yes {
        return Ok(true);
    }
    if !io::stdin().is_terminal() {
        return Ok(false);
    }

    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
