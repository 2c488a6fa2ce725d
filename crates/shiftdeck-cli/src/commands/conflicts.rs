use shiftdeck_core::api::WorklogBackend;

use crate::commands::common::{
    build_client, conflict_list_item, format_conflict_lines, parse_date_range, ConflictListItem,
};
use crate::error::CliError;

pub async fn run_conflicts(
    from: &str,
    to: &str,
    as_json: bool,
    profile: Option<&str>,
) -> Result<(), CliError> {
    let range = parse_date_range(from, to)?;
    let client = build_client(profile)?;
    let conflicts = client.fetch_conflicts(&range).await?;

    let items: Vec<ConflictListItem> = conflicts
        .iter()
        .enumerate()
        .map(|(index, conflict)| conflict_list_item(index + 1, conflict))
        .collect();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if items.is_empty() {
        println!("No conflicts in this date range");
    } else {
        for line in format_conflict_lines(&items) {
            println!("{line}");
        }
    }

    Ok(())
}
