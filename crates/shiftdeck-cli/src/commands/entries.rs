use shiftdeck_core::api::WorklogBackend;
use shiftdeck_core::models::{ShiftId, UserId};
use shiftdeck_core::pipeline::{
    filter_entries, paginate, sort_entries, EntryFilter, SortDirection, SortKey,
};

use crate::cli::SortColumn;
use crate::commands::common::{build_client, format_entry_lines, parse_date_range};
use crate::error::CliError;

pub struct EntriesArgs<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub user: Option<i64>,
    pub shift: Option<i64>,
    pub search: Option<String>,
    pub sort: SortColumn,
    pub desc: bool,
    pub page: usize,
    pub per_page: usize,
    pub as_json: bool,
}

pub async fn run_entries(args: EntriesArgs<'_>, profile: Option<&str>) -> Result<(), CliError> {
    let range = parse_date_range(args.from, args.to)?;
    let client = build_client(profile)?;
    let entries = client.fetch_time_clock(&range).await?;

    let filter = EntryFilter {
        user_id: args.user.map(UserId::new),
        shift_id: args.shift.map(ShiftId::new),
        search: args.search,
    };
    let key = match args.sort {
        SortColumn::Date => SortKey::Date,
        SortColumn::User => SortKey::UserName,
        SortColumn::Shift => SortKey::ShiftName,
        SortColumn::Total => SortKey::Total,
    };
    let direction = if args.desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };

    let derived = sort_entries(filter_entries(&entries, &filter), key, direction);
    let page = paginate(&derived, args.page, args.per_page);

    if args.as_json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
    } else {
        for line in format_entry_lines(&page.items) {
            println!("{line}");
        }
        println!(
            "Page {}/{} ({} entries)",
            page.page, page.total_pages, page.total_items
        );
    }

    Ok(())
}
