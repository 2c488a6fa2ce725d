use shiftdeck_core::api::{DateRange, TimeClockApiClient, WorklogBackend};
use shiftdeck_core::classify::{classify, ConflictKind};
use shiftdeck_core::models::{Conflict, PreviewRow};
use shiftdeck_core::resolve::{
    cut_preview, delete_preview, longer_index, FlowState, ResolutionFlow, ResolveAction,
};
use shiftdeck_core::service::TimeClockService;
use shiftdeck_core::timefmt::TimeParser;

use crate::commands::common::{build_client, confirm, format_preview_lines, parse_date_range};
use crate::error::CliError;

pub struct ResolveArgs<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub conflict: usize,
    pub item: Option<usize>,
    pub assume_yes: bool,
}

pub async fn run_cut(args: ResolveArgs<'_>, profile: Option<&str>) -> Result<(), CliError> {
    let range = parse_date_range(args.from, args.to)?;
    let client = build_client(profile)?;
    let conflict = fetch_conflict(&client, &range, args.conflict).await?;

    let mut parser = TimeParser::new();
    let kind = classify(&mut parser, &conflict.items);
    if kind == ConflictKind::DeleteOnly {
        return Err(CliError::CutNotAvailable(args.conflict));
    }

    let selected_index = match args.item {
        Some(number) => checked_index(&conflict, number)?,
        None => longer_index(&mut parser, &conflict.items)
            .ok_or(CliError::CutNotAvailable(args.conflict))?,
    };
    // A non-delete-only classification guarantees exactly two items.
    let selected = &conflict.items[selected_index];
    let other = &conflict.items[1 - selected_index];

    let mut flow = ResolutionFlow::new();
    flow.open_menu(ResolveAction::Cut);
    flow.open_preview(cut_preview(&mut parser, selected, other));

    for line in format_preview_lines(kind, preview_rows(&flow)) {
        println!("{line}");
    }

    if !confirm("Apply this cut?", args.assume_yes)? {
        flow.cancel();
        println!("Cancelled");
        return Ok(());
    }

    let (_, confirmed_rows) = flow
        .confirm()
        .ok_or_else(|| CliError::Config("resolution flow lost its preview".to_string()))?;

    let mut service = TimeClockService::new(client, range);
    let outcome = service.confirm_cut(&confirmed_rows).await;
    match &outcome {
        Ok(()) => flow.settle(Ok(())),
        Err(error) => flow.settle(Err(error.to_string())),
    }
    outcome?;

    println!(
        "Cut applied; {} entries in range after refetch",
        service.entries().len()
    );
    Ok(())
}

pub async fn run_delete(args: ResolveArgs<'_>, profile: Option<&str>) -> Result<(), CliError> {
    let range = parse_date_range(args.from, args.to)?;
    let client = build_client(profile)?;
    let conflict = fetch_conflict(&client, &range, args.conflict).await?;

    let item_number = args.item.unwrap_or(1);
    let index = checked_index(&conflict, item_number)?;
    let item = &conflict.items[index];
    let worklog_id = item.worklog_id.ok_or(CliError::MissingWorklogId)?;

    let mut parser = TimeParser::new();
    let mut flow = ResolutionFlow::new();
    flow.open_menu(ResolveAction::Delete);
    flow.open_preview(vec![delete_preview(&mut parser, item)]);

    println!("Deleting worklog {worklog_id}:");
    for line in format_preview_lines(ConflictKind::DeleteOnly, preview_rows(&flow)) {
        println!("{line}");
    }

    if !confirm("Delete this worklog?", args.assume_yes)? {
        flow.cancel();
        println!("Cancelled");
        return Ok(());
    }

    flow.confirm()
        .ok_or_else(|| CliError::Config("resolution flow lost its preview".to_string()))?;

    let mut service = TimeClockService::new(client, range);
    let outcome = service.confirm_delete(worklog_id).await;
    match &outcome {
        Ok(()) => flow.settle(Ok(())),
        Err(error) => flow.settle(Err(error.to_string())),
    }
    outcome?;

    println!(
        "Worklog deleted; {} entries in range after refetch",
        service.entries().len()
    );
    Ok(())
}

async fn fetch_conflict(
    client: &TimeClockApiClient,
    range: &DateRange,
    number: usize,
) -> Result<Conflict, CliError> {
    let mut conflicts = client.fetch_conflicts(range).await?;
    if number == 0 || number > conflicts.len() {
        return Err(CliError::ConflictNotFound(number));
    }
    Ok(conflicts.swap_remove(number - 1))
}

fn checked_index(conflict: &Conflict, number: usize) -> Result<usize, CliError> {
    if number == 0 || number > conflict.items.len() {
        return Err(CliError::ItemOutOfRange(number));
    }
    Ok(number - 1)
}

fn preview_rows(flow: &ResolutionFlow) -> &[PreviewRow] {
    match flow.state() {
        FlowState::PreviewOpen { rows, .. } => rows,
        _ => &[],
    }
}
