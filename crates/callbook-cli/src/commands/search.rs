use crate::commands::{print_json, Context};
use anyhow::Result;
use callbook_core::domain::call_key;
use callbook_core::dto::PatientSearchItemDto;
use callbook_core::filter::parse_search;
use callbook_core::time::format_timestamp_datetime;
use callbook_store::query::PatientQuery;
use clap::Args;
use tracing::debug;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Name terms and phone:<digits> tokens; all must match
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

pub fn search(ctx: &Context<'_>, args: SearchArgs) -> Result<()> {
    ctx.store.session().require_user()?;
    let raw = args.query.join(" ");
    let parsed = parse_search(&raw)?;
    let query = PatientQuery::from_search(&parsed);
    let rows = ctx
        .store
        .patients()
        .search(&query, Some(ctx.config.search.max_results))?;
    debug!(query = %raw, results = rows.len(), "patient search");

    let items: Vec<PatientSearchItemDto> = rows
        .into_iter()
        .map(|row| PatientSearchItemDto {
            id: row.patient.id,
            call_key: call_key(&row.patient.primary_phone),
            last_call_at: row.last_call_at,
            name: row.patient.name,
            primary_phone: row.patient.primary_phone,
        })
        .collect();

    if ctx.json {
        return print_json(&items);
    }

    if items.is_empty() {
        println!("no patients");
        return Ok(());
    }

    for item in items {
        let last = item
            .last_call_at
            .map(format_timestamp_datetime)
            .unwrap_or_else(|| "never called".to_string());
        println!(
            "{}  {}  {}  #{}  [{}]",
            item.id, item.name, item.primary_phone, item.call_key, last
        );
    }
    Ok(())
}
