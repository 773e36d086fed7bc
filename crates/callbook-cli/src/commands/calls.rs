use crate::commands::home::print_home;
use crate::commands::patients::{patient_detail, print_patient_detail};
use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{
    call_log_entry, outcome_flag, parse_patient_id, print_call_log, print_record_call_hint,
};
use anyhow::Result;
use callbook_core::domain::{call_key, strip_call_key, CallOutcome, Patient};
use callbook_core::dto::{CallActionDto, CallModalDto, CallResultDto};
use callbook_core::flow::{CallModal, ModalState, View};
use callbook_core::time::{now_utc, parse_local_timestamp};
use callbook_store::repo::CallLogRow;
use clap::Args;
use std::str::FromStr;

#[derive(Debug, Args)]
pub struct CallArgs {
    /// Patient phone number or its call key (call-<phone>)
    #[arg(required_unless_present = "patient", conflicts_with = "patient")]
    pub phone: Option<String>,
    #[arg(long)]
    pub patient: Option<String>,
    /// reached | left-voicemail | could-not-reach
    #[arg(long)]
    pub outcome: Option<String>,
    /// When the call happened (YYYY-MM-DD HH:MM, local time)
    #[arg(long, requires = "outcome")]
    pub when: Option<String>,
}

#[derive(Debug, Args)]
pub struct CallLogArgs {
    pub id: String,
}

pub fn call(ctx: &Context<'_>, args: CallArgs) -> Result<()> {
    ctx.store.session().require_user()?;
    let patient = resolve_patient(ctx, &args)?;
    let modal = CallModal::open(&patient);

    let Some(raw_outcome) = args.outcome else {
        return show_modal(ctx, &modal);
    };

    let outcome = CallOutcome::from_str(&raw_outcome)?;
    let occurred_at = match args.when {
        Some(value) => Some(parse_local_timestamp(&value)?),
        None => None,
    };

    let mut state = ModalState::Open(modal);
    let selection = state.select(outcome, ctx.config.calls.after_reached)?;
    let (record, user) = ctx.store.calls().record_for_session(
        now_utc(),
        selection.patient_id,
        selection.outcome,
        occurred_at,
    )?;
    let row = CallLogRow {
        record,
        user_name: user.name.clone(),
    };
    let entry = call_log_entry(&row, &ctx.config.display);

    if ctx.json {
        return print_json(&CallResultDto {
            call: entry,
            modal: "closed".to_string(),
            view: selection.view,
        });
    }

    println!("logged {} for {}", entry.outcome_label, patient.name);
    println!();
    match selection.view {
        View::PatientDetail(_) => {
            let detail = patient_detail(ctx, patient)?;
            print_patient_detail(&detail);
        }
        View::Home => print_home(&user),
    }
    Ok(())
}

pub fn call_log(ctx: &Context<'_>, args: CallLogArgs) -> Result<()> {
    let id = parse_patient_id(&args.id)?;
    let patient = ctx
        .store
        .patients()
        .get(id)?
        .ok_or_else(|| not_found("patient not found"))?;
    let rows = ctx.store.calls().list_for_patient(patient.id)?;
    let entries: Vec<_> = rows
        .iter()
        .map(|row| call_log_entry(row, &ctx.config.display))
        .collect();

    if ctx.json {
        return print_json(&serde_json::json!({
            "patient_id": patient.id,
            "call_key": call_key(&patient.primary_phone),
            "call_log": entries,
        }));
    }

    println!("{}", patient.name);
    print_call_log(&entries);
    print_record_call_hint(&patient.primary_phone);
    Ok(())
}

fn show_modal(ctx: &Context<'_>, modal: &CallModal) -> Result<()> {
    if ctx.json {
        let dto = CallModalDto {
            state: "open".to_string(),
            patient_id: modal.patient_id,
            prompt: modal.prompt(),
            phone: modal.phone.clone(),
            actions: modal
                .actions()
                .iter()
                .map(|outcome| CallActionDto {
                    outcome: *outcome,
                    label: outcome.action_label().to_string(),
                })
                .collect(),
        };
        return print_json(&dto);
    }

    println!("{}:", modal.prompt());
    println!("{}", modal.phone);
    for outcome in modal.actions() {
        println!("  [{}] {}", outcome_flag(*outcome), outcome.action_label());
    }
    Ok(())
}

fn resolve_patient(ctx: &Context<'_>, args: &CallArgs) -> Result<Patient> {
    if let Some(raw_id) = args.patient.as_deref() {
        let id = parse_patient_id(raw_id)?;
        return ctx
            .store
            .patients()
            .get(id)?
            .ok_or_else(|| not_found("patient not found"));
    }

    let raw = args
        .phone
        .as_deref()
        .ok_or_else(|| invalid_input("provide a phone number or --patient"))?;
    let phone = strip_call_key(raw);
    let mut matches = ctx.store.patients().list_by_phone(phone)?;
    match matches.len() {
        0 => Err(not_found(format!("no patient with phone {}", phone))),
        1 => Ok(matches.remove(0)),
        count => Err(invalid_input(format!(
            "{} patients share phone {}; use --patient <id>",
            count, phone
        ))),
    }
}
