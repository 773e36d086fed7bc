use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{call_log_entry, parse_patient_id, print_call_log, print_record_call_hint};
use anyhow::Result;
use callbook_core::domain::Patient;
use callbook_core::dto::PatientDetailDto;
use callbook_core::flow::PATIENT_HEADING;
use callbook_core::time::{format_timestamp_datetime, now_utc};
use callbook_store::repo::{PatientNew, PatientUpdate};
use clap::Args;

#[derive(Debug, Args)]
pub struct AddPatientArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: String,
}

#[derive(Debug, Args)]
pub struct EditPatientArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct DeletePatientArgs {
    pub id: String,
}

pub fn add_patient(ctx: &Context<'_>, args: AddPatientArgs) -> Result<()> {
    let patient = ctx.store.patients().create(
        now_utc(),
        PatientNew {
            name: args.name,
            primary_phone: args.phone,
        },
    )?;

    if ctx.json {
        print_json(&patient)?;
    } else {
        println!("created {} {}", patient.id, patient.name);
    }
    Ok(())
}

pub fn edit_patient(ctx: &Context<'_>, args: EditPatientArgs) -> Result<()> {
    let id = parse_patient_id(&args.id)?;
    let update = PatientUpdate {
        name: args.name,
        primary_phone: args.phone,
    };
    if update.is_empty() {
        return Err(invalid_input("no updates provided"));
    }

    let patient = ctx.store.patients().update(now_utc(), id, update)?;
    if ctx.json {
        print_json(&patient)?;
    } else {
        println!("updated {} {}", patient.id, patient.name);
    }
    Ok(())
}

pub fn delete_patient(ctx: &Context<'_>, args: DeletePatientArgs) -> Result<()> {
    let id = parse_patient_id(&args.id)?;
    ctx.store.patients().delete(id)?;
    if ctx.json {
        print_json(&serde_json::json!({ "id": id }))?;
    } else {
        println!("deleted {}", id);
    }
    Ok(())
}

pub fn list_patients(ctx: &Context<'_>) -> Result<()> {
    let patients = ctx.store.patients().list_all()?;
    if ctx.json {
        return print_json(&patients);
    }
    if patients.is_empty() {
        println!("no patients");
        return Ok(());
    }
    for patient in patients {
        println!("{}  {}  {}", patient.id, patient.name, patient.primary_phone);
    }
    Ok(())
}

pub fn show_patient(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let id = parse_patient_id(&args.id)?;
    let patient = ctx
        .store
        .patients()
        .get(id)?
        .ok_or_else(|| not_found("patient not found"))?;
    let detail = patient_detail(ctx, patient)?;

    if ctx.json {
        return print_json(&detail);
    }
    print_patient_detail(&detail);
    Ok(())
}

pub fn patient_detail(ctx: &Context<'_>, patient: Patient) -> Result<PatientDetailDto> {
    let rows = ctx.store.calls().list_for_patient(patient.id)?;
    let call_log = rows
        .iter()
        .map(|row| call_log_entry(row, &ctx.config.display))
        .collect();
    Ok(PatientDetailDto {
        id: patient.id,
        name: patient.name,
        primary_phone: patient.primary_phone,
        created_at: patient.created_at,
        updated_at: patient.updated_at,
        call_log,
    })
}

pub fn print_patient_detail(detail: &PatientDetailDto) {
    println!("{}", PATIENT_HEADING);
    println!("id: {}", detail.id);
    println!("name: {}", detail.name);
    println!("phone: {}", detail.primary_phone);
    println!(
        "created_at: {}",
        format_timestamp_datetime(detail.created_at)
    );
    println!(
        "updated_at: {}",
        format_timestamp_datetime(detail.updated_at)
    );
    println!();
    print_call_log(&detail.call_log);
    print_record_call_hint(&detail.primary_phone);
}
