use crate::commands::{print_json, Context};
use anyhow::{Context as _, Result};
use callbook_store::error::StoreError;
use callbook_store::paths;
use clap::Args;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct BackupArgs {
    /// Defaults to a timestamped file under the data directory
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct BackupReport {
    output: String,
    size_bytes: u64,
}

pub fn backup(ctx: &Context<'_>, args: BackupArgs) -> Result<()> {
    let out = match args.out {
        Some(path) => path,
        None => paths::backup_path()?,
    };

    ctx.store.backup_to(&out).map_err(|err| {
        let message = match &err {
            StoreError::InvalidBackupPath(_) => {
                format!("backup path overlaps database: {}", out.display())
            }
            _ => format!("backup database to {}", out.display()),
        };
        anyhow::Error::new(err).context(message)
    })?;

    let size_bytes = fs::metadata(&out)
        .with_context(|| format!("stat backup file {}", out.display()))?
        .len();

    if ctx.json {
        return print_json(&BackupReport {
            output: out.display().to_string(),
            size_bytes,
        });
    }

    println!("Backup written to {}", out.display());
    Ok(())
}
