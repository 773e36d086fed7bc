use crate::commands::{print_json, Context};
use crate::error::not_found;
use anyhow::Result;
use callbook_core::time::now_utc;
use callbook_store::repo::UserNew;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddUserArgs {
    #[arg(long)]
    pub name: String,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Display name of an existing user
    pub name: String,
}

pub fn add_user(ctx: &Context<'_>, args: AddUserArgs) -> Result<()> {
    let user = ctx.store.users().create(now_utc(), UserNew { name: args.name })?;
    if ctx.json {
        print_json(&user)?;
    } else {
        println!("created user {} {}", user.id, user.name);
    }
    Ok(())
}

pub fn list_users(ctx: &Context<'_>) -> Result<()> {
    let users = ctx.store.users().list()?;
    if ctx.json {
        return print_json(&users);
    }
    if users.is_empty() {
        println!("no users");
        return Ok(());
    }
    for user in users {
        println!("{}  {}", user.id, user.name);
    }
    Ok(())
}

pub fn login(ctx: &Context<'_>, args: LoginArgs) -> Result<()> {
    let user = ctx
        .store
        .users()
        .get_by_name(&args.name)?
        .ok_or_else(|| not_found(format!("user {}", args.name.trim())))?;
    let user = ctx.store.session().login(now_utc(), user.id)?;
    if ctx.json {
        print_json(&user)?;
    } else {
        println!("logged in as {}", user.name);
    }
    Ok(())
}

pub fn logout(ctx: &Context<'_>) -> Result<()> {
    let had_session = ctx.store.session().logout()?;
    if ctx.json {
        print_json(&serde_json::json!({ "logged_out": had_session }))?;
    } else if had_session {
        println!("logged out");
    } else {
        println!("not logged in");
    }
    Ok(())
}

pub fn whoami(ctx: &Context<'_>) -> Result<()> {
    let user = ctx.store.session().require_user()?;
    if ctx.json {
        print_json(&user)?;
    } else {
        println!("{}", user.name);
    }
    Ok(())
}
