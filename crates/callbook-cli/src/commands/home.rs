use crate::commands::{print_json, Context};
use anyhow::Result;
use callbook_core::domain::User;
use callbook_core::flow::View;

/// The authenticated root view.
pub fn show_home(ctx: &Context<'_>) -> Result<()> {
    let user = ctx.store.session().require_user()?;
    if ctx.json {
        return print_json(&serde_json::json!({ "view": View::Home, "user": user }));
    }
    print_home(&user);
    Ok(())
}

pub fn print_home(user: &User) {
    println!("{}", View::Home.heading());
    println!("logged in as {}", user.name);
    println!("search a patient: callbook search <name>");
}
