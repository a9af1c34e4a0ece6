//! Login, logout and whoami.

use anyhow::Result;
use dialoguer::Input;
use upenergy_auth::{LoginForm, User};

use super::LoginArgs;
use crate::context::Context;

/// Run the login command.
pub fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let name = match args.name {
        Some(name) => name,
        None => prompt("Name", ctx)?,
    };
    let email = match args.email {
        Some(email) => email,
        None => prompt("Email", ctx)?,
    };

    let mut session = ctx.open_session()?;
    let user = session.login(LoginForm::new(name, email).with_role(args.role))?;

    ctx.output.emit(user, || {
        ctx.output.success(&format!(
            "Logged in as {} ({})",
            user.name,
            user.role.display_name()
        ));
    });
    Ok(())
}

fn prompt(label: &str, ctx: &Context) -> Result<String> {
    if ctx.output.is_json() {
        anyhow::bail!("{} is required (pass --{})", label, label.to_lowercase());
    }
    Ok(Input::<String>::new().with_prompt(label).interact_text()?)
}

/// Run the logout command.
pub fn logout(ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;
    let was_logged_in = session.is_authenticated();
    session.logout();

    ctx.output
        .emit(&serde_json::json!({ "logged_out": was_logged_in }), || {
            if was_logged_in {
                ctx.output.success("Logged out");
            } else {
                ctx.output.info("Not logged in");
            }
        });
    Ok(())
}

/// Run the whoami command.
pub fn whoami(ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;

    ctx.output.emit(&session.user(), || match session.user() {
        Some(user) => print_user(user, ctx),
        None => ctx.output.info("Not logged in. Run `upenergy login`."),
    });
    Ok(())
}

fn print_user(user: &User, ctx: &Context) {
    ctx.output.section(&user.name);
    ctx.output.field("Email", &user.email);
    ctx.output.field("Role", user.role.display_name());
    ctx.output.field("Logged in", user.login_time.to_rfc3339());
    match &user.hedera_account {
        Some(account) => ctx.output.field("Hedera account", account),
        None => ctx.output.field("Hedera account", "none"),
    }
}
