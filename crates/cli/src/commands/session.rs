//! Session commands.

use pustaka_storefront::actions::{self, ActionKind, ActionRequest};

use super::{CliError, Context, report};

/// Store the session record.
///
/// # Errors
///
/// Returns an error if the session cannot be persisted.
#[allow(clippy::print_stdout)]
pub fn login(ctx: &mut Context, identity: &str, role: Option<String>) -> Result<(), CliError> {
    let outcome = actions::login(&mut ctx.shop, identity, role)?;
    report(&outcome);
    if let Some(user) = ctx.shop.session().current() {
        println!("Logged in as {}", user.display_name());
    }
    Ok(())
}

/// Drop the session record and empty the cart.
///
/// # Errors
///
/// Returns an error if the store cannot be updated.
pub async fn logout(ctx: &mut Context) -> Result<(), CliError> {
    let outcome = ctx.perform(ActionKind::Logout, &ActionRequest::default()).await?;
    report(&outcome);
    Ok(())
}

/// Print the logged-in user and role.
#[allow(clippy::print_stdout)]
pub fn whoami(ctx: &Context) {
    match ctx.shop.session().current() {
        Some(user) => match user.role.as_deref() {
            Some(role) => println!("{} ({role})", user.display_name()),
            None => println!("{}", user.display_name()),
        },
        None => println!("Not logged in"),
    }
}
