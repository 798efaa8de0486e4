//! Back-office commands.

use anyhow::{bail, Context as _, Result};
use chrono::Utc;
use dialoguer::{Confirm, Input, Password};
use serde_json::json;
use shelf_auth::{AdminSession, Argon2Credentials, AuthError};
use shelf_core::catalog::Item;
use shelf_core::form::FormField;
use shelf_core::ItemId;
use shelf_views::{
    require_admin, AddItemView, BackOfficeListView, LoginView, ViewError, LOGIN_ERROR,
};

use super::{AdminArgs, AdminCommand};
use crate::context::Context;
use crate::output::{format_duration, status_badge};

/// Run the admin command.
pub async fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AdminCommand::Login { username, password } => login(username, password, ctx),
        AdminCommand::Logout => logout(ctx),
        AdminCommand::Status => status(ctx),
        AdminCommand::List => list(ctx).await,
        AdminCommand::Add {
            title,
            author,
            isbn,
            year,
            price,
        } => {
            let values = [
                (FormField::Title, title),
                (FormField::Author, author),
                (FormField::Isbn, isbn),
                (FormField::Year, year),
                (FormField::Price, price),
            ];
            add(values, ctx).await
        }
        AdminCommand::Delete { id, yes } => delete(id, yes, ctx).await,
        AdminCommand::HashPassword { password } => hash_password(password, ctx),
    }
}

fn login(username: Option<String>, password: Option<String>, ctx: &Context) -> Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::new()
            .with_prompt("Username")
            .default(ctx.config.admin.username.clone())
            .interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let mut gate = ctx.auth_gate()?;
    let mut view = LoginView::new(&mut gate);
    match view.submit(&username, &password) {
        Ok(session) => {
            if ctx.output.is_json() {
                ctx.output.json(&session_json(&session));
            } else {
                ctx.output.success(&format!("Logged in as {}", session.username));
                print_expiry(&session, ctx);
            }
            Ok(())
        }
        Err(ViewError::Auth(AuthError::InvalidCredentials)) => bail!(LOGIN_ERROR),
        Err(e) => Err(e).context("Login failed"),
    }
}

fn logout(ctx: &Context) -> Result<()> {
    let mut gate = ctx.auth_gate()?;
    gate.logout().context("Failed to clear the session")?;
    ctx.output.success("Logged out");
    Ok(())
}

fn status(ctx: &Context) -> Result<()> {
    let mut gate = ctx.auth_gate()?;
    let session = match gate.check() {
        Ok(session) => Some(session),
        Err(AuthError::LoginRequired) | Err(AuthError::SessionExpired) => None,
        Err(e) => return Err(e).context("Failed to read the session"),
    };

    if ctx.output.is_json() {
        let value = match &session {
            Some(session) => session_json(session),
            None => json!({ "loggedIn": false }),
        };
        ctx.output.json(&value);
        return Ok(());
    }

    ctx.output.header("Back Office");
    ctx.output.kv("Storage", &ctx.storage_path().display().to_string());
    match &session {
        Some(session) => {
            ctx.output.kv("Status", &status_badge("logged in"));
            ctx.output.kv("User", &session.username);
            print_expiry(session, ctx);
        }
        None => ctx.output.kv("Status", &status_badge("logged out")),
    }
    Ok(())
}

async fn list(ctx: &Context) -> Result<()> {
    let session = admin_session(ctx)?;
    let mut view = BackOfficeListView::new(ctx.catalog()?, session);

    let spinner = ctx.output.spinner("Loading books...");
    let loaded = view.load().await;
    spinner.finish_and_clear();
    loaded.context("Failed to load books")?;

    let items = view.items().loaded().cloned().unwrap_or_default();
    if ctx.output.is_json() {
        ctx.output.json(&items);
        return Ok(());
    }

    ctx.output.header(&format!("Books ({})", items.len()));
    ctx.output.table_row(&LIST_HEADERS, &LIST_WIDTHS);
    for item in &items {
        let row = list_row(item);
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        ctx.output.table_row(&cells, &LIST_WIDTHS);
    }
    Ok(())
}

const LIST_HEADERS: [&str; 6] = ["ID", "Title", "Author", "ISBN", "Price", "Year"];
const LIST_WIDTHS: [usize; 6] = [4, 36, 22, 17, 10, 6];

fn list_row(item: &Item) -> [String; 6] {
    [
        item.id.to_string(),
        item.title.clone(),
        item.author.clone(),
        item.isbn.clone().unwrap_or_default(),
        item.price().to_string(),
        item.year.map(|y| y.to_string()).unwrap_or_default(),
    ]
}

async fn add(values: [(FormField, Option<String>); 5], ctx: &Context) -> Result<()> {
    let session = admin_session(ctx)?;
    let mut view = AddItemView::new(ctx.catalog()?, session);

    for (field, value) in values {
        let value = match value {
            Some(value) => value,
            None if ctx.output.is_json() => String::new(),
            None => Input::new()
                .with_prompt(field.label())
                .allow_empty(true)
                .interact_text()?,
        };
        view.set_field(field, value);
    }

    let spinner = ctx.output.spinner("Adding book...");
    let submitted = view.submit().await;
    spinner.finish_and_clear();

    match submitted {
        Ok(item) => {
            if ctx.output.is_json() {
                ctx.output.json(&item);
            } else {
                ctx.output.success(&format!("Added \"{}\" as #{}", item.title, item.id));
            }
            Ok(())
        }
        Err(ViewError::Invalid(errors)) => {
            for (field, message) in errors.iter() {
                ctx.output.warn(&format!("{}: {}", field.label(), message));
            }
            bail!("Book not added: {} invalid field(s)", errors.len())
        }
        Err(e) => Err(e).context("Failed to add the book"),
    }
}

async fn delete(id: ItemId, yes: bool, ctx: &Context) -> Result<()> {
    let session = admin_session(ctx)?;

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete book {}?", id))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Delete cancelled");
            return Ok(());
        }
    }

    let mut view = BackOfficeListView::new(ctx.catalog()?, session);
    view.delete(id)
        .await
        .with_context(|| format!("Failed to delete book {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "deleted": id }));
    } else {
        ctx.output.success(&format!("Deleted book {}", id));
    }
    Ok(())
}

fn hash_password(password: Option<String>, ctx: &Context) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?,
    };
    let hash = Argon2Credentials::hash_password(&password).context("Failed to hash password")?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "password_hash": hash }));
    } else {
        println!("{}", hash);
    }
    Ok(())
}

fn admin_session(ctx: &Context) -> Result<AdminSession> {
    let mut gate = ctx.auth_gate()?;
    require_admin(&mut gate).context("Not logged in; run `shelf admin login` first")
}

fn session_json(session: &AdminSession) -> serde_json::Value {
    json!({
        "loggedIn": true,
        "username": session.username,
        "issuedAt": session.issued_at,
        "expiresAt": session.expires_at,
    })
}

fn print_expiry(session: &AdminSession, ctx: &Context) {
    let remaining = session.time_to_expiry_at(Utc::now()).num_seconds().max(0) as u64;
    ctx.output.kv(
        "Expires",
        &format!(
            "{} (in {})",
            session.expires_at.format("%Y-%m-%d %H:%M UTC"),
            format_duration(remaining)
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_row_includes_isbn() {
        let mut item = Item::new(7, "The Art of War", "Sun Tzu", 250.0);
        item.isbn = Some("978-1590302255".into());
        item.year = Some(-500);

        let row = list_row(&item);
        assert_eq!(LIST_HEADERS[3], "ISBN");
        assert_eq!(row[0], "7");
        assert_eq!(row[3], "978-1590302255");
        assert_eq!(row[5], "-500");
        assert_eq!(row.len(), LIST_WIDTHS.len());

        item.isbn = None;
        assert_eq!(list_row(&item)[3], "");
    }
}
