//! User management commands.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use shopdesk_commerce::prelude::*;

use super::{UserFields, UsersArgs, UsersCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the users command.
pub async fn run(args: UsersArgs, ctx: &Context) -> Result<()> {
    let service = UserService::new(ctx.api_client()?);

    match args.command {
        UsersCommand::List => list_users(&service, ctx).await,
        UsersCommand::Get { id } => show_user(&service, id, ctx).await,
        UsersCommand::Create(fields) => create_user(&service, fields, ctx).await,
        UsersCommand::Update { id, fields } => update_user(&service, id, fields, ctx).await,
        UsersCommand::Delete { id, yes } => delete_user(&service, id, yes, ctx).await,
    }
}

async fn list_users(service: &UserService, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Fetching users...");
    let users = service.get_all().await;
    spinner.finish_and_clear();
    let users = users.context("Failed to fetch users")?;

    if ctx.output.is_json() {
        ctx.output.json(&users);
        return Ok(());
    }

    ctx.output.header(&format!("Users ({})", users.len()));
    let widths = [6, 28, 36];
    ctx.output.table_row(&["ID", "NAME", "EMAIL"], &widths);
    for user in &users {
        let id = user.id.map(|id| id.to_string()).unwrap_or_default();
        ctx.output.table_row(
            &[
                id.as_str(),
                truncate(&user.name, 28).as_str(),
                truncate(&user.email, 36).as_str(),
            ],
            &widths,
        );
    }

    Ok(())
}

async fn show_user(service: &UserService, id: UserId, ctx: &Context) -> Result<()> {
    let user = service
        .get_by_id(id)
        .await
        .with_context(|| format!("Failed to fetch user {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&user);
    } else {
        print_user(&user, ctx);
    }
    Ok(())
}

async fn create_user(service: &UserService, fields: UserFields, ctx: &Context) -> Result<()> {
    let (Some(name), Some(email)) = (fields.name.clone(), fields.email.clone()) else {
        bail!("--name and --email are required to create a user");
    };
    let draft = apply_fields(User::new(name, email), fields)?;

    let created = service
        .create(&draft)
        .await
        .context("Failed to create user")?;

    if ctx.output.is_json() {
        ctx.output.json(&created);
    } else {
        ctx.output.success("User created successfully");
        print_user(&created, ctx);
    }
    Ok(())
}

async fn update_user(service: &UserService, id: UserId, fields: UserFields, ctx: &Context) -> Result<()> {
    let current = service
        .get_by_id(id)
        .await
        .with_context(|| format!("Failed to fetch user {}", id))?;
    let edited = apply_fields(current, fields)?;

    let updated = service
        .update(id, &edited)
        .await
        .with_context(|| format!("Failed to update user {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&updated);
    } else {
        ctx.output.success("User updated successfully");
        print_user(&updated, ctx);
    }
    Ok(())
}

async fn delete_user(service: &UserService, id: UserId, yes: bool, ctx: &Context) -> Result<()> {
    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete user {}?", id))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    service
        .delete(id)
        .await
        .with_context(|| format!("Failed to delete user {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "deleted": id }));
    } else {
        ctx.output.success("User deleted successfully");
    }
    Ok(())
}

fn apply_fields(mut user: User, fields: UserFields) -> Result<User> {
    if let Some(email) = fields.email {
        if !email.contains('@') {
            bail!("--email must be an email address");
        }
        user.email = email;
    }
    if let Some(name) = fields.name {
        user.name = name;
    }
    if let Some(avatar) = fields.avatar {
        user.avatar = Some(avatar).filter(|a| !a.trim().is_empty());
    }
    Ok(user)
}

fn print_user(user: &User, ctx: &Context) {
    ctx.output.header(&user.name);
    if let Some(id) = user.id {
        ctx.output.kv("id", &id.to_string());
    }
    ctx.output.kv("email", &user.email);
    if let Some(ref avatar) = user.avatar {
        ctx.output.kv("avatar", avatar);
    }
}
