//! Interactive storefront session.

use anyhow::{bail, Result};
use console::Term;
use dialoguer::{Input, Select};
use shopdesk_core::prelude::*;
use shopdesk_observability::ToastId;

use crate::context::Context;
use crate::output::truncate;

const ACTIONS: [&str; 9] = [
    "Browse products",
    "View product",
    "Add to cart",
    "Update quantity",
    "Remove from cart",
    "View cart",
    "Clear cart",
    "Checkout",
    "Quit",
];

/// Run the shop command.
pub async fn run(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        bail!("`shop` is interactive and does not support --json");
    }
    if !Term::stdout().is_term() {
        bail!("`shop` needs an interactive terminal");
    }

    let mut app = ctx.shop_app()?;
    let mut seen: Option<ToastId> = None;

    ctx.output.header("Shopdesk");
    let spinner = ctx.output.spinner("Loading catalog...");
    let loaded = app.load_products().await.map(|products| products.len());
    spinner.finish_and_clear();
    match loaded {
        Ok(count) => ctx.output.info(&format!("{} products available", count)),
        Err(e) => tracing::warn!(error = %e, "catalog unavailable"),
    }
    flush_toasts(&app, &mut seen, ctx);

    loop {
        let choice = Select::new()
            .with_prompt(format!(
                "{} item(s), {}",
                app.cart().total_items(),
                format_price(app.cart().total_price())
            ))
            .items(&ACTIONS)
            .default(0)
            .interact()?;

        let outcome: Result<()> = match choice {
            0 => browse(&mut app, ctx).await,
            1 => view_product(&mut app, ctx).await,
            2 => add_to_cart(&mut app).await,
            3 => update_quantity(&mut app),
            4 => remove_from_cart(&mut app),
            5 => {
                show_cart(&app, ctx);
                Ok(())
            }
            6 => {
                app.clear_cart();
                ctx.output.info("Cart cleared");
                Ok(())
            }
            7 => {
                if let Some(order) = app.checkout() {
                    show_order(&order, ctx);
                }
                Ok(())
            }
            _ => break,
        };

        flush_toasts(&app, &mut seen, ctx);
        if let Err(e) = outcome {
            match classify_failure(e)? {
                Failure::Toasted(detail) => {
                    tracing::warn!(action = ACTIONS[choice], error = %detail, "shop action failed");
                }
                Failure::Rejected(message) => ctx.output.warn(&message),
            }
        }
    }

    Ok(())
}

/// Print toasts raised since the last call, oldest first.
fn flush_toasts(app: &ShopApp, seen: &mut Option<ToastId>, ctx: &Context) {
    let mut fresh: Vec<_> = app
        .toaster()
        .active()
        .into_iter()
        .filter(|t| seen.map_or(true, |last| t.id > last))
        .collect();
    fresh.sort_by_key(|t| t.id);

    for toast in &fresh {
        ctx.output.toast(toast);
    }
    if let Some(last) = fresh.last() {
        *seen = Some(last.id);
    }
}

/// How a failed menu action reaches the user.
#[derive(Debug, PartialEq)]
enum Failure {
    /// The session already raised an error toast; only the cause is left.
    Toasted(String),
    /// Bad input, shown as a warning.
    Rejected(String),
}

/// Sort a failed action. Errors from outside the session, such as a lost
/// terminal, end the command.
fn classify_failure(error: anyhow::Error) -> Result<Failure> {
    match error.downcast_ref::<AppError>() {
        Some(AppError::Fetch(e)) => Ok(Failure::Toasted(e.to_string())),
        Some(other) => Ok(Failure::Rejected(other.to_string())),
        None => Err(error),
    }
}

async fn browse(app: &mut ShopApp, ctx: &Context) -> Result<()> {
    app.navigate(Page::ProductList.path());
    let products = app.load_products().await?;

    ctx.output.header(&format!("Products ({})", products.len()));
    let widths = [6, 32, 10];
    for product in products {
        let id = product.id.map(|id| id.to_string()).unwrap_or_default();
        ctx.output.table_row(
            &[
                id.as_str(),
                truncate(&product.name, 32).as_str(),
                product.display_price().as_str(),
            ],
            &widths,
        );
    }
    Ok(())
}

async fn view_product(app: &mut ShopApp, ctx: &Context) -> Result<()> {
    let id = prompt_product_id()?;
    app.navigate(&shopdesk_router::product_href(id));
    let product = app.open_routed_product().await?;

    ctx.output.header(&product.name);
    ctx.output.kv("price", &product.display_price());
    ctx.output.kv("category", &product.category);
    ctx.output.kv("image", image_or_placeholder(product));
    if !product.description.is_empty() {
        ctx.output.kv("description", &product.description);
    }
    Ok(())
}

async fn add_to_cart(app: &mut ShopApp) -> Result<()> {
    let id = prompt_product_id()?;
    let quantity = prompt_quantity("Quantity", 1)?;
    app.add_to_cart(id, quantity).await?;
    Ok(())
}

fn update_quantity(app: &mut ShopApp) -> Result<()> {
    let id = prompt_product_id()?;
    let quantity = prompt_quantity("New quantity", 1)?;
    if !app.update_cart_quantity(id, quantity) {
        app.toaster_mut().warning(format!("Product {} is not in the cart", id), None);
    }
    Ok(())
}

fn remove_from_cart(app: &mut ShopApp) -> Result<()> {
    let id = prompt_product_id()?;
    if !app.remove_from_cart(id) {
        app.toaster_mut().warning(format!("Product {} is not in the cart", id), None);
    }
    Ok(())
}

fn show_cart(app: &ShopApp, ctx: &Context) {
    let cart = app.cart();
    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    ctx.output.header("Cart");
    let widths = [6, 28, 6, 10];
    ctx.output.table_row(&["ID", "NAME", "QTY", "SUBTOTAL"], &widths);
    for item in cart.items() {
        let id = item.product_id().map(|id| id.to_string()).unwrap_or_default();
        ctx.output.table_row(
            &[
                id.as_str(),
                truncate(&item.product.name, 28).as_str(),
                item.quantity.to_string().as_str(),
                format_price(item.line_total()).as_str(),
            ],
            &widths,
        );
    }
    ctx.output.kv("items", &cart.total_items().to_string());
    ctx.output.kv("total", &format_price(cart.total_price()));
}

fn show_order(order: &OrderSummary, ctx: &Context) {
    ctx.output.header("Order confirmed");
    for item in &order.items {
        ctx.output
            .list_item(&format!("{} × {}", item.quantity, item.product.name));
    }
    ctx.output.kv("items", &order.total_items.to_string());
    ctx.output.kv("total", &format_price(order.total_price));
}

fn prompt_product_id() -> Result<ProductId> {
    let raw: String = Input::new().with_prompt("Product id").interact_text()?;
    Ok(parse_product_id(&raw)?)
}

fn parse_product_id(raw: &str) -> AppResult<ProductId> {
    raw.parse()
        .map_err(|_| AppError::InvalidId(raw.trim().to_string()))
}

fn prompt_quantity(prompt: &str, default: i64) -> Result<i64> {
    Ok(Input::new()
        .with_prompt(prompt)
        .default(default)
        .interact_text()?)
}
