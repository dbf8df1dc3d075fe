//! Product management commands.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use shopdesk_commerce::prelude::*;

use super::{ProductFields, ProductsArgs, ProductsCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let service = ProductService::new(ctx.api_client()?);

    match args.command {
        ProductsCommand::List => list_products(&service, ctx).await,
        ProductsCommand::Get { id } => show_product(&service, id, ctx).await,
        ProductsCommand::Create(fields) => create_product(&service, fields, ctx).await,
        ProductsCommand::Update { id, fields } => update_product(&service, id, fields, ctx).await,
        ProductsCommand::Delete { id, yes } => delete_product(&service, id, yes, ctx).await,
    }
}

async fn list_products(service: &ProductService, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Fetching products...");
    let products = service.get_all().await;
    spinner.finish_and_clear();
    let products = products.context("Failed to fetch products")?;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!("Products ({})", products.len()));
    let widths = [6, 32, 10, 16];
    ctx.output.table_row(&["ID", "NAME", "PRICE", "CATEGORY"], &widths);
    for product in &products {
        let id = product.id.map(|id| id.to_string()).unwrap_or_default();
        ctx.output.table_row(
            &[
                id.as_str(),
                truncate(&product.name, 32).as_str(),
                product.display_price().as_str(),
                truncate(&product.category, 16).as_str(),
            ],
            &widths,
        );
    }

    Ok(())
}

async fn show_product(service: &ProductService, id: ProductId, ctx: &Context) -> Result<()> {
    let product = service
        .get_by_id(id)
        .await
        .with_context(|| format!("Failed to fetch product {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    print_product(&product, ctx);
    Ok(())
}

async fn create_product(service: &ProductService, fields: ProductFields, ctx: &Context) -> Result<()> {
    let Some(name) = fields.name.clone() else {
        bail!("--name is required to create a product");
    };
    let Some(price) = fields.price else {
        bail!("--price is required to create a product");
    };
    let draft = apply_fields(Product::new(name, price, "", ""), fields)?;

    let created = service
        .create(&draft)
        .await
        .context("Failed to create product")?;

    if ctx.output.is_json() {
        ctx.output.json(&created);
        return Ok(());
    }

    ctx.output.success("Product created successfully");
    print_product(&created, ctx);
    Ok(())
}

async fn update_product(
    service: &ProductService,
    id: ProductId,
    fields: ProductFields,
    ctx: &Context,
) -> Result<()> {
    let current = service
        .get_by_id(id)
        .await
        .with_context(|| format!("Failed to fetch product {}", id))?;
    let edited = apply_fields(current, fields)?;

    let updated = service
        .update(id, &edited)
        .await
        .with_context(|| format!("Failed to update product {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&updated);
        return Ok(());
    }

    ctx.output.success("Product updated successfully");
    print_product(&updated, ctx);
    Ok(())
}

async fn delete_product(service: &ProductService, id: ProductId, yes: bool, ctx: &Context) -> Result<()> {
    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete product {}?", id))
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
        .with_context(|| format!("Failed to delete product {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "deleted": id }));
    } else {
        ctx.output.success("Product deleted successfully");
    }
    Ok(())
}

/// Overlay the given fields onto `product`.
fn apply_fields(mut product: Product, fields: ProductFields) -> Result<Product> {
    if let Some(price) = fields.price {
        if !price.is_finite() || price < 0.0 {
            bail!("--price must be a non-negative number");
        }
        product.price = price;
    }
    if let Some(name) = fields.name {
        product.name = name;
    }
    if let Some(description) = fields.description {
        product.description = description;
    }
    if let Some(image) = fields.image {
        product.image = Some(image).filter(|i| !i.trim().is_empty());
    }
    if let Some(category) = fields.category {
        product.category = category;
    }
    Ok(product)
}

fn print_product(product: &Product, ctx: &Context) {
    ctx.output.header(&product.name);
    if let Some(id) = product.id {
        ctx.output.kv("id", &id.to_string());
    }
    ctx.output.kv("price", &product.display_price());
    ctx.output.kv("category", &product.category);
    ctx.output.kv("image", image_or_placeholder(product));
    if !product.description.is_empty() {
        ctx.output.kv("description", &product.description);
    }
}
