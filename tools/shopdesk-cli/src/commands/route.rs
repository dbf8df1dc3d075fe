//! Route inspection.

use anyhow::{Context as _, Result};
use serde::Serialize;
use shopdesk_router::{app_routes, Layout, Page, RouteParams};

use super::RouteArgs;
use crate::context::Context;

#[derive(Debug, Serialize)]
struct Resolution<'a> {
    path: &'a str,
    page: Page,
    name: String,
    pattern: &'static str,
    params: RouteParams,
    layout: Layout,
}

/// Run the route command.
pub async fn run(args: RouteArgs, ctx: &Context) -> Result<()> {
    let resolution = resolve(&args.path)?;

    if ctx.output.is_json() {
        ctx.output.json(&resolution);
        return Ok(());
    }

    ctx.output.header(&format!("Route {}", resolution.path));
    ctx.output.kv("page", &resolution.name);
    ctx.output.kv("pattern", resolution.pattern);
    ctx.output.kv("layout", resolution.layout.as_str());
    for (name, value) in resolution.params.iter() {
        ctx.output.kv(&format!("param {}", name), value);
    }
    Ok(())
}

fn resolve(path: &str) -> Result<Resolution<'_>> {
    let routes = app_routes().context("Failed to build route table")?;
    let (page, params) = match routes.resolve(path) {
        Some(matched) => (*matched.page(), matched.params),
        None => (Page::NotFound, RouteParams::default()),
    };

    Ok(Resolution {
        path,
        page,
        name: page.to_string(),
        pattern: page.path(),
        params,
        layout: Layout::for_path(path),
    })
}
