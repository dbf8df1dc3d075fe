//! Image URL check.

use anyhow::Result;
use shopdesk_commerce::catalog::{has_image_extension, is_valid_image_url};

use super::ImageCheckArgs;
use crate::context::Context;

/// Run the image-check command.
pub async fn run(args: ImageCheckArgs, ctx: &Context) -> Result<()> {
    let client = ctx.plain_client()?;

    let spinner = ctx.output.spinner("Checking image...");
    let valid = is_valid_image_url(&client, &args.url).await;
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "url": args.url, "valid": valid }));
        return Ok(());
    }

    if valid {
        let how = if has_image_extension(&args.url) {
            "by extension"
        } else {
            "by content type"
        };
        ctx.output.success(&format!("{} is an image ({})", args.url, how));
    } else {
        ctx.output.warn(&format!("{} is not a usable image URL", args.url));
    }
    Ok(())
}
