//! Image URL helpers.

use shopdesk_data::FetchClient;
use url::Url;

use super::Product;

/// Shown wherever a product has no usable image.
pub const IMAGE_PLACEHOLDER: &str = "/placeholder.svg";

const IMAGE_EXTENSIONS: [&str; 7] = [".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".bmp"];

/// True if the URL ends in a known image extension (case-insensitive).
pub fn has_image_extension(url: &str) -> bool {
    let lower = url.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Decide whether `url` points at an image.
///
/// The URL must be absolute. A known extension is accepted without any
/// network traffic; otherwise a `HEAD` probe must answer 2xx with an
/// `image/*` content type. Probe failures count as "not an image".
pub async fn is_valid_image_url(client: &FetchClient, url: &str) -> bool {
    if Url::parse(url).is_err() {
        return false;
    }

    if has_image_extension(url) {
        return true;
    }

    match client.head(url).send().await {
        Ok(response) => {
            response.is_success()
                && response
                    .content_type()
                    .is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with("image/"))
        }
        Err(e) => {
            tracing::debug!(%url, error = %e, "image probe failed");
            false
        }
    }
}

/// The product's image, or [`IMAGE_PLACEHOLDER`] when it has none.
pub fn image_or_placeholder(product: &Product) -> &str {
    product
        .image
        .as_deref()
        .filter(|image| !image.trim().is_empty())
        .unwrap_or(IMAGE_PLACEHOLDER)
}
