//! Product catalog.

mod image;
mod product;

pub use image::{has_image_extension, image_or_placeholder, is_valid_image_url, IMAGE_PLACEHOLDER};
pub use product::{format_price, Product};
