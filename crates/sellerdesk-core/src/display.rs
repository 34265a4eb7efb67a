//! Small presentation helpers shared by the editor and the listing.

use std::sync::LazyLock;

use regex::Regex;

/// Viewport width (px) at and above which the desktop listing is used.
pub const DESKTOP_MIN_WIDTH: u32 = 768;

static FILE_STEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/([^/]+?)\.[^/]*$").expect("valid file stem regex"));

/// `"1"` is the national catalog; every other code is international.
#[must_use]
pub fn nationality_label(code: &str) -> &'static str {
    if code == "1" {
        "Nacional"
    } else {
        "Internacional"
    }
}

/// File stem of an image URL, e.g. `https://cdn/p/abc.png` → `abc`.
/// Only the last path segment is looked at; an empty string comes back when
/// it has no extension.
#[must_use]
pub fn image_file_stem(url: &str) -> String {
    FILE_STEM
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Route of the product listing to return to after a successful submission.
#[must_use]
pub fn listing_route(viewport_width: u32) -> &'static str {
    if viewport_width >= DESKTOP_MIN_WIDTH {
        "/products"
    } else {
        "/products-mobile"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nationality_labels() {
        assert_eq!(nationality_label("1"), "Nacional");
        assert_eq!(nationality_label("2"), "Internacional");
        assert_eq!(nationality_label(""), "Internacional");
    }

    #[test]
    fn file_stem_from_url() {
        assert_eq!(image_file_stem("https://cdn.test/p/abc123.png"), "abc123");
        assert_eq!(image_file_stem("https://cdn.test/p/photo.v2.jpg"), "photo");
        assert_eq!(image_file_stem("no-slash"), "");
        assert_eq!(image_file_stem("https://cdn.test/p/abc"), "");
        assert_eq!(image_file_stem("https://cdn.test/abc.png"), "abc");
    }

    #[test]
    fn listing_route_switches_at_breakpoint() {
        assert_eq!(listing_route(1280), "/products");
        assert_eq!(listing_route(768), "/products");
        assert_eq!(listing_route(767), "/products-mobile");
    }
}
