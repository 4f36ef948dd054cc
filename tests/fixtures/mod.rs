//! Canned payloads for backend tests
#![allow(dead_code)]

/// A complete 1x1 RGBA PNG.
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

/// Content image as the browser sends it (FileReader data URL).
pub const CONTENT_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUg==";

/// Bare base64 once the data URL prefix is removed.
pub const CONTENT_BASE64: &str = "iVBORw0KGgoAAAANSUhEUg==";

pub const STYLE_URL: &str = "https://styles.example.com/the-great-wave.jpg";

pub const OUTPUT_URL: &str = "https://replicate.delivery/pbxt/out-0.png";

pub const TEST_TOKEN: &str = "r8_test_token";
