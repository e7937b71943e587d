//! Image key resolution and sizing hints.

/// Endpoint that serves card images by key.
pub const IMAGE_ENDPOINT: &str = "https://open.feishu.cn/open-apis/block-kit/image/";

/// Bounds for `custom_width`, in display units.
pub const MIN_CUSTOM_WIDTH: f64 = 278.0;
pub const MAX_CUSTOM_WIDTH: f64 = 580.0;

/// Side length of images embedded in a note.
pub const EMBEDDED_IMAGE_SIZE: u32 = 16;

/// Locator for an image key. Never touches the network.
pub fn resolve(img_key: &str) -> String {
    format!("{}{}", IMAGE_ENDPOINT, img_key)
}

pub fn clamp_custom_width(width: f64) -> f64 {
    width.clamp(MIN_CUSTOM_WIDTH, MAX_CUSTOM_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_the_key_in_the_endpoint() {
        assert_eq!(
            resolve("img_v2_abc"),
            "https://open.feishu.cn/open-apis/block-kit/image/img_v2_abc"
        );
    }

    #[test]
    fn clamps_to_bounds() {
        assert_eq!(clamp_custom_width(1000.0), 580.0);
        assert_eq!(clamp_custom_width(10.0), 278.0);
        assert_eq!(clamp_custom_width(300.0), 300.0);
        assert_eq!(clamp_custom_width(f64::INFINITY), 580.0);
    }
}
