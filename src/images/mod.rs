//! Image asset URL synthesis.
//!
//! Asset references have the form `image-<id>-<ext>`. The full URL is a pure
//! function of the reference and the image settings: no network calls, no
//! caching, identical input always yields identical output.

use crate::config::ImageConfig;

/// Recognized extension suffixes. Anything else falls back to webp with the
/// suffix left in place.
const KNOWN_EXTENSIONS: [(&str, &str); 3] = [("-jpg", "jpg"), ("-png", "png"), ("-webp", "webp")];

/// Build a fully qualified URL for an asset reference.
///
/// Returns `None` for an empty reference. An unrecognized reference is still
/// mapped to a URL (webp extension) rather than rejected; render code treats
/// the reference as opaque.
pub fn build_image_url(config: &ImageConfig, asset_ref: &str) -> Option<String> {
    if asset_ref.is_empty() {
        return None;
    }

    let trimmed = asset_ref.strip_prefix("image-").unwrap_or(asset_ref);

    let (image_id, extension) = KNOWN_EXTENSIONS
        .iter()
        .find_map(|(suffix, ext)| trimmed.strip_suffix(suffix).map(|id| (id, *ext)))
        .unwrap_or((trimmed, "webp"));

    let base = if config.use_cdn {
        &config.cdn_base_url
    } else {
        &config.origin_base_url
    };

    Some(format!(
        "{}/{}/{}/{}.{}",
        base, config.project_id, config.dataset, image_id, extension
    ))
}
