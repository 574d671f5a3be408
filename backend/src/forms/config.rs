//! Upload policy configuration loaded via OrthoConfig.

use image::ImageFormat;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

/// Default upload ceiling: 5 MiB.
const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

fn default_formats() -> Vec<ImageFormat> {
    vec![
        ImageFormat::Png,
        ImageFormat::Jpeg,
        ImageFormat::Gif,
        ImageFormat::WebP,
    ]
}

/// Constraints applied to uploaded images.
///
/// # Examples
/// ```
/// use backend::forms::UploadPolicy;
/// use image::ImageFormat;
///
/// let policy = UploadPolicy::default();
/// assert!(policy.allows(ImageFormat::Png));
/// assert!(!policy.allows(ImageFormat::Tiff));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    max_bytes: usize,
    allowed: Vec<ImageFormat>,
}

impl UploadPolicy {
    /// Build a policy from a byte ceiling and accepted formats.
    pub fn new(max_bytes: usize, allowed: Vec<ImageFormat>) -> Self {
        Self { max_bytes, allowed }
    }

    /// Upload ceiling in bytes.
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Whether `format` is accepted.
    pub fn allows(&self, format: ImageFormat) -> bool {
        self.allowed.contains(&format)
    }

    /// Accepted formats as a comma-separated extension list, for messages.
    pub fn allowed_names(&self) -> String {
        let names: Vec<&str> = self
            .allowed
            .iter()
            .filter_map(|format| format.extensions_str().first().copied())
            .collect();
        names.join(", ")
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IMAGE_BYTES, default_formats())
    }
}

/// Environment-driven settings for the upload policy.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "UPLOAD")]
pub struct UploadSettings {
    /// Upload ceiling in bytes.
    pub max_image_bytes: Option<usize>,
    /// Accepted image formats as file extensions (`png`, `jpg`, ...).
    pub image_formats: Option<Vec<String>>,
}

impl UploadSettings {
    /// Effective byte ceiling, falling back to 5 MiB.
    pub fn max_image_bytes(&self) -> usize {
        self.max_image_bytes.unwrap_or(DEFAULT_MAX_IMAGE_BYTES)
    }

    /// Convert the settings into a domain policy.
    ///
    /// Unrecognised format names are skipped with a warning; if none remain,
    /// the default format set applies.
    pub fn policy(&self) -> UploadPolicy {
        let max_bytes = self.max_image_bytes();
        let Some(names) = self.image_formats.as_ref() else {
            return UploadPolicy::new(max_bytes, default_formats());
        };

        let parsed: Vec<ImageFormat> = names.iter().filter_map(|name| parse_format(name)).collect();
        if parsed.is_empty() {
            warn!("no recognised image formats configured; falling back to defaults");
            return UploadPolicy::new(max_bytes, default_formats());
        }
        UploadPolicy::new(max_bytes, parsed)
    }
}

fn parse_format(name: &str) -> Option<ImageFormat> {
    let format = ImageFormat::from_extension(name.trim());
    if format.is_none() {
        warn!(format = name, "ignoring unrecognised image format");
    }
    format
}

#[cfg(test)]
mod tests {
    //! Unit tests for upload policy configuration parsing.

    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    fn load_from_empty_args() -> UploadSettings {
        UploadSettings::load_from_iter([OsString::from("backend")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("UPLOAD_MAX_IMAGE_BYTES", None::<String>),
            ("UPLOAD_IMAGE_FORMATS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        let policy = settings.policy();
        assert_eq!(policy.max_bytes(), 5 * 1024 * 1024);
        assert!(policy.allows(ImageFormat::Png));
        assert!(policy.allows(ImageFormat::Jpeg));
        assert!(policy.allows(ImageFormat::Gif));
        assert!(policy.allows(ImageFormat::WebP));
        assert!(!policy.allows(ImageFormat::Bmp));
    }

    #[rstest]
    fn environment_override_is_respected() {
        let _guard = lock_env([
            ("UPLOAD_MAX_IMAGE_BYTES", Some("1024".to_owned())),
            ("UPLOAD_IMAGE_FORMATS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.policy().max_bytes(), 1024);
    }

    #[rstest]
    fn configured_formats_replace_the_default_set() {
        let settings = UploadSettings {
            max_image_bytes: None,
            image_formats: Some(vec!["png".to_owned(), "bmp".to_owned()]),
        };

        let policy = settings.policy();
        assert!(policy.allows(ImageFormat::Png));
        assert!(policy.allows(ImageFormat::Bmp));
        assert!(!policy.allows(ImageFormat::Jpeg));
    }

    #[rstest]
    fn unrecognised_formats_are_skipped() {
        let settings = UploadSettings {
            max_image_bytes: None,
            image_formats: Some(vec!["png".to_owned(), "svg".to_owned()]),
        };

        let policy = settings.policy();
        assert!(policy.allows(ImageFormat::Png));
        assert_eq!(policy.allowed_names(), "png");
    }

    #[rstest]
    fn all_unrecognised_formats_fall_back_to_defaults() {
        let settings = UploadSettings {
            max_image_bytes: Some(2048),
            image_formats: Some(vec!["svg".to_owned()]),
        };

        let policy = settings.policy();
        assert_eq!(policy.max_bytes(), 2048);
        assert!(policy.allows(ImageFormat::Png));
        assert!(policy.allows(ImageFormat::WebP));
    }

    #[rstest]
    fn allowed_names_lists_extensions_in_order() {
        assert_eq!(UploadPolicy::default().allowed_names(), "png, jpg, gif, webp");
    }
}
