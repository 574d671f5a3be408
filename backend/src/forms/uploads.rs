//! Image upload forms for user galleries and offer pictures.

use crate::forms::config::UploadPolicy;
use crate::forms::errors::FormError;
use crate::forms::field::FieldSpec;
use crate::forms::form::{Form, FormSchema};
use crate::forms::value::{CleanedValues, ImageUpload};

/// Validated gallery picture for a user profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryUpload {
    /// The accepted picture.
    pub image: ImageUpload,
}

/// Upload form for user gallery pictures.
///
/// # Examples
/// ```
/// use backend::forms::{FileUpload, Form, GalleryImageForm, Submission};
///
/// let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
/// let submission =
///     Submission::new().with_file("image", FileUpload::new("me.png", png.to_vec()));
///
/// let upload = GalleryImageForm::default().validate(&submission)?;
/// assert_eq!(upload.image.file_name(), "me.png");
/// # Ok::<(), backend::forms::FormError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct GalleryImageForm {
    policy: UploadPolicy,
}

impl GalleryImageForm {
    /// Create the form with an explicit upload policy.
    pub fn new(policy: UploadPolicy) -> Self {
        Self { policy }
    }
}

impl Form for GalleryImageForm {
    type Output = GalleryUpload;

    fn schema(&self) -> Result<FormSchema, FormError> {
        Ok(FormSchema::new(vec![FieldSpec::image(
            "image",
            self.policy.clone(),
        )]))
    }

    fn bind(&self, mut cleaned: CleanedValues) -> Result<Self::Output, FormError> {
        Ok(GalleryUpload {
            image: cleaned.require_image("image")?,
        })
    }
}

/// Validated offer picture with its placement flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferImageUpload {
    /// The accepted picture.
    pub image: ImageUpload,
    /// Whether the picture becomes the offer's main image.
    pub is_main: bool,
}

/// Upload form for offer pictures.
#[derive(Debug, Default, Clone)]
pub struct OfferImageForm {
    policy: UploadPolicy,
}

impl OfferImageForm {
    /// Create the form with an explicit upload policy.
    pub fn new(policy: UploadPolicy) -> Self {
        Self { policy }
    }
}

impl Form for OfferImageForm {
    type Output = OfferImageUpload;

    fn schema(&self) -> Result<FormSchema, FormError> {
        Ok(FormSchema::new(vec![
            FieldSpec::image("path", self.policy.clone()),
            FieldSpec::boolean("is_main").optional(),
        ]))
    }

    fn bind(&self, mut cleaned: CleanedValues) -> Result<Self::Output, FormError> {
        Ok(OfferImageUpload {
            image: cleaned.require_image("path")?,
            is_main: cleaned.require_boolean("is_main")?,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use image::ImageFormat;
    use rstest::rstest;

    use super::*;
    use crate::forms::field::REQUIRED_MESSAGE;
    use crate::forms::submission::{FileUpload, Submission};

    fn png_bytes() -> Vec<u8> {
        vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]
    }

    #[rstest]
    fn a_gallery_picture_binds_with_its_content() {
        let submission = Submission::new()
            .with_file("image", FileUpload::new("me.png", png_bytes()));

        let upload = GalleryImageForm::default()
            .validate(&submission)
            .expect("a png must bind");

        assert_eq!(upload.image.file_name(), "me.png");
        assert_eq!(upload.image.format(), ImageFormat::Png);
        assert_eq!(upload.image.bytes(), png_bytes().as_slice());
    }

    #[rstest]
    fn a_missing_gallery_picture_rejects_as_required() {
        let error = GalleryImageForm::default()
            .validate(&Submission::new())
            .expect_err("a missing file must reject");

        let bag = error.field_errors().expect("rejected carries the bag");
        assert_eq!(bag.field_messages("image"), [REQUIRED_MESSAGE]);
    }

    #[rstest]
    #[case::flag_on(Some("on"), true)]
    #[case::flag_off(Some("0"), false)]
    #[case::flag_absent(None, false)]
    fn an_offer_picture_binds_with_its_placement_flag(
        #[case] flag: Option<&str>,
        #[case] expected: bool,
    ) {
        let mut submission = Submission::new()
            .with_file("path", FileUpload::new("banner.png", png_bytes()));
        if let Some(state) = flag {
            submission = submission.with_field("is_main", state);
        }

        let upload = OfferImageForm::default()
            .validate(&submission)
            .expect("a png must bind");

        assert_eq!(upload.is_main, expected);
        assert_eq!(upload.image.file_name(), "banner.png");
    }

    #[rstest]
    fn an_oversized_picture_rejects_under_a_tight_policy() {
        let policy = UploadPolicy::new(4, vec![ImageFormat::Png]);
        let submission = Submission::new()
            .with_file("path", FileUpload::new("banner.png", png_bytes()));

        let error = OfferImageForm::new(policy)
            .validate(&submission)
            .expect_err("an oversized file must reject");

        let bag = error.field_errors().expect("rejected carries the bag");
        assert_eq!(
            bag.field_messages("path"),
            ["the file exceeds the 4 byte upload limit"]
        );
    }

    #[rstest]
    fn an_unrecognised_payload_rejects() {
        let submission = Submission::new()
            .with_file("image", FileUpload::new("notes.png", b"plain text".to_vec()));

        let error = GalleryImageForm::default()
            .validate(&submission)
            .expect_err("an unrecognised payload must reject");

        let bag = error.field_errors().expect("rejected carries the bag");
        assert_eq!(bag.field_messages("image"), ["upload a valid image"]);
    }
}
