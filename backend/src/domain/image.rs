//! Inline recipe images carried as base64 data URIs.
//!
//! Clients send and receive `data:image/<subtype>;base64,<payload>`. The
//! decoded bytes and the MIME type are stored separately.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Largest accepted decoded image, in bytes.
pub const IMAGE_MAX_BYTES: usize = 5 * 1024 * 1024;

const ACCEPTED_SUBTYPES: [&str; 5] = ["png", "jpeg", "jpg", "gif", "webp"];

/// Reasons a data URI is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageValidationError {
    NotADataUri,
    UnsupportedType { mime: String },
    InvalidBase64,
    Empty,
    TooLarge { max: usize },
}

impl fmt::Display for ImageValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotADataUri => {
                write!(f, "image must be a data URI of the form data:image/<type>;base64,<data>")
            }
            Self::UnsupportedType { mime } => write!(f, "image type {mime} is not supported"),
            Self::InvalidBase64 => write!(f, "image payload is not valid base64"),
            Self::Empty => write!(f, "image must not be empty"),
            Self::TooLarge { max } => write!(f, "image must be at most {max} bytes"),
        }
    }
}

impl std::error::Error for ImageValidationError {}

/// Decoded recipe image.
///
/// # Examples
/// ```
/// use foodgram::domain::RecipeImage;
///
/// let image = RecipeImage::from_data_uri("data:image/png;base64,iVBORw0KGgo=").expect("valid");
/// assert_eq!(image.mime(), "image/png");
/// assert_eq!(image.to_data_uri(), "data:image/png;base64,iVBORw0KGgo=");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct RecipeImage {
    mime: String,
    bytes: Vec<u8>,
}

impl RecipeImage {
    /// Parse a `data:` URI.
    pub fn from_data_uri(value: &str) -> Result<Self, ImageValidationError> {
        let rest = value
            .trim()
            .strip_prefix("data:")
            .ok_or(ImageValidationError::NotADataUri)?;
        let (mime, payload) = rest
            .split_once(";base64,")
            .ok_or(ImageValidationError::NotADataUri)?;
        let mime = mime.to_ascii_lowercase();
        let subtype = mime
            .strip_prefix("image/")
            .ok_or_else(|| ImageValidationError::UnsupportedType { mime: mime.clone() })?;
        if !ACCEPTED_SUBTYPES.contains(&subtype) {
            return Err(ImageValidationError::UnsupportedType { mime });
        }
        let bytes = STANDARD
            .decode(payload)
            .map_err(|_| ImageValidationError::InvalidBase64)?;
        Self::from_parts(mime, bytes)
    }

    /// Rebuild an image from stored columns, enforcing the same limits.
    pub fn from_parts(mime: String, bytes: Vec<u8>) -> Result<Self, ImageValidationError> {
        if bytes.is_empty() {
            return Err(ImageValidationError::Empty);
        }
        if bytes.len() > IMAGE_MAX_BYTES {
            return Err(ImageValidationError::TooLarge {
                max: IMAGE_MAX_BYTES,
            });
        }
        Ok(Self { mime, bytes })
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Render as a `data:` URI.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

impl fmt::Debug for RecipeImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeImage")
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("image/png")]
    #[case("image/JPEG")]
    #[case("image/webp")]
    fn accepts_supported_types(#[case] mime: &str) {
        let uri = format!("data:{mime};base64,AQID");
        let image = RecipeImage::from_data_uri(&uri).expect("supported image");
        assert_eq!(image.bytes(), &[1, 2, 3]);
        assert_eq!(image.mime(), mime.to_ascii_lowercase());
    }

    #[rstest]
    #[case("AQID", ImageValidationError::NotADataUri)]
    #[case("data:image/png,AQID", ImageValidationError::NotADataUri)]
    #[case(
        "data:text/plain;base64,AQID",
        ImageValidationError::UnsupportedType { mime: "text/plain".to_owned() }
    )]
    #[case(
        "data:image/svg+xml;base64,AQID",
        ImageValidationError::UnsupportedType { mime: "image/svg+xml".to_owned() }
    )]
    #[case("data:image/png;base64,!!!", ImageValidationError::InvalidBase64)]
    #[case("data:image/png;base64,", ImageValidationError::Empty)]
    fn rejects_malformed_uris(#[case] uri: &str, #[case] expected: ImageValidationError) {
        assert_eq!(RecipeImage::from_data_uri(uri), Err(expected));
    }

    #[rstest]
    fn rejects_oversized_payloads() {
        let bytes = vec![0_u8; IMAGE_MAX_BYTES + 1];
        assert_eq!(
            RecipeImage::from_parts("image/png".to_owned(), bytes),
            Err(ImageValidationError::TooLarge {
                max: IMAGE_MAX_BYTES
            })
        );
    }
}
