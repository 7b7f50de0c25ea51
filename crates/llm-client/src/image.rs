//! Image sizes accepted by the image generation service.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unsupported image size: {0}")]
pub struct ImageSizeError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ImageSize {
    pub const ALL: [ImageSize; 3] = [ImageSize::Small, ImageSize::Medium, ImageSize::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Small => "256x256",
            ImageSize::Medium => "512x512",
            ImageSize::Large => "1024x1024",
        }
    }

    /// Finds a size token (e.g. `1024x1024`) anywhere in `text`; returns it with the text
    /// stripped of that token. Falls back to the default size and unchanged text.
    pub fn extract(text: &str) -> (ImageSize, String) {
        for size in ImageSize::ALL {
            if let Some(pos) = text.find(size.as_str()) {
                let mut rest = String::with_capacity(text.len());
                rest.push_str(&text[..pos]);
                rest.push_str(&text[pos + size.as_str().len()..]);
                let rest = rest.split_whitespace().collect::<Vec<_>>().join(" ");
                return (size, rest);
            }
        }
        (ImageSize::default(), text.trim().to_string())
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = ImageSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageSize::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| ImageSizeError(s.to_string()))
    }
}
