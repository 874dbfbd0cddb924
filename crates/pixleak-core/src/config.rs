use serde::{Deserialize, Serialize};

use crate::header::HeaderTemplate;

/// Top-level configuration (loaded from pixleak.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PixleakConfig {
    pub header: HeaderConfig,
    pub search: SearchConfig,
    pub viewer: ViewerConfig,
}

/// The fixed, known header fields. The brute force only varies width and
/// height; magic and maxval must match what the producer hashed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// PPM magic number (default: P6)
    pub magic: String,
    /// Maximum channel value (default: 255)
    pub maxval: String,
}

impl HeaderConfig {
    pub fn template(&self) -> HeaderTemplate {
        HeaderTemplate::new(&self.magic, &self.maxval)
    }
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            magic: "P6".into(),
            maxval: "255".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Bytes per pixel in the raw image body (default: 3, one byte per RGB channel)
    pub bytes_per_pixel: u32,
    /// Multiplier applied to the square-root estimate when deriving the
    /// search bound (default: 2). Raise it for very elongated images.
    pub bound_multiplier: u32,
    /// Fixed search bound, overriding the derived one entirely
    pub bound: Option<u32>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            bytes_per_pixel: 3,
            bound_multiplier: 2,
            bound: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// External command run on each reconstructed artifact before the
    /// operator prompt (e.g. "xdg-open"). When unset, the artifact path is
    /// printed and the operator opens it themselves.
    pub command: Option<String>,
}
