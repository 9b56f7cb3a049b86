//! Web app manifest icon fragment
//!
//! Mirrors the `icons` section of a PWA `manifest.webmanifest` so the
//! generated files can be pasted straight into a build config.

use crate::error::IconError;
use crate::icon_gen::{to_hex, IconRole, IconSpec, IconStyle, Purpose};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "manifest-icons.json";

#[derive(Serialize, Debug, Clone)]
pub struct ManifestFragment {
    /// Background color of the icons, as `#rrggbb`
    pub theme_color: String,

    pub icons: Vec<ManifestIcon>,
}

/// One entry of the manifest `icons` array
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ManifestIcon {
    pub src: String,

    /// Pixel dimensions, e.g. "192x192"
    pub sizes: String,

    #[serde(rename = "type")]
    pub mime_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<Purpose>,
}

impl ManifestIcon {
    /// Entry for `spec`, or `None` when the icon is not a manifest icon
    pub fn from_spec(spec: &IconSpec) -> Option<Self> {
        match spec.role {
            IconRole::Manifest(purpose) => Some(Self {
                src: spec.filename.to_string(),
                sizes: format!("{0}x{0}", spec.size),
                mime_type: "image/png".to_string(),
                purpose,
            }),
            IconRole::AppleTouch | IconRole::Favicon => None,
        }
    }
}

impl ManifestFragment {
    pub fn build(icons: &[IconSpec], style: &IconStyle) -> Self {
        Self {
            theme_color: to_hex(style.background),
            icons: icons.iter().filter_map(ManifestIcon::from_spec).collect(),
        }
    }
}

/// Write `manifest-icons.json` into `dir`.
pub fn write_manifest(
    dir: &Path,
    icons: &[IconSpec],
    style: &IconStyle,
) -> Result<PathBuf, IconError> {
    let path = dir.join(MANIFEST_FILE);
    let fragment = ManifestFragment::build(icons, style);

    let json = serde_json::to_string_pretty(&fragment).map_err(|e| IconError::Encode {
        path: path.clone(),
        source: Box::new(e),
    })?;
    std::fs::write(&path, json).map_err(|e| IconError::io(&path, e))?;

    println!("  ✓ Generated {}", path.display());
    Ok(path)
}
