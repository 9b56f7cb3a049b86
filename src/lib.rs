//! Placeholder PWA icon generation.
//!
//! [`icon_gen::create_all_icons`] writes the standard set of square PNG icons
//! plus a single-frame `favicon.ico`, each a solid background with a
//! centered accent ellipse.

pub mod error;
pub mod icon_gen;
pub mod manifest;

pub use error::{BatchFailure, IconError};
pub use icon_gen::{create_all_icons, IconSpec, IconStyle, Options, Report, PWA_ICONS};
