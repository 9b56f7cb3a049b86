use crate::error::{BatchFailure, IconError};
use crate::manifest;
use image::{
    codecs::{
        ico::{IcoEncoder, IcoFrame},
        png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    },
    ColorType, ImageEncoder, ImageFormat, ImageResult, Rgba, RgbaImage,
};
use serde::Serialize;
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

pub const DEFAULT_BACKGROUND: &str = "#1a1625";
pub const DEFAULT_ACCENT: &str = "#00d4aa";
pub const DEFAULT_LABEL: &str = "📈";

pub const FAVICON_FILE: &str = "favicon.ico";
pub const FAVICON_SIZE: u32 = 32;

/// Value of the manifest `purpose` field.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    Any,
    Maskable,
}

/// Where a generated icon ends up being referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconRole {
    /// Listed in the web app manifest.
    Manifest(Option<Purpose>),
    AppleTouch,
    Favicon,
}

/// One square PNG to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSpec {
    pub size: u32,
    pub filename: &'static str,
    pub role: IconRole,
}

impl IconSpec {
    pub const fn new(size: u32, filename: &'static str, role: IconRole) -> Self {
        Self {
            size,
            filename,
            role,
        }
    }
}

/// The standard PWA icon set, in generation order.
pub const PWA_ICONS: &[IconSpec] = &[
    IconSpec::new(64, "pwa-64x64.png", IconRole::Manifest(None)),
    IconSpec::new(192, "pwa-192x192.png", IconRole::Manifest(None)),
    IconSpec::new(
        512,
        "pwa-512x512.png",
        IconRole::Manifest(Some(Purpose::Any)),
    ),
    IconSpec::new(
        512,
        "maskable-icon-512x512.png",
        IconRole::Manifest(Some(Purpose::Maskable)),
    ),
    IconSpec::new(180, "apple-touch-icon.png", IconRole::AppleTouch),
    IconSpec::new(32, "favicon-32x32.png", IconRole::Favicon),
    IconSpec::new(16, "favicon-16x16.png", IconRole::Favicon),
];

/// Colors used to paint an icon.
///
/// `label` is carried along for callers that want to tag a style; it is
/// never drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct IconStyle {
    pub background: Rgba<u8>,
    pub accent: Rgba<u8>,
    pub label: String,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            background: Rgba([0x1a, 0x16, 0x25, 255]),
            accent: Rgba([0x00, 0xd4, 0xaa, 255]),
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

/// Parse any CSS color into an opaque pixel.
pub fn parse_color(value: &str) -> Result<Rgba<u8>, String> {
    let color = css_color::Srgb::from_str(value)
        .map_err(|_| format!("`{value}` is not a valid CSS color"))?;
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;

    Ok(Rgba([
        channel(color.red),
        channel(color.green),
        channel(color.blue),
        255,
    ]))
}

/// Lowercase `#rrggbb` form of a pixel, alpha dropped.
pub fn to_hex(color: Rgba<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

/// Bounding box of the accent ellipse, in pixel-edge coordinates.
///
/// `right` and `bottom` are exclusive, so the box of a full square of
/// edge `n` is `[0, 0, n, n]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EllipseBounds {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl EllipseBounds {
    /// Box inset by `size / 8` on every side.
    pub fn inset(size: u32) -> Self {
        let margin = size / 8;
        Self {
            left: margin,
            top: margin,
            right: size - margin,
            bottom: size - margin,
        }
    }

    /// Whether the center of pixel `(x, y)` falls inside the ellipse.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        let rx = f64::from(self.right - self.left) / 2.0;
        let ry = f64::from(self.bottom - self.top) / 2.0;
        if rx <= 0.0 || ry <= 0.0 {
            return false;
        }

        let cx = f64::from(self.left + self.right) / 2.0;
        let cy = f64::from(self.top + self.bottom) / 2.0;
        let dx = (f64::from(x) + 0.5 - cx) / rx;
        let dy = (f64::from(y) + 0.5 - cy) / ry;

        dx * dx + dy * dy <= 1.0
    }
}

/// Render a `size`×`size` icon: background fill with the inset accent ellipse.
pub fn draw_icon(size: u32, style: &IconStyle) -> RgbaImage {
    let bounds = EllipseBounds::inset(size);
    log::debug!(
        "drawing {size}x{size} icon, ellipse {:?}, label {:?} not rendered",
        bounds,
        style.label
    );

    let mut img = RgbaImage::from_pixel(size, size, style.background);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        if bounds.contains(x, y) {
            *pixel = style.accent;
        }
    }

    img
}

/// Draw one icon and save it as `<out_dir>/<filename>`.
pub fn create_icon(
    spec: &IconSpec,
    out_dir: &Path,
    style: &IconStyle,
) -> Result<PathBuf, IconError> {
    let img = draw_icon(spec.size, style);
    let path = out_dir.join(spec.filename);

    let file = File::create(&path).map_err(|e| IconError::io(&path, e))?;
    let mut out_file = BufWriter::new(file);
    write_png(&img, &mut out_file).map_err(|e| IconError::from_image(&path, "PNG", e))?;
    out_file.flush().map_err(|e| IconError::io(&path, e))?;

    println!("  ✓ Generated {} ({}x{})", path.display(), spec.size, spec.size);
    Ok(path)
}

/// Write `favicon.ico` holding a single 32×32 frame.
pub fn create_favicon(out_dir: &Path, style: &IconStyle) -> Result<PathBuf, IconError> {
    let img = draw_icon(FAVICON_SIZE, style);
    let path = out_dir.join(FAVICON_FILE);

    let frame = IcoFrame::as_png(img.as_raw(), FAVICON_SIZE, FAVICON_SIZE, ColorType::Rgba8)
        .map_err(|e| IconError::from_image(&path, "ICO", e))?;

    let file = File::create(&path).map_err(|e| IconError::io(&path, e))?;
    let mut out_file = BufWriter::new(file);
    IcoEncoder::new(&mut out_file)
        .encode_images(&[frame])
        .map_err(|e| IconError::from_image(&path, "ICO", e))?;
    out_file.flush().map_err(|e| IconError::io(&path, e))?;

    println!("  ✓ Generated {}", path.display());
    Ok(path)
}

// Encode image data as PNG with compression
fn write_png<W: Write>(img: &RgbaImage, w: W) -> ImageResult<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(img.as_raw(), img.width(), img.height(), ColorType::Rgba8)
}

/// Which encoders the imaging backend can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codecs {
    pub png: bool,
    pub ico: bool,
}

impl Codecs {
    pub fn detect() -> Self {
        Self {
            png: ImageFormat::Png.writing_enabled(),
            ico: ImageFormat::Ico.writing_enabled(),
        }
    }

    pub fn ensure(&self) -> Result<(), IconError> {
        if !self.png {
            return Err(IconError::MissingDependency { format: "PNG" });
        }
        if !self.ico {
            return Err(IconError::MissingDependency { format: "ICO" });
        }
        Ok(())
    }
}

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct Options {
    pub output: PathBuf,
    pub icons: Vec<IconSpec>,
    pub style: IconStyle,
    pub codecs: Codecs,
    /// Also write the manifest icon fragment.
    pub manifest: bool,
}

impl Options {
    /// The standard icon set with default colors, written to `output`.
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            icons: PWA_ICONS.to_vec(),
            style: IconStyle::default(),
            codecs: Codecs::detect(),
            manifest: false,
        }
    }
}

/// Files produced by a successful run, in write order.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub written: Vec<PathBuf>,
}

/// Generate every icon in `opts.icons` plus the favicon bundle.
///
/// Stops at the first error. Files written before it stay on disk and are
/// listed in the returned [`BatchFailure`].
pub fn create_all_icons(opts: &Options) -> Result<Report, BatchFailure> {
    let mut written = Vec::new();

    match run_batch(opts, &mut written) {
        Ok(()) => Ok(Report { written }),
        Err(error) => Err(BatchFailure { written, error }),
    }
}

fn run_batch(opts: &Options, written: &mut Vec<PathBuf>) -> Result<(), IconError> {
    opts.codecs.ensure()?;

    create_dir_all(&opts.output).map_err(|e| IconError::io(&opts.output, e))?;
    log::info!(
        "writing {} icons to {} (background {}, accent {})",
        opts.icons.len() + 1,
        opts.output.display(),
        to_hex(opts.style.background),
        to_hex(opts.style.accent)
    );

    println!("Generating PWA icons...");
    println!("{}", "-".repeat(50));

    for spec in &opts.icons {
        written.push(create_icon(spec, &opts.output, &opts.style)?);
    }
    written.push(create_favicon(&opts.output, &opts.style)?);

    if opts.manifest {
        written.push(manifest::write_manifest(
            &opts.output,
            &opts.icons,
            &opts.style,
        )?);
    }

    println!("{}", "-".repeat(50));
    println!("✓ All icons generated successfully!");
    println!("\nNote: these are placeholder icons, replace them with custom artwork later.");

    Ok(())
}
