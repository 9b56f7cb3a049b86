use clap::Parser;
use image::Rgba;
use pwa_icon_gen::icon_gen::{self, parse_color, DEFAULT_ACCENT, DEFAULT_BACKGROUND};
use pwa_icon_gen::{BatchFailure, IconError, IconStyle, Options};
use std::{path::PathBuf, process::ExitCode};

#[derive(Debug, Parser)]
#[clap(
    name = "pwa-icon-gen",
    about = "Generate placeholder PWA icons and a favicon bundle"
)]
struct Args {
    /// Output directory, created if missing.
    #[clap(short, long, value_name = "DIR", default_value = "public")]
    output: PathBuf,

    /// Background color of every icon (CSS color format)
    #[clap(long, value_name = "COLOR", default_value = DEFAULT_BACKGROUND, value_parser = parse_color)]
    background: Rgba<u8>,

    /// Color of the centered ellipse (CSS color format)
    #[clap(long, value_name = "COLOR", default_value = DEFAULT_ACCENT, value_parser = parse_color)]
    accent: Rgba<u8>,

    /// Also write manifest-icons.json listing the manifest icons
    #[clap(long)]
    manifest: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let opts = Options {
        style: IconStyle {
            background: args.background,
            accent: args.accent,
            ..IconStyle::default()
        },
        manifest: args.manifest,
        ..Options::new(args.output)
    };

    match icon_gen::create_all_icons(&opts) {
        Ok(report) => {
            log::debug!("wrote {} files", report.written.len());
            ExitCode::SUCCESS
        }
        Err(failure) => report_failure(&failure),
    }
}

fn report_failure(failure: &BatchFailure) -> ExitCode {
    eprintln!("✗ Error: {}", failure.error);
    if let Some(hint) = failure.error.hint() {
        eprintln!("{hint}");
    }
    if !failure.nothing_written() {
        eprintln!(
            "{} file(s) were written before the failure and were left in place",
            failure.written.len()
        );
    }

    match failure.error {
        IconError::MissingDependency { .. } => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}
