//! pixel-codegen CLI
//!
//! Usage:
//!   pixel-codegen [OPTIONS] <IMAGES>...
//!
//! Options:
//!   -p, --preset <NAME|FILE>  Built-in preset name or preset TOML file
//!   -t, --template <FILE>     Template file (falls back to the built-in one)
//!   -f, --font                Produce a font instead of images
//!   -n, --name <NAME>         Document name
//!       --tag <KEY=VALUE>     Extra template tag, may be repeated
//!   -o, --output <FILE>       Write to a file instead of stdout
//!       --list-presets        List built-in presets
//!   -v, --verbose             More log output (-vv for trace)
//!   -h, --help                Print help

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pixel_codegen::preset::{Preset, BUILTIN_PRESETS};
use pixel_codegen::template::{load_template, TemplateKind};
use pixel_codegen::{convert, ConvertConfig, DataContainer, RenderError};

#[derive(Parser)]
#[command(name = "pixel-codegen")]
#[command(about = "Convert images and font glyphs into source code")]
struct Cli {
    /// Image files; stems such as U+0416 or 0x41 name font characters
    #[arg(required_unless_present = "list_presets")]
    images: Vec<PathBuf>,

    /// Built-in preset name or preset file (TOML format)
    #[arg(short, long, default_value = "monochrome", value_name = "NAME|FILE")]
    preset: String,

    /// Template file
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Produce a font with a character table
    #[arg(short, long)]
    font: bool,

    /// Document name, defaults to the first image's file stem
    #[arg(short, long)]
    name: Option<String>,

    /// Extra template tag
    #[arg(long = "tag", value_name = "KEY=VALUE", value_parser = parse_tag)]
    tags: Vec<(String, String)>,

    /// Output file (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List built-in presets
    #[arg(long)]
    list_presets: bool,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_tag(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

fn init_logging(verbose: u8) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        })
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn document_name(cli: &Cli) -> String {
    cli.name.clone().unwrap_or_else(|| {
        cli.images
            .first()
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string())
    })
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.list_presets {
        for name in BUILTIN_PRESETS {
            println!("{}", name);
        }
        return;
    }

    let preset = match Preset::resolve(&cli.preset) {
        Ok(p) => p,
        Err(e) => fail(format!("loading preset '{}': {}", cli.preset, e)),
    };

    let items = match DataContainer::from_paths(cli.images.as_slice()) {
        Ok(items) => items,
        Err(e) => fail(e),
    };

    let kind = if cli.font {
        TemplateKind::Font
    } else {
        TemplateKind::Image
    };

    let mut config = ConvertConfig::new()
        .with_preset(preset)
        .with_kind(kind)
        .with_document_name(&document_name(&cli));
    if let Some(path) = &cli.template {
        config = config.with_template(path);
    }
    for (key, value) in &cli.tags {
        config = config.with_tag(key, value);
    }

    let output = match convert(&items, &config) {
        Ok(text) => text,
        Err(RenderError::Parse(errors)) => {
            report_parse_errors(&config, &errors);
            std::process::exit(1);
        }
        Err(e) => fail(e),
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, output) {
                fail(format!("writing '{}': {}", path.display(), e));
            }
        }
        None => print!("{}", output),
    }
}

/// Print each parse error against the template source
fn report_parse_errors(config: &ConvertConfig, errors: &[pixel_codegen::ParseError]) {
    let path = config.resolved_template_path();
    match load_template(path, config.kind) {
        Ok(body) => {
            for error in errors {
                eprint!("{}", error.format(&body.text, &body.origin));
            }
        }
        Err(_) => {
            let name = path.map(Path::display).map(|d| d.to_string()).unwrap_or_default();
            for error in errors {
                eprintln!("Error in {}: {}", name, error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag() {
        assert_eq!(parse_tag("fontName=Sans"), Ok(("fontName".to_string(), "Sans".to_string())));
        assert_eq!(parse_tag("empty="), Ok(("empty".to_string(), String::new())));
        assert!(parse_tag("novalue").is_err());
        assert!(parse_tag("=x").is_err());
    }

    #[test]
    fn test_document_name_default() {
        let cli = Cli::parse_from(["pixel-codegen", "glyphs/logo.png"]);
        assert_eq!(document_name(&cli), "logo");
        let cli = Cli::parse_from(["pixel-codegen", "-n", "big", "a.png"]);
        assert_eq!(document_name(&cli), "big");
    }

    #[test]
    fn test_list_presets_needs_no_images() {
        let cli = Cli::try_parse_from(["pixel-codegen", "--list-presets"]).unwrap();
        assert!(cli.list_presets);
        assert!(Cli::try_parse_from(["pixel-codegen"]).is_err());
    }
}
