use std::{collections::BTreeMap, io, io::Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, crate_name};
use color_eyre::eyre::{Result, bail};
use fileversion::{
    BlockFileSource, FixedFileInfo, Locale, Navigator, Property, TreeNavigator, VersionInfo,
};
use itertools::Itertools;
use owo_colors::OwoColorize;
use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .install()?;

    setup_logging();

    let cli = Cli::parse();

    if cli.raw {
        let info = match cli.locale {
            Some(locale) => VersionInfo::load_with_locale(
                &BlockFileSource,
                TreeNavigator,
                &cli.file_path,
                locale,
            )?,
            None => VersionInfo::load(&BlockFileSource, TreeNavigator, &cli.file_path)?,
        };
        return print(&info, &cli.output_type);
    }

    open(&cli)
}

#[cfg(windows)]
fn open(cli: &Cli) -> Result<()> {
    let info = match cli.locale {
        Some(locale) => VersionInfo::open_with_locale(&cli.file_path, locale)?,
        None => VersionInfo::open(&cli.file_path)?,
    };

    print(&info, &cli.output_type)
}

#[cfg(not(windows))]
fn open(cli: &Cli) -> Result<()> {
    bail!(
        "Reading {} requires Windows. Use --raw if it is an extracted version-information block",
        cli.file_path
    )
}

fn setup_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(cfg!(debug_assertions))
                .without_time(),
        )
        .with(
            filter::Targets::new()
                .with_default(LevelFilter::INFO)
                .with_target(crate_name!(), Level::TRACE),
        )
        .init();
}

/// Prints the version information of a Windows executable or library
#[derive(Parser)]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
struct Cli {
    #[arg(short = 'v', short_alias = 'V', long, action = clap::builder::ArgAction::Version)]
    version: (),

    /// The file to read
    #[arg(value_parser = is_valid_file, value_hint = clap::ValueHint::FilePath)]
    file_path: Utf8PathBuf,

    /// Look up string properties in this translation first, for example 040904b0
    #[arg(short, long)]
    locale: Option<Locale>,

    /// Read the file as an extracted version-information block instead of an executable
    #[arg(long)]
    raw: bool,

    #[command(flatten)]
    output_type: OutputType,
}

#[derive(Args)]
#[group(multiple = false)]
struct OutputType {
    /// Output the version information as JSON
    #[arg(long)]
    json: bool,

    /// Output the version information as prettified JSON
    #[arg(long)]
    pretty_json: bool,

    /// Output the version information as YAML
    #[arg(long)]
    yaml: bool,
}

#[derive(Serialize)]
struct Report {
    locales: Vec<Locale>,
    strings: BTreeMap<Property, String>,
    fixed_info: FixedFileInfo,
}

impl Report {
    fn new<N: Navigator>(info: &VersionInfo<N>) -> Self {
        Self {
            locales: info.locales().to_vec(),
            strings: Property::iter()
                .map(|property| (property, info.property(property).unwrap_or_default()))
                .collect(),
            fixed_info: info.fixed_info(),
        }
    }

    fn write_text<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "{}: {}", "Locales".blue(), self.locales.iter().join(", "))?;

        for (property, value) in &self.strings {
            writeln!(out, "{}: {value}", property.blue())?;
        }

        let fixed_info = &self.fixed_info;
        writeln!(out, "{}: {}", "File version".blue(), fixed_info.file_version)?;
        writeln!(
            out,
            "{}: {}",
            "Product version".blue(),
            fixed_info.product_version
        )?;
        writeln!(
            out,
            "{}: {}",
            "Flags".blue(),
            fixed_info
                .flags()
                .iter_names()
                .map(|(name, _)| name)
                .join(" | ")
        )?;
        writeln!(out, "{}: {:#010x}", "File OS".blue(), fixed_info.file_os)?;
        writeln!(
            out,
            "{}: {:#010x} ({:#010x})",
            "File type".blue(),
            fixed_info.file_type,
            fixed_info.file_subtype
        )?;
        writeln!(out, "{}: {:#018x}", "File date".blue(), fixed_info.file_date())
    }
}

fn print<N: Navigator>(info: &VersionInfo<N>, output_type: &OutputType) -> Result<()> {
    let report = Report::new(info);

    let mut stdout_lock = anstream::stdout().lock();
    match output_type {
        OutputType {
            pretty_json: true, ..
        } => serde_json::to_writer_pretty(&mut stdout_lock, &report)?,
        OutputType { json: true, .. } => serde_json::to_writer(&mut stdout_lock, &report)?,
        OutputType { yaml: true, .. } => serde_yaml::to_writer(&mut stdout_lock, &report)?,
        _ => report.write_text(&mut stdout_lock)?,
    }

    Ok(())
}

fn is_valid_file(path: &str) -> Result<Utf8PathBuf> {
    let path = Utf8Path::new(path);
    if !path.exists() {
        bail!("{path} does not exist")
    }
    if !path.is_file() {
        bail!("{path} is not a file")
    }
    Ok(path.to_path_buf())
}
