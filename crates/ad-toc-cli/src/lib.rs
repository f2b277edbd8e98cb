use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ad_toc_config::{
    CollapseState, Config, ConfigError, LoadOptions, Locale, TextKey, TocSettings,
};
use ad_toc_core::{
    apply, DocumentSource, ExitCode, Operation, TocError, TocOptions, TocOutcome, TocRequest,
};
use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde_json::json;

#[derive(Parser, Debug)]
#[command(
    name = "ad-toc",
    author,
    version,
    about = "Generate a checkbox table of contents at the top of a markdown document",
    long_about = None
)]
pub struct Cli {
    /// Configuration file to apply last (`.toml`, or the host's `data.json`)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Insert or refresh the TOC block
    Generate(DocumentArgs),
    /// Remove generated TOC blocks
    Remove(DocumentArgs),
    /// Print the effective settings
    Settings(SettingsArgs),
}

#[derive(Args, Debug)]
struct DocumentArgs {
    /// Markdown file to update ('-' reads stdin and prints the result)
    #[arg(value_name = "FILE", allow_hyphen_values = true)]
    file: PathBuf,

    /// Print diff without writing changes
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// Skip the `.bak` copy of the previous version
    #[arg(long = "no-backup")]
    no_backup: bool,

    /// Suppress informational output
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

#[derive(Args, Debug)]
struct SettingsArgs {
    /// Locale tag for labels (`zh-cn` selects Chinese)
    #[arg(long, value_name = "TAG", default_value = "en")]
    locale: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = SettingsFormat::Plain)]
    format: SettingsFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SettingsFormat {
    Plain,
    Json,
}

/// Parses arguments, runs the command and returns the process exit code.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut options = LoadOptions::default();
    if let Some(path) = &cli.config {
        options = options.with_override_path(path);
    }
    let config = Config::load(options)?;
    log::debug!(
        "loaded settings from {} layer(s)",
        config.sources.layers.len()
    );

    match cli.command {
        Command::Generate(args) => handle_document(&config.toc, args, Operation::Generate),
        Command::Remove(args) => handle_document(&config.toc, args, Operation::Remove),
        Command::Settings(args) => handle_settings(&config.toc, args),
    }
}

/// Exit code for an error that escaped [`run`].
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    if let Some(toc_err) = err.downcast_ref::<TocError>() {
        toc_err.exit_code()
    } else if err.downcast_ref::<ConfigError>().is_some() {
        ExitCode::Config
    } else {
        ExitCode::Io
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

fn handle_document(
    settings: &TocSettings,
    args: DocumentArgs,
    operation: Operation,
) -> Result<ExitCode> {
    let source = if args.file == Path::new("-") {
        DocumentSource::Stdin
    } else {
        DocumentSource::File(args.file.clone())
    };

    let request = TocRequest {
        source: source.clone(),
        operation,
        options: TocOptions {
            dry_run: args.dry_run,
            backup: !args.no_backup,
        },
    };

    match apply(request, settings) {
        Ok(outcome) => {
            report(&args, &source, &outcome)?;
            Ok(outcome.exit_code)
        }
        // Already logged by the engine; the document is left as it was.
        Err(err) if err.is_precondition() => Ok(err.exit_code()),
        Err(err) => Err(err.into()),
    }
}

fn report(args: &DocumentArgs, source: &DocumentSource, outcome: &TocOutcome) -> io::Result<()> {
    let mut stdout = io::stdout().lock();

    if let DocumentSource::Stdin = source {
        if args.dry_run {
            if let Some(diff) = &outcome.diff {
                write!(stdout, "{diff}")?;
            }
        } else {
            write!(stdout, "{}", outcome.result)?;
        }
        return stdout.flush();
    }

    if args.quiet {
        return Ok(());
    }

    if args.dry_run {
        match &outcome.diff {
            Some(diff) => write!(stdout, "{diff}")?,
            None => writeln!(stdout, "No changes (dry run)")?,
        }
    } else if outcome.written {
        writeln!(
            stdout,
            "Updated {} ({} heading(s))",
            args.file.display(),
            outcome.headings.len()
        )?;
    } else {
        writeln!(stdout, "{} is already up to date", args.file.display())?;
    }

    stdout.flush()
}

fn handle_settings(settings: &TocSettings, args: SettingsArgs) -> Result<ExitCode> {
    let rendered = match args.format {
        SettingsFormat::Plain => describe_settings(settings, Locale::from_tag(&args.locale)),
        SettingsFormat::Json => serde_json::to_string_pretty(&host_data(settings))?,
    };
    println!("{rendered}");
    Ok(ExitCode::Success)
}

/// One `label: value` line per setting, labelled in `locale`.
fn describe_settings(settings: &TocSettings, locale: Locale) -> String {
    let none = locale.text(TextKey::None);
    let toggled = |enabled: bool, value: Option<&str>| {
        let shown = value.unwrap_or(none);
        if enabled {
            shown.to_string()
        } else {
            format!("{shown} (off)")
        }
    };

    let collapse = settings.collapse.value.map(|state| match state {
        CollapseState::Open => locale.text(TextKey::Open),
        CollapseState::Close => locale.text(TextKey::Close),
    });

    [
        (
            TextKey::EnableCodeBlock,
            settings.style.is_fenced().to_string(),
        ),
        (TextKey::CodeBlockTip, settings.fence_label.clone()),
        (TextKey::HeadNoadTocTip, settings.head_marker.clone()),
        (TextKey::TailNoadTocTip, settings.tail_marker.clone()),
        (
            TextKey::TitleContent,
            toggled(settings.title.enabled, settings.title.value.as_deref()),
        ),
        (
            TextKey::ColorContent,
            toggled(settings.color.enabled, settings.color.value.as_deref()),
        ),
        (
            TextKey::CollapseSetting,
            toggled(settings.collapse.enabled, collapse),
        ),
        (TextKey::TocLevel, settings.max_level.to_string()),
    ]
    .into_iter()
    .map(|(key, value)| format!("{}: {value}", locale.text(key)))
    .collect::<Vec<_>>()
    .join("\n")
}

/// The settings as the host application persists them, `"none"` included.
fn host_data(settings: &TocSettings) -> serde_json::Value {
    let or_none = |value: Option<&str>| value.unwrap_or("none").to_string();

    json!({
        "headNoadTocTip": settings.head_marker,
        "tailNoadTocTip": settings.tail_marker,
        "enableCodeBlock": settings.style.is_fenced(),
        "codeBlockTitle": settings.fence_label,
        "enableTitleContent": settings.title.enabled,
        "titleContent": or_none(settings.title.value.as_deref()),
        "enableColorContent": settings.color.enabled,
        "colorContent": or_none(settings.color.value.as_deref()),
        "enableCollapseContent": settings.collapse.enabled,
        "collapseContent": or_none(settings.collapse.value.map(|state| state.as_str())),
        "tocLevel": settings.max_level,
    })
}
