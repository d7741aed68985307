//! CLI entry point for doppel.
//!
//! This binary is intentionally thin: it handles argument parsing, I/O, and
//! exit codes. All analysis lives in the library crates. It consumes a
//! module-list file (one absolute path per line, or a JSON array of paths,
//! as dumped by bundler stats) in place of the in-process host hooks.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use doppel_app::{run_gate, run_snapshot, serialize_report, verdict_exit_code, GateInput};
use doppel_manifest::FsManifestSource;
use doppel_session::BuildSession;
use doppel_settings::Overrides;
use doppel_types::PackagePath;

#[derive(Parser, Debug)]
#[command(
    name = "doppel",
    version,
    about = "Duplicate package and doppelganger detector for bundle builds"
)]
struct Cli {
    /// Path to doppel config TOML.
    #[arg(long, default_value = "doppel.toml")]
    config: Utf8PathBuf,

    /// Override mode (build|dev).
    #[arg(long)]
    mode: Option<String>,

    /// Override doppelganger deduplication.
    #[arg(long)]
    dedupe: Option<bool>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the end-of-build gate over a module list; exits 2 on failure.
    Check {
        /// File listing module paths included in the built artifact.
        #[arg(long)]
        modules: Utf8PathBuf,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/doppel/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/doppel/report.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Analyze a module list and print the report as JSON; never fatal.
    Snapshot {
        /// File listing currently loaded module paths.
        #[arg(long)]
        modules: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/doppel/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (default: stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Check {
            ref modules,
            ref report_out,
            write_markdown,
            ref markdown_out,
        } => cmd_check(
            &cli,
            modules.clone(),
            report_out.clone(),
            write_markdown,
            markdown_out.clone(),
        ),
        Commands::Snapshot { ref modules } => cmd_snapshot(&cli, modules.clone()),
        Commands::Md { report, output } => cmd_md(report, output),
    }
}

fn load_options(cli: &Cli) -> anyhow::Result<doppel_settings::ResolvedOptions> {
    let config_text = match std::fs::read_to_string(&cli.config) {
        Ok(text) => text,
        // Missing config is fine; defaults apply.
        Err(_) => String::new(),
    };

    let cfg = if config_text.trim().is_empty() {
        doppel_settings::DoppelConfigV1::default()
    } else {
        doppel_settings::parse_config_toml(&config_text)
            .with_context(|| format!("parse {}", cli.config))?
    };

    doppel_settings::resolve_config(
        cfg,
        Overrides {
            mode: cli.mode.clone(),
            deduplicate_doppelgangers: cli.dedupe,
        },
    )
    .context("resolve config")
}

fn load_modules(path: &Utf8PathBuf) -> anyhow::Result<Vec<PackagePath>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read module list {path}"))?;
    parse_module_list(&text)
}

/// Accepts either a newline-separated list or a JSON array of path strings.
fn parse_module_list(text: &str) -> anyhow::Result<Vec<PackagePath>> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        let paths: Vec<String> =
            serde_json::from_str(trimmed).context("parse module list as JSON array")?;
        return Ok(paths.iter().map(PackagePath::new).collect());
    }
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PackagePath::new)
        .collect())
}

fn cmd_check(
    cli: &Cli,
    modules: Utf8PathBuf,
    report_out: Utf8PathBuf,
    write_markdown: bool,
    markdown_out: Utf8PathBuf,
) -> anyhow::Result<()> {
    let options = load_options(cli)?;
    let host_modules = load_modules(&modules)?;

    let session = BuildSession::new(options.mode, options.deduplicate_doppelgangers);
    let output = run_gate(
        FsManifestSource,
        GateInput {
            session: &session,
            exceptions: &options.exceptions,
            host_modules,
        },
    );

    write_bytes(&report_out, &serialize_report(&output.report)?)?;
    if write_markdown {
        let md = doppel_render::render_markdown(&output.report);
        write_bytes(&markdown_out, md.as_bytes())?;
    }

    for line in &output.summary_lines {
        println!("{line}");
    }
    if let Some(failure) = &output.failure {
        eprintln!("{failure}");
    }

    std::process::exit(verdict_exit_code(output.report.verdict));
}

fn cmd_snapshot(cli: &Cli, modules: Utf8PathBuf) -> anyhow::Result<()> {
    let options = load_options(cli)?;
    let host_modules = load_modules(&modules)?;

    let session = BuildSession::new(options.mode, options.deduplicate_doppelgangers);
    let report = run_snapshot(
        FsManifestSource,
        GateInput {
            session: &session,
            exceptions: &options.exceptions,
            host_modules,
        },
    );

    let bytes = serialize_report(&report)?;
    println!("{}", String::from_utf8_lossy(&bytes));
    Ok(())
}

fn cmd_md(report: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let text =
        std::fs::read_to_string(&report).with_context(|| format!("read report {report}"))?;
    let parsed = doppel_app::parse_report_json(&text)?;
    let md = doppel_render::render_markdown(&parsed);

    match output {
        Some(path) => write_bytes(&path, md.as_bytes())?,
        None => print!("{md}"),
    }
    Ok(())
}

fn write_bytes(path: &Utf8PathBuf, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write {path}"))
}
