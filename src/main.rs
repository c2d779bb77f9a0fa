//! Clausedraft - edit clause-based legal templates from scripts.
//!
//! # Usage
//!
//! ```bash
//! clausedraft lease.json
//! clausedraft lease.json --script edits.txt
//! echo "add Term" | clausedraft lease.json --script - --html
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use clausedraft::app::{App, OutputMode, write_draft};
use clausedraft::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};
use clausedraft::draft::UuidGenerator;
use clausedraft::history::DEFAULT_MAX_DEPTH;
use clausedraft::template::JsonFileStore;

/// Template file used when none is given.
const DEFAULT_TEMPLATE: &str = "template.json";

/// Edit clause-based legal templates
#[derive(Parser, Debug)]
#[command(name = "clausedraft", version, about, long_about = None)]
struct Cli {
    /// JSON template file, created on first save
    #[arg(value_name = "TEMPLATE")]
    template: Option<PathBuf>,

    /// Run editing commands from a file (`-` for stdin)
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Print the preview as markup instead of styled text
    #[arg(long)]
    html: bool,

    /// Print the preview without terminal styling
    #[arg(long)]
    no_color: bool,

    /// Maximum number of undo steps kept
    #[arg(long, value_name = "N")]
    history_depth: Option<usize>,

    /// Organization id for new templates
    #[arg(long, value_name = "ID")]
    org: Option<String>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            html: self.html,
            no_color: self.no_color,
            history_depth: self.history_depth,
            org: self.org.clone(),
        }
    }
}

fn output_mode(flags: &ConfigFlags) -> OutputMode {
    if flags.html {
        OutputMode::Html
    } else if flags.no_color {
        OutputMode::Plain
    } else {
        OutputMode::Styled
    }
}

fn open_script(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path)
        .with_context(|| format!("Failed to open script {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
        info!(path = %global_path.display(), "defaults saved");
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    debug!(?effective, "effective flags");

    let template_path = cli
        .template
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE));
    let store = JsonFileStore::new(&template_path);
    if !store.exists() {
        info!(path = %store.path().display(), "new template, written on first save");
    }
    let mut app = App::new(Box::new(store))
        .with_history_depth(effective.history_depth.unwrap_or(DEFAULT_MAX_DEPTH))
        .with_output(output_mode(&effective));
    if let Some(org) = &effective.org {
        app = app.with_organization(org.clone());
    }

    let model = app
        .open(Box::new(UuidGenerator))
        .with_context(|| format!("Failed to open template {}", template_path.display()))?;

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut diag = stderr.lock();

    match &cli.script {
        Some(path) => {
            let input = open_script(path)?;
            let model = app.run(model, input, &mut out, &mut diag)?;
            if model.dirty {
                writeln!(diag, "[warn] unsaved changes discarded")?;
            }
        }
        None => {
            write_draft(&mut out, &model, output_mode(&effective))?;
        }
    }
    out.flush().context("Failed to flush output")
}
