//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the Ctrl-C handler, then either
//! prints the space report or places the given files and copies their URLs.

use anyhow::{Context, Result};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};

use publink::cli::{help_text, Args, NO_FILES_MESSAGE};
use publink::config::{load_or_init, validate_and_normalize, LoadResult, CONFIG_ENV};
use publink::output as out;
use publink::{
    default_config_path, directory_usage, place_all_with, shutdown, urls, ClipboardSink, Config,
    Placer, PublinkError, SystemClipboard,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    // Create template config on first run (before logging init)
    let mut cfg = match load_or_init(!args.has_required_overrides())? {
        LoadResult::Loaded(cfg) => cfg,
        LoadResult::Defaults => Config::default(),
        LoadResult::CreatedTemplate(path) => {
            out::print_success(&format!(
                "A template publink config was written to: {}",
                path.display()
            ));
            out::print_info("Edit `public_root` and `url_base` to match your synced folder, then re-run this command.");
            out::print_info(&format!(
                "To use a different location set {CONFIG_ENV}, or pass both --public-root and --url-base."
            ));
            return Ok(());
        }
    };

    // Apply CLI overrides (CLI wins)
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json)
        .inspect_err(|e| out::print_error(&format!("Failed to initialize logging: {e}")))?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; skipping remaining files...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take(); // drop guard here to flush tracing_appender
            }
        })
        .context("install Ctrl-C handler")?;
    }

    debug!("Starting publink: {:?}", args);

    let result = execute(&args, &mut cfg);

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn print_config_location() {
    if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {cfg_env}\n"));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("Default publink config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run without --print-config to create a template.");
            }
        }
        Err(e) => out::print_error(&format!("Could not determine a default config path: {e}")),
    }
}

fn execute(args: &Args, cfg: &mut Config) -> Result<()> {
    if args.space {
        return report_space(cfg);
    }

    if args.is_missing_work() {
        // The message itself is printed by main when the error propagates.
        out::print_warn(&format!("Public URL base: {}", cfg.url_base));
        eprintln!("{}", help_text());
        let err = PublinkError::Usage(NO_FILES_MESSAGE.to_string());
        error!(code = err.code(), "No files given");
        return Err(err.into());
    }

    let target = args.target_dir(cfg).map_err(|e| {
        out::print_error(&e.to_string());
        eprintln!("{}", help_text());
        error!(code = e.code(), "Rejected target directory");
        e
    })?;

    validate_and_normalize(cfg)?;
    let placer = Placer::from_config(cfg);
    debug!(root = %placer.root().display(), target = %target, "Placing {} file(s)", args.files.len());

    let outcomes = place_all_with(&placer, &args.files, &target, args.move_files, |o| {
        match &o.result {
            Ok(p) => out::print_user(&p.url),
            Err(e) => out::print_item_error(&e.to_string()),
        }
    });

    let produced = urls(&outcomes);
    let failed = outcomes.len() - produced.len();
    info!(placed = produced.len(), failed, "Batch finished");

    if cfg.clipboard && !produced.is_empty() {
        match SystemClipboard::new().set_text(&produced.join("\n")) {
            Ok(()) => debug!("Copied {} URL(s) to the clipboard", produced.len()),
            Err(e) => {
                warn!(error = %e, "Clipboard update failed");
                out::print_warn(&format!("Could not copy URLs to the clipboard: {e}"));
            }
        }
    }

    Ok(())
}

fn report_space(cfg: &Config) -> Result<()> {
    let root = publink::config::expand_home(&cfg.space_root);
    out::print_user("Calculating sizes");
    let report = directory_usage(&root)
        .with_context(|| format!("measure disk usage of '{}'", root.display()))?;
    for line in report.render() {
        out::print_user(&line);
    }
    info!(root = %root.display(), total = report.total, "Space report finished");
    Ok(())
}
