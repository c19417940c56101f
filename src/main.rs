//! musicstore-daemon: deterministic synthetic music catalog.
//!
//! This binary can run in two modes:
//! - CLI mode: one-shot subcommands that print or write catalog artifacts
//! - Daemon mode: JSON-RPC server over stdio

use std::io::Write;
use std::path::Path;
use std::time::Instant;

use musicstore_daemon::audio::write_wav;
use musicstore_daemon::catalog::build_page;
use musicstore_daemon::cli::{cover_spec, Cli, Command};
use musicstore_daemon::config::CatalogConfig;
use musicstore_daemon::cover::render_cover;
use musicstore_daemon::error::{CatalogError, ErrorCode, Result};
use musicstore_daemon::export::{export_page, render_clip, sanitize_component};
use musicstore_daemon::lexicon::LexiconCache;
use musicstore_daemon::rng::random_seed;
use musicstore_daemon::rpc::{run_server, ServerState};
use musicstore_daemon::types::CatalogPage;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let mut config = CatalogConfig::from_env();
    cli.apply_to(&mut config);

    if let Some(problem) = config.validate() {
        eprintln!("Warning: {}", problem);
    }

    let cache = LexiconCache::new(config.effective_locales_path());

    match &cli.command {
        Command::Songs { page, pretty } => {
            let request = page.page_request(&config);
            let catalog = build_page(&cache, &request.locale, &request.params())?;
            println!("{}", page_json(&catalog, *pretty)?);
            Ok(())
        }
        Command::Audio { clip, output } => {
            let audio = clip.audio_ref(&config)?;
            let output_path = output.clone().unwrap_or_else(|| {
                config
                    .effective_output_path()
                    .join(format!("{}.wav", audio.artifact_id()))
            });

            eprintln!("=== musicstore-daemon clip ===");
            eprintln!("Seed: {}", audio.seed);
            eprintln!("Page: {}  Index: {}", audio.page, audio.index);
            eprintln!("Duration: {}s", audio.seconds);
            eprintln!("Output: {}", output_path.display());
            eprintln!();

            let start_time = Instant::now();
            let pcm = render_clip(&audio);
            let wav = pcm.to_wav()?;

            eprintln!("Synthesis complete!");
            eprintln!("  Time: {:.2}s", start_time.elapsed().as_secs_f32());
            eprintln!("  Samples: {}", pcm.len());
            eprintln!("  Audio duration: {:.2}s", pcm.duration_sec());
            eprintln!();

            write_wav(&wav, &output_path)?;
            eprintln!("Saved to: {}", output_path.display());
            Ok(())
        }
        Command::Cover { output, .. } => {
            let Some(spec) = cover_spec(&cli.command) else {
                return Ok(());
            };
            let svg = render_cover(&spec);
            match output {
                Some(path) => write_text(path, &svg),
                None => {
                    println!("{}", svg);
                    Ok(())
                }
            }
        }
        Command::Export { page, dir } => {
            let request = page.export_request(&config, dir.clone());
            let out_dir = request.dir.clone().unwrap_or_else(|| {
                config.effective_output_path().join(format!(
                    "songs_{}_{}",
                    sanitize_component(&request.seed),
                    request.params().page
                ))
            });

            eprintln!("=== musicstore-daemon export ===");
            eprintln!("Locale: {}", request.locale);
            eprintln!("Seed: {}", request.seed);
            eprintln!("Page: {}  Size: {}", request.page, request.params().page_size);
            eprintln!("Output: {}", out_dir.display());
            eprintln!();

            let files = export_page(&cache, &request, &out_dir, |done, total, file| {
                eprintln!("[{}/{}] {}", done, total, file.name);
            })?;

            eprintln!();
            eprintln!("Exported {} files to {}", files.len(), out_dir.display());
            Ok(())
        }
        Command::RandomSeed => {
            println!("{}", random_seed());
            Ok(())
        }
        Command::Daemon => run_daemon_mode(config),
    }
}

/// Serializes a catalog page for stdout.
fn page_json(page: &CatalogPage, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(page)
    } else {
        serde_json::to_string(page)
    };
    json.map_err(|e| {
        CatalogError::with_source(
            ErrorCode::OutputFailed,
            format!("Failed to serialize page {}: {}", page.page, e),
            e,
        )
    })
}

/// Writes a text artifact, creating parent directories.
fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CatalogError::output_failed(parent, e))?;
    }
    let mut file =
        std::fs::File::create(path).map_err(|e| CatalogError::output_failed(path, e))?;
    file.write_all(text.as_bytes())
        .map_err(|e| CatalogError::output_failed(path, e))?;
    eprintln!("Saved to: {}", path.display());
    Ok(())
}

/// Runs the daemon mode (JSON-RPC server).
fn run_daemon_mode(config: CatalogConfig) -> Result<()> {
    eprintln!("=== musicstore-daemon JSON-RPC Server ===");
    eprintln!("Reading from stdin, writing to stdout.");
    eprintln!("Send JSON-RPC requests to control the daemon.");
    eprintln!();
    eprintln!("Locales: {}", config.effective_locales_path().display());
    eprintln!("Output: {}", config.effective_output_path().display());
    eprintln!("Default locale: {}", config.default_locale);
    eprintln!();

    let state = ServerState::new(config);

    // Other locales still load on demand.
    let default_locale = state.config.default_locale.clone();
    if let Err(e) = state.lexicon.preload(&[default_locale.as_str()]) {
        eprintln!("Warning: {}", e);
    }

    run_server(state)
}
