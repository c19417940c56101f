//! Command-line interface.
//!
//! One-shot subcommands print or write catalog artifacts directly; `daemon`
//! serves the same operations as JSON-RPC over stdio.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::catalog::PageRequest;
use crate::config::CatalogConfig;
use crate::cover::CoverSpec;
use crate::error::Result;
use crate::export::{ExportRequest, DEFAULT_EXPORT_SIZE};
use crate::types::AudioRef;

/// musicstore-daemon: deterministic synthetic music catalog
#[derive(Parser, Debug)]
#[command(name = "musicstore-daemon")]
#[command(about = "Seeded music catalog generator: metadata, cover art and audio clips")]
#[command(version)]
pub struct Cli {
    /// Directory containing <code>.json locale banks
    #[arg(long, global = true)]
    pub locales_dir: Option<PathBuf>,

    /// Directory for rendered files
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print a catalog page as JSON
    Songs {
        #[command(flatten)]
        page: PageArgs,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Render one clip to a WAV file
    Audio {
        #[command(flatten)]
        clip: ClipArgs,

        /// Output WAV file path (defaults to <artifact id>.wav in the output dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a cover to an SVG file
    Cover {
        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "")]
        artist: String,

        #[arg(long, default_value_t = 210, allow_hyphen_values = true)]
        hue: i64,

        #[arg(long, default_value_t = 60)]
        sat: i64,

        #[arg(long, default_value_t = 20)]
        lum: i64,

        #[arg(long, default_value_t = 512)]
        width: u32,

        #[arg(long, default_value_t = 512)]
        height: u32,

        /// Output SVG file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write every clip of a page as WAV files
    Export {
        #[command(flatten)]
        page: PageArgs,

        /// Target directory (defaults to the output dir)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Print a fresh random seed
    RandomSeed,

    /// Run in daemon mode (JSON-RPC over stdio)
    Daemon,
}

/// Flags selecting a catalog page.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct PageArgs {
    /// Seed: decimal, 0x-prefixed hex, or any text
    #[arg(long, default_value = "1", allow_hyphen_values = true)]
    pub seed: String,

    /// 1-based page number
    #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
    pub page: i64,

    /// Entries per page
    #[arg(long, allow_hyphen_values = true)]
    pub page_size: Option<i64>,

    /// Average likes per entry (0-10)
    #[arg(long, allow_hyphen_values = true)]
    pub likes: Option<f64>,

    /// Locale code, e.g. en-US or de-DE
    #[arg(long)]
    pub locale: Option<String>,
}

impl PageArgs {
    /// Catalog request, filling unset flags from the configuration.
    pub fn page_request(&self, config: &CatalogConfig) -> PageRequest {
        PageRequest {
            locale: self.locale(config),
            seed: self.seed.clone(),
            page: self.page,
            page_size: self
                .page_size
                .unwrap_or(i64::from(config.default_page_size)),
            likes: self.likes.unwrap_or(config.default_likes),
        }
    }

    /// Export request; the page size defaults to the export default.
    pub fn export_request(&self, config: &CatalogConfig, dir: Option<PathBuf>) -> ExportRequest {
        ExportRequest {
            locale: self.locale(config),
            seed: self.seed.clone(),
            page: self.page,
            page_size: self.page_size.unwrap_or(DEFAULT_EXPORT_SIZE),
            likes: self.likes.unwrap_or(config.default_likes),
            dir,
        }
    }

    fn locale(&self, config: &CatalogConfig) -> String {
        self.locale
            .clone()
            .unwrap_or_else(|| config.default_locale.clone())
    }
}

/// Flags identifying one clip.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ClipArgs {
    /// Audio URL as listed by `songs`; overrides the other clip flags
    #[arg(long)]
    pub url: Option<String>,

    #[arg(long, default_value = "1", allow_hyphen_values = true)]
    pub seed: String,

    #[arg(long, default_value_t = 1)]
    pub page: u64,

    /// Global catalog index
    #[arg(long, default_value_t = 1)]
    pub index: u64,

    /// Clip length in seconds (clamped to 1-15)
    #[arg(long)]
    pub seconds: Option<u32>,
}

impl ClipArgs {
    /// Resolves the flags into an audio reference.
    pub fn audio_ref(&self, config: &CatalogConfig) -> Result<AudioRef> {
        match self.url {
            Some(ref url) => AudioRef::parse(url),
            None => Ok(AudioRef::new(
                self.seed.clone(),
                self.page,
                self.index,
                self.seconds.unwrap_or(config.default_seconds),
            )),
        }
    }
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Applies path flags on top of a configuration.
    pub fn apply_to(&self, config: &mut CatalogConfig) {
        if let Some(ref dir) = self.locales_dir {
            config.locales_path = Some(dir.clone());
        }
        if let Some(ref dir) = self.output_dir {
            config.output_path = Some(dir.clone());
        }
    }
}

/// Builds a cover spec from the `cover` subcommand's flags.
pub fn cover_spec(command: &Command) -> Option<CoverSpec> {
    match command {
        Command::Cover {
            title,
            artist,
            hue,
            sat,
            lum,
            width,
            height,
            ..
        } => Some(CoverSpec {
            title: title.clone(),
            artist: artist.clone(),
            width: *width,
            height: *height,
            hue: *hue,
            sat: *sat,
            lum: *lum,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("musicstore-daemon").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn songs_defaults_come_from_config() {
        let cli = parse(&["songs"]);
        let config = CatalogConfig {
            default_locale: "de-DE".into(),
            default_page_size: 7,
            ..CatalogConfig::default()
        };
        let Command::Songs { page, pretty } = cli.command else {
            panic!("expected songs");
        };
        assert!(!pretty);
        let request = page.page_request(&config);
        assert_eq!(request.locale, "de-DE");
        assert_eq!(request.seed, "1");
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 7);
        assert_eq!(request.likes, 3.7);
    }

    #[test]
    fn songs_flags() {
        let cli = parse(&[
            "songs",
            "--seed",
            "-42",
            "--page",
            "3",
            "--page-size",
            "5",
            "--likes",
            "9.5",
            "--locale",
            "en-US",
        ]);
        let Command::Songs { page, .. } = cli.command else {
            panic!("expected songs");
        };
        let request = page.page_request(&CatalogConfig::default());
        assert_eq!(request.seed, "-42");
        assert_eq!(request.page, 3);
        assert_eq!(request.page_size, 5);
        assert_eq!(request.likes, 9.5);
    }

    #[test]
    fn export_uses_export_page_size() {
        let cli = parse(&["export", "--seed", "0xff", "--dir", "/tmp/songs"]);
        let Command::Export { page, dir } = cli.command else {
            panic!("expected export");
        };
        let request = page.export_request(&CatalogConfig::default(), dir);
        assert_eq!(request.page_size, 10);
        assert_eq!(request.dir, Some(PathBuf::from("/tmp/songs")));
    }

    #[test]
    fn audio_from_url_or_flags() {
        let config = CatalogConfig::default();

        let cli = parse(&["audio", "--url", "/api/audio.wav?seed=abc&page=2&index=21&seconds=4"]);
        let Command::Audio { clip, output } = cli.command else {
            panic!("expected audio");
        };
        assert!(output.is_none());
        assert_eq!(clip.audio_ref(&config).unwrap(), AudioRef::new("abc", 2, 21, 4));

        let cli = parse(&["audio", "--seed", "7", "--index", "3", "-o", "x.wav"]);
        let Command::Audio { clip, output } = cli.command else {
            panic!("expected audio");
        };
        assert_eq!(output, Some(PathBuf::from("x.wav")));
        assert_eq!(clip.audio_ref(&config).unwrap(), AudioRef::new("7", 1, 3, 10));
    }

    #[test]
    fn bad_audio_url_is_an_error() {
        let cli = parse(&["audio", "--url", "/api/audio.wav?page=1"]);
        let Command::Audio { clip, .. } = cli.command else {
            panic!("expected audio");
        };
        assert!(clip.audio_ref(&CatalogConfig::default()).is_err());
    }

    #[test]
    fn cover_flags() {
        let cli = parse(&["cover", "--title", "T", "--hue", "-30"]);
        let spec = cover_spec(&cli.command).unwrap();
        assert_eq!(spec.title, "T");
        assert_eq!(spec.hue, -30);
        assert_eq!(spec.sat, 60);
        assert_eq!(spec.width, 512);
        assert!(cover_spec(&Command::RandomSeed).is_none());
    }

    #[test]
    fn daemon_subcommand_parses() {
        assert_eq!(parse(&["daemon"]).command, Command::Daemon);
        assert_eq!(parse(&["random-seed"]).command, Command::RandomSeed);
    }

    #[test]
    fn global_paths_apply_to_config() {
        let cli = parse(&["songs", "--locales-dir", "/l", "--output-dir", "/o"]);
        let mut config = CatalogConfig::default();
        cli.apply_to(&mut config);
        assert_eq!(config.effective_locales_path(), PathBuf::from("/l"));
        assert_eq!(config.effective_output_path(), PathBuf::from("/o"));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["musicstore-daemon"]).is_err());
    }
}
