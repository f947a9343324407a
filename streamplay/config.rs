use crate::error::App;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fs};

/// DASH test stream played when nothing else is configured.
pub const DASH_TEST_STREAM: &str = "https://bitdash-a.akamaihd.net/content/sintel/sintel.mpd";
pub const HLS_TEST_STREAM: &str = "https://test-streams.mux.dev/x36xhzz/x36xhzz.m3u8";

#[derive(Parser, Debug, Default)]
#[command(
    name = "streamplay",
    about = "Play a network stream with gstreamer playbin and report what the pipeline does.",
    version
)]
pub struct Args {
    #[arg(value_name = "URI", help = "Stream URI or local file to play")]
    pub uri: Option<String>,

    #[arg(long, conflicts_with = "uri", help = "Play the built-in HLS test stream")]
    pub hls: bool,

    #[arg(long, help = "Quit once the stream reaches its end")]
    pub quit_on_eos: bool,

    #[arg(
        short = 'l',
        long,
        value_name = "SPEC",
        help = "Log level specification, e.g. debug or info,streamplay=trace"
    )]
    pub log_level: Option<String>,

    #[arg(long, value_name = "DIR", help = "Directory for rotated log files")]
    pub log_dir: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Configuration file [default: ~/.config/streamplay/config.toml]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub uri: Option<String>,
    pub quit_on_eos: Option<bool>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl FileConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, App> {
        let content = fs::read_to_string(path)
            .map_err(|e| App::Io(format!("{}: {e}", path.display())))?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Config {
    pub uri: String,
    pub quit_on_eos: bool,
    pub log_level: Option<String>,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn load(args: Args) -> Result<Self, App> {
        let home = PathBuf::from(env::var("HOME")?);

        let file = match &args.config {
            Some(path) => FileConfig::load_from_file(path)?,
            None => {
                let path = home.join(".config/streamplay/config.toml");
                if path.exists() {
                    FileConfig::load_from_file(&path)?
                } else {
                    FileConfig::default()
                }
            }
        };

        Self::resolve(args, file, &home)
    }

    /// Merges command line and file settings; the command line wins.
    fn resolve(args: Args, file: FileConfig, home: &Path) -> Result<Self, App> {
        let uri = if args.hls {
            HLS_TEST_STREAM.to_string()
        } else {
            match args.uri.or(file.uri) {
                Some(uri) => to_uri(&uri)?,
                None => DASH_TEST_STREAM.to_string(),
            }
        };

        Ok(Self {
            uri,
            quit_on_eos: args.quit_on_eos || file.quit_on_eos.unwrap_or(false),
            log_level: args.log_level.or(file.log_level),
            log_dir: args
                .log_dir
                .or(file.log_dir)
                .unwrap_or_else(|| home.join(".cache/streamplay/logs")),
        })
    }
}

/// Leaves URIs alone and turns file paths into `file://` URIs.
fn to_uri(input: &str) -> Result<String, App> {
    if input.contains("://") {
        return Ok(input.to_string());
    }
    let path = fs::canonicalize(input).map_err(|e| App::InvalidUri(format!("{input}: {e}")))?;
    glib::filename_to_uri(&path, None)
        .map(|uri| uri.to_string())
        .map_err(|e| App::InvalidUri(format!("{input}: {}", e.message())))
}
