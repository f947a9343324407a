use flexi_logger::FlexiLoggerError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum App {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Environment variable error: {0}")]
    EnvVar(String),

    #[error("TOML parsing error: {0}")]
    TomlParsing(String),

    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    #[error("Logger initialization error: {0}")]
    Logger(String),

    #[error("GStreamer initialization error: {0}")]
    Init(String),

    #[error("GStreamer element error: {0}")]
    Element(String),

    #[error("GStreamer bus error: {0}")]
    Bus(String),

    #[error("GStreamer state error: {0}")]
    State(String),
}

impl App {
    /// The failure text without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            App::Io(message)
            | App::EnvVar(message)
            | App::TomlParsing(message)
            | App::InvalidUri(message)
            | App::Logger(message)
            | App::Init(message)
            | App::Element(message)
            | App::Bus(message)
            | App::State(message) => message,
        }
    }
}

impl From<io::Error> for App {
    fn from(error: io::Error) -> Self {
        App::Io(error.to_string())
    }
}

impl From<std::env::VarError> for App {
    fn from(error: std::env::VarError) -> Self {
        App::EnvVar(error.to_string())
    }
}

impl From<toml::de::Error> for App {
    fn from(error: toml::de::Error) -> Self {
        App::TomlParsing(error.to_string())
    }
}

impl From<FlexiLoggerError> for App {
    fn from(error: FlexiLoggerError) -> Self {
        App::Logger(error.to_string())
    }
}

impl From<glib::Error> for App {
    fn from(error: glib::Error) -> Self {
        App::Init(error.message().to_string())
    }
}
