use thiserror::Error;

/// Rejections raised by the window manager.
///
/// Only structurally invalid calls end up here. An operation that targets
/// a window which has since been closed is not an error; it resolves to a
/// no-op result instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WmError {
    #[error("window id must not be empty")]
    EmptyId,
    #[error("no app registered for id '{0}'")]
    UnknownApp(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid desktop config: {0}")]
    Parse(#[from] toml::de::Error),
}
