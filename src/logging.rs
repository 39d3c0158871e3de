use crate::config::LoggingConfig;
use crate::consts;
use anyhow::Context;
use fs_err::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Send log events to the configured log file.  The game owns the terminal,
/// so nothing is ever logged to stdout or stderr.
///
/// Does nothing if logging is disabled or no log file path can be
/// determined.
pub(crate) fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    if !config.enabled {
        return Ok(());
    }
    let Some(path) = config.log_file() else {
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).context("failed to create log directory")?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .context("failed to open log file")?;
    let filter = build_filter(std::env::var(consts::LOG_ENV_VAR).ok(), &config.level)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
}

/// Build the event filter, preferring the environment variable's directives
/// over the configured level
fn build_filter(env: Option<String>, level: &str) -> anyhow::Result<EnvFilter> {
    let directives = env.filter(|s| !s.trim().is_empty());
    let directives = directives.as_deref().unwrap_or(level);
    EnvFilter::try_new(directives)
        .with_context(|| format!("invalid log filter {directives:?}"))
}
