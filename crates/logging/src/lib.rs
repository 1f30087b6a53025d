#![warn(missing_docs)]

//! Shared logging CLI arguments and tracing filter helpers for the damagechat
//! workspace.

use std::env;

use clap::Args;
use tracing_subscriber::EnvFilter;

/// Logging controls for CLI apps.
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Set global log level to trace (our crates only)
    #[arg(long, conflicts_with_all = ["debug", "log_level", "log_filter"])]
    pub trace: bool,

    /// Set global log level to debug (our crates only)
    #[arg(long, conflicts_with_all = ["trace", "log_level", "log_filter"])]
    pub debug: bool,

    /// Set a single global log level for our crates (error|warn|info|debug|trace)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Set an explicit tracing filter directive (overrides other flags)
    /// e.g. "win_hotkey=trace,relaykey=debug"
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl LogArgs {
    /// The filter spec these arguments select, consulting `RUST_LOG`.
    pub fn spec(&self) -> String {
        compute_spec(
            self.trace,
            self.debug,
            self.log_level.as_deref(),
            self.log_filter.as_deref(),
        )
    }
}

/// List of crate targets that constitute "our" logs.
pub fn our_crates() -> &'static [&'static str] {
    &[
        // App
        "damagechat",
        // Windows integration crates
        "win_hotkey",
        "win_keycode",
        // Utilities
        "relaykey",
        "eventtag",
        "config",
        "logging",
    ]
}

/// Build a filter directive string that sets the same `level` for all of our crates.
pub fn level_spec_for(level: &str) -> String {
    let lvl = level.to_ascii_lowercase();
    our_crates()
        .iter()
        .map(|t| format!("{}={}", t, lvl))
        .collect::<Vec<_>>()
        .join(",")
}

/// Compute the final filter spec string with precedence:
/// - `log_filter`
/// - `trace`/`debug`/`log_level` (crate-scoped)
/// - `RUST_LOG` env
/// - default to crate-scoped `info`
pub fn compute_spec(
    trace: bool,
    debug: bool,
    log_level: Option<&str>,
    log_filter: Option<&str>,
) -> String {
    spec_with_env(
        trace,
        debug,
        log_level,
        log_filter,
        env::var("RUST_LOG").ok(),
    )
}

/// `compute_spec` with the environment supplied by the caller.
fn spec_with_env(
    trace: bool,
    debug: bool,
    log_level: Option<&str>,
    log_filter: Option<&str>,
    rust_log: Option<String>,
) -> String {
    if let Some(spec) = log_filter {
        return spec.to_string();
    }
    if trace {
        return level_spec_for("trace");
    }
    if debug {
        return level_spec_for("debug");
    }
    if let Some(lvl) = log_level {
        return level_spec_for(lvl);
    }
    match rust_log {
        Some(spec) if !spec.trim().is_empty() => spec,
        _ => level_spec_for("info"),
    }
}

/// Create an `EnvFilter` from a spec string.
pub fn env_filter_from_spec(spec: &str) -> EnvFilter {
    EnvFilter::new(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_spec_covers_our_crates() {
        let spec = level_spec_for("DEBUG");
        assert!(spec.starts_with("damagechat=debug,"));
        assert!(spec.contains("win_hotkey=debug"));
        assert_eq!(spec.split(',').count(), our_crates().len());
    }

    #[test]
    fn precedence() {
        let env = || Some("relaykey=trace".to_string());
        assert_eq!(
            spec_with_env(true, false, Some("warn"), Some("x=info"), env()),
            "x=info"
        );
        assert_eq!(
            spec_with_env(true, false, None, None, env()),
            level_spec_for("trace")
        );
        assert_eq!(
            spec_with_env(false, true, Some("warn"), None, env()),
            level_spec_for("debug")
        );
        assert_eq!(
            spec_with_env(false, false, Some("warn"), None, env()),
            level_spec_for("warn")
        );
        assert_eq!(spec_with_env(false, false, None, None, env()), "relaykey=trace");
        assert_eq!(
            spec_with_env(false, false, None, None, None),
            level_spec_for("info")
        );
    }

    #[test]
    fn filter_builds() {
        let f = env_filter_from_spec(&level_spec_for("info"));
        assert!(f.to_string().contains("damagechat=info"));
    }
}
