#![forbid(unsafe_code)]

//! Log output setup.
//!
//! Every crate in the workspace emits `tracing` events. With the
//! `tracing-json` feature, [`init_json`] installs a global subscriber that
//! writes them as JSON lines to stderr.

/// Environment variable holding filter directives (`emojikit_detect=debug`).
pub const ENV_LOG: &str = "EMOJIKIT_LOG";

/// Filter used when neither `EMOJIKIT_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_DIRECTIVES: &str = "info";

/// Filter directives from `EMOJIKIT_LOG`, then `RUST_LOG`, then [`DEFAULT_DIRECTIVES`].
#[must_use]
pub fn directives_with<F>(get_env: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    [ENV_LOG, "RUST_LOG"]
        .into_iter()
        .filter_map(|key| get_env(key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_string())
}

/// Install a JSON-lines subscriber filtered by [`directives_with`].
///
/// Fails if a global subscriber is already set.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let directives = directives_with(|key| std::env::var(key).ok());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("emojikit: invalid log filter {directives:?} ({e}), using {DEFAULT_DIRECTIVES}");
        EnvFilter::new(DEFAULT_DIRECTIVES)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .try_init()
}
