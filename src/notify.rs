//! Short operator notices, the console's stand-in for toast popups.

/// Reports a completed mutation.
pub fn success(message: &str) {
    tracing::info!("{message}");
    println!("✔ {message}");
}

/// Reports a failed request. The notice shows only the outermost context;
/// the log event carries the whole error chain.
pub fn failure(error: &anyhow::Error) {
    tracing::error!(error = ?error, "{error}");
    eprintln!("✖ {error}");
}

/// Reports an action the operator abandoned.
pub fn cancelled(message: &str) {
    tracing::debug!("{message}");
    println!("{message}");
}
