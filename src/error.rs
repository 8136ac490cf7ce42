use thiserror::Error;

/// Failures surfaced to the host compiler for a single compilation unit.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A component was rewritten but no handler module was configured.
    #[error("[babel-plugin-transform-react-ssr-try-catch] You must define \"errorHandler\" property")]
    MissingErrorHandler,
}
