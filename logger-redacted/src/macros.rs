// Logging macros that pass a request input through an `InputRedactor`

#[macro_export]
macro_rules! redacted_info {
    ($redactor:expr, $input:expr, $($arg:tt)+) => {
        tracing::info!(input = %$redactor.redact($input), $($arg)+)
    };
}

#[macro_export]
macro_rules! redacted_debug {
    ($redactor:expr, $input:expr, $($arg:tt)+) => {
        tracing::debug!(input = %$redactor.redact($input), $($arg)+)
    };
}
