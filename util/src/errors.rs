//! Helpers for error handling

/// Expands a given error type to wrap a stringified version of a given error
///
/// To be used in a map_err() call
#[macro_export]
macro_rules! err_str {
    ($x:expr) => {
        |e| $x(e.to_string())
    };
}

/// Stringifies an error into a formatted message
///
/// To be used in a map_err() call where the target error type is a raw
/// `String`
#[macro_export]
macro_rules! raw_err_str {
    ($msg:expr) => {
        |e| format!($msg, e)
    };
}
