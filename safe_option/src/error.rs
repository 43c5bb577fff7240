use std::backtrace::{Backtrace, BacktraceStatus};

use thiserror::Error;

/// Error raised when unwrapping a `None` value.
///
/// [`is_user_message`][Self::is_user_message] tells error-reporting layers
/// whether the text was supplied by the caller (`expect`/`try_expect`) or is
/// the library's own diagnostic (`unwrap`/`try_unwrap`), i.e. whether it is
/// safe to show to an end user.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct UnwrapOnNoneError {
    message: String,
    user_message: bool,
}

impl UnwrapOnNoneError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            user_message: true,
        }
    }

    pub(crate) fn internal(message: &str) -> Self {
        Self {
            message: message.to_owned(),
            user_message: false,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_user_message(&self) -> bool {
        self.user_message
    }
}

/// Shared failure path of `unwrap` and `expect`. Panics with the error
/// itself as payload so callers can downcast it.
pub(crate) fn unwrap_failed(error: UnwrapOnNoneError) -> ! {
    tracing::error!("{}", error);

    // if SAFE_OPTION_SHOW_BACKTRACE set to anything other than 0 or false
    if std::env::var_os("SAFE_OPTION_SHOW_BACKTRACE").map_or(false, |s| s != "0" && s != "false") {
        let bt = Backtrace::force_capture();
        if bt.status() == BacktraceStatus::Captured {
            eprintln!("{}", bt);
        }
    }

    std::panic::panic_any(error)
}

#[cfg(test)]
mod tests {
    use super::UnwrapOnNoneError;
    use crate::SOption;
    use std::panic::{self, AssertUnwindSafe};

    #[test]
    fn expect_carries_the_caller_message() {
        let result =
            panic::catch_unwind(AssertUnwindSafe(|| SOption::<i32>::none().expect("no config")));
        let error = result.unwrap_err().downcast::<UnwrapOnNoneError>().unwrap();

        assert!(error.is_user_message());
        assert_eq!(error.message(), "no config");
        assert_eq!(error.to_string(), "no config");
    }

    #[test]
    fn unwrap_uses_the_internal_diagnostic() {
        let result = panic::catch_unwind(AssertUnwindSafe(|| SOption::<i32>::none().unwrap()));
        let error = result.unwrap_err().downcast::<UnwrapOnNoneError>().unwrap();

        assert!(!error.is_user_message());
        assert_eq!(error.message(), "called `unwrap()` on a `None` value");
    }

    #[test]
    fn try_doors_return_the_error_value() {
        assert_eq!(SOption::some(3).try_unwrap().unwrap(), 3);

        let error = SOption::<i32>::none().try_unwrap().unwrap_err();
        assert!(!error.is_user_message());

        let error = SOption::<i32>::none().try_expect("missing row").unwrap_err();
        assert!(error.is_user_message());
        assert_eq!(error.message(), "missing row");
    }
}
