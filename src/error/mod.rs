//! Error taxonomy and error-page rendering.
//!
//! Everything that can go wrong during dispatch is an [`Error`]. Faults are
//! classified into HTTP status codes by [`Error::status_code`] and folded
//! into a single [`ErrorRenderer::render`] call at the dispatch boundary, so
//! callers of [`crate::app::Application::handle`] always receive a
//! [`crate::response::Response`], never a propagated fault.

mod console;
mod renderer;

pub use console::ConsoleLogger;
pub use renderer::{ErrorLogger, ErrorRenderer};

use std::fmt;

/// Framework error.
///
/// Construction-time variants (`Configuration`) surface to the constructor's
/// caller and are never mapped to an HTTP response. Everything else is
/// caught at the dispatch boundary and turned into an error page.
#[derive(Debug)]
pub enum Error {
    /// Bad construction-time input: missing template root, invalid routes
    /// file, and similar.
    Configuration {
        /// Description of the invalid input.
        message: String,
    },
    /// No route matched the request path.
    RouteNotFound {
        /// The path that failed to match.
        path: String,
    },
    /// The `_controller` attribute was absent or named an unregistered
    /// controller.
    ControllerNotFound {
        /// Description of what could not be resolved.
        message: String,
    },
    /// The `_controller` attribute was neither a `Controller::action` string
    /// nor a two-element `[controller, action]` array.
    InvalidControllerShape {
        /// The offending attribute value, rendered for diagnostics.
        value: String,
    },
    /// The action element of the controller reference was not a string.
    InvalidMethod {
        /// The offending value, rendered for diagnostics.
        value: String,
    },
    /// A data-bag key was set twice.
    DuplicateKey {
        /// The duplicated key.
        key: String,
    },
    /// `render(None)` was called before a request was injected.
    MissingRequest,
    /// The injected request carries no `_controller` attribute, so the
    /// template name cannot be auto-detected.
    MissingControllerInfo,
    /// The resolved template file does not exist.
    TemplateNotFound {
        /// Path of the missing file.
        path: String,
    },
    /// The template engine failed to render the template.
    TemplateRender {
        /// Template name.
        template: String,
        /// Engine error message.
        message: String,
    },
    /// An error carrying an explicit HTTP status, raised by application code.
    Http {
        /// The status code to respond with.
        status: u16,
        /// Human-readable message.
        message: String,
    },
    /// `Application::instance()` was called before `Application::init()`.
    NotInitialized,
    /// Any other application-level fault.
    Internal(anyhow::Error),
}

impl Error {
    /// Shorthand for a [`Error::Configuration`] error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Shorthand for an [`Error::Http`] error with an explicit status.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Error::Http {
            status,
            message: message.into(),
        }
    }

    /// Classifies this error into an HTTP status code.
    ///
    /// `RouteNotFound` maps to 404, `Http` carries its own status, every
    /// other runtime fault is a 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::RouteNotFound { .. } => 404,
            Error::Http { status, .. } => *status,
            _ => 500,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration { message } => write!(f, "configuration error: {message}"),
            Error::RouteNotFound { path } => write!(f, "no route found for `{path}`"),
            Error::ControllerNotFound { message } => {
                write!(f, "controller could not be resolved: {message}")
            }
            Error::InvalidControllerShape { value } => write!(
                f,
                "invalid controller reference `{value}`; expected `Controller::action` or [controller, action]"
            ),
            Error::InvalidMethod { value } => {
                write!(f, "controller action must be a string, got `{value}`")
            }
            Error::DuplicateKey { key } => write!(f, "data key `{key}` already exists"),
            Error::MissingRequest => write!(
                f,
                "request not set; call `set_request()` before `render()`"
            ),
            Error::MissingControllerInfo => {
                write!(f, "`_controller` attribute not found in the request")
            }
            Error::TemplateNotFound { path } => write!(f, "template file `{path}` not found"),
            Error::TemplateRender { template, message } => {
                write!(f, "template `{template}` failed to render: {message}")
            }
            Error::Http { status, message } => write!(f, "HTTP {status}: {message}"),
            Error::NotInitialized => {
                write!(f, "application not initialized; call `Application::init()` first")
            }
            Error::Internal(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Internal(err) => err.source(),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal(err)
    }
}
