use super::Error;
use crate::response::{status_reason, Response};
use crate::view::ErrorView;
use std::path::PathBuf;
use tracing::error;

/// Capability for receiving structured error records.
///
/// Implementations must be best-effort: a logger failure must never prevent
/// the error [`Response`] from being returned.
pub trait ErrorLogger: Send + Sync {
    /// Receives one error record.
    fn log(&self, message: &str, error: Option<&Error>, status_code: u16);
}

/// Converts a status code and optional fault into the final error response.
///
/// Stateless apart from the template root and an optional logger. Sink
/// policy: every render emits an unconditional structured `tracing` event;
/// the attached logger (the default [`super::ConsoleLogger`]) is additionally
/// notified when a fault is present.
pub struct ErrorRenderer {
    template_root: PathBuf,
    logger: Option<Box<dyn ErrorLogger>>,
}

impl ErrorRenderer {
    /// Creates a renderer over `template_root`, without a logger.
    pub fn new(template_root: impl Into<PathBuf>) -> Self {
        ErrorRenderer {
            template_root: template_root.into(),
            logger: None,
        }
    }

    /// Attaches a logger; chainable.
    pub fn with_logger(mut self, logger: impl ErrorLogger + 'static) -> Self {
        self.logger = Some(Box::new(logger));
        self
    }

    /// Renders the error page for `status_code` and returns the response.
    ///
    /// Never fails: if the error templates themselves cannot be rendered,
    /// the body falls back to the plain status line.
    pub fn render(&self, status_code: u16, fault: Option<&Error>) -> Response {
        if let (Some(logger), Some(fault)) = (&self.logger, fault) {
            logger.log(&fault.to_string(), Some(fault), status_code);
        }

        match fault {
            Some(fault) => error!(status_code, fault = %fault, "request failed"),
            None => error!(status_code, "request failed"),
        }

        let body = ErrorView::new(&self.template_root)
            .and_then(|view| view.render_error(status_code, fault))
            .unwrap_or_else(|render_err| {
                error!(error = %render_err, "error page rendering failed, falling back to status line");
                format!("{status_code} {}", status_reason(status_code))
            });

        Response::new(body, status_code)
    }
}
