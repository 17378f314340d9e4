use super::View;
use crate::env::debug_enabled;
use crate::error::Error;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Layout used for error pages.
pub const ERROR_LAYOUT: &str = "layouts/error.html";

const CLIENT_ERROR_TEMPLATE: &str = "errors/400.html";
const SERVER_ERROR_TEMPLATE: &str = "errors/500.html";

/// Specialized view for rendering error pages.
///
/// Uses the dedicated error layout and picks the client- or server-error
/// template from the status code. Exception details are included only when
/// debug mode is enabled.
#[derive(Debug)]
pub struct ErrorView {
    view: View,
}

impl ErrorView {
    /// Creates an error view over `template_root`.
    pub fn new(template_root: impl Into<PathBuf>) -> Result<Self, Error> {
        let mut view = View::new(template_root)?;
        view.set_layout(Some(ERROR_LAYOUT));
        Ok(ErrorView { view })
    }

    /// Replaces the layout (`None` disables layout wrapping); chainable.
    pub fn set_layout(&mut self, layout: Option<impl Into<String>>) -> &mut Self {
        self.view.set_layout(layout);
        self
    }

    /// The current layout, if any.
    pub fn layout(&self) -> Option<&str> {
        self.view.layout()
    }

    /// Picks the error template for a status code: the client-error
    /// template below 500, the server-error template from 500 up.
    pub fn determine_template(status_code: u16) -> &'static str {
        if status_code < 500 {
            CLIENT_ERROR_TEMPLATE
        } else {
            SERVER_ERROR_TEMPLATE
        }
    }

    /// Renders an error page for `status_code`.
    ///
    /// The template receives `status_code`, plus `exception` (the error's
    /// display string) when debug mode is enabled and an error is present.
    /// The result is wrapped in the error layout the same way
    /// [`View::render`] wraps content.
    pub fn render_error(
        &self,
        status_code: u16,
        error: Option<&Error>,
    ) -> Result<String, Error> {
        let template = Self::determine_template(status_code);

        let mut data = Map::new();
        data.insert("status_code".to_string(), Value::from(status_code));

        if debug_enabled() {
            if let Some(error) = error {
                data.insert("exception".to_string(), Value::String(error.to_string()));
            }
        }

        let content = self.view.render_file(template, &data)?;

        if let Some(layout) = self.view.layout() {
            let layout = layout.to_string();
            data.insert("content".to_string(), Value::String(content));
            return self.view.render_file(&layout, &data);
        }

        Ok(content)
    }
}
