use crate::controller::CONTROLLER_ATTRIBUTE;
use crate::error::Error;
use crate::request::Request;
use minijinja::Environment;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

/// Layout used when none is set explicitly.
pub const DEFAULT_LAYOUT: &str = "layouts/default.html";

static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("Failed to compile camel regex"));
static ACRONYM_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("Failed to compile acronym regex"));

/// Renders templates from a template root directory.
///
/// Template names are file paths relative to the root, extension included
/// (e.g. `Pages/home.html`). The data bag is write-once per key: setting an
/// already-set key fails with [`Error::DuplicateKey`].
#[derive(Debug)]
pub struct View {
    template_root: PathBuf,
    layout: Option<String>,
    request: Option<Request>,
    data: Map<String, Value>,
}

impl View {
    /// Creates a view over `template_root` with the default layout.
    ///
    /// Fails with [`Error::Configuration`] if the directory does not exist.
    pub fn new(template_root: impl Into<PathBuf>) -> Result<Self, Error> {
        let template_root = template_root.into();
        if !template_root.is_dir() {
            return Err(Error::configuration(format!(
                "template path `{}` does not exist",
                template_root.display()
            )));
        }

        Ok(View {
            template_root,
            layout: Some(DEFAULT_LAYOUT.to_string()),
            request: None,
            data: Map::new(),
        })
    }

    /// Replaces the layout (`None` disables layout wrapping); chainable.
    pub fn set_layout(&mut self, layout: Option<impl Into<String>>) -> &mut Self {
        self.layout = layout.map(Into::into);
        self
    }

    /// Stores the request used for template auto-detection; chainable.
    pub fn set_request(&mut self, request: Request) -> &mut Self {
        self.request = Some(request);
        self
    }

    /// The current layout, if any.
    pub fn layout(&self) -> Option<&str> {
        self.layout.as_deref()
    }

    /// The current data bag.
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Inserts entries into the data bag, left to right.
    ///
    /// A key that already exists fails with [`Error::DuplicateKey`]; entries
    /// inserted before the duplicate remain applied.
    pub fn set<I>(&mut self, data: I) -> Result<&mut Self, Error>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        for (key, value) in data {
            if self.data.contains_key(&key) {
                return Err(Error::DuplicateKey { key });
            }
            self.data.insert(key, value);
        }
        Ok(self)
    }

    /// Renders a template, wrapping it in the layout when one is set.
    ///
    /// With `template = None` the template name is auto-detected from the
    /// injected request's `_controller` attribute. The layout template
    /// receives the data bag plus the rendered inner content under the
    /// reserved `content` key.
    pub fn render(&self, template: Option<&str>) -> Result<String, Error> {
        let template = match template {
            Some(t) => t.to_string(),
            None => self.auto_detect_template()?,
        };

        let content = self.render_file(&template, &self.data)?;

        if let Some(layout) = &self.layout {
            let mut data = self.data.clone();
            data.insert("content".to_string(), Value::String(content));
            return self.render_file(layout, &data);
        }

        Ok(content)
    }

    /// Renders a single template file against `data`.
    pub(crate) fn render_file(
        &self,
        file: &str,
        data: &Map<String, Value>,
    ) -> Result<String, Error> {
        let path = self.template_root.join(file);
        if !path.is_file() {
            return Err(Error::TemplateNotFound {
                path: path.display().to_string(),
            });
        }

        let source = fs::read_to_string(&path).map_err(|e| Error::TemplateRender {
            template: file.to_string(),
            message: e.to_string(),
        })?;

        let mut env = Environment::new();
        env.add_template("tpl", &source)
            .map_err(|e| Error::TemplateRender {
                template: file.to_string(),
                message: e.to_string(),
            })?;
        let tmpl = env.get_template("tpl").map_err(|e| Error::TemplateRender {
            template: file.to_string(),
            message: e.to_string(),
        })?;

        tmpl.render(Value::Object(data.clone()))
            .map_err(|e| Error::TemplateRender {
                template: file.to_string(),
                message: e.to_string(),
            })
    }

    /// Derives the template name from the request's controller reference.
    ///
    /// `App\Controller\AdminController` + `dashboard` becomes
    /// `Admin/dashboard.html`. The controller reference may be a
    /// `Controller::action` string or a two-element `[controller, action]`
    /// array, as set by the dispatcher.
    pub(crate) fn auto_detect_template(&self) -> Result<String, Error> {
        let request = self.request.as_ref().ok_or(Error::MissingRequest)?;
        let reference = request
            .attribute(CONTROLLER_ATTRIBUTE)
            .ok_or(Error::MissingControllerInfo)?;

        let (controller, action) = match reference {
            Value::String(s) => {
                let (controller, action) =
                    s.split_once("::")
                        .ok_or_else(|| Error::InvalidControllerShape {
                            value: s.clone(),
                        })?;
                (controller.to_string(), action.to_string())
            }
            Value::Array(items) if items.len() == 2 => {
                let controller =
                    items[0]
                        .as_str()
                        .ok_or_else(|| Error::InvalidControllerShape {
                            value: items[0].to_string(),
                        })?;
                let action = items[1].as_str().ok_or_else(|| Error::InvalidMethod {
                    value: items[1].to_string(),
                })?;
                (controller.to_string(), action.to_string())
            }
            other => {
                return Err(Error::InvalidControllerShape {
                    value: other.to_string(),
                })
            }
        };

        // Keep only the last path segment, then drop the `Controller` marker.
        let name = controller.replace('\\', "/");
        let name = name.rsplit('/').next().unwrap_or(&name);
        let name = name.replace("Controller", "");

        Ok(format!("{}/{}.html", name, camel_to_snake(&action)))
    }
}

/// Converts a `camelCase` string to `snake_case`.
///
/// Two passes: a boundary between a lowercase-or-digit and an uppercase
/// letter, then a boundary between an acronym run and a following
/// capitalized word (`convertPDFToImage` → `convert_pdf_to_image`).
pub fn camel_to_snake(input: &str) -> String {
    let result = CAMEL_BOUNDARY.replace_all(input, "${1}_${2}");
    let result = ACRONYM_BOUNDARY.replace_all(&result, "${1}_${2}");
    result.to_lowercase()
}
