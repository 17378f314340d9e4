//! Application runtime: the request dispatcher.
//!
//! [`Application`] owns the compiled route table, the controller registry
//! and the error renderer. [`Application::handle`] runs the full request
//! lifecycle — match the route, resolve and invoke the controller action,
//! fall back to implicit view rendering — and always returns a
//! [`Response`]: every fault is folded into the error renderer at this
//! single boundary.
//!
//! The application is an explicitly constructed, explicitly passed context
//! object. For hosts that demand a single global entry point there is a thin
//! singleton wrapper: [`Application::init`] (idempotent, first call wins) and
//! [`Application::instance`].

use crate::controller::{controller_reference, ControllerRegistry, CONTROLLER_ATTRIBUTE};
use crate::error::{ConsoleLogger, Error, ErrorRenderer};
use crate::request::Request;
use crate::response::Response;
use crate::router::{load_routes, RouteDef, Router};
use crate::view::View;
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

static INSTANCE: OnceCell<Application> = OnceCell::new();

/// The application runtime.
///
/// Read-only after construction; per-request controller/view instances are
/// freshly created on every [`Application::handle`] call and never shared.
pub struct Application {
    router: Router,
    registry: ControllerRegistry,
    template_root: PathBuf,
    error_renderer: ErrorRenderer,
    attach_session: bool,
}

impl Application {
    /// Creates an application from an in-memory route table.
    ///
    /// Fails with [`Error::Configuration`] if `template_root` is not an
    /// existing directory. Without an explicit error renderer, a default one
    /// with a [`ConsoleLogger`] is used.
    pub fn new(
        routes: Vec<RouteDef>,
        registry: ControllerRegistry,
        template_root: impl Into<PathBuf>,
        error_renderer: Option<ErrorRenderer>,
    ) -> Result<Self, Error> {
        let template_root = template_root.into();
        if !template_root.is_dir() {
            return Err(Error::configuration(format!(
                "template path `{}` does not exist",
                template_root.display()
            )));
        }

        let error_renderer = error_renderer.unwrap_or_else(|| {
            ErrorRenderer::new(&template_root).with_logger(ConsoleLogger::stderr())
        });

        Ok(Application {
            router: Router::new(routes),
            registry,
            template_root,
            error_renderer,
            attach_session: false,
        })
    }

    /// Creates an application loading the route table from a YAML file.
    pub fn from_routes_file(
        routes_file: impl AsRef<Path>,
        registry: ControllerRegistry,
        template_root: impl Into<PathBuf>,
        error_renderer: Option<ErrorRenderer>,
    ) -> Result<Self, Error> {
        let routes = load_routes(routes_file)?;
        Application::new(routes, registry, template_root, error_renderer)
    }

    /// Attaches an empty session to requests that carry none; chainable.
    pub fn with_session(mut self) -> Self {
        self.attach_session = true;
        self
    }

    /// The compiled route table.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// The controller registry.
    pub fn registry(&self) -> &ControllerRegistry {
        &self.registry
    }

    /// The template root directory.
    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    /// Handles one request and always returns a response.
    ///
    /// Any failure during dispatch is classified ([`Error::status_code`])
    /// and delegated to the error renderer; no fault propagates past this
    /// boundary.
    pub fn handle(&self, request: &mut Request) -> Response {
        if self.attach_session && request.session().is_none() {
            request.set_session(HashMap::new());
        }

        info!(method = %request.method, path = %request.path, "handling request");

        match self.dispatch(request) {
            Ok(response) => response,
            Err(fault) => self.error_renderer.render(fault.status_code(), Some(&fault)),
        }
    }

    fn dispatch(&self, request: &mut Request) -> Result<Response, Error> {
        let matched = self
            .router
            .route(&request.method, &request.path)
            .ok_or_else(|| Error::RouteNotFound {
                path: request.path.clone(),
            })?;

        // Merge route parameters into the request attributes and record the
        // controller reference for view auto-detection.
        for (key, value) in &matched.path_params {
            request.set_attribute(key.clone(), Value::String(value.clone()));
        }
        request.set_attribute(
            CONTROLLER_ATTRIBUTE,
            Value::String(format!(
                "{}::{}",
                matched.route.controller, matched.route.action
            )),
        );

        debug!(
            route = %matched.route.name,
            controller = %matched.route.controller,
            action = %matched.route.action,
            "route matched"
        );

        let (controller_name, action) = controller_reference(request)?;

        let view = View::new(&self.template_root)?;
        let mut controller = self.registry.build(&controller_name, view)?;
        controller.view_mut().set_request(request.clone());

        let response = controller.invoke(&action, request)?;

        match response {
            Some(response) => Ok(response),
            None => controller.render(),
        }
    }

    /// Initializes the process-wide application instance.
    ///
    /// Idempotent: the first call wins, later calls return the existing
    /// instance and drop their argument.
    pub fn init(app: Application) -> &'static Application {
        INSTANCE.get_or_init(|| app)
    }

    /// Returns the process-wide application instance.
    ///
    /// Fails with [`Error::NotInitialized`] if [`Application::init`] was
    /// never called.
    pub fn instance() -> Result<&'static Application, Error> {
        INSTANCE.get().ok_or(Error::NotInitialized)
    }
}

// The registry and the error renderer box closures, so Debug is written by
// hand and renders them opaquely.
impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("router", &self.router)
            .field("template_root", &self.template_root)
            .field("attach_session", &self.attach_session)
            .finish_non_exhaustive()
    }
}
