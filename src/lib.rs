//! # simplevc
//!
//! **simplevc** is a lightweight controller/view micro-framework: it matches
//! an incoming request against a declared route table, invokes the
//! corresponding controller action, and turns the result into an HTTP
//! response — rendering templates (with optional layout wrapping) when the
//! action does not produce a response directly, and a uniform error page
//! when anything fails.
//!
//! The crate is transport-agnostic: it never binds a socket or sends a
//! response. The hosting process builds a [`Request`], calls
//! [`Application::handle`] and writes the returned [`Response`] wherever it
//! wants.
//!
//! ## Architecture
//!
//! - **[`router`]** — YAML route table loading and regex-based path matching
//! - **[`controller`]** — the `Controller` capability and the typed registry
//! - **[`view`]** — minijinja template rendering with layouts and template
//!   auto-detection from the matched route
//! - **[`error`]** — error taxonomy, status classification and the error
//!   page renderer
//! - **[`app`]** — the dispatcher tying it all together
//! - **[`env`]** — environment variable access with value coercion
//! - **[`testing`]** — harness for exercising controller actions by route
//!   name
//!
//! ## Request lifecycle
//!
//! ```text
//! Request → route match → controller resolution → action invocation
//!         → direct Response | implicit view render
//!         → Response
//! any failure ───────────────→ ErrorRenderer → error page Response
//! ```
//!
//! Every [`Application::handle`] call returns exactly one [`Response`];
//! faults never escape the dispatch boundary.
//!
//! ## Quick start
//!
//! ```no_run
//! use simplevc::{Application, Controller, ControllerRegistry, Error};
//! use simplevc::{Request, Response};
//! use simplevc::view::View;
//! use serde_json::json;
//!
//! struct Pages { view: View }
//!
//! impl Controller for Pages {
//!     fn view(&self) -> &View { &self.view }
//!     fn view_mut(&mut self) -> &mut View { &mut self.view }
//!
//!     fn invoke(&mut self, action: &str, _request: &Request)
//!         -> Result<Option<Response>, Error>
//!     {
//!         match action {
//!             // no response returned: the dispatcher renders
//!             // `Pages/home.html` implicitly
//!             "home" => {
//!                 self.set([("title".to_string(), json!("Welcome"))])?;
//!                 Ok(None)
//!             }
//!             other => Err(Error::Internal(anyhow::anyhow!(
//!                 "unknown action `{other}`"
//!             ))),
//!         }
//!     }
//! }
//!
//! let mut registry = ControllerRegistry::new();
//! registry.register("Pages", |view| Box::new(Pages { view }));
//!
//! let app = Application::from_routes_file(
//!     "config/routes.yaml",
//!     registry,
//!     "templates",
//!     None,
//! ).expect("invalid configuration");
//!
//! let mut request = Request::get("/");
//! let response = app.handle(&mut request);
//! assert_eq!(response.status, 200);
//! ```

pub mod app;
pub mod controller;
pub mod env;
pub mod error;
pub mod request;
pub mod response;
pub mod router;
pub mod testing;
pub mod view;

pub use app::Application;
pub use controller::{Controller, ControllerRegistry, CONTROLLER_ATTRIBUTE};
pub use env::{debug_enabled, env_bool, env_value, EnvValue};
pub use error::{ConsoleLogger, Error, ErrorLogger, ErrorRenderer};
pub use request::Request;
pub use response::Response;
pub use router::{load_routes, RouteDef, RouteMatch, Router};
pub use view::{ErrorView, View};
