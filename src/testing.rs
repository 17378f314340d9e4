//! Test harness for exercising controller actions by route name.
//!
//! [`ActionRunner`] simulates what the dispatcher does for one route without
//! going through path matching: it looks the route up by name, substitutes
//! URL-encoded route parameters into the path pattern, builds a [`Request`]
//! with the controller reference attribute set, constructs the controller
//! from the registry and invokes the action, capturing the resulting
//! [`Response`] for assertions.

use crate::app::Application;
use crate::controller::CONTROLLER_ATTRIBUTE;
use crate::error::Error;
use crate::request::Request;
use crate::response::Response;
use crate::view::View;
use http::Method;
use serde_json::{json, Value};
use std::collections::HashMap;

/// Options for a simulated action execution.
#[derive(Debug)]
pub struct ActionOptions {
    /// HTTP method to simulate.
    pub method: Method,
    /// Request parameters (query params for GET, form params otherwise).
    pub params: HashMap<String, String>,
    /// Route placeholder values, e.g. `id` for `/users/{id}`.
    pub route_params: HashMap<String, Value>,
    /// Extra headers.
    pub headers: HashMap<String, String>,
    /// Raw request body.
    pub body: Option<String>,
}

impl Default for ActionOptions {
    fn default() -> Self {
        ActionOptions {
            method: Method::GET,
            params: HashMap::new(),
            route_params: HashMap::new(),
            headers: HashMap::new(),
            body: None,
        }
    }
}

/// Executes controller actions for named routes of an [`Application`].
pub struct ActionRunner<'a> {
    app: &'a Application,
}

impl<'a> ActionRunner<'a> {
    /// Creates a runner over `app`.
    pub fn new(app: &'a Application) -> Self {
        ActionRunner { app }
    }

    /// Executes the action behind `route_name` with default options.
    pub fn execute(&self, route_name: &str) -> Result<Response, Error> {
        self.execute_with(route_name, ActionOptions::default())
    }

    /// Executes the action behind `route_name`.
    ///
    /// An unknown route name fails with an error listing the available
    /// routes. The captured response is the action's direct response when it
    /// returns one, the implicitly rendered view otherwise.
    pub fn execute_with(
        &self,
        route_name: &str,
        options: ActionOptions,
    ) -> Result<Response, Error> {
        let route = self
            .app
            .router()
            .route_by_name(route_name)
            .ok_or_else(|| {
                let available = self.app.router().route_names().join("`, `");
                Error::Internal(anyhow::anyhow!(
                    "route `{route_name}` not found; available routes: `{available}`"
                ))
            })?
            .clone();

        // Substitute URL-encoded placeholder values into the path pattern.
        let mut path = route.path.clone();
        for (key, value) in &options.route_params {
            let raw = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            path = path.replace(
                &format!("{{{key}}}"),
                &urlencoding::encode(&raw).into_owned(),
            );
        }

        let mut request = Request::new(options.method.clone(), &path);
        if options.method == Method::GET {
            request.query_params.extend(options.params);
        } else {
            request.form_params.extend(options.params);
        }
        for (name, value) in &options.headers {
            request
                .headers
                .insert(name.to_ascii_lowercase(), value.clone());
        }
        request.body = options.body;

        for (key, value) in options.route_params {
            request.set_attribute(key, value);
        }
        request.set_attribute(
            CONTROLLER_ATTRIBUTE,
            json!([route.controller, route.action]),
        );

        let view = View::new(self.app.template_root())?;
        let mut controller = self.app.registry().build(&route.controller, view)?;
        controller.view_mut().set_request(request.clone());

        match controller.invoke(&route.action, &request)? {
            Some(response) => Ok(response),
            None => controller.render(),
        }
    }
}
