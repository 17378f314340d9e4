//! Controller capability and the controller registry.
//!
//! A controller is request-scoped: the dispatcher builds one per `handle()`
//! call, hands it a freshly constructed [`View`] and invokes the action
//! named by the matched route. Action dispatch is fully typed: controllers
//! are registered as factories and actions are resolved inside
//! [`Controller::invoke`], so there is no runtime type checking of resolved
//! callables.

use crate::error::Error;
use crate::request::Request;
use crate::response::Response;
use crate::view::View;
use serde_json::Value;
use std::collections::HashMap;

/// Request attribute carrying the controller reference.
///
/// Set by the dispatcher after route matching, either as a
/// `Controller::action` string or as a two-element `[controller, action]`
/// array.
pub const CONTROLLER_ATTRIBUTE: &str = "_controller";

/// A request-scoped controller owning exactly one [`View`].
///
/// `invoke` dispatches an action by name; returning `Ok(None)` signals
/// implicit rendering, in which case the dispatcher calls [`Controller::render`].
/// Unknown action names should be reported as errors.
pub trait Controller {
    /// The owned view.
    fn view(&self) -> &View;

    /// The owned view, mutably.
    fn view_mut(&mut self) -> &mut View;

    /// Dispatches the named action.
    ///
    /// `Some(response)` is used verbatim by the dispatcher; `None` triggers
    /// an implicit [`Controller::render`].
    fn invoke(&mut self, action: &str, request: &Request) -> Result<Option<Response>, Error>;

    /// Inserts data into the view's data bag.
    fn set<I>(&mut self, data: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (String, Value)>,
        Self: Sized,
    {
        self.view_mut().set(data).map(|_| ())
    }

    /// Renders the view and wraps the output in a 200 response.
    fn render(&mut self) -> Result<Response, Error> {
        Ok(Response::new(self.view().render(None)?, 200))
    }
}

/// Factory producing a controller from its freshly built view.
pub type ControllerFactory = Box<dyn Fn(View) -> Box<dyn Controller> + Send + Sync>;

/// Maps controller identifiers to factories.
///
/// Resolved at application construction time; read-only during dispatch.
#[derive(Default)]
pub struct ControllerRegistry {
    factories: HashMap<String, ControllerFactory>,
}

impl ControllerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        ControllerRegistry {
            factories: HashMap::new(),
        }
    }

    /// Registers a controller factory under `name`.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(View) -> Box<dyn Controller> + Send + Sync + 'static,
    {
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    /// Whether a controller is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Builds the named controller around `view`.
    pub fn build(&self, name: &str, view: View) -> Result<Box<dyn Controller>, Error> {
        let factory = self.factories.get(name).ok_or_else(|| {
            Error::ControllerNotFound {
                message: format!("no controller registered under `{name}`"),
            }
        })?;
        Ok(factory(view))
    }
}

/// Extracts the `(controller, action)` pair from a request's
/// [`CONTROLLER_ATTRIBUTE`].
///
/// Error conditions, each fatal to the dispatch attempt:
/// - attribute missing → [`Error::ControllerNotFound`]
/// - value neither a `Controller::action` string nor a two-element array →
///   [`Error::InvalidControllerShape`]
/// - action element not a string → [`Error::InvalidMethod`]
pub fn controller_reference(request: &Request) -> Result<(String, String), Error> {
    let value = request
        .attribute(CONTROLLER_ATTRIBUTE)
        .ok_or_else(|| Error::ControllerNotFound {
            message: "`_controller` attribute not set on the request".to_string(),
        })?;

    match value {
        Value::String(s) => {
            let (controller, action) =
                s.split_once("::")
                    .ok_or_else(|| Error::InvalidControllerShape { value: s.clone() })?;
            Ok((controller.to_string(), action.to_string()))
        }
        Value::Array(items) if items.len() == 2 => {
            let controller = items[0]
                .as_str()
                .ok_or_else(|| Error::InvalidControllerShape {
                    value: items[0].to_string(),
                })?;
            let action = items[1].as_str().ok_or_else(|| Error::InvalidMethod {
                value: items[1].to_string(),
            })?;
            Ok((controller.to_string(), action.to_string()))
        }
        other => Err(Error::InvalidControllerShape {
            value: other.to_string(),
        }),
    }
}
