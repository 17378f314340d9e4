//! Template rendering with optional layout support.
//!
//! A [`View`] renders named template files from a template root directory,
//! optionally wrapping the result in a layout template that receives the
//! inner content under the reserved `content` key. [`ErrorView`] is the
//! specialization used for error pages.

mod error_view;
#[allow(clippy::module_inception)]
mod view;

pub use error_view::{ErrorView, ERROR_LAYOUT};
pub use view::{camel_to_snake, View, DEFAULT_LAYOUT};
