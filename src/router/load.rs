use super::RouteDef;
use crate::error::Error;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RoutesFile {
    routes: Vec<RouteDef>,
}

/// Loads a route table from a YAML file.
///
/// The file must contain a top-level `routes` list:
///
/// ```yaml
/// routes:
///   - name: home
///     path: /
///     controller: Pages
///     action: home
///   - name: user_view
///     path: /users/{id}
///     controller: Users
///     action: view
///     methods: [GET]
/// ```
///
/// A missing file or a document without a valid `routes` list is a
/// [`Error::Configuration`] error: routes are construction-time input and
/// never mapped to an HTTP response.
pub fn load_routes(path: impl AsRef<Path>) -> Result<Vec<RouteDef>, Error> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::configuration(format!(
            "routes file `{}` does not exist",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::configuration(format!("routes file `{}` unreadable: {e}", path.display()))
    })?;

    let parsed: RoutesFile = serde_yaml::from_str(&content).map_err(|e| {
        Error::configuration(format!(
            "routes file `{}` must declare a `routes` list: {e}",
            path.display()
        ))
    })?;

    Ok(parsed.routes)
}
