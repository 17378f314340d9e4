use http::Method;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;

/// A declared route: path pattern plus the controller/action pair that
/// handles it.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDef {
    /// Route name, used for lookups in the test harness.
    pub name: String,
    /// Path pattern with `{param}` placeholder segments.
    pub path: String,
    /// Controller identifier as registered in the controller registry.
    pub controller: String,
    /// Action name on the controller.
    pub action: String,
    /// Accepted HTTP methods. Empty means any method matches.
    #[serde(default)]
    pub methods: Vec<String>,
}

impl RouteDef {
    /// Whether this route accepts the given method.
    pub fn accepts(&self, method: &Method) -> bool {
        self.methods.is_empty()
            || self
                .methods
                .iter()
                .any(|m| m.eq_ignore_ascii_case(method.as_str()))
    }
}

/// The result of matching a request path against the route table.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route definition.
    pub route: RouteDef,
    /// Values captured from `{param}` segments.
    pub path_params: HashMap<String, String>,
}

/// Matches request paths against a compiled route table.
///
/// Each route is held as (compiled regex, definition, param names). Routes
/// are sorted by pattern length, longest first, so overlapping patterns like
/// `/users` and `/users/{id}` resolve to the more specific one.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<(Regex, RouteDef, Vec<String>)>,
}

impl Router {
    /// Compiles a route table.
    pub fn new(routes: Vec<RouteDef>) -> Self {
        let mut routes = routes;
        routes.sort_by_key(|r| r.path.len());
        routes.reverse();

        let routes = routes
            .into_iter()
            .map(|route| {
                let (regex, param_names) = Self::path_to_regex(&route.path);
                (regex, route, param_names)
            })
            .collect();

        Self { routes }
    }

    /// Matches `method` and `path` against the table.
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        for (regex, route, param_names) in &self.routes {
            if !route.accepts(method) {
                continue;
            }
            if let Some(captures) = regex.captures(path) {
                let mut params = HashMap::with_capacity(param_names.len());
                for (i, name) in param_names.iter().enumerate() {
                    if let Some(val) = captures.get(i + 1) {
                        params.insert(name.clone(), val.as_str().to_string());
                    }
                }
                return Some(RouteMatch {
                    route: route.clone(),
                    path_params: params,
                });
            }
        }
        None
    }

    /// Returns the route with the given name, if declared.
    pub fn route_by_name(&self, name: &str) -> Option<&RouteDef> {
        self.routes
            .iter()
            .map(|(_, route, _)| route)
            .find(|route| route.name == name)
    }

    /// Names of all declared routes, in matching order.
    pub fn route_names(&self) -> Vec<&str> {
        self.routes
            .iter()
            .map(|(_, route, _)| route.name.as_str())
            .collect()
    }

    pub(crate) fn path_to_regex(path: &str) -> (Regex, Vec<String>) {
        if path == "/" {
            return (
                Regex::new(r"^/$").expect("Failed to compile path regex"),
                Vec::new(),
            );
        }

        let mut pattern = String::with_capacity(path.len() + 5);
        pattern.push('^');
        let mut param_names = Vec::with_capacity(path.matches('{').count());

        for segment in path.split('/') {
            if segment.starts_with('{') && segment.ends_with('}') {
                let param_name = segment
                    .trim_start_matches('{')
                    .trim_end_matches('}')
                    .to_string();
                pattern.push_str("/([^/]+)");
                param_names.push(param_name);
            } else if !segment.is_empty() {
                pattern.push('/');
                pattern.push_str(&regex::escape(segment));
            }
        }

        pattern.push('$');
        let regex = Regex::new(&pattern).expect("Failed to compile path regex");

        (regex, param_names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(name: &str, path: &str) -> RouteDef {
        RouteDef {
            name: name.to_string(),
            path: path.to_string(),
            controller: "Test".to_string(),
            action: name.to_string(),
            methods: Vec::new(),
        }
    }

    #[test]
    fn test_path_params_extracted() {
        let router = Router::new(vec![route("user_view", "/users/{id}")]);
        let m = router.route(&Method::GET, "/users/42").unwrap();
        assert_eq!(m.route.name, "user_view");
        assert_eq!(m.path_params.get("id"), Some(&"42".to_string()));
    }

    #[test]
    fn test_longest_pattern_wins() {
        let router = Router::new(vec![
            route("users", "/users"),
            route("user_posts", "/users/{id}/posts"),
        ]);
        let m = router.route(&Method::GET, "/users/7/posts").unwrap();
        assert_eq!(m.route.name, "user_posts");
    }

    #[test]
    fn test_method_restriction() {
        let mut r = route("create", "/users");
        r.methods = vec!["POST".to_string()];
        let router = Router::new(vec![r]);
        assert!(router.route(&Method::GET, "/users").is_none());
        assert!(router.route(&Method::POST, "/users").is_some());
    }

    #[test]
    fn test_no_match() {
        let router = Router::new(vec![route("home", "/")]);
        assert!(router.route(&Method::GET, "/missing").is_none());
        assert!(router.route(&Method::GET, "/").is_some());
    }
}
