//! Shared fixtures for integration tests: an on-disk template site, a small
//! controller suite and an application wired to both.
#![allow(dead_code)]

use serde_json::json;
use simplevc::view::View;
use simplevc::{
    Application, Controller, ControllerRegistry, Error, Request, Response, RouteDef,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Installs a fmt tracing subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// A temporary template directory with the fixture templates written out.
pub struct TestSite {
    dir: TempDir,
}

impl TestSite {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create template dir");
        let root = dir.path();

        write(root, "layouts/default.html", "<layout>{{ content }}</layout>");
        write(root, "layouts/error.html", "<error>{{ content }}</error>");
        write(
            root,
            "errors/400.html",
            "Client error {{ status_code }}{% if exception %} ({{ exception }}){% endif %}",
        );
        write(
            root,
            "errors/500.html",
            "Server error {{ status_code }}{% if exception %} ({{ exception }}){% endif %}",
        );
        write(root, "Pages/home.html", "<h1>{{ title }}</h1>");
        write(root, "Pages/about_us.html", "About us");
        write(root, "Users/view.html", "User {{ id }}");

        TestSite { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

fn write(root: &Path, file: &str, content: &str) {
    let path = root.join(file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create template subdir");
    }
    fs::write(path, content).expect("failed to write template");
}

/// Route table matching the fixture controllers.
pub fn routes() -> Vec<RouteDef> {
    fn route(name: &str, path: &str, controller: &str, action: &str) -> RouteDef {
        RouteDef {
            name: name.to_string(),
            path: path.to_string(),
            controller: controller.to_string(),
            action: action.to_string(),
            methods: Vec::new(),
        }
    }

    vec![
        route("home", "/", "Pages", "home"),
        route("about", "/about", "Pages", "aboutUs"),
        route("direct", "/direct", "Pages", "direct"),
        route("fail", "/fail", "Pages", "fail"),
        route("teapot", "/teapot", "Pages", "teapot"),
        route("user_view", "/users/{id}", "Users", "view"),
    ]
}

pub struct PagesController {
    view: View,
}

impl Controller for PagesController {
    fn view(&self) -> &View {
        &self.view
    }

    fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    fn invoke(&mut self, action: &str, _request: &Request) -> Result<Option<Response>, Error> {
        match action {
            "home" => {
                self.set([("title".to_string(), json!("Welcome"))])?;
                Ok(None)
            }
            "aboutUs" => Ok(None),
            "direct" => Ok(Some(
                Response::ok("direct body").with_header("x-direct", "yes"),
            )),
            "fail" => Err(Error::Internal(anyhow::anyhow!("database exploded"))),
            "teapot" => Err(Error::http(418, "short and stout")),
            other => Err(Error::Internal(anyhow::anyhow!("unknown action `{other}`"))),
        }
    }
}

pub struct UsersController {
    view: View,
}

impl Controller for UsersController {
    fn view(&self) -> &View {
        &self.view
    }

    fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    fn invoke(&mut self, action: &str, request: &Request) -> Result<Option<Response>, Error> {
        match action {
            "view" => {
                let id = request
                    .attribute("id")
                    .cloned()
                    .unwrap_or(serde_json::Value::Null);
                self.set([("id".to_string(), id)])?;
                Ok(None)
            }
            other => Err(Error::Internal(anyhow::anyhow!("unknown action `{other}`"))),
        }
    }
}

pub fn registry() -> ControllerRegistry {
    let mut registry = ControllerRegistry::new();
    registry.register("Pages", |view| Box::new(PagesController { view }));
    registry.register("Users", |view| Box::new(UsersController { view }));
    registry
}

/// An application over the fixture site and controllers.
pub fn app(site: &TestSite) -> Application {
    Application::new(routes(), registry(), site.root(), None)
        .expect("failed to build test application")
}
