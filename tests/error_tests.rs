mod common;

use common::TestSite;
use simplevc::{ConsoleLogger, Error, ErrorLogger, ErrorRenderer, ErrorView};
use std::io::Write;
use std::sync::{Arc, Mutex};

// DEBUG is process-global; serialize the tests that toggle it.
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Clone, Default)]
struct RecordingLogger {
    records: Arc<Mutex<Vec<(String, u16)>>>,
}

impl ErrorLogger for RecordingLogger {
    fn log(&self, message: &str, _error: Option<&Error>, status_code: u16) {
        self.records
            .lock()
            .unwrap()
            .push((message.to_string(), status_code));
    }
}

#[test]
fn test_error_view_renders_client_error_page() {
    common::init_tracing();
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::remove_var("DEBUG");

    let site = TestSite::new();
    let view = ErrorView::new(site.root()).unwrap();
    let out = view.render_error(404, None).unwrap();
    assert_eq!(out, "<error>Client error 404</error>");
}

#[test]
fn test_error_view_renders_server_error_page() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::remove_var("DEBUG");

    let site = TestSite::new();
    let view = ErrorView::new(site.root()).unwrap();
    let out = view.render_error(500, None).unwrap();
    assert_eq!(out, "<error>Server error 500</error>");
}

#[test]
fn test_error_view_without_layout_returns_bare_page() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::remove_var("DEBUG");

    let site = TestSite::new();
    let mut view = ErrorView::new(site.root()).unwrap();
    assert_eq!(view.layout(), Some(simplevc::view::ERROR_LAYOUT));

    view.set_layout(None::<&str>);
    let out = view.render_error(404, None).unwrap();
    assert_eq!(out, "Client error 404");
}

#[test]
fn test_exception_detail_only_in_debug_mode() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let site = TestSite::new();
    let view = ErrorView::new(site.root()).unwrap();
    let fault = Error::http(500, "database exploded");

    std::env::remove_var("DEBUG");
    let out = view.render_error(500, Some(&fault)).unwrap();
    assert!(!out.contains("database exploded"));

    std::env::set_var("DEBUG", "true");
    let out = view.render_error(500, Some(&fault)).unwrap();
    std::env::remove_var("DEBUG");
    assert!(out.contains("database exploded"));
}

#[test]
fn test_renderer_returns_response_with_status() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::remove_var("DEBUG");

    let site = TestSite::new();
    let renderer = ErrorRenderer::new(site.root());
    let fault = Error::RouteNotFound {
        path: "/missing".to_string(),
    };

    let response = renderer.render(404, Some(&fault));
    assert_eq!(response.status, 404);
    assert_eq!(response.body, "<error>Client error 404</error>");
}

#[test]
fn test_renderer_notifies_logger() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    std::env::remove_var("DEBUG");

    let site = TestSite::new();
    let logger = RecordingLogger::default();
    let renderer = ErrorRenderer::new(site.root()).with_logger(logger.clone());
    let fault = Error::http(503, "overloaded");

    renderer.render(503, Some(&fault));

    let records = logger.records.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].1, 503);
    assert!(records[0].0.contains("overloaded"));
}

#[test]
fn test_renderer_skips_logger_without_fault() {
    let site = TestSite::new();
    let logger = RecordingLogger::default();
    let renderer = ErrorRenderer::new(site.root()).with_logger(logger.clone());

    renderer.render(404, None);
    assert!(logger.records.lock().unwrap().is_empty());
}

#[test]
fn test_renderer_falls_back_when_templates_missing() {
    // An empty template root: the error pages themselves cannot render,
    // but a response must still come back.
    let dir = tempfile::tempdir().unwrap();
    let renderer = ErrorRenderer::new(dir.path());

    let response = renderer.render(500, None);
    assert_eq!(response.status, 500);
    assert_eq!(response.body, "500 Internal Server Error");
}

#[test]
fn test_console_logger_respects_debug_flag() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let fault = Error::http(500, "boom");

    std::env::remove_var("DEBUG");
    let quiet = SharedBuf::default();
    ConsoleLogger::with_writer(Box::new(quiet.clone())).log("boom", Some(&fault), 500);
    assert_eq!(quiet.contents(), "");

    std::env::set_var("DEBUG", "1");
    let verbose = SharedBuf::default();
    ConsoleLogger::with_writer(Box::new(verbose.clone())).log("boom", Some(&fault), 500);
    std::env::remove_var("DEBUG");
    assert!(verbose.contents().starts_with("boom\n"));
}
