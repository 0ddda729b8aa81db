#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use waypost::{
    BoxError, ControllerRegistry, Engine, Overrides, RegistryError, Request, RequestExt,
    bytes::Bytes,
    controller::WelcomeController,
    controller_actions,
    http::{Method, StatusCode},
    text,
};

// ============================================================================
// Requests
// ============================================================================

pub fn get(uri: &str) -> Request {
    waypost::testing::request(Method::GET, uri)
}

pub fn post(uri: &str) -> Request {
    waypost::testing::request(Method::POST, uri)
}

// ============================================================================
// Test Controllers
// ============================================================================

/// Counts its own invocations through a shared counter passed as an override.
pub struct ArticleController {
    pub calls: Arc<AtomicUsize>,
}

impl ArticleController {
    pub fn show(&self, request: &Request) -> waypost::http::Response<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        text(
            StatusCode::OK,
            format!("article {}", request.param("slug").unwrap_or_default()),
        )
    }

    pub fn draft(&self, _request: &Request) -> String {
        String::from("not a response")
    }

    pub fn broken(&self, _request: &Request) -> Result<waypost::http::Response<Bytes>, BoxError> {
        Err("storage unavailable".into())
    }
}

controller_actions!(ArticleController {
    "show" => show,
    "draft" => draft,
    "broken" => broken,
});

pub fn registry(calls: Arc<AtomicUsize>) -> ControllerRegistry {
    let mut registry = ControllerRegistry::new();
    registry
        .register("Articles", |params: &Overrides| {
            let calls = params.require::<Arc<AtomicUsize>>("Articles", "calls")?;
            Ok::<_, RegistryError>(ArticleController {
                calls: calls.clone(),
            })
        })
        .define("Articles", "calls", calls)
        .register_default::<WelcomeController>(WelcomeController::ID);
    registry
}

/// An engine with the article and welcome controllers wired in.
pub fn engine(calls: Arc<AtomicUsize>) -> Engine {
    let mut engine = Engine::builder().injector(registry(calls)).build();
    engine
        .get("/", "Welcome#index")
        .get("/echo/{message}", "Welcome#echo")
        .get("/articles/{slug}", "Articles#show")
        .get("/drafts/{slug}", "Articles#draft")
        .get("/broken", "Articles#broken")
        .get("/missing-action", "Articles#archive")
        .get("/missing-controller", "Nowhere#index");
    engine
}

// ============================================================================
// Order Recording
// ============================================================================

#[derive(Clone, Default)]
pub struct Order {
    seen: Arc<Mutex<Vec<&'static str>>>,
}

impl Order {
    pub fn push(&self, label: &'static str) {
        self.seen.lock().unwrap().push(label);
    }

    pub fn seen(&self) -> Vec<&'static str> {
        self.seen.lock().unwrap().clone()
    }
}

pub fn method(name: &str) -> Method {
    Method::from_bytes(name.as_bytes()).unwrap()
}
