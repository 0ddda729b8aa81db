use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use waypost::{
    AfterController, BeforeController, DispatchError, Engine, InvalidHandlerError,
    InvalidTypeError, callable, handler,
    http::{StatusCode, header},
    testing::{CountingHandler, RecordingListener},
    text,
};

mod common;
use common::{ArticleController, Order, engine, get};

#[test]
fn test_callable_response_is_returned_unchanged() {
    let mut engine = Engine::new();
    engine.get(
        "/hello",
        callable(|_: &waypost::Request| text(StatusCode::OK, "hi")),
    );

    let response = engine.dispatch(get("/hello")).unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body(), b"hi");
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
}

#[test]
fn test_controller_action_end_to_end() {
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = engine(calls.clone());

    let response = engine.dispatch(get("/articles/hello-world")).unwrap();
    assert_eq!(response.body(), b"article hello-world");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_welcome_controller_routes() {
    let engine = engine(Arc::default());

    let index = engine.dispatch(get("/")).unwrap();
    assert_eq!(index.status(), StatusCode::OK);
    assert_eq!(
        index.headers()[header::CONTENT_TYPE],
        "text/html; charset=utf-8"
    );

    let echo = engine.dispatch(get("/echo/bonjour")).unwrap();
    assert_eq!(echo.body(), b"bonjour");
}

#[test]
fn test_before_listener_short_circuit_skips_handler() {
    let counter = CountingHandler::new();
    let recorder = RecordingListener::new();

    let mut engine = Engine::builder()
        .before_controller(|event: &mut BeforeController| {
            event.set_response(text(StatusCode::FORBIDDEN, "denied"));
        })
        .before_controller(recorder.clone())
        .after_controller(recorder.clone())
        .build();
    engine.get("/guarded", handler(counter.clone()));

    let response = engine.dispatch(get("/guarded")).unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(response.body(), b"denied");
    assert_eq!(counter.count(), 0);

    // Later Before listeners still run; After is never emitted.
    assert_eq!(recorder.names(), vec![BeforeController::NAME]);
    assert_eq!(recorder.records()[0].status, Some(StatusCode::FORBIDDEN));
}

#[test]
fn test_stop_propagation_on_before() {
    let order = Order::default();
    let first = order.clone();
    let second = order.clone();

    let mut engine = Engine::new();
    engine
        .get("/hello", handler(CountingHandler::new()))
        .on_before_controller(move |event: &mut BeforeController| {
            first.push("first");
            event.stop_propagation();
        })
        .on_before_controller(move |_: &mut BeforeController| second.push("second"));

    let response = engine.dispatch(get("/hello")).unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(order.seen(), vec!["first"]);
}

#[test]
fn test_after_listener_overrides_status() {
    let mut engine = Engine::new();
    engine
        .get("/hello", handler(CountingHandler::new()))
        .on_after_controller(|event: &mut AfterController| {
            let body = event
                .response()
                .map(|response| response.body().to_vec())
                .unwrap_or_default();
            event.set_response(text(StatusCode::CREATED, body));
        });

    let response = engine.dispatch(get("/hello")).unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.body(), b"ok");
}

#[test]
fn test_after_listeners_see_controller_instance() {
    let seen = Arc::new(AtomicUsize::new(0));
    let observed = seen.clone();

    let mut engine = engine(Arc::default());
    engine.on_after_controller(move |event: &mut AfterController| {
        if event.controller().downcast_ref::<ArticleController>().is_some() {
            observed.fetch_add(1, Ordering::SeqCst);
        }
    });

    engine.dispatch(get("/articles/one")).unwrap();
    engine.dispatch(get("/")).unwrap();
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[test]
fn test_string_return_is_invalid_type() {
    let engine = engine(Arc::default());

    let err = engine.dispatch(get("/drafts/one")).err().unwrap();
    match err {
        DispatchError::InvalidType(err) => {
            assert_eq!(err, InvalidTypeError::from_handler("alloc::string::String"));
            assert_eq!(
                err.to_string(),
                "Controller must return an instance of ResponseLike, \"alloc::string::String\" was returned."
            );
        }
        other => panic!("expected InvalidType, got {other:?}"),
    }
}

#[test]
fn test_after_listener_dropping_response_is_invalid_type() {
    let mut engine = Engine::new();
    engine
        .get("/hello", handler(CountingHandler::new()))
        .on_after_controller(|event: &mut AfterController| {
            event.take_response();
        });

    let err = engine.dispatch(get("/hello")).err().unwrap();
    assert_eq!(
        err.to_string(),
        "After-controller listeners must return an instance of ResponseLike, \"()\" was returned."
    );
}

#[test]
fn test_handler_error_fails_dispatch() {
    let engine = engine(Arc::default());

    let err = engine.dispatch(get("/broken")).err().unwrap();
    match err {
        DispatchError::Handler(source) => assert_eq!(source.to_string(), "storage unavailable"),
        other => panic!("expected Handler, got {other:?}"),
    }
}

#[test]
fn test_missing_action_is_not_callable() {
    let engine = engine(Arc::default());

    let err = engine.dispatch(get("/missing-action")).err().unwrap();
    assert_eq!(
        err.to_string(),
        "The controller and action, Articles::archive, is not callable. \
         Please ensure that a publicly accessible method is available with this name."
    );
}

#[test]
fn test_missing_controller_is_construction_error() {
    let engine = engine(Arc::default());

    let err = engine.dispatch(get("/missing-controller")).err().unwrap();
    assert!(matches!(
        err,
        DispatchError::InvalidHandler(InvalidHandlerError::Construction { .. })
    ));
    assert_eq!(
        err.to_string(),
        "An error was encountered creating the controller for Nowhere#index."
    );
}

#[test]
fn test_engine_is_shareable_across_threads() {
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = Arc::new(engine(calls.clone()));

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            std::thread::spawn(move || {
                let response = engine.dispatch(get("/articles/shared")).unwrap();
                response.status()
            })
        })
        .collect();

    for worker in workers {
        assert_eq!(worker.join().unwrap(), StatusCode::OK);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}
