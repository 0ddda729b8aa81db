use futures::stream;
use std::sync::Arc;
use waypost::{
    DispatchError, Engine, InvalidTypeError, WriterSink,
    http::StatusCode,
    testing::VecSink,
};

mod common;
use common::{engine, get};

#[tokio::test]
async fn test_run_dispatches_every_request() {
    let engine = engine(Arc::default());
    let requests = stream::iter(vec![get("/"), get("/echo/hi"), get("/nowhere")]);

    let mut sink = VecSink::new();
    let sent = engine.run(requests, &mut sink).await.unwrap();

    assert_eq!(sent, 3);
    assert_eq!(
        sink.statuses(),
        vec![StatusCode::OK, StatusCode::OK, StatusCode::NOT_FOUND]
    );
    assert_eq!(sink.responses()[1].body(), b"hi");
}

#[tokio::test]
async fn test_run_stops_at_first_fatal_error() {
    let engine = engine(Arc::default());
    let requests = stream::iter(vec![
        get("/echo/first"),
        get("/drafts/one"),
        get("/echo/never"),
    ]);

    let mut sink = VecSink::new();
    let err = engine.run(requests, &mut sink).await.unwrap_err();

    assert!(matches!(err, DispatchError::InvalidType(InvalidTypeError { .. })));
    assert_eq!(sink.len(), 1);
    assert_eq!(sink.responses()[0].body(), b"first");
}

#[tokio::test]
async fn test_run_with_empty_stream_sends_nothing() {
    let engine = Engine::new();
    let mut sink = VecSink::new();

    let sent = engine
        .run(stream::iter(Vec::new()), &mut sink)
        .await
        .unwrap();
    assert_eq!(sent, 0);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_run_writes_wire_format() {
    let engine = engine(Arc::default());
    let mut sink = WriterSink::new(Vec::new());

    engine
        .run(stream::iter(vec![get("/echo/wire")]), &mut sink)
        .await
        .unwrap();

    let written = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(
        written,
        "HTTP/1.1 200 OK\r\ncontent-type: text/plain; charset=utf-8\r\ncontent-length: 4\r\n\r\nwire"
    );
}
