//! Functional tests for the responder over real HTTP.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use http_responder::http::{AppState, ErrorBody, RequestTarget};
use http_responder::{DownloadArgs, RedirectArgs, ResponderConfig, RestError};

mod common;

use common::{client, fixture, TestServer};

async fn get_restify_error(State(state): State<AppState>) -> Response {
    let error = RestError::InvalidArgument("foo arg invalid".into());
    state.responder.error(&error)
}

async fn redirect_to_full_url(
    State(state): State<AppState>,
    target: RequestTarget,
) -> Result<Response, RestError> {
    state
        .responder
        .redirect(&target, RedirectArgs::new("http://google.com"))
}

async fn redirect_to_full_url_301(
    State(state): State<AppState>,
    target: RequestTarget,
) -> Result<Response, RestError> {
    let args = RedirectArgs::new("http://google.com").with_status(StatusCode::MOVED_PERMANENTLY);
    state.responder.redirect(&target, args)
}

async fn redirect_to_full_path(
    State(state): State<AppState>,
    target: RequestTarget,
) -> Result<Response, RestError> {
    state.responder.redirect(&target, RedirectArgs::new("/foo/bar"))
}

async fn redirect_to_full_path_without_leading_slash(
    State(state): State<AppState>,
    target: RequestTarget,
) -> Result<Response, RestError> {
    state.responder.redirect(&target, RedirectArgs::new("foo/bar"))
}

async fn redirect_to_relative_path(
    State(state): State<AppState>,
    target: RequestTarget,
) -> Result<Response, RestError> {
    state.responder.redirect(&target, RedirectArgs::new("./foo/bar"))
}

async fn download_content(State(state): State<AppState>) -> Result<Response, RestError> {
    let mut args = DownloadArgs::open(&fixture("fake_data.js"), "responder.functional.js").await?;
    args.content_type = "application/javascript".into();
    state.responder.download(args)
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/test/errors/restify", get(get_restify_error))
        .route("/test/redirects/full_url", get(redirect_to_full_url))
        .route("/test/redirects/full_url_301", get(redirect_to_full_url_301))
        .route("/test/redirects/full_path", get(redirect_to_full_path))
        .route(
            "/test/redirects/full_path_without_leading_slash",
            get(redirect_to_full_path_without_leading_slash),
        )
        .route("/test/redirects/relative_path", get(redirect_to_relative_path))
        .route("/test/downloads/content", get(download_content))
}

async fn start() -> TestServer {
    TestServer::start(ResponderConfig::default(), routes()).await
}

fn location(res: &reqwest::Response) -> &str {
    res.headers()["location"].to_str().unwrap()
}

#[tokio::test]
async fn error_returns_status_and_body() {
    let server = start().await;
    let res = client()
        .get(server.url("/test/errors/restify"))
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 409);
    let body: ErrorBody = res.json().await.unwrap();
    assert_eq!(body, ErrorBody {
        code: "InvalidArgument".into(),
        message: "foo arg invalid".into(),
    });
}

#[tokio::test]
async fn full_url_redirects_with_302_by_default() {
    let server = start().await;
    let res = client()
        .get(server.url("/test/redirects/full_url"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 302);
    assert_eq!(location(&res), "http://google.com");
}

#[tokio::test]
async fn full_url_redirects_with_given_status() {
    let server = start().await;
    let res = client()
        .get(server.url("/test/redirects/full_url_301"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 301);
    assert_eq!(location(&res), "http://google.com");
}

#[tokio::test]
async fn full_path_redirects_using_request_host_and_port() {
    let server = start().await;
    let res = client()
        .get(server.url("/test/redirects/full_path"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 302);
    assert_eq!(location(&res), format!("http://{}/foo/bar", server.addr));
}

#[tokio::test]
async fn path_without_leading_slash_is_internal_error() {
    let server = start().await;
    let res = client()
        .get(server.url("/test/redirects/full_path_without_leading_slash"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    let body: ErrorBody = res.json().await.unwrap();
    assert_eq!(body.code, "InternalError");
    assert!(body.message.contains("leading slash"), "{}", body.message);
}

#[tokio::test]
async fn relative_path_redirects_below_current_path() {
    let server = start().await;
    let starting_path = "/test/redirects/relative_path";
    let res = client().get(server.url(starting_path)).send().await.unwrap();

    assert_eq!(res.status(), 302);
    assert_eq!(
        location(&res),
        format!("http://{}{}/foo/bar", server.addr, starting_path)
    );
}

#[tokio::test]
async fn download_returns_headers_and_content() {
    let server = start().await;
    let expected = std::fs::read(fixture("fake_data.js")).unwrap();

    let res = client()
        .get(server.url("/test/downloads/content"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let headers = res.headers().clone();
    assert_eq!(headers["content-type"], "application/javascript");
    assert_eq!(headers["content-length"], expected.len().to_string().as_str());
    assert_eq!(
        headers["content-disposition"],
        "attachment; filename=responder.functional.js"
    );

    let body = res.bytes().await.unwrap();
    assert_eq!(body.len(), expected.len());
    assert_eq!(&body[..], &expected[..]);
}

#[tokio::test]
async fn unknown_route_is_resource_not_found() {
    let server = start().await;
    let res = client().get(server.url("/missing")).send().await.unwrap();

    assert_eq!(res.status(), 404);
    let body: ErrorBody = res.json().await.unwrap();
    assert_eq!(body.code, "ResourceNotFound");
}

#[tokio::test]
async fn stopped_server_refuses_connections() {
    let server = start().await;
    let url = server.url("/test/redirects/full_url");
    server.stop();
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    assert!(client().get(url).send().await.is_err());
}
