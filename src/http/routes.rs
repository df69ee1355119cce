//! Config-driven routes served through the responder.

use std::path::PathBuf;

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::Response,
    routing::get,
    Router,
};

use crate::config::{DownloadConfig, RedirectRule};
use crate::http::download::DownloadArgs;
use crate::http::error::RestError;
use crate::http::redirect::RedirectArgs;
use crate::http::request::RequestTarget;
use crate::http::server::AppState;

/// One `GET` route per configured redirect rule.
pub(crate) fn redirect_routes(rules: &[RedirectRule]) -> Router<AppState> {
    rules.iter().fold(Router::new(), |router, rule| {
        let args = RedirectArgs {
            url: rule.to.clone(),
            status: rule.status.and_then(|s| StatusCode::from_u16(s).ok()),
        };

        router.route(
            &rule.from,
            get(move |State(state): State<AppState>, target: RequestTarget| {
                let args = args.clone();
                async move { state.responder.redirect(&target, args) }
            }),
        )
    })
}

/// `GET <prefix>/{name}` serving files from the download directory.
pub(crate) fn download_routes(config: &DownloadConfig) -> Router<AppState> {
    let prefix = config.route_prefix.trim_end_matches('/');
    Router::new().route(&format!("{prefix}/{{name}}"), get(download_file))
}

async fn download_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, RestError> {
    if !is_plain_file_name(&name) {
        return Err(RestError::InvalidArgument(format!("invalid file name {name:?}")));
    }

    let path = PathBuf::from(&state.downloads.directory).join(&name);
    let args = DownloadArgs::open(&path, name.as_str())
        .await
        .map_err(|e| match e {
            RestError::ResourceNotFound(_) => {
                RestError::ResourceNotFound(format!("{name} does not exist"))
            }
            other => other,
        })?;

    state.responder.download(args)
}

/// Single path component that is not hidden.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\', '\0'])
}

/// JSON 404 for anything no route claimed.
pub(crate) async fn not_found(uri: Uri) -> RestError {
    RestError::ResourceNotFound(format!("{} does not exist", uri.path()))
}
