//! File download arguments and body streaming.

use std::io;
use std::path::Path;

use axum::body::Bytes;
use futures_util::stream::{self, Stream};
use new_mime_guess::MimeGuess;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::error::RestError;
use crate::observability::metrics;

/// Arguments for a download response.
#[derive(Debug)]
pub struct DownloadArgs<R> {
    /// Name advertised in `Content-Disposition`.
    pub filename: String,
    pub content_type: String,
    pub stream: R,
    pub content_length: u64,
}

impl DownloadArgs<File> {
    /// Open a file on disk, taking its size and guessing its content type.
    pub async fn open(path: &Path, filename: impl Into<String>) -> Result<Self, RestError> {
        let file = File::open(path).await?;
        let meta = file.metadata().await?;
        if !meta.is_file() {
            return Err(RestError::ResourceNotFound(format!(
                "{} is not a file",
                path.display()
            )));
        }

        Ok(Self {
            filename: filename.into(),
            content_type: content_type_for(path),
            stream: file,
            content_length: meta.len(),
        })
    }
}

/// Content type guessed from the file extension.
pub fn content_type_for(path: &Path) -> String {
    MimeGuess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Turn a reader into a chunked body stream.
///
/// The stream ends after EOF, or after yielding the first read error.
pub(crate) fn body_stream<R>(
    reader: R,
    chunk_size: usize,
    filename: String,
) -> impl Stream<Item = Result<Bytes, io::Error>> + Send + 'static
where
    R: AsyncRead + Send + Unpin + 'static,
{
    let chunk_size = chunk_size.max(1);

    stream::unfold(Some((reader, 0u64)), move |state| {
        let filename = filename.clone();
        async move {
            let (mut reader, sent) = state?;
            let mut buf = vec![0u8; chunk_size];
            match reader.read(&mut buf).await {
                Ok(0) => {
                    tracing::debug!(filename = %filename, bytes = sent, "Download complete");
                    None
                }
                Ok(n) => {
                    buf.truncate(n);
                    metrics::record_download_bytes(n as u64);
                    Some((Ok(Bytes::from(buf)), Some((reader, sent + n as u64))))
                }
                Err(e) => {
                    tracing::warn!(filename = %filename, bytes = sent, error = %e, "Download aborted");
                    Some((Err(e), None))
                }
            }
        }
    })
}
