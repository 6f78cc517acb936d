//! Serves local video files to the webview's `<video>` element.
//!
//! Files are addressed as `/media/<percent-encoded absolute path>` and served
//! with HTTP range support so the element can seek without loading the whole
//! file.

use http::{header, Response, StatusCode};
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Asset handler name; also the first URL segment.
pub const MEDIA_ROUTE: &str = "media";

/// Largest slice returned for one request.
const MAX_CHUNK_BYTES: u64 = 4 * 1024 * 1024;

/// URL under which the webview can load `path`.
pub fn media_url(path: &Path) -> String {
    let p_str = path.to_string_lossy();
    format!("/{MEDIA_ROUTE}/{}", utf8_percent_encode(&p_str, NON_ALPHANUMERIC))
}

/// Inverse of [`media_url`], given the request's URI path.
pub fn decode_media_path(uri_path: &str) -> Option<PathBuf> {
    let encoded = uri_path
        .trim_start_matches('/')
        .strip_prefix(MEDIA_ROUTE)?
        .trim_start_matches('/');
    if encoded.is_empty() {
        return None;
    }
    let decoded = percent_decode_str(encoded).decode_utf8().ok()?;
    Some(PathBuf::from(decoded.into_owned()))
}

/// Parse a single `bytes=` range against a resource of `len` bytes.
/// Returns an inclusive `(start, end)`, already capped to [`MAX_CHUNK_BYTES`].
pub fn parse_range(header_value: &str, len: u64) -> Option<(u64, u64)> {
    if len == 0 {
        return None;
    }
    let spec = header_value.trim().strip_prefix("bytes=")?;
    let first = spec.split(',').next()?.trim();
    let (start, end) = first.split_once('-')?;
    let (start, end) = match (start.trim(), end.trim()) {
        ("", suffix) => {
            let suffix: u64 = suffix.parse().ok()?;
            if suffix == 0 {
                return None;
            }
            (len.saturating_sub(suffix), len - 1)
        }
        (start, "") => (start.parse().ok()?, len - 1),
        (start, end) => (start.parse().ok()?, end.parse::<u64>().ok()?.min(len - 1)),
    };
    if start > end || start >= len {
        return None;
    }
    Some((start, end.min(start + MAX_CHUNK_BYTES - 1)))
}

fn read_slice(path: &Path, start: u64, end: u64) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    file.seek(SeekFrom::Start(start))?;
    let mut buf = Vec::with_capacity((end - start + 1) as usize);
    file.take(end - start + 1).read_to_end(&mut buf)?;
    Ok(buf)
}

pub fn status_only(status: StatusCode) -> Response<Vec<u8>> {
    let mut response = Response::new(Vec::new());
    *response.status_mut() = status;
    response
}

/// Build the response for `path`, honouring an optional `Range` header.
pub fn serve_file(path: &Path, range: Option<&str>) -> Response<Vec<u8>> {
    let len = match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => meta.len(),
        _ => {
            tracing::warn!(path = %path.display(), "Media file not found");
            return status_only(StatusCode::NOT_FOUND);
        }
    };
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    let (status, start, end) = match range {
        Some(value) => match parse_range(value, len) {
            Some((start, end)) => (StatusCode::PARTIAL_CONTENT, start, end),
            None => {
                let mut response = status_only(StatusCode::RANGE_NOT_SATISFIABLE);
                if let Ok(value) = format!("bytes */{len}").parse() {
                    response.headers_mut().insert(header::CONTENT_RANGE, value);
                }
                return response;
            }
        },
        None if len <= MAX_CHUNK_BYTES => (StatusCode::OK, 0, len.saturating_sub(1)),
        None => (StatusCode::PARTIAL_CONTENT, 0, MAX_CHUNK_BYTES - 1),
    };

    let body = if len == 0 {
        Vec::new()
    } else {
        match read_slice(path, start, end) {
            Ok(body) => body,
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "Failed to read media");
                return status_only(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    };

    let mut builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::ACCEPT_RANGES, "bytes")
        .header(header::CONTENT_LENGTH, body.len());
    if status == StatusCode::PARTIAL_CONTENT {
        builder = builder.header(header::CONTENT_RANGE, format!("bytes {start}-{end}/{len}"));
    }
    builder
        .body(body)
        .unwrap_or_else(|_| status_only(StatusCode::INTERNAL_SERVER_ERROR))
}
