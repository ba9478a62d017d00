//! Purpose: Build one HTTP request, run it on a transport, and validate the reply.
//! Exports: `execute`, `build_request`, `SUCCESS_STATUS`.
//! Role: The only place that decides whether a response counts as success.
//! Invariants: Exactly one `Transport::send` per call; no retries.
//! Invariants: The response body is drained fully and dropped once on every path.
//! Invariants: Only status 200 is success; everything else becomes a status error.
use super::error::{Error, ErrorKind};
use super::options::{RequestConfig, RequestOption};
use super::transport::{Method, Request, Transport};
use std::io::Read;
use url::Url;

pub const SUCCESS_STATUS: u16 = 200;

type ExecResult<T> = Result<T, Error>;

pub fn execute<T>(
    transport: &T,
    url: &str,
    method: &str,
    options: impl IntoIterator<Item = RequestOption>,
) -> ExecResult<Vec<u8>>
where
    T: Transport + ?Sized,
{
    let config = RequestConfig::resolve(options);
    let request = build_request(method, url, config)?;
    tracing::debug!(
        method = %request.method(),
        url = %request.url(),
        has_body = request.has_body(),
        "dispatching request"
    );

    let response = transport.send(request).map_err(Error::transport)?;
    let status = response.status();
    let payload = {
        let mut body = response.into_body();
        drain(&mut body)?
    };

    if status != SUCCESS_STATUS {
        tracing::debug!(status, bytes = payload.len(), "request rejected");
        return Err(Error::status(status, payload));
    }
    Ok(payload)
}

pub fn build_request(method: &str, url: &str, config: RequestConfig) -> ExecResult<Request> {
    let method: Method = method.parse().map_err(|err| {
        Error::new(ErrorKind::Build)
            .with_message("failed to build request")
            .with_source(err)
    })?;
    let url = Url::parse(url).map_err(|err| {
        Error::new(ErrorKind::Build)
            .with_message("failed to build request")
            .with_source(err)
    })?;

    let mut request = Request::new(method, url);
    for (name, value) in config.headers {
        request.set_header(name, value);
    }
    if !config.content_type.is_empty() {
        request.set_header("Content-Type", config.content_type);
    }
    request.set_body(config.body);
    Ok(request)
}

fn drain(body: &mut dyn Read) -> ExecResult<Vec<u8>> {
    let mut payload = Vec::new();
    body.read_to_end(&mut payload)
        .map_err(|err| Error::new(ErrorKind::Body).with_source(err))?;
    Ok(payload)
}
