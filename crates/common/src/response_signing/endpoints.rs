//! HTTP integration for response signing, expressed over the `http` crate.
//!
//! Framework adapters call [`sign_response`] once the handler has produced a
//! fully buffered body and before headers are flushed, and route
//! `GET /.well-known/ioproof.json` to [`handle_well_known`]. Signing is
//! best-effort: a failure is logged and the response goes out unsigned.

use error_stack::{Report, ResultExt};
use http::header::{HeaderValue, CACHE_CONTROL, CONTENT_TYPE};
use http::{Method, Request, Response, StatusCode};

use crate::constants::WELL_KNOWN_PATH;
use crate::error::IoProofError;

use super::discovery::WellKnownDirectory;
use super::signing::ResponseSigner;

/// Signs `response` for `request_body` and attaches the signature headers.
///
/// Returns whether the headers were attached. On failure the error is logged
/// at `warn` and the response is left exactly as it was.
pub fn sign_response<B: AsRef<[u8]>>(
    signer: &ResponseSigner,
    request_body: &[u8],
    response: &mut Response<B>,
) -> bool {
    match try_sign_response(signer, request_body, response) {
        Ok(()) => true,
        Err(report) => {
            log::warn!("Response signing failed, sending unsigned response: {report:?}");
            false
        }
    }
}

/// Signs a buffered request/response exchange. See [`sign_response`].
pub fn sign_exchange<Q: AsRef<[u8]>, B: AsRef<[u8]>>(
    signer: &ResponseSigner,
    request: &Request<Q>,
    response: &mut Response<B>,
) -> bool {
    sign_response(signer, request.body().as_ref(), response)
}

fn try_sign_response<B: AsRef<[u8]>>(
    signer: &ResponseSigner,
    request_body: &[u8],
    response: &mut Response<B>,
) -> Result<(), Report<IoProofError>> {
    let result = signer.sign(request_body, response.body().as_ref());
    // Build every header before touching the response so it is never partially signed.
    let signature_headers = result.header_map()?;
    response.headers_mut().extend(signature_headers);
    Ok(())
}

/// Whether the request targets the discovery document.
#[must_use]
pub fn is_well_known_request<B>(req: &Request<B>) -> bool {
    matches!(*req.method(), Method::GET | Method::HEAD) && req.uri().path() == WELL_KNOWN_PATH
}

/// Serves the discovery document.
///
/// # Errors
///
/// Returns an error if the document cannot be serialized or the response
/// cannot be assembled.
pub fn handle_well_known(
    directory: &WellKnownDirectory,
    max_age_seconds: u32,
) -> Result<Response<String>, Report<IoProofError>> {
    let json = directory.to_json()?;
    let cache_control = HeaderValue::from_str(&format!("public, max-age={max_age_seconds}"))
        .change_context(IoProofError::Serialization {
            message: "Invalid Cache-Control value".into(),
        })?;

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/json")
        .header(CACHE_CONTROL, cache_control)
        .body(json)
        .change_context(IoProofError::Serialization {
            message: "Failed to build discovery response".into(),
        })
}

/// Renders an error as a plain-text response with the error's status code.
#[must_use]
pub fn to_error_response(report: &Report<IoProofError>) -> Response<String> {
    let status = report.current_context().status_code();
    let mut response = Response::new(format!("{}\n", report.current_context()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
    response
}
