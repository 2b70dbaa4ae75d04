//! Blocking HTTP calls to the vendor API.
//!
//! Everything here blocks the calling thread and must only be invoked from
//! inside [`Hub::run_blocking`](crate::Hub::run_blocking).

use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::error::Result;

/// Header carrying the session token on authenticated requests.
pub const TOKEN_HEADER: &str = "x-token";

/// Status and body of a completed request.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

// The blocking client owns a private runtime, so it is built on the blocking
// thread rather than kept on the async side.
fn client() -> Result<Client> {
    Ok(Client::builder().build()?)
}

/// Form-encoded POST, as the login endpoint expects.
pub(crate) fn post_form(url: &str, form: &[(&str, &str)]) -> Result<RawResponse> {
    let response = client()?.post(url).form(form).send()?;
    let status = response.status();
    let body = response.text()?;
    Ok(RawResponse { status, body })
}

/// GET with the session token header.
pub(crate) fn get_with_token(url: &str, token: &str) -> Result<RawResponse> {
    let response = client()?.get(url).header(TOKEN_HEADER, token).send()?;
    let status = response.status();
    let body = response.text()?;
    Ok(RawResponse { status, body })
}
