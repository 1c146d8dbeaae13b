//! HTTP Digest challenge/response, delegated to [`digest_auth`].

use digest_auth::{AuthContext, HttpMethod};
use http::{HeaderMap, HeaderValue, header::WWW_AUTHENTICATE};
use url::Url;

use crate::errors::Result;

/// The request-URI a digest response is computed over: path plus query.
pub fn request_uri(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_owned(),
    }
}

/// The digest challenge carried by a `401` response, if any.
pub fn challenge(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(WWW_AUTHENTICATE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| {
            value
                .trim_start()
                .get(..6)
                .is_some_and(|scheme| scheme.eq_ignore_ascii_case("digest"))
        })
}

/// Compute the `Authorization` header answering `challenge`.
pub fn authorization(
    challenge: &str,
    username: &str,
    password: &str,
    method: &http::Method,
    url: &Url,
    body: &[u8],
) -> Result<HeaderValue> {
    let mut prompt = digest_auth::parse(challenge)?;
    let uri = request_uri(url);
    let context = AuthContext::new_with_method(
        username,
        password,
        uri.as_str(),
        Some(body),
        HttpMethod::from(method.as_str()),
    );
    let answer = prompt.respond(&context)?;
    Ok(HeaderValue::from_str(&answer.to_header_string())?)
}
