use std::sync::OnceLock;

use encoding_rs::Encoding;
use reqwest::blocking::Response;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::StatusCode;

use crate::config::{HttpHelperConfig, DEFAULT_CHARSET, MAX_REDIRECTS};
use crate::error::{HttpHelperError, Result};
use crate::http_client::SharedHttpClient;
use crate::params::{append_query, encode_form, resolve_charset, Params};

static SHARED: OnceLock<Result<HttpHelper>> = OnceLock::new();

/// Blocking GET/POST helpers over one long-lived client.
///
/// The client is built once from an [`HttpHelperConfig`] and never changed
/// afterwards. `HttpHelper` is `Send + Sync`, so one instance can serve any
/// number of threads at once; each call blocks its own thread until the
/// exchange completes or times out.
///
/// Failure handling differs between the two verbs:
/// * [`get`](Self::get) never fails. Transport errors, non-200 statuses,
///   unknown charsets and undecodable bodies are logged and reported as
///   `None`. Redirects are followed, up to [`MAX_REDIRECTS`].
/// * [`post`](Self::post) returns [`HttpHelperError::BadStatus`] for any
///   non-200 status, redirects included, [`HttpHelperError::Transport`] when
///   the request can't be sent and [`HttpHelperError::UnsupportedCharset`]
///   for an unknown charset label. An undecodable body is logged and
///   reported as `Ok(None)`.
///
/// Both return `None` for an empty URL without touching the network, and for
/// a 200 response with an empty body.
#[derive(Debug, Clone)]
pub struct HttpHelper {
    client: SharedHttpClient,
}

impl HttpHelper {
    pub fn new(config: HttpHelperConfig) -> Result<Self> {
        Ok(Self {
            client: SharedHttpClient::new(&config)?,
        })
    }

    /// Helper with the fixed timeouts and proxy of [`HttpHelperConfig::default`].
    pub fn with_defaults() -> Result<Self> {
        Self::new(HttpHelperConfig::default())
    }

    /// Process-wide helper built from the default config on first use.
    ///
    /// The client is built at most once; concurrent first callers wait for
    /// it. A failed build is remembered and returned to every caller.
    pub fn shared() -> Result<&'static HttpHelper> {
        init_shared(&SHARED, Self::with_defaults)
    }

    /// GET `url` with `params` appended as a query string. Parameters are
    /// encoded as UTF-8 and the body decoded as UTF-8 unless the response
    /// names its own charset.
    pub fn get(&self, url: &str, params: Option<&Params>) -> Option<String> {
        self.get_with_charset(url, params, DEFAULT_CHARSET)
    }

    pub fn get_with_charset(
        &self,
        url: &str,
        params: Option<&Params>,
        charset: &str,
    ) -> Option<String> {
        if url.is_empty() {
            return None;
        }
        match self.fetch(url, params, charset) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(%url, error.msg = %e, "GET request failed");
                None
            }
        }
    }

    /// POST `params` as an `application/x-www-form-urlencoded` body.
    pub fn post(&self, url: &str, params: Option<&Params>) -> Result<Option<String>> {
        self.post_with_charset(url, params, DEFAULT_CHARSET)
    }

    pub fn post_with_charset(
        &self,
        url: &str,
        params: Option<&Params>,
        charset: &str,
    ) -> Result<Option<String>> {
        if url.is_empty() {
            return Ok(None);
        }
        let encoding = resolve_charset(charset)?;
        let mut request = self.client.post(url);
        let body = params.and_then(|params| encode_form(params, encoding));
        tracing::debug!(%url, has_body = body.is_some(), "POST");
        if let Some(body) = body {
            request = request
                .header(
                    CONTENT_TYPE,
                    format!("application/x-www-form-urlencoded; charset={}", encoding.name()),
                )
                .body(body);
        }

        let response = request
            .send()
            .map_err(|e| HttpHelperError::Transport(e.to_string()))?;
        let response = ensure_ok(response)?;

        match read_body(response, encoding) {
            Ok(body) => Ok(body),
            Err(e) => {
                tracing::error!(%url, error.msg = %e, "POST response could not be decoded");
                Ok(None)
            }
        }
    }

    fn fetch(&self, url: &str, params: Option<&Params>, charset: &str) -> Result<Option<String>> {
        let encoding = resolve_charset(charset)?;
        let mut url = append_query(url, params, encoding);
        for _ in 0..=MAX_REDIRECTS {
            tracing::debug!(%url, "GET");
            let response = self
                .client
                .get(&url)
                .send()
                .map_err(|e| HttpHelperError::Transport(e.to_string()))?;
            match redirect_target(&response) {
                Some(next) => url = next,
                None => return read_body(ensure_ok(response)?, encoding),
            }
        }
        Err(HttpHelperError::TooManyRedirects(MAX_REDIRECTS))
    }
}

fn init_shared<F>(
    cell: &'static OnceLock<Result<HttpHelper>>,
    build: F,
) -> Result<&'static HttpHelper>
where
    F: FnOnce() -> Result<HttpHelper>,
{
    cell.get_or_init(build).as_ref().map_err(Clone::clone)
}

/// Absolute URL a redirect response points at. `None` for anything that
/// isn't a redirect with a usable `Location`.
fn redirect_target(response: &Response) -> Option<String> {
    match response.status() {
        StatusCode::MOVED_PERMANENTLY
        | StatusCode::FOUND
        | StatusCode::SEE_OTHER
        | StatusCode::TEMPORARY_REDIRECT
        | StatusCode::PERMANENT_REDIRECT => {}
        _ => return None,
    }
    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    response.url().join(location).ok().map(|next| next.to_string())
}

/// Passes a 200 response through. Anything else is dropped without reading
/// the body, which closes the connection instead of returning it to the pool.
fn ensure_ok(response: Response) -> Result<Response> {
    let status = response.status();
    if status != StatusCode::OK {
        drop(response);
        return Err(HttpHelperError::BadStatus(status.as_u16()));
    }
    Ok(response)
}

/// Consumes the response, so its connection is released on every path.
fn read_body(response: Response, encoding: &'static Encoding) -> Result<Option<String>> {
    let body = response
        .text_with_charset(encoding.name())
        .map_err(|e| HttpHelperError::Decode(e.to_string()))?;
    Ok(Some(body).filter(|body| !body.is_empty()))
}
