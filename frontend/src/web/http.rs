//! 浏览器 fetch 客户端
//!
//! 基于 `gloo-net`，超时通过与 `gloo-timers` 的计时器竞速实现。

use campus_energy::request::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};
use futures::future::{Either, select};
use gloo_net::http::{Method, RequestBuilder};
use gloo_timers::future::TimeoutFuture;

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

impl FetchHttpClient {
    pub fn new() -> Self {
        Self
    }
}

fn method(m: HttpMethod) -> Method {
    match m {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

async fn fetch(req: HttpRequest) -> Result<HttpResponse, HttpError> {
    let mut builder = RequestBuilder::new(&req.url)
        .method(method(req.method))
        .query(req.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    for (k, v) in &req.headers {
        builder = builder.header(k, v);
    }

    let request = match req.body {
        Some(body) => builder.body(body),
        None => builder.build(),
    }
    .map_err(|e| HttpError::RequestBuildFailed(e.to_string()))?;

    let resp = request
        .send()
        .await
        .map_err(|e| HttpError::NetworkError(e.to_string()))?;

    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| HttpError::ResponseParseFailed(e.to_string()))?;

    Ok(HttpResponse { status, body })
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let timeout = req.timeout;
        let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);

        match select(Box::pin(fetch(req)), Box::pin(TimeoutFuture::new(millis))).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => {
                tracing::warn!(?timeout, "request timed out");
                Err(HttpError::Timeout(timeout))
            }
        }
    }
}
