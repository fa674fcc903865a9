//! HTTP client wrapping `gloo-net` (the browser's `fetch`).

use std::future::Future;

use gloo_net::http::{Request, RequestBuilder};
use wardboard_app::ports::{HttpClient, HttpRequest, HttpResponse, Method, TransportError};

/// Sends requests with `fetch` through `gloo-net`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooHttp;

fn builder_for(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Patch => Request::patch(url),
        Method::Delete => Request::delete(url),
    }
}

fn transport(err: gloo_net::Error) -> TransportError {
    TransportError(err.to_string())
}

impl HttpClient for GlooHttp {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + 'static {
        async move {
            let mut builder = builder_for(request.method, &request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let response = match request.body {
                Some(body) => builder.body(body).map_err(transport)?.send().await,
                None => builder.send().await,
            }
            .map_err(transport)?;

            let status = response.status();
            let body = response.text().await.map_err(transport)?;
            Ok(HttpResponse { status, body })
        }
    }
}
