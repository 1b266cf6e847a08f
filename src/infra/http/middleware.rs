use std::time::Instant;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::application::{error::ErrorReport, page::PageRoute};

const RESPONSE_TARGET: &str = "vitrine::http::response";

#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    pub request_id: Uuid,
}

/// Page a public response answered for. Attached by the page handler so the
/// response log can name the stored slug behind the request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedPage {
    /// `None` for paths that can never name a page.
    pub slug: Option<String>,
}

impl ServedPage {
    pub fn new(route: &PageRoute) -> Self {
        Self {
            slug: route.page_slug().map(str::to_string),
        }
    }

    pub fn attach(self, response: &mut Response) {
        response.extensions_mut().insert(self);
    }
}

pub async fn set_request_context(mut request: Request<Body>, next: Next) -> Response {
    let ctx = RequestContext {
        request_id: Uuid::new_v4(),
    };
    request.extensions_mut().insert(ctx);

    let mut response = next.run(request).await;
    response.extensions_mut().insert(ctx);
    response
}

/// Logs page serves at `debug`, 4xx responses at `warn` and 5xx at `error`.
/// Failures carry the [`ErrorReport`] a handler attached, which is consumed here.
pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let line = ResponseLine {
        method: request.method().clone(),
        path: request.uri().path().to_string(),
        request_id: request
            .extensions()
            .get::<RequestContext>()
            .map(|ctx| ctx.request_id),
        started: Instant::now(),
    };

    let mut response = next.run(request).await;
    let status = response.status();
    let page = response
        .extensions()
        .get::<ServedPage>()
        .map(|served| served.slug.clone().unwrap_or_else(|| "-".to_string()));

    if status.is_client_error() || status.is_server_error() {
        let report = response.extensions_mut().remove::<ErrorReport>();
        line.failure(status, page.as_deref(), report);
    } else if let Some(slug) = page.as_deref() {
        line.page_served(status, slug);
    }

    response
}

struct ResponseLine {
    method: Method,
    path: String,
    request_id: Option<Uuid>,
    started: Instant,
}

impl ResponseLine {
    fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }

    fn request_id(&self) -> String {
        self.request_id.map(|id| id.to_string()).unwrap_or_default()
    }

    fn page_served(&self, status: StatusCode, slug: &str) {
        debug!(
            target = RESPONSE_TARGET,
            status = status.as_u16(),
            path = %self.path,
            page = slug,
            elapsed_ms = self.elapsed_ms(),
            request_id = %self.request_id(),
            "page served",
        );
    }

    fn failure(&self, status: StatusCode, page: Option<&str>, report: Option<ErrorReport>) {
        let (source, messages) = match report {
            Some(report) => (report.source, report.messages),
            None => ("unknown", Vec::new()),
        };
        let detail = messages
            .first()
            .cloned()
            .unwrap_or_else(|| "no diagnostic available".to_string());
        let page = page.unwrap_or("-");

        if status.is_server_error() {
            error!(
                target = RESPONSE_TARGET,
                status = status.as_u16(),
                method = %self.method,
                path = %self.path,
                page = page,
                elapsed_ms = self.elapsed_ms(),
                source = source,
                detail = %detail,
                chain = ?messages,
                request_id = %self.request_id(),
                "request failed",
            );
        } else {
            warn!(
                target = RESPONSE_TARGET,
                status = status.as_u16(),
                method = %self.method,
                path = %self.path,
                page = page,
                elapsed_ms = self.elapsed_ms(),
                source = source,
                detail = %detail,
                request_id = %self.request_id(),
                "client request error",
            );
        }
    }
}
