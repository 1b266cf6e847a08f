use std::sync::Arc;

use axum::{
    Form, Router,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware,
    response::Response,
    routing::{get, post},
};

use crate::{
    application::{
        analytics::ViewCounter,
        chrome::ChromeService,
        contact::{ContactError, ContactService},
        error::{ErrorReport, HttpError},
        page::{PageRoute, PageService},
        repos::HealthRepo,
    },
    domain::{error::DomainError, submissions::ContactFormInput},
    presentation::views::{
        ContactResultTemplate, ContactResultView, LayoutContext, PageTemplate,
        render_error_response, render_not_found_response, render_template_response,
    },
};

use super::{
    db_health_response,
    middleware::{ServedPage, log_responses, set_request_context},
};

const CONTACT_SOURCE: &str = "infra::http::public::contact_submit";

#[derive(Clone)]
pub struct HttpState {
    pub pages: Arc<PageService>,
    pub chrome: Arc<ChromeService>,
    pub views: Arc<ViewCounter>,
    pub contact: Arc<ContactService>,
    pub health: Arc<dyn HealthRepo>,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/contact", post(contact_submit))
        .route("/_health/db", get(public_health))
        .fallback(fallback_router)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn index(State(state): State<HttpState>) -> Response {
    serve_page(&state, PageRoute::Root).await
}

async fn fallback_router(State(state): State<HttpState>, request: Request<Body>) -> Response {
    let route = PageRoute::from_path(request.uri().path());
    serve_page(&state, route).await
}

async fn serve_page(state: &HttpState, route: PageRoute) -> Response {
    let mut response = render_page(state, &route).await;
    ServedPage::new(&route).attach(&mut response);
    response
}

async fn render_page(state: &HttpState, route: &PageRoute) -> Response {
    let chrome = state.chrome.load().await;

    match state.pages.resolve(route).await {
        Ok(Some(published)) => {
            // `/home` is `Unroutable` and never reaches this branch.
            if let Some(slug) = route.page_slug() {
                state.views.record_view(slug).await;
            }

            let content = state.pages.page_view(&published);
            let chrome = chrome
                .with_page_meta(
                    &published.page.title,
                    published.page.meta_description.as_deref(),
                )
                .with_active_path(&route.path());
            let view = LayoutContext::new(chrome, content);
            render_template_response(PageTemplate { view }, StatusCode::OK)
        }
        Ok(None) => render_not_found_response(chrome),
        Err(err) => render_error_response(chrome, err),
    }
}

async fn contact_submit(
    State(state): State<HttpState>,
    Form(input): Form<ContactFormInput>,
) -> Response {
    let chrome = state.chrome.load().await.with_page_meta("Contact", None);

    match state.contact.submit(input).await {
        Ok(_) => {
            let view = LayoutContext::new(chrome, ContactResultView::accepted());
            render_template_response(ContactResultTemplate { view }, StatusCode::OK)
        }
        Err(ContactError::Invalid(err)) => {
            let content = match &err {
                DomainError::Validation { field, message } => {
                    ContactResultView::rejected(Some(*field), format!("{field}: {message}"))
                }
                other => ContactResultView::rejected(None, other.to_string()),
            };
            let view = LayoutContext::new(chrome, content);
            let mut response = render_template_response(
                ContactResultTemplate { view },
                StatusCode::UNPROCESSABLE_ENTITY,
            );
            ErrorReport::from_error(CONTACT_SOURCE, StatusCode::UNPROCESSABLE_ENTITY, &err)
                .attach(&mut response);
            response
        }
        Err(ContactError::Repo(err)) => {
            let error = HttpError::repo(CONTACT_SOURCE, "insert_submission", err);
            render_error_response(chrome, error)
        }
    }
}

async fn public_health(State(state): State<HttpState>) -> Response {
    db_health_response(state.health.health_check().await)
}
