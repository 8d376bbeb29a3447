use super::log_request;
use crate::{
    app::AppError,
    config::{RedirectConfig, RedirectMode},
};
use axum::{
    extract::State,
    http::{header, StatusCode},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tera::{Context, Tera};

const NOTICE_TEMPLATE: &str = "notice.html";

#[derive(Debug)]
struct RedirectTarget {
    url: String,
    mode: RedirectMode,
    /// the rendered "we've moved" page, served in notice mode
    notice: String,
}

/// routes for a retired deployment. every path except the health check
/// sends the visitor to `target_url`, either with a 301 or a notice page
/// that refreshes after `delay_secs`.
pub fn redirect_routes(config: &RedirectConfig) -> Result<Router, AppError> {
    let target = RedirectTarget {
        url: config.target_url.clone(),
        mode: config.mode,
        notice: notice_page(&config.target_url, config.delay_secs)?,
    };
    let router = Router::new()
        .route(&config.health_path, get(|| async { "ok" }))
        .fallback(redirect)
        .layer(middleware::from_fn(log_request))
        .with_state(Arc::new(target));
    Ok(router)
}

async fn redirect(State(target): State<Arc<RedirectTarget>>) -> Response {
    match target.mode {
        // explicit 301. Redirect::permanent answers with 308
        RedirectMode::Permanent => (
            StatusCode::MOVED_PERMANENTLY,
            [(header::LOCATION, target.url.clone())],
        )
            .into_response(),
        RedirectMode::Notice => Html(target.notice.clone()).into_response(),
    }
}

/// renders `assets/notice.html`. tera escapes values in `.html` templates.
fn notice_page(url: &str, delay_secs: u64) -> Result<String, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template(NOTICE_TEMPLATE, include_str!("../../assets/notice.html"))?;
    let mut context = Context::new();
    context.insert("url", url);
    context.insert("delay_secs", &delay_secs);
    tera.render(NOTICE_TEMPLATE, &context)
}
