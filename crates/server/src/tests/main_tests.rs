use super::*;
use crate::tests_support::state;
use axum::{body, body::Body, http::Request, response::Response};
use shared::protocol::{PanelStatus, Trace};
use tower::ServiceExt;

const BODY_LIMIT: usize = 64 * 1024;

fn test_app() -> Router {
    build_router(Arc::new(state()), BODY_LIMIT)
}

async fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

fn post_json(uri: &str, value: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(value.to_string()))
        .expect("request")
}

#[test]
fn log_filter_setting_must_parse() {
    assert!(env_filter("info").is_ok());
    assert!(env_filter("server=debug,tower_http=warn").is_ok());

    let err = env_filter("server=loudest").expect_err("unknown level");
    assert!(err.to_string().contains("invalid log_filter setting 'server=loudest'"));
}

#[tokio::test]
async fn healthz_reports_ok() {
    let request = Request::get("/healthz")
        .body(Body::empty())
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn index_serves_the_dashboard_page() {
    let request = Request::get("/").body(Body::empty()).expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let html = String::from_utf8(body.to_vec()).expect("utf8");
    assert!(html.contains("Disease Death Rate Dashboard"));
    for kind in shared::domain::PanelKind::ALL {
        assert!(html.contains(kind.as_str()), "missing panel {kind}");
    }
}

#[tokio::test]
async fn options_list_selectors_and_defaults() {
    let request = Request::get("/api/options")
        .body(Body::empty())
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let options: ControlOptions = json_body(response).await;
    assert_eq!(options.measures.len(), 4);
    assert_eq!(options.states, vec!["Alabama", "Alaska", "United States"]);
    assert_eq!(options.years, vec![2020]);
    assert_eq!(options.range_slider.min, 0.0);
    assert_eq!(options.range_slider.max, 5000.0);
    assert_eq!(options.defaults.scatter_matrix.state, "United States");
}

#[tokio::test]
async fn panel_is_idle_until_first_update() {
    let app = test_app();
    let request = Request::get("/api/panels/time-series")
        .body(Body::empty())
        .expect("request");
    let view: PanelView = json_body(app.clone().oneshot(request).await.expect("response")).await;
    assert_eq!(view.status, PanelStatus::Idle);
    assert!(view.figure.is_none());

    let update = post_json(
        "/api/panels/time-series/update",
        serde_json::json!({ "measure": "COVID-19 Deaths", "state": "Alabama" }),
    );
    let response = app.clone().oneshot(update).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let view: PanelView = json_body(response).await;
    assert_eq!(view.status, PanelStatus::Rendered);
    assert_eq!(view.clicks, 1);
    let figure = view.figure.expect("figure");
    assert_eq!(
        figure.layout.title.text,
        "COVID-19 Deaths in Alabama Over Time"
    );
    let Trace::Scatter(line) = &figure.data[0] else {
        panic!("expected a line trace");
    };
    assert_eq!(line.y[0], Some(10.0));

    let request = Request::get("/api/panels/time-series")
        .body(Body::empty())
        .expect("request");
    let view: PanelView = json_body(app.oneshot(request).await.expect("response")).await;
    assert_eq!(view.status, PanelStatus::Rendered);
}

#[tokio::test]
async fn malformed_range_keeps_previous_figure() {
    let app = test_app();
    let good = post_json(
        "/api/panels/box-violin/update",
        serde_json::json!({ "measure": "Total Deaths", "state": "Alabama", "range": [0, 5000] }),
    );
    let first: PanelView = json_body(app.clone().oneshot(good).await.expect("response")).await;
    assert_eq!(first.status, PanelStatus::Rendered);

    let bad = post_json(
        "/api/panels/box-violin/update",
        serde_json::json!({ "measure": "Total Deaths", "state": "Alabama", "range": [0] }),
    );
    let response = app.oneshot(bad).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let second: PanelView = json_body(response).await;
    assert_eq!(second.clicks, 2);
    assert_eq!(second.figure, first.figure);
}

#[tokio::test]
async fn null_range_counts_the_click_without_rendering() {
    let app = test_app();
    let update = post_json(
        "/api/panels/box-violin/update",
        serde_json::json!({ "measure": "Total Deaths", "state": "Alabama", "range": null }),
    );
    let response = app.clone().oneshot(update).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let view: PanelView = json_body(response).await;
    assert_eq!(view.clicks, 1);
    assert_eq!(view.status, PanelStatus::Idle);
    assert!(view.figure.is_none());

    let good = post_json(
        "/api/panels/box-violin/update",
        serde_json::json!({ "measure": "Total Deaths", "state": "Alabama", "range": [0, 5000] }),
    );
    let rendered: PanelView = json_body(app.clone().oneshot(good).await.expect("response")).await;
    assert_eq!(rendered.status, PanelStatus::Rendered);

    let scalar = post_json(
        "/api/panels/box-violin/update",
        serde_json::json!({ "measure": "Total Deaths", "state": "Alabama", "range": 5000 }),
    );
    let response = app.oneshot(scalar).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let view: PanelView = json_body(response).await;
    assert_eq!(view.clicks, 3);
    assert_eq!(view.figure, rendered.figure);
}

#[tokio::test]
async fn sparse_scatter_matrix_returns_placeholder() {
    let update = post_json(
        "/api/panels/scatter-matrix/update",
        serde_json::json!({ "state": "Alaska", "year": 2020 }),
    );
    let view: PanelView =
        json_body(test_app().oneshot(update).await.expect("response")).await;
    let figure = view.figure.expect("figure");
    assert!(figure.is_placeholder());
    assert_eq!(figure.layout.title.text, "Not enough data available");
}

#[tokio::test]
async fn heatmap_update_excludes_national_row() {
    let update = post_json(
        "/api/panels/heatmap/update",
        serde_json::json!({ "measure": "Total Deaths" }),
    );
    let view: PanelView =
        json_body(test_app().oneshot(update).await.expect("response")).await;
    let figure = view.figure.expect("figure");
    let Trace::Heatmap(heatmap) = &figure.data[0] else {
        panic!("expected a heatmap trace");
    };
    assert_eq!(heatmap.x, vec!["Alabama", "Alaska"]);
    assert_eq!(heatmap.colorscale, "Reds");
}

#[tokio::test]
async fn unknown_panel_is_not_found() {
    let request = Request::get("/api/panels/pie-chart")
        .body(Body::empty())
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ApiError = json_body(response).await;
    assert_eq!(error.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn controls_for_the_wrong_shape_are_rejected() {
    let update = post_json(
        "/api/panels/heatmap/update",
        serde_json::json!({ "measure": "Measles Deaths" }),
    );
    let response = test_app().oneshot(update).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: ApiError = json_body(response).await;
    assert_eq!(error.code, ErrorCode::Validation);
}
