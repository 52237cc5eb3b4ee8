use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use tower::Service;

use server::startup::build_app;

fn form_post(uri: &str, body: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))?)
}

fn get(uri: &str, cookie: Option<&str>) -> anyhow::Result<Request<Body>> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    Ok(builder.body(Body::empty())?)
}

fn location(resp: &Response) -> Option<String> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

/// `flash=<value>` pair from the response's Set-Cookie headers.
fn flash_cookie(resp: &Response) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("flash=") && !v.starts_with("flash=;"))
        .and_then(|v| v.split(';').next())
        .map(|s| s.to_string())
}

async fn body_text(resp: Response) -> anyhow::Result<String> {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// Submit a form, assert the redirect target, then render the list page with
/// the flash cookie and return its HTML.
async fn submit(app: &mut Router, uri: &str, body: &str, expect_location: &str) -> anyhow::Result<String> {
    let resp = app.call(form_post(uri, body)?).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER, "POST {uri}");
    assert_eq!(location(&resp).as_deref(), Some(expect_location), "POST {uri}");
    let cookie = flash_cookie(&resp);
    assert!(cookie.is_some(), "POST {uri} set no flash");
    let resp = app.call(get(expect_location, cookie.as_deref())?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    body_text(resp).await
}

#[tokio::test]
async fn health_and_metrics_respond() -> anyhow::Result<()> {
    let mut app = build_app();
    let resp = app.call(get("/health", None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(resp).await?)?;
    assert_eq!(body["status"], "ok");

    common::metrics::init();
    let resp = app.call(get("/metrics", None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await?.contains("warehouse_created_total"));
    Ok(())
}

#[tokio::test]
async fn empty_list_renders() -> anyhow::Result<()> {
    let mut app = build_app();
    let resp = app.call(get("/", None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await?;
    assert!(html.contains("No warehouses yet."));
    Ok(())
}

#[tokio::test]
async fn create_add_take_edit_delete_flow() -> anyhow::Result<()> {
    let mut app = build_app();

    let html = submit(&mut app, "/create", "name=Juice&capacity=10&initial_balance=5", "/").await?;
    assert!(html.contains(r#"Warehouse &quot;Juice&quot; created successfully"#));
    assert!(html.contains(r#"href="/edit/1""#));

    let resp = app.call(get("/take/1", None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await?.contains("balance = 5, space = 5"));

    let html = submit(&mut app, "/add/1", "amount=3", "/").await?;
    assert!(html.contains(r#"Added 3 items to warehouse &quot;Juice&quot;"#));
    assert!(html.contains("<td>8</td>"));

    let html = submit(&mut app, "/take/1", "amount=20", "/").await?;
    assert!(html.contains(r#"Took 8 items from warehouse &quot;Juice&quot;"#));

    let html = submit(&mut app, "/edit/1", "name=Apple+juice", "/").await?;
    assert!(html.contains(r#"Warehouse &quot;Apple juice&quot; updated successfully"#));

    let html = submit(&mut app, "/delete/1", "", "/").await?;
    assert!(html.contains(r#"Warehouse &quot;Apple juice&quot; deleted successfully"#));
    assert!(html.contains("No warehouses yet."));
    Ok(())
}

#[tokio::test]
async fn deposit_over_capacity_is_clamped() -> anyhow::Result<()> {
    let mut app = build_app();
    submit(&mut app, "/create", "name=Beer&capacity=10", "/").await?;
    submit(&mut app, "/add/1", "amount=11", "/").await?;

    let resp = app.call(get("/add/1", None)?).await?;
    assert!(body_text(resp).await?.contains("balance = 10, space = 0"));
    Ok(())
}

#[tokio::test]
async fn create_validation_redirects_back_to_form() -> anyhow::Result<()> {
    let mut app = build_app();

    let html = submit(&mut app, "/create", "name=&capacity=10", "/create").await?;
    assert!(html.contains("Warehouse name is required"));

    let html = submit(&mut app, "/create", "name=X&capacity=0", "/create").await?;
    assert!(html.contains("Capacity must be greater than 0"));

    let html = submit(&mut app, "/create", "name=X", "/create").await?;
    assert!(html.contains("Capacity must be greater than 0"));

    let html = submit(&mut app, "/create", "name=X&capacity=ten", "/create").await?;
    assert!(html.contains("Invalid capacity or initial balance. Please enter valid numbers"));

    let html = submit(&mut app, "/create", "name=X&capacity=5&initial_balance=", "/create").await?;
    assert!(html.contains("Invalid capacity or initial balance. Please enter valid numbers"));

    let resp = app.call(get("/", None)?).await?;
    assert!(body_text(resp).await?.contains("No warehouses yet."));

    // nothing was stored, so the first real warehouse still gets id 1
    submit(&mut app, "/create", "name=Real&capacity=1", "/").await?;
    let resp = app.call(get("/edit/1", None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn amount_validation_keeps_state() -> anyhow::Result<()> {
    let mut app = build_app();
    submit(&mut app, "/create", "name=Beer&capacity=10&initial_balance=4", "/").await?;

    let html = submit(&mut app, "/add/1", "amount=0", "/add/1").await?;
    assert!(html.contains("Amount must be greater than 0"));

    let html = submit(&mut app, "/take/1", "amount=-2", "/take/1").await?;
    assert!(html.contains("Amount must be greater than 0"));

    let html = submit(&mut app, "/take/1", "amount=lots", "/take/1").await?;
    assert!(html.contains("Invalid amount. Please enter a valid number"));
    assert!(html.contains("balance = 4, space = 6"));

    let html = submit(&mut app, "/edit/1", "name=+++", "/edit/1").await?;
    assert!(html.contains("Warehouse name is required"));
    assert!(html.contains(r#"value="Beer""#));
    Ok(())
}

#[tokio::test]
async fn unknown_ids_redirect_to_list() -> anyhow::Result<()> {
    let mut app = build_app();

    for uri in ["/edit/9", "/add/9", "/take/9"] {
        let resp = app.call(get(uri, None)?).await?;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "GET {uri}");
        assert_eq!(location(&resp).as_deref(), Some("/"));
    }

    let html = submit(&mut app, "/add/9", "amount=garbage", "/").await?;
    assert!(html.contains("Warehouse not found"));

    let html = submit(&mut app, "/delete/9", "", "/").await?;
    assert!(html.contains("Warehouse not found"));
    Ok(())
}

#[tokio::test]
async fn deleted_ids_are_not_reused() -> anyhow::Result<()> {
    let mut app = build_app();
    submit(&mut app, "/create", "name=A&capacity=1", "/").await?;
    submit(&mut app, "/create", "name=B&capacity=1", "/").await?;
    submit(&mut app, "/delete/2", "", "/").await?;
    let html = submit(&mut app, "/create", "name=C&capacity=1", "/").await?;
    assert!(html.contains(r#"href="/edit/3""#));
    assert!(!html.contains(r#"href="/edit/2""#));
    Ok(())
}

#[tokio::test]
async fn delete_requires_post() -> anyhow::Result<()> {
    let mut app = build_app();
    let resp = app.call(get("/delete/1", None)?).await?;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    Ok(())
}
