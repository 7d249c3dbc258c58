use std::net::SocketAddr;

use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;

use stockroom_api::config::ApiConfig;
use stockroom_auth::{Role, SessionClaims};
use stockroom_core::UserId;
use stockroom_observability::LogFiles;

const JWT_SECRET: &str = "test-secret";
const ADMIN_PASSWORD: &str = "admin-pass";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
    _log_dir: tempfile::TempDir,
}

impl TestServer {
    async fn spawn() -> Self {
        let log_dir = tempfile::tempdir().expect("failed to create log dir");
        let config = ApiConfig {
            jwt_secret: JWT_SECRET.to_string(),
            log_dir: log_dir.path().to_path_buf(),
            admin_password: Some(ADMIN_PASSWORD.to_string()),
            ..ApiConfig::default()
        };

        // Same router as prod, bound to an ephemeral port.
        let app = stockroom_api::app::build_app(&config, LogFiles::in_dir(log_dir.path()))
            .await
            .expect("failed to build app");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
                .await
                .unwrap();
        });

        Self {
            base_url,
            handle,
            _log_dir: log_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_jwt(role: Role) -> String {
    let now = Utc::now();
    let claims = SessionClaims {
        sub: UserId::new(99),
        username: format!("{}-user", role.as_str()),
        role,
        issued_at: now,
        expires_at: now + ChronoDuration::minutes(10),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("failed to encode jwt")
}

fn no_redirects() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

async fn create_category(client: &reqwest::Client, srv: &TestServer, token: &str, name: &str) -> i64 {
    let res = client
        .post(srv.url("/api/categorias"))
        .bearer_auth(token)
        .json(&json!({ "nombre": name }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    body["id"].as_i64().unwrap()
}

async fn create_product(
    client: &reqwest::Client,
    srv: &TestServer,
    token: &str,
    name: &str,
    price: &str,
    category: i64,
) -> serde_json::Value {
    let res = client
        .post(srv.url("/api/productos"))
        .bearer_auth(token)
        .json(&json!({
            "nombre": name,
            "descripcion": format!("{name} de prueba"),
            "precio": price,
            "categoria": category,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

async fn record(
    client: &reqwest::Client,
    srv: &TestServer,
    token: &str,
    kind: &str,
    product: i64,
    quantity: i64,
) -> reqwest::Response {
    client
        .post(srv.url("/api/inventarios"))
        .bearer_auth(token)
        .json(&json!({ "tipo": kind, "producto": product, "cantidad": quantity }))
        .send()
        .await
        .unwrap()
}

async fn stock_of(client: &reqwest::Client, srv: &TestServer, token: &str, product: i64) -> i64 {
    let body: serde_json::Value = client
        .get(srv.url(&format!("/api/productos/{product}")))
        .bearer_auth(token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["stock"].as_i64().unwrap()
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for path in ["/whoami", "/api/productos", "/dashboard/empleado", "/export/productos.json"] {
        let res = client.get(srv.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{path}");
    }

    let res = client
        .get(srv.url("/whoami"))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn whoami_is_derived_from_token() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(srv.url("/whoami"))
        .bearer_auth(mint_jwt(Role::Secretary))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["role"], "secretary");
    assert_eq!(body["username"], "secretary-user");
    assert!(body["allowed_views"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn product_crud_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = mint_jwt(Role::Admin);

    let category = create_category(&client, &srv, &token, "Electrónica").await;
    let created = create_product(&client, &srv, &token, "Laptop", "1500", category).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["precio"], "1500.00");
    assert_eq!(created["stock"], 0);

    // Full update keeps stock and rewrites catalog fields.
    let res = client
        .put(srv.url(&format!("/api/productos/{id}")))
        .bearer_auth(&token)
        .json(&json!({ "nombre": "Laptop Pro", "precio": "1800.50", "categoria": category }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["nombre"], "Laptop Pro");
    assert_eq!(body["precio"], "1800.50");

    // Partial update touches only what is sent.
    let res = client
        .patch(srv.url(&format!("/api/productos/{id}")))
        .bearer_auth(&token)
        .json(&json!({ "descripcion": "16GB RAM" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["nombre"], "Laptop Pro");
    assert_eq!(body["descripcion"], "16GB RAM");

    let res = client
        .patch(srv.url(&format!("/api/productos/{id}")))
        .bearer_auth(&token)
        .json(&json!({ "descripcion": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["descripcion"].is_null());
    assert_eq!(body["precio"], "1800.50");

    let list: serde_json::Value = client
        .get(srv.url("/api/productos"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);

    let res = client
        .delete(srv.url(&format!("/api/productos/{id}")))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(srv.url(&format!("/api/productos/{id}")))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(srv.url("/api/productos/abc"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_product_payloads_are_rejected_with_field_messages() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = mint_jwt(Role::Admin);
    let category = create_category(&client, &srv, &token, "Oficina").await;

    let res = client
        .post(srv.url("/api/productos"))
        .bearer_auth(&token)
        .json(&json!({ "nombre": "  ", "precio": "-1", "categoria": category }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["fields"]["nombre"].is_array());
    assert!(body["fields"]["precio"].is_array());

    let res = client
        .post(srv.url("/api/productos"))
        .bearer_auth(&token)
        .json(&json!({ "nombre": "Silla", "precio": "10", "categoria": 999 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["fields"]["categoria"].is_array());
}

#[tokio::test]
async fn malformed_payloads_are_field_errors() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = mint_jwt(Role::Admin);
    let category = create_category(&client, &srv, &token, "Hogar").await;
    let product = create_product(&client, &srv, &token, "Lámpara", "30", category).await;
    let product_id = product["id"].as_i64().unwrap();

    let res = client
        .post(srv.url("/api/productos"))
        .bearer_auth(&token)
        .json(&json!({ "nombre": "Silla", "categoria": category }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["fields"]["precio"][0], "this field is required");

    let res = client
        .post(srv.url("/api/productos"))
        .bearer_auth(&token)
        .json(&json!({ "nombre": "Silla", "precio": "10", "categoria": "uno" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["fields"]["categoria"].is_array());

    let res = record(&client, &srv, &token, "ajuste", product_id, 3).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    let message = body["fields"]["tipo"][0].as_str().unwrap();
    assert!(message.contains("ajuste"), "{message}");

    // Nothing was recorded.
    assert_eq!(stock_of(&client, &srv, &token, product_id).await, 0);
}

#[tokio::test]
async fn stock_follows_movements_and_rejects_oversell() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = mint_jwt(Role::Other);
    let admin = mint_jwt(Role::Admin);

    let category = create_category(&client, &srv, &admin, "Electrónica").await;
    let laptop = create_product(&client, &srv, &token, "Laptop", "1500.00", category).await;
    let id = laptop["id"].as_i64().unwrap();

    let res = record(&client, &srv, &token, "entrada", id, 10).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(stock_of(&client, &srv, &token, id).await, 10);

    let res = record(&client, &srv, &token, "salida", id, 4).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let movement: serde_json::Value = res.json().await.unwrap();
    assert_eq!(movement["tipo"], "salida");
    assert_eq!(movement["cantidad"], 4);
    assert!(movement["fecha_actualizacion"].is_string());
    assert_eq!(stock_of(&client, &srv, &token, id).await, 6);

    let res = record(&client, &srv, &token, "salida", id, 100).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "insufficient_stock");
    assert_eq!(stock_of(&client, &srv, &token, id).await, 6);

    let res = record(&client, &srv, &token, "entrada", id, 0).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let list: serde_json::Value = client
        .get(srv.url("/api/inventarios"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["tipo"], "salida");
    assert_eq!(list[0]["producto_nombre"], "Laptop");
}

#[tokio::test]
async fn movements_are_immutable_and_delete_keeps_stock() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = mint_jwt(Role::Admin);

    let category = create_category(&client, &srv, &token, "Hogar").await;
    let product = create_product(&client, &srv, &token, "Lámpara", "20", category).await;
    let id = product["id"].as_i64().unwrap();

    let movement: serde_json::Value = record(&client, &srv, &token, "entrada", id, 3)
        .await
        .json()
        .await
        .unwrap();
    let movement_id = movement["id"].as_i64().unwrap();

    let res = client
        .put(srv.url(&format!("/api/inventarios/{movement_id}")))
        .bearer_auth(&token)
        .json(&json!({ "tipo": "entrada", "producto": id, "cantidad": 50 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    let res = client
        .delete(srv.url(&format!("/api/inventarios/{movement_id}")))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(stock_of(&client, &srv, &token, id).await, 3);
}

#[tokio::test]
async fn dashboards_follow_the_role_gate() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let admin = mint_jwt(Role::Admin);

    let res = client
        .get(srv.url("/dashboard/empleado"))
        .bearer_auth(mint_jwt(Role::Secretary))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(srv.url("/dashboard/admin"))
        .bearer_auth(mint_jwt(Role::Other))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let category = create_category(&client, &srv, &admin, "Electrónica").await;
    create_product(&client, &srv, &admin, "Laptop", "1500.00", category).await;

    let res = client
        .get(srv.url("/dashboard/empleado"))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["productos"].as_array().unwrap().len(), 1);
    assert_eq!(body["categorias"].as_array().unwrap().len(), 1);
    // Fresh products have zero stock, so they are low on stock.
    assert_eq!(body["productos_bajo_stock"].as_array().unwrap().len(), 1);

    let res = client
        .get(srv.url("/dashboard/admin"))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["inventarios"].is_array());
}

#[tokio::test]
async fn category_writes_require_admin() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/categorias"))
        .bearer_auth(mint_jwt(Role::Other))
        .json(&json!({ "nombre": "Ropa" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(srv.url("/api/categorias"))
        .bearer_auth(mint_jwt(Role::Other))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn exports_return_documents() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = mint_jwt(Role::Admin);

    let category = create_category(&client, &srv, &token, "Electrónica").await;
    create_product(&client, &srv, &token, "Laptop", "1500.00", category).await;
    create_product(&client, &srv, &token, "Mouse", "25.50", category).await;

    let res = client
        .get(srv.url("/export/productos.json"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()["content-disposition"],
        "attachment; filename=\"productos.json\""
    );
    let body: serde_json::Value = res.json().await.unwrap();
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    for key in ["id", "nombre", "precio", "stock", "categoria"] {
        assert!(rows[0].get(key).is_some(), "missing {key}");
    }
    assert_eq!(rows[1]["precio"], json!(25.5));

    let res = client
        .get(srv.url("/export/productos.pdf"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/pdf");
    assert_eq!(
        res.headers()["content-disposition"],
        "inline; filename=\"reporte_productos.pdf\""
    );
    let bytes = res.bytes().await.unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn movement_exports_return_documents() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = mint_jwt(Role::Admin);

    let category = create_category(&client, &srv, &token, "Electrónica").await;
    let product = create_product(&client, &srv, &token, "Laptop", "1500.00", category).await;
    let product_id = product["id"].as_i64().unwrap();
    assert_eq!(record(&client, &srv, &token, "entrada", product_id, 10).await.status(), StatusCode::CREATED);
    assert_eq!(record(&client, &srv, &token, "salida", product_id, 4).await.status(), StatusCode::CREATED);

    let res = client
        .get(srv.url("/export/inventarios.json"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(
        res.headers()["content-disposition"],
        "attachment; filename=\"inventarios.json\""
    );
    let body: serde_json::Value = res.json().await.unwrap();
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    let kinds: Vec<&str> = rows.iter().map(|r| r["tipo"].as_str().unwrap()).collect();
    assert!(kinds.contains(&"entrada"));
    assert!(kinds.contains(&"salida"));
    for row in rows {
        assert_eq!(row["producto"], product_id);
        assert_eq!(row["producto_nombre"], "Laptop");
        assert!(row["fecha_actualizacion"].as_str().unwrap().ends_with('Z'));
    }

    let res = client
        .get(srv.url("/export/inventarios.pdf"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/pdf");
    assert_eq!(
        res.headers()["content-disposition"],
        "inline; filename=\"reporte_inventarios.pdf\""
    );
    let bytes = res.bytes().await.unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn logs_export_as_pdf() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(srv.url("/logs/export.pdf"))
        .bearer_auth(mint_jwt(Role::Secretary))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(srv.url("/logs/export.pdf"))
        .bearer_auth(mint_jwt(Role::Admin))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/pdf");
    assert_eq!(
        res.headers()["content-disposition"],
        "attachment; filename=\"logs.pdf\""
    );
    let bytes = res.bytes().await.unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn logs_are_admin_only() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(srv.url("/logs"))
        .bearer_auth(mint_jwt(Role::Other))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let admin = mint_jwt(Role::Admin);
    let res = client.get(srv.url("/logs")).bearer_auth(&admin).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["general"].is_string());
    assert!(body["errors"].is_string());

    let res = client
        .post(srv.url("/logs/clear"))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(srv.url("/logs/export.json"))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["general"].is_array());
}

#[tokio::test]
async fn login_issues_session_cookie() {
    let srv = TestServer::spawn().await;
    let client = no_redirects();

    let res = client.get(srv.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()["location"], "/login");

    let res = client
        .post(srv.url("/login"))
        .form(&[("username", "admin"), ("password", "wrong")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_credentials");

    let res = client
        .post(srv.url("/login"))
        .form(&[("username", "admin"), ("password", ADMIN_PASSWORD)])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()["location"], "/");
    let cookie = res.headers()["set-cookie"].to_str().unwrap().to_string();
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));
    let session = cookie.split(';').next().unwrap().to_string();

    let res = client
        .get(srv.url("/"))
        .header("cookie", &session)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["productos_bajo_stock"].is_array());

    let res = client
        .get(srv.url("/whoami"))
        .header("cookie", &session)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
async fn json_login_and_logout() {
    let srv = TestServer::spawn().await;
    let client = no_redirects();

    let res = client
        .post(srv.url("/login"))
        .json(&json!({ "username": "admin", "password": ADMIN_PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let token = res.headers()["x-session-token"].to_str().unwrap().to_string();

    let res = client.get(srv.url("/whoami")).bearer_auth(&token).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.post(srv.url("/logout")).bearer_auth(&token).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()["location"], "/login");
    assert!(res.headers()["set-cookie"].to_str().unwrap().contains("Max-Age=0"));
}
