//! In-process marketplace backend used by the integration tests.

#![allow(dead_code)]

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::routing::{any, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

#[derive(Clone, Default)]
pub struct BackendOptions {
    pub fail_providers: bool,
}

pub async fn spawn_backend(options: BackendOptions) -> String {
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/meals", get(meals))
        .route("/api/providers", get(providers))
        .route("/api/echo", any(echo))
        .route("/api/broken", get(broken))
        .route("/api/plain", get(plain))
        .route("/api/odd-error", get(odd_error))
        .with_state(options);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake backend");
    let addr = listener.local_addr().expect("fake backend address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake backend crashed");
    });

    format!("http://{addr}")
}

fn user_for(email: &str) -> Option<Value> {
    let (id, name, role) = match email {
        "provider@foodhub.test" => (2, "Mario", "PROVIDER"),
        "admin@foodhub.test" => (3, "Root", "ADMIN"),
        "customer@foodhub.test" => (4, "Peach", "CUSTOMER"),
        _ => return None,
    };
    Some(json!({ "id": id, "name": name, "role": role }))
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    match user_for(email) {
        Some(user) if password == "correct horse" => (
            StatusCode::OK,
            Json(json!({ "token": format!("token-for-{email}"), "user": user })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid credentials" })),
        ),
    }
}

async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    match body["email"].as_str().unwrap_or_default() {
        "taken@foodhub.test" => (
            StatusCode::CONFLICT,
            Json(json!({ "error": "Email already registered" })),
        ),
        "" => (StatusCode::BAD_REQUEST, Json(json!({}))),
        _ => (
            StatusCode::CREATED,
            Json(json!({ "message": "User created", "role": body["role"] })),
        ),
    }
}

fn meal(id: i64, name: &str, price: &str, provider: Option<(i64, &str)>) -> Value {
    let mut meal = json!({
        "id": id,
        "name": name,
        "description": "",
        "price": price,
        "categoryId": 1,
        "providerId": provider.map(|(pid, _)| pid).unwrap_or(1),
    });
    if let Some((pid, pname)) = provider {
        meal["provider"] = json!({ "id": pid, "user": { "name": pname } });
    }
    meal
}

async fn meals() -> Json<Value> {
    Json(json!([
        meal(1, "Pepperoni Pizza", "12.50", Some((10, "Luigi's"))),
        meal(2, "Cheeseburger", "8.00", Some((11, "Burger Barn"))),
        meal(3, "Salmon Nigiri", "15.25", None),
        meal(4, "Veggie Burger", "9.99", None),
        meal(5, "Tiramisu", "6.00", Some((10, "Luigi's"))),
    ]))
}

async fn providers(State(options): State<BackendOptions>) -> (StatusCode, Json<Value>) {
    if options.fail_providers {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "Providers unavailable" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!([
            { "id": 10, "user": { "name": "Luigi's" } },
            { "id": 11, "user": { "name": "Burger Barn" } },
            { "id": 12, "user": { "name": "Sushi Go" } },
            { "id": 13, "user": { "name": "Green Bowl" } },
        ])),
    )
}

async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Value> {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    Json(json!({
        "method": method.as_str(),
        "content_type": header_value(header::CONTENT_TYPE),
        "authorization": header_value(header::AUTHORIZATION),
        "body": body,
    }))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}

async fn plain() -> &'static str {
    "hello"
}

async fn odd_error() -> (StatusCode, Json<Value>) {
    (StatusCode::IM_A_TEAPOT, Json(json!({ "error": { "code": 418 } })))
}
