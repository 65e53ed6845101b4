use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app_with_state, seed, AppState, Customer, Discount, Location, ADMIN_EMAIL, ADMIN_PASSWORD};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<String> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(body.to_string()).unwrap()
}

fn get(uri: &str, token: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
        .body(String::new())
        .unwrap()
}

/// Log in against `app` and return the access and refresh tokens.
async fn sign_in(app: &Router) -> (String, String) {
    let body = format!(r#"{{"email":"{ADMIN_EMAIL}","password":"{ADMIN_PASSWORD}"}}"#);
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/auth/login", None, &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let tokens: Value = body_json(resp).await;
    (
        tokens["access_token"].as_str().unwrap().to_string(),
        tokens["refresh_token"].as_str().unwrap().to_string(),
    )
}

// --- auth ---

#[tokio::test]
async fn login_with_wrong_password_is_401() {
    let app = app_with_state(AppState::new());
    let resp = app
        .oneshot(json_request(
            "POST",
            "/auth/login",
            None,
            r#"{"email":"admin@courtside.test","password":"nope"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "invalid email or password");
}

#[tokio::test]
async fn missing_bearer_is_401() {
    let app = app_with_state(AppState::new());
    let resp = app
        .oneshot(Request::builder().uri("/locations").body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = body_json(resp).await;
    assert_eq!(body["message"], "token expired");
}

#[tokio::test]
async fn expired_access_token_recovers_through_refresh() {
    let state = AppState::new();
    let app = app_with_state(state.clone());
    let (access, refresh) = sign_in(&app).await;

    state.expire_access_tokens().await;
    let resp = app.clone().oneshot(get("/auth/me", &access)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body = format!(r#"{{"refresh_token":"{refresh}"}}"#);
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/auth/refresh", None, &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let tokens: Value = body_json(resp).await;
    let fresh = tokens["access_token"].as_str().unwrap();

    let resp = app.clone().oneshot(get("/auth/me", fresh)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let me: Value = body_json(resp).await;
    assert_eq!(me["email"], ADMIN_EMAIL);

    // Refresh tokens are single use.
    let resp = app
        .oneshot(json_request("POST", "/auth/refresh", None, &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let err: Value = body_json(resp).await;
    assert_eq!(err["detail"], "refresh token revoked");
}

// --- locations ---

#[tokio::test]
async fn location_lifecycle() {
    let app = app_with_state(AppState::new());
    let (token, _) = sign_in(&app).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/locations",
            Some(&token),
            r#"{"name":"Eastside","address":"9 River Rd"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Location = body_json(resp).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/locations/{}", created.id),
            Some(&token),
            r#"{"name":"Eastside Annex","address":"9 River Rd"}"#,
        ))
        .await
        .unwrap();
    let updated: Location = body_json(resp).await;
    assert_eq!(updated.name, "Eastside Annex");

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/locations/{}", created.id))
                .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    let resp = app
        .oneshot(get(&format!("/locations/{}", created.id), &token))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body["message"], "not found");
}

#[tokio::test]
async fn blank_location_name_is_400() {
    let app = app_with_state(AppState::new());
    let (token, _) = sign_in(&app).await;
    let resp = app
        .oneshot(json_request(
            "POST",
            "/locations",
            Some(&token),
            r#"{"name":"  ","address":"x"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- customers ---

#[tokio::test]
async fn customers_filter_by_repeated_location_ids_and_search() {
    let app = app_with_state(AppState::new());
    let (token, _) = sign_in(&app).await;

    let uri = format!(
        "/customers?location_ids={}&location_ids={}",
        seed::DOWNTOWN,
        seed::NORTHSIDE
    );
    let resp = app.clone().oneshot(get(&uri, &token)).await.unwrap();
    let all: Vec<Customer> = body_json(resp).await;
    assert_eq!(all.len(), 3);

    let uri = format!("/customers?search=DIAZ&location_ids={}", seed::DOWNTOWN);
    let resp = app.clone().oneshot(get(&uri, &token)).await.unwrap();
    let found: Vec<Customer> = body_json(resp).await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, seed::CARA);

    let resp = app
        .oneshot(get("/customers?search=ana%20lopez", &token))
        .await
        .unwrap();
    let found: Vec<Customer> = body_json(resp).await;
    assert_eq!(found[0].id, seed::ANA);
}

// --- discounts ---

#[tokio::test]
async fn duplicate_discount_code_is_409() {
    let app = app_with_state(AppState::new());
    let (token, _) = sign_in(&app).await;
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/discounts",
            Some(&token),
            r#"{"code":"welcome10","name":"Again","discount_percent":5,"is_active":true}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "discount code already exists");

    let resp = app.oneshot(get("/discounts?active=true", &token)).await.unwrap();
    let discounts: Vec<Discount> = body_json(resp).await;
    assert_eq!(discounts.len(), 1);
}

// --- games ---

#[tokio::test]
async fn game_with_inverted_times_is_422_with_detail() {
    let app = app_with_state(AppState::new());
    let (token, _) = sign_in(&app).await;
    let body = format!(
        r#"{{"home_team_id":"{}","away_team_id":"{}","location_id":"{}",
            "start_time":"2026-03-01T19:00:00Z","end_time":"2026-03-01T18:00:00Z"}}"#,
        seed::HAWKS,
        seed::OWLS,
        seed::DOWNTOWN
    );
    let resp = app
        .oneshot(json_request("POST", "/games", Some(&token), &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let err: Value = body_json(resp).await;
    assert_eq!(err["detail"], "end time must be after start time");
}

#[tokio::test]
async fn game_resolves_display_names() {
    let app = app_with_state(AppState::new());
    let (token, _) = sign_in(&app).await;
    let body = format!(
        r#"{{"home_team_id":"{}","away_team_id":"{}","location_id":"{}","court_id":"{}",
            "start_time":"2026-03-01T18:00:00Z","end_time":"2026-03-01T19:00:00Z"}}"#,
        seed::HAWKS,
        seed::OWLS,
        seed::DOWNTOWN,
        seed::COURT_ONE
    );
    let resp = app
        .oneshot(json_request("POST", "/games", Some(&token), &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let game: Value = body_json(resp).await;
    assert_eq!(game["home_team_name"], "Hawks");
    assert_eq!(game["court_name"], "Court 1");
    assert_eq!(game["status"], "scheduled");
}

// --- collections ---

#[tokio::test]
async fn attempt_on_unknown_invoice_nests_message_under_error() {
    let app = app_with_state(AppState::new());
    let (token, _) = sign_in(&app).await;
    let resp = app
        .oneshot(json_request(
            "POST",
            &format!("/collections/{}/attempts", uuid::Uuid::nil()),
            Some(&token),
            r#"{"method":"phone"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let err: Value = body_json(resp).await;
    assert_eq!(err["error"]["message"], "invoice not found");
}

// --- misc ---

#[tokio::test]
async fn legacy_health_redirects() {
    let app = app_with_state(AppState::new());
    let resp = app
        .oneshot(Request::builder().uri("/legacy/health").body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers()[http::header::LOCATION], "/health");
}

#[tokio::test]
async fn upload_echoes_multipart_fields() {
    let app = app_with_state(AppState::new());
    let body = "--XYZ\r\n\
        Content-Disposition: form-data; name=\"title\"\r\n\r\n\
        Spring league\r\n\
        --XYZ\r\n\
        Content-Disposition: form-data; name=\"logo\"; filename=\"logo.png\"\r\n\
        Content-Type: image/png\r\n\r\n\
        PNGDATA\r\n\
        --XYZ--\r\n";
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/uploads")
                .header(http::header::CONTENT_TYPE, "multipart/form-data; boundary=XYZ")
                .body(body.to_string())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Value = body_json(resp).await;
    let fields = echo["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0]["name"], "title");
    assert_eq!(fields[0]["text"], "Spring league");
    assert_eq!(fields[1]["file_name"], "logo.png");
    assert_eq!(fields[1]["content_type"], "image/png");
    assert_eq!(fields[1]["size"], 7);
}

// --- events ---

#[tokio::test]
async fn events_filter_by_encoded_rfc3339_window() {
    let app = app_with_state(AppState::new());
    let (token, _) = sign_in(&app).await;
    let uri = format!(
        "/events?after=2026-05-01T00%3A00%3A00%2B00%3A00&before=2026-06-01T00%3A00%3A00%2B00%3A00&location_id={}",
        seed::DOWNTOWN
    );
    let resp = app.oneshot(get(&uri, &token)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let events: Vec<Value> = body_json(resp).await;
    let ids: Vec<&str> = events.iter().map(|e| e["id"].as_str().unwrap()).collect();
    assert_eq!(ids.len(), 2);
    assert!(!ids.contains(&seed::NORTH_LEAGUE.to_string().as_str()));
}

#[tokio::test]
async fn malformed_window_is_422() {
    let app = app_with_state(AppState::new());
    let (token, _) = sign_in(&app).await;
    let resp = app.oneshot(get("/events?after=yesterday", &token)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let err: Value = body_json(resp).await;
    assert_eq!(err["detail"], "invalid after: yesterday");
}

#[tokio::test]
async fn event_delete_confirms_with_body() {
    let app = app_with_state(AppState::new());
    let (token, _) = sign_in(&app).await;
    let resp = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/events/{}", seed::OPEN_GYM))
                .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["message"], "deleted");
}

// --- staff ---

#[tokio::test]
async fn staff_patch_only_touches_given_fields() {
    let app = app_with_state(AppState::new());
    let (token, _) = sign_in(&app).await;
    let resp = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/staff/{}", seed::DANA),
            Some(&token),
            r#"{"is_active":false}"#,
        ))
        .await
        .unwrap();
    let member: Value = body_json(resp).await;
    assert_eq!(member["is_active"], false);
    assert_eq!(member["role"], "coach");

    let resp = app.oneshot(get("/staff?role=front_desk", &token)).await.unwrap();
    let staff: Vec<Value> = body_json(resp).await;
    assert_eq!(staff.len(), 1);
    assert_eq!(staff[0]["first_name"], "Eli");
}

// --- membership plans ---

#[tokio::test]
async fn plans_of_unknown_membership_are_404() {
    let app = app_with_state(AppState::new());
    let (token, _) = sign_in(&app).await;
    let resp = app
        .oneshot(get(&format!("/memberships/{}/plans", uuid::Uuid::nil()), &token))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
