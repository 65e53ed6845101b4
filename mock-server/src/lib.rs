//! In-memory stand-in for the facility backend.
//!
//! Serves the subset of endpoints the client's integration tests exercise,
//! with the same inconsistent error shapes the real backend uses (`error`,
//! `error.message`, `message`, `detail`). Data is seeded with fixed ids from
//! [`seed`] so tests can refer to it directly.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, RawQuery, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::Redirect,
    routing::{get, patch, post, put},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const ADMIN_EMAIL: &str = "admin@courtside.test";
pub const ADMIN_PASSWORD: &str = "courtside";

/// Fixed ids of the seeded records.
pub mod seed {
    use uuid::Uuid;

    pub const DOWNTOWN: Uuid = Uuid::from_u128(0x10);
    pub const NORTHSIDE: Uuid = Uuid::from_u128(0x11);
    pub const HAWKS: Uuid = Uuid::from_u128(0x20);
    pub const OWLS: Uuid = Uuid::from_u128(0x21);
    pub const COURT_ONE: Uuid = Uuid::from_u128(0x30);
    pub const COURT_TWO: Uuid = Uuid::from_u128(0x31);
    pub const ANA: Uuid = Uuid::from_u128(0x40);
    pub const BEN: Uuid = Uuid::from_u128(0x41);
    pub const CARA: Uuid = Uuid::from_u128(0x42);
    pub const GOLD: Uuid = Uuid::from_u128(0x50);
    pub const SILVER: Uuid = Uuid::from_u128(0x51);
    pub const WELCOME: Uuid = Uuid::from_u128(0x60);
    pub const BEN_INVOICE: Uuid = Uuid::from_u128(0x70);
    pub const CARA_INVOICE: Uuid = Uuid::from_u128(0x71);
    pub const OPEN_GYM: Uuid = Uuid::from_u128(0x80);
    pub const YOUTH_CLINIC: Uuid = Uuid::from_u128(0x81);
    pub const NORTH_LEAGUE: Uuid = Uuid::from_u128(0x82);
    pub const DANA: Uuid = Uuid::from_u128(0x90);
    pub const ELI: Uuid = Uuid::from_u128(0x91);
    pub const GOLD_MONTHLY: Uuid = Uuid::from_u128(0xA0);
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub address: String,
}

#[derive(Deserialize)]
pub struct LocationInput {
    pub name: String,
    pub address: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Court {
    pub id: Uuid,
    pub name: String,
    pub location_id: Uuid,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub membership_name: Option<String>,
    pub membership_status: Option<String>,
    #[serde(skip)]
    pub location_id: Uuid,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Membership {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MembershipPlan {
    pub id: Uuid,
    pub membership_id: Uuid,
    pub name: String,
    pub price_cents: i64,
    pub billing_period: String,
    pub stripe_price_id: Option<String>,
}

#[derive(Deserialize)]
pub struct PlanInput {
    pub name: String,
    pub price_cents: i64,
    pub billing_period: String,
    pub stripe_price_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub program_name: Option<String>,
    pub location_id: Uuid,
    pub location_name: Option<String>,
    pub court_id: Option<Uuid>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub capacity: Option<u32>,
    pub enrolled: u32,
}

#[derive(Deserialize)]
pub struct EventInput {
    pub program_name: Option<String>,
    pub location_id: Uuid,
    pub court_id: Option<Uuid>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub capacity: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
}

#[derive(Deserialize)]
pub struct StaffInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
}

#[derive(Deserialize)]
pub struct StaffPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Discount {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub discount_percent: Option<u32>,
    pub discount_amount_cents: Option<i64>,
    pub max_redemptions: Option<u32>,
    pub times_redeemed: u32,
    pub is_active: bool,
}

#[derive(Deserialize)]
pub struct DiscountInput {
    pub code: String,
    pub name: String,
    pub discount_percent: Option<u32>,
    pub discount_amount_cents: Option<i64>,
    pub max_redemptions: Option<u32>,
    pub is_active: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    pub home_team_id: Uuid,
    pub home_team_name: String,
    pub away_team_id: Uuid,
    pub away_team_name: String,
    pub location_id: Uuid,
    pub location_name: String,
    pub court_id: Option<Uuid>,
    pub court_name: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: String,
}

#[derive(Deserialize)]
pub struct GameInput {
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub location_id: Uuid,
    pub court_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub amount_due_cents: i64,
    pub due_date: NaiveDate,
    pub attempts: u32,
    pub status: String,
}

#[derive(Deserialize)]
pub struct AttemptInput {
    pub method: String,
}

#[derive(Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RefreshInput {
    pub refresh_token: String,
}

#[derive(Default)]
struct Store {
    access_tokens: HashSet<String>,
    refresh_tokens: HashSet<String>,
    locations: Vec<Location>,
    teams: Vec<Team>,
    courts: Vec<Court>,
    customers: Vec<Customer>,
    memberships: Vec<Membership>,
    plans: Vec<MembershipPlan>,
    events: Vec<Event>,
    staff: Vec<StaffMember>,
    discounts: Vec<Discount>,
    games: Vec<Game>,
    invoices: Vec<Invoice>,
}

/// Shared server state. Cloning shares the same store, so tests can keep a
/// handle and poke at it while the server runs.
#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<Store>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(seeded())),
        }
    }

    /// Invalidate every access token; refresh tokens stay valid.
    pub async fn expire_access_tokens(&self) {
        self.store.write().await.access_tokens.clear();
    }

    /// Invalidate every token.
    pub async fn revoke_all_tokens(&self) {
        let mut store = self.store.write().await;
        store.access_tokens.clear();
        store.refresh_tokens.clear();
    }
}

fn seeded() -> Store {
    use seed::*;
    let customer = |id, first: &str, last: &str, location_id, plan: Option<(&str, &str)>| Customer {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
        phone: None,
        membership_name: plan.map(|(name, _)| name.to_string()),
        membership_status: plan.map(|(_, status)| status.to_string()),
        location_id,
    };
    let at = |month, day, hour| {
        Utc.with_ymd_and_hms(2026, month, day, hour, 0, 0)
            .single()
            .unwrap_or_default()
    };
    let event = |id, name: Option<&str>, location_id, location: &str, start: DateTime<Utc>| Event {
        id,
        program_name: name.map(str::to_string),
        location_id,
        location_name: Some(location.to_string()),
        court_id: None,
        start_at: start,
        end_at: start + chrono::Duration::hours(1),
        capacity: name.map(|_| 12),
        enrolled: 4,
    };
    let staff = |id, first: &str, last: &str, role: &str| StaffMember {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@courtside.test", first.to_lowercase()),
        role: role.to_string(),
        is_active: true,
    };
    Store {
        plans: vec![MembershipPlan {
            id: GOLD_MONTHLY,
            membership_id: GOLD,
            name: "Gold monthly".to_string(),
            price_cents: 4900,
            billing_period: "monthly".to_string(),
            stripe_price_id: None,
        }],
        events: vec![
            event(OPEN_GYM, Some("Open gym"), DOWNTOWN, "Downtown", at(5, 2, 9)),
            event(YOUTH_CLINIC, None, DOWNTOWN, "Downtown", at(5, 1, 17)),
            event(NORTH_LEAGUE, Some("League night"), NORTHSIDE, "Northside", at(6, 10, 19)),
        ],
        staff: vec![
            staff(DANA, "Dana", "Park", "coach"),
            staff(ELI, "Eli", "Ross", "front_desk"),
        ],
        locations: vec![
            Location {
                id: DOWNTOWN,
                name: "Downtown".to_string(),
                address: "1 Main St".to_string(),
            },
            Location {
                id: NORTHSIDE,
                name: "Northside".to_string(),
                address: "200 North Ave".to_string(),
            },
        ],
        teams: vec![
            Team {
                id: HAWKS,
                name: "Hawks".to_string(),
            },
            Team {
                id: OWLS,
                name: "Owls".to_string(),
            },
        ],
        courts: vec![
            Court {
                id: COURT_ONE,
                name: "Court 1".to_string(),
                location_id: DOWNTOWN,
            },
            Court {
                id: COURT_TWO,
                name: "Court 2".to_string(),
                location_id: NORTHSIDE,
            },
        ],
        customers: vec![
            customer(ANA, "Ana", "Lopez", DOWNTOWN, Some(("Gold", "active"))),
            customer(BEN, "Ben", "Kim", NORTHSIDE, None),
            customer(CARA, "Cara", "Diaz", DOWNTOWN, Some(("Silver", "paused"))),
        ],
        memberships: vec![
            Membership {
                id: GOLD,
                name: "Gold".to_string(),
                description: Some("Unlimited court time".to_string()),
            },
            Membership {
                id: SILVER,
                name: "Silver".to_string(),
                description: None,
            },
        ],
        discounts: vec![Discount {
            id: WELCOME,
            code: "WELCOME10".to_string(),
            name: "Welcome".to_string(),
            discount_percent: Some(10),
            discount_amount_cents: None,
            max_redemptions: Some(50),
            times_redeemed: 5,
            is_active: true,
        }],
        invoices: vec![
            Invoice {
                id: BEN_INVOICE,
                customer_id: BEN,
                customer_name: "Ben Kim".to_string(),
                amount_due_cents: 2500,
                due_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap_or_default(),
                attempts: 0,
                status: "overdue".to_string(),
            },
            Invoice {
                id: CARA_INVOICE,
                customer_id: CARA,
                customer_name: "Cara Diaz".to_string(),
                amount_due_cents: 4999,
                due_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap_or_default(),
                attempts: 1,
                status: "overdue".to_string(),
            },
        ],
        ..Store::default()
    }
}

pub fn app() -> Router {
    app_with_state(AppState::new())
}

pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/legacy/health", get(legacy_health))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/me", get(me))
        .route("/locations", get(list_locations).post(create_location))
        .route(
            "/locations/{id}",
            get(get_location).put(update_location).delete(delete_location),
        )
        .route("/teams", get(list_teams))
        .route("/courts", get(list_courts))
        .route("/customers", get(list_customers))
        .route("/memberships", get(list_memberships))
        .route("/memberships/{id}", axum::routing::delete(delete_membership))
        .route(
            "/memberships/{id}/plans",
            get(list_plans).post(create_plan),
        )
        .route(
            "/memberships/{id}/plans/{plan_id}",
            axum::routing::delete(delete_plan),
        )
        .route("/events", get(list_events).post(create_event))
        .route("/events/{id}", put(update_event).delete(delete_event))
        .route("/staff", get(list_staff).post(register_staff))
        .route("/staff/{id}", patch(update_staff))
        .route("/discounts", get(list_discounts).post(create_discount))
        .route("/discounts/{id}", axum::routing::delete(delete_discount))
        .route("/games", get(list_games).post(create_game))
        .route("/collections/overdue", get(list_overdue))
        .route("/collections/{id}/attempts", post(record_attempt))
        .route("/uploads", post(upload))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_state(listener, AppState::new()).await
}

pub async fn run_with_state(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

type Failure = (StatusCode, Json<Value>);

fn failure(status: StatusCode, body: Value) -> Failure {
    (status, Json(body))
}

fn not_found() -> Failure {
    failure(StatusCode::NOT_FOUND, json!({"message": "not found"}))
}

async fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), Failure> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    let store = state.store.read().await;
    if token.is_some_and(|token| store.access_tokens.contains(token)) {
        return Ok(());
    }
    Err(failure(
        StatusCode::UNAUTHORIZED,
        json!({"message": "token expired"}),
    ))
}

/// Decode `a=1&b=2&b=3` keeping repeated keys.
fn query_pairs(raw: Option<String>) -> Vec<(String, String)> {
    let raw = raw.unwrap_or_default();
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (
                percent_decode_str(key).decode_utf8_lossy().into_owned(),
                percent_decode_str(value).decode_utf8_lossy().into_owned(),
            )
        })
        .collect()
}

fn query_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}

fn issue_tokens(store: &mut Store) -> Value {
    let access = format!("access-{}", Uuid::new_v4());
    let refresh = format!("refresh-{}", Uuid::new_v4());
    store.access_tokens.insert(access.clone());
    store.refresh_tokens.insert(refresh.clone());
    json!({"access_token": access, "refresh_token": refresh})
}

async fn health() -> &'static str {
    "ok"
}

async fn legacy_health() -> Redirect {
    Redirect::temporary("/health")
}

async fn login(State(state): State<AppState>, Json(input): Json<LoginInput>) -> Result<Json<Value>, Failure> {
    if input.email != ADMIN_EMAIL || input.password != ADMIN_PASSWORD {
        return Err(failure(
            StatusCode::UNAUTHORIZED,
            json!({"error": "invalid email or password"}),
        ));
    }
    let mut store = state.store.write().await;
    tracing::debug!(email = %input.email, "Issued tokens");
    Ok(Json(issue_tokens(&mut store)))
}

async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshInput>,
) -> Result<Json<Value>, Failure> {
    let mut store = state.store.write().await;
    if !store.refresh_tokens.remove(&input.refresh_token) {
        return Err(failure(
            StatusCode::UNAUTHORIZED,
            json!({"detail": "refresh token revoked"}),
        ));
    }
    Ok(Json(issue_tokens(&mut store)))
}

async fn me(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Value>, Failure> {
    authorize(&state, &headers).await?;
    Ok(Json(json!({
        "id": Uuid::from_u128(1),
        "email": ADMIN_EMAIL,
        "role": "admin",
    })))
}

async fn list_locations(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Location>>, Failure> {
    authorize(&state, &headers).await?;
    Ok(Json(state.store.read().await.locations.clone()))
}

async fn get_location(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Location>, Failure> {
    authorize(&state, &headers).await?;
    let store = state.store.read().await;
    store
        .locations
        .iter()
        .find(|l| l.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(not_found)
}

async fn create_location(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LocationInput>,
) -> Result<(StatusCode, Json<Location>), Failure> {
    authorize(&state, &headers).await?;
    if input.name.trim().is_empty() {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            json!({"message": "name is required"}),
        ));
    }
    let location = Location {
        id: Uuid::new_v4(),
        name: input.name,
        address: input.address,
    };
    state.store.write().await.locations.push(location.clone());
    Ok((StatusCode::CREATED, Json(location)))
}

async fn update_location(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(input): Json<LocationInput>,
) -> Result<Json<Location>, Failure> {
    authorize(&state, &headers).await?;
    let mut store = state.store.write().await;
    let location = store
        .locations
        .iter_mut()
        .find(|l| l.id == id)
        .ok_or_else(not_found)?;
    location.name = input.name;
    location.address = input.address;
    Ok(Json(location.clone()))
}

async fn delete_location(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Failure> {
    authorize(&state, &headers).await?;
    let mut store = state.store.write().await;
    let before = store.locations.len();
    store.locations.retain(|l| l.id != id);
    if store.locations.len() == before {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn list_teams(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Team>>, Failure> {
    authorize(&state, &headers).await?;
    Ok(Json(state.store.read().await.teams.clone()))
}

async fn list_courts(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Result<Json<Vec<Court>>, Failure> {
    authorize(&state, &headers).await?;
    let location = query_value(&query_pairs(raw), "location_id");
    let store = state.store.read().await;
    let courts = store
        .courts
        .iter()
        .filter(|c| location.as_deref().is_none_or(|id| c.location_id.to_string() == id))
        .cloned()
        .collect();
    Ok(Json(courts))
}

async fn list_customers(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Result<Json<Vec<Customer>>, Failure> {
    authorize(&state, &headers).await?;
    let pairs = query_pairs(raw);
    let search = query_value(&pairs, "search").map(|s| s.to_lowercase());
    let locations: Vec<&str> = pairs
        .iter()
        .filter(|(k, _)| k == "location_ids")
        .map(|(_, v)| v.as_str())
        .collect();

    let store = state.store.read().await;
    let customers = store
        .customers
        .iter()
        .filter(|c| {
            search.as_deref().is_none_or(|needle| {
                format!("{} {} {}", c.first_name, c.last_name, c.email)
                    .to_lowercase()
                    .contains(needle)
            })
        })
        .filter(|c| {
            locations.is_empty() || locations.contains(&c.location_id.to_string().as_str())
        })
        .cloned()
        .collect();
    Ok(Json(customers))
}

async fn list_memberships(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Membership>>, Failure> {
    authorize(&state, &headers).await?;
    Ok(Json(state.store.read().await.memberships.clone()))
}

async fn delete_membership(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Failure> {
    authorize(&state, &headers).await?;
    let mut store = state.store.write().await;
    let before = store.memberships.len();
    store.memberships.retain(|m| m.id != id);
    if store.memberships.len() == before {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn list_plans(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<MembershipPlan>>, Failure> {
    authorize(&state, &headers).await?;
    let store = state.store.read().await;
    if !store.memberships.iter().any(|m| m.id == id) {
        return Err(not_found());
    }
    let plans = store
        .plans
        .iter()
        .filter(|p| p.membership_id == id)
        .cloned()
        .collect();
    Ok(Json(plans))
}

async fn create_plan(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(input): Json<PlanInput>,
) -> Result<(StatusCode, Json<MembershipPlan>), Failure> {
    authorize(&state, &headers).await?;
    if input.price_cents < 0 {
        return Err(failure(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({"detail": [{"msg": "price must not be negative"}]}),
        ));
    }
    let mut store = state.store.write().await;
    if !store.memberships.iter().any(|m| m.id == id) {
        return Err(not_found());
    }
    let plan = MembershipPlan {
        id: Uuid::new_v4(),
        membership_id: id,
        name: input.name,
        price_cents: input.price_cents,
        billing_period: input.billing_period,
        stripe_price_id: input.stripe_price_id,
    };
    store.plans.push(plan.clone());
    Ok((StatusCode::CREATED, Json(plan)))
}

async fn delete_plan(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, plan_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, Failure> {
    authorize(&state, &headers).await?;
    let mut store = state.store.write().await;
    let before = store.plans.len();
    store
        .plans
        .retain(|p| !(p.membership_id == id && p.id == plan_id));
    if store.plans.len() == before {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

fn window_bound(pairs: &[(String, String)], key: &str) -> Result<Option<DateTime<Utc>>, Failure> {
    query_value(pairs, key)
        .map(|raw| {
            raw.parse::<DateTime<Utc>>().map_err(|_| {
                failure(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({"detail": format!("invalid {key}: {raw}")}),
                )
            })
        })
        .transpose()
}

async fn list_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Result<Json<Vec<Event>>, Failure> {
    authorize(&state, &headers).await?;
    let pairs = query_pairs(raw);
    let after = window_bound(&pairs, "after")?;
    let before = window_bound(&pairs, "before")?;
    let location = query_value(&pairs, "location_id");

    let store = state.store.read().await;
    let events = store
        .events
        .iter()
        .filter(|e| after.is_none_or(|after| e.start_at >= after))
        .filter(|e| before.is_none_or(|before| e.start_at < before))
        .filter(|e| location.as_deref().is_none_or(|id| e.location_id.to_string() == id))
        .cloned()
        .collect();
    Ok(Json(events))
}

fn event_from(store: &Store, id: Uuid, input: EventInput) -> Result<Event, Failure> {
    if input.end_at <= input.start_at {
        return Err(failure(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({"detail": "end must be after start"}),
        ));
    }
    let location = store
        .locations
        .iter()
        .find(|l| l.id == input.location_id)
        .ok_or_else(not_found)?;
    Ok(Event {
        id,
        program_name: input.program_name,
        location_id: location.id,
        location_name: Some(location.name.clone()),
        court_id: input.court_id,
        start_at: input.start_at,
        end_at: input.end_at,
        capacity: input.capacity,
        enrolled: 0,
    })
}

async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<EventInput>,
) -> Result<(StatusCode, Json<Event>), Failure> {
    authorize(&state, &headers).await?;
    let mut store = state.store.write().await;
    let event = event_from(&store, Uuid::new_v4(), input)?;
    store.events.push(event.clone());
    Ok((StatusCode::CREATED, Json(event)))
}

async fn update_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(input): Json<EventInput>,
) -> Result<Json<Event>, Failure> {
    authorize(&state, &headers).await?;
    let mut store = state.store.write().await;
    let index = store
        .events
        .iter()
        .position(|e| e.id == id)
        .ok_or_else(not_found)?;
    let mut event = event_from(&store, id, input)?;
    event.enrolled = store.events[index].enrolled;
    store.events[index] = event.clone();
    Ok(Json(event))
}

/// Unlike the other deletes this one answers 200 with a confirmation body.
async fn delete_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, Failure> {
    authorize(&state, &headers).await?;
    let mut store = state.store.write().await;
    let before = store.events.len();
    store.events.retain(|e| e.id != id);
    if store.events.len() == before {
        return Err(not_found());
    }
    Ok(Json(json!({"message": "deleted"})))
}

async fn list_staff(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Result<Json<Vec<StaffMember>>, Failure> {
    authorize(&state, &headers).await?;
    let role = query_value(&query_pairs(raw), "role");
    let store = state.store.read().await;
    let staff = store
        .staff
        .iter()
        .filter(|s| role.as_deref().is_none_or(|role| s.role == role))
        .cloned()
        .collect();
    Ok(Json(staff))
}

async fn register_staff(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<StaffInput>,
) -> Result<(StatusCode, Json<StaffMember>), Failure> {
    authorize(&state, &headers).await?;
    let mut store = state.store.write().await;
    if store
        .staff
        .iter()
        .any(|s| s.email.eq_ignore_ascii_case(&input.email))
    {
        return Err(failure(
            StatusCode::CONFLICT,
            json!({"message": "email already registered"}),
        ));
    }
    let member = StaffMember {
        id: Uuid::new_v4(),
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        role: input.role,
        is_active: true,
    };
    store.staff.push(member.clone());
    Ok((StatusCode::CREATED, Json(member)))
}

async fn update_staff(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(patch): Json<StaffPatch>,
) -> Result<Json<StaffMember>, Failure> {
    authorize(&state, &headers).await?;
    let mut store = state.store.write().await;
    let member = store
        .staff
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(not_found)?;
    if let Some(first_name) = patch.first_name {
        member.first_name = first_name;
    }
    if let Some(last_name) = patch.last_name {
        member.last_name = last_name;
    }
    if let Some(role) = patch.role {
        member.role = role;
    }
    if let Some(is_active) = patch.is_active {
        member.is_active = is_active;
    }
    Ok(Json(member.clone()))
}

async fn list_discounts(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Result<Json<Vec<Discount>>, Failure> {
    authorize(&state, &headers).await?;
    let active_only = query_value(&query_pairs(raw), "active").as_deref() == Some("true");
    let store = state.store.read().await;
    let discounts = store
        .discounts
        .iter()
        .filter(|d| !active_only || d.is_active)
        .cloned()
        .collect();
    Ok(Json(discounts))
}

async fn create_discount(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<DiscountInput>,
) -> Result<(StatusCode, Json<Discount>), Failure> {
    authorize(&state, &headers).await?;
    let mut store = state.store.write().await;
    if store
        .discounts
        .iter()
        .any(|d| d.code.eq_ignore_ascii_case(&input.code))
    {
        return Err(failure(
            StatusCode::CONFLICT,
            json!({"error": "discount code already exists"}),
        ));
    }
    let discount = Discount {
        id: Uuid::new_v4(),
        code: input.code,
        name: input.name,
        discount_percent: input.discount_percent,
        discount_amount_cents: input.discount_amount_cents,
        max_redemptions: input.max_redemptions,
        times_redeemed: 0,
        is_active: input.is_active,
    };
    store.discounts.push(discount.clone());
    Ok((StatusCode::CREATED, Json(discount)))
}

async fn delete_discount(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Failure> {
    authorize(&state, &headers).await?;
    let mut store = state.store.write().await;
    let before = store.discounts.len();
    store.discounts.retain(|d| d.id != id);
    if store.discounts.len() == before {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn list_games(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Game>>, Failure> {
    authorize(&state, &headers).await?;
    Ok(Json(state.store.read().await.games.clone()))
}

async fn create_game(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<GameInput>,
) -> Result<(StatusCode, Json<Game>), Failure> {
    authorize(&state, &headers).await?;
    if input.end_time <= input.start_time {
        return Err(failure(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({"detail": "end time must be after start time"}),
        ));
    }
    let mut store = state.store.write().await;
    let team_name = |id: Uuid| store.teams.iter().find(|t| t.id == id).map(|t| t.name.clone());
    let (Some(home), Some(away)) = (team_name(input.home_team_id), team_name(input.away_team_id))
    else {
        return Err(failure(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({"detail": [{"msg": "unknown team"}]}),
        ));
    };
    let Some(location) = store.locations.iter().find(|l| l.id == input.location_id) else {
        return Err(not_found());
    };
    let court_name = input
        .court_id
        .and_then(|id| store.courts.iter().find(|c| c.id == id))
        .map(|c| c.name.clone());
    let game = Game {
        id: Uuid::new_v4(),
        home_team_id: input.home_team_id,
        home_team_name: home,
        away_team_id: input.away_team_id,
        away_team_name: away,
        location_id: location.id,
        location_name: location.name.clone(),
        court_id: input.court_id,
        court_name,
        start_time: input.start_time,
        end_time: input.end_time,
        home_score: None,
        away_score: None,
        status: "scheduled".to_string(),
    };
    store.games.push(game.clone());
    Ok((StatusCode::CREATED, Json(game)))
}

async fn list_overdue(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Invoice>>, Failure> {
    authorize(&state, &headers).await?;
    Ok(Json(state.store.read().await.invoices.clone()))
}

async fn record_attempt(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(input): Json<AttemptInput>,
) -> Result<(StatusCode, Json<Value>), Failure> {
    authorize(&state, &headers).await?;
    if input.method.trim().is_empty() {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            json!({"error": {"message": "method is required"}}),
        ));
    }
    let mut store = state.store.write().await;
    let invoice = store
        .invoices
        .iter_mut()
        .find(|i| i.id == id)
        .ok_or_else(|| {
            failure(
                StatusCode::NOT_FOUND,
                json!({"error": {"message": "invoice not found"}}),
            )
        })?;
    invoice.attempts += 1;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": Uuid::new_v4(),
            "invoice_id": id,
            "method": input.method,
            "created_at": Utc::now(),
        })),
    ))
}

/// Echo what arrived in a multipart form.
async fn upload(mut multipart: Multipart) -> Result<Json<Value>, Failure> {
    let bad_form = |e: axum::extract::multipart::MultipartError| {
        failure(StatusCode::BAD_REQUEST, json!({"message": e.to_string()}))
    };
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(bad_form)?;
        let mut entry = HashMap::new();
        entry.insert("name", json!(name));
        entry.insert("file_name", json!(file_name));
        entry.insert("content_type", json!(content_type));
        entry.insert("size", json!(bytes.len()));
        if file_name.is_none() {
            entry.insert("text", json!(String::from_utf8_lossy(&bytes)));
        }
        fields.push(entry);
    }
    Ok(Json(json!({ "fields": fields })))
}
