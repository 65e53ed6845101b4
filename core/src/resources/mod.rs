//! Call-builders for the backend's REST resources.
//!
//! Each function describes exactly one request and performs no I/O. Builders
//! that serialize a typed body return `Result`; the rest cannot fail.
//! Everything except login and refresh is a secure call.

pub mod auth;
pub mod checkout;
pub mod collections;
pub mod courts;
pub mod credit_packages;
pub mod customers;
pub mod discounts;
pub mod events;
pub mod games;
pub mod locations;
pub mod memberships;
pub mod staff;
pub mod teams;

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::Value;
    use uuid::Uuid;

    use crate::client::{ApiClient, RequestParams};
    use crate::http::{HttpMethod, HttpRequest};
    use crate::types::checkout::CheckoutRequest;
    use crate::types::courts::CourtRequest;
    use crate::types::credit_packages::CreditPackageRequest;
    use crate::types::customers::CustomerQuery;
    use crate::types::events::{EventRequest, EventWindow};
    use crate::types::games::GameRequest;
    use crate::types::memberships::PlanRequest;
    use crate::types::staff::UpdateStaff;

    fn client() -> ApiClient {
        ApiClient::new("https://api.example.com")
    }

    fn build(params: RequestParams) -> HttpRequest {
        client().build(&params, Some("t")).unwrap()
    }

    fn json_body(req: &HttpRequest) -> Value {
        serde_json::from_str(req.body.as_text().unwrap()).unwrap()
    }

    fn assert_call(req: &HttpRequest, method: HttpMethod, path: &str) {
        assert_eq!(req.method, method, "{path}");
        assert_eq!(req.url, format!("https://api.example.com{path}"));
        assert_eq!(req.header("authorization"), Some("Bearer t"), "{path}");
    }

    #[test]
    fn customer_filters_encode_repeated_location_ids() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        let params = super::customers::list(&CustomerQuery {
            search: Some("ann lee".to_string()),
            location_ids: vec![a, b],
            page: None,
            limit: Some(25),
        });
        let req = client().build(&params, Some("t")).unwrap();
        assert_eq!(
            req.url,
            format!("https://api.example.com/customers?search=ann%20lee&location_ids={a}&location_ids={b}&limit=25")
        );
        assert_eq!(req.header("authorization"), Some("Bearer t"));
    }

    #[test]
    fn login_and_refresh_are_public() {
        let login = super::auth::login(&crate::types::auth::LoginRequest {
            email: "desk@example.com".to_string(),
            password: "pw".to_string(),
        })
        .unwrap();
        assert!(!login.secure);
        assert_eq!(login.method, HttpMethod::Post);
        assert!(super::auth::me().secure);
    }

    #[test]
    fn deactivate_staff_sends_only_the_flag() {
        let id = Uuid::nil();
        let params = super::staff::deactivate(id).unwrap();
        let req = client().build(&params, None).unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.body.as_text(), Some(r#"{"is_active":false}"#));
    }

    #[test]
    fn plan_paths_nest_under_membership() {
        let membership = Uuid::from_u128(7);
        let plan = Uuid::from_u128(8);
        let req = client()
            .build(&super::memberships::delete_plan(membership, plan), None)
            .unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(
            req.url,
            format!("https://api.example.com/memberships/{membership}/plans/{plan}")
        );
    }

    #[test]
    fn inactive_filter_is_left_out() {
        let req = client().build(&super::discounts::list(false), None).unwrap();
        assert_eq!(req.url, "https://api.example.com/discounts");
        let req = client().build(&super::discounts::list(true), None).unwrap();
        assert_eq!(req.url, "https://api.example.com/discounts?active=true");
    }

    #[test]
    fn event_window_is_sent_as_rfc3339() {
        let location = Uuid::from_u128(3);
        let window = EventWindow {
            after: Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap(),
            before: Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap(),
            location_id: Some(location),
        };
        let req = build(super::events::list(&window));
        assert_call(
            &req,
            HttpMethod::Get,
            &format!(
                "/events?after=2026-05-01T00%3A00%3A00%2B00%3A00&before=2026-06-01T00%3A00%3A00%2B00%3A00&location_id={location}"
            ),
        );
    }

    #[test]
    fn event_writes() {
        let id = Uuid::from_u128(4);
        let start = Utc.with_ymd_and_hms(2026, 7, 4, 10, 0, 0).unwrap();
        let input = EventRequest {
            program_name: None,
            location_id: Uuid::from_u128(3),
            court_id: None,
            start_at: start,
            end_at: start + chrono::Duration::hours(1),
            capacity: Some(12),
        };

        let req = build(super::events::create(&input).unwrap());
        assert_call(&req, HttpMethod::Post, "/events");
        let body = json_body(&req);
        assert!(body.get("program_name").is_none());
        assert_eq!(body["capacity"], 12);

        let req = build(super::events::update(id, &input).unwrap());
        assert_call(&req, HttpMethod::Put, &format!("/events/{id}"));
        assert_eq!(req.header("content-type"), Some("application/json"));

        assert_call(&build(super::events::get(id)), HttpMethod::Get, &format!("/events/{id}"));
        assert_call(
            &build(super::events::delete(id)),
            HttpMethod::Delete,
            &format!("/events/{id}"),
        );
    }

    #[test]
    fn game_calls() {
        let id = Uuid::from_u128(5);
        let location = Uuid::from_u128(3);
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap();
        let input = GameRequest {
            home_team_id: Uuid::from_u128(10),
            away_team_id: Uuid::from_u128(11),
            location_id: location,
            court_id: None,
            start_time: start,
            end_time: start + chrono::Duration::hours(1),
            home_score: Some(3),
            away_score: Some(1),
        };

        assert_call(
            &build(super::games::list(Some(location))),
            HttpMethod::Get,
            &format!("/games?location_id={location}"),
        );
        assert_call(&build(super::games::list(None)), HttpMethod::Get, "/games");

        let req = build(super::games::create(&input).unwrap());
        assert_call(&req, HttpMethod::Post, "/games");
        assert_eq!(json_body(&req)["home_score"], 3);

        let req = build(super::games::update(id, &input).unwrap());
        assert_call(&req, HttpMethod::Put, &format!("/games/{id}"));
        assert_eq!(json_body(&req)["start_time"], "2026-03-01T18:00:00Z");

        assert_call(
            &build(super::games::delete(id)),
            HttpMethod::Delete,
            &format!("/games/{id}"),
        );
    }

    #[test]
    fn court_calls() {
        let id = Uuid::from_u128(6);
        let location = Uuid::from_u128(3);
        let input = CourtRequest {
            name: "Court 3".to_string(),
            location_id: location,
        };

        assert_call(
            &build(super::courts::list(Some(location))),
            HttpMethod::Get,
            &format!("/courts?location_id={location}"),
        );

        let req = build(super::courts::create(&input).unwrap());
        assert_call(&req, HttpMethod::Post, "/courts");
        assert_eq!(
            req.body.as_text(),
            Some(format!(r#"{{"name":"Court 3","location_id":"{location}"}}"#).as_str())
        );

        assert_call(
            &build(super::courts::update(id, &input).unwrap()),
            HttpMethod::Put,
            &format!("/courts/{id}"),
        );
        assert_call(
            &build(super::courts::delete(id)),
            HttpMethod::Delete,
            &format!("/courts/{id}"),
        );
    }

    #[test]
    fn credit_package_paths_are_hyphenated() {
        let id = Uuid::from_u128(9);
        let input = CreditPackageRequest {
            name: "Ten pack".to_string(),
            credits: 10,
            price_cents: 9000,
            stripe_price_id: None,
        };

        assert_call(&build(super::credit_packages::list()), HttpMethod::Get, "/credit-packages");

        let req = build(super::credit_packages::create(&input).unwrap());
        assert_call(&req, HttpMethod::Post, "/credit-packages");
        assert!(json_body(&req).get("stripe_price_id").is_none());

        assert_call(
            &build(super::credit_packages::update(id, &input).unwrap()),
            HttpMethod::Put,
            &format!("/credit-packages/{id}"),
        );
        assert_call(
            &build(super::credit_packages::delete(id)),
            HttpMethod::Delete,
            &format!("/credit-packages/{id}"),
        );
    }

    #[test]
    fn checkout_session_posts_the_order() {
        let req = build(
            super::checkout::create_session(&CheckoutRequest {
                price_id: "price_123".to_string(),
                quantity: 2,
                customer_id: None,
                discount_code: Some("WELCOME10".to_string()),
                success_url: "https://desk.example.com/ok".to_string(),
                cancel_url: "https://desk.example.com/cancel".to_string(),
            })
            .unwrap(),
        );
        assert_call(&req, HttpMethod::Post, "/checkout/sessions");
        let body = json_body(&req);
        assert_eq!(body["quantity"], 2);
        assert_eq!(body["discount_code"], "WELCOME10");
        assert!(body.get("customer_id").is_none());
    }

    #[test]
    fn staff_calls() {
        let id = Uuid::from_u128(12);
        assert_call(
            &build(super::staff::list(Some("front_desk"))),
            HttpMethod::Get,
            "/staff?role=front_desk",
        );
        assert_call(&build(super::staff::list(None)), HttpMethod::Get, "/staff");

        let req = build(
            super::staff::update(
                id,
                &UpdateStaff {
                    role: Some("coach".to_string()),
                    ..UpdateStaff::default()
                },
            )
            .unwrap(),
        );
        assert_call(&req, HttpMethod::Patch, &format!("/staff/{id}"));
        assert_eq!(req.body.as_text(), Some(r#"{"role":"coach"}"#));
    }

    #[test]
    fn plan_writes() {
        let membership = Uuid::from_u128(7);
        let plan = Uuid::from_u128(8);
        let input = PlanRequest {
            name: "Monthly".to_string(),
            price_cents: 4900,
            billing_period: "monthly".to_string(),
            stripe_price_id: Some("price_m".to_string()),
        };

        assert_call(
            &build(super::memberships::plans(membership)),
            HttpMethod::Get,
            &format!("/memberships/{membership}/plans"),
        );

        let req = build(super::memberships::create_plan(membership, &input).unwrap());
        assert_call(&req, HttpMethod::Post, &format!("/memberships/{membership}/plans"));
        assert_eq!(json_body(&req)["stripe_price_id"], "price_m");

        assert_call(
            &build(super::memberships::update_plan(membership, plan, &input).unwrap()),
            HttpMethod::Put,
            &format!("/memberships/{membership}/plans/{plan}"),
        );
    }
}
