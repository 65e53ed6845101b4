use uuid::Uuid;

use crate::client::RequestParams;
use crate::error::ApiError;
use crate::query::Query;
use crate::types::staff::{RegisterStaff, UpdateStaff};

pub fn list(role: Option<&str>) -> RequestParams {
    RequestParams::get("/staff")
        .query(Query::new().with("role", role))
        .secure()
}

pub fn register(input: &RegisterStaff) -> Result<RequestParams, ApiError> {
    Ok(RequestParams::post("/staff").json(input)?.secure())
}

pub fn update(id: Uuid, input: &UpdateStaff) -> Result<RequestParams, ApiError> {
    Ok(RequestParams::patch(format!("/staff/{id}")).json(input)?.secure())
}

pub fn deactivate(id: Uuid) -> Result<RequestParams, ApiError> {
    update(
        id,
        &UpdateStaff {
            is_active: Some(false),
            ..UpdateStaff::default()
        },
    )
}
