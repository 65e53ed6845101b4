use uuid::Uuid;

use crate::client::RequestParams;
use crate::error::ApiError;
use crate::query::Query;
use crate::types::customers::{CustomerQuery, RegisterCustomer, UpdateCustomer};

pub fn list(filter: &CustomerQuery) -> RequestParams {
    let query = Query::new()
        .with("search", filter.search.as_deref())
        .with("location_ids", filter.location_ids.as_slice())
        .with("page", filter.page)
        .with("limit", filter.limit);
    RequestParams::get("/customers").query(query).secure()
}

pub fn get(id: Uuid) -> RequestParams {
    RequestParams::get(format!("/customers/{id}")).secure()
}

pub fn register(input: &RegisterCustomer) -> Result<RequestParams, ApiError> {
    Ok(RequestParams::post("/customers").json(input)?.secure())
}

pub fn update(id: Uuid, input: &UpdateCustomer) -> Result<RequestParams, ApiError> {
    Ok(RequestParams::patch(format!("/customers/{id}"))
        .json(input)?
        .secure())
}

pub fn memberships(id: Uuid) -> RequestParams {
    RequestParams::get(format!("/customers/{id}/memberships")).secure()
}
