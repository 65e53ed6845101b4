use uuid::Uuid;

use crate::client::RequestParams;
use crate::error::ApiError;
use crate::query::Query;
use crate::types::discounts::DiscountRequest;

pub fn list(active_only: bool) -> RequestParams {
    let active = active_only.then_some(true);
    RequestParams::get("/discounts")
        .query(Query::new().with("active", active))
        .secure()
}

pub fn get(id: Uuid) -> RequestParams {
    RequestParams::get(format!("/discounts/{id}")).secure()
}

pub fn create(input: &DiscountRequest) -> Result<RequestParams, ApiError> {
    Ok(RequestParams::post("/discounts").json(input)?.secure())
}

pub fn update(id: Uuid, input: &DiscountRequest) -> Result<RequestParams, ApiError> {
    Ok(RequestParams::put(format!("/discounts/{id}")).json(input)?.secure())
}

pub fn delete(id: Uuid) -> RequestParams {
    RequestParams::delete(format!("/discounts/{id}")).secure()
}
