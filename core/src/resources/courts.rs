use uuid::Uuid;

use crate::client::RequestParams;
use crate::error::ApiError;
use crate::query::Query;
use crate::types::courts::CourtRequest;

pub fn list(location_id: Option<Uuid>) -> RequestParams {
    RequestParams::get("/courts")
        .query(Query::new().with("location_id", location_id))
        .secure()
}

pub fn create(input: &CourtRequest) -> Result<RequestParams, ApiError> {
    Ok(RequestParams::post("/courts").json(input)?.secure())
}

pub fn update(id: Uuid, input: &CourtRequest) -> Result<RequestParams, ApiError> {
    Ok(RequestParams::put(format!("/courts/{id}")).json(input)?.secure())
}

pub fn delete(id: Uuid) -> RequestParams {
    RequestParams::delete(format!("/courts/{id}")).secure()
}
