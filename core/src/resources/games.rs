use uuid::Uuid;

use crate::client::RequestParams;
use crate::error::ApiError;
use crate::query::Query;
use crate::types::games::GameRequest;

pub fn list(location_id: Option<Uuid>) -> RequestParams {
    RequestParams::get("/games")
        .query(Query::new().with("location_id", location_id))
        .secure()
}

pub fn get(id: Uuid) -> RequestParams {
    RequestParams::get(format!("/games/{id}")).secure()
}

pub fn create(input: &GameRequest) -> Result<RequestParams, ApiError> {
    Ok(RequestParams::post("/games").json(input)?.secure())
}

pub fn update(id: Uuid, input: &GameRequest) -> Result<RequestParams, ApiError> {
    Ok(RequestParams::put(format!("/games/{id}")).json(input)?.secure())
}

pub fn delete(id: Uuid) -> RequestParams {
    RequestParams::delete(format!("/games/{id}")).secure()
}
