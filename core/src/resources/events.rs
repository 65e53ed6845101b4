use uuid::Uuid;

use crate::client::RequestParams;
use crate::error::ApiError;
use crate::query::Query;
use crate::types::events::{EventRequest, EventWindow};

pub fn list(window: &EventWindow) -> RequestParams {
    let query = Query::new()
        .with("after", window.after)
        .with("before", window.before)
        .with("location_id", window.location_id);
    RequestParams::get("/events").query(query).secure()
}

pub fn get(id: Uuid) -> RequestParams {
    RequestParams::get(format!("/events/{id}")).secure()
}

pub fn create(input: &EventRequest) -> Result<RequestParams, ApiError> {
    Ok(RequestParams::post("/events").json(input)?.secure())
}

pub fn update(id: Uuid, input: &EventRequest) -> Result<RequestParams, ApiError> {
    Ok(RequestParams::put(format!("/events/{id}")).json(input)?.secure())
}

pub fn delete(id: Uuid) -> RequestParams {
    RequestParams::delete(format!("/events/{id}")).secure()
}
