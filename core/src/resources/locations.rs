use uuid::Uuid;

use crate::client::RequestParams;
use crate::error::ApiError;
use crate::types::locations::LocationRequest;

pub fn list() -> RequestParams {
    RequestParams::get("/locations").secure()
}

pub fn get(id: Uuid) -> RequestParams {
    RequestParams::get(format!("/locations/{id}")).secure()
}

pub fn create(input: &LocationRequest) -> Result<RequestParams, ApiError> {
    Ok(RequestParams::post("/locations").json(input)?.secure())
}

pub fn update(id: Uuid, input: &LocationRequest) -> Result<RequestParams, ApiError> {
    Ok(RequestParams::put(format!("/locations/{id}"))
        .json(input)?
        .secure())
}

pub fn delete(id: Uuid) -> RequestParams {
    RequestParams::delete(format!("/locations/{id}")).secure()
}
