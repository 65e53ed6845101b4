use uuid::Uuid;

use crate::client::RequestParams;
use crate::error::ApiError;
use crate::types::credit_packages::CreditPackageRequest;

pub fn list() -> RequestParams {
    RequestParams::get("/credit-packages").secure()
}

pub fn create(input: &CreditPackageRequest) -> Result<RequestParams, ApiError> {
    Ok(RequestParams::post("/credit-packages").json(input)?.secure())
}

pub fn update(id: Uuid, input: &CreditPackageRequest) -> Result<RequestParams, ApiError> {
    Ok(RequestParams::put(format!("/credit-packages/{id}"))
        .json(input)?
        .secure())
}

pub fn delete(id: Uuid) -> RequestParams {
    RequestParams::delete(format!("/credit-packages/{id}")).secure()
}
