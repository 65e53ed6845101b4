use crate::client::RequestParams;
use crate::error::ApiError;
use crate::types::auth::{LoginRequest, RefreshRequest};

pub fn login(input: &LoginRequest) -> Result<RequestParams, ApiError> {
    RequestParams::post("/auth/login").json(input)
}

pub fn refresh(input: &RefreshRequest) -> Result<RequestParams, ApiError> {
    RequestParams::post("/auth/refresh").json(input)
}

pub fn me() -> RequestParams {
    RequestParams::get("/auth/me").secure()
}
