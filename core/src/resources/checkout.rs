use crate::client::RequestParams;
use crate::error::ApiError;
use crate::types::checkout::CheckoutRequest;

pub fn create_session(input: &CheckoutRequest) -> Result<RequestParams, ApiError> {
    Ok(RequestParams::post("/checkout/sessions").json(input)?.secure())
}
