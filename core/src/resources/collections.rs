use uuid::Uuid;

use crate::client::RequestParams;
use crate::error::ApiError;
use crate::query::Query;
use crate::types::collections::CollectionAttemptRequest;

pub fn list_overdue(location_id: Option<Uuid>) -> RequestParams {
    RequestParams::get("/collections/overdue")
        .query(Query::new().with("location_id", location_id))
        .secure()
}

pub fn record_attempt(
    invoice_id: Uuid,
    input: &CollectionAttemptRequest,
) -> Result<RequestParams, ApiError> {
    Ok(RequestParams::post(format!("/collections/{invoice_id}/attempts"))
        .json(input)?
        .secure())
}
