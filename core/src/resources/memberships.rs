use uuid::Uuid;

use crate::client::RequestParams;
use crate::error::ApiError;
use crate::types::memberships::{MembershipRequest, PlanRequest};

pub fn list() -> RequestParams {
    RequestParams::get("/memberships").secure()
}

pub fn get(id: Uuid) -> RequestParams {
    RequestParams::get(format!("/memberships/{id}")).secure()
}

pub fn create(input: &MembershipRequest) -> Result<RequestParams, ApiError> {
    Ok(RequestParams::post("/memberships").json(input)?.secure())
}

pub fn update(id: Uuid, input: &MembershipRequest) -> Result<RequestParams, ApiError> {
    Ok(RequestParams::put(format!("/memberships/{id}"))
        .json(input)?
        .secure())
}

pub fn delete(id: Uuid) -> RequestParams {
    RequestParams::delete(format!("/memberships/{id}")).secure()
}

pub fn plans(membership_id: Uuid) -> RequestParams {
    RequestParams::get(format!("/memberships/{membership_id}/plans")).secure()
}

pub fn create_plan(membership_id: Uuid, input: &PlanRequest) -> Result<RequestParams, ApiError> {
    Ok(RequestParams::post(format!("/memberships/{membership_id}/plans"))
        .json(input)?
        .secure())
}

pub fn update_plan(
    membership_id: Uuid,
    plan_id: Uuid,
    input: &PlanRequest,
) -> Result<RequestParams, ApiError> {
    Ok(
        RequestParams::put(format!("/memberships/{membership_id}/plans/{plan_id}"))
            .json(input)?
            .secure(),
    )
}

pub fn delete_plan(membership_id: Uuid, plan_id: Uuid) -> RequestParams {
    RequestParams::delete(format!("/memberships/{membership_id}/plans/{plan_id}")).secure()
}
