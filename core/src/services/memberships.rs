use uuid::Uuid;

use super::{call, call_discarding, ServiceResult};
use crate::resources;
use crate::session::ApiSession;
use crate::transport::HttpTransport;
use crate::types::memberships::{Membership, MembershipPlan, MembershipRequest, PlanRequest};

pub async fn list<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
) -> ServiceResult<Vec<Membership>> {
    call(session, "memberships.list", resources::memberships::list()).await
}

pub async fn get<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    id: Uuid,
) -> ServiceResult<Membership> {
    call(session, "memberships.get", resources::memberships::get(id)).await
}

pub async fn create<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    input: &MembershipRequest,
) -> ServiceResult<Membership> {
    call(session, "memberships.create", resources::memberships::create(input)).await
}

pub async fn update<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    id: Uuid,
    input: &MembershipRequest,
) -> ServiceResult<Membership> {
    call(
        session,
        "memberships.update",
        resources::memberships::update(id, input),
    )
    .await
}

/// Delete a membership and return the list as it stands afterwards, so the
/// table can be redrawn without reloading the page.
pub async fn remove<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    id: Uuid,
) -> ServiceResult<Vec<Membership>> {
    call_discarding(session, "memberships.delete", resources::memberships::delete(id)).await?;
    list(session).await
}

pub async fn plans<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    membership_id: Uuid,
) -> ServiceResult<Vec<MembershipPlan>> {
    call(
        session,
        "memberships.plans",
        resources::memberships::plans(membership_id),
    )
    .await
}

pub async fn create_plan<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    membership_id: Uuid,
    input: &PlanRequest,
) -> ServiceResult<MembershipPlan> {
    call(
        session,
        "memberships.create_plan",
        resources::memberships::create_plan(membership_id, input),
    )
    .await
}

pub async fn update_plan<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    membership_id: Uuid,
    plan_id: Uuid,
    input: &PlanRequest,
) -> ServiceResult<MembershipPlan> {
    call(
        session,
        "memberships.update_plan",
        resources::memberships::update_plan(membership_id, plan_id, input),
    )
    .await
}

pub async fn delete_plan<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    membership_id: Uuid,
    plan_id: Uuid,
) -> ServiceResult<()> {
    call_discarding(
        session,
        "memberships.delete_plan",
        resources::memberships::delete_plan(membership_id, plan_id),
    )
    .await
}
