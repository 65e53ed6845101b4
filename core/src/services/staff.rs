use uuid::Uuid;

use super::{call, ServiceResult};
use crate::resources;
use crate::session::ApiSession;
use crate::transport::HttpTransport;
use crate::types::staff::{RegisterStaff, StaffMember, UpdateStaff};

pub async fn list<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    role: Option<&str>,
) -> ServiceResult<Vec<StaffMember>> {
    call(session, "staff.list", resources::staff::list(role)).await
}

pub async fn register<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    input: &RegisterStaff,
) -> ServiceResult<StaffMember> {
    call(session, "staff.register", resources::staff::register(input)).await
}

pub async fn update<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    id: Uuid,
    input: &UpdateStaff,
) -> ServiceResult<StaffMember> {
    call(session, "staff.update", resources::staff::update(id, input)).await
}

pub async fn deactivate<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    id: Uuid,
) -> ServiceResult<StaffMember> {
    call(session, "staff.deactivate", resources::staff::deactivate(id)).await
}
