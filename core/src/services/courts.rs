use uuid::Uuid;

use super::{call, call_discarding, ServiceResult};
use crate::resources;
use crate::session::ApiSession;
use crate::transport::HttpTransport;
use crate::types::courts::{Court, CourtRequest};

pub async fn list<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    location_id: Option<Uuid>,
) -> ServiceResult<Vec<Court>> {
    call(session, "courts.list", resources::courts::list(location_id)).await
}

pub async fn create<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    input: &CourtRequest,
) -> ServiceResult<Court> {
    call(session, "courts.create", resources::courts::create(input)).await
}

pub async fn update<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    id: Uuid,
    input: &CourtRequest,
) -> ServiceResult<Court> {
    call(session, "courts.update", resources::courts::update(id, input)).await
}

pub async fn delete<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    id: Uuid,
) -> ServiceResult<()> {
    call_discarding(session, "courts.delete", resources::courts::delete(id)).await
}
