use uuid::Uuid;

use super::{call, call_discarding, ServiceResult};
use crate::resources;
use crate::session::ApiSession;
use crate::transport::HttpTransport;
use crate::types::locations::{Location, LocationRequest};

pub async fn list<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
) -> ServiceResult<Vec<Location>> {
    call(session, "locations.list", resources::locations::list()).await
}

pub async fn get<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    id: Uuid,
) -> ServiceResult<Location> {
    call(session, "locations.get", resources::locations::get(id)).await
}

pub async fn create<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    input: &LocationRequest,
) -> ServiceResult<Location> {
    call(session, "locations.create", resources::locations::create(input)).await
}

pub async fn update<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    id: Uuid,
    input: &LocationRequest,
) -> ServiceResult<Location> {
    call(session, "locations.update", resources::locations::update(id, input)).await
}

pub async fn delete<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    id: Uuid,
) -> ServiceResult<()> {
    call_discarding(session, "locations.delete", resources::locations::delete(id)).await
}
