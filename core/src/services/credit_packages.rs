use uuid::Uuid;

use super::{call, call_discarding, ServiceResult};
use crate::resources;
use crate::session::ApiSession;
use crate::transport::HttpTransport;
use crate::types::credit_packages::{CreditPackage, CreditPackageRequest};

pub async fn list<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
) -> ServiceResult<Vec<CreditPackage>> {
    call(session, "credit_packages.list", resources::credit_packages::list()).await
}

pub async fn create<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    input: &CreditPackageRequest,
) -> ServiceResult<CreditPackage> {
    call(
        session,
        "credit_packages.create",
        resources::credit_packages::create(input),
    )
    .await
}

pub async fn update<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    id: Uuid,
    input: &CreditPackageRequest,
) -> ServiceResult<CreditPackage> {
    call(
        session,
        "credit_packages.update",
        resources::credit_packages::update(id, input),
    )
    .await
}

pub async fn delete<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    id: Uuid,
) -> ServiceResult<()> {
    call_discarding(
        session,
        "credit_packages.delete",
        resources::credit_packages::delete(id),
    )
    .await
}
