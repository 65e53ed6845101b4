use uuid::Uuid;

use super::{call, ServiceResult};
use crate::resources;
use crate::session::ApiSession;
use crate::transport::HttpTransport;
use crate::types::customers::{
    Customer, CustomerMembership, CustomerQuery, CustomerResponse, RegisterCustomer,
    UpdateCustomer,
};

pub async fn list<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    filter: &CustomerQuery,
) -> ServiceResult<Vec<Customer>> {
    let customers: Vec<CustomerResponse> =
        call(session, "customers.list", resources::customers::list(filter)).await?;
    Ok(customers.into_iter().map(to_customer).collect())
}

pub async fn get<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    id: Uuid,
) -> ServiceResult<Customer> {
    let customer: CustomerResponse =
        call(session, "customers.get", resources::customers::get(id)).await?;
    Ok(to_customer(customer))
}

pub async fn register<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    input: &RegisterCustomer,
) -> ServiceResult<Customer> {
    let customer: CustomerResponse = call(
        session,
        "customers.register",
        resources::customers::register(input),
    )
    .await?;
    Ok(to_customer(customer))
}

pub async fn update<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    id: Uuid,
    input: &UpdateCustomer,
) -> ServiceResult<Customer> {
    let customer: CustomerResponse = call(
        session,
        "customers.update",
        resources::customers::update(id, input),
    )
    .await?;
    Ok(to_customer(customer))
}

pub async fn memberships<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    id: Uuid,
) -> ServiceResult<Vec<CustomerMembership>> {
    call(
        session,
        "customers.memberships",
        resources::customers::memberships(id),
    )
    .await
}

pub fn to_customer(dto: CustomerResponse) -> Customer {
    let full_name = format!("{} {}", dto.first_name.trim(), dto.last_name.trim())
        .trim()
        .to_string();
    let active_member = dto
        .membership_status
        .as_deref()
        .is_some_and(|status| status.eq_ignore_ascii_case("active"));
    Customer {
        id: dto.id,
        full_name,
        email: dto.email,
        phone: dto.phone.filter(|p| !p.trim().is_empty()),
        membership: dto.membership_name,
        active_member,
    }
}
