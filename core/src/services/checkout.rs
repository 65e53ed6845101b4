use super::{call, ServiceResult};
use crate::resources;
use crate::session::ApiSession;
use crate::transport::HttpTransport;
use crate::types::checkout::{CheckoutRequest, CheckoutSession};

/// Create a Stripe checkout session; the caller redirects to `url`.
pub async fn create_session<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    input: &CheckoutRequest,
) -> ServiceResult<CheckoutSession> {
    call(session, "checkout.create", resources::checkout::create_session(input)).await
}
