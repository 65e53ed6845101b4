use super::{call, ServiceResult};
use crate::resources;
use crate::session::ApiSession;
use crate::transport::HttpTransport;
use crate::types::auth::{CurrentUser, LoginRequest, TokenPair};

/// Sign in and keep the issued tokens in the session's store.
pub async fn login<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    email: &str,
    password: &str,
) -> ServiceResult<()> {
    let input = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    let tokens: TokenPair = call(session, "auth.login", resources::auth::login(&input)).await?;
    session.tokens().set(tokens);
    tracing::info!("Signed in");
    Ok(())
}

pub fn logout<T: HttpTransport + 'static>(session: &ApiSession<T>) {
    session.tokens().clear();
}

pub async fn current_user<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
) -> ServiceResult<CurrentUser> {
    call(session, "auth.me", resources::auth::me()).await
}
