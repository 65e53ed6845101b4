use super::{call, ServiceResult};
use crate::resources;
use crate::session::ApiSession;
use crate::transport::HttpTransport;
use crate::types::teams::Team;

pub async fn list<T: HttpTransport + 'static>(session: &ApiSession<T>) -> ServiceResult<Vec<Team>> {
    call(session, "teams.list", resources::teams::list()).await
}
