use crate::client::RequestParams;

pub fn list() -> RequestParams {
    RequestParams::get("/teams").secure()
}
