use crate::http::context::{Context, BAD_REQUEST_REASON};
use crate::http::headers::Header;
use crate::http::response::{Body, Status};

/// Installs a `404 Not Found` response.
pub fn not_found(ctx: &mut Context) {
    ctx.response.status = Status::NotFound;
    ctx.response.body = Body::Text("Page doesn't exist".to_string());
    ctx.response.add_header(Header::new("Content-Type", "text/plain"));
}

/// Installs a `500 Internal Server Error` response.
pub fn internal_server_error(ctx: &mut Context) {
    ctx.response.status = Status::InternalServerError;
    ctx.response.body = Body::Text("Internal server error".to_string());
    ctx.response.add_header(Header::new("Content-Type", "text/plain"));
}

/// Installs a `400 Bad Request` response, echoing the parse failure reason
/// when the context carries one.
pub fn bad_request(ctx: &mut Context) {
    ctx.response.status = Status::BadRequest;
    let body = match ctx.extra.get(BAD_REQUEST_REASON) {
        Some(reason) => format!("Bad request: {reason}"),
        None => "Bad request".to_string(),
    };
    ctx.response.body = Body::Text(body);
    ctx.response.add_header(Header::new("Content-Type", "text/plain"));
}
