use actix_web::{http::header, HttpRequest};

use crate::entities::contact::RequestProvenance;

/// Extract the client's IP address from the request, considering X-Forwarded-For if trusted
/// `trust_x_forwarded_for`: whether to trust the X-Forwarded-For header
pub fn get_client_ip(req: &HttpRequest, trust_x_forwarded_for: bool) -> Option<String> {
    if trust_x_forwarded_for {
        let forwarded = req
            .headers()
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|s| s.split(',').next())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        if forwarded.is_some() {
            return forwarded;
        }
    }
    req.peer_addr().map(|addr| addr.ip().to_string())
}

pub fn request_provenance(req: &HttpRequest, trust_x_forwarded_for: bool) -> RequestProvenance {
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    RequestProvenance {
        ip_address: get_client_ip(req, trust_x_forwarded_for),
        user_agent,
    }
}
