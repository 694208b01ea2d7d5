//! Correlation id resolution and client address lookup.

use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::ConnectInfo,
    http::{HeaderMap, HeaderName, Request},
};
use uuid::Uuid;

/// Header name for request ID.
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Header set by the upstream load balancer with the trace context.
pub static TRACE_CONTEXT_HEADER: HeaderName = HeaderName::from_static("x-cloud-trace-context");

static FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
static REAL_IP: HeaderName = HeaderName::from_static("x-real-ip");

/// Request and trace identifiers of one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

impl RequestIds {
    /// Reads the inbound ids, generating a request id when the client sent
    /// none and reusing it as trace id when no trace context is present.
    pub fn resolve(headers: &HeaderMap, request_id_header: &HeaderName, trace_header: &HeaderName) -> Self {
        let request_id = header_value(headers, request_id_header)
            .map(String::from)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let trace_id = header_value(headers, trace_header)
            .map(String::from)
            .unwrap_or_else(|| request_id.clone());

        Self {
            request_id,
            trace_id,
        }
    }
}

/// Returns the client address of a request.
///
/// The first valid IP of `X-Forwarded-For` wins, then `X-Real-IP`, then the
/// peer address recorded by `ConnectInfo`. Empty when nothing is known.
pub fn remote_addr<B>(request: &Request<B>) -> String {
    let headers = request.headers();

    if let Some(ip) = header_value(headers, &FORWARDED_FOR)
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse::<IpAddr>().ok())
    {
        return ip.to_string();
    }

    if let Some(ip) = header_value(headers, &REAL_IP).and_then(|v| v.trim().parse::<IpAddr>().ok()) {
        return ip.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_default()
}

fn header_value<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}
