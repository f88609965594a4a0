//! Client identity extraction for quota tracking.

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{HeaderMap, request::Parts};
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use crate::state::AppState;

/// Identity used when neither the socket nor trusted headers yield an address.
///
/// All such requests share a single quota record.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Extracts the client identity used as the quota key.
///
/// # Resolution Order
///
/// When `behind_proxy` is `true`:
/// 1. First valid address in `X-Forwarded-For`
/// 2. `X-Real-IP`
///
/// Then, always:
/// 3. Peer socket address
/// 4. [`UNKNOWN_CLIENT`]
///
/// Forwarding headers are ignored unless `behind_proxy` is set, since any
/// client can forge them.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// assert_eq!(extract_client_ip(&headers, None, true), "203.0.113.7");
/// assert_eq!(extract_client_ip(&headers, None, false), "unknown");
/// ```
pub fn extract_client_ip(headers: &HeaderMap, peer: Option<IpAddr>, behind_proxy: bool) -> String {
    if behind_proxy {
        let forwarded = header_str(headers, "x-forwarded-for")
            .and_then(|value| value.split(',').find_map(parse_ip));

        let real_ip = || header_str(headers, "x-real-ip").and_then(parse_ip);

        if let Some(ip) = forwarded.or_else(real_ip) {
            return ip.to_string();
        }
    }

    peer.map(|ip| ip.to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Parses an address that may be bracketed or carry a port (`[::1]:80`, `1.2.3.4:80`).
fn parse_ip(raw: &str) -> Option<IpAddr> {
    let raw = raw.trim();

    if let Ok(ip) = raw.parse::<IpAddr>() {
        return Some(ip);
    }

    raw.parse::<SocketAddr>().ok().map(|addr| addr.ip())
}

/// Extractor yielding the quota key for the current request.
///
/// Reads the peer address from `ConnectInfo` when the server was started with
/// `into_make_service_with_connect_info`, and trusts forwarding headers only
/// when [`AppState::behind_proxy`] is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl FromRequestParts<AppState> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        Ok(Self(extract_client_ip(
            &parts.headers,
            peer,
            state.behind_proxy,
        )))
    }
}
