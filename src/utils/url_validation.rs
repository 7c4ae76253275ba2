//! Validation for user-supplied service endpoints.
//!
//! A custom endpoint replaces the regional Speech host, and the subscription
//! key is sent to it in a header. Plain HTTP is therefore only accepted for
//! hosts that never leave the machine or the local network.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use thiserror::Error;
use tracing::warn;
use url::Url;

/// Errors that can occur during URL validation
#[derive(Debug, Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] url::ParseError),

    #[error("URL scheme must be http or https, got: {0}")]
    UnsupportedScheme(String),

    #[error("Plain HTTP is only allowed for local hosts, got: {0}")]
    HttpsRequired(String),

    #[error("URL must have a host")]
    MissingHost,
}

/// Checks if an IPv4 address is private/internal
///
/// Private addresses include:
/// - Loopback (127.0.0.0/8)
/// - Private (10.0.0.0/8, 172.16.0.0/12, 192.168.0.0/16)
/// - Link-local (169.254.0.0/16)
/// - Shared (100.64.0.0/10 - CGNAT)
pub fn is_private_ipv4(ip: &Ipv4Addr) -> bool {
    if ip.is_loopback() || ip.is_private() || ip.is_link_local() || ip.is_unspecified() {
        return true;
    }
    // Shared address space (CGNAT) 100.64.0.0/10
    let octets = ip.octets();
    octets[0] == 100 && (octets[1] & 0xC0) == 64
}

/// Checks if an IPv6 address is private/internal
///
/// Private addresses include:
/// - Loopback (::1)
/// - Link-local (fe80::/10)
/// - Unique local (fc00::/7)
/// - IPv4-mapped private addresses
pub fn is_private_ipv6(ip: &Ipv6Addr) -> bool {
    if ip.is_loopback() || ip.is_unspecified() {
        return true;
    }
    let segments = ip.segments();

    // Link-local (fe80::/10)
    if segments[0] & 0xFFC0 == 0xFE80 {
        return true;
    }

    // Unique local address (fc00::/7)
    if segments[0] & 0xFE00 == 0xFC00 {
        return true;
    }

    if let Some(ipv4) = ip.to_ipv4_mapped() {
        return is_private_ipv4(&ipv4);
    }

    false
}

/// Checks if an IP address is private/internal
pub fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => is_private_ipv4(ipv4),
        IpAddr::V6(ipv6) => is_private_ipv6(ipv6),
    }
}

/// Validates an endpoint override for the Speech REST API.
///
/// - `https` is always accepted.
/// - `http` is accepted for `localhost` and for loopback or private IP hosts.
///
/// No DNS resolution happens here, so the check never blocks.
///
/// # Example
/// ```rust
/// use azure_tts::utils::validate_endpoint_url;
///
/// assert!(validate_endpoint_url("https://japaneast.tts.speech.microsoft.com").is_ok());
/// assert!(validate_endpoint_url("http://127.0.0.1:8080").is_ok());
/// assert!(validate_endpoint_url("http://speech.example.com").is_err());
/// ```
pub fn validate_endpoint_url(url: &str) -> Result<Url, UrlValidationError> {
    let parsed = Url::parse(url)?;

    match parsed.scheme() {
        "https" | "http" => {}
        other => return Err(UrlValidationError::UnsupportedScheme(other.to_string())),
    }

    let host = parsed.host().ok_or(UrlValidationError::MissingHost)?;

    if parsed.scheme() == "http" {
        let local = match &host {
            url::Host::Domain(domain) => domain.eq_ignore_ascii_case("localhost"),
            url::Host::Ipv4(ip) => is_private_ip(&IpAddr::V4(*ip)),
            url::Host::Ipv6(ip) => is_private_ip(&IpAddr::V6(*ip)),
        };
        if !local {
            let host = host.to_string();
            warn!(host = %host, "Rejected plain HTTP endpoint for non-local host");
            return Err(UrlValidationError::HttpsRequired(host));
        }
    }

    Ok(parsed)
}
