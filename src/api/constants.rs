//! API constants

/// Session cookie name
pub const SESSION_COOKIE_NAME: &str = "link_session";

/// Legacy password header accepted by the mutating link endpoints
pub const PASSWORD_HEADER: &str = "X-Link-Shortener-Password";
