//! Anti-forgery token taken from the session cookies.

/// Default name of the cookie holding the anti-forgery token.
pub const DEFAULT_CSRF_COOKIE: &str = "csrftoken";

/// Default header the store server reads the token from.
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRFToken";

/// Find a cookie value in a `Cookie` header string (`a=1; b=2`).
///
/// Values are percent-decoded. The first cookie with a matching name wins.
pub fn cookie_value(cookie_header: &str, name: &str) -> Option<String> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| percent_decode(value))
}

fn percent_decode(value: &str) -> String {
    match urlencoding::decode(value) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => {
            let bytes = urlencoding::decode_binary(value.as_bytes());
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }
}
