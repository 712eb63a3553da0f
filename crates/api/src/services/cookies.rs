//! Visitor session cookie encoding.

use axum::http::{header, HeaderMap, HeaderValue};
use uuid::Uuid;

use crate::config::SessionConfig;

/// Builds and reads the visitor session cookie.
#[derive(Debug, Clone)]
pub struct CookieHelper {
    name: String,
    secure: bool,
    max_age_secs: i64,
}

impl CookieHelper {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            name: config.cookie_name.clone(),
            secure: config.secure,
            max_age_secs: config.idle_ttl_hours.saturating_mul(3600),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.name
    }

    /// `Set-Cookie` value for a session id.
    pub fn build_session_cookie(&self, session_id: Uuid) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            self.name, session_id, self.max_age_secs
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// Appends the session cookie to response headers.
    pub fn add_session_cookie(&self, headers: &mut HeaderMap, session_id: Uuid) {
        if let Ok(value) = HeaderValue::from_str(&self.build_session_cookie(session_id)) {
            headers.append(header::SET_COOKIE, value);
        }
    }

    /// Reads a cookie by name from the `Cookie` headers.
    pub fn extract_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|h| h.to_str().ok())
            .flat_map(|h| h.split(';'))
            .find_map(|cookie| {
                let (cookie_name, value) = cookie.trim().split_once('=')?;
                (cookie_name == name).then_some(value)
            })
    }

    /// The session id carried by the request, if it is a well-formed UUID.
    pub fn session_id(&self, headers: &HeaderMap) -> Option<Uuid> {
        Self::extract_cookie(headers, &self.name).and_then(|v| Uuid::parse_str(v.trim()).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper(secure: bool) -> CookieHelper {
        CookieHelper::new(&SessionConfig {
            cookie_name: "gym_session".to_string(),
            idle_ttl_hours: 2,
            secure,
        })
    }

    #[test]
    fn test_build_session_cookie() {
        let id = Uuid::nil();
        let cookie = helper(false).build_session_cookie(id);
        assert_eq!(
            cookie,
            format!("gym_session={}; Path=/; Max-Age=7200; HttpOnly; SameSite=Lax", id)
        );
        assert!(helper(true).build_session_cookie(id).ends_with("; Secure"));
    }

    #[test]
    fn test_extract_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; gym_session=abc; lang=en"),
        );
        assert_eq!(CookieHelper::extract_cookie(&headers, "gym_session"), Some("abc"));
        assert_eq!(CookieHelper::extract_cookie(&headers, "lang"), Some("en"));
        assert_eq!(CookieHelper::extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_session_id_requires_uuid() {
        let helper = helper(false);
        let id = Uuid::new_v4();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("gym_session={}", id)).unwrap(),
        );
        assert_eq!(helper.session_id(&headers), Some(id));

        headers.insert(header::COOKIE, HeaderValue::from_static("gym_session=forged"));
        assert_eq!(helper.session_id(&headers), None);
    }

    #[test]
    fn test_add_session_cookie() {
        let mut headers = HeaderMap::new();
        helper(false).add_session_cookie(&mut headers, Uuid::nil());
        assert_eq!(headers.get_all(header::SET_COOKIE).iter().count(), 1);
    }
}
