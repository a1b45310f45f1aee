//! Session cookie parsing and `Set-Cookie` rendering.

use chamber_core::identity::SessionToken;

/// The session cookie, named by `site.session_cookie_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    name: String,
    secure: bool,
}

impl SessionCookie {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secure: true,
        }
    }

    /// Drop the `Secure` attribute, for plain-http local development.
    #[must_use]
    pub const fn insecure(mut self) -> Self {
        self.secure = false;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pull the session token out of a `Cookie` request header.
    ///
    /// Empty values count as absent. Values are percent-decoded.
    #[must_use]
    pub fn extract(&self, cookie_header: &str) -> Option<SessionToken> {
        cookie_header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.name)
            .map(|(_, value)| value.trim_matches('"'))
            .filter(|value| !value.is_empty())
            .map(|value| {
                urlencoding::decode(value)
                    .map_or_else(|_| value.to_string(), |decoded| decoded.into_owned())
            })
            .map(SessionToken::new)
    }

    /// `Set-Cookie` value that stores `token` for `max_age_secs`.
    #[must_use]
    pub fn set(&self, token: &SessionToken, max_age_secs: i64) -> String {
        format!(
            "{}={}; Path=/; Max-Age={max_age_secs}; HttpOnly; SameSite=Lax{}",
            self.name,
            urlencoding::encode(token.as_str()),
            self.secure_attr()
        )
    }

    /// `Set-Cookie` value that deletes the cookie.
    #[must_use]
    pub fn clear(&self) -> String {
        format!(
            "{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax{}",
            self.name,
            self.secure_attr()
        )
    }

    const fn secure_attr(&self) -> &'static str {
        if self.secure { "; Secure" } else { "" }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("chamber_session=abc", Some("abc"))]
    #[case("theme=dark; chamber_session=abc; lang=en", Some("abc"))]
    #[case("chamber_session=\"abc\"", Some("abc"))]
    #[case("chamber_session=a%2Bb", Some("a+b"))]
    #[case("chamber_session=", None)]
    #[case("other_session=abc", None)]
    #[case("", None)]
    fn extract_finds_named_cookie(#[case] header: &str, #[case] expected: Option<&str>) {
        let cookie = SessionCookie::new("chamber_session");
        assert_eq!(
            cookie.extract(header).as_ref().map(SessionToken::as_str),
            expected
        );
    }

    #[test]
    fn set_and_clear_attributes() {
        let cookie = SessionCookie::new("sid");
        let token = SessionToken::new("t0k");
        assert_eq!(
            cookie.set(&token, 3600),
            "sid=t0k; Path=/; Max-Age=3600; HttpOnly; SameSite=Lax; Secure"
        );
        assert_eq!(
            cookie.insecure().clear(),
            "sid=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax"
        );
    }

    #[test]
    fn set_value_roundtrips_through_extract() {
        let cookie = SessionCookie::new("sid");
        let token = SessionToken::new("a+b/c");
        let header = cookie.set(&token, 60);
        let value = header.split(';').next().unwrap();
        assert_eq!(cookie.extract(value), Some(token));
    }
}
