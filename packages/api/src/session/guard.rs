//! Route guard decision for protected pages.

use super::SessionState;

pub const LOGIN_PATH: &str = "/loginpage";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Storage has not been read yet.
    Loading,
    /// Send the user to this path instead.
    Redirect(String),
    Render,
}

/// Login path that remembers where the user was going.
pub fn login_redirect(requested: &str) -> String {
    if requested.is_empty() || requested == "/" {
        return LOGIN_PATH.to_string();
    }
    format!("{LOGIN_PATH}?from={}", urlencoding::encode(requested))
}

/// Path carried in a login `from` query, percent-decoded.
pub fn return_path(from: &str) -> String {
    urlencoding::decode(from)
        .map(|path| path.into_owned())
        .unwrap_or_else(|_| from.to_string())
}

/// Decide what a protected route shows for `state`. Pure: no I/O, no navigation.
pub fn guard(state: &SessionState, requested: &str) -> GuardDecision {
    match state {
        SessionState::Unknown => GuardDecision::Loading,
        SessionState::Anonymous => GuardDecision::Redirect(login_redirect(requested)),
        SessionState::Authenticated(_) => GuardDecision::Render,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    #[test]
    fn test_decisions() {
        assert_eq!(guard(&SessionState::Unknown, "/homepage"), GuardDecision::Loading);
        assert_eq!(
            guard(&SessionState::Anonymous, "/timetablepage"),
            GuardDecision::Redirect("/loginpage?from=%2Ftimetablepage".into())
        );
        let session = SessionState::Authenticated(Session {
            username: "kop".into(),
            token: None,
        });
        assert_eq!(guard(&session, "/timetablepage"), GuardDecision::Render);
    }

    #[test]
    fn test_root_redirect_has_no_from() {
        assert_eq!(login_redirect("/"), "/loginpage");
        assert_eq!(login_redirect(""), "/loginpage");
    }

    #[test]
    fn test_return_path() {
        assert_eq!(return_path("%2Ftimetablepage"), "/timetablepage");
        assert_eq!(return_path("/timetablepage"), "/timetablepage");
        assert_eq!(return_path(""), "");
    }
}
