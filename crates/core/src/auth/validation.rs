use url::Url;

use super::{AccessToken, AuthError, UserInfoResponse, UserProfile};

/// Validate a userinfo response body against the expected schema.
///
/// The provider must send `sub`, `name`, `email` and `picture` as strings and
/// `sub` must be non-empty. Extra fields are ignored. Any violation is a
/// `ProfileFetchFailed`, never a partially filled profile.
pub fn parse_userinfo(body: &[u8]) -> Result<UserProfile, AuthError> {
    let info: UserInfoResponse = serde_json::from_slice(body)
        .map_err(|e| AuthError::ProfileFetchFailed(format!("unexpected userinfo shape: {}", e)))?;

    if info.sub.trim().is_empty() {
        return Err(AuthError::ProfileFetchFailed(
            "userinfo response has an empty subject".to_string(),
        ));
    }

    Ok(UserProfile {
        id: info.sub,
        name: info.name,
        email: info.email,
        picture: info.picture,
    })
}

/// Extract the access token from what the user pasted after consenting.
///
/// Accepts either the full `http(s)` redirect URL (token in the fragment, as the
/// implicit flow returns it, or in the query) or a bare token.
///
/// - `error=...` in the redirect maps to `ConsentDenied`.
/// - A missing or mismatched `state` maps to `Provider`.
///
/// # Examples
///
/// ```
/// use pizzadash_core::auth::parse_token_redirect;
///
/// let token = parse_token_redirect(
///     "http://localhost:3000/auth/callback#access_token=abc&state=xyz",
///     "xyz",
/// )
/// .unwrap();
/// assert_eq!(token.secret(), "abc");
/// ```
pub fn parse_token_redirect(input: &str, expected_state: &str) -> Result<AccessToken, AuthError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AuthError::ConsentDenied("no response provided".to_string()));
    }

    let lowered = input.to_ascii_lowercase();
    if !(lowered.starts_with("http://") || lowered.starts_with("https://")) {
        if input.contains(char::is_whitespace) {
            return Err(AuthError::Provider("unrecognized response".to_string()));
        }
        return Ok(AccessToken::new(input));
    }

    let url = Url::parse(input)
        .map_err(|e| AuthError::Provider(format!("unrecognized response: {}", e)))?;

    let params = url.fragment().or_else(|| url.query()).unwrap_or_default();

    let mut token = None;
    let mut state = None;
    for (key, value) in url::form_urlencoded::parse(params.as_bytes()) {
        match key.as_ref() {
            "error" => return Err(AuthError::ConsentDenied(value.into_owned())),
            "access_token" => token = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            _ => {}
        }
    }

    match state {
        Some(ref s) if s == expected_state => {}
        Some(_) => return Err(AuthError::Provider("state mismatch".to_string())),
        None => return Err(AuthError::Provider("missing state".to_string())),
    }

    token
        .filter(|t| !t.is_empty())
        .map(AccessToken::new)
        .ok_or_else(|| AuthError::Provider("no access_token in redirect".to_string()))
}
