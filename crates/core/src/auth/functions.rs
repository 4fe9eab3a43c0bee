use rand::{distr::Alphanumeric, Rng};

/// Number of client ID characters kept when logging or displaying it.
const CLIENT_ID_VISIBLE_CHARS: usize = 20;

/// Generate a random state parameter for CSRF protection.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Mask a client ID for logs: the first 20 characters followed by `...`.
pub fn mask_client_id(client_id: &str) -> String {
    let visible: String = client_id.chars().take(CLIENT_ID_VISIBLE_CHARS).collect();
    format!("{}...", visible)
}
