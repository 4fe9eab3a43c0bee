//! Login command.

use clap::Args;

/// How to obtain consent.
///
/// Without flags the browser is opened on the consent page and the redirect
/// URL is pasted back. With `--mock-email` the mock IdP at
/// `PIZZADASH_IDP_URL` grants the token directly.
#[derive(Debug, Clone, Default, Args)]
pub struct LoginArgs {
    /// Sign in as this user at the mock IdP.
    #[arg(long)]
    pub mock_email: Option<String>,

    /// Display name for the mock user.
    #[arg(long, requires = "mock_email")]
    pub mock_name: Option<String>,

    /// Make the mock IdP refuse consent.
    #[arg(long, requires = "mock_email")]
    pub mock_deny: bool,

    /// Print the consent URL instead of opening a browser.
    #[arg(long)]
    pub no_browser: bool,
}

#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_mock_name_requires_mock_email() {
        assert!(Cli::try_parse_from(["pizzadash", "login", "--mock-name", "Ana"]).is_err());

        let cli = Cli::try_parse_from([
            "pizzadash",
            "login",
            "--mock-email",
            "ana@example.com",
            "--mock-name",
            "Ana",
        ])
        .unwrap();
        let Commands::Login(args) = cli.command else {
            panic!("expected login");
        };
        assert_eq!(args.mock_email.as_deref(), Some("ana@example.com"));
        assert_eq!(args.mock_name.as_deref(), Some("Ana"));
        assert!(!args.mock_deny);
    }
}
