//! Command execution.

use std::sync::Arc;

use pizzadash_auth::{
    Access, AuthConfig, AuthContext, AuthDeps, FileStore, History, MemoryStore, SignInView,
};
use pizzadash_core::auth::{ConsentPrompt, KeyValueStore, UserRecord};
use pizzadash_core::orders::{apply_query, sample_orders, DashboardStats, StatusCounts};
use pizzadash_core::routes::{auth_error_message, Navigator, Route};
use serde::Serialize;

use crate::cli::login::LoginArgs;
use crate::cli::orders::{OrdersAction, OrdersCommand};
use crate::cli::{Cli, Commands, OutputFormat};
use crate::consent::BrowserConsent;
use crate::error::{ClientError, Result};
use crate::output::{json, pretty};

/// Everything a command needs: configuration, durable store and navigation.
pub struct App {
    config: AuthConfig,
    http: reqwest::Client,
    store: Arc<dyn KeyValueStore>,
    history: History,
    format: OutputFormat,
    quiet: bool,
}

#[derive(Serialize)]
struct AuthErrorView<'a> {
    error: Option<&'a str>,
    message: &'static str,
}

#[derive(Serialize)]
struct DashboardView<'a> {
    user: &'a UserRecord,
    stats: DashboardStats,
}

impl App {
    pub fn new(
        config: AuthConfig,
        store: Arc<dyn KeyValueStore>,
        format: OutputFormat,
        quiet: bool,
    ) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            store,
            history: History::default(),
            format,
            quiet,
        }
    }

    /// Read the environment and open the store selected on the command line.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = AuthConfig::from_env()?;
        let store: Arc<dyn KeyValueStore> = if cli.ephemeral {
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(FileStore::new(&cli.store))
        };
        tracing::debug!(
            mode = %config.mode,
            store = %cli.store.display(),
            ephemeral = cli.ephemeral,
            "Loaded configuration"
        );
        Ok(Self::new(config, store, cli.format, cli.quiet))
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Run one command and return what should be printed.
    pub async fn run(&self, command: Commands) -> Result<String> {
        let output = match command {
            Commands::Login(args) => self.login(&args).await?,
            Commands::Logout => self.logout().await?,
            Commands::Whoami => self.whoami().await,
            Commands::Dashboard => self.dashboard().await?,
            Commands::Orders(orders) => self.orders(orders).await?,
            Commands::Config => self.show_config(),
            Commands::AuthError { error } => self.auth_error(error.as_deref()),
            #[cfg(feature = "mock-idp")]
            Commands::MockIdp { port } => {
                pizzadash_auth::mock_idp::MockIdpServer::new(port).run().await?;
                String::new()
            }
        };
        tracing::debug!(route = %self.history.current(), "Command finished");
        Ok(output)
    }

    fn context(&self, consent: Arc<dyn ConsentPrompt>) -> AuthContext {
        let deps = AuthDeps::with_http(
            &self.config,
            self.http.clone(),
            self.store.clone(),
            consent,
            Arc::new(self.history.clone()),
        );
        AuthContext::new(self.config.clone(), deps)
    }

    /// Context for commands that never ask for consent.
    async fn restored_context(&self) -> AuthContext {
        let mut context = self.context(Arc::new(BrowserConsent::new(false)));
        context.restore_session().await;
        context
    }

    fn render<T: Serialize>(&self, value: &T, as_text: impl FnOnce(&T) -> String) -> String {
        match self.format {
            OutputFormat::Json => json::format_json(value),
            OutputFormat::Pretty => as_text(value),
        }
    }

    fn signed_in_user(context: &AuthContext) -> Result<&UserRecord> {
        match context.require_session() {
            Access::Granted => context.user().ok_or(ClientError::NotSignedIn),
            Access::Pending | Access::Denied => Err(ClientError::NotSignedIn),
        }
    }

    async fn login(&self, args: &LoginArgs) -> Result<String> {
        let mut context = self.context(self.consent_for(args)?);
        context.start().await;

        match context.sign_in_view() {
            SignInView::Redirected => {
                let user = context.user().ok_or(ClientError::NotSignedIn)?;
                return Ok(self.render(user, |u| {
                    format!("Already signed in as {}", pretty::format_user(u))
                }));
            }
            SignInView::Form {
                blocked: true,
                error,
            } => {
                return Err(ClientError::SignInBlocked(
                    error.unwrap_or("sign-in is not configured"),
                ));
            }
            SignInView::Form { .. } => {}
        }
        if let Some(warning) = context.warning() {
            tracing::warn!("{}", warning);
        }

        let record = context.login().await;
        context.teardown();
        let record = record?;
        Ok(self.render(&record, |r| {
            format!("Signed in as {}", pretty::format_user(r))
        }))
    }

    fn consent_for(&self, args: &LoginArgs) -> Result<Arc<dyn ConsentPrompt>> {
        match &args.mock_email {
            Some(email) => self.mock_consent(email, args),
            None => Ok(Arc::new(BrowserConsent::new(!args.no_browser))),
        }
    }

    #[cfg(feature = "mock-idp")]
    fn mock_consent(&self, email: &str, args: &LoginArgs) -> Result<Arc<dyn ConsentPrompt>> {
        let base = self.config.mock_idp_url.as_ref().ok_or_else(|| {
            ClientError::InvalidInput("--mock-email requires PIZZADASH_IDP_URL".to_string())
        })?;
        let mut consent = pizzadash_auth::MockConsent::new(self.http.clone(), base, email)?;
        if let Some(name) = &args.mock_name {
            consent = consent.with_name(name.clone());
        }
        if args.mock_deny {
            consent = consent.denying();
        }
        Ok(Arc::new(consent))
    }

    #[cfg(not(feature = "mock-idp"))]
    fn mock_consent(&self, _email: &str, _args: &LoginArgs) -> Result<Arc<dyn ConsentPrompt>> {
        Err(ClientError::InvalidInput(
            "built without mock IdP support".to_string(),
        ))
    }

    async fn logout(&self) -> Result<String> {
        let mut context = self.restored_context().await;
        context.logout().await?;
        if self.quiet {
            return Ok(String::new());
        }
        Ok(self.render(&serde_json::json!({ "signedOut": true }), |_| {
            "Signed out.".to_string()
        }))
    }

    async fn whoami(&self) -> String {
        let context = self.restored_context().await;
        match context.user() {
            Some(user) => self.render(user, pretty::format_user),
            None => self.render(&None::<UserRecord>, |_| "Not signed in.".to_string()),
        }
    }

    async fn dashboard(&self) -> Result<String> {
        let context = self.restored_context().await;
        let user = Self::signed_in_user(&context)?;
        let view = DashboardView {
            user,
            stats: DashboardStats::from_orders(&sample_orders()),
        };
        Ok(self.render(&view, |v| pretty::format_dashboard(v.user, &v.stats)))
    }

    async fn orders(&self, command: OrdersCommand) -> Result<String> {
        let context = self.restored_context().await;
        Self::signed_in_user(&context)?;

        let orders = sample_orders();
        match command.action {
            OrdersAction::List(args) => {
                let visible = apply_query(&orders, &args.to_query());
                Ok(self.render(&visible, |v| pretty::format_orders(v)))
            }
            OrdersAction::Counts => {
                let counts = StatusCounts::from_orders(&orders);
                Ok(self.render(&counts, pretty::format_counts))
            }
        }
    }

    fn auth_error(&self, code: Option<&str>) -> String {
        self.history.navigate(Route::AuthError);
        let view = AuthErrorView {
            error: code,
            message: auth_error_message(code),
        };
        self.render(&view, |v| pretty::format_auth_error(v.message))
    }

    fn show_config(&self) -> String {
        if !self.config.mode.is_development() {
            return "Debug info is only available in development mode.".to_string();
        }
        let entries = self.config.debug_entries();
        let map: serde_json::Map<String, serde_json::Value> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.clone())))
            .collect();
        self.render(&map, |_| pretty::format_config(&entries))
    }
}

#[cfg(all(test, feature = "mock-idp"))]
mod tests {
    use super::*;
    use crate::cli::orders::ListArgs;
    use pizzadash_auth::mock_idp::{MockIdpHandle, MockIdpServer};
    use pizzadash_core::config::AppMode;
    use pizzadash_core::orders::{OrderTab, PizzaOrder, SortKey};

    async fn app(mode: AppMode, client_id: Option<&str>, format: OutputFormat) -> (App, MockIdpHandle) {
        let idp = MockIdpServer::new(0).spawn().await.unwrap();
        let config = AuthConfig::for_mock_idp(idp.base_url(), mode, client_id);
        (
            App::new(config, Arc::new(MemoryStore::new()), format, false),
            idp,
        )
    }

    fn mock_login(email: &str) -> Commands {
        Commands::Login(LoginArgs {
            mock_email: Some(email.to_string()),
            ..LoginArgs::default()
        })
    }

    fn list(tab: OrderTab) -> Commands {
        Commands::Orders(OrdersCommand {
            action: OrdersAction::List(ListArgs {
                tab,
                search: String::new(),
                status: None,
                sort: SortKey::OrderId,
                unsorted: false,
                desc: false,
            }),
        })
    }

    #[tokio::test]
    async fn test_protected_commands_require_login() {
        let (app, _idp) = app(AppMode::Development, None, OutputFormat::Pretty).await;

        assert!(matches!(
            app.run(Commands::Dashboard).await,
            Err(ClientError::NotSignedIn)
        ));
        assert!(matches!(
            app.run(list(OrderTab::All)).await,
            Err(ClientError::NotSignedIn)
        ));
        assert_eq!(app.history().current(), Route::SignIn);
    }

    #[tokio::test]
    async fn test_login_then_dashboard_then_logout() {
        let (app, _idp) = app(AppMode::Development, None, OutputFormat::Pretty).await;

        let output = app.run(mock_login("chef@example.com")).await.unwrap();
        assert!(output.starts_with("Signed in as chef"));
        assert_eq!(app.history().current(), Route::Dashboard);

        let output = app.run(Commands::Dashboard).await.unwrap();
        assert!(output.starts_with("Welcome back, chef!"));

        let output = app.run(Commands::Whoami).await.unwrap();
        assert!(output.contains("chef@example.com"));

        assert_eq!(app.run(Commands::Logout).await.unwrap(), "Signed out.");
        assert_eq!(app.history().current(), Route::Landing);
        assert_eq!(app.run(Commands::Whoami).await.unwrap(), "Not signed in.");
    }

    #[tokio::test]
    async fn test_auth_error_page_maps_provider_codes() {
        let (app, _idp) = app(AppMode::Development, None, OutputFormat::Pretty).await;

        let output = app
            .run(Commands::AuthError {
                error: Some("AccessDenied".to_string()),
            })
            .await
            .unwrap();
        assert!(output.contains("You do not have permission to sign in."));
        assert_eq!(app.history().current(), Route::AuthError);

        let output = app.run(Commands::AuthError { error: None }).await.unwrap();
        assert!(output.contains("An unknown error occurred during authentication."));
    }

    #[tokio::test]
    async fn test_auth_error_json_echoes_code() {
        let (app, _idp) = app(AppMode::Development, None, OutputFormat::Json).await;

        let output = app
            .run(Commands::AuthError {
                error: Some("Configuration".to_string()),
            })
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["error"], "Configuration");
        assert_eq!(value["message"], "There is a problem with the server configuration.");
    }

    #[tokio::test]
    async fn test_second_login_reports_existing_session() {
        let (app, _idp) = app(AppMode::Production, Some("client-id"), OutputFormat::Pretty).await;

        app.run(mock_login("chef@example.com")).await.unwrap();
        let output = app.run(mock_login("other@example.com")).await.unwrap();
        assert!(output.starts_with("Already signed in as chef"));
    }

    #[tokio::test]
    async fn test_production_without_client_id_is_blocked() {
        let (app, _idp) = app(AppMode::Production, None, OutputFormat::Pretty).await;

        let err = app.run(mock_login("chef@example.com")).await.unwrap_err();
        assert!(matches!(err, ClientError::SignInBlocked(_)));
        assert!(err.to_string().contains("Google Client ID not found"));
    }

    #[tokio::test]
    async fn test_denied_consent_surfaces_message() {
        let (app, _idp) = app(AppMode::Development, None, OutputFormat::Pretty).await;

        let err = app
            .run(Commands::Login(LoginArgs {
                mock_email: Some("chef@example.com".to_string()),
                mock_deny: true,
                ..LoginArgs::default()
            }))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to authenticate with Google");
        assert_eq!(app.run(Commands::Whoami).await.unwrap(), "Not signed in.");
    }

    #[tokio::test]
    async fn test_orders_json_respects_tab() {
        let (app, _idp) = app(AppMode::Development, None, OutputFormat::Json).await;
        app.run(mock_login("chef@example.com")).await.unwrap();

        let output = app.run(list(OrderTab::Delivering)).await.unwrap();
        let orders: Vec<PizzaOrder> = serde_json::from_str(&output).unwrap();
        assert!(!orders.is_empty());
        assert!(orders
            .iter()
            .all(|o| o.status == pizzadash_core::orders::OrderStatus::OutForDelivery));
    }

    #[tokio::test]
    async fn test_config_hidden_outside_development() {
        let (prod, _idp) = app(AppMode::Production, Some("client-id"), OutputFormat::Pretty).await;
        assert!(prod.show_config().contains("only available in development"));

        let (dev, _idp) = app(AppMode::Development, None, OutputFormat::Pretty).await;
        assert!(dev.show_config().contains("PIZZADASH_IDP_URL"));
    }
}
