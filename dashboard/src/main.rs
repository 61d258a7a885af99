//! School dashboard demo
//!
//! Mounts the dashboard, logs in, reads a notification, closes the drawer and
//! logs out through the `ctrl+h` shortcut, printing the page after each step.
//!
//! Run with: `cargo run --bin dashboard -- --email user@school.com --password password123`
//! Pass `--offline` (or set `DASHBOARD_OFFLINE=1`) to use the built-in data
//! instead of `http://localhost:5173`.

use anyhow::Context;
use clap::Parser;
use dashboard::{
    DashboardApi, DashboardConfig, DashboardContext, HttpApi, KeyEvent, KeyboardEvents, LoginForm,
    LogoutShortcut, StaticApi,
};
use dashboard_core::environment::SystemClock;
use std::sync::Arc;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// School dashboard demo
#[derive(Parser, Debug)]
#[command(name = "dashboard")]
#[command(about = "Walks the school dashboard through a login session", long_about = None)]
struct Args {
    /// Email submitted through the login form
    #[arg(long, default_value = "user@school.com")]
    email: String,

    /// Password submitted through the login form
    #[arg(long, default_value = "password123")]
    password: String,

    /// Serve built-in notifications and courses instead of fetching them
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let mut config = DashboardConfig::from_env().context("loading configuration")?;
    config.offline |= args.offline;
    let api: Arc<dyn DashboardApi> = if config.offline {
        tracing::info!("Offline mode: serving built-in notifications and courses");
        Arc::new(StaticApi::fixtures())
    } else {
        tracing::info!(url = %config.api_base_url, "Fetching from API");
        Arc::new(HttpApi::new(config.api_base_url.clone()))
    };

    let ctx = DashboardContext::new(api, Arc::new(SystemClock), &config.store);

    let (logged_in_tx, mut logged_in_rx) = watch::channel(false);
    let _state_log = ctx.subscribe(move |state| {
        tracing::debug!(
            logged_in = state.is_logged_in(),
            notifications = state.notifications.len(),
            courses = state.courses.len(),
            drawer_open = state.drawer_open,
            "State changed"
        );
        logged_in_tx.send_replace(state.is_logged_in());
    });

    let keyboard = KeyboardEvents::default();
    let shortcut = LogoutShortcut::install(&keyboard, ctx.clone(), |message| println!("{message}"));

    ctx.mount().await?.wait().await;
    println!("{}\n", ctx.render().await);

    let mut form = LoginForm::new();
    form.change_email(args.email);
    form.change_password(args.password);

    match form.submit() {
        Some(login) => ctx.dispatch(login).await?.wait().await,
        None => {
            let reason = form.validate().err().map(|e| e.to_string()).unwrap_or_default();
            tracing::warn!(email = form.email(), %reason, "Login form rejected");
        },
    }
    println!("{}\n", ctx.render().await);

    if let Some(first) = ctx.snapshot().await.notifications.ids().first().copied() {
        ctx.mark_notification_read(first).await?;
    }
    ctx.hide_drawer().await?;
    println!("{}\n", ctx.render().await);

    if *logged_in_rx.borrow() {
        keyboard.press(KeyEvent::ctrl('h'));
        logged_in_rx
            .wait_for(|logged_in| !logged_in)
            .await
            .context("waiting for logout")?;
        println!("{}", ctx.render().await);
    }

    shortcut.uninstall().await;
    ctx.shutdown().await?;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dashboard=debug,dashboard_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn credentials_default_to_demo_account() {
        let args = Args::try_parse_from(["dashboard"]).unwrap();
        assert_eq!(args.email, "user@school.com");
        assert_eq!(args.password, "password123");
        assert!(!args.offline);
    }

    #[test]
    fn named_options_override_defaults() {
        let args = Args::try_parse_from([
            "dashboard",
            "--email",
            "a@b.co",
            "--password",
            "12345678",
            "--offline",
        ])
        .unwrap();
        assert_eq!(args.email, "a@b.co");
        assert_eq!(args.password, "12345678");
        assert!(args.offline);
    }

    #[test]
    fn stray_positional_arguments_are_rejected() {
        assert!(Args::try_parse_from(["dashboard", "a@b.co"]).is_err());
    }
}
