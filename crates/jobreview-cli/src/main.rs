mod config;
mod display;
mod shell;

use std::sync::Arc;

use anyhow::{Result, bail};
use clap::Parser;
use jobreview_app::{
    AdminPage, Header, LoginOutcome, LoginPage, ReviewerPage, Router, SessionStore,
};
use jobreview_client::{HttpReviewApi, ReviewApi};
use jobreview_core::{AppKind, Page, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, Command};
use crate::display::report_table;
use crate::shell::{ShellExit, export_date, read_line, run_admin, run_reviewer};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,jobreview=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(app = %cli.app, api = %cli.api_url, "jobreview v{}", env!("CARGO_PKG_VERSION"));

    let api: Arc<dyn ReviewApi> = Arc::new(HttpReviewApi::new(cli.api_url.clone()));
    let mut store = cli.session_store()?;

    match cli.command() {
        Command::Open { path } => open(&cli, api, &mut store, path).await,
        Command::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => read_line("Password:").await.unwrap_or_default(),
            };
            match login(cli.app, api, &mut store, &username, &password).await {
                Some(to) => {
                    println!("logged in; go to {to}");
                    Ok(())
                }
                None => bail!("login failed"),
            }
        }
        Command::Logout => {
            let to = Header::new(cli.app).logout(&mut store)?;
            println!("logged out; go to {to}");
            Ok(())
        }
        Command::Report { export } => {
            if cli.app != AppKind::Admin {
                bail!("the approval report is only available in the admin app");
            }
            let session = require_session(&store)?;
            let mut page = AdminPage::new(api, session);
            page.toggle_report().await;
            print!("{}", report_table(&page.report_lines()));
            if export {
                println!("{}", page.download_report(&cli.export_dir, export_date()));
            }
            Ok(())
        }
    }
}

/// Guarded navigation: follow the router, logging in first when it lands on
/// the login page, then hand the review page to the shell.
async fn open(
    cli: &Cli,
    api: Arc<dyn ReviewApi>,
    store: &mut SessionStore,
    path: Option<String>,
) -> Result<()> {
    let router = Router::new(cli.app);
    let header = Header::new(cli.app);
    let mut path = path.unwrap_or_else(|| cli.app.review_path().to_string());
    loop {
        match router.navigate(&path, store) {
            Page::Login => {
                println!("{}", header.banner(None));
                let Some(username) = read_line("Username:").await else {
                    return Ok(());
                };
                let password = read_line("Password:").await.unwrap_or_default();
                if let Some(to) = login(cli.app, api.clone(), store, &username, &password).await {
                    path = to.to_string();
                }
            }
            Page::Review => {
                let session = require_session(store)?;
                let exit = match cli.app {
                    AppKind::Reviewer => {
                        let mut page = ReviewerPage::new(api.clone(), session);
                        run_reviewer(&mut page, &header, store).await?
                    }
                    AppKind::Admin => {
                        let mut page = AdminPage::new(api.clone(), session);
                        run_admin(&mut page, &header, store, &cli.export_dir).await?
                    }
                };
                match exit {
                    ShellExit::Quit => return Ok(()),
                    ShellExit::Logout => path = cli.app.review_path().to_string(),
                }
            }
        }
    }
}

/// Submit credentials; alerts are printed and yield `None`.
async fn login(
    app: AppKind,
    api: Arc<dyn ReviewApi>,
    store: &mut SessionStore,
    username: &str,
    password: &str,
) -> Option<&'static str> {
    match LoginPage::new(app, api).submit(store, username, password).await {
        LoginOutcome::Navigate(to) => Some(to),
        LoginOutcome::Alert(msg) => {
            println!("{msg}");
            None
        }
    }
}

fn require_session(store: &SessionStore) -> Result<Session> {
    match store.load() {
        Some(session) if session.is_authenticated() => Ok(session),
        _ => bail!("not logged in; run `jobreview --app {} login <username>`", store.app()),
    }
}
