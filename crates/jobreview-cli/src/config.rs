use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jobreview_app::{FileStorage, SessionStore};
use jobreview_core::AppKind;

/// Terminal front-end for the job-profile reviewer and admin apps.
#[derive(Parser, Debug)]
#[command(name = "jobreview", author, version, about)]
pub struct Cli {
    /// Base URL of the review backend.
    #[arg(long, env = "JOBREVIEW_API_URL", default_value = "http://127.0.0.1:5000")]
    pub api_url: String,

    /// Which app to run: reviewer or admin.
    #[arg(long, env = "JOBREVIEW_APP", default_value = "reviewer")]
    pub app: AppKind,

    /// Keep the session in this JSON file between runs. Each app keeps its
    /// own section, so both can share one file. Without it the session lasts
    /// as long as the process.
    #[arg(long, env = "JOBREVIEW_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Where approval report spreadsheets are written.
    #[arg(long, env = "JOBREVIEW_EXPORT_DIR", default_value = ".")]
    pub export_dir: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Navigate to a path and start the interactive shell (the default).
    Open {
        /// Route to open; defaults to the app's review page.
        path: Option<String>,
    },
    /// Log in and store the session.
    Login {
        username: String,
        /// Read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Clear the stored session.
    Logout,
    /// Print the approval report (admin app only).
    Report {
        /// Also write the report to a spreadsheet in the export directory.
        #[arg(long)]
        export: bool,
    },
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Open { path: None })
    }

    pub fn session_store(&self) -> Result<SessionStore> {
        match &self.session_file {
            Some(path) => {
                let storage = FileStorage::open(path, self.app)
                    .with_context(|| format!("opening session file {}", path.display()))?;
                Ok(SessionStore::new(self.app, Box::new(storage)))
            }
            None => Ok(SessionStore::in_memory(self.app)),
        }
    }
}
