//! Line-oriented shell hosting the reviewer or admin page.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use jobreview_app::{
    AdminPage, FOOTER_TEXT, Header, PendingRosterAdd, Prompt, ReviewerPage, SessionStore,
};
use jobreview_core::{
    AppKind, ApprovalFilter, Attribute, DescriptionField, EditError, Notice, ReviewerRole,
};
use tracing::{debug, warn};

use crate::display::{profile_card, report_table, reviewer_card};

/// Prompt answered from stdin. End of input counts as cancel.
///
/// [`Prompt`] is synchronous, so the read moves the current worker off the
/// runtime while it waits. Needs the multi-threaded runtime.
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&mut self, title: &str) -> Option<String> {
        tokio::task::block_in_place(|| read_stdin_line(title))
    }
}

/// Print `label` and read one line from stdin on the blocking pool. `None`
/// on end of input.
pub async fn read_line(label: &str) -> Option<String> {
    let label = label.to_string();
    match tokio::task::spawn_blocking(move || read_stdin_line(&label)).await {
        Ok(line) => line,
        Err(e) => {
            warn!(error = %e, "stdin reader task failed");
            None
        }
    }
}

fn read_stdin_line(label: &str) -> Option<String> {
    prompt_line(&mut io::stdin().lock(), &mut io::stdout(), label)
}

fn prompt_line(input: &mut impl BufRead, output: &mut impl Write, label: &str) -> Option<String> {
    if let Err(e) = write!(output, "{label} ").and_then(|()| output.flush()) {
        warn!(error = %e, "could not write prompt");
    }
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        Err(e) => {
            warn!(error = %e, "stdin read failed");
            None
        }
    }
}

/// Date stamped on exported reports, taken in UTC.
pub fn export_date() -> NaiveDate {
    Utc::now().date_naive()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    List(String),
    Filter(ApprovalFilter),
    Select(String),
    Show,
    Edit,
    Section(DescriptionField),
    Set(DescriptionField, String),
    Attr(Attribute, String),
    Options(Attribute),
    Assign(ReviewerRole, String),
    Add(ReviewerRole),
    Save,
    Approve,
    Back,
    Report,
    Export,
    Logout,
    Quit,
}

/// How the shell ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellExit {
    Quit,
    Logout,
}

const HELP_COMMON: &str = "\
commands:
  list [query]              profiles, optionally filtered by name
  select <profile>          load a profile
  show                      print the selected profile
  edit                      toggle edit mode
  section <field>           toggle one section while editing
  set <field> <text>        write a field while its section is open
  save                      save the edit buffer
  back                      return to the profile list
  logout | quit";

const HELP_REVIEWER: &str = "\
  filter all|approved|unapproved";

const HELP_APPROVE: &str = "\
  approve                   approve the selected profile";

const HELP_ADMIN: &str = "\
  attr <vertical|division|subdivision> <value>
  options <vertical|division|subdivision>
  assign <primary|hr|manager> <name>
  add <primary|hr|manager>  add a new roster name
  report                    toggle the approval report
  export                    write the loaded report to a spreadsheet";

const HELP_FIELDS: &str = "\
fields: purpose responsibilities manager travel physical workconditions
  minqualifications preferredqualifications mineducation preferrededucation
  minexperience certifications competencies";

/// Help text for `app`. `approve` is listed only while the reviewer may
/// approve the selected profile.
pub fn help_text(app: AppKind, can_approve: bool) -> String {
    let mut parts = vec![HELP_COMMON];
    match app {
        AppKind::Reviewer => {
            parts.push(HELP_REVIEWER);
            if can_approve {
                parts.push(HELP_APPROVE);
            }
        }
        AppKind::Admin => parts.push(HELP_ADMIN),
    }
    parts.push(HELP_FIELDS);
    parts.join("\n")
}

/// Parse one shell line. Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };
    let (arg, tail) = match rest.split_once(char::is_whitespace) {
        Some((a, t)) => (a, t.trim()),
        None => (rest, ""),
    };
    let required = |what: &str| {
        if rest.is_empty() {
            Err(format!("{word}: missing {what}"))
        } else {
            Ok(())
        }
    };

    let cmd = match word.to_ascii_lowercase().as_str() {
        "help" | "?" => ShellCommand::Help,
        "list" | "ls" => ShellCommand::List(rest.to_string()),
        "filter" => {
            required("filter")?;
            ShellCommand::Filter(rest.parse().map_err(|e| format!("{e}"))?)
        }
        "select" => {
            required("profile name")?;
            ShellCommand::Select(rest.to_string())
        }
        "show" => ShellCommand::Show,
        "edit" => ShellCommand::Edit,
        "section" => {
            required("field")?;
            ShellCommand::Section(rest.parse().map_err(|e| format!("{e}"))?)
        }
        "set" => {
            required("field")?;
            ShellCommand::Set(arg.parse().map_err(|e| format!("{e}"))?, tail.to_string())
        }
        "attr" => {
            required("attribute")?;
            ShellCommand::Attr(arg.parse().map_err(|e| format!("{e}"))?, tail.to_string())
        }
        "options" => {
            required("attribute")?;
            ShellCommand::Options(rest.parse().map_err(|e| format!("{e}"))?)
        }
        "assign" => {
            required("role")?;
            if tail.is_empty() {
                return Err("assign: missing name".to_string());
            }
            ShellCommand::Assign(arg.parse().map_err(|e| format!("{e}"))?, tail.to_string())
        }
        "add" => {
            required("role")?;
            ShellCommand::Add(rest.parse().map_err(|e| format!("{e}"))?)
        }
        "save" => ShellCommand::Save,
        "approve" => ShellCommand::Approve,
        "back" => ShellCommand::Back,
        "report" => ShellCommand::Report,
        "export" => ShellCommand::Export,
        "logout" => ShellCommand::Logout,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command: {other} (try 'help')")),
    };
    Ok(Some(cmd))
}

fn print_notice(notice: &Notice) {
    println!("{notice}");
}

fn not_here(cmd: &ShellCommand, app: &str) {
    println!("{cmd:?} is not available in the {app} app");
}

/// Run the reviewer page until quit, logout, or end of input.
pub async fn run_reviewer(
    page: &mut ReviewerPage,
    header: &Header,
    store: &mut SessionStore,
) -> Result<ShellExit> {
    println!("{}", header.banner(Some(page.session())));
    if let Some(notice) = page.load().await {
        print_notice(&notice);
    }
    let exit = loop {
        let Some(line) = read_line(">").await else {
            break ShellExit::Quit;
        };
        let cmd = match parse_command(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        };
        debug!(?cmd, "reviewer command");
        match cmd {
            ShellCommand::Help => {
                println!("{}", help_text(AppKind::Reviewer, page.can_approve()))
            }
            ShellCommand::List(query) => {
                for name in page.search(&query) {
                    println!("  {}", page.label(name));
                }
            }
            ShellCommand::Filter(filter) => {
                page.set_filter(filter);
                println!("filter: {filter}");
            }
            ShellCommand::Select(name) => {
                if page.select(&name) {
                    print!("{}", reviewer_card(page.editor(), page.can_approve()));
                } else {
                    println!("no such profile in your list: {name}");
                }
            }
            ShellCommand::Show => {
                print!("{}", reviewer_card(page.editor(), page.can_approve()))
            }
            ShellCommand::Edit => report_edit(page.toggle_edit().map(|on| {
                if on { "editing" } else { "viewing" }
            })),
            ShellCommand::Section(field) => report_edit(page.toggle_section(field).map(|on| {
                if on { "section open" } else { "section closed" }
            })),
            ShellCommand::Set(field, text) => {
                report_edit(page.edit_field(field, text).map(|()| "updated"))
            }
            ShellCommand::Save => match page.save().await {
                Ok(notice) => print_notice(&notice),
                Err(e) => println!("{e}"),
            },
            ShellCommand::Approve => match page.approve().await {
                Ok(notice) => print_notice(&notice),
                Err(e) => println!("{e}"),
            },
            ShellCommand::Back => page.reset_selection(),
            ShellCommand::Logout => {
                let to = header.logout(store)?;
                println!("logged out; go to {to}");
                break ShellExit::Logout;
            }
            ShellCommand::Quit => break ShellExit::Quit,
            other => not_here(&other, "reviewer"),
        }
    };
    println!("{FOOTER_TEXT}");
    Ok(exit)
}

/// Run the admin page until quit, logout, or end of input.
pub async fn run_admin(
    page: &mut AdminPage,
    header: &Header,
    store: &mut SessionStore,
    export_dir: &Path,
) -> Result<ShellExit> {
    println!("{}", header.banner(Some(page.session())));
    if let Some(notice) = page.load().await {
        print_notice(&notice);
    }
    let mut pending: Vec<PendingRosterAdd> = Vec::new();
    let exit = loop {
        let Some(line) = read_line(">").await else {
            break ShellExit::Quit;
        };
        let cmd = match parse_command(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        };
        debug!(?cmd, "admin command");
        match cmd {
            ShellCommand::Help => println!("{}", help_text(AppKind::Admin, false)),
            ShellCommand::List(query) => {
                for name in page.search(&query) {
                    println!("  {name}");
                }
            }
            ShellCommand::Select(name) => {
                if page.select(&name) {
                    print!("{}", profile_card(page.editor()));
                } else {
                    println!("no such profile: {name}");
                }
            }
            ShellCommand::Show => print!("{}", profile_card(page.editor())),
            ShellCommand::Edit => report_edit(page.toggle_edit().map(|on| {
                if on { "editing" } else { "viewing (changes discarded)" }
            })),
            ShellCommand::Section(field) => report_edit(page.toggle_section(field).map(|on| {
                if on { "section open" } else { "section closed (field reset)" }
            })),
            ShellCommand::Set(field, text) => {
                report_edit(page.edit_field(field, text).map(|()| "updated"))
            }
            ShellCommand::Attr(attr, value) => {
                report_edit(page.set_attribute(attr, value).map(|()| "updated"))
            }
            ShellCommand::Options(attr) => {
                for value in page.attribute_options(attr) {
                    println!("  {value}");
                }
            }
            ShellCommand::Assign(role, name) => {
                if !page.roster().names(role).contains(&name) {
                    println!("{name} is not a known {}; use 'add' first", role.label());
                    continue;
                }
                report_edit(page.assign_reviewer(role, name).map(|()| "assigned"))
            }
            ShellCommand::Add(role) => match page.add_reviewer(role, &mut StdinPrompt) {
                Ok(Some(add)) => {
                    println!("added {} as {}", add.name, role.label());
                    pending.push(add);
                }
                Ok(None) => println!("cancelled"),
                Err(e) => println!("{e}"),
            },
            ShellCommand::Save => match page.save().await {
                Ok(notice) => print_notice(&notice),
                Err(e) => println!("{e}"),
            },
            ShellCommand::Report => {
                if page.toggle_report().await {
                    print!("{}", report_table(&page.report_lines()));
                } else {
                    println!("report hidden");
                }
            }
            ShellCommand::Export => {
                print_notice(&page.download_report(export_dir, export_date()));
            }
            ShellCommand::Back => {
                if page.report_visible() {
                    page.toggle_report().await;
                }
            }
            ShellCommand::Logout => {
                let to = header.logout(store)?;
                println!("logged out; go to {to}");
                break ShellExit::Logout;
            }
            ShellCommand::Quit => break ShellExit::Quit,
            other => not_here(&other, "admin"),
        }
    };
    for add in pending {
        if let Err(e) = add.handle.await {
            warn!(name = %add.name, error = %e, "roster add task failed");
        }
    }
    println!("{FOOTER_TEXT}");
    Ok(exit)
}

fn report_edit(result: Result<&str, EditError>) {
    match result {
        Ok(msg) => println!("{msg}"),
        Err(e) => println!("{e}"),
    }
}
