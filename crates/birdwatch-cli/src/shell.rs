//! Interactive session over one `AppContext`.
//!
//! The monitoring store lives only as long as the process, so account and
//! alert edits are made here rather than as one-shot subcommands.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use birdwatch_core::context::AppContext;
use birdwatch_core::model::*;
use clap::Parser;
use owo_colors::OwoColorize;

use crate::render;

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
enum ShellCommand {
    /// Start tracking an account (a leading @ is added if missing)
    AddAccount { handle: String },
    /// Stop tracking an account and delete its alerts
    RemoveAccount { id: AccountId },
    /// Create an alert for a tracked account
    AddAlert {
        /// Account the alert watches
        #[arg(long)]
        account: AccountId,
        /// new_post, mention, follower_change, repost, like
        #[arg(long = "type", default_value = "new_post")]
        kind: AlertKind,
        /// email, telegram, webhook
        #[arg(long, default_value = "email")]
        channel: NotificationChannel,
        /// immediate, hourly, daily, weekly
        #[arg(long, default_value = "immediate")]
        frequency: NotificationFrequency,
        /// Free-text trigger condition, e.g. "keyword: AI"
        #[arg(long)]
        condition: Option<String>,
    },
    /// Change fields of an existing alert
    UpdateAlert {
        id: AlertId,
        #[arg(long = "type")]
        kind: Option<AlertKind>,
        #[arg(long)]
        channel: Option<NotificationChannel>,
        #[arg(long)]
        frequency: Option<NotificationFrequency>,
        #[arg(long)]
        condition: Option<String>,
        /// Remove the trigger condition
        #[arg(long, conflicts_with = "condition")]
        clear_condition: bool,
        #[arg(long)]
        account: Option<AccountId>,
        /// active or paused
        #[arg(long)]
        status: Option<AlertStatus>,
    },
    /// Pause an active alert or resume a paused one
    ToggleAlert { id: AlertId },
    /// Delete an alert
    RemoveAlert { id: AlertId },
    /// List tracked accounts
    Accounts,
    /// List alerts
    Alerts,
    /// Dashboard numbers
    Summary,
    /// Analytics charts
    Analytics,
    /// Show the signed-in user
    Whoami,
    /// Sign out and leave the shell
    Logout,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Exit,
}

pub fn run(ctx: &AppContext) -> Result<()> {
    let user = ctx.sessions.require()?;
    println!(
        "Signed in as {}. Type {} for commands, {} to leave.",
        user.name.bold(),
        "help".cyan(),
        "quit".cyan()
    );

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} ", "birdwatch>".blue());
        std::io::stdout().flush().context("failed to flush prompt")?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("failed to read from stdin")?;
        let tokens = match tokenize(&line) {
            Ok(tokens) if tokens.is_empty() => continue,
            Ok(tokens) => tokens,
            Err(e) => {
                eprintln!("{}", e.red());
                continue;
            }
        };

        match ShellCommand::try_parse_from(tokens) {
            Ok(cmd) => {
                if let Flow::Exit = dispatch(ctx, cmd) {
                    break;
                }
            }
            // Covers `help` and `--help` as well as real parse errors.
            Err(e) => {
                let _ = e.print();
            }
        }
    }
    Ok(())
}

fn dispatch(ctx: &AppContext, cmd: ShellCommand) -> Flow {
    let monitor = &ctx.monitor;
    match cmd {
        ShellCommand::AddAccount { handle } => {
            let handle = handle.trim();
            if handle.is_empty() || handle == "@" {
                eprintln!("{}", "handle cannot be empty".red());
                return Flow::Continue;
            }
            let account = monitor.add_account(handle);
            println!("Tracking {} (id {})", account.handle.cyan(), account.id);
            let slots = monitor.summary(ctx.config.monitor.account_slots).slots;
            if slots.used > slots.limit {
                println!(
                    "{}",
                    format!("Using {} of {} account slots", slots.used, slots.limit).yellow()
                );
            }
        }
        ShellCommand::RemoveAccount { id } => {
            let handle = monitor.account(id).map(|a| a.handle);
            let orphaned = monitor.alerts_for(id).len();
            if monitor.remove_account(id) {
                println!(
                    "Stopped tracking {} and removed {} alert{}",
                    handle.unwrap_or_default().cyan(),
                    orphaned,
                    if orphaned == 1 { "" } else { "s" }
                );
            } else {
                println!("No account with id {id}");
            }
        }
        ShellCommand::AddAlert {
            account,
            kind,
            channel,
            frequency,
            condition,
        } => {
            let mut fields = NewAlert::new(kind, account)
                .with_channel(channel)
                .with_frequency(frequency);
            fields.trigger_condition = condition.filter(|c| !c.trim().is_empty());
            let alert = monitor.add_alert(fields);
            println!(
                "Created {} alert {} for {}",
                alert.kind.label().magenta(),
                alert.id,
                monitor.account_handle(alert.account_id)
            );
        }
        ShellCommand::UpdateAlert {
            id,
            kind,
            channel,
            frequency,
            condition,
            clear_condition,
            account,
            status,
        } => {
            let trigger_condition = if clear_condition {
                Some(None)
            } else {
                condition.map(Some)
            };
            let patch = AlertPatch {
                kind,
                trigger_condition,
                channel,
                frequency,
                account_id: account,
                status,
            };
            if patch.is_empty() {
                println!("Nothing to update");
                return Flow::Continue;
            }
            match monitor.update_alert(id, &patch) {
                Some(alert) => println!("Updated alert {} ({})", alert.id, alert.status),
                None => println!("No alert with id {id}"),
            }
        }
        ShellCommand::ToggleAlert { id } => match monitor.toggle_alert(id) {
            Some(alert) if alert.is_active() => println!("Resumed alert {}", alert.id),
            Some(alert) => println!("Paused alert {}", alert.id),
            None => println!("No alert with id {id}"),
        },
        ShellCommand::RemoveAlert { id } => {
            if monitor.remove_alert(id) {
                println!("Removed alert {id}");
            } else {
                println!("No alert with id {id}");
            }
        }
        ShellCommand::Accounts => render::print_accounts(&monitor.accounts()),
        ShellCommand::Alerts => render::print_alerts(&monitor.snapshot()),
        ShellCommand::Summary => {
            render::print_summary(&monitor.summary(ctx.config.monitor.account_slots))
        }
        ShellCommand::Analytics => render::print_analytics(&monitor.analytics()),
        ShellCommand::Whoami => match ctx.sessions.current() {
            Some(session) => render::print_session(&session),
            None => println!("Not signed in"),
        },
        ShellCommand::Logout => {
            ctx.sessions.logout();
            println!("Signed out");
            return Flow::Exit;
        }
        ShellCommand::Quit => return Flow::Exit,
    }
    Flow::Continue
}

/// Split a line on whitespace, keeping double-quoted runs together.
fn tokenize(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err("unterminated quote".to_string());
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}
