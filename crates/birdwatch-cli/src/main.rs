mod render;
mod shell;

use anyhow::{Context, Result};
use birdwatch_core::auth::{DEMO_EMAIL, DEMO_PASSWORD};
use birdwatch_core::config::BirdwatchConfig;
use birdwatch_core::context::AppContext;
use birdwatch_core::error::BirdwatchError;
use birdwatch_core::model::*;
use clap::Parser;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "birdwatch",
    about = "Birdwatch: monitor X accounts, alerts and analytics",
    version
)]
enum Cli {
    /// Sign in and remember the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in
    Signup {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Forget the saved session
    Logout,
    /// Show the signed-in user
    Whoami {
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Overview: accounts, alerts and slot usage
    Dashboard {
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// List tracked accounts
    Accounts {
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// List alerts
    Alerts {
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Post volume, follower growth and engagement
    Analytics {
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive shell for adding and removing accounts and alerts
    Shell,
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Serialize)]
struct DashboardJson<'a> {
    user: &'a Session,
    summary: DashboardSummary,
    alerts: AlertBreakdown,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let loaded = BirdwatchConfig::load(Some(&cwd));
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => BirdwatchConfig::default_config(),
    };
    init_tracing(&config);
    if let Err(e) = loaded {
        tracing::warn!("ignoring config files: {e}");
    }

    let result = run(cli, config).await;
    if let Err(ref err) = result {
        if let Some(e) = err.downcast_ref::<BirdwatchError>() {
            if e.is_user_facing() {
                eprintln!("{}", e.to_string().red());
                match e {
                    BirdwatchError::InvalidCredentials => eprintln!(
                        "  {} {} / {}",
                        "Demo account:".dimmed(),
                        DEMO_EMAIL,
                        DEMO_PASSWORD
                    ),
                    BirdwatchError::NotAuthenticated => eprintln!(
                        "  Run {} first.",
                        "birdwatch login --email <EMAIL> --password <PASSWORD>".cyan()
                    ),
                    _ => {}
                }
                std::process::exit(1);
            }
        }
    }
    result
}

fn init_tracing(config: &BirdwatchConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

async fn run(cli: Cli, config: BirdwatchConfig) -> Result<()> {
    let ctx = open_context(config)?;
    match cli {
        Cli::Login { email, password } => {
            let session = ctx
                .sessions
                .login(&email, &password)
                .await
                .context("failed to sign in")?;
            println!("Welcome back, {}!", session.name.bold());
            Ok(())
        }
        Cli::Signup {
            name,
            email,
            password,
        } => {
            let session = ctx
                .sessions
                .signup(&name, &email, &password)
                .await
                .context("failed to create account")?;
            println!(
                "Account created. Signed in as {} on the {} plan.",
                session.name.bold(),
                session.subscription
            );
            Ok(())
        }
        Cli::Logout => {
            if ctx.sessions.is_authenticated() {
                ctx.sessions.logout();
                println!("Signed out");
            } else {
                println!("Not signed in");
            }
            Ok(())
        }
        Cli::Whoami { json } => {
            let session = ctx.sessions.require()?;
            if json {
                print_json(&session)?;
            } else {
                render::print_session(&session);
            }
            Ok(())
        }
        Cli::Dashboard { json } => cmd_dashboard(&ctx, json),
        Cli::Accounts { json } => {
            ctx.sessions.require()?;
            let accounts = ctx.monitor.accounts();
            if json {
                print_json(&accounts)?;
            } else {
                render::print_accounts(&accounts);
            }
            Ok(())
        }
        Cli::Alerts { json } => {
            ctx.sessions.require()?;
            let snapshot = ctx.monitor.snapshot();
            if json {
                print_json(&snapshot.alerts)?;
            } else {
                render::print_alerts(&snapshot);
            }
            Ok(())
        }
        Cli::Analytics { json } => {
            ctx.sessions.require()?;
            let analytics = ctx.monitor.analytics();
            if json {
                print_json(&analytics)?;
            } else {
                render::print_analytics(&analytics);
            }
            Ok(())
        }
        Cli::Shell => shell::run(&ctx),
        Cli::Config => {
            let rendered =
                toml::to_string_pretty(&ctx.config).context("failed to serialize config")?;
            print!("{rendered}");
            Ok(())
        }
    }
}

fn open_context(config: BirdwatchConfig) -> Result<AppContext> {
    let backend = config.storage.backend.clone();
    AppContext::new(config).with_context(|| format!("failed to open {backend} session storage"))
}

fn cmd_dashboard(ctx: &AppContext, json: bool) -> Result<()> {
    let user = ctx.sessions.require()?;
    let snapshot = ctx.monitor.snapshot();
    let summary = snapshot.summary(ctx.config.monitor.account_slots);

    if json {
        let out = DashboardJson {
            user: &user,
            summary,
            alerts: snapshot.alert_breakdown(),
        };
        print_json(&out)?;
        return Ok(());
    }

    println!(
        "Signed in as {} ({})",
        user.name.bold(),
        if user.is_pro() {
            "pro".green().to_string()
        } else {
            "free".yellow().to_string()
        }
    );
    println!("  {}   {}", "Storage:".dimmed(), describe_storage(ctx));
    println!();
    render::print_summary(&summary);
    println!();
    render::print_alerts(&snapshot);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to serialize JSON output")?;
    println!("{out}");
    Ok(())
}

fn describe_storage(ctx: &AppContext) -> String {
    let storage = ctx.storage();
    match storage.location() {
        Some(path) => format!("{} ({})", storage.backend_name(), path.display()),
        None => storage.backend_name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_open_failure_names_the_step() {
        let dir = std::env::temp_dir().join(format!("birdwatch-cli-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();

        let mut config = BirdwatchConfig::ephemeral();
        config.storage.backend = "file".to_string();
        config.storage.path = Some(blocker.join("state").to_string_lossy().to_string());

        let err = open_context(config).err().expect("storage under a file cannot open");
        assert_eq!(err.to_string(), "failed to open file session storage");
        assert!(matches!(
            err.downcast_ref::<BirdwatchError>(),
            Some(BirdwatchError::Storage(_))
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn rejected_login_stays_recognizable_under_context() {
        let ctx = open_context(BirdwatchConfig::ephemeral()).unwrap();
        let err = ctx
            .sessions
            .login(DEMO_EMAIL, "wrong")
            .await
            .context("failed to sign in")
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BirdwatchError>(),
            Some(BirdwatchError::InvalidCredentials)
        ));
    }
}
