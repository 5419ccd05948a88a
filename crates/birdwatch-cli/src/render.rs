use birdwatch_core::model::*;
use birdwatch_core::monitor::MonitoringSnapshot;
use owo_colors::OwoColorize;

/// `1234567` → `1,234,567`.
pub fn fmt_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn print_session(session: &Session) {
    let tier = match session.subscription {
        SubscriptionTier::Pro => "pro".green().to_string(),
        SubscriptionTier::Free => "free".yellow().to_string(),
    };
    println!("{}", session.name.bold());
    println!("  {}     {}", "Email:".dimmed(), session.email);
    println!("  {}      {}", "Plan:".dimmed(), tier);
    println!(
        "  {}    {}",
        "Joined:".dimmed(),
        session.joined_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!("  {}        {}", "ID:".dimmed(), session.id);
}

pub fn print_accounts(accounts: &[TrackedAccount]) {
    if accounts.is_empty() {
        println!("No tracked accounts. Add one with `add-account <handle>`.");
        return;
    }

    println!(
        "  {}  {}  {}  {}  {}  {}",
        format!("{:<5}", "ID").dimmed(),
        format!("{:<20}", "Handle").dimmed(),
        format!("{:>13}", "Followers").dimmed(),
        format!("{:>9}", "Mentions").dimmed(),
        format!("{:<8}", "Status").dimmed(),
        "Added".dimmed(),
    );
    println!("{}", "─".repeat(78).dimmed());

    for account in accounts {
        let status = format!("{:<8}", account.status.to_string());
        let status = if account.is_active() {
            status.green().to_string()
        } else {
            status.dimmed().to_string()
        };
        println!(
            "  {}  {:<20}  {:>13}  {:>9}  {}  {}",
            format!("{:<5}", account.id).cyan(),
            account.handle,
            fmt_count(account.follower_count),
            fmt_count(account.mention_count),
            status,
            account.added_date,
        );
    }

    println!("{}", "─".repeat(78).dimmed());
    println!(
        "  {} account{}",
        accounts.len(),
        if accounts.len() == 1 { "" } else { "s" }
    );
}

pub fn print_alerts(snapshot: &MonitoringSnapshot) {
    let alerts = &snapshot.alerts;
    if alerts.is_empty() {
        println!("No alerts configured.");
        return;
    }

    println!(
        "  {}  {}  {}  {}  {}  {}  {}",
        format!("{:<5}", "ID").dimmed(),
        format!("{:<16}", "Type").dimmed(),
        format!("{:<14}", "Account").dimmed(),
        format!("{:<9}", "Channel").dimmed(),
        format!("{:<10}", "Frequency").dimmed(),
        format!("{:<7}", "Status").dimmed(),
        "Condition".dimmed(),
    );
    println!("{}", "─".repeat(90).dimmed());

    for alert in alerts {
        let status = format!("{:<7}", alert.status.to_string());
        let status = if alert.is_active() {
            status.green().to_string()
        } else {
            status.yellow().to_string()
        };
        println!(
            "  {}  {}  {:<14}  {:<9}  {:<10}  {}  {}",
            format!("{:<5}", alert.id).cyan(),
            format!("{:<16}", alert.kind.label()).magenta(),
            snapshot.account_handle(alert.account_id),
            alert.channel.label(),
            alert.frequency.label(),
            status,
            alert.trigger_condition.as_deref().unwrap_or("-").dimmed(),
        );
    }

    println!("{}", "─".repeat(90).dimmed());
    let breakdown = snapshot.alert_breakdown();
    println!(
        "  {} active · {} paused · {} immediate",
        breakdown.active.to_string().green(),
        breakdown.paused.to_string().yellow(),
        breakdown.immediate
    );
}

pub fn print_summary(summary: &DashboardSummary) {
    println!("{}", "Dashboard".bold());
    println!(
        "  {}  {}",
        "Tracked accounts:".dimmed(),
        summary.tracked_accounts.to_string().cyan()
    );
    println!(
        "  {}     {}",
        "Active alerts:".dimmed(),
        summary.active_alerts.to_string().cyan()
    );
    println!(
        "  {}   {}",
        "Total followers:".dimmed(),
        fmt_count(summary.total_followers)
    );
    println!(
        "  {}    {}",
        "Total mentions:".dimmed(),
        fmt_count(summary.total_mentions)
    );

    let slots = format!(
        "{}/{} ({:.0}%)",
        summary.slots.used,
        summary.slots.limit,
        summary.slots.ratio() * 100.0
    );
    let slots = if summary.slots.is_full() {
        slots.red().to_string()
    } else {
        slots
    };
    println!("  {}     {}", "Account slots:".dimmed(), slots);
}

pub fn print_analytics(analytics: &AnalyticsSnapshot) {
    if analytics.is_empty() {
        println!("No analytics available yet.");
        return;
    }

    println!("{}", "Post volume".bold());
    print_series(&analytics.post_volume);
    println!();

    println!("{}", "Follower growth".bold());
    print_series(&analytics.follower_growth);
    let delta = analytics.follower_delta();
    let delta = if delta >= 0 {
        format!("+{}", fmt_count(delta.unsigned_abs())).green().to_string()
    } else {
        format!("-{}", fmt_count(delta.unsigned_abs())).red().to_string()
    };
    println!("  {} {}", "Net change:".dimmed(), delta);
    println!();

    let engagement = &analytics.engagement;
    println!("{}", "Engagement".bold());
    println!(
        "  {}        {}",
        "Total posts:".dimmed(),
        fmt_count(engagement.total_posts)
    );
    println!(
        "  {}     {}",
        "Total mentions:".dimmed(),
        fmt_count(engagement.total_mentions)
    );
    println!(
        "  {} {:.1}%",
        "Average engagement:".dimmed(),
        engagement.average_engagement
    );
    if let Some(peak) = analytics.peak_post_day() {
        println!(
            "  {}           {} ({} posts)",
            "Peak day:".dimmed(),
            peak.date,
            peak.count
        );
    }
    println!(
        "  {}       {}",
        "Top keywords:".dimmed(),
        engagement.top_keywords.join(", ")
    );
}

fn print_series(series: &[DailyCount]) {
    let max = series.iter().map(|d| d.count).max().unwrap_or(0);
    let min = series.iter().map(|d| d.count).min().unwrap_or(0);
    for point in series {
        let width = bar_width(point.count, min, max);
        println!(
            "  {}  {}  {}",
            point.date.to_string().dimmed(),
            "█".repeat(width).blue(),
            fmt_count(point.count)
        );
    }
}

/// Bar length for `count`, scaled to the series range so small day-to-day
/// moves stay visible. Always between 4 and 40.
fn bar_width(count: u64, min: u64, max: u64) -> usize {
    if max <= min {
        return 20;
    }
    let scaled = u128::from(count.saturating_sub(min)) * 36 / u128::from(max - min);
    4 + scaled.min(36) as usize
}
