use chrono::NaiveDate;
use colored::*;
use rapport::RapportError;
use rapport::models::{Friend, Group, Tag};
use rapport::reminders::PendingNotification;
use serde_json::json;

pub struct CliColors;

impl CliColors {
    pub fn success() -> Color {
        Color::TrueColor {
            r: 34,
            g: 197,
            b: 94,
        }
    }

    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }

    pub fn warning() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn info() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }

    pub fn muted() -> Color {
        Color::TrueColor {
            r: 148,
            g: 163,
            b: 184,
        }
    }

    pub fn primary() -> Color {
        Color::White
    }

    pub fn accent() -> Color {
        Color::TrueColor {
            r: 168,
            g: 85,
            b: 247,
        }
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn output_error(error_msg: &str, output_format: &str) {
    if output_format == "json" {
        let error_response = json!({
            "error": true,
            "message": error_msg,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        print_json(&error_response);
    } else {
        eprintln!("{}", format_error(error_msg));
    }
}

/// Output a RapportError, with a stable error code in JSON mode
pub fn output_error_json(error: &RapportError, output_format: &str) {
    if output_format != "json" {
        output_error(&error.to_string(), output_format);
        return;
    }

    let (code, details) = match error {
        RapportError::NotFound { id } => ("NOT_FOUND", Some(json!({ "id": id }))),
        RapportError::DuplicateContact { date } => {
            ("DUPLICATE_CONTACT", Some(json!({ "date": date })))
        }
        RapportError::FutureDate { date } => ("FUTURE_DATE", Some(json!({ "date": date }))),
        RapportError::NoContacts { id } => ("NO_CONTACTS", Some(json!({ "id": id }))),
        RapportError::Persistence(_) => ("PERSISTENCE_ERROR", None),
        RapportError::Validation(_) => ("VALIDATION_ERROR", None),
        RapportError::Configuration(_) => ("CONFIGURATION_ERROR", None),
        RapportError::Logging(_) => ("LOGGING_ERROR", None),
        RapportError::Other(_) => ("ERROR", None),
    };

    let mut response = json!({
        "error": true,
        "code": code,
        "message": error.to_string(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });
    if let Some(details) = details {
        response["details"] = details;
    }
    print_json(&response);
}

pub fn format_success(msg: &str) -> String {
    format!(
        "{} {}",
        "✓".color(CliColors::success()).bold(),
        msg.color(CliColors::success())
    )
}

pub fn format_error(msg: &str) -> String {
    format!(
        "{} {}",
        "✗".color(CliColors::error()).bold(),
        msg.color(CliColors::error())
    )
}

pub fn format_warning(msg: &str) -> String {
    format!(
        "{} {}",
        "⚠".color(CliColors::warning()).bold(),
        msg.color(CliColors::warning())
    )
}

pub fn format_info(msg: &str) -> String {
    format!(
        "{} {}",
        "ℹ".color(CliColors::info()).bold(),
        msg.color(CliColors::info())
    )
}

/// Ten-cell bar for a progress value in `[0, 1]`
pub fn progress_bar(progress: f64) -> String {
    let filled = (progress.clamp(0.0, 1.0) * 10.0).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

pub fn format_progress(progress: f64, overdue: bool) -> ColoredString {
    let bar = progress_bar(progress);
    if overdue {
        bar.color(CliColors::error())
    } else if progress >= 0.75 {
        bar.color(CliColors::warning())
    } else {
        bar.color(CliColors::success())
    }
}

fn format_last_contact(friend: &Friend, today: NaiveDate) -> String {
    match friend.days_since_last_contact(today) {
        None => "never".to_string(),
        Some(0) => "today".to_string(),
        Some(1) => "yesterday".to_string(),
        Some(days) => format!("{} days ago", days),
    }
}

fn format_tags(tags: &[Tag]) -> String {
    tags.iter()
        .map(|tag| format!("#{}", tag.name))
        .collect::<Vec<_>>()
        .join(" ")
}

/// JSON view of a friend including its derived status
pub fn friend_json(friend: &Friend, today: NaiveDate) -> serde_json::Value {
    let mut value = serde_json::to_value(friend).unwrap_or_else(|_| json!({}));
    value["status"] = serde_json::to_value(friend.status(today)).unwrap_or_default();
    value
}

pub fn print_friend(friend: &Friend, today: NaiveDate, groups: &[Group]) {
    let status = friend.status(today);

    println!(
        "{}",
        "━━━ Friend Details ━━━".color(CliColors::accent()).bold()
    );
    println!(
        "{}: {}",
        "ID".color(CliColors::muted()),
        friend.id.color(CliColors::accent()).bold()
    );
    println!(
        "{}: {}",
        "Name".color(CliColors::muted()),
        friend.name.to_string().color(CliColors::primary()).bold()
    );
    println!(
        "{}: {}",
        "Frequency".color(CliColors::muted()),
        friend.contact_frequency
    );
    println!(
        "{}: {} ({})",
        "Last Contact".color(CliColors::muted()),
        status
            .last_contact
            .map(|d| d.to_string())
            .unwrap_or_else(|| "never".to_string()),
        format_last_contact(friend, today)
    );
    println!(
        "{}: {} {:.0}%{}",
        "Progress".color(CliColors::muted()),
        format_progress(status.progress, status.overdue),
        status.progress * 100.0,
        if status.overdue {
            format!(" {}", "OVERDUE".color(CliColors::error()).bold())
        } else {
            String::new()
        }
    );
    println!(
        "{}: {}",
        "Contacts".color(CliColors::muted()),
        friend.contact_count()
    );
    if !friend.contacts().is_empty() {
        let recent: Vec<String> = friend
            .contacts()
            .iter()
            .rev()
            .take(5)
            .map(|d| d.to_string())
            .collect();
        println!(
            "{}: {}",
            "Recent".color(CliColors::muted()),
            recent.join(", ").color(CliColors::muted())
        );
    }
    if !friend.tags.is_empty() {
        println!(
            "{}: {}",
            "Tags".color(CliColors::muted()),
            format_tags(&friend.tags).color(CliColors::info())
        );
    }
    if !groups.is_empty() {
        println!(
            "{}: {}",
            "Groups".color(CliColors::muted()),
            groups
                .iter()
                .map(|g| g.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    if !friend.notes.is_empty() {
        println!("{}: {}", "Notes".color(CliColors::muted()), friend.notes);
    }
    if let Some(uri) = &friend.profile_photo_uri {
        println!("{}: {}", "Avatar".color(CliColors::muted()), uri);
    }
    if let Some(handle) = &friend.notification_id {
        println!(
            "{}: {}",
            "Reminder".color(CliColors::muted()),
            handle.color(CliColors::muted())
        );
    }
}

pub fn print_friend_list(friends: &[Friend], today: NaiveDate) {
    if friends.is_empty() {
        println!("{}", format_info("No friends found."));
        return;
    }

    println!(
        "{:<10} {:<24} {:<14} {:<12} {}",
        "ID".color(CliColors::muted()).bold(),
        "Name".color(CliColors::muted()).bold(),
        "Last Contact".color(CliColors::muted()).bold(),
        "Progress".color(CliColors::muted()).bold(),
        "Tags".color(CliColors::muted()).bold()
    );
    println!("{}", "─".repeat(80).color(CliColors::muted()));

    for friend in friends {
        let status = friend.status(today);
        let name = friend.name.to_string();
        let name = if name.chars().count() > 24 {
            format!("{}...", name.chars().take(21).collect::<String>())
        } else {
            name
        };
        println!(
            "{:<10} {:<24} {:<14} {:<12} {}",
            short_id(&friend.id).color(CliColors::accent()),
            name,
            format_last_contact(friend, today),
            format_progress(status.progress, status.overdue),
            format_tags(&friend.tags).color(CliColors::info())
        );
    }
}

pub fn print_tag_list(tags: &[Tag]) {
    if tags.is_empty() {
        println!("{}", format_info("No tags in use."));
        return;
    }
    for tag in tags {
        println!(
            "{} {} {}",
            short_id(&tag.id).color(CliColors::muted()),
            format!("#{}", tag.name).color(CliColors::info()).bold(),
            tag.color.color(CliColors::muted())
        );
    }
}

/// Print groups; `members` maps each member id to a display name
pub fn print_group_list(groups: &[Group], members: Option<&dyn Fn(&str) -> String>) {
    if groups.is_empty() {
        println!("{}", format_info("No groups found."));
        return;
    }
    for group in groups {
        println!(
            "{} {}",
            group.name.color(CliColors::accent()).bold(),
            format!("({} members)", group.member_ids.len()).color(CliColors::muted())
        );
        if let Some(describe) = members {
            for id in &group.member_ids {
                println!("  - {}", describe(id));
            }
        }
    }
}

pub fn print_pending_notifications(pending: &[PendingNotification]) {
    if pending.is_empty() {
        println!("{}", format_info("No pending reminders."));
        return;
    }
    for entry in pending {
        println!(
            "{}  {}",
            entry
                .fire_at
                .format("%Y-%m-%d %H:%M UTC")
                .to_string()
                .color(CliColors::muted()),
            entry.title.color(CliColors::primary()).bold()
        );
        println!("    {}", entry.body);
    }
}

/// First eight characters of an id, enough to pass back as a prefix
pub fn short_id(id: &str) -> &str {
    id.char_indices().nth(8).map(|(i, _)| &id[..i]).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0), "░".repeat(10));
        assert_eq!(progress_bar(1.0), "█".repeat(10));
        assert_eq!(progress_bar(0.5), format!("{}{}", "█".repeat(5), "░".repeat(5)));
        assert_eq!(progress_bar(7.0), "█".repeat(10));
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0b5c1f7e-5a7e-4f0e"), "0b5c1f7e");
        assert_eq!(short_id("abc"), "abc");
    }
}
