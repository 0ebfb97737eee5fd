//! Contact command handlers

use crate::commands::ContactCommands;
use crate::context::RapportCliContext;
use crate::output::*;
use crate::utils::{parse_date, resolve_friend_id};
use serde_json::json;

pub async fn handle_contact_command(
    cmd: ContactCommands,
    ctx: &RapportCliContext,
    output_format: &str,
) -> rapport::Result<()> {
    let registry = ctx.rapport.registry();
    let today = ctx.rapport.today();

    match cmd {
        ContactCommands::Log(args) => {
            let id = resolve_friend_id(ctx, &args.id).await?;
            let friend = match args.date {
                Some(date) => {
                    let date = parse_date(&date, today)?;
                    registry.log_contact_on(&id, date).await?
                }
                None => registry.log_contact_now(&id).await?,
            };

            if output_format == "json" {
                print_json(&friend_json(&friend, today));
            } else {
                let last = friend
                    .last_contact()
                    .map(|d| d.to_string())
                    .unwrap_or_default();
                println!(
                    "{}",
                    format_success(&format!(
                        "Logged contact with {} (last contact {})",
                        friend.name, last
                    ))
                );
                if friend.notification_id.is_none() && registry.reminder_policy().is_some() {
                    println!("{}", format_warning("No reminder could be scheduled."));
                }
            }
        }

        ContactCommands::Undo(args) => {
            let id = resolve_friend_id(ctx, &args.id).await?;
            let removed = registry.undo_last_contact(&id).await?;

            if output_format == "json" {
                print_json(&json!({ "id": id, "removed": removed }));
            } else {
                println!(
                    "{}",
                    format_success(&format!("Removed the contact on {}", removed))
                );
            }
        }

        ContactCommands::Remove(args) => {
            let id = resolve_friend_id(ctx, &args.id).await?;
            let date = parse_date(&args.date, today)?;
            let removed = registry.remove_contact_on(&id, date).await?;

            if output_format == "json" {
                print_json(&json!({ "id": id, "date": date, "removed": removed }));
            } else if removed {
                println!(
                    "{}",
                    format_success(&format!("Removed the contact on {}", date))
                );
            } else {
                println!(
                    "{}",
                    format_warning(&format!("No contact was logged on {}", date))
                );
            }
        }
    }

    Ok(())
}
