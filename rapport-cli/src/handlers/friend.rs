//! Friend command handlers

use crate::commands::FriendCommands;
use crate::context::RapportCliContext;
use crate::output::*;
use crate::utils::{find_tag, parse_frequency, parse_sort_key, resolve_friend_id};
use colored::Colorize;
use rapport::models::{Friend, Name};
use serde_json::json;

pub async fn handle_friend_command(
    cmd: FriendCommands,
    ctx: &RapportCliContext,
    output_format: &str,
) -> rapport::Result<()> {
    let registry = ctx.rapport.registry();
    let today = ctx.rapport.today();

    match cmd {
        FriendCommands::Add(args) => {
            let frequency = args.frequency.as_deref().map(parse_frequency).transpose()?;

            let mut friend = registry
                .add_friend(Name::new(args.first_name, args.last_name))
                .await?;
            if let Some(frequency) = frequency {
                friend = registry.set_contact_frequency(&friend.id, frequency).await?;
            }
            if let Some(notes) = args.notes {
                friend = registry.set_notes(&friend.id, &notes).await?;
            }

            if output_format == "json" {
                print_json(&friend_json(&friend, today));
            } else {
                println!(
                    "{}",
                    format_success(&format!(
                        "Added {} ({})",
                        friend.name,
                        friend.id.color(CliColors::accent())
                    ))
                );
            }
        }

        FriendCommands::List(args) => {
            let key = parse_sort_key(&args.sort)?;
            let mut friends = registry.sorted(Some(key)).await;

            if args.overdue {
                friends.retain(|f| f.is_overdue(today));
            }
            if let Some(tag) = args.tag {
                match find_tag(ctx, &tag).await {
                    Some(tag) => friends.retain(|f| f.has_tag(&tag.id)),
                    None => friends.clear(),
                }
            }

            if output_format == "json" {
                let values: Vec<_> = friends.iter().map(|f| friend_json(f, today)).collect();
                print_json(&values);
            } else {
                print_friend_list(&friends, today);
            }
        }

        FriendCommands::Show(args) => {
            let id = resolve_friend_id(ctx, &args.id).await?;
            let friend = require(registry.find(&id).await, &id)?;
            let groups = ctx.rapport.groups().groups_for(&id).await;

            if output_format == "json" {
                let mut value = friend_json(&friend, today);
                value["groups"] = json!(groups.iter().map(|g| &g.name).collect::<Vec<_>>());
                print_json(&value);
            } else {
                print_friend(&friend, today, &groups);
            }
        }

        FriendCommands::Remove(args) => {
            let id = resolve_friend_id(ctx, &args.id).await?;
            let removed = registry.remove_relationship(&id).await?;

            if output_format == "json" {
                print_json(&json!({ "removed": removed.id }));
            } else {
                println!(
                    "{}",
                    format_success(&format!("Removed {} ({})", removed.name, removed.id))
                );
            }
        }

        FriendCommands::Rename(args) => {
            let id = resolve_friend_id(ctx, &args.id).await?;
            let friend = registry
                .rename(&id, Name::new(args.first_name, args.last_name))
                .await?;
            report_update(&friend, today, output_format, "Renamed to");
        }

        FriendCommands::Notes(args) => {
            let id = resolve_friend_id(ctx, &args.id).await?;
            let friend = registry.set_notes(&id, &args.notes).await?;
            report_update(&friend, today, output_format, "Updated notes for");
        }

        FriendCommands::Frequency(args) => {
            let id = resolve_friend_id(ctx, &args.id).await?;
            let frequency = parse_frequency(&args.frequency)?;
            let friend = registry.set_contact_frequency(&id, frequency).await?;
            if output_format == "json" {
                print_json(&friend_json(&friend, today));
            } else {
                println!(
                    "{}",
                    format_success(&format!(
                        "{} is now {}",
                        friend.name, friend.contact_frequency
                    ))
                );
            }
        }

        FriendCommands::Avatar(args) => {
            let id = resolve_friend_id(ctx, &args.id).await?;
            let cleared = args.uri.is_none();
            let friend = registry.set_avatar(&id, args.uri).await?;
            let verb = if cleared {
                "Cleared avatar for"
            } else {
                "Updated avatar for"
            };
            report_update(&friend, today, output_format, verb);
        }
    }

    Ok(())
}

fn require(friend: Option<Friend>, id: &str) -> rapport::Result<Friend> {
    friend.ok_or_else(|| rapport::RapportError::NotFound { id: id.to_string() })
}

fn report_update(friend: &Friend, today: chrono::NaiveDate, output_format: &str, verb: &str) {
    if output_format == "json" {
        print_json(&friend_json(friend, today));
    } else {
        println!(
            "{}",
            format_success(&format!("{} {}", verb, friend.name))
        );
    }
}
