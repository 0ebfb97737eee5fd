//! Group command handlers

use crate::commands::GroupCommands;
use crate::context::RapportCliContext;
use crate::output::*;
use crate::utils::resolve_friend_id;
use serde_json::json;
use std::collections::HashMap;

pub async fn handle_group_command(
    cmd: GroupCommands,
    ctx: &RapportCliContext,
    output_format: &str,
) -> rapport::Result<()> {
    let groups = ctx.rapport.groups();

    match cmd {
        GroupCommands::Create(args) => {
            let group = groups.create(&args.name).await?;
            if output_format == "json" {
                print_json(&group);
            } else {
                println!(
                    "{}",
                    format_success(&format!("Created group '{}'", group.name))
                );
            }
        }

        GroupCommands::Delete(args) => {
            let group = groups.delete(&args.name).await?;
            if output_format == "json" {
                print_json(&json!({ "deleted": group.name }));
            } else {
                println!(
                    "{}",
                    format_success(&format!("Deleted group '{}'", group.name))
                );
            }
        }

        GroupCommands::Add(args) => {
            let id = resolve_friend_id(ctx, &args.friend).await?;
            let added = groups.add_member(&args.group, &id).await?;
            if output_format == "json" {
                print_json(&json!({ "group": args.group, "id": id, "added": added }));
            } else if added {
                println!(
                    "{}",
                    format_success(&format!("Added to '{}'", args.group))
                );
            } else {
                println!(
                    "{}",
                    format_info(&format!("Already a member of '{}'", args.group))
                );
            }
        }

        GroupCommands::Remove(args) => {
            let id = resolve_friend_id(ctx, &args.friend).await?;
            let removed = groups.remove_member(&args.group, &id).await?;
            if output_format == "json" {
                print_json(&json!({ "group": args.group, "id": id, "removed": removed }));
            } else if removed {
                println!(
                    "{}",
                    format_success(&format!("Removed from '{}'", args.group))
                );
            } else {
                println!(
                    "{}",
                    format_info(&format!("Not a member of '{}'", args.group))
                );
            }
        }

        GroupCommands::List(args) => {
            let list = groups.list().await;
            if output_format == "json" {
                print_json(&list);
            } else if args.members {
                let names: HashMap<String, String> = ctx
                    .rapport
                    .registry()
                    .friends()
                    .await
                    .into_iter()
                    .map(|f| (f.id, f.name.to_string()))
                    .collect();
                let describe: &dyn Fn(&str) -> String = &|id: &str| {
                    names
                        .get(id)
                        .cloned()
                        .unwrap_or_else(|| format!("{} (unknown)", id))
                };
                print_group_list(&list, Some(describe));
            } else {
                print_group_list(&list, None);
            }
        }
    }

    Ok(())
}
