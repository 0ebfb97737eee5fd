//! Tag command handlers

use crate::commands::TagCommands;
use crate::context::RapportCliContext;
use crate::output::*;
use crate::utils::{find_tag, resolve_friend_id};
use rapport::RapportError;
use rapport::models::Tag;
use serde_json::json;

pub async fn handle_tag_command(
    cmd: TagCommands,
    ctx: &RapportCliContext,
    output_format: &str,
) -> rapport::Result<()> {
    let registry = ctx.rapport.registry();

    match cmd {
        TagCommands::Add(args) => {
            let id = resolve_friend_id(ctx, &args.id).await?;
            let name = args.name.trim();
            if name.is_empty() {
                return Err(RapportError::Validation(
                    "Tag name cannot be empty".to_string(),
                ));
            }

            // Reuse a tag already in use so it stays one tag across friends
            let tag = match find_tag(ctx, name).await {
                Some(existing) => existing,
                None => Tag::new(name, args.color),
            };
            let added = registry.add_tag(&id, tag.clone()).await?;

            if output_format == "json" {
                print_json(&json!({ "id": id, "tag": tag, "added": added }));
            } else if added {
                println!("{}", format_success(&format!("Tagged with #{}", tag.name)));
            } else {
                println!(
                    "{}",
                    format_info(&format!("Already tagged with #{}", tag.name))
                );
            }
        }

        TagCommands::Remove(args) => {
            let id = resolve_friend_id(ctx, &args.id).await?;
            let tag = find_tag(ctx, &args.tag)
                .await
                .ok_or_else(|| RapportError::NotFound {
                    id: args.tag.clone(),
                })?;
            let removed = registry.remove_tag(&id, &tag.id).await?;

            if output_format == "json" {
                print_json(&json!({ "id": id, "tag": tag, "removed": removed }));
            } else if removed {
                println!("{}", format_success(&format!("Removed #{}", tag.name)));
            } else {
                println!(
                    "{}",
                    format_info(&format!("Not tagged with #{}", tag.name))
                );
            }
        }

        TagCommands::List => {
            let tags = registry.all_tags_in_use().await;
            if output_format == "json" {
                print_json(&tags);
            } else {
                print_tag_list(&tags);
            }
        }
    }

    Ok(())
}
