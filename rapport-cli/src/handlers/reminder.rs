//! Reminder listing

use crate::args::RemindersArgs;
use crate::context::RapportCliContext;
use crate::output::*;
use rapport::RapportError;

pub async fn handle_reminders_command(
    args: RemindersArgs,
    ctx: &RapportCliContext,
    output_format: &str,
) -> rapport::Result<()> {
    let ledger = ctx.rapport.notifications();

    let result = if args.dismiss {
        ledger.take_due().await
    } else if args.due {
        ledger.due().await
    } else {
        ledger.pending().await
    };
    let pending = result.map_err(|e| RapportError::Other(e.to_string()))?;

    if output_format == "json" {
        print_json(&pending);
    } else {
        print_pending_notifications(&pending);
        if args.dismiss && !pending.is_empty() {
            println!(
                "{}",
                format_info(&format!("Dismissed {} reminder(s).", pending.len()))
            );
        }
    }

    Ok(())
}
