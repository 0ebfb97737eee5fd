pub mod args;
pub mod commands;
pub mod context;
pub mod handlers;
pub mod output;
pub mod utils;

pub use context::RapportCliContext;
pub use output::{
    CliColors, format_error, format_info, format_success, format_warning, output_error,
    output_error_json, print_friend, print_friend_list, print_group_list,
    print_pending_notifications, print_tag_list,
};
pub use utils::{parse_date, parse_frequency, parse_sort_key, resolve_friend_id};
