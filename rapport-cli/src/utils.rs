use crate::context::RapportCliContext;
use chrono::{Duration, NaiveDate};
use rapport::RapportError;
use rapport::models::{ContactFrequency, Friend, Tag};
use rapport::sorting::SortKey;

/// Parse a contact date relative to `today`.
pub fn parse_date(input: &str, today: NaiveDate) -> rapport::Result<NaiveDate> {
    match input.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => Ok(today - Duration::days(1)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d").map_err(|_| {
            RapportError::Validation(format!(
                "Invalid date '{}': expected YYYY-MM-DD, 'today' or 'yesterday'",
                input
            ))
        }),
    }
}

pub fn parse_frequency(input: &str) -> rapport::Result<ContactFrequency> {
    input
        .parse::<ContactFrequency>()
        .map_err(RapportError::Validation)
}

pub fn parse_sort_key(input: &str) -> rapport::Result<SortKey> {
    input.parse::<SortKey>().map_err(RapportError::Validation)
}

/// Resolve a full friend id from an id or unambiguous id prefix.
pub async fn resolve_friend_id(ctx: &RapportCliContext, id: &str) -> rapport::Result<String> {
    let registry = ctx.rapport.registry();
    if registry.find(id).await.is_some() {
        return Ok(id.to_string());
    }

    let friends = registry.friends().await;
    let matches: Vec<&Friend> = friends.iter().filter(|f| f.id.starts_with(id)).collect();

    match matches.as_slice() {
        [] => Err(RapportError::NotFound { id: id.to_string() }),
        [friend] => Ok(friend.id.clone()),
        _ => {
            let suggestions: Vec<String> = matches
                .iter()
                .take(5)
                .map(|f| format!("  - {} ({})", f.id, f.name))
                .collect();
            Err(RapportError::Validation(format!(
                "Ambiguous ID prefix '{}': {} matches found.\nSuggestions:\n{}",
                id,
                matches.len(),
                suggestions.join("\n")
            )))
        }
    }
}

/// Find a tag in use by id or (case-insensitive) name.
pub async fn find_tag(ctx: &RapportCliContext, tag: &str) -> Option<Tag> {
    let tags = ctx.rapport.registry().all_tags_in_use().await;
    tags.iter()
        .find(|t| t.id == tag)
        .or_else(|| tags.iter().find(|t| t.name.eq_ignore_ascii_case(tag)))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(parse_date("today", today).unwrap(), today);
        assert_eq!(
            parse_date("Yesterday", today).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            parse_date("2023-12-24", today).unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 24).unwrap()
        );
        assert!(parse_date("24/12/2023", today).is_err());
    }

    #[test]
    fn test_parse_frequency_and_sort() {
        assert_eq!(parse_frequency("weekly").unwrap(), ContactFrequency::Weekly);
        assert_eq!(parse_frequency("90").unwrap(), ContactFrequency::Quarterly);
        assert!(parse_frequency("fortnightly-ish").is_err());
        assert_eq!(parse_sort_key("most-contacts").unwrap(), SortKey::MostContactsFirst);
    }
}
