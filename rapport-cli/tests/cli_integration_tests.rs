//! Integration tests for the Rapport CLI
//!
//! These drive the same session and helpers the binary uses against an
//! isolated data directory.

use rapport::models::{ContactFrequency, Friend, Name, Tag};
use rapport::RapportError;
use rapport_cli::utils::find_tag;
use rapport_cli::{RapportCliContext, parse_date, parse_frequency, parse_sort_key, resolve_friend_id};
use rapport::sorting::SortKey;
use tempfile::TempDir;

async fn create_test_context() -> (RapportCliContext, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let ctx = RapportCliContext::new(Some(temp_dir.path().join("data")), None)
        .await
        .expect("Failed to open session");
    (ctx, temp_dir)
}

fn friend_with_id(id: &str, first: &str) -> Friend {
    let mut friend = Friend::new(Name::new(first, ""));
    friend.id = id.to_string();
    friend
}

#[tokio::test]
async fn test_resolve_friend_id_by_prefix() {
    let (ctx, _temp) = create_test_context().await;
    let registry = ctx.rapport.registry();
    registry
        .insert_friend(friend_with_id("abc123", "Ada"))
        .await
        .unwrap();
    registry
        .insert_friend(friend_with_id("abd456", "Bea"))
        .await
        .unwrap();

    assert_eq!(resolve_friend_id(&ctx, "abc123").await.unwrap(), "abc123");
    assert_eq!(resolve_friend_id(&ctx, "abd").await.unwrap(), "abd456");

    match resolve_friend_id(&ctx, "ab").await {
        Err(RapportError::Validation(msg)) => {
            assert!(msg.contains("Ambiguous"));
            assert!(msg.contains("abc123"));
            assert!(msg.contains("abd456"));
        }
        other => panic!("expected ambiguity error, got {:?}", other),
    }

    assert!(matches!(
        resolve_friend_id(&ctx, "zzz").await,
        Err(RapportError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_contact_flow_persists_across_sessions() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("data");
    let today;
    let id;

    {
        let ctx = RapportCliContext::new(Some(data_dir.clone()), None)
            .await
            .unwrap();
        today = ctx.rapport.today();
        let friend = ctx
            .rapport
            .registry()
            .add_friend(Name::new("Grace", "Hopper"))
            .await
            .unwrap();
        id = friend.id.clone();

        let date = parse_date("yesterday", today).unwrap();
        ctx.rapport.registry().log_contact_on(&id, date).await.unwrap();
        ctx.rapport
            .registry()
            .set_contact_frequency(&id, parse_frequency("weekly").unwrap())
            .await
            .unwrap();
    }

    let ctx = RapportCliContext::new(Some(data_dir), None).await.unwrap();
    let friend = ctx.rapport.registry().find(&id).await.expect("friend reloaded");
    assert_eq!(friend.contact_count(), 1);
    assert_eq!(friend.last_contact(), Some(parse_date("yesterday", today).unwrap()));
    assert_eq!(friend.contact_frequency, ContactFrequency::Weekly);
    assert!(!friend.is_overdue(today));
}

#[tokio::test]
async fn test_logging_contact_schedules_reminder() {
    let (ctx, _temp) = create_test_context().await;
    let friend = ctx
        .rapport
        .registry()
        .add_friend(Name::new("Linus", ""))
        .await
        .unwrap();

    ctx.rapport.registry().log_contact_now(&friend.id).await.unwrap();

    let pending = ctx.rapport.notifications().pending().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert!(pending[0].body.contains("Linus") || pending[0].title.contains("Linus"));

    let stored = ctx.rapport.registry().find(&friend.id).await.unwrap();
    assert_eq!(stored.notification_id.as_deref(), Some(pending[0].id.as_str()));

    // Not due for another month
    assert!(ctx.rapport.notifications().due().await.unwrap().is_empty());

    ctx.rapport
        .registry()
        .remove_relationship(&friend.id)
        .await
        .unwrap();
    assert!(ctx.rapport.notifications().pending().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_group_membership_follows_friend_removal() {
    let (ctx, _temp) = create_test_context().await;
    let groups = ctx.rapport.groups();
    let friend = ctx
        .rapport
        .registry()
        .add_friend(Name::new("Margaret", "Hamilton"))
        .await
        .unwrap();

    groups.create("Apollo").await.unwrap();
    assert!(groups.add_member("Apollo", &friend.id).await.unwrap());
    assert!(!groups.add_member("Apollo", &friend.id).await.unwrap());
    assert_eq!(groups.groups_for(&friend.id).await.len(), 1);

    ctx.rapport
        .registry()
        .remove_relationship(&friend.id)
        .await
        .unwrap();

    let apollo = groups.find("Apollo").await.unwrap();
    assert!(!apollo.has_member(&friend.id));
}

#[tokio::test]
async fn test_find_tag_by_name_or_id() {
    let (ctx, _temp) = create_test_context().await;
    let friend = ctx
        .rapport
        .registry()
        .add_friend(Name::new("Alan", "Turing"))
        .await
        .unwrap();
    let tag = Tag::new("Work", Some("#336699".to_string()));
    ctx.rapport
        .registry()
        .add_tag(&friend.id, tag.clone())
        .await
        .unwrap();

    assert_eq!(find_tag(&ctx, "work").await.map(|t| t.id), Some(tag.id.clone()));
    assert_eq!(find_tag(&ctx, &tag.id).await.map(|t| t.name), Some("Work".to_string()));
    assert!(find_tag(&ctx, "family").await.is_none());
}

#[tokio::test]
async fn test_clear_removes_everyone() {
    let (ctx, _temp) = create_test_context().await;
    let registry = ctx.rapport.registry();
    registry.add_friend(Name::new("One", "")).await.unwrap();
    registry.add_friend(Name::new("Two", "")).await.unwrap();

    assert_eq!(registry.clear().await.unwrap(), 2);
    assert!(registry.is_empty().await);
}

#[test]
fn test_argument_parsers_reject_garbage() {
    let today = chrono::NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    assert!(parse_date("last week", today).is_err());
    assert!(parse_frequency("fortnightly").is_err());
    assert_eq!(parse_frequency("14").unwrap(), ContactFrequency::Biweekly);
    assert_eq!(
        parse_sort_key("most-contacts").unwrap(),
        SortKey::MostContactsFirst
    );
    assert!(parse_sort_key("alphabetical").is_err());
}
