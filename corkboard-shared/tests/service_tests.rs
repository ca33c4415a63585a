/// Façade tests against the in-memory store
///
/// Covers ownership checks (NotFound before Forbidden), the reorder and move
/// protocol, cascades, and account management. No database required.

use std::sync::Arc;

use chrono::Duration;
use corkboard_shared::auth::authenticator::JwtAuthenticator;
use corkboard_shared::auth::middleware::AuthContext;
use corkboard_shared::auth::password::HashParams;
use corkboard_shared::error::BoardError;
use corkboard_shared::models::board::Board;
use corkboard_shared::models::card::{Card, CardPriority};
use corkboard_shared::models::list::BoardList;
use corkboard_shared::service::accounts::{ProfileChanges, Registration};
use corkboard_shared::service::boards::{BoardChanges, NewBoard};
use corkboard_shared::service::cards::{CardChanges, CardMove, NewCard};
use corkboard_shared::service::lists::{ListChanges, NewList};
use corkboard_shared::service::{BoardService, Page};
use corkboard_shared::store::memory::MemoryStore;
use uuid::Uuid;

const SECRET: &str = "test-secret-key-that-is-32-bytes-long";

fn service() -> BoardService {
    let authenticator = JwtAuthenticator::new(SECRET, Duration::minutes(30))
        .with_hash_params(HashParams::insecure_fast());
    BoardService::new(Arc::new(MemoryStore::new()), Arc::new(authenticator))
}

async fn register(service: &BoardService, name: &str) -> AuthContext {
    let user = service
        .register(Registration {
            email: format!("{}@example.com", name),
            username: name.to_string(),
            password: format!("{}-password", name),
            full_name: None,
        })
        .await
        .unwrap();
    AuthContext::new(user.id)
}

async fn board(service: &BoardService, ctx: &AuthContext, title: &str) -> Board {
    service
        .create_board(
            ctx,
            NewBoard {
                title: title.to_string(),
                description: None,
            },
        )
        .await
        .unwrap()
}

async fn list(service: &BoardService, ctx: &AuthContext, board_id: Uuid, title: &str, position: i32) -> BoardList {
    service
        .create_list(
            ctx,
            board_id,
            NewList {
                title: title.to_string(),
                position: Some(position),
            },
        )
        .await
        .unwrap()
}

fn new_card(title: &str, position: i32) -> NewCard {
    NewCard {
        title: title.to_string(),
        description: None,
        position: Some(position),
        assigned_to_id: None,
        due_date: None,
        priority: None,
    }
}

async fn card(service: &BoardService, ctx: &AuthContext, list_id: Uuid, title: &str, position: i32) -> Card {
    service.create_card(ctx, list_id, new_card(title, position)).await.unwrap()
}

fn titles(cards: &[Card]) -> Vec<&str> {
    cards.iter().map(|c| c.title.as_str()).collect()
}

// Accounts

#[tokio::test]
async fn test_register_login_authenticate() {
    let service = service();
    let ctx = register(&service, "ada").await;

    let token = service.login("ada@example.com", "ada-password").await.unwrap();
    assert_eq!(token.token_type, "bearer");

    let caller = service.authenticate(&token.access_token).await.unwrap();
    assert_eq!(caller, ctx);

    let me = service.current_user(&caller).await.unwrap();
    assert_eq!(me.username, "ada");
    assert!(me.is_active);
    assert!(!me.is_superuser);
}

#[tokio::test]
async fn test_register_conflicts() {
    let service = service();
    register(&service, "ada").await;

    let err = service
        .register(Registration {
            email: "ada@example.com".to_string(),
            username: "someone".to_string(),
            password: "password".to_string(),
            full_name: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, BoardError::Conflict(ref m) if m == "Email already registered"));

    let err = service
        .register(Registration {
            email: "other@example.com".to_string(),
            username: "ada".to_string(),
            password: "password".to_string(),
            full_name: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, BoardError::Conflict(ref m) if m == "Username already taken"));
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let service = service();
    register(&service, "ada").await;

    let err = service.login("ada@example.com", "wrong").await.unwrap_err();
    assert!(matches!(err, BoardError::Unauthorized(_)));

    let err = service.login("nobody@example.com", "ada-password").await.unwrap_err();
    assert!(matches!(err, BoardError::Unauthorized(_)));
}

#[tokio::test]
async fn test_inactive_user_cannot_login_or_use_token() {
    let service = service();
    let ctx = register(&service, "ada").await;
    let token = service.login("ada@example.com", "ada-password").await.unwrap();

    service
        .update_profile(
            &ctx,
            ProfileChanges {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let err = service.login("ada@example.com", "ada-password").await.unwrap_err();
    assert!(matches!(err, BoardError::Unauthorized(ref m) if m == "Inactive user"));

    let err = service.authenticate(&token.access_token).await.unwrap_err();
    assert!(matches!(err, BoardError::Unauthorized(_)));
}

#[tokio::test]
async fn test_authenticate_rejects_garbage_and_deleted_users() {
    let service = service();
    let ctx = register(&service, "ada").await;
    let token = service.login("ada@example.com", "ada-password").await.unwrap();

    assert!(matches!(
        service.authenticate("not-a-token").await,
        Err(BoardError::Unauthorized(_))
    ));

    service.delete_account(&ctx).await.unwrap();
    assert!(matches!(
        service.authenticate(&token.access_token).await,
        Err(BoardError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn test_update_profile_email_collision_leaves_email_unchanged() {
    let service = service();
    let ada = register(&service, "ada").await;
    register(&service, "bob").await;

    let err = service
        .update_profile(
            &ada,
            ProfileChanges {
                email: Some("bob@example.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BoardError::Conflict(_)));

    let me = service.current_user(&ada).await.unwrap();
    assert_eq!(me.email, "ada@example.com");
}

#[tokio::test]
async fn test_update_profile_fields() {
    let service = service();
    let ada = register(&service, "ada").await;

    let me = service
        .update_profile(
            &ada,
            ProfileChanges {
                email: Some("ada@example.com".to_string()),
                full_name: Some(Some("Ada Lovelace".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(me.full_name.as_deref(), Some("Ada Lovelace"));

    let me = service
        .update_profile(
            &ada,
            ProfileChanges {
                full_name: Some(None),
                username: Some("countess".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(me.full_name.is_none());
    assert_eq!(me.username, "countess");
}

#[tokio::test]
async fn test_change_password() {
    let service = service();
    let ada = register(&service, "ada").await;

    let err = service.change_password(&ada, "wrong", "new-password").await.unwrap_err();
    assert!(matches!(err, BoardError::InvalidOperation(ref m) if m == "Incorrect password"));

    service.change_password(&ada, "ada-password", "new-password").await.unwrap();

    assert!(service.login("ada@example.com", "ada-password").await.is_err());
    assert!(service.login("ada@example.com", "new-password").await.is_ok());
}

#[tokio::test]
async fn test_ensure_superuser_is_idempotent() {
    let service = service();

    let first = service.ensure_superuser("root@example.com", "root", "root-password").await.unwrap();
    assert!(first.is_superuser);

    let second = service.ensure_superuser("root@example.com", "root", "other").await.unwrap();
    assert_eq!(first.id, second.id);
    assert!(service.login("root@example.com", "root-password").await.is_ok());
}

#[tokio::test]
async fn test_health() {
    assert!(service().health().await.is_ok());
}

// Boards

#[tokio::test]
async fn test_list_boards_returns_only_own_boards() {
    let service = service();
    let ada = register(&service, "ada").await;
    let bob = register(&service, "bob").await;

    let a1 = board(&service, &ada, "a1").await;
    board(&service, &bob, "b1").await;
    let a2 = board(&service, &ada, "a2").await;

    let boards = service.list_boards(&ada, Page::default()).await.unwrap();
    let ids: Vec<Uuid> = boards.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![a1.id, a2.id]);
    assert!(boards.iter().all(|b| b.owner_id == ada.user_id));
}

#[tokio::test]
async fn test_list_boards_pagination() {
    let service = service();
    let ada = register(&service, "ada").await;
    for i in 0..5 {
        board(&service, &ada, &format!("board-{}", i)).await;
    }

    let page = service.list_boards(&ada, Page::new(Some(1), Some(2))).await.unwrap();
    let names: Vec<&str> = page.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(names, vec!["board-1", "board-2"]);

    let rest = service.list_boards(&ada, Page::new(Some(4), None)).await.unwrap();
    assert_eq!(rest.len(), 1);
}

#[tokio::test]
async fn test_secret_board_is_forbidden_to_other_user() {
    let service = service();
    let ada = register(&service, "ada").await;
    let bob = register(&service, "bob").await;
    let secret = board(&service, &ada, "Secret").await;

    let err = service.get_board(&bob, secret.id).await.unwrap_err();
    assert!(matches!(err, BoardError::Forbidden(_)));

    let err = service
        .update_board(
            &bob,
            secret.id,
            BoardChanges {
                title: Some("Mine now".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BoardError::Forbidden(_)));

    let err = service.delete_board(&bob, secret.id).await.unwrap_err();
    assert!(matches!(err, BoardError::Forbidden(_)));

    assert_eq!(service.get_board(&ada, secret.id).await.unwrap().board.title, "Secret");
}

#[tokio::test]
async fn test_missing_board_is_not_found() {
    let service = service();
    let ada = register(&service, "ada").await;

    let err = service.get_board(&ada, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, BoardError::NotFound(_)));

    let err = service.delete_board(&ada, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, BoardError::NotFound(_)));
}

#[tokio::test]
async fn test_update_board_clears_description() {
    let service = service();
    let ada = register(&service, "ada").await;
    let created = service
        .create_board(
            &ada,
            NewBoard {
                title: "Roadmap".to_string(),
                description: Some("Q3".to_string()),
            },
        )
        .await
        .unwrap();

    let updated = service
        .update_board(
            &ada,
            created.id,
            BoardChanges {
                title: None,
                description: Some(None),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Roadmap");
    assert!(updated.description.is_none());
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_get_board_nests_lists_and_cards_in_order() {
    let service = service();
    let ada = register(&service, "ada").await;
    let b = board(&service, &ada, "B").await;
    let done = list(&service, &ada, b.id, "Done", 5).await;
    let todo = list(&service, &ada, b.id, "Todo", 1).await;
    card(&service, &ada, todo.id, "second", 2).await;
    card(&service, &ada, todo.id, "first", 1).await;
    card(&service, &ada, done.id, "shipped", 0).await;

    let detail = service.get_board(&ada, b.id).await.unwrap();
    let names: Vec<&str> = detail.lists.iter().map(|l| l.list.title.as_str()).collect();
    assert_eq!(names, vec!["Todo", "Done"]);
    assert_eq!(titles(&detail.lists[0].cards), vec!["first", "second"]);
    assert_eq!(titles(&detail.lists[1].cards), vec!["shipped"]);
}

#[tokio::test]
async fn test_delete_board_cascades() {
    let service = service();
    let ada = register(&service, "ada").await;
    let b = board(&service, &ada, "B").await;
    let l = list(&service, &ada, b.id, "L", 0).await;
    let c = card(&service, &ada, l.id, "C", 0).await;

    service.delete_board(&ada, b.id).await.unwrap();

    assert!(matches!(service.get_list(&ada, l.id).await, Err(BoardError::NotFound(_))));
    assert!(matches!(service.get_card(&ada, c.id).await, Err(BoardError::NotFound(_))));
}

// Lists

#[tokio::test]
async fn test_create_list_defaults_to_position_zero() {
    let service = service();
    let ada = register(&service, "ada").await;
    let b = board(&service, &ada, "B").await;

    let l = service
        .create_list(
            &ada,
            b.id,
            NewList {
                title: "Inbox".to_string(),
                position: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(l.position, 0);
    assert_eq!(l.board_id, b.id);
}

#[tokio::test]
async fn test_list_operations_check_ownership() {
    let service = service();
    let ada = register(&service, "ada").await;
    let bob = register(&service, "bob").await;
    let b = board(&service, &ada, "B").await;
    let l = list(&service, &ada, b.id, "L", 0).await;

    assert!(matches!(
        service.create_list(&bob, b.id, NewList { title: "x".to_string(), position: None }).await,
        Err(BoardError::Forbidden(_))
    ));
    assert!(matches!(service.lists_in_board(&bob, b.id).await, Err(BoardError::Forbidden(_))));
    assert!(matches!(service.get_list(&bob, l.id).await, Err(BoardError::Forbidden(_))));
    assert!(matches!(
        service.update_list(&bob, l.id, ListChanges::default()).await,
        Err(BoardError::Forbidden(_))
    ));
    assert!(matches!(service.reorder_list(&bob, l.id, 3).await, Err(BoardError::Forbidden(_))));
    assert!(matches!(service.delete_list(&bob, l.id).await, Err(BoardError::Forbidden(_))));

    assert!(matches!(
        service.create_list(&ada, Uuid::new_v4(), NewList { title: "x".to_string(), position: None }).await,
        Err(BoardError::NotFound(_))
    ));
    assert!(matches!(service.reorder_list(&ada, Uuid::new_v4(), 0).await, Err(BoardError::NotFound(_))));
}

#[tokio::test]
async fn test_reorder_list_changes_display_order() {
    let service = service();
    let ada = register(&service, "ada").await;
    let b = board(&service, &ada, "B").await;
    let first = list(&service, &ada, b.id, "first", 0).await;
    list(&service, &ada, b.id, "second", 1).await;

    let moved = service.reorder_list(&ada, first.id, 2).await.unwrap();
    assert_eq!(moved.position, 2);
    assert_eq!(moved.board_id, b.id);

    let lists = service.lists_in_board(&ada, b.id).await.unwrap();
    let names: Vec<&str> = lists.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(names, vec!["second", "first"]);
}

#[tokio::test]
async fn test_update_list_title_keeps_position() {
    let service = service();
    let ada = register(&service, "ada").await;
    let b = board(&service, &ada, "B").await;
    let l = list(&service, &ada, b.id, "Todo", 4).await;

    let updated = service
        .update_list(
            &ada,
            l.id,
            ListChanges {
                title: Some("Doing".to_string()),
                position: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Doing");
    assert_eq!(updated.position, 4);
}

#[tokio::test]
async fn test_delete_list_cascades_to_cards() {
    let service = service();
    let ada = register(&service, "ada").await;
    let b = board(&service, &ada, "B").await;
    let l = list(&service, &ada, b.id, "L", 0).await;
    let c = card(&service, &ada, l.id, "C", 0).await;

    service.delete_list(&ada, l.id).await.unwrap();

    assert!(matches!(service.get_card(&ada, c.id).await, Err(BoardError::NotFound(_))));
    assert!(service.get_board(&ada, b.id).await.unwrap().lists.is_empty());
}

// Cards

#[tokio::test]
async fn test_card_operations_check_ownership() {
    let service = service();
    let ada = register(&service, "ada").await;
    let bob = register(&service, "bob").await;
    let b = board(&service, &ada, "B").await;
    let l = list(&service, &ada, b.id, "L", 0).await;
    let c = card(&service, &ada, l.id, "C", 0).await;

    assert!(matches!(
        service.create_card(&bob, l.id, new_card("x", 0)).await,
        Err(BoardError::Forbidden(_))
    ));
    assert!(matches!(service.cards_in_list(&bob, l.id).await, Err(BoardError::Forbidden(_))));
    assert!(matches!(service.get_card(&bob, c.id).await, Err(BoardError::Forbidden(_))));
    assert!(matches!(
        service.update_card(&bob, c.id, CardChanges::default()).await,
        Err(BoardError::Forbidden(_))
    ));
    assert!(matches!(service.reorder_card(&bob, c.id, 1).await, Err(BoardError::Forbidden(_))));
    assert!(matches!(service.delete_card(&bob, c.id).await, Err(BoardError::Forbidden(_))));
}

#[tokio::test]
async fn test_missing_card_is_not_found_for_everyone() {
    let service = service();
    let ada = register(&service, "ada").await;
    let missing = Uuid::new_v4();

    assert!(matches!(service.get_card(&ada, missing).await, Err(BoardError::NotFound(_))));
    assert!(matches!(service.reorder_card(&ada, missing, 0).await, Err(BoardError::NotFound(_))));
    assert!(matches!(service.delete_card(&ada, missing).await, Err(BoardError::NotFound(_))));
    assert!(matches!(
        service.update_card(&ada, missing, CardChanges::default()).await,
        Err(BoardError::NotFound(_))
    ));
    assert!(matches!(
        service.move_card(&ada, missing, CardMove { list_id: Uuid::new_v4(), position: 0 }).await,
        Err(BoardError::NotFound(ref m)) if m == "Card not found"
    ));
}

#[tokio::test]
async fn test_card_with_assignee_priority_and_due_date() {
    let service = service();
    let ada = register(&service, "ada").await;
    let bob = register(&service, "bob").await;
    let b = board(&service, &ada, "B").await;
    let l = list(&service, &ada, b.id, "L", 0).await;
    let due = chrono::Utc::now() + Duration::days(3);

    let c = service
        .create_card(
            &ada,
            l.id,
            NewCard {
                assigned_to_id: Some(bob.user_id),
                due_date: Some(due),
                priority: Some(CardPriority::High),
                description: Some("details".to_string()),
                ..new_card("Assigned", 0)
            },
        )
        .await
        .unwrap();
    assert_eq!(c.assigned_to_id, Some(bob.user_id));
    assert_eq!(c.priority, Some(CardPriority::High));

    // The assignee gains no access to the card
    assert!(matches!(service.get_card(&bob, c.id).await, Err(BoardError::Forbidden(_))));

    let cleared = service
        .update_card(
            &ada,
            c.id,
            CardChanges {
                assigned_to_id: Some(None),
                priority: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(cleared.assigned_to_id.is_none());
    assert!(cleared.priority.is_none());
    assert_eq!(cleared.description.as_deref(), Some("details"));
    assert!(cleared.due_date.is_some());
}

#[tokio::test]
async fn test_unknown_assignee_is_not_found() {
    let service = service();
    let ada = register(&service, "ada").await;
    let b = board(&service, &ada, "B").await;
    let l = list(&service, &ada, b.id, "L", 0).await;

    let err = service
        .create_card(
            &ada,
            l.id,
            NewCard {
                assigned_to_id: Some(Uuid::new_v4()),
                ..new_card("x", 0)
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BoardError::NotFound(ref m) if m == "Assigned user not found"));
    assert!(service.cards_in_list(&ada, l.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_deleting_assignee_clears_assignment() {
    let service = service();
    let ada = register(&service, "ada").await;
    let bob = register(&service, "bob").await;
    let b = board(&service, &ada, "B").await;
    let l = list(&service, &ada, b.id, "L", 0).await;
    let c = service
        .create_card(
            &ada,
            l.id,
            NewCard {
                assigned_to_id: Some(bob.user_id),
                ..new_card("x", 0)
            },
        )
        .await
        .unwrap();

    service.delete_account(&bob).await.unwrap();

    let c = service.get_card(&ada, c.id).await.unwrap();
    assert!(c.assigned_to_id.is_none());
}

#[tokio::test]
async fn test_reorder_card_is_idempotent() {
    let service = service();
    let ada = register(&service, "ada").await;
    let b = board(&service, &ada, "B").await;
    let l = list(&service, &ada, b.id, "L", 0).await;
    let c = card(&service, &ada, l.id, "C", 0).await;
    card(&service, &ada, l.id, "D", 1).await;

    let once = service.reorder_card(&ada, c.id, 5).await.unwrap();
    let once_listing = service.cards_in_list(&ada, l.id).await.unwrap();
    let twice = service.reorder_card(&ada, c.id, 5).await.unwrap();
    let twice_listing = service.cards_in_list(&ada, l.id).await.unwrap();

    assert_eq!(once.position, 5);
    assert_eq!(twice.position, once.position);
    assert_eq!(twice.list_id, once.list_id);
    assert_eq!(titles(&once_listing), titles(&twice_listing));
    assert_eq!(titles(&twice_listing), vec!["D", "C"]);
}

/// Positions are caller-supplied and never renumbered, so collisions are
/// accepted. Equal positions fall back to creation order.
#[tokio::test]
async fn test_duplicate_positions_are_accepted() {
    let service = service();
    let ada = register(&service, "ada").await;
    let b = board(&service, &ada, "B").await;
    let l = list(&service, &ada, b.id, "L", 0).await;
    card(&service, &ada, l.id, "first", 1).await;
    let second = card(&service, &ada, l.id, "second", 0).await;
    card(&service, &ada, l.id, "third", 1).await;

    // Reordering onto an occupied position leaves both cards there
    service.reorder_card(&ada, second.id, 1).await.unwrap();

    let cards = service.cards_in_list(&ada, l.id).await.unwrap();
    assert!(cards.iter().all(|c| c.position == 1));
    assert_eq!(titles(&cards), vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_move_scenario() {
    let service = service();
    let ada = register(&service, "ada").await;
    let b1 = board(&service, &ada, "B1").await;
    let l1 = list(&service, &ada, b1.id, "L1", 0).await;
    let l2 = list(&service, &ada, b1.id, "L2", 1).await;
    let c1 = card(&service, &ada, l1.id, "C1", 0).await;

    let moved = service
        .move_card(&ada, c1.id, CardMove { list_id: l2.id, position: 0 })
        .await
        .unwrap();
    assert_eq!(moved.id, c1.id);
    assert_eq!(moved.list_id, l2.id);
    assert_eq!(moved.position, 0);
    assert!(moved.updated_at >= c1.updated_at);

    let detail = service.get_board(&ada, b1.id).await.unwrap();
    assert_eq!(detail.lists[0].list.id, l1.id);
    assert!(detail.lists[0].cards.is_empty());
    assert_eq!(detail.lists[1].list.id, l2.id);
    assert_eq!(titles(&detail.lists[1].cards), vec!["C1"]);
}

#[tokio::test]
async fn test_move_sets_list_and_position_together() {
    let service = service();
    let ada = register(&service, "ada").await;
    let b = board(&service, &ada, "B").await;
    let l1 = list(&service, &ada, b.id, "L1", 0).await;
    let l2 = list(&service, &ada, b.id, "L2", 1).await;
    let c = card(&service, &ada, l1.id, "C", 3).await;

    service.move_card(&ada, c.id, CardMove { list_id: l2.id, position: 9 }).await.unwrap();

    let reread = service.get_card(&ada, c.id).await.unwrap();
    assert_eq!((reread.list_id, reread.position), (l2.id, 9));
}

#[tokio::test]
async fn test_move_within_same_list() {
    let service = service();
    let ada = register(&service, "ada").await;
    let b = board(&service, &ada, "B").await;
    let l = list(&service, &ada, b.id, "L", 0).await;
    let c = card(&service, &ada, l.id, "C", 0).await;

    let moved = service.move_card(&ada, c.id, CardMove { list_id: l.id, position: 4 }).await.unwrap();
    assert_eq!(moved.list_id, l.id);
    assert_eq!(moved.position, 4);
}

#[tokio::test]
async fn test_move_to_other_board_is_invalid_even_for_owner() {
    let service = service();
    let ada = register(&service, "ada").await;
    let b1 = board(&service, &ada, "B1").await;
    let b2 = board(&service, &ada, "B2").await;
    let l1 = list(&service, &ada, b1.id, "L1", 0).await;
    let other = list(&service, &ada, b2.id, "Other", 0).await;
    let c = card(&service, &ada, l1.id, "C", 2).await;

    let err = service
        .move_card(&ada, c.id, CardMove { list_id: other.id, position: 0 })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BoardError::InvalidOperation(ref m) if m == "Cannot move card to a list in a different board"
    ));

    let unchanged = service.get_card(&ada, c.id).await.unwrap();
    assert_eq!(unchanged.list_id, l1.id);
    assert_eq!(unchanged.position, 2);
}

#[tokio::test]
async fn test_move_check_order() {
    let service = service();
    let ada = register(&service, "ada").await;
    let bob = register(&service, "bob").await;
    let b = board(&service, &ada, "B").await;
    let l = list(&service, &ada, b.id, "L", 0).await;
    let c = card(&service, &ada, l.id, "C", 0).await;
    let bobs_board = board(&service, &bob, "Bob's").await;
    let bobs_list = list(&service, &bob, bobs_board.id, "Bob's list", 0).await;

    // Ownership of the current board is checked before the target list is looked up
    let err = service
        .move_card(&bob, c.id, CardMove { list_id: Uuid::new_v4(), position: 0 })
        .await
        .unwrap_err();
    assert!(matches!(err, BoardError::Forbidden(ref m) if m == "Not authorized to move this card"));

    // Missing target list
    let err = service
        .move_card(&ada, c.id, CardMove { list_id: Uuid::new_v4(), position: 0 })
        .await
        .unwrap_err();
    assert!(matches!(err, BoardError::NotFound(ref m) if m == "Target list not found"));

    // Target on someone else's board is a containment failure, not an ownership one
    let err = service
        .move_card(&ada, c.id, CardMove { list_id: bobs_list.id, position: 0 })
        .await
        .unwrap_err();
    assert!(matches!(err, BoardError::InvalidOperation(_)));
}

// Accounts and cascades

#[tokio::test]
async fn test_delete_account_removes_owned_boards() {
    let service = service();
    let ada = register(&service, "ada").await;
    let bob = register(&service, "bob").await;
    let b = board(&service, &ada, "B").await;
    let l = list(&service, &ada, b.id, "L", 0).await;
    card(&service, &ada, l.id, "C", 0).await;
    let bobs = board(&service, &bob, "Bob's").await;

    service.delete_account(&ada).await.unwrap();

    assert!(service.login("ada@example.com", "ada-password").await.is_err());
    assert!(matches!(service.get_board(&bob, b.id).await, Err(BoardError::NotFound(_))));
    assert!(service.get_board(&bob, bobs.id).await.is_ok());
    assert!(matches!(service.delete_account(&ada).await, Err(BoardError::NotFound(_))));
}
