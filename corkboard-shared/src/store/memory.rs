/// In-memory store
///
/// Keeps every table in process memory behind one async mutex. A unit of work
/// holds the lock for its whole life and edits a private copy of the state;
/// `commit` publishes the copy, dropping the unit throws it away. Units of
/// work are therefore fully serialized.
///
/// Constraint behavior mirrors the PostgreSQL schema: unique email and
/// username, foreign keys on every parent reference, cascading deletes down
/// the ownership chain, and `SET NULL` on card assignees.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use super::{PersistenceStore, StoreError, StoreResult, UnitOfWork};
use crate::models::board::{Board, CreateBoard, UpdateBoard};
use crate::models::card::{Card, CreateCard, UpdateCard};
use crate::models::list::{BoardList, CreateList, UpdateList};
use crate::models::ordering::in_container;
use crate::models::user::{CreateUser, UpdateUser, User};

/// Rows in insertion (creation) order
#[derive(Debug, Clone, Default)]
struct MemoryState {
    users: Vec<User>,
    boards: Vec<Board>,
    lists: Vec<BoardList>,
    cards: Vec<Card>,
}

impl MemoryState {
    fn check_user_unique(&self, email: &str, username: &str, except: Option<Uuid>) -> StoreResult<()> {
        let others = self.users.iter().filter(|u| Some(u.id) != except);

        for user in others {
            if user.email == email {
                return Err(StoreError::UniqueViolation("users_email_key".to_string()));
            }
            if user.username == username {
                return Err(StoreError::UniqueViolation("users_username_key".to_string()));
            }
        }
        Ok(())
    }

    fn require_user(&self, id: Uuid, constraint: &str) -> StoreResult<()> {
        if self.users.iter().any(|u| u.id == id) {
            Ok(())
        } else {
            Err(StoreError::ForeignKeyViolation(constraint.to_string()))
        }
    }

    fn require_board(&self, id: Uuid, constraint: &str) -> StoreResult<()> {
        if self.boards.iter().any(|b| b.id == id) {
            Ok(())
        } else {
            Err(StoreError::ForeignKeyViolation(constraint.to_string()))
        }
    }

    fn require_list(&self, id: Uuid, constraint: &str) -> StoreResult<()> {
        if self.lists.iter().any(|l| l.id == id) {
            Ok(())
        } else {
            Err(StoreError::ForeignKeyViolation(constraint.to_string()))
        }
    }

    fn remove_cards_in_lists(&mut self, list_ids: &[Uuid]) {
        self.cards.retain(|c| !list_ids.contains(&c.list_id));
    }

    fn remove_lists_in_boards(&mut self, board_ids: &[Uuid]) {
        let list_ids: Vec<Uuid> = self
            .lists
            .iter()
            .filter(|l| board_ids.contains(&l.board_id))
            .map(|l| l.id)
            .collect();

        self.remove_cards_in_lists(&list_ids);
        self.lists.retain(|l| !board_ids.contains(&l.board_id));
    }
}

/// Process-local store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersistenceStore for MemoryStore {
    async fn begin(&self) -> StoreResult<Box<dyn UnitOfWork>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryUnitOfWork { guard, working }))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Unit of work over a private copy of the state
pub struct MemoryUnitOfWork {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn find_user(&mut self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.working.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&mut self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.working.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_username(&mut self, username: &str) -> StoreResult<Option<User>> {
        Ok(self.working.users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert_user(&mut self, data: CreateUser) -> StoreResult<User> {
        self.working.check_user_unique(&data.email, &data.username, None)?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: data.email,
            username: data.username,
            hashed_password: data.hashed_password,
            full_name: data.full_name,
            is_active: true,
            is_superuser: data.is_superuser,
            created_at: now,
            updated_at: now,
        };
        self.working.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&mut self, id: Uuid, data: UpdateUser) -> StoreResult<Option<User>> {
        let Some(current) = self.working.users.iter().find(|u| u.id == id) else {
            return Ok(None);
        };

        let email = data.email.as_deref().unwrap_or(&current.email).to_string();
        let username = data.username.as_deref().unwrap_or(&current.username).to_string();
        self.working.check_user_unique(&email, &username, Some(id))?;

        let user = self.working.users.iter_mut().find(|u| u.id == id);
        Ok(user.map(|user| {
            data.apply_to(user);
            user.clone()
        }))
    }

    async fn delete_user(&mut self, id: Uuid) -> StoreResult<bool> {
        let before = self.working.users.len();
        self.working.users.retain(|u| u.id != id);
        if self.working.users.len() == before {
            return Ok(false);
        }

        let owned: Vec<Uuid> = self
            .working
            .boards
            .iter()
            .filter(|b| b.owner_id == id)
            .map(|b| b.id)
            .collect();
        self.working.remove_lists_in_boards(&owned);
        self.working.boards.retain(|b| b.owner_id != id);

        for card in self.working.cards.iter_mut() {
            if card.assigned_to_id == Some(id) {
                card.assigned_to_id = None;
            }
        }
        Ok(true)
    }

    async fn find_board(&mut self, id: Uuid) -> StoreResult<Option<Board>> {
        Ok(self.working.boards.iter().find(|b| b.id == id).cloned())
    }

    async fn boards_by_owner(
        &mut self,
        owner_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Board>> {
        Ok(self
            .working
            .boards
            .iter()
            .filter(|b| b.owner_id == owner_id)
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn insert_board(&mut self, data: CreateBoard) -> StoreResult<Board> {
        self.working.require_user(data.owner_id, "boards_owner_id_fkey")?;

        let now = Utc::now();
        let board = Board {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description,
            owner_id: data.owner_id,
            created_at: now,
            updated_at: now,
        };
        self.working.boards.push(board.clone());
        Ok(board)
    }

    async fn update_board(&mut self, id: Uuid, data: UpdateBoard) -> StoreResult<Option<Board>> {
        let board = self.working.boards.iter_mut().find(|b| b.id == id);
        Ok(board.map(|board| {
            data.apply_to(board);
            board.clone()
        }))
    }

    async fn delete_board(&mut self, id: Uuid) -> StoreResult<bool> {
        let before = self.working.boards.len();
        self.working.boards.retain(|b| b.id != id);
        if self.working.boards.len() == before {
            return Ok(false);
        }

        self.working.remove_lists_in_boards(&[id]);
        Ok(true)
    }

    async fn find_list(&mut self, id: Uuid) -> StoreResult<Option<BoardList>> {
        Ok(self.working.lists.iter().find(|l| l.id == id).cloned())
    }

    async fn lists_in_board(&mut self, board_id: Uuid) -> StoreResult<Vec<BoardList>> {
        Ok(in_container(&self.working.lists, board_id))
    }

    async fn insert_list(&mut self, data: CreateList) -> StoreResult<BoardList> {
        self.working.require_board(data.board_id, "lists_board_id_fkey")?;

        let now = Utc::now();
        let list = BoardList {
            id: Uuid::new_v4(),
            title: data.title,
            position: data.position,
            board_id: data.board_id,
            created_at: now,
            updated_at: now,
        };
        self.working.lists.push(list.clone());
        Ok(list)
    }

    async fn update_list(
        &mut self,
        id: Uuid,
        data: UpdateList,
    ) -> StoreResult<Option<BoardList>> {
        let list = self.working.lists.iter_mut().find(|l| l.id == id);
        Ok(list.map(|list| {
            data.apply_to(list);
            list.clone()
        }))
    }

    async fn delete_list(&mut self, id: Uuid) -> StoreResult<bool> {
        let before = self.working.lists.len();
        self.working.lists.retain(|l| l.id != id);
        if self.working.lists.len() == before {
            return Ok(false);
        }

        self.working.remove_cards_in_lists(&[id]);
        Ok(true)
    }

    async fn find_card(&mut self, id: Uuid) -> StoreResult<Option<Card>> {
        Ok(self.working.cards.iter().find(|c| c.id == id).cloned())
    }

    async fn cards_in_list(&mut self, list_id: Uuid) -> StoreResult<Vec<Card>> {
        Ok(in_container(&self.working.cards, list_id))
    }

    async fn cards_in_board(&mut self, board_id: Uuid) -> StoreResult<Vec<Card>> {
        let mut cards = Vec::new();
        for list in in_container(&self.working.lists, board_id) {
            cards.extend(in_container(&self.working.cards, list.id));
        }
        Ok(cards)
    }

    async fn insert_card(&mut self, data: CreateCard) -> StoreResult<Card> {
        self.working.require_list(data.list_id, "cards_list_id_fkey")?;
        if let Some(assignee) = data.assigned_to_id {
            self.working.require_user(assignee, "cards_assigned_to_id_fkey")?;
        }

        let now = Utc::now();
        let card = Card {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description,
            position: data.position,
            list_id: data.list_id,
            assigned_to_id: data.assigned_to_id,
            due_date: data.due_date,
            priority: data.priority,
            created_at: now,
            updated_at: now,
        };
        self.working.cards.push(card.clone());
        Ok(card)
    }

    async fn update_card(&mut self, id: Uuid, data: UpdateCard) -> StoreResult<Option<Card>> {
        if let Some(Some(assignee)) = data.assigned_to_id {
            self.working.require_user(assignee, "cards_assigned_to_id_fkey")?;
        }

        let card = self.working.cards.iter_mut().find(|c| c.id == id);
        Ok(card.map(|card| {
            data.apply_to(card);
            card.clone()
        }))
    }

    async fn relocate_card(
        &mut self,
        id: Uuid,
        list_id: Uuid,
        position: i32,
    ) -> StoreResult<Option<Card>> {
        self.working.require_list(list_id, "cards_list_id_fkey")?;

        let card = self.working.cards.iter_mut().find(|c| c.id == id);
        Ok(card.map(|card| {
            card.list_id = list_id;
            card.position = position;
            card.updated_at = Utc::now();
            card.clone()
        }))
    }

    async fn delete_card(&mut self, id: Uuid) -> StoreResult<bool> {
        let before = self.working.cards.len();
        self.working.cards.retain(|c| c.id != id);
        Ok(self.working.cards.len() < before)
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let MemoryUnitOfWork { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}
