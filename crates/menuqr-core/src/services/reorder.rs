// ============================================================================
// MenuQR Core - Reorder Engine
// File: crates/menuqr-core/src/services/reorder.rs
// ============================================================================
//! Drag-and-drop reordering of sibling lists (categories, or the items of one
//! category).
//!
//! [`ReorderEngine`] is the synchronous state machine a gesture drives:
//!
//! ```text
//! Idle --begin_drag--> Dragging --drag_over--> Previewing --end_drag--> Persisting
//!   ^                     |                       |                        |
//!   +------cancel---------+-----------------------+      confirm/rollback--+
//! ```
//!
//! [`ReorderCoordinator`] owns the async half: exactly one bulk-order call per
//! gesture, and recovery from the repository when that call fails.

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use menuqr_security::Session;

use crate::domain::ordering::{move_element, order_updates, reindex, sort_by_display_order};
use crate::domain::{Category, MenuItem, OrderUpdate, Orderable};
use crate::error::DomainError;
use crate::repositories::MenuRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ReorderState {
    Idle,
    Dragging { dragged: Uuid },
    Previewing { dragged: Uuid },
    Persisting,
}

#[derive(Debug, Clone)]
pub struct ReorderEngine<T> {
    items: Vec<T>,
    snapshot: Option<Vec<T>>,
    state: ReorderState,
}

impl<T: Orderable + Clone> ReorderEngine<T> {
    /// Starts idle with `items` stable-sorted by their current display order.
    pub fn new(mut items: Vec<T>) -> Self {
        sort_by_display_order(&mut items);
        Self { items, snapshot: None, state: ReorderState::Idle }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn state(&self) -> ReorderState {
        self.state
    }

    fn position(&self, id: Uuid) -> Result<usize, DomainError> {
        self.items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(DomainError::UnknownReorderId(id))
    }

    fn invalid(&self, action: &str) -> DomainError {
        DomainError::InvalidReorderState(format!("cannot {} while {:?}", action, self.state))
    }

    pub fn begin_drag(&mut self, id: Uuid) -> Result<(), DomainError> {
        if self.items.is_empty() {
            return Err(DomainError::EmptyReorderTarget);
        }
        if self.state != ReorderState::Idle {
            return Err(self.invalid("begin a drag"));
        }
        self.position(id)?;
        self.snapshot = Some(self.items.clone());
        self.state = ReorderState::Dragging { dragged: id };
        Ok(())
    }

    /// Moves the dragged element into the hovered sibling's slot.
    pub fn drag_over(&mut self, target: Uuid) -> Result<(), DomainError> {
        let dragged = match self.state {
            ReorderState::Dragging { dragged } | ReorderState::Previewing { dragged } => dragged,
            _ => return Err(self.invalid("preview")),
        };
        if target == dragged {
            return Ok(());
        }

        let from = self.position(dragged)?;
        let to = self.position(target)?;
        move_element(&mut self.items, from, to);
        reindex(&mut self.items);
        self.state = ReorderState::Previewing { dragged };
        Ok(())
    }

    /// Ends the gesture and returns the dense order to persist.
    pub fn end_drag(&mut self) -> Result<Vec<OrderUpdate>, DomainError> {
        match self.state {
            ReorderState::Dragging { .. } | ReorderState::Previewing { .. } => {}
            _ => return Err(self.invalid("drop")),
        }
        reindex(&mut self.items);
        self.state = ReorderState::Persisting;
        Ok(order_updates(&self.items))
    }

    pub fn confirm(&mut self) -> Result<(), DomainError> {
        if self.state != ReorderState::Persisting {
            return Err(self.invalid("confirm"));
        }
        self.snapshot = None;
        self.state = ReorderState::Idle;
        Ok(())
    }

    /// Discards the preview in favour of the server's order.
    pub fn rollback(&mut self, authoritative: Vec<T>) -> Result<(), DomainError> {
        if self.state != ReorderState::Persisting {
            return Err(self.invalid("roll back"));
        }
        let mut items = authoritative;
        sort_by_display_order(&mut items);
        reindex(&mut items);
        self.items = items;
        self.snapshot = None;
        self.state = ReorderState::Idle;
        Ok(())
    }

    /// Restores the pre-gesture list when the server order is unavailable.
    pub fn rollback_to_snapshot(&mut self) -> Result<(), DomainError> {
        if self.state != ReorderState::Persisting {
            return Err(self.invalid("roll back"));
        }
        self.restore_snapshot();
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), DomainError> {
        match self.state {
            ReorderState::Dragging { .. } | ReorderState::Previewing { .. } => {
                self.restore_snapshot();
                Ok(())
            }
            _ => Err(self.invalid("cancel")),
        }
    }

    fn restore_snapshot(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.items = snapshot;
        }
        self.state = ReorderState::Idle;
    }
}

/// A complete gesture: the dragged sibling and every sibling it passed over,
/// in pointer order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderGesture {
    pub dragged_id: Uuid,
    #[serde(default)]
    pub over: Vec<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderOutcome {
    Saved,
    /// Persisting failed; the list reflects the server's order again.
    Reverted,
    /// The siblings could not be loaded, so nothing was sent.
    Unavailable,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReorderReport<T> {
    pub outcome: ReorderOutcome,
    pub items: Vec<T>,
}

impl<T> ReorderReport<T> {
    fn unavailable() -> Self {
        Self { outcome: ReorderOutcome::Unavailable, items: Vec::new() }
    }
}

/// Persists finished gestures through a [`MenuRepository`].
pub struct ReorderCoordinator<R: MenuRepository + ?Sized = dyn MenuRepository> {
    repo: Arc<R>,
}

impl<R: MenuRepository + ?Sized> ReorderCoordinator<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Ends the gesture on `engine` and settles it against the backend.
    pub async fn persist_categories(
        &self,
        session: &Session,
        engine: &mut ReorderEngine<Category>,
    ) -> Result<ReorderOutcome, DomainError> {
        let updates = engine.end_drag()?;
        let saved = self.repo.reorder_categories(session, &updates).await;
        settle(engine, saved, || self.repo.list_categories(session)).await
    }

    pub async fn persist_items(
        &self,
        session: &Session,
        category_id: Uuid,
        engine: &mut ReorderEngine<MenuItem>,
    ) -> Result<ReorderOutcome, DomainError> {
        let updates = engine.end_drag()?;
        let saved = self.repo.reorder_items(session, &updates).await;
        settle(engine, saved, || self.repo.list_items(session, category_id)).await
    }

    /// Loads the profile's categories, replays `gesture` and persists it.
    pub async fn reorder_categories(
        &self,
        session: &Session,
        gesture: &ReorderGesture,
    ) -> Result<ReorderReport<Category>, DomainError> {
        let categories = match self.repo.list_categories(session).await {
            Ok(categories) => categories,
            Err(e) => {
                error!("Error loading categories for reorder: {}", e);
                return Ok(ReorderReport::unavailable());
            }
        };
        let mut engine = replay(categories, gesture)?;
        let outcome = self.persist_categories(session, &mut engine).await?;
        Ok(ReorderReport { outcome, items: engine.into_items() })
    }

    /// Loads one category's items, replays `gesture` and persists it.
    pub async fn reorder_items(
        &self,
        session: &Session,
        category_id: Uuid,
        gesture: &ReorderGesture,
    ) -> Result<ReorderReport<MenuItem>, DomainError> {
        let items = match self.repo.list_items(session, category_id).await {
            Ok(items) => items,
            Err(e) => {
                error!("Error loading menu items of {} for reorder: {}", category_id, e);
                return Ok(ReorderReport::unavailable());
            }
        };
        let mut engine = replay(items, gesture)?;
        let outcome = self.persist_items(session, category_id, &mut engine).await?;
        Ok(ReorderReport { outcome, items: engine.into_items() })
    }
}

fn replay<T: Orderable + Clone>(items: Vec<T>, gesture: &ReorderGesture) -> Result<ReorderEngine<T>, DomainError> {
    let mut engine = ReorderEngine::new(items);
    engine.begin_drag(gesture.dragged_id)?;
    for target in &gesture.over {
        if let Err(e) = engine.drag_over(*target) {
            engine.cancel()?;
            return Err(e);
        }
    }
    Ok(engine)
}

async fn settle<T, F, Fut>(
    engine: &mut ReorderEngine<T>,
    saved: Result<(), DomainError>,
    reload: F,
) -> Result<ReorderOutcome, DomainError>
where
    T: Orderable + Clone,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>, DomainError>>,
{
    match saved {
        Ok(()) => {
            engine.confirm()?;
            info!("Saved new order of {} siblings", engine.items().len());
            Ok(ReorderOutcome::Saved)
        }
        Err(e) => {
            error!("Error updating display order: {}", e);
            match reload().await {
                Ok(authoritative) => engine.rollback(authoritative)?,
                Err(reload_error) => {
                    warn!("Reload after failed reorder also failed: {}", reload_error);
                    engine.rollback_to_snapshot()?;
                }
            }
            Ok(ReorderOutcome::Reverted)
        }
    }
}
