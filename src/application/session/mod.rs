//! AssistantSession - runs tool calls against one conversation's state.
//!
//! A session owns its variant state exclusively (a cart or a game world)
//! and shares the catalog and ledger with every other session. Calls are
//! handled one at a time; every call yields a [`ToolResponse`], never an
//! error.

mod game;
mod grocery;
mod shop;

use std::sync::Arc;

use serde::Serialize;

use crate::application::ordering::OrderLedger;
use crate::domain::cart::Cart;
use crate::domain::catalog::CatalogIndex;
use crate::domain::foundation::{AssistantKind, DomainError, ErrorCode, SessionId};
use crate::domain::order::OrderError;
use crate::domain::tools::{Command, ToolCall, ToolDefinition, ToolRegistry, ToolResponse};
use crate::domain::world::WorldState;

/// Variant-specific state of a session.
#[derive(Debug, Clone)]
pub enum SessionState {
    Grocery(Cart),
    Shop,
    GameMaster(WorldState),
}

impl SessionState {
    pub fn for_kind(kind: AssistantKind, session_id: SessionId) -> Self {
        match kind {
            AssistantKind::Grocery => SessionState::Grocery(Cart::empty(session_id)),
            AssistantKind::Shop => SessionState::Shop,
            AssistantKind::GameMaster => SessionState::GameMaster(WorldState::new_game(session_id)),
        }
    }

    pub fn kind(&self) -> AssistantKind {
        match self {
            SessionState::Grocery(_) => AssistantKind::Grocery,
            SessionState::Shop => AssistantKind::Shop,
            SessionState::GameMaster(_) => AssistantKind::GameMaster,
        }
    }
}

/// One conversation's tool executor.
pub struct AssistantSession {
    session_id: SessionId,
    catalog: Arc<CatalogIndex>,
    ledger: Arc<OrderLedger>,
    state: SessionState,
}

impl AssistantSession {
    pub fn new(
        kind: AssistantKind,
        catalog: Arc<CatalogIndex>,
        ledger: Arc<OrderLedger>,
    ) -> Self {
        let session_id = SessionId::new();
        Self {
            session_id,
            catalog,
            ledger,
            state: SessionState::for_kind(kind, session_id),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn kind(&self) -> AssistantKind {
        self.state.kind()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn cart(&self) -> Option<&Cart> {
        match &self.state {
            SessionState::Grocery(cart) => Some(cart),
            _ => None,
        }
    }

    pub fn world(&self) -> Option<&WorldState> {
        match &self.state {
            SessionState::GameMaster(world) => Some(world),
            _ => None,
        }
    }

    /// Tools this session accepts.
    pub fn tools(&self) -> Vec<&'static ToolDefinition> {
        ToolRegistry::global().tools_for(self.kind())
    }

    /// Parses and runs a raw tool call.
    pub async fn execute(&mut self, call: &ToolCall) -> ToolResponse {
        match Command::parse(call) {
            Ok(command) => self.run(command).await,
            Err(e) => {
                tracing::warn!(
                    "Session {} rejected tool call {}: {}",
                    self.session_id,
                    call.name(),
                    e
                );
                ToolResponse::validation_error(e.to_string())
            }
        }
    }

    /// Runs one raw input line holding a JSON tool call.
    ///
    /// Blank lines yield `None`. Lines that are not UTF-8 or not a tool call
    /// are answered with a validation outcome.
    pub async fn execute_line(&mut self, raw: &[u8]) -> Option<ToolResponse> {
        let line = match std::str::from_utf8(raw) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Session {} received a non UTF-8 line: {}", self.session_id, e);
                return Some(ToolResponse::validation_error(format!(
                    "Invalid tool call: input is not valid UTF-8 ({e})"
                )));
            }
        };
        if line.trim().is_empty() {
            return None;
        }

        Some(match serde_json::from_str::<ToolCall>(line) {
            Ok(call) => self.execute(&call).await,
            Err(e) => ToolResponse::validation_error(format!("Invalid tool call: {}", e)),
        })
    }

    /// Runs a typed command against this session's state.
    pub async fn run(&mut self, command: Command) -> ToolResponse {
        let name = command.name();
        tracing::debug!("Session {} running {}", self.session_id, name);

        let catalog = self.catalog.as_ref();
        let ledger = self.ledger.as_ref();

        let response = match (&mut self.state, command) {
            (SessionState::Grocery(_), Command::GetCatalog) => grocery::get_catalog(catalog),
            (SessionState::Grocery(cart), Command::AddToCart(params)) => {
                grocery::add_to_cart(cart, catalog, params)
            }
            (SessionState::Grocery(cart), Command::AddIngredientsForMeal(params)) => {
                grocery::add_ingredients_for_meal(cart, catalog, params)
            }
            (SessionState::Grocery(cart), Command::RemoveFromCart(params)) => {
                grocery::remove_from_cart(cart, catalog, params)
            }
            (SessionState::Grocery(cart), Command::UpdateCartItem(params)) => {
                grocery::update_cart_item(cart, catalog, params)
            }
            (SessionState::Grocery(cart), Command::ClearCart) => grocery::clear_cart(cart),
            (SessionState::Grocery(cart), Command::GetCartStatus) => grocery::get_cart_status(cart),
            (SessionState::Grocery(cart), Command::PlaceOrder) => {
                grocery::place_order(cart, ledger).await
            }
            (SessionState::Shop, Command::ListProducts(filter)) => {
                shop::list_products(catalog, filter)
            }
            (SessionState::Shop, Command::BuyProduct(params)) => {
                shop::buy_product(catalog, ledger, params).await
            }
            (SessionState::Shop, Command::GetLastOrder) => shop::get_last_order(ledger).await,
            (SessionState::GameMaster(world), Command::UpdateWorldState(update)) => {
                game::update_world_state(world, update)
            }
            (SessionState::GameMaster(world), Command::GetWorldState) => {
                game::get_world_state(world)
            }
            (state, command) => ToolResponse::from_error(
                &DomainError::new(
                    ErrorCode::UnsupportedTool,
                    format!(
                        "Tool '{}' is not available for the {} assistant",
                        command.name(),
                        state.kind().display_name()
                    ),
                )
                .with_detail("tool", command.name())
                .with_detail("assistant", state.kind().as_str()),
            ),
        };

        if !response.is_success() {
            tracing::debug!(
                "Session {} {} finished as {:?}",
                self.session_id,
                name,
                response.outcome()
            );
        }
        response
    }
}

/// Response for an order the ledger could not confirm as stored.
///
/// An unconfirmed order may still land, so the user is sent to check the
/// last order instead of being told to try again.
fn order_not_saved(err: OrderError) -> ToolResponse {
    let message = match &err {
        OrderError::Unconfirmed { order_id, .. } => format!(
            "Your order {order_id} is still being saved. Please check your last order before ordering again."
        ),
        _ => "There was an error saving your order. Please try again.".to_string(),
    };
    ToolResponse::from_error(&DomainError::from(err)).with_message(message)
}

/// Serializes a payload for a response.
fn to_json<T: Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        tracing::error!("Failed to serialize tool payload: {}", e);
        serde_json::Value::Null
    })
}
