//! In-memory driven ports shared by the endpoint tests.
//!
//! One `Market` value plays every repository so that writes made through
//! one port are visible through the others, as they are in PostgreSQL.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use mockable::{Clock, DefaultClock};
use transactions_subgraph::domain::ports::{
    ExchangeRepository, ExchangeRepositoryError, ProductRepository, ProductRepositoryError,
    SessionRepository, SessionRepositoryError, TransactionRepository,
    TransactionRepositoryError,
};
use transactions_subgraph::domain::{
    Exchange, ExchangeCommandService, ExchangeForTransition, ExchangeId, ExchangeParties,
    ExchangeStatus, NewExchange, ProductId, ProductSnapshot, Session, SessionLookupService,
    SessionToken, StatusUpdate, Transaction, TransactionId, TransactionKind, TransactionRecord,
    TransactionsQueryService, UserId,
};
use transactions_subgraph::inbound::graphql::GraphQLPorts;

fn user(raw: &str) -> UserId {
    UserId::new(raw).expect("valid user id")
}

#[derive(Default)]
struct State {
    sessions: HashMap<String, Session>,
    products: HashMap<i32, ProductSnapshot>,
    transactions: Vec<Transaction>,
    exchanges: Vec<Exchange>,
    fail_writes: bool,
}

impl State {
    fn record(&self, transaction: &Transaction) -> TransactionRecord {
        TransactionRecord {
            transaction: transaction.clone(),
            exchange: self
                .exchanges
                .iter()
                .find(|exchange| exchange.transaction_id == transaction.id)
                .cloned(),
        }
    }

    fn initiator_of(&self, exchange: &Exchange) -> Option<UserId> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == exchange.transaction_id)
            .map(|transaction| transaction.user_id.clone())
    }

    fn owner_of(&self, product: ProductId) -> Option<UserId> {
        self.products
            .get(&product.get())
            .map(|snapshot| snapshot.owner.clone())
    }
}

/// Shared in-memory marketplace.
#[derive(Clone, Default)]
pub struct Market {
    state: Arc<Mutex<State>>,
}

impl Market {
    fn with_state<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut guard = self.state.lock().expect("market lock");
        f(&mut guard)
    }

    /// Issue a session for `user_id` that expires `ttl` from now.
    pub fn add_session(&self, token: &str, user_id: &str, ttl: Duration) {
        self.with_state(|state| {
            state.sessions.insert(
                token.to_owned(),
                Session {
                    user_id: user(user_id),
                    expires_at: Utc::now() + ttl,
                },
            );
        });
    }

    pub fn add_product(&self, id: i32, owner: &str, is_exchangeable: bool) {
        self.with_state(|state| {
            state.products.insert(
                id,
                ProductSnapshot {
                    id: ProductId::new(id).expect("valid product id"),
                    owner: user(owner),
                    is_exchangeable,
                },
            );
        });
    }

    /// Record a non-exchange transaction and return its id.
    pub fn add_transaction(
        &self,
        user_id: &str,
        kind: TransactionKind,
        points: i32,
        created_at: DateTime<Utc>,
    ) -> i32 {
        self.with_state(|state| {
            let id = next_id(state.transactions.len());
            state.transactions.push(Transaction {
                id: TransactionId::new(id).expect("valid transaction id"),
                kind,
                points_collected: points,
                user_id: user(user_id),
                created_at,
            });
            id
        })
    }

    /// Make every subsequent write fail.
    pub fn fail_writes(&self) {
        self.with_state(|state| state.fail_writes = true);
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.with_state(|state| state.transactions.clone())
    }

    pub fn exchanges(&self) -> Vec<Exchange> {
        self.with_state(|state| state.exchanges.clone())
    }

    /// Real services over this market.
    pub fn ports(&self) -> GraphQLPorts {
        let repo = Arc::new(self.clone());
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        GraphQLPorts {
            sessions: Arc::new(SessionLookupService::new(repo.clone(), clock.clone())),
            transactions: Arc::new(TransactionsQueryService::new(repo.clone(), repo.clone())),
            exchanges: Arc::new(ExchangeCommandService::new(repo.clone(), repo, clock)),
        }
    }
}

fn next_id(len: usize) -> i32 {
    i32::try_from(len + 1).expect("id fits in i32")
}

#[async_trait]
impl SessionRepository for Market {
    async fn find_by_token(
        &self,
        token: &SessionToken,
    ) -> Result<Option<Session>, SessionRepositoryError> {
        Ok(self.with_state(|state| state.sessions.get(token.as_str()).cloned()))
    }
}

#[async_trait]
impl ProductRepository for Market {
    async fn find_by_id(
        &self,
        id: ProductId,
    ) -> Result<Option<ProductSnapshot>, ProductRepositoryError> {
        Ok(self.with_state(|state| state.products.get(&id.get()).cloned()))
    }
}

#[async_trait]
impl TransactionRepository for Market {
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<TransactionRecord>, TransactionRepositoryError> {
        Ok(self.with_state(|state| {
            let mut own: Vec<_> = state
                .transactions
                .iter()
                .filter(|transaction| &transaction.user_id == user_id)
                .map(|transaction| state.record(transaction))
                .collect();
            own.sort_by(|a, b| b.transaction.created_at.cmp(&a.transaction.created_at));
            own
        }))
    }

    async fn find_by_id(
        &self,
        id: TransactionId,
    ) -> Result<Option<TransactionRecord>, TransactionRepositoryError> {
        Ok(self.with_state(|state| {
            state
                .transactions
                .iter()
                .find(|transaction| transaction.id == id)
                .map(|transaction| state.record(transaction))
        }))
    }
}

#[async_trait]
impl ExchangeRepository for Market {
    async fn list_for_participant(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Exchange>, ExchangeRepositoryError> {
        Ok(self.with_state(|state| {
            let mut mine: Vec<_> = state
                .exchanges
                .iter()
                .filter(|exchange| {
                    [exchange.offered_product_id, exchange.requested_product_id]
                        .into_iter()
                        .any(|product| state.owner_of(product).as_ref() == Some(user_id))
                })
                .cloned()
                .collect();
            mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            mine
        }))
    }

    async fn find_by_id(&self, id: ExchangeId) -> Result<Option<Exchange>, ExchangeRepositoryError> {
        Ok(self.with_state(|state| state.exchanges.iter().find(|e| e.id == id).cloned()))
    }

    async fn find_for_transition(
        &self,
        id: ExchangeId,
    ) -> Result<Option<ExchangeForTransition>, ExchangeRepositoryError> {
        Ok(self.with_state(|state| {
            let exchange = state.exchanges.iter().find(|e| e.id == id)?.clone();
            let parties = ExchangeParties {
                initiator: state.initiator_of(&exchange)?,
                requested_owner: state.owner_of(exchange.requested_product_id)?,
            };
            Some(ExchangeForTransition { exchange, parties })
        }))
    }

    async fn create(&self, new: &NewExchange) -> Result<Exchange, ExchangeRepositoryError> {
        self.with_state(|state| {
            if state.fail_writes {
                return Err(ExchangeRepositoryError::query("insert rejected"));
            }
            let now = Utc::now();
            let transaction = Transaction {
                id: TransactionId::new(next_id(state.transactions.len()))
                    .expect("valid transaction id"),
                kind: TransactionKind::Exchange,
                points_collected: new.points_collected,
                user_id: new.initiator.clone(),
                created_at: now,
            };
            let exchange = Exchange {
                id: ExchangeId::new(next_id(state.exchanges.len())).expect("valid exchange id"),
                transaction_id: transaction.id,
                offered_product_id: new.offered_product_id,
                requested_product_id: new.requested_product_id,
                status: ExchangeStatus::Pending,
                notes: new.notes.clone(),
                created_at: now,
                completed_at: None,
            };
            state.transactions.push(transaction);
            state.exchanges.push(exchange.clone());
            Ok(exchange)
        })
    }

    async fn update_status(
        &self,
        id: ExchangeId,
        update: StatusUpdate,
    ) -> Result<Option<Exchange>, ExchangeRepositoryError> {
        self.with_state(|state| {
            if state.fail_writes {
                return Err(ExchangeRepositoryError::query("update rejected"));
            }
            let Some(exchange) = state.exchanges.iter_mut().find(|e| e.id == id) else {
                return Ok(None);
            };
            exchange.status = update.status;
            if let Some(completed_at) = update.completed_at {
                exchange.completed_at = Some(completed_at);
            }
            Ok(Some(exchange.clone()))
        })
    }
}
