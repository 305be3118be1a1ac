//! Diesel table definitions.
//!
//! `transactions` and `exchanges` belong to this service and are created by
//! its migrations. `products` and `sessions` are owned by sibling subgraphs
//! sharing the database; only the columns read here are declared.

diesel::table! {
    /// Ledger entries.
    transactions (id) {
        /// Serial primary key.
        id -> Int4,
        /// One of `PURCHASE`, `EXCHANGE`, `GIFT`, `REFERRAL`, `BONUS`.
        kind -> Varchar,
        /// Points credited to the owner.
        points_collected -> Int4,
        /// Owning user.
        user_id -> Varchar,
        /// Insert time.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Exchange offers, one per `EXCHANGE` transaction.
    exchanges (id) {
        /// Serial primary key.
        id -> Int4,
        /// Parent transaction; unique.
        transaction_id -> Int4,
        /// Product given by the initiator.
        offered_product_id -> Int4,
        /// Product wanted by the initiator.
        requested_product_id -> Int4,
        /// Lifecycle status in upper case.
        status -> Varchar,
        /// Optional note from the initiator.
        notes -> Nullable<Text>,
        /// Insert time.
        created_at -> Timestamptz,
        /// Set once the exchange is completed.
        completed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Products, read-only here.
    products (id) {
        /// Serial primary key.
        id -> Int4,
        /// Owning user.
        user_id -> Varchar,
        /// Whether the owner accepts exchange offers.
        is_exchangeable -> Bool,
    }
}

diesel::table! {
    /// Bearer-token sessions, read-only here.
    sessions (token) {
        /// Opaque bearer token.
        token -> Varchar,
        /// User the session was issued for.
        user_id -> Varchar,
        /// Expiry instant.
        expires_at -> Timestamptz,
    }
}

diesel::joinable!(exchanges -> transactions (transaction_id));

diesel::allow_tables_to_appear_in_same_query!(exchanges, products, sessions, transactions);
