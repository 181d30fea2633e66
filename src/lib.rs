//! Backend for point-allocation votes: create a "spend 100 points across
//! candidates" poll, collect one overwritable ballot per user, aggregate
//! totals on read, and close the vote with the creator's token. The reveal
//! animator and results poller model the client-side pieces as explicit,
//! cancellable state machines.

pub mod aggregate;
pub mod error;
pub mod handlers;
pub mod live;
pub mod models;
pub mod reveal;
pub mod routes;
pub mod similarity;
pub mod store;
