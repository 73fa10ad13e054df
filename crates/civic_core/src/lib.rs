pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod fixture;
pub mod labels;
pub mod query;
pub mod schema;
pub mod source;
pub mod store;
pub mod tally;

pub use error::{LoadError, StoreError};
pub use schema::{Dataset, Deputy, DeputyFilters, Proposal, ProposalFilters, ProposalType, Vote, VoteChoice};
pub use source::DataSource;
pub use store::{Catalog, EntityStore, LoadState};
pub use tally::VoteTally;
