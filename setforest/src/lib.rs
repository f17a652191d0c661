pub mod error;
pub mod element;
pub mod policy;
pub mod forest;
pub mod query;
