//! Document Tree Module
//!
//! Provides an in-memory namespace of folders, worksheets, and
//! dashboards rooted at `MyDocuments`. Nodes are kept in one id-indexed
//! table, which makes lookups direct, keeps a move down to a relink,
//! and lets listings and counts walk the structure without rescans.

pub mod node;
pub mod store;
pub mod walk;
pub mod writer;

pub use node::*;
pub use store::*;
pub use walk::*;
pub use writer::*;
