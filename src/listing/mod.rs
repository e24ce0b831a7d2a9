//! # List Query Processing
//!
//! Turns a snapshot of resources and a [`QueryDescriptor`] into one page:
//!
//! ```text
//! resources → filter → stable sort (CompareChain) → transform → paginate
//! ```
//!
//! The pipeline is a pure function over the strategies a [`ListHandler`]
//! supplies. It holds nothing past the call and shares no mutable state, so
//! concurrent calls need no locking.

pub mod compare;
pub mod filter;
pub mod handlers;
pub mod processor;
pub mod query;

pub use compare::{CompareChain, CompareKey, Direction};
pub use filter::Filter;
pub use handlers::{PipelineRunListHandler, TemplateListHandler};
pub use processor::{process, ListHandler, ListResult};
pub use query::{Pagination, QueryDescriptor};
