//! Norm applicability evaluator
//!
//! Determines which legal obligations ("norms") from a regulatory catalog
//! apply to a described subject. Each norm carries a tree of yes/no
//! conditions; the tree is resolved against the answers collected during a
//! classification session using three-valued logic, so a norm is only
//! reported once its requirement is definitely met.
//!
//! A session runs in two phases:
//!
//! 1. **Write phase**: fundamental questions and the risk classification
//!    pathways ([`classify`]) populate the [`AnswerStore`] through a
//!    [`Questioner`].
//! 2. **Read phase**: the [`resolver`] evaluates every norm's root condition
//!    against the now read-only store.
//!
//! [`session::Session`] wires both phases together.

#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod answers;
pub mod catalog;
pub mod classify;
pub mod condition;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod questioner;
pub mod resolver;
pub mod session;
pub mod tri_state;

pub use answers::AnswerStore;
pub use catalog::{Catalog, Norm, UseCaseArea, UseCaseCatalog};
pub use condition::{Condition, ConditionError, Operator};
pub use error::{NormcheckError, Result};
pub use evaluator::evaluate;
pub use questioner::{Interview, Questioner};
pub use resolver::{resolve, unanswered_ids};
pub use tri_state::TriState;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
