//! Domain models for the HR administration backend.
//!
//! # Core Concepts
//!
//! - [`Employee`]: A person on the payroll. Active while `end_date` is unset.
//! - [`Project`]: A unit of work employees are staffed on. Active while
//!   `termination_date` is unset.
//! - [`Assignment`]: The link between one employee and one project, keyed by
//!   [`AssignmentKey`]. At most one exists per pair.
//!
//! Employees and projects share the same one-way lifecycle, see
//! [`LifecycleState`]. Termination never cascades: it is refused while any
//! assignment still references the entity.

mod assignment;
mod employee;
mod page;
mod project;

pub use assignment::*;
pub use employee::*;
pub use page::*;
pub use project::*;

use serde::{Deserialize, Serialize};

/// Lifecycle shared by employees and projects.
///
/// `Active` → `Terminated`, with no way back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Active,
    Terminated,
}

impl LifecycleState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminated)
    }
}
