//! RigidBodySystem - contact response for rigid bodies
//!
//! Per step, in this order:
//! - external accelerations (gravity) are accumulated on every body
//! - the detection stage hands over a contact list for the current state
//! - `CollisionResolver` applies normal + friction impulses (velocity pass)
//! - `PositionCorrector` removes residual penetration (position pass)
//! - every active body integrates and clears its accumulators
//!
//! Both passes evaluate contacts independently (in parallel with the
//! `parallel` feature) and apply the results sequentially, so bodies shared by
//! several contacts never lose an update.

mod correction;
mod resolver;
mod system;

pub use correction::{CorrectionReport, PositionCorrection, PositionCorrector};
pub use resolver::{CollisionResolver, ContactImpulse, ResolveReport};
pub use system::{RigidBodySystem, StepReport};
