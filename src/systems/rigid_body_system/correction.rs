//! Position pass: push overlapping bodies apart without touching velocity.
//!
//! Only a fraction of the penetration beyond `slop` is removed per step, so
//! stacked contacts settle over a few frames instead of overshooting.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::PhysicsError;
use crate::domain::SimulationConfig;
use crate::rigid_body::{RigidBody, Vec2};
use crate::systems::contact::{Contact, PairCounts};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionCorrection {
    pub line_owner: usize,
    pub point_owner: usize,
    pub line_delta: Vec2,
    pub point_delta: Vec2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CorrectionReport {
    pub contacts: u32,
    /// Contacts within slop (no movement)
    pub within_slop: u32,
    pub max_depth: f32,
}

#[derive(Clone, Debug)]
pub struct PositionCorrector {
    percent: f32,
    slop: f32,
}

impl PositionCorrector {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            percent: config.correction_percent,
            slop: config.slop,
        }
    }

    pub fn correct(
        &self,
        bodies: &mut [RigidBody],
        contacts: &[Contact],
    ) -> Result<CorrectionReport, PhysicsError> {
        let mut report = CorrectionReport {
            contacts: contacts.len() as u32,
            ..CorrectionReport::default()
        };
        if contacts.is_empty() {
            return Ok(report);
        }

        let pairs = PairCounts::from_contacts(contacts);
        let snapshot: &[RigidBody] = bodies;

        #[cfg(feature = "parallel")]
        let corrections: Vec<Option<PositionCorrection>> = contacts
            .par_iter()
            .map(|c| self.contact_correction(snapshot, c, pairs.count(c)))
            .collect::<Result<_, _>>()?;

        #[cfg(not(feature = "parallel"))]
        let corrections: Vec<Option<PositionCorrection>> = contacts
            .iter()
            .map(|c| self.contact_correction(snapshot, c, pairs.count(c)))
            .collect::<Result<_, _>>()?;

        for (contact, correction) in contacts.iter().zip(corrections.iter()) {
            report.max_depth = report.max_depth.max(contact.penetration_depth());
            match correction {
                Some(c) => {
                    bodies[c.line_owner].move_by(c.line_delta);
                    bodies[c.point_owner].move_by(c.point_delta);
                }
                None => report.within_slop += 1,
            }
        }

        tracing::debug!(
            contacts = report.contacts,
            within_slop = report.within_slop,
            max_depth = report.max_depth,
            "correction pass"
        );
        Ok(report)
    }

    /// Displacements for one contact, `None` when the overlap is within slop
    pub fn contact_correction(
        &self,
        bodies: &[RigidBody],
        contact: &Contact,
        num_contacts: u32,
    ) -> Result<Option<PositionCorrection>, PhysicsError> {
        let (a, b) = contact.bodies(bodies)?;

        let excess = (contact.penetration_depth() - self.slop).max(0.0);
        let inv_mass_sum = a.inverse_mass() + b.inverse_mass();
        if excess == 0.0 || inv_mass_sum <= 0.0 {
            return Ok(None);
        }

        let correction = contact.normal() * (excess / inv_mass_sum * self.percent);
        let share = num_contacts as f32;

        Ok(Some(PositionCorrection {
            line_owner: contact.line_owner(),
            point_owner: contact.point_owner(),
            line_delta: correction * (-a.inverse_mass() / share),
            point_delta: correction * (b.inverse_mass() / share),
        }))
    }
}
