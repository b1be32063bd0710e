//! Velocity pass: normal (restitution) and friction impulses per contact.
//!
//! Single pass, not an iterative solver. Every contact is evaluated against
//! the velocities from before the pass (in parallel with the `parallel`
//! feature), then all impulses are applied in contact order. Shared bodies
//! accumulate impulses from all of their contacts.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::PhysicsError;
use crate::domain::SimulationConfig;
use crate::rigid_body::{RigidBody, Vec2};
use crate::systems::contact::{Contact, PairCounts};

/// Impulse pair computed for one contact, applied as action/reaction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactImpulse {
    pub line_owner: usize,
    pub point_owner: usize,
    pub line_offset: Vec2,
    pub point_offset: Vec2,
    /// Normal impulse received by the point owner
    pub normal: Vec2,
    /// Friction impulse received by the point owner
    pub friction: Vec2,
    /// Signed normal impulse magnitude `j`
    pub magnitude: f32,
    /// Friction hit the dynamic (Coulomb) limit
    pub friction_clamped: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResolveReport {
    pub contacts: u32,
    pub separating: u32,
    pub impulses_applied: u32,
    pub friction_clamped: u32,
    pub total_normal_impulse: f32,
}

#[derive(Clone, Debug)]
pub struct CollisionResolver {
    gravity: Vec2,
    restitution: f32,
    resting_epsilon: f32,
    static_friction: f32,
    dynamic_friction: f32,
    friction_epsilon: f32,
    max_impulse: f32,
}

impl CollisionResolver {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            gravity: config.gravity,
            restitution: config.restitution,
            resting_epsilon: config.resting_epsilon,
            static_friction: config.static_friction,
            dynamic_friction: config.dynamic_friction,
            friction_epsilon: config.friction_epsilon,
            max_impulse: config.max_impulse,
        }
    }

    /// Resolve all contacts of one step.
    ///
    /// Errors are detected before any body is touched, so a failed pass
    /// leaves every velocity as it was.
    pub fn resolve(
        &self,
        bodies: &mut [RigidBody],
        contacts: &[Contact],
        dt: f32,
    ) -> Result<ResolveReport, PhysicsError> {
        let mut report = ResolveReport {
            contacts: contacts.len() as u32,
            ..ResolveReport::default()
        };
        if contacts.is_empty() {
            return Ok(report);
        }

        let pairs = PairCounts::from_contacts(contacts);
        let snapshot: &[RigidBody] = bodies;

        #[cfg(feature = "parallel")]
        let impulses: Vec<Option<ContactImpulse>> = contacts
            .par_iter()
            .map(|c| self.contact_impulse(snapshot, c, pairs.count(c), dt))
            .collect::<Result<_, _>>()?;

        #[cfg(not(feature = "parallel"))]
        let impulses: Vec<Option<ContactImpulse>> = contacts
            .iter()
            .map(|c| self.contact_impulse(snapshot, c, pairs.count(c), dt))
            .collect::<Result<_, _>>()?;

        for impulse in impulses.iter() {
            let Some(impulse) = impulse else {
                report.separating += 1;
                continue;
            };
            apply_pair(bodies, impulse, impulse.normal);
            apply_pair(bodies, impulse, impulse.friction);

            report.impulses_applied += 1;
            report.total_normal_impulse += impulse.magnitude;
            if impulse.friction_clamped {
                report.friction_clamped += 1;
            }
        }

        tracing::debug!(
            contacts = report.contacts,
            pairs = pairs.pair_count(),
            separating = report.separating,
            clamped = report.friction_clamped,
            "collision pass"
        );
        Ok(report)
    }

    /// Impulses for a single contact, or `None` when the bodies separate.
    ///
    /// `num_contacts` is how many contacts share this body pair in the pass.
    pub fn contact_impulse(
        &self,
        bodies: &[RigidBody],
        contact: &Contact,
        num_contacts: u32,
        dt: f32,
    ) -> Result<Option<ContactImpulse>, PhysicsError> {
        let (a, b) = contact.bodies(bodies)?;
        let n = contact.normal();
        let r_a = contact.line_offset();
        let r_b = contact.point_offset();

        let rel_v = contact.relative_velocity();
        let rel_v_n = rel_v.dot(n);
        if rel_v_n > 0.0 {
            return Ok(None);
        }

        // Resting contacts bounce with no restitution, otherwise gravity jitter never settles
        let resting = (self.gravity * dt).length_squared() + self.resting_epsilon;
        let e = if rel_v.length_squared() < resting { 0.0 } else { self.restitution };

        let denom = effective_mass(a, b, r_a, r_b, n) * num_contacts as f32;
        if !(denom > 0.0) {
            return Err(self.degenerate(contact));
        }
        let j = -(1.0 + e) * rel_v_n / denom;
        if !(j.abs() < self.max_impulse) {
            return Err(PhysicsError::ImpulseOverflow { impulse: j, bound: self.max_impulse });
        }

        let (friction, friction_clamped) =
            self.friction_impulse(a, b, contact, rel_v, rel_v_n, j, num_contacts)?;

        Ok(Some(ContactImpulse {
            line_owner: contact.line_owner(),
            point_owner: contact.point_owner(),
            line_offset: r_a,
            point_offset: r_b,
            normal: n * j,
            friction,
            magnitude: j,
            friction_clamped,
        }))
    }

    /// Coulomb friction along the sliding direction
    #[allow(clippy::too_many_arguments)]
    fn friction_impulse(
        &self,
        a: &RigidBody,
        b: &RigidBody,
        contact: &Contact,
        rel_v: Vec2,
        rel_v_n: f32,
        j: f32,
        num_contacts: u32,
    ) -> Result<(Vec2, bool), PhysicsError> {
        let n = contact.normal();
        let tangent = (rel_v - n * rel_v_n).normalize();

        let denom = effective_mass(a, b, contact.line_offset(), contact.point_offset(), tangent)
            * num_contacts as f32;
        if !(denom > 0.0) {
            return Err(self.degenerate(contact));
        }

        let jt = -rel_v.dot(tangent) / denom;
        if jt.abs() < self.friction_epsilon {
            return Ok((Vec2::zero(), false));
        }

        if jt.abs() < j.abs() * self.static_friction {
            Ok((tangent * jt, false))
        } else {
            Ok((tangent * (-j.abs() * self.dynamic_friction), true))
        }
    }

    fn degenerate(&self, contact: &Contact) -> PhysicsError {
        PhysicsError::DegenerateContact {
            line_owner: contact.line_owner(),
            point_owner: contact.point_owner(),
        }
    }
}

/// Inverse effective mass of the pair along `dir`
#[inline]
fn effective_mass(a: &RigidBody, b: &RigidBody, r_a: Vec2, r_b: Vec2, dir: Vec2) -> f32 {
    let ra_d = r_a.cross(dir);
    let rb_d = r_b.cross(dir);
    a.inverse_mass()
        + a.inverse_inertia() * ra_d * ra_d
        + b.inverse_mass()
        + b.inverse_inertia() * rb_d * rb_d
}

/// Line owner takes `-impulse`, point owner takes `+impulse`
fn apply_pair(bodies: &mut [RigidBody], contact: &ContactImpulse, impulse: Vec2) {
    bodies[contact.line_owner].apply_impulse(-impulse, contact.line_offset);
    bodies[contact.point_owner].apply_impulse(impulse, contact.point_offset);
}
