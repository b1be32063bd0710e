//! Contact - one interpenetration between two bodies for a single step
//!
//! Contacts come from the detection stage and are read-only for the rest of
//! the step. One body contributes an edge (the line owner), the other a
//! vertex (the point owner); the normal points from the line owner towards
//! the point owner.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::PhysicsError;
use crate::rigid_body::{RigidBody, Vec2};

/// How far |n| may drift from 1 before a normal is rejected
const NORMAL_TOLERANCE: f32 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    line_owner: usize,
    point_owner: usize,
    normal: Vec2,
    depth: f32,
    /// Contact point relative to the line owner's center of mass (world axes)
    line_offset: Vec2,
    /// Contact point relative to the point owner's center of mass (world axes)
    point_offset: Vec2,
    /// Point-owner velocity minus line-owner velocity at the contact point
    relative_velocity: Vec2,
}

impl Contact {
    /// Build a contact from already-frozen geometry.
    ///
    /// Owners are indices into the body slice the contact will be resolved against.
    pub fn new(
        line_owner: usize,
        point_owner: usize,
        normal: Vec2,
        depth: f32,
        line_offset: Vec2,
        point_offset: Vec2,
        relative_velocity: Vec2,
    ) -> Result<Self, PhysicsError> {
        if line_owner == point_owner {
            return Err(PhysicsError::SelfContact(line_owner));
        }
        if !normal.is_finite() || (normal.length() - 1.0).abs() > NORMAL_TOLERANCE {
            return Err(PhysicsError::InvalidNormal { x: normal.x, y: normal.y });
        }
        if !(depth.is_finite() && depth >= 0.0) {
            return Err(PhysicsError::InvalidDepth(depth));
        }
        Ok(Self {
            line_owner,
            point_owner,
            normal,
            depth,
            line_offset,
            point_offset,
            relative_velocity,
        })
    }

    /// Build a contact at world `point`, freezing offsets and relative velocity
    /// from the current state of both bodies.
    pub fn between(
        bodies: &[RigidBody],
        line_owner: usize,
        point_owner: usize,
        normal: Vec2,
        depth: f32,
        point: Vec2,
    ) -> Result<Self, PhysicsError> {
        let a = bodies.get(line_owner).ok_or(PhysicsError::UnknownBody(line_owner))?;
        let b = bodies.get(point_owner).ok_or(PhysicsError::UnknownBody(point_owner))?;

        let line_offset = point - a.pos;
        let point_offset = point - b.pos;
        let relative_velocity = b.velocity_at(point_offset) - a.velocity_at(line_offset);

        Self::new(
            line_owner,
            point_owner,
            normal,
            depth,
            line_offset,
            point_offset,
            relative_velocity,
        )
    }

    pub fn line_owner(&self) -> usize {
        self.line_owner
    }

    pub fn point_owner(&self) -> usize {
        self.point_owner
    }

    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    pub fn penetration_depth(&self) -> f32 {
        self.depth
    }

    pub fn line_offset(&self) -> Vec2 {
        self.line_offset
    }

    pub fn point_offset(&self) -> Vec2 {
        self.point_offset
    }

    pub fn relative_velocity(&self) -> Vec2 {
        self.relative_velocity
    }

    /// Unordered body pair, used to count contacts between the same two bodies
    #[inline]
    pub fn pair_key(&self) -> (usize, usize) {
        if self.line_owner < self.point_owner {
            (self.line_owner, self.point_owner)
        } else {
            (self.point_owner, self.line_owner)
        }
    }

    /// Look up both owners, rejecting out-of-range indices and static/static pairs
    pub fn bodies<'a>(&self, bodies: &'a [RigidBody]) -> Result<(&'a RigidBody, &'a RigidBody), PhysicsError> {
        let a = bodies
            .get(self.line_owner)
            .ok_or(PhysicsError::UnknownBody(self.line_owner))?;
        let b = bodies
            .get(self.point_owner)
            .ok_or(PhysicsError::UnknownBody(self.point_owner))?;
        if a.is_static() && b.is_static() {
            return Err(PhysicsError::DegenerateContact {
                line_owner: self.line_owner,
                point_owner: self.point_owner,
            });
        }
        Ok((a, b))
    }
}

/// Number of contacts per unordered body pair in one contact list.
///
/// Multi-point contacts split their impulse and correction evenly, so every
/// contact needs to know how many siblings share its pair.
#[derive(Debug, Default)]
pub struct PairCounts {
    counts: HashMap<(usize, usize), u32>,
}

impl PairCounts {
    pub fn from_contacts(contacts: &[Contact]) -> Self {
        let mut counts = HashMap::with_capacity(contacts.len());
        for contact in contacts {
            *counts.entry(contact.pair_key()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Contacts sharing `contact`'s pair (including itself)
    pub fn count(&self, contact: &Contact) -> u32 {
        self.counts.get(&contact.pair_key()).copied().unwrap_or(1)
    }

    pub fn pair_count(&self) -> usize {
        self.counts.len()
    }
}

/// Contact as sent by an external detection stage (JSON), owners are body ids
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDesc {
    pub line_owner: u32,
    pub point_owner: u32,
    pub normal: Vec2,
    pub depth: f32,
    /// World-space contact point
    pub point: Vec2,
}

impl ContactDesc {
    pub fn list_from_json(json: &str) -> Result<Vec<ContactDesc>, PhysicsError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn floor_and_box() -> Vec<RigidBody> {
        let floor = RigidBody::static_rectangle(Vec2::new(0.0, 0.0), Vec2::new(20.0, 1.0));
        let mut body = RigidBody::rectangle(Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0), 1.0).unwrap();
        body.set_velocity(Vec2::new(2.0, -5.0));
        body.set_angular_velocity(1.0);
        vec![floor, body]
    }

    #[test]
    fn between_freezes_offsets_and_relative_velocity() {
        let bodies = floor_and_box();
        let point = Vec2::new(0.5, 0.5);
        let c = Contact::between(&bodies, 0, 1, Vec2::new(0.0, 1.0), 0.1, point).unwrap();

        assert_eq!(c.line_offset(), Vec2::new(0.5, 0.5));
        assert_eq!(c.point_offset(), Vec2::new(0.5, -0.5));
        // (2, -5) + 1 × (0.5, -0.5) = (2.5, -4.5)
        assert_relative_eq!(c.relative_velocity().x, 2.5);
        assert_relative_eq!(c.relative_velocity().y, -4.5);
    }

    #[test]
    fn rejects_invalid_geometry() {
        let bodies = floor_and_box();
        let p = Vec2::zero();
        assert!(matches!(
            Contact::between(&bodies, 0, 1, Vec2::new(0.0, 2.0), 0.1, p),
            Err(PhysicsError::InvalidNormal { .. })
        ));
        assert!(matches!(
            Contact::between(&bodies, 0, 1, Vec2::new(0.0, 1.0), -0.1, p),
            Err(PhysicsError::InvalidDepth(_))
        ));
        assert!(matches!(
            Contact::between(&bodies, 1, 1, Vec2::new(0.0, 1.0), 0.1, p),
            Err(PhysicsError::SelfContact(1))
        ));
        assert!(matches!(
            Contact::between(&bodies, 0, 7, Vec2::new(0.0, 1.0), 0.1, p),
            Err(PhysicsError::UnknownBody(7))
        ));
    }

    #[test]
    fn static_pair_is_degenerate() {
        let bodies = vec![
            RigidBody::static_rectangle(Vec2::zero(), Vec2::new(1.0, 1.0)),
            RigidBody::static_rectangle(Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0)),
        ];
        let c = Contact::between(&bodies, 0, 1, Vec2::new(0.0, 1.0), 0.0, Vec2::zero()).unwrap();
        assert!(matches!(c.bodies(&bodies), Err(PhysicsError::DegenerateContact { .. })));
    }

    #[test]
    fn pair_counts_ignore_owner_order() {
        let n = Vec2::new(0.0, 1.0);
        let z = Vec2::zero();
        let contacts = vec![
            Contact::new(0, 1, n, 0.1, z, z, z).unwrap(),
            Contact::new(1, 0, n, 0.1, z, z, z).unwrap(),
            Contact::new(1, 2, n, 0.1, z, z, z).unwrap(),
        ];
        let counts = PairCounts::from_contacts(&contacts);
        assert_eq!(counts.pair_count(), 2);
        assert_eq!(counts.count(&contacts[0]), 2);
        assert_eq!(counts.count(&contacts[1]), 2);
        assert_eq!(counts.count(&contacts[2]), 1);
    }

    #[test]
    fn desc_list_parses_camel_case() {
        let json = r#"[{"lineOwner": 1, "pointOwner": 2, "normal": [0, 1], "depth": 0.2, "point": [3, 4]}]"#;
        let list = ContactDesc::list_from_json(json).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].point_owner, 2);
        assert_eq!(list[0].point, Vec2::new(3.0, 4.0));
    }
}
