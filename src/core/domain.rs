//! Identity types for the planning domain.
//!
//! Locations and movable items are referred to by opaque integer handles.
//! Handles are assigned once, when the problem is constructed, and compared
//! by value everywhere else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Handle of a symbolic location.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct PoseId(pub u32);

impl fmt::Display for PoseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Handle of a movable object. Stable across every State derived from the
/// same root.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "o{}", self.0)
    }
}

/// A symbolic location.
///
/// Two poses are equal iff their ids are equal; the name is only a label.
///
/// # Example
///
/// ```rust
/// use pickplace::core::{Pose, PoseId};
///
/// let a = Pose::new(PoseId(0), "shelf");
/// let b = Pose::new(PoseId(1), "shelf");
///
/// assert_ne!(a, b);
/// assert_eq!(a, Pose::new(PoseId(0), "table"));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pose {
    id: PoseId,
    name: String,
}

impl Pose {
    pub fn new(id: PoseId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> PoseId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Pose {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Pose {}

impl Hash for Pose {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A movable item and where it currently rests.
///
/// `pose` is `None` while the object is in the gripper. Values are never
/// mutated; moving an object produces a new `Object`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Object {
    pub id: ObjectId,
    pub pose: Option<PoseId>,
}

impl Object {
    /// An object resting at `pose`.
    pub fn at(id: ObjectId, pose: PoseId) -> Self {
        Self {
            id,
            pose: Some(pose),
        }
    }

    /// Same object, resting at `pose`.
    pub fn moved_to(self, pose: PoseId) -> Self {
        Self {
            id: self.id,
            pose: Some(pose),
        }
    }

    /// Same object, lifted into the gripper.
    pub fn in_hand(self) -> Self {
        Self {
            id: self.id,
            pose: None,
        }
    }

    pub fn is_in_hand(&self) -> bool {
        self.pose.is_none()
    }
}

/// The fixed set of valid locations for one planning problem.
///
/// Location order is significant: successor enumeration visits PLACE
/// destinations in this order, which decides between equal-length plans.
///
/// # Example
///
/// ```rust
/// use pickplace::core::{Environment, PoseId};
///
/// let env = Environment::new(["A", "B", "C"]);
///
/// assert_eq!(env.len(), 3);
/// assert_eq!(env.pose_by_name("B").map(|p| p.id()), Some(PoseId(1)));
/// assert!(env.contains(PoseId(2)));
/// assert!(!env.contains(PoseId(3)));
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Environment {
    locations: Vec<Pose>,
}

impl Environment {
    /// Create an environment, assigning ids `0..n` in iteration order.
    pub fn new<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let locations = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| Pose::new(PoseId(index as u32), name))
            .collect();
        Self { locations }
    }

    pub fn locations(&self) -> &[Pose] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn contains(&self, id: PoseId) -> bool {
        self.pose(id).is_some()
    }

    pub fn pose(&self, id: PoseId) -> Option<&Pose> {
        self.locations.iter().find(|pose| pose.id == id)
    }

    /// First location carrying `name`.
    pub fn pose_by_name(&self, name: &str) -> Option<&Pose> {
        self.locations.iter().find(|pose| pose.name == name)
    }
}
