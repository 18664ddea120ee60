use serde::{Deserialize, Serialize};

use super::joint::{CameraSpacePoint, Joint, JointType};

/// Number of body slots the sensor exposes per frame.
pub const BODY_COUNT: usize = 6;

/// Hand pose reported alongside the skeleton. Only the renderer uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HandState {
    #[default]
    Unknown,
    NotTracked,
    Open,
    Closed,
    Lasso,
}

/// Frame borders the body extends past. Only the renderer uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClippedEdges {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl ClippedEdges {
    pub fn any(&self) -> bool {
        self.top || self.bottom || self.left || self.right
    }
}

/// One body slot.
///
/// `joints` always holds all 25 joints indexed by `JointType`, whatever
/// their tracking state. The slot index is stable across frames while the
/// occupant may change.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub slot_index: usize,
    pub is_tracked: bool,
    pub hand_left_state: HandState,
    pub hand_right_state: HandState,
    pub clipped_edges: ClippedEdges,
    pub joints: [Joint; JointType::COUNT],
}

impl Body {
    /// An untracked body with every joint present and `NotTracked`.
    pub fn empty(slot_index: usize) -> Self {
        Self {
            slot_index,
            is_tracked: false,
            hand_left_state: HandState::Unknown,
            hand_right_state: HandState::Unknown,
            clipped_edges: ClippedEdges::default(),
            joints: std::array::from_fn(|i| Joint::not_tracked(JointType::ALL[i])),
        }
    }

    pub fn joint(&self, joint_type: JointType) -> &Joint {
        &self.joints[joint_type as usize]
    }

    pub fn position(&self, joint_type: JointType) -> CameraSpacePoint {
        self.joints[joint_type as usize].position
    }

    /// Clear the slot back to its untracked state, keeping the index.
    pub fn reset(&mut self) {
        *self = Self::empty(self.slot_index);
    }
}

/// One sampled instant covering every slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub bodies: [Body; BODY_COUNT],
}

impl Frame {
    pub fn new() -> Self {
        Self {
            bodies: std::array::from_fn(Body::empty),
        }
    }

    /// Tracked bodies in slot order.
    pub fn tracked_bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| b.is_tracked)
    }

    pub fn tracked_count(&self) -> usize {
        self.tracked_bodies().count()
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}
