//! Frame extraction.
//!
//! Turns the semi-structured per-frame payload delivered by the sensor side
//! into a fully populated [`Frame`]. Body storage is a fixed arena of
//! [`BODY_COUNT`] slots refreshed in place every frame.

use serde::Deserialize;

use crate::error::FrameError;
use crate::skeleton::{Body, CameraSpacePoint, ClippedEdges, Frame, HandState, Joint, JointType, TrackingState, BODY_COUNT};

/// Body frame as delivered by the sensor. `bodies[i]` describes slot `i`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFrame {
    #[serde(default)]
    pub bodies: Vec<RawBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBody {
    #[serde(default)]
    pub tracked: bool,
    #[serde(default)]
    pub hand_left: HandState,
    #[serde(default)]
    pub hand_right: HandState,
    #[serde(default)]
    pub clipped_edges: ClippedEdges,
    /// May be partial or unordered. Later entries win on duplicates.
    #[serde(default)]
    pub joints: Vec<RawJoint>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawJoint {
    #[serde(rename = "type")]
    pub joint_type: JointType,
    pub position: CameraSpacePoint,
    #[serde(default)]
    pub state: TrackingState,
}

/// Reusable body arena.
pub struct FrameExtractor {
    frame: Frame,
}

impl FrameExtractor {
    pub fn new() -> Self {
        Self { frame: Frame::new() }
    }

    /// Refresh the arena from `raw`.
    ///
    /// `None` means the sensor had nothing ready and yields
    /// [`FrameError::Unavailable`]. On any error the previous contents are
    /// left untouched.
    pub fn extract(&mut self, raw: Option<&RawFrame>) -> Result<&Frame, FrameError> {
        let raw = raw.ok_or(FrameError::Unavailable)?;
        if raw.bodies.len() > BODY_COUNT {
            return Err(FrameError::SlotOverflow {
                count: raw.bodies.len(),
                capacity: BODY_COUNT,
            });
        }

        for (slot, body) in self.frame.bodies.iter_mut().enumerate() {
            match raw.bodies.get(slot) {
                Some(raw_body) => refresh_body(body, raw_body),
                None => body.reset(),
            }
        }

        Ok(&self.frame)
    }

    /// Last successfully extracted frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }
}

impl Default for FrameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn refresh_body(body: &mut Body, raw: &RawBody) {
    body.is_tracked = raw.tracked;
    body.hand_left_state = raw.hand_left;
    body.hand_right_state = raw.hand_right;
    body.clipped_edges = raw.clipped_edges;
    for (i, joint) in body.joints.iter_mut().enumerate() {
        *joint = Joint::not_tracked(JointType::ALL[i]);
    }
    for raw_joint in &raw.joints {
        body.joints[raw_joint.joint_type as usize] =
            Joint::new(raw_joint.joint_type, raw_joint.position, raw_joint.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_body(tracked: bool, joints: &[(JointType, [f32; 3], TrackingState)]) -> RawBody {
        RawBody {
            tracked,
            joints: joints
                .iter()
                .map(|(joint_type, p, state)| RawJoint {
                    joint_type: *joint_type,
                    position: CameraSpacePoint::new(p[0], p[1], p[2]),
                    state: *state,
                })
                .collect(),
            ..RawBody::default()
        }
    }

    #[test]
    fn test_unavailable() {
        let mut extractor = FrameExtractor::new();
        assert_eq!(extractor.extract(None).unwrap_err(), FrameError::Unavailable);
    }

    #[test]
    fn test_slot_overflow() {
        let mut extractor = FrameExtractor::new();
        let raw = RawFrame {
            bodies: vec![RawBody::default(); BODY_COUNT + 1],
        };
        assert_eq!(
            extractor.extract(Some(&raw)).unwrap_err(),
            FrameError::SlotOverflow { count: 7, capacity: 6 }
        );
    }

    #[test]
    fn test_short_frame_fills_every_slot() {
        let mut extractor = FrameExtractor::new();
        let raw = RawFrame {
            bodies: vec![raw_body(true, &[])],
        };
        let frame = extractor.extract(Some(&raw)).unwrap();
        assert_eq!(frame.bodies.len(), BODY_COUNT);
        assert!(frame.bodies[0].is_tracked);
        assert_eq!(frame.tracked_count(), 1);
    }

    #[test]
    fn test_missing_joints_are_present_as_not_tracked() {
        let mut extractor = FrameExtractor::new();
        let raw = RawFrame {
            bodies: vec![raw_body(
                true,
                &[(JointType::HandRight, [0.5, -1.2, 2.0], TrackingState::Tracked)],
            )],
        };
        let frame = extractor.extract(Some(&raw)).unwrap();
        let body = &frame.bodies[0];
        assert_eq!(body.joint(JointType::HandRight).tracking_state, TrackingState::Tracked);
        assert_eq!(body.position(JointType::HandRight), CameraSpacePoint::new(0.5, -1.2, 2.0));
        for joint_type in JointType::ALL {
            assert_eq!(body.joint(joint_type).joint_type, joint_type);
        }
        assert_eq!(body.joint(JointType::Head).tracking_state, TrackingState::NotTracked);
    }

    #[test]
    fn test_untracked_body_keeps_joints() {
        let mut extractor = FrameExtractor::new();
        let raw = RawFrame {
            bodies: vec![raw_body(
                false,
                &[(JointType::Head, [1.0, 2.0, 3.0], TrackingState::Inferred)],
            )],
        };
        let frame = extractor.extract(Some(&raw)).unwrap();
        assert!(!frame.bodies[0].is_tracked);
        assert_eq!(frame.bodies[0].position(JointType::Head), CameraSpacePoint::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_slot_reuse_clears_previous_occupant() {
        let mut extractor = FrameExtractor::new();
        let first = RawFrame {
            bodies: vec![
                RawBody::default(),
                raw_body(true, &[(JointType::Head, [1.0, 1.0, 1.0], TrackingState::Tracked)]),
            ],
        };
        extractor.extract(Some(&first)).unwrap();

        let second = RawFrame {
            bodies: vec![RawBody::default(), raw_body(true, &[])],
        };
        let frame = extractor.extract(Some(&second)).unwrap();
        assert_eq!(frame.bodies[1].slot_index, 1);
        assert_eq!(frame.bodies[1].joint(JointType::Head).tracking_state, TrackingState::NotTracked);

        let empty = RawFrame::default();
        let frame = extractor.extract(Some(&empty)).unwrap();
        assert_eq!(frame.tracked_count(), 0);
    }

    #[test]
    fn test_renderer_state_carried_into_body() {
        let mut extractor = FrameExtractor::new();
        let mut body = raw_body(true, &[]);
        body.hand_left = HandState::Lasso;
        body.clipped_edges.right = true;
        let raw = RawFrame { bodies: vec![body] };
        let frame = extractor.extract(Some(&raw)).unwrap();
        assert_eq!(frame.bodies[0].hand_left_state, HandState::Lasso);
        assert!(frame.bodies[0].clipped_edges.right);
        assert!(!frame.bodies[0].clipped_edges.left);
    }

    #[test]
    fn test_error_leaves_previous_frame() {
        let mut extractor = FrameExtractor::new();
        let raw = RawFrame {
            bodies: vec![raw_body(true, &[])],
        };
        extractor.extract(Some(&raw)).unwrap();
        let _ = extractor.extract(None);
        assert!(extractor.frame().bodies[0].is_tracked);
    }

    #[test]
    fn test_deserialize_raw_frame() {
        let json = r#"{"bodies":[{"tracked":true,"hand_right":"Closed","clipped_edges":{"top":true},"joints":[
            {"type":"HandRight","position":{"x":0.5,"y":-1.2,"z":-0.05},"state":"Inferred"}
        ]}]}"#;
        let raw: RawFrame = serde_json::from_str(json).unwrap();
        assert_eq!(raw.bodies.len(), 1);
        assert!(raw.bodies[0].tracked);
        assert_eq!(raw.bodies[0].hand_right, HandState::Closed);
        assert_eq!(raw.bodies[0].hand_left, HandState::Unknown);
        assert!(raw.bodies[0].clipped_edges.top);
        assert!(!raw.bodies[0].clipped_edges.bottom);
        assert_eq!(raw.bodies[0].joints[0].joint_type, JointType::HandRight);
        assert_eq!(raw.bodies[0].joints[0].state, TrackingState::Inferred);
    }
}
