use super::body::Body;
use super::joint::{JointType, TrackingState};

/// Skeleton connections (start joint, end joint).
pub const BONES: [(JointType, JointType); 24] = [
    // Torso
    (JointType::Head, JointType::Neck),
    (JointType::Neck, JointType::SpineShoulder),
    (JointType::SpineShoulder, JointType::SpineMid),
    (JointType::SpineMid, JointType::SpineBase),
    (JointType::SpineShoulder, JointType::ShoulderRight),
    (JointType::SpineShoulder, JointType::ShoulderLeft),
    (JointType::SpineBase, JointType::HipRight),
    (JointType::SpineBase, JointType::HipLeft),
    // Right arm
    (JointType::ShoulderRight, JointType::ElbowRight),
    (JointType::ElbowRight, JointType::WristRight),
    (JointType::WristRight, JointType::HandRight),
    (JointType::HandRight, JointType::HandTipRight),
    (JointType::WristRight, JointType::ThumbRight),
    // Left arm
    (JointType::ShoulderLeft, JointType::ElbowLeft),
    (JointType::ElbowLeft, JointType::WristLeft),
    (JointType::WristLeft, JointType::HandLeft),
    (JointType::HandLeft, JointType::HandTipLeft),
    (JointType::WristLeft, JointType::ThumbLeft),
    // Right leg
    (JointType::HipRight, JointType::KneeRight),
    (JointType::KneeRight, JointType::AnkleRight),
    (JointType::AnkleRight, JointType::FootRight),
    // Left leg
    (JointType::HipLeft, JointType::KneeLeft),
    (JointType::KneeLeft, JointType::AnkleLeft),
    (JointType::AnkleLeft, JointType::FootLeft),
];

/// How a renderer should draw a bone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoneStyle {
    /// Either end is not tracked.
    Hidden,
    /// At least one end is only inferred.
    Inferred,
    /// Both ends tracked.
    Tracked,
}

pub fn bone_style(body: &Body, start: JointType, end: JointType) -> BoneStyle {
    let a = body.joint(start).tracking_state;
    let b = body.joint(end).tracking_state;
    match (a, b) {
        (TrackingState::NotTracked, _) | (_, TrackingState::NotTracked) => BoneStyle::Hidden,
        (TrackingState::Tracked, TrackingState::Tracked) => BoneStyle::Tracked,
        _ => BoneStyle::Inferred,
    }
}
