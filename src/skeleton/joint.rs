use serde::{Deserialize, Serialize};

/// The 25 skeletal landmarks reported per body.
///
/// Discriminants follow the sensor's native joint index, so a `JointType`
/// can index directly into a `[Joint; JointType::COUNT]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(usize)]
pub enum JointType {
    SpineBase = 0,
    SpineMid = 1,
    Neck = 2,
    Head = 3,
    ShoulderLeft = 4,
    ElbowLeft = 5,
    WristLeft = 6,
    HandLeft = 7,
    ShoulderRight = 8,
    ElbowRight = 9,
    WristRight = 10,
    HandRight = 11,
    HipLeft = 12,
    KneeLeft = 13,
    AnkleLeft = 14,
    FootLeft = 15,
    HipRight = 16,
    KneeRight = 17,
    AnkleRight = 18,
    FootRight = 19,
    SpineShoulder = 20,
    HandTipLeft = 21,
    ThumbLeft = 22,
    HandTipRight = 23,
    ThumbRight = 24,
}

impl JointType {
    pub const COUNT: usize = 25;

    /// All joints in sensor index order.
    pub const ALL: [JointType; Self::COUNT] = [
        Self::SpineBase,
        Self::SpineMid,
        Self::Neck,
        Self::Head,
        Self::ShoulderLeft,
        Self::ElbowLeft,
        Self::WristLeft,
        Self::HandLeft,
        Self::ShoulderRight,
        Self::ElbowRight,
        Self::WristRight,
        Self::HandRight,
        Self::HipLeft,
        Self::KneeLeft,
        Self::AnkleLeft,
        Self::FootLeft,
        Self::HipRight,
        Self::KneeRight,
        Self::AnkleRight,
        Self::FootRight,
        Self::SpineShoulder,
        Self::HandTipLeft,
        Self::ThumbLeft,
        Self::HandTipRight,
        Self::ThumbRight,
    ];

    /// All joints sorted by name. Textual joint records are written in this order.
    pub const ALPHABETICAL: [JointType; Self::COUNT] = [
        Self::AnkleLeft,
        Self::AnkleRight,
        Self::ElbowLeft,
        Self::ElbowRight,
        Self::FootLeft,
        Self::FootRight,
        Self::HandLeft,
        Self::HandRight,
        Self::HandTipLeft,
        Self::HandTipRight,
        Self::Head,
        Self::HipLeft,
        Self::HipRight,
        Self::KneeLeft,
        Self::KneeRight,
        Self::Neck,
        Self::ShoulderLeft,
        Self::ShoulderRight,
        Self::SpineBase,
        Self::SpineMid,
        Self::SpineShoulder,
        Self::ThumbLeft,
        Self::ThumbRight,
        Self::WristLeft,
        Self::WristRight,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Joint name as it appears in OSC addresses and config files.
    pub fn name(self) -> &'static str {
        match self {
            Self::SpineBase => "SpineBase",
            Self::SpineMid => "SpineMid",
            Self::Neck => "Neck",
            Self::Head => "Head",
            Self::ShoulderLeft => "ShoulderLeft",
            Self::ElbowLeft => "ElbowLeft",
            Self::WristLeft => "WristLeft",
            Self::HandLeft => "HandLeft",
            Self::ShoulderRight => "ShoulderRight",
            Self::ElbowRight => "ElbowRight",
            Self::WristRight => "WristRight",
            Self::HandRight => "HandRight",
            Self::HipLeft => "HipLeft",
            Self::KneeLeft => "KneeLeft",
            Self::AnkleLeft => "AnkleLeft",
            Self::FootLeft => "FootLeft",
            Self::HipRight => "HipRight",
            Self::KneeRight => "KneeRight",
            Self::AnkleRight => "AnkleRight",
            Self::FootRight => "FootRight",
            Self::SpineShoulder => "SpineShoulder",
            Self::HandTipLeft => "HandTipLeft",
            Self::ThumbLeft => "ThumbLeft",
            Self::HandTipRight => "HandTipRight",
            Self::ThumbRight => "ThumbRight",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|j| j.name() == name)
    }
}

impl std::fmt::Display for JointType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-joint confidence tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TrackingState {
    #[default]
    NotTracked,
    Inferred,
    Tracked,
}

/// Camera-space position in meters. `z` is the distance from the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraSpacePoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl CameraSpacePoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A single joint sample. Built fresh each frame and not mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub joint_type: JointType,
    pub position: CameraSpacePoint,
    pub tracking_state: TrackingState,
}

impl Joint {
    pub fn new(joint_type: JointType, position: CameraSpacePoint, tracking_state: TrackingState) -> Self {
        Self {
            joint_type,
            position,
            tracking_state,
        }
    }

    /// Placeholder for a joint the sensor did not report.
    pub fn not_tracked(joint_type: JointType) -> Self {
        Self::new(joint_type, CameraSpacePoint::default(), TrackingState::NotTracked)
    }

    pub fn is_tracked(&self) -> bool {
        self.tracking_state == TrackingState::Tracked
    }
}
