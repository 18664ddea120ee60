pub mod body;
pub mod bones;
pub mod joint;
pub mod record;

pub use body::{Body, ClippedEdges, Frame, HandState, BODY_COUNT};
pub use bones::{bone_style, BoneStyle, BONES};
pub use joint::{CameraSpacePoint, Joint, JointType, TrackingState};
pub use record::joint_record;
