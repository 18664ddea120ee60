use std::fmt::Write;

use super::body::Body;
use super::joint::JointType;

/// Space-separated `x y z ` triples for all 25 joints, in alphabetical
/// joint-name order. Every triple is followed by a single space.
pub fn joint_record(body: &Body) -> String {
    let mut out = String::with_capacity(JointType::COUNT * 32);
    for joint_type in JointType::ALPHABETICAL {
        let p = body.position(joint_type);
        // Writing to a String never fails.
        let _ = write!(out, "{} {} {} ", p.x, p.y, p.z);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::joint::CameraSpacePoint;

    #[test]
    fn test_record_has_75_values() {
        let body = Body::empty(0);
        let record = joint_record(&body);
        assert_eq!(record.split_whitespace().count(), 75);
        assert!(record.ends_with(' '));
    }

    #[test]
    fn test_record_starts_with_ankle_left_and_ends_with_wrist_right() {
        let mut body = Body::empty(0);
        body.joints[JointType::AnkleLeft as usize].position = CameraSpacePoint::new(1.5, 2.0, 3.25);
        body.joints[JointType::WristRight as usize].position = CameraSpacePoint::new(-0.5, 0.0, 9.0);
        let record = joint_record(&body);
        assert!(record.starts_with("1.5 2 3.25 "));
        assert!(record.ends_with("-0.5 0 9 "));
    }
}
