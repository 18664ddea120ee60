use rosc::{encoder, OscBundle, OscMessage, OscPacket, OscTime, OscType};

use crate::error::TransportError;
use crate::osc::address::AddressMap;
use crate::skeleton::{Body, CameraSpacePoint};

/// OSC time tag meaning "process immediately".
pub const IMMEDIATELY: OscTime = OscTime {
    seconds: 0,
    fractional: 1,
};

/// Coordinate → OSC string argument.
///
/// Uses `f32`'s `Display`: the shortest decimal that parses back to the same
/// `f32` (`0.1`, `-1.2`, `3`), `-0` for negative zero, `NaN`, `inf`, `-inf`.
pub fn format_coordinate(value: f32) -> String {
    value.to_string()
}

/// Message `address ,sss x y z`.
pub fn build_joint_message(address: &str, position: CameraSpacePoint) -> OscMessage {
    OscMessage {
        addr: address.to_string(),
        args: vec![
            OscType::String(format_coordinate(position.x)),
            OscType::String(format_coordinate(position.y)),
            OscType::String(format_coordinate(position.z)),
        ],
    }
}

/// One bundle per body, one message per address map entry.
///
/// Positions are encoded as given; callers sanitize first.
pub fn build_bundle(body: &Body, map: &AddressMap) -> OscBundle {
    let content = map
        .entries()
        .iter()
        .map(|(joint_type, address)| OscPacket::Message(build_joint_message(address, body.position(*joint_type))))
        .collect();
    OscBundle {
        timetag: IMMEDIATELY,
        content,
    }
}

/// Bundle → datagram payload.
pub fn encode_bundle(bundle: &OscBundle) -> Result<Vec<u8>, TransportError> {
    let packet = OscPacket::Bundle(bundle.clone());
    encoder::encode(&packet).map_err(|e| TransportError::Encode(e.to_string()))
}
