pub mod address;
pub mod encode;
pub mod transport;

pub use address::{joint_address, AddressMap, REQUIRED_JOINTS};
pub use encode::{build_bundle, build_joint_message, encode_bundle, format_coordinate, IMMEDIATELY};
pub use transport::{Transport, UdpTransport};
