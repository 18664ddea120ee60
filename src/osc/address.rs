use crate::error::ConfigError;
use crate::skeleton::JointType;

/// Joints every bundle carries, in transmission order.
pub const REQUIRED_JOINTS: [JointType; 4] = [
    JointType::HandRight,
    JointType::HandLeft,
    JointType::AnkleRight,
    JointType::AnkleLeft,
];

/// OSC address for a joint. Listeners match these strings exactly.
pub fn joint_address(joint_type: JointType) -> String {
    format!("/{}", joint_type.name())
}

/// Ordered joint → address table used to build every bundle.
///
/// Always starts with [`REQUIRED_JOINTS`]; configured extras follow in
/// configured order with duplicates dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressMap {
    entries: Vec<(JointType, String)>,
}

impl AddressMap {
    pub fn new(extra: &[JointType]) -> Self {
        let mut entries: Vec<(JointType, String)> = Vec::with_capacity(REQUIRED_JOINTS.len() + extra.len());
        for joint_type in REQUIRED_JOINTS.iter().chain(extra.iter()) {
            if entries.iter().all(|(j, _)| j != joint_type) {
                entries.push((*joint_type, joint_address(*joint_type)));
            }
        }
        Self { entries }
    }

    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, ConfigError> {
        let joints = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                JointType::from_name(name).ok_or_else(|| ConfigError::UnknownJoint(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(&joints))
    }

    pub fn entries(&self) -> &[(JointType, String)] {
        &self.entries
    }

    pub fn joints(&self) -> impl Iterator<Item = JointType> + '_ {
        self.entries.iter().map(|(j, _)| *j)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AddressMap {
    fn default() -> Self {
        Self::new(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_map() {
        let map = AddressMap::default();
        let addresses: Vec<&str> = map.entries().iter().map(|(_, a)| a.as_str()).collect();
        assert_eq!(addresses, vec!["/HandRight", "/HandLeft", "/AnkleRight", "/AnkleLeft"]);
    }

    #[test]
    fn test_extras_follow_required_without_duplicates() {
        let map = AddressMap::new(&[JointType::Head, JointType::HandLeft, JointType::Head, JointType::WristRight]);
        let joints: Vec<JointType> = map.joints().collect();
        assert_eq!(
            joints,
            vec![
                JointType::HandRight,
                JointType::HandLeft,
                JointType::AnkleRight,
                JointType::AnkleLeft,
                JointType::Head,
                JointType::WristRight,
            ]
        );
    }

    #[test]
    fn test_from_names() {
        let map = AddressMap::from_names(&["ThumbLeft", "SpineMid"]).unwrap();
        assert_eq!(map.len(), 6);
        assert_eq!(map.entries()[4].1, "/ThumbLeft");
        assert_eq!(map.entries()[5].1, "/SpineMid");
    }

    #[test]
    fn test_from_names_rejects_unknown() {
        let err = AddressMap::from_names(&["HandRight", "Tail"]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownJoint(name) if name == "Tail"));
    }

    #[test]
    fn test_every_joint_address() {
        for joint_type in JointType::ALL {
            let address = joint_address(joint_type);
            assert!(address.starts_with('/'));
            assert_eq!(&address[1..], joint_type.name());
        }
    }
}
