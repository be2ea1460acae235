use std::fmt;
use std::str::FromStr;

use crate::error::ActionError;

/// Bluetooth device address, six colon-separated hex pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BluetoothAddress([u8; 6]);

impl BluetoothAddress {
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl FromStr for BluetoothAddress {
    type Err = ActionError;

    /// Parse `aa:bb:cc:dd:ee:ff`, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ActionError::InvalidAddress {
            address: s.to_string(),
        };

        let mut octets = [0u8; 6];
        let mut groups = s.split(':');
        for octet in octets.iter_mut() {
            let group = groups.next().ok_or_else(invalid)?;
            if group.len() != 2 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            *octet = u8::from_str_radix(group, 16).map_err(|_| invalid())?;
        }
        if groups.next().is_some() {
            return Err(invalid());
        }

        Ok(Self(octets))
    }
}

impl fmt::Display for BluetoothAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            a, b, c, d, e, g
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_address() {
        let address: BluetoothAddress = "00:1f:c5:3D:8a:0B".parse().unwrap();
        assert_eq!(address.octets(), [0x00, 0x1f, 0xc5, 0x3d, 0x8a, 0x0b]);
        assert_eq!(address.to_string(), "00:1F:C5:3D:8A:0B");
    }

    #[test]
    fn test_reject_malformed_addresses() {
        for bad in [
            "",
            "00:1f:c5:3d:8a",
            "00:1f:c5:3d:8a:0b:11",
            "00-1f-c5-3d-8a-0b",
            "0:1f:c5:3d:8a:0b",
            "000:1f:c5:3d:8a:0b",
            "zz:1f:c5:3d:8a:0b",
            "+0:1f:c5:3d:8a:0b",
            "00:1f:c5:3d:8a:0b:",
        ] {
            let result = bad.parse::<BluetoothAddress>();
            assert_eq!(
                result,
                Err(ActionError::InvalidAddress {
                    address: bad.to_string()
                }),
                "accepted {:?}",
                bad
            );
        }
    }
}
