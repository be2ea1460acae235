//! Linux input-subsystem codes used by the balance board driver.

use crate::measurement::{Channel, Corner, RawEvent};

pub const EV_SYN: u16 = 0x00;
pub const EV_KEY: u16 = 0x01;
pub const EV_ABS: u16 = 0x03;

pub const SYN_REPORT: u16 = 0;
pub const SYN_DROPPED: u16 = 3;

pub const ABS_HAT0X: u16 = 0x10;
pub const ABS_HAT0Y: u16 = 0x11;
pub const ABS_HAT1X: u16 = 0x12;
pub const ABS_HAT1Y: u16 = 0x13;

pub const BTN_A: u16 = 0x130;

/// Map an (event type, code) pair onto a board channel.
pub fn channel_for(kind: u16, code: u16) -> Channel {
    match (kind, code) {
        (EV_SYN, SYN_REPORT) => Channel::Report,
        (EV_SYN, SYN_DROPPED) => Channel::SyncDropped,
        (EV_ABS, ABS_HAT1X) => Channel::Sensor(Corner::TopLeft),
        (EV_ABS, ABS_HAT0X) => Channel::Sensor(Corner::TopRight),
        (EV_ABS, ABS_HAT0Y) => Channel::Sensor(Corner::BottomLeft),
        (EV_ABS, ABS_HAT1Y) => Channel::Sensor(Corner::BottomRight),
        (EV_KEY, BTN_A) => Channel::Button,
        _ => Channel::Unknown { kind, code },
    }
}

/// Inverse of [`channel_for`].
pub fn codes_for(channel: Channel) -> (u16, u16) {
    match channel {
        Channel::Report => (EV_SYN, SYN_REPORT),
        Channel::SyncDropped => (EV_SYN, SYN_DROPPED),
        Channel::Sensor(Corner::TopLeft) => (EV_ABS, ABS_HAT1X),
        Channel::Sensor(Corner::TopRight) => (EV_ABS, ABS_HAT0X),
        Channel::Sensor(Corner::BottomLeft) => (EV_ABS, ABS_HAT0Y),
        Channel::Sensor(Corner::BottomRight) => (EV_ABS, ABS_HAT1Y),
        Channel::Button => (EV_KEY, BTN_A),
        Channel::Unknown { kind, code } => (kind, code),
    }
}

pub fn decode(kind: u16, code: u16, value: i32) -> RawEvent {
    RawEvent::new(channel_for(kind, code), value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_mapping() {
        assert_eq!(
            channel_for(EV_ABS, ABS_HAT1X),
            Channel::Sensor(Corner::TopLeft)
        );
        assert_eq!(
            channel_for(EV_ABS, ABS_HAT0X),
            Channel::Sensor(Corner::TopRight)
        );
        assert_eq!(
            channel_for(EV_ABS, ABS_HAT0Y),
            Channel::Sensor(Corner::BottomLeft)
        );
        assert_eq!(
            channel_for(EV_ABS, ABS_HAT1Y),
            Channel::Sensor(Corner::BottomRight)
        );
    }

    #[test]
    fn test_sync_and_button_mapping() {
        assert_eq!(channel_for(EV_SYN, SYN_REPORT), Channel::Report);
        assert_eq!(channel_for(EV_SYN, SYN_DROPPED), Channel::SyncDropped);
        assert_eq!(channel_for(EV_KEY, BTN_A), Channel::Button);
    }

    #[test]
    fn test_type_is_part_of_the_key() {
        // SYN_DROPPED shares its code with ABS_Z; only the type tells them apart
        assert_eq!(
            channel_for(EV_ABS, SYN_DROPPED),
            Channel::Unknown { kind: EV_ABS, code: 3 }
        );
        assert_eq!(
            channel_for(EV_KEY, ABS_HAT0X),
            Channel::Unknown {
                kind: EV_KEY,
                code: ABS_HAT0X
            }
        );
    }

    #[test]
    fn test_codes_for_inverts_channel_for() {
        for channel in [
            Channel::Report,
            Channel::SyncDropped,
            Channel::Button,
            Channel::Sensor(Corner::TopLeft),
            Channel::Sensor(Corner::BottomRight),
            Channel::Unknown { kind: 4, code: 4 },
        ] {
            let (kind, code) = codes_for(channel);
            assert_eq!(channel_for(kind, code), channel);
        }
    }
}
