//! Raw activity messages, in the device's native scaled representation.
//!
//! Fields are stored as published by the decoder: values holding their base
//! type's invalid marker are already absent. Conversion to engineering units
//! happens in [`crate::normalize`].

use crate::avec::{FromMessage, FromMessages};

/// The messages of an activity document used to build its summary.
#[derive(Debug, Default, FromMessages)]
pub struct ActivityMessages {
    /// [`crate::profile::message::FILE_ID`]
    #[message(0)]
    pub file_id: Option<FileId>,
    /// [`crate::profile::message::SESSION`]
    #[message(18)]
    pub sessions: Vec<Session>,
    /// [`crate::profile::message::LAP`]
    #[message(19)]
    pub laps: Vec<Lap>,
    /// [`crate::profile::message::RECORD`]
    #[message(20)]
    pub records: Vec<Record>,
}

#[derive(Debug, Default, FromMessage)]
pub struct FileId {
    #[field(1)]
    pub manufacturer: Option<u16>,
    #[field(2)]
    pub product: Option<u16>,
    #[field(4)]
    pub time_created: Option<u32>,
    #[field(8, |v, c: u8| v.push(c))]
    pub product_name: Vec<u8>,
}

impl FileId {
    pub fn product_name(&self) -> Option<&str> {
        if !self.product_name.is_empty() {
            std::str::from_utf8(&self.product_name).ok()
        } else {
            None
        }
    }
}

#[derive(Debug, Default, FromMessage)]
pub struct Session {
    #[field(253)]
    pub timestamp: Option<u32>,
    #[field(2)]
    pub start_time: Option<u32>,
    #[field(5)]
    pub sport: Option<u8>,
    #[field(6)]
    pub sub_sport: Option<u8>,
    /// Milliseconds, including pauses.
    #[field(7)]
    pub total_elapsed_time: Option<u32>,
    /// Milliseconds.
    #[field(8)]
    pub total_timer_time: Option<u32>,
    /// Centimeters.
    #[field(9)]
    pub total_distance: Option<u32>,
    #[field(11)]
    pub total_calories: Option<u32>,
    /// Millimeters per second.
    #[field(14)]
    pub avg_speed: Option<u32>,
    #[field(124)]
    pub enhanced_avg_speed: Option<u32>,
    #[field(16)]
    pub avg_heart_rate: Option<u8>,
    #[field(17)]
    pub max_heart_rate: Option<u8>,
    /// Meters.
    #[field(22)]
    pub total_ascent: Option<u16>,
    /// Meters.
    #[field(23)]
    pub total_descent: Option<u16>,
    /// Tenths.
    #[field(24)]
    pub total_training_effect: Option<u8>,
    /// Tenths.
    #[field(137)]
    pub total_anaerobic_training_effect: Option<u8>,
}

#[derive(Debug, Default, FromMessage)]
pub struct Lap {
    #[field(253)]
    pub timestamp: Option<u32>,
    #[field(2)]
    pub start_time: Option<u32>,
    #[field(8)]
    pub total_timer_time: Option<u32>,
    #[field(9)]
    pub total_distance: Option<u32>,
    #[field(13)]
    pub avg_speed: Option<u32>,
    #[field(110)]
    pub enhanced_avg_speed: Option<u32>,
    #[field(15)]
    pub avg_heart_rate: Option<u8>,
    #[field(16)]
    pub max_heart_rate: Option<u8>,
}

#[derive(Debug, Default, FromMessage)]
pub struct Record {
    #[field(253)]
    pub timestamp: Option<u32>,
    /// Semicircles.
    #[field(0)]
    pub position_lat: Option<i32>,
    /// Semicircles.
    #[field(1)]
    pub position_long: Option<i32>,
    /// Fifths of a meter, offset by 500 m.
    #[field(2)]
    pub altitude: Option<u32>,
    #[field(78)]
    pub enhanced_altitude: Option<u32>,
    #[field(3)]
    pub heart_rate: Option<u8>,
    #[field(4)]
    pub cadence: Option<u8>,
    /// Millimeters per second.
    #[field(6)]
    pub speed: Option<u32>,
    #[field(73)]
    pub enhanced_speed: Option<u32>,
    #[field(7)]
    pub power: Option<u16>,
    #[field(13)]
    pub temperature: Option<i8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::message;

    #[test]
    fn receives_profile_message_numbers() {
        let mut messages = ActivityMessages::default();

        for global in [
            message::FILE_ID,
            message::SESSION,
            message::LAP,
            message::RECORD,
        ] {
            assert!(messages.add_message(global).is_some(), "message {global}");
        }
        assert!(messages.add_message(message::RECORD + 1).is_none());

        assert!(messages.file_id.is_some());
        assert_eq!(
            (messages.sessions.len(), messages.laps.len(), messages.records.len()),
            (1, 1, 1)
        );
    }
}
