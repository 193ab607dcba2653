//! Builder for FIT documents used across integration tests.

#![allow(dead_code)]

use garmr_fit::sans::check::compute_crc;

pub const ENUM: u8 = 0x00;
pub const SINT8: u8 = 0x01;
pub const UINT8: u8 = 0x02;
pub const UINT16: u8 = 0x84;
pub const SINT32: u8 = 0x85;
pub const UINT32: u8 = 0x86;
pub const STRING: u8 = 0x07;
pub const FLOAT32: u8 = 0x88;

/// Seconds from the FIT epoch to 2024-03-01T08:00:00Z.
pub const MORNING: u32 = 1_078_214_400;

/// Writes records of a little-endian document, then frames them.
#[derive(Debug, Default)]
pub struct FitBuilder {
    records: Vec<u8>,
}

impl FitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a local message from `(number, size, base type)` entries.
    pub fn definition(self, local: u8, global: u16, fields: &[(u8, u8, u8)]) -> Self {
        self.definition_with_developer(local, global, fields, &[])
    }

    /// Define a local message that also carries `(number, size, developer
    /// index)` developer fields.
    pub fn definition_with_developer(
        mut self,
        local: u8,
        global: u16,
        fields: &[(u8, u8, u8)],
        developer: &[(u8, u8, u8)],
    ) -> Self {
        let header = 0x40 | local | if developer.is_empty() { 0 } else { 0x20 };

        self.records.push(header);
        self.records.extend([0, 0]);
        self.records.extend(global.to_le_bytes());
        self.records.push(fields.len() as u8);
        for &(number, size, base_type) in fields {
            self.records.extend([number, size, base_type]);
        }

        if !developer.is_empty() {
            self.records.push(developer.len() as u8);
            for &(number, size, index) in developer {
                self.records.extend([number, size, index]);
            }
        }

        self
    }

    /// Write a data record with a normal header.
    pub fn data(mut self, local: u8, bytes: &[u8]) -> Self {
        self.records.push(local & 0x0F);
        self.records.extend_from_slice(bytes);
        self
    }

    /// Write a data record with a compressed timestamp header.
    pub fn compressed(mut self, local: u8, offset: u8, bytes: &[u8]) -> Self {
        self.records.push(0x80 | (local & 0x03) << 5 | offset & 0x1F);
        self.records.extend_from_slice(bytes);
        self
    }

    /// Frame the records with a 14-byte header and both CRCs.
    pub fn finish(self) -> Vec<u8> {
        let mut document = vec![14, 0x20];
        document.extend(2132u16.to_le_bytes());
        document.extend((self.records.len() as u32).to_le_bytes());
        document.extend(b".FIT");
        document.extend(compute_crc(0, &document).to_le_bytes());

        document.extend(self.records);
        document.extend(compute_crc(0, &document).to_le_bytes());
        document
    }
}

/// Concatenate little-endian field values into a data record body.
macro_rules! body {
    ($($value:expr),* $(,)?) => {{
        let mut bytes = Vec::new();
        $(bytes.extend_from_slice(&$value.to_le_bytes());)*
        bytes
    }};
}

/// A running session with its laps and records, 1 Hz for `seconds`.
///
/// Heart rate climbs from 120 bpm, one beat per second.
pub fn running_activity(seconds: u32) -> Vec<u8> {
    let mut fit = FitBuilder::new()
        .definition(0, 0, &[(1, 2, UINT16), (2, 2, UINT16), (4, 4, UINT32)])
        .data(0, &body![1u16, 3113u16, MORNING])
        .definition(
            1,
            20,
            &[
                (253, 4, UINT32),
                (0, 4, SINT32),
                (1, 4, SINT32),
                (2, 2, UINT16),
                (3, 1, UINT8),
                (6, 2, UINT16),
            ],
        );

    for s in 0..seconds {
        fit = fit.data(
            1,
            &body![
                MORNING + s,
                214_748_364i32,
                429_496_729i32,
                3000u16,
                (120 + s) as u8,
                3500u16,
            ],
        );
    }

    fit.definition(
        2,
        19,
        &[(253, 4, UINT32), (2, 4, UINT32), (8, 4, UINT32), (9, 4, UINT32), (16, 1, UINT8)],
    )
    .data(2, &body![MORNING + seconds, MORNING, seconds * 1000, seconds * 350, 200u8])
    .definition(
        3,
        18,
        &[
            (253, 4, UINT32),
            (2, 4, UINT32),
            (5, 1, ENUM),
            (6, 1, ENUM),
            (7, 4, UINT32),
            (8, 4, UINT32),
            (9, 4, UINT32),
            (14, 2, UINT16),
            (16, 1, UINT8),
            (17, 1, UINT8),
            (24, 1, UINT8),
        ],
    )
    .data(
        3,
        &body![
            MORNING + seconds,
            MORNING,
            1u8,
            3u8,
            seconds * 1000 + 5000,
            seconds * 1000,
            seconds * 350,
            3500u16,
            150u8,
            200u8,
            35u8,
        ],
    )
    .finish()
}
