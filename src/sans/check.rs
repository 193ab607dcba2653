//! Helper for computing cyclic redundancy checks.
//!
//! FIT documents use the reflected CRC-16 with polynomial `0x8005` (also known
//! as CRC-16/ARC), seeded with zero.

const TABLE: [u16; 256] = table();

const fn table() -> [u16; 256] {
    const POLYNOMIAL: u16 = 0xA001; // 0x8005, reflected.

    let mut table = [0; 256];
    let mut i = 0;

    while i < 256 {
        let mut crc = i as u16;
        let mut bit = 0;

        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ POLYNOMIAL
            } else {
                crc >> 1
            };
            bit += 1;
        }

        table[i] = crc;
        i += 1;
    }

    table
}

/// Accumulate a slice of bytes into a cyclic redundancy check value.
pub fn compute_crc(init: u16, r: &[u8]) -> u16 {
    r.iter()
        .fold(init, |crc, b| (crc >> 8) ^ TABLE[usize::from((crc as u8) ^ b)])
}
