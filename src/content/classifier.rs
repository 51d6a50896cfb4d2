// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Plaintext detection

/// Bytes inspected at most
const SAMPLE_BYTES: usize = 64;

/// Code points decoded at most
const SAMPLE_CODE_POINTS: usize = 16;

/// Returns true if `bytes` probably contains human readable text.
///
/// Only the first 64 bytes are looked at, and at most 16 UTF-8 code points
/// are decoded from them. A control character that is not whitespace, or a
/// multi-byte sequence cut off by the end of the sample, marks the buffer as
/// binary. Malformed sequences decode as U+FFFD and are tolerated.
pub fn is_plaintext(bytes: &[u8]) -> bool {
    let mut prefix = &bytes[..bytes.len().min(SAMPLE_BYTES)];

    for _ in 0..SAMPLE_CODE_POINTS {
        match next_code_point(prefix) {
            Decoded::Exhausted => return true,
            Decoded::Truncated => return false,
            Decoded::Char(c, width) => {
                if is_binary_control(c) {
                    return false;
                }
                prefix = &prefix[width..];
            }
        }
    }
    true
}

enum Decoded {
    Exhausted,
    Truncated,
    Char(char, usize),
}

fn next_code_point(bytes: &[u8]) -> Decoded {
    let Some(&lead) = bytes.first() else {
        return Decoded::Exhausted;
    };

    let (width, init, min) = match lead {
        0x00..=0x7F => return Decoded::Char(char::from(lead), 1),
        0xC0..=0xDF => (2, u32::from(lead & 0x1F), 0x80),
        0xE0..=0xEF => (3, u32::from(lead & 0x0F), 0x800),
        0xF0..=0xF7 => (4, u32::from(lead & 0x07), 0x1_0000),
        // Stray continuation byte or invalid lead
        _ => return Decoded::Char(char::REPLACEMENT_CHARACTER, 1),
    };

    if bytes.len() < width {
        return Decoded::Truncated;
    }

    let mut value = init;
    for (i, &b) in bytes.iter().enumerate().take(width).skip(1) {
        // A bad continuation byte ends the sequence before itself
        if b & 0xC0 != 0x80 {
            return Decoded::Char(char::REPLACEMENT_CHARACTER, i);
        }
        value = (value << 6) | u32::from(b & 0x3F);
    }

    // Overlong forms, surrogates and values past U+10FFFF are one U+FFFD
    let c = if value < min {
        char::REPLACEMENT_CHARACTER
    } else {
        char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
    };
    Decoded::Char(c, width)
}

/// ISO control characters (C0, DEL, C1) other than the whitespace controls
/// `\t \n \x0B \x0C \r` and the separators `\x1C..=\x1F`.
fn is_binary_control(c: char) -> bool {
    c.is_control() && !matches!(c, '\t'..='\r' | '\u{1C}'..='\u{1F}')
}
