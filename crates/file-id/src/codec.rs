use base64::{
    Engine,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

use crate::error::{Error, Result};

/// Last byte of every packed identifier.
pub const FORMAT_MARKER: u8 = 0x02;

/// URL-safe alphabet, no padding on output, padding optional on input.
const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decode identifier text into the raw record bytes.
///
/// A zero byte followed by a count expands to that many zero bytes. The
/// trailing [`FORMAT_MARKER`] is checked and stripped.
pub fn decode(raw: &str) -> Result<Vec<u8>> {
    let packed = ENGINE.decode(raw).map_err(Error::malformed)?;

    let Some((&marker, body)) = packed.split_last() else {
        return Err(Error::malformed("empty identifier"));
    };
    if marker != FORMAT_MARKER {
        return Err(Error::malformed(format!(
            "unexpected format marker {marker:#04x}"
        )));
    }

    let mut out = Vec::with_capacity(body.len() * 2);
    let mut bytes = body.iter();
    while let Some(&byte) = bytes.next() {
        if byte == 0 {
            let Some(&count) = bytes.next() else {
                return Err(Error::malformed("zero run without a length"));
            };
            out.resize(out.len() + usize::from(count), 0);
        } else {
            out.push(byte);
        }
    }
    Ok(out)
}

/// Inverse of [`decode`].
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    let mut packed = Vec::with_capacity(bytes.len() + 1);
    let mut zeros: u8 = 0;

    for &byte in bytes.iter().chain(std::iter::once(&FORMAT_MARKER)) {
        if byte == 0 {
            if zeros == u8::MAX {
                packed.extend([0, zeros]);
                zeros = 0;
            }
            zeros += 1;
            continue;
        }
        if zeros > 0 {
            packed.extend([0, zeros]);
            zeros = 0;
        }
        packed.push(byte);
    }

    ENGINE.encode(packed)
}
