use serde::Serialize;

use crate::{
    codec,
    error::{Error, Result},
    media_type::MediaType,
};

/// Size of the four-field record.
pub const SHORT_LEN: usize = 24;

/// Size of the seven-field record.
pub const LONG_LEN: usize = 44;

/// Trailing fields present only in the long layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LongFields {
    pub volume_id: i64,
    pub secret: i64,
    pub local_id: i32,
}

/// Decoded file identifier.
///
/// Both layouts start with `media_type: i32, dc_id: i32, media_id: i64,
/// access_hash: i64`; the long one appends `volume_id: i64, secret: i64,
/// local_id: i32`. All fields are little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileId {
    pub media_type: i32,
    pub dc_id: i32,
    pub media_id: i64,
    pub access_hash: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long: Option<LongFields>,
}

impl FileId {
    #[must_use]
    pub fn new(media_type: i32, dc_id: i32, media_id: i64, access_hash: i64) -> Self {
        Self {
            media_type,
            dc_id,
            media_id,
            access_hash,
            long: None,
        }
    }

    #[must_use]
    pub fn with_long_fields(mut self, long: LongFields) -> Self {
        self.long = Some(long);
        self
    }

    /// Decode and unpack identifier text.
    pub fn parse(raw: &str) -> Result<Self> {
        unpack(&codec::decode(raw)?)
    }

    /// Known media type for the leading code, if any.
    #[must_use]
    pub fn kind(&self) -> Option<MediaType> {
        MediaType::from_code(self.media_type)
    }

    #[must_use]
    pub fn pack(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(if self.long.is_some() {
            LONG_LEN
        } else {
            SHORT_LEN
        });
        out.extend_from_slice(&self.media_type.to_le_bytes());
        out.extend_from_slice(&self.dc_id.to_le_bytes());
        out.extend_from_slice(&self.media_id.to_le_bytes());
        out.extend_from_slice(&self.access_hash.to_le_bytes());
        if let Some(long) = self.long {
            out.extend_from_slice(&long.volume_id.to_le_bytes());
            out.extend_from_slice(&long.secret.to_le_bytes());
            out.extend_from_slice(&long.local_id.to_le_bytes());
        }
        out
    }

    #[must_use]
    pub fn encode(&self) -> String {
        codec::encode(&self.pack())
    }
}

/// Unpack raw record bytes.
///
/// Up to [`SHORT_LEN`] bytes selects the short layout, anything longer the
/// long one. The length must then match the layout exactly.
pub fn unpack(bytes: &[u8]) -> Result<FileId> {
    let expected = if bytes.len() <= SHORT_LEN {
        SHORT_LEN
    } else {
        LONG_LEN
    };
    if bytes.len() != expected {
        return Err(Error::InvalidIdentifier { len: bytes.len() });
    }

    let mut reader = Reader::new(bytes);
    let mut id = FileId {
        media_type: i32::from_le_bytes(reader.take()?),
        dc_id: i32::from_le_bytes(reader.take()?),
        media_id: i64::from_le_bytes(reader.take()?),
        access_hash: i64::from_le_bytes(reader.take()?),
        long: None,
    };
    if expected == LONG_LEN {
        id.long = Some(LongFields {
            volume_id: i64::from_le_bytes(reader.take()?),
            secret: i64::from_le_bytes(reader.take()?),
            local_id: i32::from_le_bytes(reader.take()?),
        });
    }
    Ok(id)
}

struct Reader<'a> {
    buf: &'a [u8],
    total: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            total: buf.len(),
        }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let (head, rest) = self
            .buf
            .split_first_chunk::<N>()
            .ok_or(Error::InvalidIdentifier { len: self.total })?;
        self.buf = rest;
        Ok(*head)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    fn short_bytes() -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&10i32.to_le_bytes());
        bytes.extend_from_slice(&4i32.to_le_bytes());
        bytes.extend_from_slice(&(-5_000_000_000i64).to_le_bytes());
        bytes.extend_from_slice(&0x0102_0304_0506_0708i64.to_le_bytes());
        bytes
    }

    #[test]
    fn unpacks_short_layout() {
        let id = unpack(&short_bytes()).unwrap();
        assert_eq!(id.media_type, 10);
        assert_eq!(id.dc_id, 4);
        assert_eq!(id.media_id, -5_000_000_000);
        assert_eq!(id.access_hash, 0x0102_0304_0506_0708);
        assert!(id.long.is_none());
        assert_eq!(id.kind(), Some(MediaType::Gif));
    }

    #[test]
    fn unpacks_long_layout() {
        let mut bytes = short_bytes();
        bytes.extend_from_slice(&77i64.to_le_bytes());
        bytes.extend_from_slice(&(-1i64).to_le_bytes());
        bytes.extend_from_slice(&12i32.to_le_bytes());
        assert_eq!(bytes.len(), LONG_LEN);

        let id = unpack(&bytes).unwrap();
        assert_eq!(id.media_id, -5_000_000_000);
        assert_eq!(
            id.long,
            Some(LongFields {
                volume_id: 77,
                secret: -1,
                local_id: 12,
            })
        );
        assert_eq!(id.pack(), bytes);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(23)]
    #[case(25)]
    #[case(43)]
    #[case(45)]
    #[case(64)]
    fn rejects_lengths_outside_both_layouts(#[case] len: usize) {
        assert_eq!(
            unpack(&vec![1u8; len]),
            Err(Error::InvalidIdentifier { len })
        );
    }

    #[test]
    fn text_round_trip_preserves_short_fields() {
        let id = FileId::new(MediaType::Gif.code(), 2, 0, i64::MIN);
        let text = id.encode();
        assert!(!text.contains('='));
        assert_eq!(FileId::parse(&text).unwrap(), id);
    }

    #[test]
    fn text_round_trip_preserves_long_fields() {
        let id = FileId::new(MediaType::Photo.code(), 1, 42, 43).with_long_fields(LongFields {
            volume_id: 1 << 40,
            secret: 0,
            local_id: -3,
        });
        assert_eq!(FileId::parse(&id.encode()).unwrap(), id);
    }

    #[test]
    fn parse_reports_length_after_decoding() {
        let text = codec::encode(&[9u8; 30]);
        assert_eq!(
            FileId::parse(&text),
            Err(Error::InvalidIdentifier { len: 30 })
        );
    }
}
