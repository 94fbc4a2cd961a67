//! Byte layouts of the two link-settings responses.
//!
//! Multi-byte fields are in host byte order, as the kernel writes them.

use hwprobe_common::error::TransportError;
use hwprobe_common::network::interface::{LinkCommand, LinkSettings};
use hwprobe_common::network::mode;

/// `ETHTOOL_GSET` response size.
pub const LEGACY_LEN: usize = 44;
pub const LEGACY_SUPPORTED: usize = 4;
pub const LEGACY_ADVERTISED: usize = 8;
pub const LEGACY_SPEED_LOW: usize = 12;
pub const LEGACY_DUPLEX: usize = 14;
pub const LEGACY_AUTONEG: usize = 18;
pub const LEGACY_SPEED_HIGH: usize = 28;
pub const LEGACY_PEER_ADVERTISED: usize = 32;
pub const LEGACY_BITMAP_LEN: usize = 4;

/// Scratch size for `ETHTOOL_GLINKSETTINGS`.
pub const MODERN_BUFFER_LEN: usize = 4096;
pub const MODERN_SPEED: usize = 4;
pub const MODERN_DUPLEX: usize = 8;
pub const MODERN_AUTONEG: usize = 11;
/// Signed count of 32-bit words per bitmap.
pub const MODERN_WORD_COUNT: usize = 15;
/// The three bitmaps follow each other from here.
pub const MODERN_BITMAPS: usize = 48;

/// Bounds-checked reads over a response buffer.
struct Frame<'a> {
    buf: &'a [u8],
}

impl<'a> Frame<'a> {
    fn new(buf: &'a [u8], needed: usize) -> Result<Self, TransportError> {
        if buf.len() < needed {
            return Err(TransportError::Truncated { needed, len: buf.len() });
        }
        Ok(Self { buf })
    }

    fn flag(&self, offset: usize) -> bool {
        self.buf[offset] != 0
    }

    fn u16(&self, offset: usize) -> u16 {
        u16::from_ne_bytes([self.buf[offset], self.buf[offset + 1]])
    }

    fn u32(&self, offset: usize) -> u32 {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.buf[offset..offset + 4]);
        u32::from_ne_bytes(raw)
    }

    fn bytes(&self, offset: usize, len: usize) -> &'a [u8] {
        &self.buf[offset..offset + len]
    }
}

/// Number of bitmap words announced by a modern response. A negative value
/// is the kernel asking for that many words.
pub fn modern_word_count(buf: &[u8]) -> i8 {
    buf.get(MODERN_WORD_COUNT).map_or(0, |&b| b as i8)
}

/// Byte ranges of the supported, advertised and peer-advertised bitmaps.
pub fn modern_bitmap_ranges(word_count: usize) -> [std::ops::Range<usize>; 3] {
    let len = word_count * 4;
    let supported = MODERN_BITMAPS;
    let advertised = supported + len;
    let peer = advertised + len;
    [supported..advertised, advertised..peer, peer..peer + len]
}

pub fn decode_modern(buf: &[u8]) -> Result<LinkSettings, TransportError> {
    let words = usize::from(modern_word_count(buf).unsigned_abs());
    let [supported, advertised, peer] = modern_bitmap_ranges(words);
    let frame = Frame::new(buf, peer.end)?;

    Ok(LinkSettings {
        speed: frame.u32(MODERN_SPEED),
        duplex: frame.flag(MODERN_DUPLEX),
        autonegotiation: frame.flag(MODERN_AUTONEG),
        supported: mode::decode(&buf[supported]),
        advertised: mode::decode(&buf[advertised]),
        peer_advertised: mode::decode(&buf[peer]),
        command: Some(LinkCommand::Modern),
    })
}

pub fn decode_legacy(buf: &[u8]) -> Result<LinkSettings, TransportError> {
    let frame = Frame::new(buf, LEGACY_LEN)?;
    let low = u32::from(frame.u16(LEGACY_SPEED_LOW));
    let high = u32::from(frame.u16(LEGACY_SPEED_HIGH));

    Ok(LinkSettings {
        speed: (high << 16) | low,
        duplex: frame.flag(LEGACY_DUPLEX),
        autonegotiation: frame.flag(LEGACY_AUTONEG),
        supported: mode::decode(frame.bytes(LEGACY_SUPPORTED, LEGACY_BITMAP_LEN)),
        advertised: mode::decode(frame.bytes(LEGACY_ADVERTISED, LEGACY_BITMAP_LEN)),
        peer_advertised: mode::decode(frame.bytes(LEGACY_PEER_ADVERTISED, LEGACY_BITMAP_LEN)),
        command: Some(LinkCommand::Legacy),
    })
}
