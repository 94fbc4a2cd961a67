//! Link settings over the ethtool device-control protocol.
//!
//! The modern `ETHTOOL_GLINKSETTINGS` command is tried first. It is a two
//! step handshake: the first request reports how many bitmap words the driver
//! needs (as a negative count), the second request carries the corrected
//! count and returns the real payload. Drivers that do not implement it are
//! queried with the legacy fixed-size `ETHTOOL_GSET`.

pub mod layout;
pub mod transport;

use hwprobe_common::error::{LinkSettingsError, TransportError};
use hwprobe_common::network::interface::LinkSettings;
use hwprobe_common::system::DeviceControl;
use tracing::{debug, trace};

use layout::{LEGACY_LEN, MODERN_BUFFER_LEN, MODERN_WORD_COUNT};

pub const SIOCETHTOOL: u32 = 0x8946;
pub const ETHTOOL_GSET: u32 = 0x1;
pub const ETHTOOL_GLINKSETTINGS: u32 = 0x4c;

pub struct LinkSettingsDecoder {
    transport: Box<dyn DeviceControl>,
}

impl LinkSettingsDecoder {
    pub fn new(transport: Box<dyn DeviceControl>) -> Self {
        Self { transport }
    }

    pub fn decode(&self, interface: &str) -> Result<LinkSettings, LinkSettingsError> {
        let modern = match self.fetch_modern(interface) {
            Ok(settings) => return Ok(settings),
            Err(e) => e,
        };
        debug!(interface, error = %modern, "modern link settings unavailable, trying legacy");

        self.fetch_legacy(interface)
            .map_err(|legacy| LinkSettingsError::Unavailable {
                interface: interface.to_string(),
                modern,
                legacy,
            })
    }

    fn fetch_modern(&self, interface: &str) -> Result<LinkSettings, TransportError> {
        let mut buf = vec![0u8; MODERN_BUFFER_LEN];
        self.transport.issue(interface, ETHTOOL_GLINKSETTINGS, &mut buf)?;

        let words = layout::modern_word_count(&buf);
        trace!(interface, words, "link mode handshake");
        if words < 0 {
            buf[MODERN_WORD_COUNT] = words.unsigned_abs();
        }
        self.transport.issue(interface, ETHTOOL_GLINKSETTINGS, &mut buf)?;

        layout::decode_modern(&buf)
    }

    fn fetch_legacy(&self, interface: &str) -> Result<LinkSettings, TransportError> {
        let mut buf = vec![0u8; LEGACY_LEN];
        self.transport.issue(interface, ETHTOOL_GSET, &mut buf)?;
        layout::decode_legacy(&buf)
    }
}
