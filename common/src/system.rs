//! Capabilities the gather needs from the operating system.
//!
//! Implementations live in `hwprobe-core`; tests substitute deterministic
//! fakes.

use std::path::Path;

use crate::error::{DumpError, GatherError, TransportError};
use crate::network::interface::BaseInterface;

/// Lists the OS network interfaces together with their bound addresses.
pub trait InterfaceSource: Send + Sync {
    fn interfaces(&self) -> Result<Vec<BaseInterface>, GatherError>;
}

/// Issues one device-control request against a named interface.
///
/// The command code is written into the first four bytes of `buffer`; the
/// response is written back into `buffer` in place.
pub trait DeviceControl: Send + Sync {
    fn issue(&self, interface: &str, command: u32, buffer: &mut [u8]) -> Result<(), TransportError>;
}

/// Dumps the device-attribute database entry for a device path as
/// `KEY=value` lines.
pub trait AttributeDump: Send + Sync {
    fn dump(&self, device_path: &Path) -> Result<String, DumpError>;
}
