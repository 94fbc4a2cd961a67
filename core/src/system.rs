use std::io;

use hwprobe_common::error::GatherError;
use hwprobe_common::network::interface::BaseInterface;
use hwprobe_common::system::InterfaceSource;
use hwprobe_common::utils::interface::NetworkInterfaceExtension;
use pnet::datalink::{self, NetworkInterface};

use crate::sysfs::SysfsTree;

/// Interface listing from the datalink layer; MTU comes from the device tree
/// since the listing does not carry it.
pub struct DatalinkSource {
    sysfs: SysfsTree,
}

impl DatalinkSource {
    pub fn new(sysfs: SysfsTree) -> Self {
        Self { sysfs }
    }

    fn mtu(&self, interface: &NetworkInterface) -> u32 {
        self.sysfs
            .int(&interface.name, "mtu")
            .and_then(|mtu| u32::try_from(mtu).ok())
            .unwrap_or_default()
    }
}

/// The datalink listing reads `getifaddrs` but turns a failure into an empty
/// list, so the call is checked here first.
#[cfg(unix)]
fn check_listing() -> Result<(), GatherError> {
    let mut addrs: *mut libc::ifaddrs = std::ptr::null_mut();
    // SAFETY: `addrs` is only freed when the call succeeded.
    let rc = unsafe { libc::getifaddrs(&mut addrs) };
    let status = listing_status(rc, io::Error::last_os_error);
    if rc == 0 {
        unsafe { libc::freeifaddrs(addrs) };
    }
    status
}

#[cfg(not(unix))]
fn check_listing() -> Result<(), GatherError> {
    Ok(())
}

/// errno must be read before anything else touches it.
fn listing_status(rc: i32, last_error: impl FnOnce() -> io::Error) -> Result<(), GatherError> {
    match rc {
        0 => Ok(()),
        _ => Err(GatherError::Enumeration(last_error())),
    }
}

impl InterfaceSource for DatalinkSource {
    fn interfaces(&self) -> Result<Vec<BaseInterface>, GatherError> {
        check_listing()?;
        let interfaces: Vec<NetworkInterface> = datalink::interfaces();
        Ok(interfaces
            .iter()
            .map(|interface| interface.to_base(self.mtu(interface)))
            .collect())
    }
}
