use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::IpNetwork;

use crate::network::interface::{BaseInterface, BoundAddress, InterfaceFlags};
use crate::network::mac;

// Conversions from the datalink listing into inventory input
pub trait NetworkInterfaceExtension {
    fn bound_addresses(&self) -> Vec<BoundAddress>;
    fn to_base(&self, mtu: u32) -> BaseInterface;
}

impl NetworkInterfaceExtension for NetworkInterface {
    fn bound_addresses(&self) -> Vec<BoundAddress> {
        self.ips.iter().copied().map(BoundAddress::Network).collect()
    }

    fn to_base(&self, mtu: u32) -> BaseInterface {
        BaseInterface {
            name: self.name.clone(),
            hardware_address: mac::hardware_address(self.mac),
            mtu,
            flags: InterfaceFlags(self.flags),
            addresses: self.bound_addresses(),
        }
    }
}

/// Only IP networks survive into the record; the rest are skipped.
pub fn ip_networks(addresses: &[BoundAddress]) -> impl Iterator<Item = IpNetwork> + '_ {
    addresses.iter().filter_map(|address| match address {
        BoundAddress::Network(net) => Some(*net),
        BoundAddress::Other(_) => None,
    })
}
