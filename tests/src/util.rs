use std::fs;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::path::PathBuf;

use hwprobe_common::error::TransportError;
use hwprobe_common::network::interface::{BaseInterface, BoundAddress, InterfaceFlags};
use hwprobe_common::system::DeviceControl;
use hwprobe_core::ethtool::layout::{MODERN_BITMAPS, MODERN_DUPLEX, MODERN_SPEED, MODERN_WORD_COUNT};
use hwprobe_core::ethtool::ETHTOOL_GLINKSETTINGS;
use hwprobe_core::assembler::InterfaceAssembler;
use hwprobe_core::testing::{Fixture, StaticSource};
use hwprobe_core::InventoryAggregator;
use pnet::ipnetwork::{IpNetwork, Ipv4Network, Ipv6Network};
use pnet::util::MacAddr;

pub fn base(name: &str, mac: Option<MacAddr>, ips: &[IpNetwork]) -> BaseInterface {
    BaseInterface {
        name: name.into(),
        hardware_address: mac,
        mtu: 1500,
        flags: InterfaceFlags(0x1043),
        addresses: ips.iter().copied().map(BoundAddress::Network).collect(),
    }
}

pub fn v4(a: u8, b: u8, c: u8, d: u8, p: u8) -> IpNetwork {
    IpNetwork::V4(Ipv4Network::new(Ipv4Addr::new(a, b, c, d), p).unwrap())
}

pub fn v6(s: &str, p: u8) -> IpNetwork {
    IpNetwork::V6(Ipv6Network::new(s.parse::<Ipv6Addr>().unwrap(), p).unwrap())
}

/// Every device named `eth*` answers the modern handshake at 10 Gb/s; the
/// rest reject all commands.
pub struct FakeNic;

impl DeviceControl for FakeNic {
    fn issue(&self, interface: &str, command: u32, buffer: &mut [u8]) -> Result<(), TransportError> {
        if command != ETHTOOL_GLINKSETTINGS || !interface.starts_with("eth") {
            return Err(TransportError::Request {
                interface: interface.to_string(),
                command,
                source: io::Error::from(io::ErrorKind::Unsupported),
            });
        }
        if buffer[MODERN_WORD_COUNT] == 0 {
            buffer[MODERN_WORD_COUNT] = (-1i8) as u8;
            return Ok(());
        }
        buffer[MODERN_SPEED..MODERN_SPEED + 4].copy_from_slice(&10000u32.to_ne_bytes());
        buffer[MODERN_DUPLEX] = 1;
        buffer[MODERN_BITMAPS] = 0b0010_0000;
        Ok(())
    }
}

/// An operational device; `None` leaves it without a udev dump.
pub fn add(fx: &Fixture, bus: &str, name: &str, dump: Option<&str>) -> PathBuf {
    let device = fx.device(bus, name);
    fs::write(device.join("operstate"), "up\n").unwrap();
    if let Some(dump) = dump {
        Fixture::write_dump(&device, dump);
    }
    device
}

pub fn assembler(fx: &Fixture) -> InterfaceAssembler {
    fx.assembler_with(Box::new(FakeNic), false)
}

pub fn aggregator(fx: &Fixture, interfaces: Vec<BaseInterface>) -> InventoryAggregator {
    InventoryAggregator::new(Box::new(StaticSource(Ok(interfaces))), assembler(fx))
}

pub fn pci_dump(id_path: &str, stable: &str) -> String {
    format!("E: ID_BUS=pci\nE: ID_NET_NAME_PATH={stable}\nE: ID_PATH={id_path}\nE: ID_NET_DRIVER=e1000e\n")
}
