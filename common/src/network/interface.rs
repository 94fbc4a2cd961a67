//! Per-interface inventory record and its component attribute groups.

use std::fmt;

use pnet::ipnetwork::IpNetwork;
use pnet::util::MacAddr;

use crate::network::mac;
use crate::network::mode::ModeDescriptor;

const IFF_UP: u32 = 1;
const IFF_BROADCAST: u32 = 1 << 1;
const IFF_LOOPBACK: u32 = 1 << 3;
const IFF_POINTTOPOINT: u32 = 1 << 4;
const IFF_RUNNING: u32 = 1 << 6;
const IFF_MULTICAST: u32 = 1 << 12;

const FLAG_NAMES: &[(u32, &str)] = &[
    (IFF_UP, "up"),
    (IFF_BROADCAST, "broadcast"),
    (IFF_LOOPBACK, "loopback"),
    (IFF_POINTTOPOINT, "pointtopoint"),
    (IFF_MULTICAST, "multicast"),
    (IFF_RUNNING, "running"),
];

/// Raw `IFF_*` flag word as reported by the OS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterfaceFlags(pub u32);

impl InterfaceFlags {
    pub fn is_loopback(&self) -> bool {
        self.0 & IFF_LOOPBACK != 0
    }
}

impl fmt::Display for InterfaceFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = FLAG_NAMES
            .iter()
            .filter(|(bit, _)| self.0 & bit != 0)
            .map(|(_, name)| *name)
            .collect();
        if names.is_empty() {
            return f.write_str("0");
        }
        f.write_str(&names.join("|"))
    }
}

/// An address bound to an interface as the OS enumerates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundAddress {
    Network(IpNetwork),
    /// Any non-IP address family; skipped during assembly.
    Other(String),
}

/// What the OS interface listing reports before any enrichment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseInterface {
    pub name: String,
    pub hardware_address: Option<MacAddr>,
    pub mtu: u32,
    pub flags: InterfaceFlags,
    pub addresses: Vec<BoundAddress>,
}

/// Which device-control command produced a [`LinkSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkCommand {
    Modern,
    Legacy,
}

impl fmt::Display for LinkCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkCommand::Modern => f.write_str("glinksettings"),
            LinkCommand::Legacy => f.write_str("gset"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSettings {
    /// Mbps.
    pub speed: u32,
    pub duplex: bool,
    pub autonegotiation: bool,
    pub supported: Vec<ModeDescriptor>,
    pub advertised: Vec<ModeDescriptor>,
    pub peer_advertised: Vec<ModeDescriptor>,
    pub command: Option<LinkCommand>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeRole {
    pub is_bridge: bool,
    pub members: Vec<String>,
    pub master: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VlanRole {
    pub is_vlan: bool,
    pub id: i64,
    pub master: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BondRole {
    pub is_bond: bool,
    pub mode: Option<String>,
    pub members: Vec<String>,
    pub master: Option<String>,
    pub link_state: Option<String>,
}

/// Topology as exported by the kernel's network-device attribute tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologyAttributes {
    pub bus_address: String,
    pub is_physical: bool,
    pub if_index: i64,
    pub if_link: i64,
    pub oper_state: Option<String>,
    pub type_name: Option<&'static str>,
    pub bridge: BridgeRole,
    pub vlan: VlanRole,
    pub bond: BondRole,
}

/// Identity as reported by the device-attribute database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityAttributes {
    pub model: Option<String>,
    pub vendor: Option<String>,
    pub driver: Option<String>,
    pub stable_name: Option<String>,
    /// Seed before inventory-wide disambiguation, `base:n` afterwards.
    pub ordinal_name: Option<String>,
    pub bus_path: Option<String>,
}

/// A data source that failed for one interface without aborting the gather.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeIssue {
    LinkSettings(String),
    IdentityDump(String),
}

impl fmt::Display for ProbeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeIssue::LinkSettings(msg) => write!(f, "link settings: {msg}"),
            ProbeIssue::IdentityDump(msg) => write!(f, "device attributes: {msg}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceRecord {
    pub name: String,
    pub hardware_address: Option<MacAddr>,
    pub mac_vendor: Option<String>,
    pub mtu: u32,
    pub flags: InterfaceFlags,
    /// In OS enumeration order.
    pub addresses: Vec<IpNetwork>,
    pub link: LinkSettings,
    pub topology: TopologyAttributes,
    pub identity: IdentityAttributes,
    pub issues: Vec<ProbeIssue>,
}

impl InterfaceRecord {
    pub fn new(base: &BaseInterface) -> Self {
        Self {
            name: base.name.clone(),
            hardware_address: mac::hardware_address(base.hardware_address),
            mtu: base.mtu,
            flags: base.flags,
            ..Default::default()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.issues.is_empty()
    }
}
