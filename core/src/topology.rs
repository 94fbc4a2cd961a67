//! Bus identity, operational state and bridge/bond/VLAN roles of a device.

use std::fs;
use std::path::PathBuf;

use hwprobe_common::network::hardware::HardwareTypeTable;
use hwprobe_common::network::interface::{BondRole, BridgeRole, TopologyAttributes, VlanRole};

use crate::sysfs::{self, SysfsTree};

const DEVICES_PREFIX: &str = "../../devices/";
const VIRTUAL_PREFIX: &str = "virtual";

pub struct TopologyAttributeReader {
    sysfs: SysfsTree,
    vlan_config: PathBuf,
    hardware_types: Box<dyn HardwareTypeTable>,
}

impl TopologyAttributeReader {
    pub fn new(
        sysfs: SysfsTree,
        vlan_config: impl Into<PathBuf>,
        hardware_types: Box<dyn HardwareTypeTable>,
    ) -> Self {
        Self {
            sysfs,
            vlan_config: vlan_config.into(),
            hardware_types,
        }
    }

    pub fn read(&self, name: &str) -> TopologyAttributes {
        let bus_address = self.bus_address(name);
        let is_physical = !bus_address.starts_with(VIRTUAL_PREFIX);

        TopologyAttributes {
            is_physical,
            bus_address,
            if_index: self.sysfs.int(name, "ifindex").unwrap_or_default(),
            if_link: self.sysfs.int(name, "iflink").unwrap_or_default(),
            oper_state: self.sysfs.string(name, "operstate"),
            type_name: self
                .sysfs
                .int(name, "type")
                .and_then(|code| self.hardware_types.name(code)),
            bridge: self.bridge(name),
            vlan: self.vlan(name),
            bond: self.bond(name),
        }
    }

    /// The device entry links to `../../devices/<bus address>/net/<name>`.
    fn bus_address(&self, name: &str) -> String {
        let Some(target) = self.sysfs.link(name, "") else {
            return String::new();
        };
        let target = target.to_string_lossy();
        let suffix = format!("/net/{name}");
        let address = target.strip_prefix(DEVICES_PREFIX).unwrap_or(&target);
        address.strip_suffix(&suffix).unwrap_or(address).to_string()
    }

    fn bridge(&self, name: &str) -> BridgeRole {
        let mut role = BridgeRole {
            members: self.sysfs.dir(name, "brif"),
            ..Default::default()
        };
        if !self.sysfs.dir(name, "brport").is_empty() {
            role.is_bridge = true;
            role.master = self.sysfs.link_name(name, "brport/bridge");
        }
        if self.sysfs.string(name, "bridge/bridge_id").is_some() {
            role.is_bridge = true;
        }
        role
    }

    // Each piece of evidence marks the device independently.
    fn bond(&self, name: &str) -> BondRole {
        let mut role = BondRole::default();
        if let Some(slaves) = self.sysfs.string(name, "bonding/slaves") {
            role.is_bond = true;
            role.members = slaves.split_whitespace().map(str::to_string).collect();
        }
        if let Some(mode) = self.sysfs.string(name, "bonding/mode") {
            role.is_bond = true;
            role.mode = mode.split_whitespace().next().map(str::to_string);
        }
        if let Some(state) = self.sysfs.string(name, "bonding_slave/state") {
            role.is_bond = true;
            role.link_state = Some(state);
            role.master = self.sysfs.link_name(name, "master");
        }
        role
    }

    fn vlan(&self, name: &str) -> VlanRole {
        fs::read_to_string(&self.vlan_config)
            .ok()
            .and_then(|table| parse_vlan_row(&table, name))
            .unwrap_or_default()
    }
}

/// Finds `name` in a `name | id | master` table.
pub fn parse_vlan_row(table: &str, name: &str) -> Option<VlanRole> {
    table.lines().find_map(|line| {
        let mut fields = line.split('|').map(str::trim);
        if fields.next()? != name {
            return None;
        }
        let id = fields.next().and_then(sysfs::parse_int).unwrap_or_default();
        let master = fields.next().filter(|m| !m.is_empty()).map(str::to_string);
        Some(VlanRole { is_vlan: true, id, master })
    })
}
