use crate::terminal::format::{self, Detail};
use crate::terminal::{colors, print};
use colored::*;
use hwprobe_common::network::interface::InterfaceRecord;
use pnet::ipnetwork::IpNetwork;

pub fn to_key_value_pair_net(ip_net: &[IpNetwork]) -> Vec<Detail> {
    ip_net
        .iter()
        .map(|ip_network| match ip_network {
            IpNetwork::V4(ipv4_network) => {
                let address: ColoredString = ipv4_network.ip().to_string().color(colors::IPV4_ADDR);
                let prefix: ColoredString =
                    ipv4_network.prefix().to_string().color(colors::IPV4_PREFIX);
                let result: ColoredString = format!("{address}/{prefix}").color(colors::SEPARATOR);
                ("IPv4".to_string(), result)
            }
            IpNetwork::V6(ipv6_network) => {
                let address: ColoredString = ipv6_network.ip().to_string().color(colors::IPV6_ADDR);
                let prefix: ColoredString =
                    ipv6_network.prefix().to_string().color(colors::IPV6_PREFIX);
                let value: ColoredString = format!("{address}/{prefix}").color(colors::SEPARATOR);
                let key = format::ipv6_to_type_str(&ipv6_network.ip());
                (key.to_string(), value)
            }
        })
        .collect()
}

fn role_details(record: &InterfaceRecord) -> Vec<Detail> {
    let topology = &record.topology;
    let mut roles: Vec<String> = Vec::new();

    if topology.bridge.is_bridge {
        match (&topology.bridge.master, topology.bridge.members.is_empty()) {
            (Some(master), _) => roles.push(format!("bridge port of {master}")),
            (None, false) => roles.push(format!("bridge [{}]", topology.bridge.members.join(", "))),
            (None, true) => roles.push("bridge".to_string()),
        }
    }
    if topology.bond.is_bond {
        let bond = &topology.bond;
        if let Some(master) = &bond.master {
            let state = bond.link_state.as_deref().unwrap_or("unknown");
            roles.push(format!("bond member of {master} ({state})"));
        }
        if bond.mode.is_some() || !bond.members.is_empty() {
            let mode = bond.mode.as_deref().unwrap_or("unknown");
            roles.push(format!("bond {mode} [{}]", bond.members.join(", ")));
        }
    }
    if topology.vlan.is_vlan {
        let master = topology.vlan.master.as_deref().unwrap_or("?");
        roles.push(format!("vlan {} on {master}", topology.vlan.id));
    }

    roles
        .into_iter()
        .map(|role| ("Role".to_string(), role.normal()))
        .collect()
}

pub fn record_details(record: &InterfaceRecord) -> Vec<Detail> {
    let topology = &record.topology;
    let identity = &record.identity;
    let mut details: Vec<Detail> = to_key_value_pair_net(&record.addresses);

    if let Some(mac_addr) = record.hardware_address {
        let mut value = mac_addr.to_string().color(colors::MAC_ADDR).to_string();
        if let Some(vendor) = &record.mac_vendor {
            value = format!("{value} ({vendor})");
        }
        details.push(("MAC".to_string(), value.normal()));
    }
    details.push(("MTU".to_string(), record.mtu.to_string().normal()));
    details.push(("Flags".to_string(), record.flags.to_string().dimmed()));
    details.extend(format::link_to_details(&record.link));

    if !topology.bus_address.is_empty() {
        details.push(("Bus".to_string(), topology.bus_address.as_str().normal()));
    }
    details.extend(format::optional_detail("State", topology.oper_state.as_deref()));
    details.extend(format::optional_detail("Type", topology.type_name));
    details.extend(role_details(record));

    details.extend(format::optional_detail("Model", identity.model.as_deref()));
    details.extend(format::optional_detail("Vendor", identity.vendor.as_deref()));
    details.extend(format::optional_detail("Driver", identity.driver.as_deref()));
    details.extend(format::optional_detail("Stable", identity.stable_name.as_deref()));
    details.extend(format::optional_detail("Ordinal", identity.ordinal_name.as_deref()));
    details.extend(format::optional_detail("Path", identity.bus_path.as_deref()));

    details.extend(record.issues.iter().map(format::issue_to_detail));
    details
}

pub fn print_interface(record: &InterfaceRecord, idx: usize) {
    print::tree_head(idx, &record.name);
    print::as_tree_one_level(record_details(record));
}
