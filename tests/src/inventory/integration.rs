use std::fs;
use std::net::IpAddr;

use hwprobe_common::network::interface::{LinkCommand, ProbeIssue};
use hwprobe_common::network::inventory::InventoryResult;
use hwprobe_core::InventoryAggregator;
use pnet::util::MacAddr;

use hwprobe_core::testing::{Fixture, StaticSource};

use crate::util;

fn mac(last: u8) -> Option<MacAddr> {
    Some(MacAddr::new(0x52, 0x54, 0x00, 0x00, 0x00, last))
}

/// Two PCI NICs listed out of bus order, a loopback, a bridge and a VLAN.
fn host() -> (Fixture, InventoryResult) {
    let fx = Fixture::new();
    util::add(&fx, "pci0000:00/0000:00:1f.0", "eth1", Some(&util::pci_dump("pci-0000:00:1f.0", "enp0s31")));
    util::add(&fx, "pci0000:00/0000:00:03.0", "eth0", Some(&util::pci_dump("pci-0000:00:03.0", "enp0s3")));
    util::add(&fx, "virtual", "lo", Some(""));
    let bridge = util::add(&fx, "virtual", "br0", Some(""));
    fs::create_dir_all(bridge.join("bridge")).unwrap();
    fs::write(bridge.join("bridge/bridge_id"), "8000.525400000001\n").unwrap();
    util::add(&fx, "virtual", "eth0.100", None);
    fs::write(
        fx.vlan_config(),
        "VLAN Dev name    | VLAN ID\n\
         Name-Type: VLAN_NAME_TYPE_RAW_PLUS_VID_NO_PAD\n\
         eth0.100       | 100  | eth0\n",
    )
    .unwrap();

    let listing = vec![
        util::base("eth1", mac(2), &[util::v4(192, 168, 1, 20, 24)]),
        util::base("lo", Some(MacAddr::zero()), &[util::v4(127, 0, 0, 1, 8), util::v6("::1", 128)]),
        util::base("eth0", mac(1), &[util::v4(10, 0, 0, 15, 24), util::v6("fe80::5054:ff:fe00:1", 64)]),
        util::base("br0", mac(1), &[]),
        util::base("eth0.100", mac(1), &[util::v4(10, 0, 100, 1, 24)]),
    ];
    let inventory = util::aggregator(&fx, listing).gather().unwrap();
    (fx, inventory)
}

fn names(inventory: &InventoryResult) -> Vec<&str> {
    inventory.interfaces.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn records_are_ordered_by_bus_path_keeping_listing_order_otherwise() {
    let (_fx, inventory) = host();
    assert_eq!(names(&inventory), vec!["lo", "br0", "eth0.100", "eth0", "eth1"]);
}

#[test]
fn physical_devices_get_disambiguated_ordinals() {
    let (_fx, inventory) = host();
    let eth0 = inventory.get("eth0").unwrap();
    let eth1 = inventory.get("eth1").unwrap();

    assert!(eth0.topology.is_physical);
    assert_eq!(eth0.topology.bus_address, "pci0000:00/0000:00:03.0");
    assert_eq!(eth0.identity.ordinal_name.as_deref(), Some("pci:1"));
    assert_eq!(eth1.identity.ordinal_name.as_deref(), Some("pci:2"));
    assert_eq!(eth0.identity.stable_name.as_deref(), Some("enp0s3"));
    assert_eq!(eth0.identity.driver.as_deref(), Some("e1000e"));
    assert_eq!(inventory.get("lo").unwrap().identity.ordinal_name, None);
}

#[test]
fn link_settings_come_from_the_modern_handshake() {
    let (_fx, inventory) = host();
    let eth0 = inventory.get("eth0").unwrap();

    assert_eq!(eth0.link.command, Some(LinkCommand::Modern));
    assert_eq!(eth0.link.speed, 10000);
    assert!(eth0.link.duplex);
    assert_eq!(eth0.link.supported.len(), 1);
    assert_eq!(eth0.link.supported[0].to_string(), "1000 base T Full");
    assert!(eth0.issues.is_empty());
}

#[test]
fn failing_sources_degrade_a_single_record() {
    let (_fx, inventory) = host();
    assert_eq!(inventory.interfaces.len(), 5);

    let lo = inventory.get("lo").unwrap();
    assert_eq!(lo.link.command, None);
    assert!(matches!(lo.issues.as_slice(), [ProbeIssue::LinkSettings(_)]));
    assert!(!lo.topology.is_physical);

    let vlan = inventory.get("eth0.100").unwrap();
    assert!(vlan.issues.iter().any(|i| matches!(i, ProbeIssue::IdentityDump(_))));
    assert_eq!(vlan.topology.oper_state.as_deref(), Some("up"));
}

#[test]
fn virtual_roles_are_detected() {
    let (_fx, inventory) = host();

    assert!(inventory.get("br0").unwrap().topology.bridge.is_bridge);
    let vlan = &inventory.get("eth0.100").unwrap().topology.vlan;
    assert!(vlan.is_vlan);
    assert_eq!(vlan.id, 100);
    assert_eq!(vlan.master.as_deref(), Some("eth0"));
}

#[test]
fn owners_resolve_addresses_and_last_hardware_wins() {
    let (_fx, inventory) = host();

    let ip: IpAddr = "10.0.0.15".parse().unwrap();
    assert_eq!(inventory.owner_of_address(&ip), Some("eth0"));
    assert_eq!(inventory.owner_of_address(&"::1".parse().unwrap()), Some("lo"));
    assert_eq!(inventory.owner_of_hardware("52:54:00:00:00:02"), Some("eth1"));
    // eth0, br0 and eth0.100 share a MAC; eth0.100 was listed last.
    assert_eq!(inventory.owner_of_hardware("52:54:00:00:00:01"), Some("eth0.100"));
    assert_eq!(inventory.owner_of_hardware("00:00:00:00:00:00"), None);
}

#[test]
fn parallel_gather_matches_sequential() {
    let fx = Fixture::new();
    for (i, slot) in ["1f.0", "03.0", "19.0"].iter().enumerate() {
        let name = format!("eth{i}");
        let id_path = format!("pci-0000:00:{slot}");
        util::add(&fx, &format!("pci0000:00/0000:00:{slot}"), &name, Some(&util::pci_dump(&id_path, &name)));
    }
    let listing: Vec<_> = (0..3u8)
        .map(|i| util::base(&format!("eth{i}"), mac(i), &[util::v4(10, 0, 0, i + 1, 24)]))
        .collect();

    let sequential = util::aggregator(&fx, listing.clone()).gather().unwrap();
    let parallel = util::aggregator(&fx, listing).parallel(true).gather().unwrap();

    assert_eq!(sequential, parallel);
    assert_eq!(names(&parallel), vec!["eth1", "eth2", "eth0"]);
}

#[test]
fn failed_enumeration_aborts_the_gather() {
    let fx = Fixture::new();
    let empty = util::aggregator(&fx, Vec::new());
    assert!(empty.gather().unwrap().interfaces.is_empty());

    let failing = InventoryAggregator::new(Box::new(StaticSource(Err("permission denied".into()))), util::assembler(&fx));
    assert!(failing.gather().is_err());
}
