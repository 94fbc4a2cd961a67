use hwprobe_common::network::interface::{BaseInterface, InterfaceRecord, ProbeIssue};
use hwprobe_common::network::inventory::ReverseMaps;
use hwprobe_common::utils::interface::ip_networks;
use hwprobe_common::vendors::VendorRepository;
use tracing::debug;

use crate::ethtool::LinkSettingsDecoder;
use crate::identity::IdentityAttributeReader;
use crate::topology::TopologyAttributeReader;

/// Builds one complete [`InterfaceRecord`] from the OS listing plus every
/// per-interface data source.
pub struct InterfaceAssembler {
    topology: TopologyAttributeReader,
    identity: IdentityAttributeReader,
    /// `None` skips the device-control protocol.
    link: Option<LinkSettingsDecoder>,
    vendors: Option<Box<dyn VendorRepository>>,
}

impl InterfaceAssembler {
    pub fn new(
        topology: TopologyAttributeReader,
        identity: IdentityAttributeReader,
        link: Option<LinkSettingsDecoder>,
        vendors: Option<Box<dyn VendorRepository>>,
    ) -> Self {
        Self { topology, identity, link, vendors }
    }

    /// Never fails: a data source that errors leaves its fields at their
    /// defaults and adds a [`ProbeIssue`].
    pub fn assemble(&self, base: &BaseInterface) -> InterfaceRecord {
        let mut record = InterfaceRecord::new(base);
        record.addresses.extend(ip_networks(&base.addresses));

        record.topology = self.topology.read(&record.name);

        match self.identity.read(&record.name, record.topology.is_physical) {
            Ok(identity) => record.identity = identity,
            Err(e) => {
                debug!(interface = %record.name, error = %e, "device attributes unavailable");
                record.issues.push(ProbeIssue::IdentityDump(e.to_string()));
            }
        }

        if let Some(link) = &self.link {
            match link.decode(&record.name) {
                Ok(settings) => record.link = settings,
                Err(e) => {
                    debug!(interface = %record.name, error = %e, "link settings unavailable");
                    record.issues.push(ProbeIssue::LinkSettings(e.to_string()));
                }
            }
        }

        if let (Some(vendors), Some(mac)) = (&self.vendors, record.hardware_address) {
            record.mac_vendor = vendors.get_vendor(mac);
        }

        record
    }

    /// Assembles and records the result in the shared reverse maps.
    pub fn assemble_into(&self, base: &BaseInterface, owners: &mut ReverseMaps) -> InterfaceRecord {
        let record = self.assemble(base);
        owners.record(&record);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwprobe_common::network::interface::{BoundAddress, InterfaceFlags, LinkCommand};
    use pnet::util::MacAddr;

    use crate::testing::{Fixture, NoLink};

    fn base(name: &str) -> BaseInterface {
        BaseInterface {
            name: name.to_string(),
            hardware_address: Some(MacAddr::new(0x52, 0x54, 0, 0x12, 0x34, 0x56)),
            mtu: 1500,
            flags: InterfaceFlags(0x1043),
            addresses: vec![
                BoundAddress::Network("10.0.0.15/24".parse().unwrap()),
                BoundAddress::Other("link".into()),
                BoundAddress::Network("fe80::5054:ff:fe12:3456/64".parse().unwrap()),
            ],
        }
    }

    #[test]
    fn assembles_every_source() {
        let fx = Fixture::new();
        fx.physical("pci0000:00/0000:00:03.0", "eth0", "pci-0000:00:03.0", "pci");

        let record = fx.assembler().assemble(&base("eth0"));

        assert_eq!(record.mtu, 1500);
        assert_eq!(record.addresses.len(), 2);
        assert_eq!(record.addresses[0].to_string(), "10.0.0.15/24");
        assert!(record.topology.is_physical);
        assert_eq!(record.identity.bus_path.as_deref(), Some("pci-0000:00:03.0"));
        assert_eq!(record.identity.ordinal_name.as_deref(), Some("pci"));
        assert_eq!(record.link.speed, 1000);
        assert_eq!(record.link.command, Some(LinkCommand::Legacy));
        assert_eq!(record.mac_vendor.as_deref(), Some("QEMU"));
        assert!(record.is_complete());
    }

    #[test]
    fn failing_sources_degrade_the_record() {
        let fx = Fixture::new();
        fx.physical("pci0000:00/0000:00:03.0", "eth0", "pci-0000:00:03.0", "pci");

        let record = fx.assembler_with(Box::new(NoLink), true).assemble(&base("eth0"));

        assert_eq!(record.link, Default::default());
        assert_eq!(record.identity, Default::default());
        assert_eq!(record.issues.len(), 2);
        assert!(matches!(record.issues[0], ProbeIssue::IdentityDump(_)));
        assert!(matches!(record.issues[1], ProbeIssue::LinkSettings(_)));
        assert_eq!(record.topology.bus_address, "pci0000:00/0000:00:03.0");
    }

    #[test]
    fn assemble_into_fills_reverse_maps() {
        let fx = Fixture::new();
        let mut owners = ReverseMaps::default();

        fx.assembler().assemble_into(&base("eth0"), &mut owners);

        assert_eq!(owners.hardware.get("52:54:00:12:34:56").map(String::as_str), Some("eth0"));
        assert_eq!(owners.addresses.len(), 2);
        assert!(owners.addresses.values().all(|name| name == "eth0"));
    }
}
