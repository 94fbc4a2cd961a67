//! # Network Inventory Service
//!
//! Implements the single-snapshot "gather" use case: enumerate every OS
//! interface, assemble one record per interface, then sort and name the
//! result deterministically.

use hwprobe_common::config::Config;
use hwprobe_common::error::GatherError;
use hwprobe_common::network::hardware::ArpHardwareTable;
use hwprobe_common::network::interface::{BaseInterface, InterfaceRecord};
use hwprobe_common::network::inventory::{InventoryResult, ReverseMaps};
use hwprobe_common::system::InterfaceSource;
use rayon::prelude::*;
use tracing::{debug, info_span};

use crate::assembler::InterfaceAssembler;
use crate::ethtool::LinkSettingsDecoder;
use crate::ethtool::transport::IoctlTransport;
use crate::identity::{IdentityAttributeReader, Udevadm};
use crate::sysfs::SysfsTree;
use crate::system::DatalinkSource;
use crate::topology::TopologyAttributeReader;
use crate::vendors::MacOuiRepo;

type ProgressCallback = Box<dyn Fn(&str) + Send + Sync>;

pub struct InventoryAggregator {
    source: Box<dyn InterfaceSource>,
    assembler: InterfaceAssembler,
    parallel: bool,
    on_interface: Option<ProgressCallback>,
}

impl InventoryAggregator {
    pub fn new(source: Box<dyn InterfaceSource>, assembler: InterfaceAssembler) -> Self {
        Self {
            source,
            assembler,
            parallel: false,
            on_interface: None,
        }
    }

    /// Wires the real OS-backed data sources.
    pub fn from_config(cfg: &Config) -> Self {
        let sysfs = SysfsTree::new(&cfg.sysfs_root);
        let link = cfg
            .link_settings
            .then(|| LinkSettingsDecoder::new(Box::new(IoctlTransport)));

        let assembler = InterfaceAssembler::new(
            TopologyAttributeReader::new(sysfs.clone(), &cfg.vlan_config, Box::new(ArpHardwareTable)),
            IdentityAttributeReader::new(sysfs.clone(), Box::new(Udevadm::new(&cfg.udevadm))),
            link,
            Some(Box::new(MacOuiRepo)),
        );

        Self::new(Box::new(DatalinkSource::new(sysfs)), assembler).parallel(cfg.parallel)
    }

    /// Assemble interfaces on the rayon pool instead of one after another.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Called with each interface name just before it is assembled.
    pub fn on_interface(mut self, callback: ProgressCallback) -> Self {
        self.on_interface = Some(callback);
        self
    }

    /// Only a failing interface listing aborts the gather.
    pub fn gather(&self) -> Result<InventoryResult, GatherError> {
        let span = info_span!("gather", parallel = self.parallel);
        let _guard = span.enter();

        let bases = self.source.interfaces()?;
        debug!(count = bases.len(), "enumerated interfaces");

        let mut owners = ReverseMaps::default();
        let records: Vec<InterfaceRecord> = if self.parallel {
            // Collect keeps enumeration order; maps are filled afterwards in
            // that same order.
            let records: Vec<InterfaceRecord> = bases
                .par_iter()
                .map(|base| self.assemble_one(base))
                .collect();
            records.iter().for_each(|record| owners.record(record));
            records
        } else {
            bases
                .iter()
                .map(|base| {
                    self.notify(&base.name);
                    self.assembler.assemble_into(base, &mut owners)
                })
                .collect()
        };

        Ok(InventoryResult::finalize(records, owners))
    }

    fn assemble_one(&self, base: &BaseInterface) -> InterfaceRecord {
        self.notify(&base.name);
        self.assembler.assemble(base)
    }

    fn notify(&self, name: &str) {
        if let Some(callback) = &self.on_interface {
            callback(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use hwprobe_common::network::interface::{BoundAddress, InterfaceFlags};
    use pnet::util::MacAddr;

    use crate::testing::{Fixture, LegacyLink, StaticSource};

    fn base(name: &str, mac: u8, ip: &str) -> BaseInterface {
        BaseInterface {
            name: name.to_string(),
            hardware_address: Some(MacAddr::new(0x52, 0x54, 0, 0, 0, mac)),
            mtu: 1500,
            flags: InterfaceFlags(0x1043),
            addresses: vec![BoundAddress::Network(ip.parse().unwrap())],
        }
    }

    fn lab() -> (Fixture, Vec<BaseInterface>) {
        let fx = Fixture::new();
        fx.device("virtual", "lo");
        fx.physical("pci0000:00/0000:00:1f.6", "eno1", "pci-0000:00:1f.6", "pci");
        fx.physical("pci0000:00/0000:00:03.0", "enp0s3", "pci-0000:00:03.0", "pci");
        fx.physical("pci0000:00/0000:00:14.0/usb1/1-1", "enx0", "pci-0000:00:14.0-usb-0:1:1.0", "usb");
        let bases = vec![
            BaseInterface {
                name: "lo".into(),
                mtu: 65536,
                addresses: vec![BoundAddress::Network("127.0.0.1/8".parse().unwrap())],
                ..Default::default()
            },
            base("eno1", 1, "192.168.1.10/24"),
            base("enx0", 2, "192.168.2.10/24"),
            base("enp0s3", 3, "10.0.2.15/24"),
        ];
        (fx, bases)
    }

    fn aggregator(fx: &Fixture, bases: Vec<BaseInterface>) -> InventoryAggregator {
        InventoryAggregator::new(Box::new(StaticSource(Ok(bases))), fx.assembler())
    }

    fn names(result: &InventoryResult) -> Vec<&str> {
        result.interfaces.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn gather_sorts_by_bus_path_and_numbers_ordinals() {
        let (fx, bases) = lab();
        let result = aggregator(&fx, bases).gather().unwrap();

        assert_eq!(names(&result), vec!["lo", "enp0s3", "enx0", "eno1"]);
        let ordinals: Vec<Option<&str>> = result
            .interfaces
            .iter()
            .map(|r| r.identity.ordinal_name.as_deref())
            .collect();
        assert_eq!(ordinals, vec![None, Some("pci:1"), Some("usb:1"), Some("pci:2")]);
    }

    #[test]
    fn gather_builds_reverse_maps() {
        let (fx, bases) = lab();
        let result = aggregator(&fx, bases).gather().unwrap();

        assert_eq!(result.owner_of_address(&"10.0.2.15".parse().unwrap()), Some("enp0s3"));
        assert_eq!(result.owner_of_address(&"127.0.0.1".parse().unwrap()), Some("lo"));
        assert_eq!(result.owner_of_hardware("52:54:00:00:00:02"), Some("enx0"));
        assert_eq!(result.owners.hardware.len(), 3);
    }

    #[test]
    fn parallel_gather_matches_sequential() {
        let (fx, bases) = lab();
        let sequential = aggregator(&fx, bases.clone()).gather().unwrap();
        let parallel = aggregator(&fx, bases).parallel(true).gather().unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn one_failing_interface_does_not_affect_siblings() {
        let (fx, bases) = lab();
        let link = LegacyLink { failing: vec!["eno1".into()] };
        let assembler = fx.assembler_with(Box::new(link), false);
        let result = InventoryAggregator::new(Box::new(StaticSource(Ok(bases))), assembler)
            .gather()
            .unwrap();

        assert_eq!(result.interfaces.len(), 4);
        let eno1 = result.get("eno1").unwrap();
        assert_eq!(eno1.link, Default::default());
        assert!(!eno1.is_complete());
        assert_eq!(result.get("enp0s3").unwrap().link.speed, 1000);
        assert_eq!(result.get("enx0").unwrap().link.speed, 1000);
    }

    #[test]
    fn enumeration_failure_is_fatal() {
        let fx = Fixture::new();
        let aggregator = InventoryAggregator::new(
            Box::new(StaticSource(Err("netlink dump failed".into()))),
            fx.assembler(),
        );
        assert!(matches!(aggregator.gather(), Err(GatherError::Enumeration(_))));
    }

    #[test]
    fn progress_callback_sees_every_interface() {
        let (fx, bases) = lab();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        aggregator(&fx, bases)
            .on_interface(Box::new(move |name| sink.lock().unwrap().push(name.to_string())))
            .gather()
            .unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["lo", "eno1", "enx0", "enp0s3"]);
    }
}
