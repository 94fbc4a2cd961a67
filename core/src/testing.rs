//! Fakes and a temporary device tree shared by the unit tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::os::unix::fs::symlink;
use std::io;

use hwprobe_common::error::{DumpError, GatherError, TransportError};
use hwprobe_common::network::hardware::ArpHardwareTable;
use hwprobe_common::network::interface::BaseInterface;
use hwprobe_common::system::{AttributeDump, DeviceControl, InterfaceSource};
use hwprobe_common::vendors::VendorRepository;
use pnet::util::MacAddr;
use tempfile::TempDir;

use crate::assembler::InterfaceAssembler;
use crate::ethtool::layout::{LEGACY_SPEED_LOW, LEGACY_DUPLEX};
use crate::ethtool::{ETHTOOL_GSET, LinkSettingsDecoder};
use crate::identity::IdentityAttributeReader;
use crate::sysfs::SysfsTree;
use crate::topology::TopologyAttributeReader;

const DUMP_FILE: &str = "udev.dump";

/// Reads the dump from a file inside the device directory.
pub struct FileDump;

impl AttributeDump for FileDump {
    fn dump(&self, device_path: &Path) -> Result<String, DumpError> {
        fs::read_to_string(device_path.join(DUMP_FILE)).map_err(|_| DumpError::Status {
            program: "udevadm".into(),
            status: "exit status: 4".into(),
        })
    }
}

pub struct BrokenDump;

impl AttributeDump for BrokenDump {
    fn dump(&self, _device_path: &Path) -> Result<String, DumpError> {
        Err(DumpError::Spawn {
            program: "udevadm".into(),
            source: io::Error::from(io::ErrorKind::NotFound),
        })
    }
}

fn unsupported(interface: &str, command: u32) -> TransportError {
    TransportError::Request {
        interface: interface.to_string(),
        command,
        source: io::Error::from_raw_os_error(libc::EOPNOTSUPP),
    }
}

/// Answers only the legacy command: 1000 Mbps full duplex, except for the
/// listed interfaces which reject everything.
#[derive(Default)]
pub struct LegacyLink {
    pub failing: Vec<String>,
}

impl DeviceControl for LegacyLink {
    fn issue(&self, interface: &str, command: u32, buffer: &mut [u8]) -> Result<(), TransportError> {
        if command != ETHTOOL_GSET || self.failing.iter().any(|f| f == interface) {
            return Err(unsupported(interface, command));
        }
        buffer[LEGACY_SPEED_LOW..LEGACY_SPEED_LOW + 2].copy_from_slice(&1000u16.to_ne_bytes());
        buffer[LEGACY_DUPLEX] = 1;
        Ok(())
    }
}

pub struct NoLink;

impl DeviceControl for NoLink {
    fn issue(&self, interface: &str, command: u32, _buffer: &mut [u8]) -> Result<(), TransportError> {
        Err(unsupported(interface, command))
    }
}

pub struct QemuVendors;

impl VendorRepository for QemuVendors {
    fn get_vendor(&self, mac: MacAddr) -> Option<String> {
        (mac.0 == 0x52 && mac.1 == 0x54 && mac.2 == 0x00).then(|| "QEMU".to_string())
    }
}

pub struct StaticSource(pub Result<Vec<BaseInterface>, String>);

impl InterfaceSource for StaticSource {
    fn interfaces(&self) -> Result<Vec<BaseInterface>, GatherError> {
        self.0
            .clone()
            .map_err(|msg| GatherError::Enumeration(io::Error::other(msg)))
    }
}

/// `<tmp>/class/net/<name>` symlinks into `<tmp>/devices/<bus>/net/<name>`.
pub struct Fixture {
    dir: TempDir,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("class/net")).unwrap();
        Self { dir }
    }

    pub fn sysfs(&self) -> SysfsTree {
        SysfsTree::new(self.dir.path().join("class/net"))
    }

    pub fn device(&self, bus: &str, name: &str) -> PathBuf {
        let device = self.dir.path().join("devices").join(bus).join("net").join(name);
        fs::create_dir_all(&device).unwrap();
        symlink(
            format!("../../devices/{bus}/net/{name}"),
            self.dir.path().join("class/net").join(name),
        )
        .unwrap();
        device
    }

    pub fn vlan_config(&self) -> PathBuf {
        self.dir.path().join("vlan")
    }

    pub fn write_dump(device: &Path, dump: &str) {
        fs::write(device.join(DUMP_FILE), dump).unwrap();
    }

    pub fn physical(&self, bus: &str, name: &str, id_path: &str, id_bus: &str) -> PathBuf {
        let device = self.device(bus, name);
        fs::write(device.join("operstate"), "up\n").unwrap();
        fs::write(device.join("type"), "1\n").unwrap();
        Self::write_dump(
            &device,
            &format!("E: ID_BUS={id_bus}\nE: ID_NET_NAME_PATH={name}\nE: ID_PATH={id_path}\n"),
        );
        device
    }

    pub fn assembler(&self) -> InterfaceAssembler {
        self.assembler_with(Box::new(LegacyLink::default()), false)
    }

    pub fn assembler_with(&self, link: Box<dyn DeviceControl>, broken_dump: bool) -> InterfaceAssembler {
        let dump: Box<dyn AttributeDump> = if broken_dump { Box::new(BrokenDump) } else { Box::new(FileDump) };
        InterfaceAssembler::new(
            TopologyAttributeReader::new(
                self.sysfs(),
                self.vlan_config(),
                Box::new(ArpHardwareTable),
            ),
            IdentityAttributeReader::new(self.sysfs(), dump),
            Some(LinkSettingsDecoder::new(link)),
            Some(Box::new(QemuVendors)),
        )
    }
}
