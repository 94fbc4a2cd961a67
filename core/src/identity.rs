//! Model, vendor, driver and persistent naming from the udev database.

use std::path::{Path, PathBuf};
use std::process::Command;

use hwprobe_common::error::DumpError;
use hwprobe_common::network::interface::IdentityAttributes;
use hwprobe_common::system::AttributeDump;
use tracing::trace;

use crate::sysfs::SysfsTree;

const ONBOARD: &str = "onboard";

/// Runs `udevadm info -q all -p <device>`.
pub struct Udevadm {
    program: PathBuf,
}

impl Udevadm {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }
}

impl AttributeDump for Udevadm {
    fn dump(&self, device_path: &Path) -> Result<String, DumpError> {
        let program = self.program.display().to_string();
        let output = Command::new(&self.program)
            .args(["info", "-q", "all", "-p"])
            .arg(device_path)
            .output()
            .map_err(|source| DumpError::Spawn { program: program.clone(), source })?;

        if !output.status.success() {
            return Err(DumpError::Status { program, status: output.status.to_string() });
        }
        String::from_utf8(output.stdout).map_err(|_| DumpError::Utf8 { program })
    }
}

pub struct IdentityAttributeReader {
    sysfs: SysfsTree,
    dump: Box<dyn AttributeDump>,
}

impl IdentityAttributeReader {
    pub fn new(sysfs: SysfsTree, dump: Box<dyn AttributeDump>) -> Self {
        Self { sysfs, dump }
    }

    pub fn read(&self, name: &str, is_physical: bool) -> Result<IdentityAttributes, DumpError> {
        let dump = self.dump.dump(&self.sysfs.path(name, ""))?;
        Ok(parse_dump(&dump, is_physical))
    }
}

#[derive(Default)]
struct StableCandidates {
    onboard: Option<String>,
    slot: Option<String>,
    path: Option<String>,
}

impl StableCandidates {
    fn pick(self) -> Option<String> {
        self.onboard.or(self.slot).or(self.path)
    }
}

/// Applies `KEY=value` records in the order they appear. Lines may carry the
/// `E: ` property prefix that `udevadm info` prints.
pub fn parse_dump(dump: &str, is_physical: bool) -> IdentityAttributes {
    let mut identity = IdentityAttributes::default();
    let mut stable = StableCandidates::default();

    for line in dump.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.strip_prefix("E: ").unwrap_or(key).trim();
        let value = value.to_string();
        trace!(key, value = %value, "device attribute");

        match key {
            "ID_BUS" => {
                if is_physical && identity.ordinal_name.as_deref().is_none_or(str::is_empty) {
                    identity.ordinal_name = Some(value);
                }
            }
            "DEVTYPE" => {
                if is_physical && identity.ordinal_name.as_deref() != Some(ONBOARD) {
                    identity.ordinal_name = Some(value);
                }
            }
            "ID_MODEL_FROM_DATABASE" => identity.model = Some(value),
            "ID_NET_DRIVER" => identity.driver = Some(value),
            "ID_VENDOR_FROM_DATABASE" => identity.vendor = Some(value),
            "ID_NET_NAME_ONBOARD" => {
                identity.ordinal_name = Some(ONBOARD.to_string());
                stable.onboard = Some(value);
            }
            "ID_NET_NAME_SLOT" => stable.slot = Some(value),
            "ID_NET_NAME_PATH" => stable.path = Some(value),
            "ID_PATH" => identity.bus_path = Some(value),
            _ => {}
        }
    }

    identity.stable_name = stable.pick();
    identity
}
