use std::path::PathBuf;

pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/net";
pub const DEFAULT_VLAN_CONFIG: &str = "/proc/net/vlan/config";
pub const DEFAULT_UDEVADM: &str = "udevadm";

pub struct Config {
    /// Directory holding one entry per network device.
    pub sysfs_root: PathBuf,
    /// Pipe-delimited VLAN table.
    pub vlan_config: PathBuf,
    /// Program used to dump device attributes.
    pub udevadm: PathBuf,
    /// Query link settings through the device-control protocol.
    pub link_settings: bool,
    /// Assemble interfaces on the rayon pool.
    pub parallel: bool,
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sysfs_root: PathBuf::from(DEFAULT_SYSFS_ROOT),
            vlan_config: PathBuf::from(DEFAULT_VLAN_CONFIG),
            udevadm: PathBuf::from(DEFAULT_UDEVADM),
            link_settings: true,
            parallel: false,
            quiet: 0,
        }
    }
}
