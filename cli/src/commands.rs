pub mod net;
pub mod owner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hwprobe_common::config::{Config, DEFAULT_SYSFS_ROOT, DEFAULT_UDEVADM, DEFAULT_VLAN_CONFIG};

#[derive(Parser)]
#[command(name = "hwprobe")]
#[command(about = "Inventory of local network interfaces.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding one entry per network device
    #[arg(long, global = true, default_value = DEFAULT_SYSFS_ROOT)]
    pub sysfs_root: PathBuf,

    /// VLAN table to read 802.1Q membership from
    #[arg(long, global = true, default_value = DEFAULT_VLAN_CONFIG)]
    pub vlan_config: PathBuf,

    /// Program used to dump udev device attributes
    #[arg(long, global = true, default_value = DEFAULT_UDEVADM)]
    pub udevadm: PathBuf,

    /// Skip link-settings queries
    #[arg(long, global = true)]
    pub no_link: bool,

    /// Probe interfaces concurrently
    #[arg(short, long, global = true)]
    pub parallel: bool,

    /// Less output, repeat for even less
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// More log output, repeat for even more
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every network interface with its attributes
    #[command(alias = "n")]
    Net,
    /// Find the interface that owns an IP or MAC address
    #[command(alias = "o")]
    Owner { address: String },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            sysfs_root: self.sysfs_root.clone(),
            vlan_config: self.vlan_config.clone(),
            udevadm: self.udevadm.clone(),
            link_settings: !self.no_link,
            parallel: self.parallel,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_config() {
        let cli = CommandLine::parse_from(["hwprobe", "n", "--no-link", "-p", "-qq", "--sysfs-root", "/tmp/net"]);
        let cfg = cli.config();
        assert!(matches!(cli.command, Commands::Net));
        assert!(!cfg.link_settings);
        assert!(cfg.parallel);
        assert_eq!(cfg.quiet, 2);
        assert_eq!(cfg.sysfs_root, PathBuf::from("/tmp/net"));
        assert_eq!(cfg.udevadm, PathBuf::from(DEFAULT_UDEVADM));
    }

    #[test]
    fn owner_takes_an_address() {
        let cli = CommandLine::parse_from(["hwprobe", "owner", "10.0.0.1"]);
        match cli.command {
            Commands::Owner { address } => assert_eq!(address, "10.0.0.1"),
            Commands::Net => panic!("expected owner"),
        }
    }
}
