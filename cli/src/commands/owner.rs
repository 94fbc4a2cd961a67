use std::net::IpAddr;

use anyhow::bail;
use hwprobe_common::config::Config;
use hwprobe_common::network::inventory::InventoryResult;
use hwprobe_common::network::mac;

use crate::commands::net;
use crate::terminal::{network_fmt, print};

#[derive(Debug, PartialEq, Eq)]
enum Address {
    Ip(IpAddr),
    Hardware(String),
}

fn parse_address(input: &str) -> anyhow::Result<Address> {
    if let Ok(ip) = input.parse::<IpAddr>() {
        return Ok(Address::Ip(ip));
    }
    match mac::parse_normalized(input) {
        Some(hardware) => Ok(Address::Hardware(hardware)),
        None => bail!("'{input}' is neither an IP address nor a MAC address"),
    }
}

fn lookup<'a>(inventory: &'a InventoryResult, address: &Address) -> Option<&'a str> {
    match address {
        Address::Ip(ip) => inventory.owner_of_address(ip),
        Address::Hardware(hardware) => inventory.owner_of_hardware(hardware),
    }
}

pub fn owner(input: &str, cfg: &Config) -> anyhow::Result<()> {
    let address = parse_address(input)?;
    let inventory = net::gather(cfg)?;

    print::header("address owner", cfg.quiet);
    let Some(name) = lookup(&inventory, &address) else {
        print::aligned_line("Address", input);
        print::aligned_line("Owner", "none");
        return Ok(());
    };

    print::aligned_line("Address", input);
    print::aligned_line("Owner", name);
    if cfg.quiet > 0 {
        return Ok(());
    }
    if let Some(record) = inventory.get(name) {
        print::fat_separator();
        network_fmt::print_interface(record, 0);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwprobe_common::network::interface::InterfaceRecord;
    use hwprobe_common::network::inventory::ReverseMaps;

    #[test]
    fn addresses_are_classified() {
        assert_eq!(parse_address("10.0.0.1").unwrap(), Address::Ip("10.0.0.1".parse().unwrap()));
        assert_eq!(
            parse_address("52:54:00:AB:CD:EF").unwrap(),
            Address::Hardware("52:54:00:ab:cd:ef".into())
        );
        assert!(parse_address("eth0").is_err());
    }

    #[test]
    fn lookup_uses_reverse_maps() {
        let record = InterfaceRecord {
            name: "eth0".into(),
            hardware_address: "52:54:00:ab:cd:ef".parse().ok(),
            addresses: vec!["10.0.0.1/24".parse().unwrap()],
            ..Default::default()
        };
        let mut owners = ReverseMaps::default();
        owners.record(&record);
        let inventory = InventoryResult::finalize(vec![record], owners);

        assert_eq!(lookup(&inventory, &parse_address("10.0.0.1").unwrap()), Some("eth0"));
        assert_eq!(lookup(&inventory, &parse_address("52:54:00:AB:CD:EF").unwrap()), Some("eth0"));
        assert_eq!(lookup(&inventory, &parse_address("10.0.0.2").unwrap()), None);
    }
}
