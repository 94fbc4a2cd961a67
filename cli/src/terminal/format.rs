use crate::terminal::colors;
use colored::*;
use hwprobe_common::network::interface::{LinkSettings, ProbeIssue};
use hwprobe_common::network::mode::ModeDescriptor;
use std::net::{IpAddr, Ipv6Addr};

pub type Detail = (String, ColoredString);

pub fn ipv6_to_type_str(ipv6_addr: &Ipv6Addr) -> &'static str {
    if is_global_unicast(&IpAddr::V6(*ipv6_addr)) {
        return "GUA";
    }
    if ipv6_addr.is_unique_local() {
        return "ULA";
    }
    if ipv6_addr.is_unicast_link_local() {
        return "LLA";
    }
    "IPv6"
}

// 2000::/3
fn is_global_unicast(ip_addr: &IpAddr) -> bool {
    match ip_addr {
        IpAddr::V6(ipv6_addr) => {
            let first_byte = ipv6_addr.octets()[0];
            0x3F >= first_byte && first_byte >= 0x20
        }
        _ => false,
    }
}

fn detail(key: &str, value: ColoredString) -> Detail {
    (key.to_string(), value)
}

pub fn modes_to_string(modes: &[ModeDescriptor]) -> String {
    modes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join(", ")
}

/// Nothing when the link was never queried successfully.
pub fn link_to_details(link: &LinkSettings) -> Vec<Detail> {
    let Some(command) = link.command else {
        return Vec::new();
    };
    let speed: String = match link.speed {
        0 | u32::MAX => "Unknown".to_string(),
        speed => format!("{speed} Mb/s"),
    };
    let duplex = if link.duplex { "Full" } else { "Half" };
    let autoneg = if link.autonegotiation { "on" } else { "off" };

    let mut details: Vec<Detail> = vec![
        detail("Speed", format!("{speed} ({duplex}, autoneg {autoneg})").normal()),
        detail("Via", command.to_string().dimmed()),
    ];
    for (key, modes) in [
        ("Supported", &link.supported),
        ("Advertised", &link.advertised),
        ("Peer", &link.peer_advertised),
    ] {
        if !modes.is_empty() {
            details.push(detail(key, modes_to_string(modes).normal()));
        }
    }
    details
}

pub fn optional_detail(key: &str, value: Option<&str>) -> Option<Detail> {
    value.map(|value| detail(key, value.normal()))
}

pub fn issue_to_detail(issue: &ProbeIssue) -> Detail {
    detail("Issue", issue.to_string().color(colors::WARNING))
}
