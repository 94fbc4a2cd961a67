use pnet::util::MacAddr;

/// Returns the address unless it is the all-zero placeholder that loopback
/// and tunnel devices report.
pub fn hardware_address(mac: Option<MacAddr>) -> Option<MacAddr> {
    mac.filter(|mac| !mac.is_zero())
}

/// Canonical textual form used as the key of the hardware-address map.
pub fn normalize(mac: MacAddr) -> String {
    mac.to_string().to_ascii_lowercase()
}

/// Parses user input such as `AA:BB:CC:00:11:22` into the canonical form.
pub fn parse_normalized(input: &str) -> Option<String> {
    input.trim().parse::<MacAddr>().ok().map(normalize)
}
