use std::collections::{BTreeMap, HashMap};
use std::net::IpAddr;

use crate::network::interface::InterfaceRecord;
use crate::network::mac;

/// Inventory-wide lookups from an address to the interface that owns it.
///
/// When several interfaces share an address the last one recorded wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseMaps {
    pub hardware: BTreeMap<String, String>,
    pub addresses: BTreeMap<IpAddr, String>,
}

impl ReverseMaps {
    pub fn record(&mut self, record: &InterfaceRecord) {
        for net in &record.addresses {
            self.addresses.insert(net.ip(), record.name.clone());
        }
        if let Some(hw) = record.hardware_address {
            self.hardware.insert(mac::normalize(hw), record.name.clone());
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryResult {
    /// Sorted by bus path; interfaces without one come first.
    pub interfaces: Vec<InterfaceRecord>,
    pub owners: ReverseMaps,
}

impl InventoryResult {
    /// Sorts the records and assigns the final ordinal names. Must be called
    /// exactly once, over the complete record set.
    pub fn finalize(mut interfaces: Vec<InterfaceRecord>, owners: ReverseMaps) -> Self {
        sort_by_bus_path(&mut interfaces);
        disambiguate_ordinals(&mut interfaces);
        Self { interfaces, owners }
    }

    pub fn owner_of_address(&self, ip: &IpAddr) -> Option<&str> {
        self.owners.addresses.get(ip).map(String::as_str)
    }

    /// `hardware` may be in any case; it is normalized before lookup.
    pub fn owner_of_hardware(&self, hardware: &str) -> Option<&str> {
        let key = mac::parse_normalized(hardware)?;
        self.owners.hardware.get(&key).map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&InterfaceRecord> {
        self.interfaces.iter().find(|record| record.name == name)
    }
}

/// Stable sort by bus path, absent paths first.
pub fn sort_by_bus_path(records: &mut [InterfaceRecord]) {
    records.sort_by(|a, b| a.identity.bus_path.cmp(&b.identity.bus_path));
}

/// Appends `:n` to every ordinal name, counting occurrences of each base name
/// in the current order. The first occurrence is always `:1`.
pub fn disambiguate_ordinals(records: &mut [InterfaceRecord]) {
    let mut next_suffix: HashMap<String, u32> = HashMap::new();

    for record in records.iter_mut() {
        let Some(base) = record.identity.ordinal_name.take() else {
            continue;
        };
        if base.is_empty() {
            continue;
        }
        let suffix = match next_suffix.get_mut(&base) {
            Some(counter) => {
                let current = *counter;
                *counter += 1;
                current
            }
            None => {
                next_suffix.insert(base.clone(), 2);
                1
            }
        };
        record.identity.ordinal_name = Some(format!("{base}:{suffix}"));
    }
}
