//! Network-interface introspection: link settings over the device-control
//! protocol, topology from the device tree, identity from the udev database,
//! and the aggregation of all of it into one inventory snapshot.

pub mod assembler;
pub mod ethtool;
pub mod identity;
pub mod inventory;
pub mod sysfs;
pub mod system;
pub mod topology;
pub mod vendors;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use inventory::InventoryAggregator;
