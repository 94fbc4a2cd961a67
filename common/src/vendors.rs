use pnet::util::MacAddr;

/// Resolves the organization that registered a hardware address prefix.
pub trait VendorRepository: Send + Sync {
    fn get_vendor(&self, mac: MacAddr) -> Option<String>;
}
