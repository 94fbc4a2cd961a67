pub mod hardware;
pub mod interface;
pub mod inventory;
pub mod mac;
pub mod mode;
