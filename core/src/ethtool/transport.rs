//! `SIOCETHTOOL` over an ephemeral datagram socket.

use hwprobe_common::error::TransportError;
use hwprobe_common::system::DeviceControl;

/// Size of the interface-name field of a device-control request.
pub const IFNAMSIZ: usize = 16;

/// Packs `name` into the fixed request field, truncating so the last byte is
/// always a terminator.
pub fn pack_name(name: &str) -> [u8; IFNAMSIZ] {
    let mut field = [0u8; IFNAMSIZ];
    let len = name.len().min(IFNAMSIZ - 1);
    field[..len].copy_from_slice(&name.as_bytes()[..len]);
    field
}

/// Writes the command code into the head of the request buffer.
pub fn stamp_command(command: u32, buffer: &mut [u8]) -> Result<(), TransportError> {
    let len = buffer.len();
    let head = buffer
        .get_mut(..4)
        .ok_or(TransportError::BufferTooSmall(len))?;
    head.copy_from_slice(&command.to_ne_bytes());
    Ok(())
}

/// Opens a fresh socket for every request; nothing is pooled.
pub struct IoctlTransport;

#[cfg(target_os = "linux")]
mod linux_impl {
    use std::io;
    use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

    use super::*;
    use crate::ethtool::SIOCETHTOOL;

    /// `struct ifreq` with the `ifr_data` arm of its union.
    #[repr(C)]
    struct IfReq {
        name: [u8; IFNAMSIZ],
        data: *mut libc::c_void,
        _pad: [u8; 16],
    }

    fn open_control_socket() -> Result<OwnedFd, TransportError> {
        let fd = unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM | libc::SOCK_CLOEXEC, libc::IPPROTO_IP) };
        if fd < 0 {
            return Err(TransportError::Socket(io::Error::last_os_error()));
        }
        // Closed on drop, on every return path.
        Ok(unsafe { OwnedFd::from_raw_fd(fd) })
    }

    impl DeviceControl for IoctlTransport {
        fn issue(&self, interface: &str, command: u32, buffer: &mut [u8]) -> Result<(), TransportError> {
            stamp_command(command, buffer)?;
            let socket = open_control_socket()?;

            let mut request = IfReq {
                name: pack_name(interface),
                data: buffer.as_mut_ptr().cast(),
                _pad: [0; 16],
            };
            let rc = unsafe { libc::ioctl(socket.as_raw_fd(), SIOCETHTOOL as _, &mut request) };
            if rc < 0 {
                return Err(TransportError::Request {
                    interface: interface.to_string(),
                    command,
                    source: io::Error::last_os_error(),
                });
            }
            Ok(())
        }
    }
}

#[cfg(not(target_os = "linux"))]
impl DeviceControl for IoctlTransport {
    fn issue(&self, _interface: &str, command: u32, buffer: &mut [u8]) -> Result<(), TransportError> {
        stamp_command(command, buffer)?;
        Err(TransportError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_name_null_terminates_short_names() {
        let field = pack_name("eth0");
        assert_eq!(&field[..4], b"eth0");
        assert!(field[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn pack_name_truncates_long_names() {
        let field = pack_name("averyveryverylonginterface");
        assert_eq!(&field[..15], b"averyveryverylo");
        assert_eq!(field[15], 0);
    }

    #[test]
    fn stamp_command_uses_host_order() {
        let mut buf = [0xffu8; 8];
        stamp_command(0x4c, &mut buf).unwrap();
        assert_eq!(&buf[..4], &0x4cu32.to_ne_bytes());
        assert_eq!(&buf[4..], &[0xff; 4]);
    }

    #[test]
    fn stamp_command_rejects_tiny_buffer() {
        let mut buf = [0u8; 3];
        assert!(matches!(
            stamp_command(1, &mut buf),
            Err(TransportError::BufferTooSmall(3))
        ));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn unknown_interface_fails_without_panicking() {
        let mut buf = vec![0u8; crate::ethtool::layout::LEGACY_LEN];
        let result = IoctlTransport.issue("nosuchdev0", crate::ethtool::ETHTOOL_GSET, &mut buf);
        assert!(result.is_err());
    }
}
