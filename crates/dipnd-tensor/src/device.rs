/// Memory space a buffer lives in.
///
/// `Host` memory belongs to the caller (image loading and saving happen there).
/// `Compute` memory belongs to the kernel executor and is only reached through
/// explicit transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Device {
    /// Caller-owned host memory
    #[default]
    Host,
    /// Memory owned by the kernel executor
    Compute,
}

impl Device {
    /// Returns the device type as a string.
    pub fn device_type(&self) -> &str {
        match self {
            Device::Host => "host",
            Device::Compute => "compute",
        }
    }

    /// Returns true if the device is the host.
    pub fn is_host(&self) -> bool {
        matches!(self, Device::Host)
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.device_type())
    }
}
