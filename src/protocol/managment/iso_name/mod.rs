//! SAE J1939-81 / ISO 11783-5 NAME field (64 bits). The NAME uniquely
//! identifies a controller application on the network. The module provides a
//! typed wrapper around the raw `u64` plus accessors and a builder.
//!
//! # Bit layout (Little Endian order)
//!
//! ```text
//! Bits  0-20  (21 bits) : Identity number
//! Bits 21-31  (11 bits) : Manufacturer code
//! Bits 32-34  ( 3 bits) : ECU instance
//! Bits 35-39  ( 5 bits) : Function instance
//! Bits 40-47  ( 8 bits) : Function
//! Bit  48     ( 1 bit ) : Reserved
//! Bits 49-55  ( 7 bits) : Vehicle system
//! Bits 56-59  ( 4 bits) : Vehicle system instance
//! Bits 60-62  ( 3 bits) : Industry group
//! Bit  63     ( 1 bit ) : Arbitrary Address Capable
//! ```
use core::fmt;

/// Industry group of on-highway equipment.
pub const INDUSTRY_GROUP_ON_HIGHWAY: u8 = 1;

/// Wrapper around the J1939 NAME field (64 bits).
///
/// # Example
///
/// ```
/// use korri_j1939::protocol::managment::iso_name::IsoName;
///
/// let name = IsoName::builder()
///     .identity_number(123456)
///     .manufacturer_code(275)
///     .function(130)
///     .industry_group(1)
///     .arbitrary_address_capable(true)
///     .build();
///
/// assert_eq!(name.identity_number(), 123456);
/// assert_eq!(name.manufacturer_code(), 275);
/// assert!(name.is_arbitrary_address_capable());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IsoName(u64);

impl IsoName {
    /// Build an `IsoName` from the raw value.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Return the underlying `u64`.
    #[inline]
    pub const fn raw(&self) -> u64 {
        self.0
    }

    /// Build from the 8-byte array sent in an address claim (byte 0 = bits 0-7).
    #[inline]
    pub const fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_le_bytes(bytes))
    }

    /// Byte array in transmission order.
    #[inline]
    pub const fn to_bytes(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// Create a builder to construct an `IsoName`.
    #[inline]
    pub const fn builder() -> IsoNameBuilder {
        IsoNameBuilder::new()
    }

    /// Identity number (bits 0-20, 21 bits), serial number of the ECU.
    #[inline]
    pub const fn identity_number(&self) -> u32 {
        (self.0 & 0x1F_FFFF) as u32
    }

    /// Manufacturer code (bits 21-31, 11 bits).
    #[inline]
    pub const fn manufacturer_code(&self) -> u16 {
        ((self.0 >> 21) & 0x7FF) as u16
    }

    /// ECU instance (bits 32-34, 3 bits).
    #[inline]
    pub const fn ecu_instance(&self) -> u8 {
        ((self.0 >> 32) & 0x07) as u8
    }

    /// Function instance (bits 35-39, 5 bits).
    #[inline]
    pub const fn function_instance(&self) -> u8 {
        ((self.0 >> 35) & 0x1F) as u8
    }

    /// Function (bits 40-47, 8 bits).
    #[inline]
    pub const fn function(&self) -> u8 {
        ((self.0 >> 40) & 0xFF) as u8
    }

    /// Vehicle system (bits 49-55, 7 bits).
    #[inline]
    pub const fn vehicle_system(&self) -> u8 {
        ((self.0 >> 49) & 0x7F) as u8
    }

    /// Vehicle system instance (bits 56-59, 4 bits).
    #[inline]
    pub const fn vehicle_system_instance(&self) -> u8 {
        ((self.0 >> 56) & 0x0F) as u8
    }

    /// Industry group (bits 60-62, 3 bits).
    #[inline]
    pub const fn industry_group(&self) -> u8 {
        ((self.0 >> 60) & 0x07) as u8
    }

    /// Arbitrary Address Capable bit (bit 63).
    #[inline]
    pub const fn is_arbitrary_address_capable(&self) -> bool {
        ((self.0 >> 63) & 0x01) != 0
    }
}

impl From<u64> for IsoName {
    #[inline]
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<IsoName> for u64 {
    #[inline]
    fn from(name: IsoName) -> Self {
        name.raw()
    }
}

impl fmt::Display for IsoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IsoName {{ id: {}, mfg: {}, func: {}, system: {}, ecu: {}, aac: {} }}",
            self.identity_number(),
            self.manufacturer_code(),
            self.function(),
            self.vehicle_system(),
            self.ecu_instance(),
            self.is_arbitrary_address_capable()
        )
    }
}

/// Fluent builder used to construct an `IsoName`. Values wider than their
/// field are masked.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoNameBuilder {
    raw: u64,
}

impl IsoNameBuilder {
    /// Initialize the builder with all fields cleared.
    #[inline]
    pub const fn new() -> Self {
        Self { raw: 0 }
    }

    #[inline]
    const fn set(mut self, shift: u32, mask: u64, value: u64) -> Self {
        self.raw = (self.raw & !(mask << shift)) | ((value & mask) << shift);
        self
    }

    /// Set the identity number (bits 0-20).
    #[inline]
    pub const fn identity_number(self, value: u32) -> Self {
        self.set(0, 0x1F_FFFF, value as u64)
    }

    /// Set the manufacturer code (bits 21-31).
    #[inline]
    pub const fn manufacturer_code(self, value: u16) -> Self {
        self.set(21, 0x7FF, value as u64)
    }

    /// Set the ECU instance (bits 32-34).
    #[inline]
    pub const fn ecu_instance(self, value: u8) -> Self {
        self.set(32, 0x07, value as u64)
    }

    /// Set the function instance (bits 35-39).
    #[inline]
    pub const fn function_instance(self, value: u8) -> Self {
        self.set(35, 0x1F, value as u64)
    }

    /// Set the function (bits 40-47).
    #[inline]
    pub const fn function(self, value: u8) -> Self {
        self.set(40, 0xFF, value as u64)
    }

    /// Set the vehicle system (bits 49-55).
    #[inline]
    pub const fn vehicle_system(self, value: u8) -> Self {
        self.set(49, 0x7F, value as u64)
    }

    /// Set the vehicle system instance (bits 56-59).
    #[inline]
    pub const fn vehicle_system_instance(self, value: u8) -> Self {
        self.set(56, 0x0F, value as u64)
    }

    /// Set the industry group (bits 60-62).
    #[inline]
    pub const fn industry_group(self, value: u8) -> Self {
        self.set(60, 0x07, value as u64)
    }

    /// Set the Arbitrary Address Capable bit (bit 63).
    #[inline]
    pub const fn arbitrary_address_capable(self, value: bool) -> Self {
        self.set(63, 0x01, value as u64)
    }

    /// Produce the final `IsoName`.
    #[inline]
    pub const fn build(self) -> IsoName {
        IsoName(self.raw)
    }
}
