//! Device and deployment configuration
//!
//! This module contains the operator-editable settings of a deployment:
//! - Radio parameters (mode, region, class, data rates, retries)
//! - Activation keys (OTAA or ABP)
//! - Power and delivery policy (sleep interval, rejoin threshold)

/// Device configuration and activation keys
pub mod device;

pub use device::DeviceConfig;
