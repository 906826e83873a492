//! Session and transmission core for single-channel LoRaWAN sensor nodes
//!
//! This crate drives a LoRaWAN end device through radio configuration,
//! network join, confirmed/unconfirmed uplink transmission,
//! failure-triggered rejoin, and low-power sleep with session persistence.
//! The radio transceiver, the non-volatile store, the sleep primitive and
//! the status LED are injected capabilities, so the whole state machine runs
//! unmodified against the fakes in `tests/`.
//!
//! # Features
//! - OTAA and ABP activation with a bounded, blocking join
//! - Three-channel plan pinned to a single-channel gateway frequency,
//!   with optional frequency hopping over a candidate set
//! - Confirmed-delivery bookkeeping with a configurable rejoin threshold
//! - Persist-then-sleep ordering with session restore on wake
//! - No unsafe code
//!
//! # Example
//! ```ignore
//! use noisenode::{
//!     channel::ChannelPlan,
//!     config::device::DeviceConfig,
//!     device::NoiseDevice,
//!     status::NoStatus,
//! };
//!
//! let mut config = DeviceConfig::new_otaa(APP_EUI, APP_KEY);
//! config.deepsleep_ms = 300_000;
//!
//! let plan = ChannelPlan::single(868_100_000);
//!
//! // radio, store and sleeper are hardware implementations of the
//! // capability traits
//! let mut device = NoiseDevice::new(radio, config, plan, store, sleeper, NoStatus);
//!
//! device.start()?;
//! device.send_uplink(&sample)?;
//! loop {
//!     device.process_events()?;
//! }
//! ```

#![warn(missing_docs)]
#![no_std]

/// Radio channel plan for single-channel gateways
pub mod channel;

/// Device and deployment configuration
pub mod config;

/// High-level device interface and state machine
pub mod device;

/// Radio hardware abstraction layer
pub mod radio;

/// Session state and non-volatile persistence
pub mod session;

/// Operator status feedback
pub mod status;
