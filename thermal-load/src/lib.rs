#![deny(missing_docs)]
//!# thermal-load - Host thermal pressure as a single number
//! This crate samples the operating system's thermal facilities (Linux cooling devices,
//! or any platform's temperature sensors through `sysinfo`) and reduces them to a
//! [`ThermalLoad`] between 0 (no throttling) and 100 (fully throttled).
//! A process-wide [`registry`] backs the JNI entry points, and [`monitor`] polls for changes.
mod config;
mod cooling;
mod components;
mod error;
mod load;
pub mod monitor;
pub mod registry;
pub mod safe_mpsc;
mod sampler;
mod source;

pub use components::{ComponentSource, DEFAULT_ONSET_MARGIN};
pub use config::{ENV_ONSET_MARGIN, ENV_SOURCE, ENV_SYSFS_ROOT};
pub use cooling::{CoolingDeviceSource, DEFAULT_SYSFS_ROOT};
pub use error::Error;
pub use load::{SENTINEL, ThermalLoad};
pub use monitor::ThermalEvent;
pub use sampler::{Sampler, SamplerBuilder, SourceKind};
pub use source::ThermalSource;
