use crate::{Error, ThermalLoad};

/// Something that can be asked for the current thermal load.
pub trait ThermalSource: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Take one synchronous reading.
    fn sample(&self) -> Result<ThermalLoad, Error>;
}
