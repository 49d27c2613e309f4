use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{Error, ThermalLoad, ThermalSource};

/// Default location of the kernel thermal class.
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/thermal";

/// Reads throttling state from Linux cooling devices (`cooling_deviceN/{cur_state,max_state}`).
///
/// The load is the highest `cur_state / max_state` among the devices, i.e. how far the
/// kernel has already stepped down the most engaged fan, CPU frequency cap or similar.
#[derive(Debug, Clone)]
pub struct CoolingDeviceSource {
    root: PathBuf,
}

impl CoolingDeviceSource {
    /// Create a source reading from `root` (normally [`DEFAULT_SYSFS_ROOT`]).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory being scanned.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn devices(&self) -> Vec<PathBuf> {
        let pattern = format!(
            "{}/cooling_device*",
            glob::Pattern::escape(&self.root.to_string_lossy())
        );
        let pattern = match glob::glob(&pattern) {
            Ok(paths) => paths,
            Err(e) => {
                log::warn!("[THM] {}> Bad cooling device pattern: {e}", self.root.display());
                return Vec::new();
            }
        };
        pattern
            .filter_map(|entry| match entry {
                Ok(path) if path.is_dir() => Some(path),
                Ok(_) => None,
                Err(e) => {
                    log::debug!("[THM] Skipping unreadable entry: {e}");
                    None
                }
            })
            .collect()
    }

    fn device_load(device: &Path) -> Result<Option<ThermalLoad>, Error> {
        let cur = read_u64(&device.join("cur_state"))?;
        let max = read_u64(&device.join("max_state"))?;
        Ok(ThermalLoad::from_ratio(cur, max))
    }
}

impl Default for CoolingDeviceSource {
    fn default() -> Self {
        Self::new(DEFAULT_SYSFS_ROOT)
    }
}

impl ThermalSource for CoolingDeviceSource {
    fn name(&self) -> &'static str {
        "cooling devices"
    }

    fn sample(&self) -> Result<ThermalLoad, Error> {
        self.devices()
            .iter()
            .filter_map(|device| match Self::device_load(device) {
                Ok(load) => load,
                Err(e) => {
                    log::debug!("[THM] {}> {e}", device.display());
                    None
                }
            })
            .max()
            .ok_or(Error::NoSensors(self.name()))
    }
}

pub(crate) fn read_u64(path: &Path) -> Result<u64, Error> {
    let raw = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value = raw.trim();
    value.parse().map_err(|_| Error::Parse {
        path: path.to_path_buf(),
        value: value.to_owned(),
    })
}
