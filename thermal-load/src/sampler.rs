use std::{fmt, path::PathBuf, str::FromStr};

use crate::{
    ComponentSource, CoolingDeviceSource, Error, SENTINEL, ThermalLoad, ThermalSource,
    components::DEFAULT_ONSET_MARGIN, cooling::DEFAULT_SYSFS_ROOT,
};

/// Which OS facility the sampler reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    /// Cooling devices first, temperature sensors if those are unavailable.
    #[default]
    Auto,
    /// Linux sysfs cooling devices only.
    CoolingDevices,
    /// `sysinfo` temperature components only.
    Components,
}

impl FromStr for SourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(SourceKind::Auto),
            "cooling" | "cooling-devices" => Ok(SourceKind::CoolingDevices),
            "components" => Ok(SourceKind::Components),
            other => Err(Error::InvalidConfig(format!(
                "unknown thermal source {other:?} (expected auto, cooling or components)"
            ))),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceKind::Auto => "auto",
            SourceKind::CoolingDevices => "cooling",
            SourceKind::Components => "components",
        })
    }
}

#[derive(Debug, Clone)]
/// Builder for a [`Sampler`].
pub struct SamplerBuilder {
    pub(crate) source: SourceKind,
    pub(crate) sysfs_root: PathBuf,
    pub(crate) onset_margin: f32,
}

impl Default for SamplerBuilder {
    fn default() -> Self {
        Self {
            source: SourceKind::Auto,
            sysfs_root: PathBuf::from(DEFAULT_SYSFS_ROOT),
            onset_margin: DEFAULT_ONSET_MARGIN,
        }
    }
}

impl SamplerBuilder {
    /// Select the source to read.
    pub fn with_source(mut self, source: SourceKind) -> Self {
        self.source = source;
        self
    }

    /// Set the directory scanned for cooling devices.
    pub fn with_sysfs_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.sysfs_root = root.into();
        self
    }

    /// Set how many °C below critical a component starts reporting load.
    pub fn with_onset_margin(mut self, margin: f32) -> Self {
        self.onset_margin = margin;
        self
    }

    /// Build the sampler with the specified configuration.
    pub fn build(self) -> Result<Sampler, Error> {
        let cooling =
            || -> Box<dyn ThermalSource> { Box::new(CoolingDeviceSource::new(&self.sysfs_root)) };
        // The margin only matters (and is only validated) when components are read.
        let components = || -> Result<Box<dyn ThermalSource>, Error> {
            Ok(Box::new(ComponentSource::new(self.onset_margin)?))
        };
        let sources = match self.source {
            SourceKind::Auto => vec![cooling(), components()?],
            SourceKind::CoolingDevices => vec![cooling()],
            SourceKind::Components => vec![components()?],
        };
        Ok(Sampler {
            kind: self.source,
            sources,
        })
    }
}

/// Samples thermal load from an ordered list of sources.
pub struct Sampler {
    kind: SourceKind,
    sources: Vec<Box<dyn ThermalSource>>,
}

impl Sampler {
    /// Start configuring a sampler.
    pub fn builder() -> SamplerBuilder {
        SamplerBuilder::default()
    }

    /// A sampler over arbitrary sources, tried in order.
    pub fn with_sources(sources: Vec<Box<dyn ThermalSource>>) -> Self {
        Self {
            kind: SourceKind::Auto,
            sources,
        }
    }

    /// A sampler with no sources, reporting `kind` but never producing a reading.
    pub fn unavailable(kind: SourceKind) -> Self {
        Self {
            kind,
            sources: Vec::new(),
        }
    }

    /// Names of the sources, in the order they are tried.
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// The configured source selection.
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Take a reading from the first source that yields one.
    /// When all fail, the last error is returned.
    pub fn sample(&self) -> Result<ThermalLoad, Error> {
        let mut last = Error::NoSensors("sampler");
        for source in &self.sources {
            match source.sample() {
                Ok(load) => {
                    log::trace!("[THM] {}> {load}", source.name());
                    return Ok(load);
                }
                Err(e) => {
                    log::debug!("[THM] {}> {e}", source.name());
                    last = e;
                }
            }
        }
        Err(last)
    }

    /// Take a reading, reporting failures as [`SENTINEL`].
    pub fn sample_or_sentinel(&self) -> ThermalLoad {
        self.sample().unwrap_or_else(|e| {
            log::warn!("[THM] No thermal reading available: {e}");
            SENTINEL
        })
    }
}

impl fmt::Debug for Sampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sampler")
            .field("kind", &self.kind)
            .field("sources", &self.source_names())
            .finish()
    }
}
