use crate::{Error, ThermalLoad, ThermalSource};

/// Degrees below the critical threshold at which a component starts contributing load.
pub const DEFAULT_ONSET_MARGIN: f32 = 20.0;

/// Reads temperature sensors through `sysinfo` and maps each one onto its critical threshold.
///
/// A component contributes `0` until it is within `onset_margin` degrees of its critical
/// temperature, then rises linearly to `100` at the threshold. Components that do not report
/// both a temperature and a critical value are ignored.
#[derive(Debug, Clone)]
pub struct ComponentSource {
    onset_margin: f32,
}

impl ComponentSource {
    /// Create a source with the given onset margin in °C. Must be positive and finite.
    pub fn new(onset_margin: f32) -> Result<Self, Error> {
        if !onset_margin.is_finite() || onset_margin <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "onset margin must be a positive number of degrees, got {onset_margin}"
            )));
        }
        Ok(Self { onset_margin })
    }

    /// The configured onset margin in °C.
    pub fn onset_margin(&self) -> f32 {
        self.onset_margin
    }

    /// Load contributed by one component at `temperature` with threshold `critical`.
    pub fn component_load(&self, temperature: f32, critical: f32) -> Option<ThermalLoad> {
        if !temperature.is_finite() || !critical.is_finite() || critical <= 0.0 {
            return None;
        }
        let onset = critical - self.onset_margin;
        Some(ThermalLoad::from_percent(
            (temperature - onset) / self.onset_margin * 100.0,
        ))
    }

    /// Highest load across `(temperature, critical)` readings.
    pub fn load_from_readings<I>(&self, readings: I) -> Option<ThermalLoad>
    where
        I: IntoIterator<Item = (Option<f32>, Option<f32>)>,
    {
        readings
            .into_iter()
            .filter_map(|(temp, crit)| self.component_load(temp?, crit?))
            .max()
    }
}

impl Default for ComponentSource {
    fn default() -> Self {
        Self {
            onset_margin: DEFAULT_ONSET_MARGIN,
        }
    }
}

impl ThermalSource for ComponentSource {
    fn name(&self) -> &'static str {
        "components"
    }

    fn sample(&self) -> Result<ThermalLoad, Error> {
        let components = sysinfo::Components::new_with_refreshed_list();
        for component in components.iter() {
            log::trace!(
                "[THM] Component: {}, temperature: {:?}, critical: {:?}",
                component.label(),
                component.temperature(),
                component.critical()
            );
        }
        self.load_from_readings(
            components
                .iter()
                .map(|component| (component.temperature(), component.critical())),
        )
        .ok_or(Error::NoSensors(self.name()))
    }
}
