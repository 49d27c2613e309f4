use crate::{Error, SamplerBuilder, SourceKind};

/// Selects the source: `auto`, `cooling` or `components`.
pub const ENV_SOURCE: &str = "THERMAL_LOAD_SOURCE";
/// Overrides the directory scanned for cooling devices.
pub const ENV_SYSFS_ROOT: &str = "THERMAL_LOAD_SYSFS_ROOT";
/// Overrides the component onset margin, in °C.
pub const ENV_ONSET_MARGIN: &str = "THERMAL_LOAD_ONSET_MARGIN";

impl SamplerBuilder {
    /// Apply configuration from the process environment.
    ///
    /// Unset variables keep the current value. Invalid values are logged and ignored,
    /// since the callers of this path have nowhere to report an error.
    pub fn with_env(self) -> Self {
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// Apply configuration from an arbitrary variable lookup. See [`SamplerBuilder::with_env`].
    pub fn with_vars<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_SOURCE) {
            match value.parse::<SourceKind>() {
                Ok(source) => self.source = source,
                Err(e) => log::warn!("[THM] Ignoring {ENV_SOURCE}: {e}"),
            }
        }
        if let Some(value) = lookup(ENV_SYSFS_ROOT) {
            if value.trim().is_empty() {
                log::warn!("[THM] Ignoring empty {ENV_SYSFS_ROOT}");
            } else {
                self.sysfs_root = value.trim().into();
            }
        }
        if let Some(value) = lookup(ENV_ONSET_MARGIN) {
            match parse_margin(&value) {
                Ok(margin) => self.onset_margin = margin,
                Err(e) => log::warn!("[THM] Ignoring {ENV_ONSET_MARGIN}: {e}"),
            }
        }
        self
    }
}

/// Parse a positive, finite onset margin in °C.
pub(crate) fn parse_margin(value: &str) -> Result<f32, Error> {
    match value.trim().parse::<f32>() {
        Ok(margin) if margin.is_finite() && margin > 0.0 => Ok(margin),
        _ => Err(Error::InvalidConfig(format!(
            "onset margin must be a positive number of degrees, got {value:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, path::Path};

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn valid_values_are_applied() {
        let builder = SamplerBuilder::default().with_vars(lookup(&[
            (ENV_SOURCE, "Components"),
            (ENV_SYSFS_ROOT, "/tmp/fake-thermal"),
            (ENV_ONSET_MARGIN, " 12.5 "),
        ]));
        assert_eq!(builder.source, SourceKind::Components);
        assert_eq!(builder.sysfs_root, Path::new("/tmp/fake-thermal"));
        assert_eq!(builder.onset_margin, 12.5);
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let builder = SamplerBuilder::default().with_vars(lookup(&[
            (ENV_SOURCE, "gpu"),
            (ENV_SYSFS_ROOT, "  "),
            (ENV_ONSET_MARGIN, "-4"),
        ]));
        let default = SamplerBuilder::default();
        assert_eq!(builder.source, default.source);
        assert_eq!(builder.sysfs_root, default.sysfs_root);
        assert_eq!(builder.onset_margin, default.onset_margin);
        assert!(builder.build().is_ok());
    }

    #[test]
    fn margin_parsing() {
        assert_eq!(parse_margin("5").unwrap(), 5.0);
        assert!(matches!(parse_margin("0"), Err(Error::InvalidConfig(_))));
        assert!(matches!(parse_margin("NaN"), Err(Error::InvalidConfig(_))));
        assert!(matches!(parse_margin("warm"), Err(Error::InvalidConfig(_))));
    }
}
