//! Process-wide sampler behind the JNI entry points.
//!
//! The host calls [`register`] once at module load and [`thermal_load`] whenever it wants a
//! reading. Neither can fail: configuration problems fall back to defaults and sampling problems
//! to [`SENTINEL`](crate::SENTINEL).
use std::sync::OnceLock;

use crate::{Sampler, SamplerBuilder, SourceKind};

static SAMPLER: OnceLock<Sampler> = OnceLock::new();

fn init() -> Sampler {
    build_or_unavailable(SamplerBuilder::default().with_env())
}

fn build_or_unavailable(builder: SamplerBuilder) -> Sampler {
    let kind = builder.source;
    match builder.build() {
        Ok(sampler) => sampler,
        Err(e) => {
            log::warn!("[THM] Sampler setup failed, readings will report the sentinel: {e}");
            Sampler::unavailable(kind)
        }
    }
}

fn sampler() -> &'static Sampler {
    SAMPLER.get_or_init(init)
}

/// Set up the process-wide sampler from the environment.
///
/// Returns `true` on the call that performed the setup and `false` on every later call.
pub fn register() -> bool {
    let mut first = false;
    let sampler = SAMPLER.get_or_init(|| {
        first = true;
        init()
    });
    if first {
        log::info!("[THM] Registered {sampler:?}");
    } else {
        log::debug!("[THM] Already registered");
    }
    first
}

/// Whether the sampler has been set up, by [`register`] or a prior [`thermal_load`].
pub fn is_registered() -> bool {
    SAMPLER.get().is_some()
}

/// The source selection of the process-wide sampler, if registered.
pub fn source_kind() -> Option<SourceKind> {
    SAMPLER.get().map(Sampler::kind)
}

/// Current thermal load as a non-negative JNI `int`.
///
/// Registers lazily if [`register`] has not been called yet.
pub fn thermal_load() -> i32 {
    sampler().sample_or_sentinel().as_jint()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SENTINEL;

    #[test]
    fn failed_build_keeps_requested_kind() {
        let sampler = build_or_unavailable(
            SamplerBuilder::default()
                .with_source(SourceKind::Components)
                .with_onset_margin(-1.0),
        );
        assert_eq!(sampler.kind(), SourceKind::Components);
        assert_eq!(sampler.sample_or_sentinel(), SENTINEL);
    }
}
