//! JNI entry points for `com.google.devtools.build.lib.platform.SystemThermalModule`.
//!
//! The Java side declares:
//!
//! ```java
//! private native void registerJNI();
//! private native int thermalLoad();
//! ```
//!
//! Neither method has an error channel, so every failure (including a panic) is logged and
//! reported as the sentinel load.
use std::panic;

use jni::{JNIEnv, objects::JObject, sys::jint};
use thermal_load::{SENTINEL, registry};

/// Install the logger (if the host has none yet) and set up the process-wide sampler.
pub fn register_module() {
    let _ = env_logger::Builder::from_default_env().try_init();
    if panic::catch_unwind(registry::register).is_err() {
        log::error!("[JNI] Thermal sampler registration panicked");
    }
}

/// Current thermal load, never negative.
pub fn query_load() -> jint {
    panic::catch_unwind(registry::thermal_load).unwrap_or_else(|_| {
        log::error!("[JNI] Thermal sampling panicked");
        SENTINEL.as_jint()
    })
}

/*
 * Class:     com_google_devtools_build_lib_platform_SystemThermalModule
 * Method:    registerJNI
 * Signature: ()V
 */
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_google_devtools_build_lib_platform_SystemThermalModule_registerJNI<
    'local,
>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
) {
    register_module();
}

/*
 * Class:     com_google_devtools_build_lib_platform_SystemThermalModule
 * Method:    thermalLoad
 * Signature: ()I
 */
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_google_devtools_build_lib_platform_SystemThermalModule_thermalLoad<
    'local,
>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
) -> jint {
    query_load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_before_and_after_registration() {
        let before = query_load();
        assert!(before >= 0);
        register_module();
        register_module();
        let after = query_load();
        assert!((0..=100).contains(&after), "load out of range: {after}");
    }
}
