//! Compatibility libraries.
//!
//! Older platform releases exposed a handful of libraries on the boot
//! classpath. Apps targeting those releases may use them without declaring
//! `<uses-library>`, so the platform adds them to the class loader at runtime
//! and dexpreopt has to mirror that in conditional contexts.

pub const ORG_APACHE_HTTP_LEGACY: &str = "org.apache.http.legacy";
pub const ANDROID_HIDL_BASE: &str = "android.hidl.base-V1.0-java";
pub const ANDROID_HIDL_MANAGER: &str = "android.hidl.manager-V1.0-java";
pub const ANDROID_TEST_BASE: &str = "android.test.base";
pub const ANDROID_TEST_MOCK: &str = "android.test.mock";
pub const ANDROID_TEST_RUNNER: &str = "android.test.runner";

/// Compatibility libraries implicitly loaded for apps targeting SDK < 28.
pub const COMPAT_USES_LIBS_28: &[&str] = &[ORG_APACHE_HTTP_LEGACY];

/// Compatibility libraries implicitly loaded for apps targeting SDK < 29.
pub const COMPAT_USES_LIBS_29: &[&str] = &[ANDROID_HIDL_MANAGER, ANDROID_HIDL_BASE];

/// Compatibility libraries implicitly loaded for apps targeting SDK < 30.
pub const COMPAT_USES_LIBS_30: &[&str] = &[ANDROID_TEST_BASE, ANDROID_TEST_MOCK];

/// SDK tiers that carry compatibility libraries, in ascending order.
pub const COMPAT_TIERS: &[(u32, &[&str])] = &[
    (28, COMPAT_USES_LIBS_28),
    (29, COMPAT_USES_LIBS_29),
    (30, COMPAT_USES_LIBS_30),
];

/// Compatibility libraries that are only activated when a companion library
/// is part of the context: `(library, companion)`.
const COMPANIONS: &[(&str, &str)] = &[(ANDROID_TEST_MOCK, ANDROID_TEST_RUNNER)];

/// Directory compatibility libraries are installed to on the device.
const DEFAULT_INSTALL_DIR: &str = "/system/framework";

pub fn is_compat_library(name: &str) -> bool {
    COMPAT_TIERS
        .iter()
        .any(|(_, libraries)| libraries.contains(&name))
}

/// Device path assumed for a compatibility library whose install path was
/// not reported. Returns `None` for any other library.
pub fn default_install_path(name: &str) -> Option<String> {
    is_compat_library(name).then(|| format!("{DEFAULT_INSTALL_DIR}/{name}.jar"))
}

/// Companion library `name` depends on to be activated, if any.
pub fn required_companion(name: &str) -> Option<&'static str> {
    COMPANIONS
        .iter()
        .find(|(library, _)| *library == name)
        .map(|(_, companion)| *companion)
}
