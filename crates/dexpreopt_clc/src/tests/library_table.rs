use super::{add_library, build_path, install_path};
use crate::compat::{ANDROID_TEST_MOCK, ORG_APACHE_HTTP_LEGACY};
use crate::*;
use std::path::Path;

#[test]
fn strict_insert_without_build_path_fails() {
    let mut paths = LibraryPaths::new();
    let error = paths
        .insert("a", None, None, InsertMode::Strict)
        .expect_err("unknown build path");
    assert_eq!(error, ClcError::UnknownBuildPath("a".to_string()));
    assert!(error
        .to_string()
        .starts_with("unknown build path to <uses-library> 'a'"));
    assert!(paths.is_empty());
}

#[test]
fn strict_insert_without_install_path_fails() {
    let mut paths = LibraryPaths::new();
    let error = paths
        .add_library_path("a", build_path("a"), None)
        .expect_err("unknown install path");
    assert_eq!(error, ClcError::UnknownInstallPath("a".to_string()));
    assert!(error
        .to_string()
        .starts_with("unknown install path to <uses-library> 'a'"));
}

#[test]
fn strict_insert_checks_build_path_first() {
    let mut paths = LibraryPaths::new();
    let error = paths
        .add_library_path("a", None, None)
        .expect_err("both paths unknown");
    assert!(matches!(error, ClcError::UnknownBuildPath(_)));
}

#[test]
fn deferred_insert_records_missing_paths() {
    let mut paths = LibraryPaths::new();
    paths
        .insert("a", None, None, InsertMode::Deferred)
        .expect("deferred insert never fails");
    paths
        .insert("b", build_path("b"), None, InsertMode::Deferred)
        .expect("deferred insert never fails");

    let a = paths.get("a").expect("a is recorded");
    assert_eq!(a.build_path, None);
    assert_eq!(a.install_path, None);
    let b = paths.get("b").expect("b is recorded");
    assert_eq!(b.build_path.as_deref(), Some(Path::new("out/b.jar")));
    assert_eq!(b.install_path, None);
}

#[test]
fn compat_library_gets_default_install_path() {
    let mut paths = LibraryPaths::new();
    paths
        .add_library_path(ANDROID_TEST_MOCK, build_path(ANDROID_TEST_MOCK), None)
        .expect("compatibility library");
    paths
        .insert_if_named(Some(ORG_APACHE_HTTP_LEGACY), build_path("http"), None)
        .expect("compatibility library");

    assert_eq!(
        paths.get(ANDROID_TEST_MOCK).and_then(|e| e.install_path.as_deref()),
        Some("/system/framework/android.test.mock.jar")
    );
    assert_eq!(
        paths
            .get(ORG_APACHE_HTTP_LEGACY)
            .and_then(|e| e.install_path.as_deref()),
        Some("/system/framework/org.apache.http.legacy.jar")
    );
}

#[test]
fn compat_library_keeps_explicit_install_path() {
    let mut paths = LibraryPaths::new();
    paths
        .add_library_path(
            ANDROID_TEST_MOCK,
            build_path(ANDROID_TEST_MOCK),
            Some("/apex/mock.jar".to_string()),
        )
        .expect("compatibility library");
    assert_eq!(
        paths.get(ANDROID_TEST_MOCK).and_then(|e| e.install_path.as_deref()),
        Some("/apex/mock.jar")
    );
}

#[test]
fn unnamed_library_is_ignored() {
    let mut paths = LibraryPaths::new();
    paths
        .insert_if_named(None, build_path("x"), install_path("x"))
        .expect("no-op");
    assert!(paths.is_empty());
}

#[test]
fn first_insert_wins_for_duplicate_names() {
    let mut paths = LibraryPaths::new();
    add_library(&mut paths, "a");
    add_library(&mut paths, "b");
    paths
        .add_library_path("a", build_path("other"), install_path("other"))
        .expect("duplicate insert is accepted");

    assert_eq!(paths.names().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(paths.build_path("a"), Some(Path::new("out/a.jar")));
}

#[test]
fn merge_appends_in_order_without_dedup() {
    let mut inner = LibraryPaths::new();
    add_library(&mut inner, "x");
    add_library(&mut inner, "y");

    let mut middle = LibraryPaths::new();
    add_library(&mut middle, "m");
    middle.merge(&inner);

    let mut outer = LibraryPaths::new();
    add_library(&mut outer, "y");
    add_library(&mut outer, "o");
    outer.merge(&middle);

    assert_eq!(
        outer.names().collect::<Vec<_>>(),
        vec!["y", "o", "m", "x", "y"]
    );
    assert_eq!(outer.len(), 5);
    // Lookups see the first "y".
    assert_eq!(outer.get("y"), outer.iter().next());
}
