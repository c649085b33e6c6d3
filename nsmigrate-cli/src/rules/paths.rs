//! Hand-maintained catalog of deprecated NativeScript module paths and how
//! each one maps onto the `@nativescript/core` package. The tables are the
//! source of truth for the whole migration: a path missing here is simply
//! not rewritten.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const DEPRECATED_PREFIX: &str = "tns-core-modules";
pub const NEW_MODULE_PATH: &str = "@nativescript/core";

pub const DEPRECATED_ANGULAR_PREFIX: &str = "nativescript-angular";
pub const NEW_ANGULAR_MODULE_PATH: &str = "@nativescript/angular";

/// How a deprecated module resolves against the new package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathReplacement {
    /// The module's loose exports became members of a single named export on
    /// the package root, e.g. `write` from `tns-core-modules/trace` is now
    /// `Trace.write`.
    Export(&'static str),
    /// Symbols keep their names and are re-exported from the package root.
    ReExported,
    /// The module moved under the new package unchanged; only the path
    /// prefix is substituted.
    NestedModuleExport,
}

pub static DEPRECATED_PATH_MAP: Lazy<HashMap<&'static str, PathReplacement>> = Lazy::new(|| {
    use PathReplacement::*;
    HashMap::from([
        ("tns-core-modules/application", Export("Application")),
        ("tns-core-modules/application-settings", Export("ApplicationSettings")),
        ("tns-core-modules/connectivity", Export("Connectivity")),
        ("tns-core-modules/http", Export("Http")),
        ("tns-core-modules/profiling", Export("Profiling")),
        ("tns-core-modules/timer", Export("Timer")),
        ("tns-core-modules/trace", Export("Trace")),
        ("tns-core-modules/ui/dialogs", Export("Dialogs")),
        ("tns-core-modules/utils/utils", Export("Utils")),
        ("tns-core-modules/color", ReExported),
        ("tns-core-modules/data/observable", ReExported),
        ("tns-core-modules/data/observable-array", ReExported),
        ("tns-core-modules/data/virtual-array", ReExported),
        ("tns-core-modules/file-system", ReExported),
        ("tns-core-modules/image-asset", ReExported),
        ("tns-core-modules/image-source", ReExported),
        ("tns-core-modules/platform", ReExported),
        ("tns-core-modules/ui/animation", ReExported),
        ("tns-core-modules/ui/content-view", ReExported),
        ("tns-core-modules/ui/core/view", ReExported),
        ("tns-core-modules/ui/frame", ReExported),
        ("tns-core-modules/ui/gestures", ReExported),
        ("tns-core-modules/ui/page", ReExported),
        ("tns-core-modules/xml", ReExported),
        ("tns-core-modules/color/known-colors", NestedModuleExport),
        ("tns-core-modules/file-system/file-system-access", NestedModuleExport),
        ("tns-core-modules/utils/types", NestedModuleExport),
    ])
});

/// Symbols whose names survive the migration untouched; only the module they
/// are imported from changes. Checked against the local binding name, so an
/// aliased import falls through to the path-level resolution instead.
pub static RE_EXPORTED_SPECIFIERS: &[&str] = &[
    "AndroidApplication",
    "iOSApplication",
    "Color",
    "ChangedData",
    "EventData",
    "Observable",
    "ObservableArray",
    "PropertyChangeData",
    "VirtualArray",
    "File",
    "FileSystemEntity",
    "Folder",
    "knownFolders",
    "ImageAsset",
    "ImageSource",
    "TraceWriter",
    "TraceErrorHandler",
    "HttpResponse",
    "HttpRequestOptions",
    "ActionOptions",
    "AlertOptions",
    "ConfirmOptions",
    "DialogOptions",
    "LoginOptions",
    "LoginResult",
    "PromptOptions",
    "PromptResult",
    "inputType",
    "capitalizationType",
    "Frame",
    "Page",
    "View",
    "ContentView",
];

/// Specifiers that were renamed on migration.
pub static UPDATED_SPECIFIERS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| HashMap::from([("device", "Device"), ("screen", "Screen")]));

/// A path is deprecated when it is a prefix of any cataloged path, so a
/// shallow import like `tns-core-modules` is caught even though only its
/// submodules are cataloged. Intentionally a different predicate from the
/// Angular rule's plain prefix test; the two are not interchangeable.
pub fn is_deprecated_path(path: &str) -> bool {
    !path.is_empty() && DEPRECATED_PATH_MAP.keys().any(|known| known.starts_with(path))
}

/// Rewrite a nested module path onto the new package root.
pub fn fix_nested_module_path(path: &str) -> String {
    path.replacen(DEPRECATED_PREFIX, NEW_MODULE_PATH, 1)
}

pub fn renamed_specifier(name: &str) -> &str {
    UPDATED_SPECIFIERS.get(name).copied().unwrap_or(name)
}

pub fn is_re_exported_specifier(name: &str) -> bool {
    RE_EXPORTED_SPECIFIERS.contains(&name)
}
