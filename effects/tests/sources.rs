//! Resolution through mounted sources: disk files plus the built-in library.

use std::path::PathBuf;

use shaderfx_effects::{
    BUILTIN_SOURCE, EffectLibrary, EffectPreprocessor, ErrorKind, LineDirectives,
    PreprocessorConfig,
};
use shaderfx_vfs::{FileSystemProvider, MemoryProvider, Vfs};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("shaderfx_effects_test_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn vfs_with_library(user: MemoryProvider) -> Vfs {
    let mut vfs = Vfs::new();
    vfs.mount("user", user);
    vfs.mount(BUILTIN_SOURCE, EffectLibrary::standard().into_provider());
    vfs.set_default("user");
    vfs
}

#[test]
fn test_user_effect_includes_builtin() {
    let user = MemoryProvider::new().with_file(
        "Sun.glsl",
        "--Fragment\n#include builtin/Lighting.Lambert\nvoid main(){}\n",
    );
    let vfs = vfs_with_library(user);

    let resolved = EffectPreprocessor::default()
        .resolve_detailed("Sun.Fragment", "", &vfs)
        .unwrap();

    assert!(resolved.source.contains("const float PI"));
    assert!(resolved.source.contains("float lambert"));
    assert!(resolved.source.ends_with("void main(){}\n"));
    assert_eq!(
        resolved.files,
        vec!["Sun.glsl", "builtin/Lighting.glsl", "builtin/Common.glsl"]
    );
}

#[test]
fn test_library_effects_resolve_on_their_own() {
    let vfs = vfs_with_library(MemoryProvider::new());
    let pre = EffectPreprocessor::default();

    for key in pre.list_effects("builtin/Common", "", &vfs).unwrap() {
        assert!(pre.resolve(&key, "", &vfs).is_ok(), "{key}");
    }
    for key in pre.list_effects("builtin/Lighting", "", &vfs).unwrap() {
        assert!(pre.resolve(&key, "", &vfs).is_ok(), "{key}");
    }
}

#[test]
fn test_library_effects_are_self_contained() {
    let vfs = vfs_with_library(MemoryProvider::new());
    let pre = EffectPreprocessor::default();

    let blinn_phong = pre.resolve("builtin/Lighting.BlinnPhong", "", &vfs).unwrap();
    assert!(blinn_phong.contains("float saturate(float x)"));
    assert!(blinn_phong.contains("float blinn_phong"));

    let lambert = pre.resolve("builtin/Lighting.Lambert", "", &vfs).unwrap();
    assert!(lambert.contains("float saturate(float x)"));
}

#[test]
fn test_builtin_includes_ignore_base_directory() {
    let user = MemoryProvider::new().with_file(
        "shaders/Sun.glsl",
        "--Fragment\n#include builtin/Lighting.Lambert\nvoid main(){}\n",
    );
    let vfs = vfs_with_library(user);

    let resolved = EffectPreprocessor::default()
        .resolve_detailed("Sun.Fragment", "shaders", &vfs)
        .unwrap();

    assert!(resolved.source.contains("float lambert"));
    assert_eq!(
        resolved.files,
        vec!["shaders/Sun.glsl", "builtin/Lighting.glsl", "builtin/Common.glsl"]
    );
}

#[test]
fn test_library_not_mounted() {
    let mut vfs = Vfs::new();
    vfs.mount(
        "user",
        MemoryProvider::new().with_file("Sun.glsl", "--Fragment\n#include builtin/Common.Math\n"),
    );

    let err = EffectPreprocessor::default()
        .resolve("user/Sun.Fragment", "", &vfs)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileNotFound);
}

#[test]
fn test_filesystem_provider() {
    let dir = temp_dir("filesystem");
    std::fs::create_dir_all(dir.join("fx")).unwrap();
    std::fs::write(
        dir.join("fx/Gravity.glsl"),
        "--Vertex\nvoid main(){}\n--Fragment\n#include fx/Common.Utils\nvoid main(){}\n",
    )
    .unwrap();
    std::fs::write(dir.join("fx/Common.glsl"), "--Utils\nfloat util(){return 1.0;}\n").unwrap();

    let provider = FileSystemProvider::new(&dir);
    let pre = EffectPreprocessor::new(
        PreprocessorConfig::default().with_line_directives(LineDirectives::Restore),
    );

    assert_eq!(
        pre.resolve("fx/Gravity.Vertex", "", &provider).unwrap(),
        "void main(){}\n"
    );
    assert_eq!(
        pre.resolve("fx/Gravity.Fragment", "", &provider).unwrap(),
        "float util(){return 1.0;}\n#line 5 0\nvoid main(){}\n"
    );
    assert_eq!(
        pre.resolve("fx/Gravity.Missing", "", &provider)
            .unwrap_err()
            .kind(),
        ErrorKind::EffectKeyNotFound
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_custom_extension() {
    let files = MemoryProvider::new().with_file("Gravity.fx", "--Vertex\nv\n");
    let pre = EffectPreprocessor::new(PreprocessorConfig::default().with_extension("fx"));
    assert_eq!(pre.resolve("Gravity.Vertex", "", &files).unwrap(), "v\n");
}

#[test]
fn test_free_function_uses_defaults() {
    let files = MemoryProvider::new().with_file("Gravity.glsl", "--Vertex\nv\n");
    assert_eq!(
        shaderfx_effects::resolve("Gravity.Vertex", "", &files).unwrap(),
        "v\n"
    );
}
