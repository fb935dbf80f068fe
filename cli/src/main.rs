//! `shaderfx` - resolve effects from multi-effect shader files.

mod args;

use std::process::ExitCode;

use clap::Parser;
use shaderfx_effects::{BUILTIN_SOURCE, EffectLibrary, EffectPreprocessor, PreprocessError};
use shaderfx_vfs::{FileSystemProvider, Vfs};

use crate::args::Args;

/// Mount name of the `--root` directory.
const LOCAL_SOURCE: &str = "local";

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();
    log::debug!("shaderfx v{}", shaderfx_effects::VERSION);

    match run(&args) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

/// Print `err` and its causes through the logger, or straight to stderr
/// when error logging is filtered out.
fn report(err: &PreprocessError) {
    let lines = error_lines(err);
    if log::log_enabled!(log::Level::Error) {
        for line in &lines {
            log::error!("{line}");
        }
    } else {
        for line in &lines {
            eprintln!("error: {line}");
        }
    }
}

fn error_lines(err: &PreprocessError) -> Vec<String> {
    let mut lines = vec![err.to_string()];
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        lines.push(format!("  caused by: {cause}"));
        source = cause.source();
    }
    lines
}

fn mount_sources(args: &Args) -> Vfs {
    let mut vfs = Vfs::new();
    vfs.mount(LOCAL_SOURCE, FileSystemProvider::new(&args.root));
    if !args.no_builtin {
        vfs.mount(BUILTIN_SOURCE, EffectLibrary::standard().into_provider());
    }
    vfs.set_default(LOCAL_SOURCE);
    vfs
}

fn run(args: &Args) -> Result<String, PreprocessError> {
    let preprocessor = EffectPreprocessor::new(args.config());
    let sources = mount_sources(args);

    if args.list {
        let keys = preprocessor.list_effects(&args.key, &args.base, &sources)?;
        return Ok(keys.iter().map(|key| format!("{key}\n")).collect());
    }

    if args.program {
        let program = preprocessor.resolve_program(&args.key, &args.base, &sources)?;
        let mut output = String::new();
        for (stage, source) in program.stages() {
            output.push_str(&format!("// ---- {}.{} ----\n", args.key, stage.effect_name()));
            output.push_str(source);
        }
        return Ok(output);
    }

    let resolved = preprocessor.resolve_detailed(&args.key, &args.base, &sources)?;
    for (index, path) in resolved.files.iter().enumerate() {
        log::debug!("file {index}: {path}");
    }
    Ok(resolved.source)
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use shaderfx_effects::ErrorKind;

    use super::*;

    const GRAVITY: &str = "\
--Vertex
void main(){}
--Geometry
#include Common.Utils
void geo(){}
--Fragment
#include builtin/Lighting.Lambert
void main(){}
";

    const COMMON: &str = "--Utils\nfloat util(){return 1.0;}\n";

    fn temp_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("shaderfx_cli_test_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("shaders")).unwrap();
        std::fs::write(dir.join("shaders/Gravity.glsl"), GRAVITY).unwrap();
        std::fs::write(dir.join("shaders/Common.glsl"), COMMON).unwrap();
        dir
    }

    fn args(root: &Path, extra: &[&str]) -> Args {
        let mut argv = vec!["shaderfx", "--root", root.to_str().unwrap()];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn resolves_effect_under_base() {
        let root = temp_root("resolve");
        let output = run(&args(&root, &["--base", "shaders", "Gravity.Geometry"])).unwrap();
        assert_eq!(output, "float util(){return 1.0;}\n#line 5 0\nvoid geo(){}\n");

        // without the base, `Common.Utils` is looked up next to the root
        let err = run(&args(&root, &["shaders/Gravity.Vertex"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn builtin_library_is_mounted() {
        let root = temp_root("builtin");
        let output = run(&args(&root, &["--base", "shaders", "Gravity.Fragment"])).unwrap();
        assert!(output.contains("float saturate(float x)"));
        assert!(output.contains("float lambert"));
        assert!(output.ends_with("void main(){}\n"));

        let err = run(&args(&root, &["--base", "shaders", "--no-builtin", "Gravity.Fragment"]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn lists_effects() {
        let root = temp_root("list");
        let output = run(&args(&root, &["--base", "shaders", "--list", "Gravity"])).unwrap();
        assert_eq!(output, "Gravity.Vertex\nGravity.Geometry\nGravity.Fragment\n");
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn prints_program_stages() {
        let root = temp_root("program");
        let output = run(&args(
            &root,
            &["--base", "shaders", "--line-directives", "off", "--program", "Gravity"],
        ))
        .unwrap();

        let banners: Vec<&str> = output.lines().filter(|line| line.starts_with("// ----")).collect();
        assert_eq!(
            banners,
            vec![
                "// ---- Gravity.Vertex ----",
                "// ---- Gravity.Geometry ----",
                "// ---- Gravity.Fragment ----",
            ]
        );
        assert!(output.contains("float util(){return 1.0;}\nvoid geo(){}\n"));
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn error_report_includes_causes() {
        let root = temp_root("report");
        let err = run(&args(&root, &["Nothing.Vertex"])).unwrap_err();

        let lines = error_lines(&err);
        assert_eq!(lines.len(), 2, "{lines:?}");
        assert!(lines[0].contains("Nothing.glsl"));
        assert!(lines[1].starts_with("  caused by: "));
        report(&err);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn missing_effect_is_an_error() {
        let root = temp_root("missing");
        let err = run(&args(&root, &["--base", "shaders", "Gravity.Compute"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EffectKeyNotFound);
        let _ = std::fs::remove_dir_all(&root);
    }
}
