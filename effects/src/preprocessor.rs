//! Effect extraction and include resolution.

use std::collections::{HashMap, HashSet};

use shaderfx_vfs::{SourceProvider, path};

use crate::config::{LineDirectives, PreprocessorConfig};
use crate::error::PreprocessError;
use crate::key::EffectKey;
use crate::scanner::{self, Line};

/// Fully expanded source of one effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEffect {
    /// Canonical key of the effect.
    pub key: String,
    /// Include-free source text.
    pub source: String,
    /// Paths read during resolution. The index of a path is the file
    /// number used in `#line` directives; the requested file is 0.
    pub files: Vec<String>,
}

impl ResolvedEffect {
    /// Path of the file with the given `#line` file number.
    pub fn file(&self, index: usize) -> Option<&str> {
        self.files.get(index).map(String::as_str)
    }
}

/// Resolves effect keys from multi-effect source files.
///
/// A source file holds several effects, each opened by a marker line and
/// running until the next marker or the end of the file:
///
/// ```glsl
/// --Vertex
/// void main() { gl_Position = vec4(0.0); }
/// --Fragment
/// #include Common.Utils
/// void main() { }
/// ```
///
/// Requesting `Gravity.Fragment` reads `Gravity.glsl`, expands the include
/// by reading `Common.glsl`, and returns the text of the `Fragment` effect.
/// Each call owns its effect table; nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct EffectPreprocessor {
    config: PreprocessorConfig,
}

impl EffectPreprocessor {
    pub fn new(config: PreprocessorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    /// Resolve `effect_key` to its include-free source text.
    ///
    /// The file `base_directory/<prefix><extension>` is read through
    /// `provider`, along with every file reached through includes.
    pub fn resolve<P>(
        &self,
        effect_key: &str,
        base_directory: &str,
        provider: &P,
    ) -> Result<String, PreprocessError>
    where
        P: SourceProvider + ?Sized,
    {
        self.resolve_detailed(effect_key, base_directory, provider)
            .map(|resolved| resolved.source)
    }

    /// Like [`resolve`](Self::resolve), also returning the file table that
    /// maps `#line` file numbers back to paths.
    pub fn resolve_detailed<P>(
        &self,
        effect_key: &str,
        base_directory: &str,
        provider: &P,
    ) -> Result<ResolvedEffect, PreprocessError>
    where
        P: SourceProvider + ?Sized,
    {
        let key = EffectKey::parse(effect_key, self.config.separator())?;
        let path = file_path(&self.config, base_directory, key.prefix(), provider)?;

        let mut extraction = Extraction::new(&self.config, base_directory, provider);
        extraction.parse_file(key.prefix())?;

        let key_string = key.to_string();
        let Some(effect) = extraction.table.remove(&key_string) else {
            return Err(PreprocessError::EffectKeyNotFound {
                key: key_string,
                path,
            });
        };

        log::debug!(
            "resolved '{key_string}' ({} bytes, {} file(s))",
            effect.text.len(),
            extraction.files.len()
        );
        Ok(ResolvedEffect {
            key: key_string,
            source: effect.text,
            files: extraction.files,
        })
    }

    /// Keys of every effect declared in one file, in declaration order.
    ///
    /// Includes are not followed.
    pub fn list_effects<P>(
        &self,
        file_prefix: &str,
        base_directory: &str,
        provider: &P,
    ) -> Result<Vec<String>, PreprocessError>
    where
        P: SourceProvider + ?Sized,
    {
        let prefix = path::normalize(file_prefix)
            .map_err(|err| PreprocessError::malformed(file_prefix, err.to_string()))?;
        let path = file_path(&self.config, base_directory, &prefix, provider)?;
        let text = read_source(provider, &path)?;

        let mut keys = Vec::new();
        let mut seen = HashSet::new();
        for (index, line) in text.lines().enumerate() {
            if let Line::Marker(name) = scanner::classify(line, &self.config) {
                let key = EffectKey::new(&prefix, name, self.config.separator()).to_string();
                if !seen.insert(key.clone()) {
                    return Err(PreprocessError::DuplicateEffect {
                        key,
                        path,
                        line: index + 1,
                    });
                }
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

/// Path of the file holding `prefix`'s effects.
///
/// Prefixes that start at a mount point of `provider` (`builtin/Common`)
/// ignore `base_directory`.
fn file_path<P>(
    config: &PreprocessorConfig,
    base_directory: &str,
    prefix: &str,
    provider: &P,
) -> Result<String, PreprocessError>
where
    P: SourceProvider + ?Sized,
{
    let file_name = format!("{prefix}{}", config.extension());
    let base = match prefix.split_once('/') {
        Some((source, _)) if provider.is_mount_point(source) => "",
        _ => base_directory,
    };
    path::join(base, &file_name).map_err(|err| {
        PreprocessError::malformed(
            prefix,
            format!("cannot locate '{file_name}' under '{base_directory}': {err}"),
        )
    })
}

fn read_source<P>(provider: &P, path: &str) -> Result<String, PreprocessError>
where
    P: SourceProvider + ?Sized,
{
    let text = provider
        .read_to_string(path)
        .map_err(|source| PreprocessError::FileNotFound {
            path: path.to_owned(),
            source,
        })?;
    match text.strip_prefix('\u{feff}') {
        Some(without_bom) => Ok(without_bom.to_owned()),
        None => Ok(text),
    }
}

fn push_line_directive(out: &mut String, line: usize, file_index: usize) {
    out.push_str(&format!("#line {line} {file_index}\n"));
}

/// An effect whose text is complete.
struct Effect {
    text: String,
    file_index: usize,
    /// Line number of the first body line in its file.
    first_line: usize,
}

/// An effect still receiving lines.
struct OpenEffect {
    key: String,
    marker_line: usize,
    text: String,
}

/// State of one top-level resolution.
struct Extraction<'a, P: ?Sized> {
    config: &'a PreprocessorConfig,
    base_directory: &'a str,
    provider: &'a P,
    table: HashMap<String, Effect>,
    files: Vec<String>,
    /// Prefixes of files whose scan has finished.
    parsed: HashSet<String>,
    /// Prefixes of files currently being scanned, outermost first.
    in_progress: Vec<String>,
}

impl<'a, P> Extraction<'a, P>
where
    P: SourceProvider + ?Sized,
{
    fn new(config: &'a PreprocessorConfig, base_directory: &'a str, provider: &'a P) -> Self {
        Self {
            config,
            base_directory,
            provider,
            table: HashMap::new(),
            files: Vec::new(),
            parsed: HashSet::new(),
            in_progress: Vec::new(),
        }
    }

    fn parse_file(&mut self, prefix: &str) -> Result<(), PreprocessError> {
        let path = file_path(self.config, self.base_directory, prefix, self.provider)?;
        let text = read_source(self.provider, &path)?;
        let file_index = self.files.len();
        self.files.push(path.clone());
        log::debug!("parsing '{path}' as file {file_index}");

        self.in_progress.push(prefix.to_owned());
        self.scan(prefix, &path, file_index, &text)?;
        self.in_progress.pop();
        self.parsed.insert(prefix.to_owned());
        Ok(())
    }

    fn scan(
        &mut self,
        prefix: &str,
        path: &str,
        file_index: usize,
        text: &str,
    ) -> Result<(), PreprocessError> {
        let mut open: Option<OpenEffect> = None;

        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;
            match scanner::classify(line, self.config) {
                Line::Marker(name) => {
                    if let Some(effect) = open.take() {
                        self.close(effect, path, file_index)?;
                    }
                    let key = EffectKey::new(prefix, name, self.config.separator()).to_string();
                    log::trace!("{path}:{line_number}: effect '{key}'");
                    open = Some(OpenEffect {
                        key,
                        marker_line: line_number,
                        text: String::new(),
                    });
                }
                Line::Include(target) => {
                    let Some(effect) = open.as_mut() else {
                        log::warn!(
                            "{path}:{line_number}: include '{target}' outside of an effect ignored"
                        );
                        continue;
                    };
                    self.expand_include(target, &mut effect.text, line_number, file_index)?;
                }
                Line::Source(source) => {
                    if let Some(effect) = open.as_mut() {
                        effect.text.push_str(source);
                        effect.text.push('\n');
                    }
                }
            }
        }

        if let Some(effect) = open.take() {
            self.close(effect, path, file_index)?;
        }
        Ok(())
    }

    fn close(
        &mut self,
        effect: OpenEffect,
        path: &str,
        file_index: usize,
    ) -> Result<(), PreprocessError> {
        if self.table.contains_key(&effect.key) {
            return Err(PreprocessError::DuplicateEffect {
                key: effect.key,
                path: path.to_owned(),
                line: effect.marker_line,
            });
        }
        self.table.insert(
            effect.key,
            Effect {
                text: effect.text,
                file_index,
                first_line: effect.marker_line + 1,
            },
        );
        Ok(())
    }

    fn expand_include(
        &mut self,
        target: &str,
        out: &mut String,
        line_number: usize,
        file_index: usize,
    ) -> Result<(), PreprocessError> {
        let key = EffectKey::parse(target, self.config.separator())?;
        let directives = self.config.line_directives();
        let included = self.lookup(&key)?;

        if directives == LineDirectives::Bracket {
            push_line_directive(out, included.first_line, included.file_index);
        }
        out.push_str(&included.text);
        if directives != LineDirectives::Off {
            push_line_directive(out, line_number + 1, file_index);
        }
        Ok(())
    }

    /// Find an effect, scanning its file first if that has not happened yet.
    fn lookup(&mut self, key: &EffectKey) -> Result<&Effect, PreprocessError> {
        let key_string = key.to_string();
        let prefix = key.prefix();

        if !self.table.contains_key(&key_string) {
            if self.in_progress.iter().any(|open| open == prefix) {
                let mut chain = self.in_progress.clone();
                chain.push(key_string.clone());
                return Err(PreprocessError::CyclicInclude {
                    key: key_string,
                    chain,
                });
            }
            if !self.parsed.contains(prefix) {
                self.parse_file(prefix)?;
            }
        }

        self.table
            .get(&key_string)
            .ok_or_else(|| PreprocessError::EffectKeyNotFound {
                path: file_path(self.config, self.base_directory, prefix, self.provider)
                    .unwrap_or_else(|_| key.file_name(self.config.extension())),
                key: key_string.clone(),
            })
    }
}
