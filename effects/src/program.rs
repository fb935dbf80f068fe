//! Per-stage sources of a shader program.

use shaderfx_vfs::SourceProvider;

use crate::error::PreprocessError;
use crate::preprocessor::EffectPreprocessor;

/// Shader stage, named after the effect that holds its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Geometry,
    Fragment,
    Compute,
}

impl ShaderStage {
    /// Name of the effect holding this stage's source (`Gravity.Vertex`).
    pub fn effect_name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "Vertex",
            ShaderStage::Geometry => "Geometry",
            ShaderStage::Fragment => "Fragment",
            ShaderStage::Compute => "Compute",
        }
    }
}

/// Resolved stage sources for a vertex/geometry/fragment program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSources {
    pub vertex: String,
    pub geometry: Option<String>,
    pub fragment: String,
}

impl ProgramSources {
    pub fn stage(&self, stage: ShaderStage) -> Option<&str> {
        match stage {
            ShaderStage::Vertex => Some(self.vertex.as_str()),
            ShaderStage::Geometry => self.geometry.as_deref(),
            ShaderStage::Fragment => Some(self.fragment.as_str()),
            ShaderStage::Compute => None,
        }
    }

    /// Present stages in pipeline order.
    pub fn stages(&self) -> impl Iterator<Item = (ShaderStage, &str)> + '_ {
        [ShaderStage::Vertex, ShaderStage::Geometry, ShaderStage::Fragment]
            .into_iter()
            .filter_map(|stage| self.stage(stage).map(|source| (stage, source)))
    }
}

impl EffectPreprocessor {
    /// Resolve the effect holding one stage of `program`.
    pub fn resolve_stage<P>(
        &self,
        program: &str,
        stage: ShaderStage,
        base_directory: &str,
        provider: &P,
    ) -> Result<String, PreprocessError>
    where
        P: SourceProvider + ?Sized,
    {
        let key = self.stage_key(program, stage);
        self.resolve(&key, base_directory, provider)
    }

    /// Resolve the vertex, optional geometry and fragment effects of `program`.
    ///
    /// Each stage is a separate resolution. A missing `Geometry` effect yields
    /// `None`; any other failure, including a missing include inside the
    /// geometry effect, is returned as is.
    pub fn resolve_program<P>(
        &self,
        program: &str,
        base_directory: &str,
        provider: &P,
    ) -> Result<ProgramSources, PreprocessError>
    where
        P: SourceProvider + ?Sized,
    {
        let vertex = self.resolve_stage(program, ShaderStage::Vertex, base_directory, provider)?;
        let fragment =
            self.resolve_stage(program, ShaderStage::Fragment, base_directory, provider)?;

        let geometry_key = self.stage_key(program, ShaderStage::Geometry);
        let geometry = match self.resolve(&geometry_key, base_directory, provider) {
            Ok(source) => Some(source),
            Err(PreprocessError::EffectKeyNotFound { key, .. }) if key == geometry_key => None,
            Err(err) => return Err(err),
        };

        log::debug!(
            "resolved program '{program}' (geometry stage: {})",
            geometry.is_some()
        );
        Ok(ProgramSources {
            vertex,
            geometry,
            fragment,
        })
    }

    fn stage_key(&self, program: &str, stage: ShaderStage) -> String {
        format!(
            "{}{}{}",
            program.trim(),
            self.config().separator(),
            stage.effect_name()
        )
    }
}
