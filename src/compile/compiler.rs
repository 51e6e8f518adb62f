use rayon::prelude::*;

use crate::assets::resolve::MediaLocationResolver;
use crate::compile::builder::InstructionBuilder;
use crate::compile::instruction::{CompiledTimeline, CompositionParams, RenderInstruction};
use crate::config::CompilerConfig;
use crate::diagnostics::{CompileObserver, CompileWarning, TracingObserver};
use crate::foundation::core::FrameWindow;
use crate::foundation::error::ReelResult;
use crate::timeline::model::TimelineDocument;

/// Compiles timeline documents into render manifests.
///
/// A compiler is immutable once built and can be shared across threads; the only I/O it
/// performs is the resolver's read-only existence check.
#[derive(Debug, Clone)]
pub struct TimelineCompiler {
    config: CompilerConfig,
    resolver: MediaLocationResolver,
}

impl TimelineCompiler {
    /// Build a compiler from its configuration.
    pub fn new(config: CompilerConfig) -> Self {
        let resolver = MediaLocationResolver::new(config.resolver.clone());
        Self { config, resolver }
    }

    /// Configuration this compiler was built with.
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Resolver used for item sources.
    pub fn resolver(&self) -> &MediaLocationResolver {
        &self.resolver
    }

    /// Compile `doc`, logging warnings through `tracing`.
    pub fn compile(&self, doc: &TimelineDocument) -> ReelResult<CompiledTimeline> {
        self.compile_with(doc, &mut TracingObserver)
    }

    /// Compile `doc`, forwarding each warning to `observer` as it is produced.
    ///
    /// Fails only when the document itself is structurally invalid. Every item-level problem
    /// degrades into a warning and the compile carries on.
    #[tracing::instrument(skip_all, fields(doc = doc.id.as_deref().unwrap_or("")))]
    pub fn compile_with<O>(
        &self,
        doc: &TimelineDocument,
        observer: &mut O,
    ) -> ReelResult<CompiledTimeline>
    where
        O: CompileObserver + ?Sized,
    {
        doc.validate()?;

        let fps = doc.fps_or(|| self.config.default_fps())?;
        let duration_ms = doc.duration_ms_or(self.config.default_duration_ms);
        let canvas = doc.canvas_or(self.config.default_canvas);
        let composition = CompositionParams {
            width: canvas.width,
            height: canvas.height,
            fps: fps.get(),
            duration_in_frames: fps.ms_to_frame(duration_ms).max(0) as u64,
        };

        let builder = InstructionBuilder::new(&self.resolver);
        let mut instructions = Vec::with_capacity(doc.item_ids().len());
        let mut warnings = Vec::new();
        let mut emit = |w: CompileWarning| {
            observer.on_warning(&w);
            warnings.push(w);
        };

        for (layer, id) in doc.item_ids().iter().enumerate() {
            let item = match doc.item(id) {
                Some(Ok(item)) => item,
                Some(Err(e)) => {
                    emit(CompileWarning::InvalidItem {
                        item_id: id.clone(),
                        message: e.to_string(),
                    });
                    continue;
                }
                None => {
                    emit(CompileWarning::MissingItem {
                        item_id: id.clone(),
                    });
                    continue;
                }
            };

            let start = fps.ms_to_frame(item.display.from.unwrap_or(0.0));
            let end = fps.ms_to_frame(item.display.to.unwrap_or(duration_ms));
            let Some(frame_window) = FrameWindow::from_bounds(start, end) else {
                emit(CompileWarning::InvalidFrameWindow {
                    item_id: id.clone(),
                    start_frame: start,
                    end_frame: end,
                });
                continue;
            };

            let built = builder.build(id, &item, fps);
            for w in built.warnings {
                emit(w);
            }
            instructions.push(RenderInstruction {
                item_id: id.clone(),
                frame_window,
                layer,
                payload: built.payload,
            });
        }

        tracing::debug!(
            instructions = instructions.len(),
            warnings = warnings.len(),
            frames = composition.duration_in_frames,
            "compiled timeline"
        );

        Ok(CompiledTimeline {
            composition,
            instructions,
            warnings,
        })
    }

    /// Compile several independent documents in parallel.
    ///
    /// Results keep the input order. Each document's warnings are logged through `tracing`.
    pub fn compile_batch(&self, docs: &[TimelineDocument]) -> Vec<ReelResult<CompiledTimeline>> {
        docs.par_iter().map(|doc| self.compile(doc)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
