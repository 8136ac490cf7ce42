//! SWC transform that makes React server rendering resilient: exceptions thrown
//! while rendering a component are caught and handed to a configured handler
//! module instead of aborting the whole render pass.
//!
//! Two component shapes are rewritten:
//!
//! * classes extending `Component`/`PureComponent` (bare or via `React.`): the
//!   original `render()` is renamed to `__originalRenderMethod__()` and a new
//!   `render()` delegating to it inside try/catch is prepended;
//! * arrow functions taking a single `props` parameter: the body is moved
//!   into a try block.
//!
//! When anything was rewritten, `const ReactSSRErrorHandler = require(...)` is
//! injected at the top of the program.

use swc_core::{
    common::{errors::HANDLER, Mark, Spanned, SyntaxContext},
    ecma::{ast::Program, visit::VisitMutWith},
    plugin::{plugin_transform, proxies::TransformPluginProgramMetadata},
};

mod component;
mod config;
mod error;
mod finalize;
mod rewrite;
mod template;

pub use component::{is_react_component_class, locate_render_method, RenderMethodLookup};
pub use config::Config;
pub use error::TransformError;
pub use finalize::inject_error_handler;
pub use rewrite::{ComponentRewriter, PassState};
pub use template::TryCatchTemplates;

/// Identifier the handler module is bound to.
pub const ERROR_HANDLER_IDENT: &str = "ReactSSRErrorHandler";

/// Name the original `render()` is moved to; its presence marks a class as
/// already transformed.
pub const ORIGINAL_RENDER_METHOD: &str = "__originalRenderMethod__";

// -----------------------------------------------------------------------------
// Transform
// -----------------------------------------------------------------------------

pub struct ReactSsrTryCatch {
    config: Config,
    templates: TryCatchTemplates,
    require_ctxt: SyntaxContext,
}

impl ReactSsrTryCatch {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            templates: TryCatchTemplates::parse(),
            require_ctxt: SyntaxContext::empty(),
        }
    }

    /// Resolve the injected `require` against the host's unresolved mark.
    pub fn with_unresolved_mark(mut self, unresolved_mark: Mark) -> Self {
        self.require_ctxt = SyntaxContext::empty().apply_mark(unresolved_mark);
        self
    }

    /// Run one compilation unit: rewrite components, then inject the handler
    /// binding if anything was rewritten.
    pub fn apply(&self, program: &mut Program) -> Result<PassState, TransformError> {
        let mut state = PassState::default();
        program.visit_mut_with(&mut ComponentRewriter::new(&self.templates, &mut state));
        inject_error_handler(program, &state, &self.config, self.require_ctxt)?;
        Ok(state)
    }
}

/// Transform `program` with `config`; on error no output is produced.
pub fn transform_program(mut program: Program, config: Config) -> Result<Program, TransformError> {
    ReactSsrTryCatch::new(config).apply(&mut program)?;
    Ok(program)
}

// -----------------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------------

fn report(program: &Program, err: &TransformError) {
    HANDLER.with(|handler| {
        handler
            .struct_span_err(program.span(), &err.to_string())
            .emit()
    });
}

#[plugin_transform]
pub fn process_transform(mut program: Program, metadata: TransformPluginProgramMetadata) -> Program {
    let config = Config::from_plugin_config(metadata.get_transform_plugin_config().as_deref());

    let transform = ReactSsrTryCatch::new(config).with_unresolved_mark(metadata.unresolved_mark);
    if let Err(err) = transform.apply(&mut program) {
        report(&program, &err);
    }
    program
}
