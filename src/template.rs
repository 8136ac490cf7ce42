use swc_core::{
    common::BytePos,
    ecma::{
        ast::*,
        parser::{EsSyntax, PResult, Parser, StringInput, Syntax},
        utils::DropSpan,
        visit::VisitMutWith,
    },
};

use crate::{ERROR_HANDLER_IDENT, ORIGINAL_RENDER_METHOD};

// -----------------------------------------------------------------------------
// Template sources
// -----------------------------------------------------------------------------

fn class_render_source() -> String {
    format!(
        "try{{return this.{ORIGINAL_RENDER_METHOD}();}}catch(e){{return {ERROR_HANDLER_IDENT}(e, this.constructor.name)}}"
    )
}

fn functional_source() -> String {
    format!("try{{}}catch(e){{return {ERROR_HANDLER_IDENT}(e)}}")
}

/// Parse a statement-level snippet as a script. `return` is allowed at the
/// top level so fragments of function bodies can be parsed on their own.
pub(crate) fn parse_snippet(src: &str, jsx: bool) -> PResult<Script> {
    let syntax = Syntax::Es(EsSyntax {
        jsx,
        allow_return_outside_function: true,
        ..Default::default()
    });
    let input = StringInput::new(src, BytePos(0), BytePos(src.len() as u32));
    Parser::new(syntax, input, None).parse_script()
}

fn parse_try_stmt(src: &str) -> TryStmt {
    let script = parse_snippet(src, false)
        .unwrap_or_else(|err| panic!("try/catch template failed to parse: {src}: {err:?}"));
    match script.body.into_iter().next() {
        Some(Stmt::Try(try_stmt)) => {
            let mut try_stmt = *try_stmt;
            // masters carry no positions so copies never alias source locations
            try_stmt.visit_mut_with(&mut DropSpan);
            try_stmt
        }
        other => panic!("try/catch template is not a try statement: {src}: {other:?}"),
    }
}

// -----------------------------------------------------------------------------
// Template cache
// -----------------------------------------------------------------------------

/// Pre-parsed try/catch fragments. The masters are never handed out; every
/// accessor returns an independent deep copy for a single insertion site.
#[derive(Debug, Clone)]
pub struct TryCatchTemplates {
    /// `try { return this.__originalRenderMethod__(); } catch (e) { return ReactSSRErrorHandler(e, this.constructor.name) }`
    class_render: TryStmt,
    /// `try {} catch (e) { return ReactSSRErrorHandler(e) }`
    functional: TryStmt,
}

impl TryCatchTemplates {
    pub fn parse() -> Self {
        Self {
            class_render: parse_try_stmt(&class_render_source()),
            functional: parse_try_stmt(&functional_source()),
        }
    }

    /// Body of the synthesized `render()` of a class component.
    pub fn class_render(&self) -> TryStmt {
        self.class_render.clone()
    }

    /// Wrapper for a functional component; the try block starts out empty and
    /// receives the component's original statements.
    pub fn functional(&self) -> TryStmt {
        self.functional.clone()
    }
}

impl Default for TryCatchTemplates {
    fn default() -> Self {
        Self::parse()
    }
}
