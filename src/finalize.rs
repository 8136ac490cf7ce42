use swc_core::{
    common::{SyntaxContext, DUMMY_SP},
    ecma::{ast::*, utils::prepend_stmt},
};
use tracing::debug;

use crate::{config::Config, error::TransformError, rewrite::PassState, ERROR_HANDLER_IDENT};

/// `const ReactSSRErrorHandler = require("<specifier>");`
fn error_handler_binding(specifier: &str, require_ctxt: SyntaxContext) -> Stmt {
    Stmt::Decl(Decl::Var(Box::new(VarDecl {
        span: DUMMY_SP,
        kind: VarDeclKind::Const,
        declare: false,
        decls: vec![VarDeclarator {
            span: DUMMY_SP,
            name: Pat::Ident(BindingIdent {
                id: Ident::new(ERROR_HANDLER_IDENT.into(), DUMMY_SP, SyntaxContext::empty()),
                type_ann: None,
            }),
            init: Some(Box::new(Expr::Call(CallExpr {
                span: DUMMY_SP,
                callee: Callee::Expr(Box::new(Expr::Ident(Ident::new(
                    "require".into(),
                    DUMMY_SP,
                    require_ctxt,
                )))),
                args: vec![ExprOrSpread {
                    spread: None,
                    expr: Box::new(Expr::Lit(Lit::Str(Str {
                        span: DUMMY_SP,
                        value: specifier.into(),
                        raw: None,
                    }))),
                }],
                type_args: None,
                ctxt: SyntaxContext::empty(),
            }))),
            definite: false,
        }],
        ctxt: SyntaxContext::empty(),
    })))
}

/// End-of-pass step: when any component was wrapped, bind the handler at the
/// top of the program (after the directive prologue). Fails when the handler
/// is needed but not configured.
pub fn inject_error_handler(
    program: &mut Program,
    state: &PassState,
    config: &Config,
    require_ctxt: SyntaxContext,
) -> Result<(), TransformError> {
    if !state.insert_error_handler {
        return Ok(());
    }
    let specifier = config
        .error_handler()
        .ok_or(TransformError::MissingErrorHandler)?;

    let binding = error_handler_binding(specifier, require_ctxt);
    match program {
        Program::Module(m) => prepend_stmt(&mut m.body, ModuleItem::Stmt(binding)),
        Program::Script(s) => prepend_stmt(&mut s.body, binding),
    }
    debug!(specifier, "injected render error handler binding");
    Ok(())
}
