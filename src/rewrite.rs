use std::mem;

use swc_core::{
    common::{util::take::Take, Span, SyntaxContext, DUMMY_SP},
    ecma::{
        ast::*,
        visit::{VisitMut, VisitMutWith},
    },
};
use tracing::{debug, trace};

use crate::{
    component::{is_react_component_class, locate_render_method},
    template::TryCatchTemplates,
    ORIGINAL_RENDER_METHOD,
};

/// Per compilation unit state shared by every rewrite and read once by the
/// finalizer after traversal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassState {
    /// Some component was wrapped, so the handler binding has to be injected.
    pub insert_error_handler: bool,
}

/// Wraps class component `render()` methods and `props`-only arrow functions
/// in the try/catch templates.
pub struct ComponentRewriter<'a> {
    templates: &'a TryCatchTemplates,
    state: &'a mut PassState,
}

impl<'a> ComponentRewriter<'a> {
    pub fn new(templates: &'a TryCatchTemplates, state: &'a mut PassState) -> Self {
        Self { templates, state }
    }

    // ---------- class components ----------

    fn rewrite_class_component(&mut self, name: Option<&Ident>, class: &mut Class) {
        if !is_react_component_class(class) {
            return;
        }
        let lookup = locate_render_method(&class.body);
        if lookup.already_transformed {
            trace!(component = display_name(name), "class component already wrapped");
            return;
        }
        let Some(index) = lookup.render_index else {
            return;
        };

        // render() -> __originalRenderMethod__(), body and params untouched
        if let Some(ClassMember::Method(ClassMethod {
            key: PropName::Ident(key),
            ..
        })) = class.body.get_mut(index)
        {
            key.sym = ORIGINAL_RENDER_METHOD.into();
        }

        class.body.insert(0, self.delegating_render_method());
        self.state.insert_error_handler = true;
        debug!(component = display_name(name), "wrapped class component render");
    }

    /// `render() { try { return this.__originalRenderMethod__() } catch (e) { ... } }`
    fn delegating_render_method(&self) -> ClassMember {
        ClassMember::Method(ClassMethod {
            span: DUMMY_SP,
            key: PropName::Ident(IdentName::new("render".into(), DUMMY_SP)),
            function: Box::new(Function {
                params: vec![],
                decorators: vec![],
                span: DUMMY_SP,
                body: Some(BlockStmt {
                    span: DUMMY_SP,
                    stmts: vec![Stmt::Try(Box::new(self.templates.class_render()))],
                    ctxt: SyntaxContext::empty(),
                }),
                is_generator: false,
                is_async: false,
                type_params: None,
                return_type: None,
                ctxt: SyntaxContext::empty(),
            }),
            kind: MethodKind::Method,
            is_static: false,
            accessibility: None,
            is_abstract: false,
            is_optional: false,
            is_override: false,
        })
    }

    // ---------- functional components ----------

    /// Build `{ try { <leading>... } catch (e) { return ReactSSRErrorHandler(e) } }`.
    fn wrap_statements(&mut self, leading: Vec<Stmt>, span: Span, ctxt: SyntaxContext) -> BlockStmt {
        let mut try_stmt = self.templates.functional();
        try_stmt.block.stmts.splice(0..0, leading);
        self.state.insert_error_handler = true;
        BlockStmt {
            span,
            stmts: vec![Stmt::Try(Box::new(try_stmt))],
            ctxt,
        }
    }

    fn wrap_arrow_body(&mut self, arrow: &mut ArrowExpr) {
        let wrapped = match &mut *arrow.body {
            BlockStmtOrExpr::BlockStmt(block) => {
                let stmts = mem::take(&mut block.stmts);
                self.wrap_statements(stmts, block.span, block.ctxt)
            }
            BlockStmtOrExpr::Expr(expr) => {
                let ret = Stmt::Return(ReturnStmt {
                    span: DUMMY_SP,
                    arg: Some(expr.take()),
                });
                self.wrap_statements(vec![ret], DUMMY_SP, SyntaxContext::empty())
            }
        };
        *arrow.body = BlockStmtOrExpr::BlockStmt(wrapped);
    }
}

fn display_name(ident: Option<&Ident>) -> &str {
    ident.map(|i| i.sym.as_ref()).unwrap_or("<anonymous>")
}

/// The functional component heuristic: exactly one parameter, a plain
/// identifier named `props`. Any other arrow taking `props` matches too.
fn is_props_only(params: &[Pat]) -> bool {
    matches!(params, [Pat::Ident(binding)] if binding.id.sym.as_ref() == "props")
}

impl VisitMut for ComponentRewriter<'_> {
    fn visit_mut_class_decl(&mut self, n: &mut ClassDecl) {
        n.visit_mut_children_with(self);
        self.rewrite_class_component(Some(&n.ident), &mut n.class);
    }

    fn visit_mut_class_expr(&mut self, n: &mut ClassExpr) {
        n.visit_mut_children_with(self);
        self.rewrite_class_component(n.ident.as_ref(), &mut n.class);
    }

    fn visit_mut_arrow_expr(&mut self, n: &mut ArrowExpr) {
        n.visit_mut_children_with(self);
        if is_props_only(&n.params) {
            self.wrap_arrow_body(n);
            debug!("wrapped arrow function component");
        }
    }
}
