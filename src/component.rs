use swc_core::{common::DUMMY_SP, ecma::ast::*};

use crate::ORIGINAL_RENDER_METHOD;

// -----------------------------------------------------------------------------
// Component classification
// -----------------------------------------------------------------------------

const COMPONENT_BASES: [&str; 2] = ["Component", "PureComponent"];

fn is_component_base(name: &str) -> bool {
    COMPONENT_BASES.contains(&name)
}

/// Whether `class` extends `Component`, `PureComponent`, `React.Component` or
/// `React.PureComponent`.
///
/// Purely syntactic: aliased imports (`import { Component as C }`), wrapper
/// bases and computed access (`React["Component"]`) are not recognized.
pub fn is_react_component_class(class: &Class) -> bool {
    let Some(super_class) = class.super_class.as_deref() else {
        return false;
    };
    match super_class.unwrap_parens() {
        Expr::Ident(ident) => is_component_base(ident.sym.as_ref()),
        Expr::Member(MemberExpr {
            obj,
            prop: MemberProp::Ident(prop),
            ..
        }) => {
            matches!(&**obj, Expr::Ident(o) if o.sym.as_ref() == "React")
                && is_component_base(prop.sym.as_ref())
        }
        _ => false,
    }
}

// -----------------------------------------------------------------------------
// Render method lookup
// -----------------------------------------------------------------------------

/// Result of scanning the direct members of a component class.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderMethodLookup {
    /// Index into the class body of the `render()` method; last one wins.
    pub render_index: Option<usize>,
    /// A member named `__originalRenderMethod__` exists, i.e. a previous pass
    /// already rewrote this class.
    pub already_transformed: bool,
}

fn is_ident_key(key: &PropName, name: &str) -> bool {
    matches!(key, PropName::Ident(ident) if ident.sym.as_ref() == name)
}

/// `__originalRenderMethod__() {}` or `'__originalRenderMethod__'() {}`
fn is_marker_key(key: &PropName) -> bool {
    match key {
        PropName::Str(s) => {
            let marker = Str {
                span: DUMMY_SP,
                value: ORIGINAL_RENDER_METHOD.into(),
                raw: None,
            };
            s.value == marker.value
        }
        _ => is_ident_key(key, ORIGINAL_RENDER_METHOD),
    }
}

/// Scan `body` without descending into nested classes or object literals.
///
/// Methods match by name alone, whatever their kind: a `static render()` or
/// `get render()` is located like a plain `render()`.
pub fn locate_render_method(body: &[ClassMember]) -> RenderMethodLookup {
    let mut lookup = RenderMethodLookup::default();
    for (index, member) in body.iter().enumerate() {
        let ClassMember::Method(method) = member else {
            continue;
        };
        if is_marker_key(&method.key) {
            lookup.already_transformed = true;
        } else if is_ident_key(&method.key, "render") {
            lookup.render_index = Some(index);
        }
    }
    lookup
}
