use pretty_assertions::assert_eq;
use react_ssr_try_catch_swc_plugin::{transform_program, Config, TransformError};
use swc_core::{
    common::{sync::Lrc, FileName, SourceMap},
    ecma::{
        ast::Program,
        codegen::to_code_default,
        parser::{EsSyntax, Parser, StringInput, Syntax},
    },
};

fn parse(cm: &Lrc<SourceMap>, src: &str) -> Program {
    let fm = cm.new_source_file(FileName::Anon.into(), src.to_string());
    let syntax = Syntax::Es(EsSyntax {
        jsx: true,
        ..Default::default()
    });
    Parser::new(syntax, StringInput::from(&*fm), None)
        .parse_program()
        .expect("fixture should parse")
}

fn print(cm: &Lrc<SourceMap>, program: &Program) -> String {
    let code = to_code_default(cm.clone(), None, program);
    code.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn transform(src: &str, config: Config) -> Result<String, TransformError> {
    let cm: Lrc<SourceMap> = Default::default();
    let program = transform_program(parse(&cm, src), config)?;
    Ok(print(&cm, &program))
}

/// Round-trip the expected source through the same printer.
fn expected(src: &str) -> String {
    let cm: Lrc<SourceMap> = Default::default();
    print(&cm, &parse(&cm, src))
}

fn handler() -> Config {
    Config::with_error_handler("./h")
}

#[test]
fn class_component_render_is_wrapped() {
    let out = transform(
        "class Foo extends Component { render() { return <div/>; } }",
        handler(),
    )
    .unwrap();

    assert_eq!(
        out,
        expected(
            r#"const ReactSSRErrorHandler = require("./h");
            class Foo extends Component {
                render() {
                    try {
                        return this.__originalRenderMethod__();
                    } catch (e) {
                        return ReactSSRErrorHandler(e, this.constructor.name);
                    }
                }
                __originalRenderMethod__() { return <div/>; }
            }"#
        )
    );
}

#[test]
fn arrow_expression_component_is_wrapped() {
    let out = transform("const C = (props) => <div>{props.x}</div>;", handler()).unwrap();

    assert_eq!(
        out,
        expected(
            r#"const ReactSSRErrorHandler = require("./h");
            const C = (props) => {
                try {
                    return <div>{props.x}</div>;
                } catch (e) {
                    return ReactSSRErrorHandler(e);
                }
            };"#
        )
    );
}

#[test]
fn untouched_program_needs_no_handler() {
    let src = "const add = (a, b) => a + b; class Store extends Base { render() { return 1; } }";
    assert_eq!(transform(src, Config::default()).unwrap(), expected(src));
}

#[test]
fn block_bodied_component_keeps_statements_in_order() {
    let out = transform(
        "const C = props => { const name = props.name.toUpperCase(); return <b>{name}</b>; };",
        handler(),
    )
    .unwrap();

    assert_eq!(
        out,
        expected(
            r#"const ReactSSRErrorHandler = require("./h");
            const C = props => {
                try {
                    const name = props.name.toUpperCase();
                    return <b>{name}</b>;
                } catch (e) {
                    return ReactSSRErrorHandler(e);
                }
            };"#
        )
    );
}

#[test]
fn function_expressions_are_left_alone() {
    for src in [
        "const P = function (props) { return <p>{props.text}</p>; };",
        "items.map(function (props) { return props.id; });",
        "export default function (props) { return <p>{props.text}</p>; }",
    ] {
        assert_eq!(transform(src, Config::default()).unwrap(), expected(src), "{src}");
    }
}

#[test]
fn react_namespaced_bases_are_recognized() {
    for base in ["React.Component", "React.PureComponent", "PureComponent"] {
        let out = transform(
            &format!("class Foo extends {base} {{ render() {{ return null; }} }}"),
            handler(),
        )
        .unwrap();
        assert!(out.starts_with(r#"const ReactSSRErrorHandler = require("./h");"#), "{base}: {out}");
        assert!(out.contains("__originalRenderMethod__() { return null; }"), "{base}: {out}");
    }
}

#[test]
fn unrecognized_bases_are_left_alone() {
    for src in [
        "class Foo extends Foo.Component { render() { return null; } }",
        "class Foo extends Base { render() { return null; } }",
        "class Foo { render() { return null; } }",
    ] {
        assert_eq!(transform(src, Config::default()).unwrap(), expected(src), "{src}");
    }
}

#[test]
fn already_transformed_class_is_unchanged() {
    let src = r#"class Foo extends Component {
        render() {
            try { return this.__originalRenderMethod__(); } catch (e) { return ReactSSRErrorHandler(e, this.constructor.name); }
        }
        __originalRenderMethod__() { return <div/>; }
    }"#;
    assert_eq!(transform(src, Config::default()).unwrap(), expected(src));
}

#[test]
fn class_expression_component_is_wrapped() {
    let out = transform(
        "const Foo = class extends React.Component { render() { return null; } };",
        handler(),
    )
    .unwrap();
    assert!(out.contains("__originalRenderMethod__() { return null; }"), "{out}");
    assert!(out.contains("return this.__originalRenderMethod__();"), "{out}");
}

#[test]
fn missing_handler_fails_only_when_something_was_rewritten() {
    let err = transform("const C = props => props.children;", Config::default()).unwrap_err();
    assert!(matches!(err, TransformError::MissingErrorHandler));
    assert_eq!(
        err.to_string(),
        r#"[babel-plugin-transform-react-ssr-try-catch] You must define "errorHandler" property"#
    );
}

#[test]
fn handler_binding_is_injected_once_per_program() {
    let out = transform(
        r#"class A extends Component { render() { return 1; } }
        const B = props => 2;
        const C = props => 3;"#,
        handler(),
    )
    .unwrap();
    assert_eq!(out.matches("require(\"./h\")").count(), 1);
    assert!(out.starts_with(r#"const ReactSSRErrorHandler = require("./h");"#));
}

#[test]
fn binding_goes_after_use_strict() {
    let out = transform(r#""use strict"; const C = props => 1;"#, handler()).unwrap();
    assert!(
        out.starts_with(r#""use strict"; const ReactSSRErrorHandler = require("./h");"#),
        "{out}"
    );
}

#[test]
fn nested_components_inside_render_are_wrapped() {
    let out = transform(
        "class List extends Component { render() { return this.props.items.map(props => <li>{props}</li>); } }",
        handler(),
    )
    .unwrap();

    assert_eq!(
        out,
        expected(
            r#"const ReactSSRErrorHandler = require("./h");
            class List extends Component {
                render() {
                    try {
                        return this.__originalRenderMethod__();
                    } catch (e) {
                        return ReactSSRErrorHandler(e, this.constructor.name);
                    }
                }
                __originalRenderMethod__() {
                    return this.props.items.map(props => {
                        try {
                            return <li>{props}</li>;
                        } catch (e) {
                            return ReactSSRErrorHandler(e);
                        }
                    });
                }
            }"#
        )
    );
}

#[test]
fn unreadable_config_only_fails_when_a_handler_is_needed() {
    let config = Config::from_plugin_config(Some(r#"{"errorHandler":1}"#));

    let src = "const add = (a, b) => a + b;";
    assert_eq!(transform(src, config.clone()).unwrap(), expected(src));

    let err = transform("const C = props => props.children;", config).unwrap_err();
    assert!(matches!(err, TransformError::MissingErrorHandler));
}

#[test]
fn string_keyed_original_render_marks_class_as_transformed() {
    let src = "class Foo extends Component { render() { return 1; } '__originalRenderMethod__'() { return 2; } }";
    assert_eq!(transform(src, Config::default()).unwrap(), expected(src));
}
