//! Pipeline tests: source text in, AST/document/diagnostics out.

use flujo_core::document::{Child, Document, FormChild};

use crate::{CompileConfig, ErrorCode, compile, parse};

fn parse_ok(source: &str) -> Document {
    parse(source, &CompileConfig::default())
        .unwrap_or_else(|err| panic!("expected success, got: {}", err.diagnostic()))
}

fn parse_err(source: &str) -> crate::Diagnostic {
    parse(source, &CompileConfig::default())
        .expect_err("expected a parse error")
        .into_diagnostic()
}

fn form_of(document: &Document, screen_id: &str) -> Vec<FormChild> {
    let screen = document.screen(screen_id).expect("screen not found");
    screen
        .layout
        .children
        .iter()
        .find_map(|child| match child {
            Child::Form { children, .. } => Some(children.clone()),
            _ => None,
        })
        .expect("screen has no form")
}

#[test]
fn test_minimal_screen() {
    let document = parse_ok("Pantalla Bienvenida:\nTitulo: Hola\n");
    assert_eq!(document.version, "3.1");
    assert_eq!(document.screens.len(), 1);
    let screen = &document.screens[0];
    assert_eq!(screen.id, "bienvenida");
    assert_eq!(screen.title, "Bienvenida");
    assert_eq!(
        screen.layout.children[0],
        Child::TextSubheading {
            text: "Hola".to_string()
        }
    );
}

#[test]
fn test_content_order_preserved() {
    let document = parse_ok(
        "Pantalla A:\n\
         Titulo: Encabezado\n\
         Mostramos: Cuerpo\n\
         Imagen: \"x.png\" 150\n",
    );
    let kinds: Vec<_> = document.screens[0]
        .layout
        .children
        .iter()
        .map(|child| match child {
            Child::TextSubheading { .. } => "heading",
            Child::TextBody { .. } => "body",
            Child::Image { .. } => "image",
            Child::Form { .. } => "form",
        })
        .collect();
    assert_eq!(kinds, ["heading", "body", "image"]);
}

#[test]
fn test_free_text_becomes_body() {
    let document = parse_ok("Pantalla FIN:\nSu cita ha sido agendada\n");
    assert_eq!(
        document.screens[0].layout.children[0],
        Child::TextBody {
            text: "Su cita ha sido agendada".to_string()
        }
    );
}

#[test]
fn test_content_before_first_screen_rejected() {
    let err = parse_err("Titulo: Hola\nPantalla A:\n");
    assert_eq!(err.code(), Some(ErrorCode::E100));
}

#[test]
fn test_empty_input_is_distinguished() {
    let err = parse_err("  \n\t\n");
    assert_eq!(err.code(), Some(ErrorCode::E202));
    assert_eq!(err.message(), "El DSL está vacío");
}

#[test]
fn test_list_with_entries() {
    let document = parse_ok(
        "Pantalla CITA:\n\
         Lista tipo:\n\
         1. general - Consulta General\n\
         2. Opcional: especial - Consulta Especializada\n",
    );
    let screen = &document.screens[0];
    let options = &screen.data["tipo"].example;
    assert_eq!(options.len(), 2);
    assert_eq!(options[0].id, "general");
    assert_eq!(options[0].title, "Consulta General");
    assert!(options[0].enabled);
    assert_eq!(options[1].id, "especial");
    assert!(!options[1].enabled);
}

#[test]
fn test_slug_id_for_display_only_entry() {
    let document = parse_ok("Pantalla A:\nLista tipo:\n1. Consulta General\n");
    let option = &document.screens[0].data["tipo"].example[0];
    assert_eq!(option.id, "consulta_general");
    assert_eq!(option.title, "Consulta General");
}

#[test]
fn test_date_like_entry_kept_verbatim() {
    let document = parse_ok("Pantalla A:\nLista fecha:\n1. 2027 01 01\n");
    let option = &document.screens[0].data["fecha"].example[0];
    assert_eq!(option.id, "2027 01 01");
    assert_eq!(option.title, "2027 01 01");
}

#[test]
fn test_empty_list_rejected_at_header() {
    let err = parse_err("Pantalla A:\nLista tipo:\nTitulo: x\n");
    assert_eq!(err.code(), Some(ErrorCode::E102));
}

#[test]
fn test_entry_outside_list_rejected() {
    let err = parse_err("Pantalla A:\n1. suelta\n");
    assert_eq!(err.code(), Some(ErrorCode::E101));
}

#[test]
fn test_single_blank_does_not_split_list() {
    let document = parse_ok("Pantalla A:\nLista tipo:\n1. uno\n\n2. dos\n");
    assert_eq!(document.screens[0].data["tipo"].example.len(), 2);
}

#[test]
fn test_double_blank_closes_list() {
    let err = parse_err("Pantalla A:\nLista tipo:\n1. uno\n\n\n2. dos\n");
    assert_eq!(err.code(), Some(ErrorCode::E101));
}

#[test]
fn test_duplicate_screen_names_rejected() {
    let err = parse_err("Pantalla A:\nTitulo: x\nPantalla A:\nTitulo: y\n");
    assert_eq!(err.code(), Some(ErrorCode::E200));
    // Secondary label points back at the first declaration.
    assert_eq!(err.labels().iter().filter(|l| !l.is_primary()).count(), 1);
}

#[test]
fn test_screen_names_collide_after_slugging() {
    let err = parse_err("Pantalla Mi Cita:\nPantalla \"mi cita\":\n");
    assert_eq!(err.code(), Some(ErrorCode::E200));
}

#[test]
fn test_duplicate_list_names_per_screen_rejected() {
    let err = parse_err(
        "Pantalla A:\n\
         Lista tipo:\n\
         1. uno\n\
         Lista tipo:\n\
         1. dos\n",
    );
    assert_eq!(err.code(), Some(ErrorCode::E201));
}

#[test]
fn test_implicit_navigation_chains_screens() {
    let document = parse_ok("Pantalla A:\nTitulo: x\nPantalla B:\nTitulo: y\n");
    let form = form_of(&document, "a");
    match &form[0] {
        FormChild::Footer {
            label,
            on_click_action,
        } => {
            assert_eq!(label, "Continuar");
            assert_eq!(on_click_action.name, "navigate");
            assert_eq!(on_click_action.next.as_ref().unwrap().name, "b");
        }
        other => panic!("expected Footer, got {other:?}"),
    }
    // Last screen without lists gets no outgoing edge at all.
    assert!(
        !document.screen("b").unwrap().layout.children.iter().any(|c| matches!(c, Child::Form { .. }))
    );
}

#[test]
fn test_explicit_navigation_resolved() {
    let document = parse_ok(
        "Pantalla A:\nIrAPantalla Confirmacion\nPantalla B:\nPantalla Confirmacion:\n",
    );
    let form = form_of(&document, "a");
    match &form[0] {
        FormChild::Footer {
            on_click_action, ..
        } => {
            assert_eq!(on_click_action.next.as_ref().unwrap().name, "confirmacion");
        }
        other => panic!("expected Footer, got {other:?}"),
    }
}

#[test]
fn test_forward_reference_is_valid() {
    // The target is declared after the directive.
    parse_ok("Pantalla A:\nIrAPantalla B\nPantalla B:\nTitulo: x\n");
}

#[test]
fn test_unknown_navigation_target_rejected() {
    let err = parse_err("Pantalla A:\nIrAPantalla Inexistente\n");
    assert_eq!(err.code(), Some(ErrorCode::E300));
    assert!(err.message().contains("Inexistente"));
}

#[test]
fn test_duplicate_navigation_rejected() {
    let err = parse_err("Pantalla A:\nIrAPantalla B\nSalir\nPantalla B:\n");
    assert_eq!(err.code(), Some(ErrorCode::E103));
}

#[test]
fn test_exit_and_cancel_footers_are_terminal() {
    let document = parse_ok("Pantalla A:\nSalir\nPantalla B:\nCancelar\n");
    for (id, label) in [("a", "Salir"), ("b", "Cancelar")] {
        let form = form_of(&document, id);
        match &form[0] {
            FormChild::Footer {
                label: got,
                on_click_action,
            } => {
                assert_eq!(got, label);
                assert_eq!(on_click_action.name, "complete");
                assert!(on_click_action.next.is_none());
            }
            other => panic!("expected Footer, got {other:?}"),
        }
    }
}

#[test]
fn test_last_screen_with_list_gets_complete_footer() {
    let document = parse_ok("Pantalla A:\nLista tipo:\n1. uno\n");
    let form = form_of(&document, "a");
    assert!(matches!(&form[0], FormChild::Dropdown { .. }));
    match &form[1] {
        FormChild::Footer {
            on_click_action, ..
        } => assert_eq!(on_click_action.name, "complete"),
        other => panic!("expected Footer, got {other:?}"),
    }
}

#[test]
fn test_implicit_form_name_derived_from_screen() {
    let document = parse_ok("Pantalla CITA:\nLista tipo:\n1. uno\n");
    let screen = document.screen("cita").unwrap();
    match &screen.layout.children[0] {
        Child::Form { name, .. } => assert_eq!(name, "form_cita"),
        other => panic!("expected Form, got {other:?}"),
    }
}

#[test]
fn test_explicit_form_block() {
    let document = parse_ok(
        "Pantalla A:\n\
         Formulario agenda:\n\
         Lista tipo:\n\
         1. uno\n\
         FinFormulario\n",
    );
    let screen = &document.screens[0];
    match &screen.layout.children[0] {
        Child::Form { name, children } => {
            assert_eq!(name, "agenda");
            assert!(matches!(&children[0], FormChild::Dropdown { .. }));
            // The footer lands in the explicit form, no implicit one appears.
            assert!(matches!(&children[1], FormChild::Footer { .. }));
        }
        other => panic!("expected Form, got {other:?}"),
    }
    assert_eq!(screen.layout.children.len(), 1);
}

#[test]
fn test_unclosed_form_rejected() {
    let err = parse_err("Pantalla A:\nFormulario agenda:\nLista tipo:\n1. uno\n");
    assert_eq!(err.code(), Some(ErrorCode::E104));
}

#[test]
fn test_form_close_without_open_rejected() {
    let err = parse_err("Pantalla A:\nFinFormulario\n");
    assert_eq!(err.code(), Some(ErrorCode::E105));
}

#[test]
fn test_nested_forms_rejected() {
    let err = parse_err("Pantalla A:\nFormulario uno:\nFormulario dos:\n");
    assert_eq!(err.code(), Some(ErrorCode::E106));
}

#[test]
fn test_dropdown_references_its_catalog() {
    let document = parse_ok("Pantalla A:\nLista tipo cita:\n1. uno\n");
    let form = form_of(&document, "a");
    match &form[0] {
        FormChild::Dropdown {
            label,
            name,
            data_source,
            ..
        } => {
            assert_eq!(label, "Seleccione tipo cita");
            assert_eq!(name, "tipo_cita");
            assert_eq!(data_source, "${data.tipo_cita}");
            assert!(document.screens[0].data.contains_key("tipo_cita"));
        }
        other => panic!("expected Dropdown, got {other:?}"),
    }
}

#[test]
fn test_required_inference_all_options_disabled() {
    let document = parse_ok(
        "Pantalla A:\n\
         Lista tipo:\n\
         1. Opcional: uno\n\
         2. Opcional: dos\n",
    );
    match &form_of(&document, "a")[0] {
        FormChild::Dropdown { required, .. } => assert!(!required),
        other => panic!("expected Dropdown, got {other:?}"),
    }
}

#[test]
fn test_required_override_on_header() {
    let document = parse_ok("Pantalla A:\nLista fecha No:\n1. uno\n");
    match &form_of(&document, "a")[0] {
        FormChild::Dropdown { required, .. } => assert!(!required),
        other => panic!("expected Dropdown, got {other:?}"),
    }
}

#[test]
fn test_compile_reports_warnings_alongside_failure() {
    let source = "Pantalla A\nLista fecha:\n1. 2027-01-01\n";
    let outcome = compile(source, &CompileConfig::default());
    assert!(!outcome.ok());
    assert!(outcome.document.is_none());
    assert_eq!(outcome.warnings.len(), 1);
}

#[test]
fn test_compile_success_keeps_warnings() {
    let source = "Pantalla A:\nLista fecha:\n1. 2027-01-01 - Fecha\n";
    let outcome = compile(source, &CompileConfig::default());
    assert!(outcome.ok());
    assert!(outcome.document.is_some());
    assert_eq!(outcome.warnings.len(), 1);
}
