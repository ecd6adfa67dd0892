//! End-to-end compilation tests over the public API.

use flujo_parser::{CompileConfig, compile, parse};
use serde_json::json;

const AGENDAMIENTO: &str = "\
// Flujo de agendamiento de citas
Pantalla CITA:
Titulo: Agendar Cita
Mostramos: Seleccione el tipo de cita

Lista tipo:
1. general - Consulta General
2. Opcional: especial - Consulta Especializada

IrAPantalla Confirmacion

Pantalla Confirmacion:
Titulo: Confirmado
Su cita ha sido agendada exitosamente
";

#[test]
fn test_appointment_flow_document_shape() {
    let document = parse(AGENDAMIENTO, &CompileConfig::default()).unwrap();
    let value = serde_json::to_value(&document).unwrap();
    assert_eq!(
        value,
        json!({
            "version": "3.1",
            "screens": [
                {
                    "id": "cita",
                    "title": "CITA",
                    "layout": {
                        "type": "SingleColumnLayout",
                        "children": [
                            { "type": "TextSubheading", "text": "Agendar Cita" },
                            { "type": "TextBody", "text": "Seleccione el tipo de cita" },
                            {
                                "type": "Form",
                                "name": "form_cita",
                                "children": [
                                    {
                                        "type": "Dropdown",
                                        "label": "Seleccione tipo",
                                        "name": "tipo",
                                        "required": true,
                                        "data-source": "${data.tipo}"
                                    },
                                    {
                                        "type": "Footer",
                                        "label": "Continuar",
                                        "on-click-action": {
                                            "name": "navigate",
                                            "next": { "type": "screen", "name": "confirmacion" }
                                        }
                                    }
                                ]
                            }
                        ]
                    },
                    "data": {
                        "tipo": {
                            "__example__": [
                                { "id": "general", "title": "Consulta General" },
                                {
                                    "id": "especial",
                                    "title": "Consulta Especializada",
                                    "enabled": false
                                }
                            ]
                        }
                    }
                },
                {
                    "id": "confirmacion",
                    "title": "Confirmacion",
                    "layout": {
                        "type": "SingleColumnLayout",
                        "children": [
                            { "type": "TextSubheading", "text": "Confirmado" },
                            {
                                "type": "TextBody",
                                "text": "Su cita ha sido agendada exitosamente"
                            }
                        ]
                    }
                }
            ]
        })
    );
}

#[test]
fn test_hyphenated_date_scenario() {
    let source = "\
Pantalla CITA:
Titulo: Bienvenida
Lista tipo:
1. general - Consulta General
2. 2027-01-01 - Fecha mal escrita
";
    let outcome = compile(source, &CompileConfig::default());
    assert!(outcome.ok());

    let document = outcome.document.as_ref().unwrap();
    assert_eq!(document.screens.len(), 1);
    let screen = document.screen("cita").unwrap();
    let options = &screen.data["tipo"].example;
    assert_eq!(options[0].id, "general");
    assert_eq!(options[1].id, "2027_01_01");

    assert_eq!(outcome.warnings.len(), 1);
    let warning = &outcome.warnings[0];
    assert!(warning.message().contains("guiones"));

    let payload = outcome.editor_payload(source);
    let location = payload.warnings[0].location;
    assert_eq!((location.start.line, location.start.column), (5, 4));
    assert_eq!((location.end.line, location.end.column), (5, 13));
}

#[test]
fn test_compile_is_deterministic() {
    let first = compile(AGENDAMIENTO, &CompileConfig::default());
    let second = compile(AGENDAMIENTO, &CompileConfig::default());
    assert_eq!(
        first.document.unwrap().to_json().unwrap(),
        second.document.unwrap().to_json().unwrap()
    );
}

#[test]
fn test_explicit_id_round_trip() {
    let document = parse(
        "Pantalla A:\nLista cosa:\n1. foo - Bar Baz\n",
        &CompileConfig::default(),
    )
    .unwrap();
    let option = &document.screens[0].data["cosa"].example[0];
    assert_eq!(option.id, "foo");
    assert_eq!(option.title, "Bar Baz");
}

#[test]
fn test_single_error_for_many_violations() {
    // Three structural problems; exactly one diagnostic comes back.
    let source = "Titulo: suelto\nPantalla A:\nPantalla A:\n1. suelta\n";
    let outcome = compile(source, &CompileConfig::default());
    assert!(!outcome.ok());
    assert!(outcome.error.is_some());
    assert!(outcome.document.is_none());
}

proptest::proptest! {
    /// The compiler never panics and is a pure function of its input.
    #[test]
    fn test_compile_total_and_deterministic(source in "[ -~\nÁÉÍÓÚáéíóúñ]{0,200}") {
        let first = compile(&source, &CompileConfig::default());
        let second = compile(&source, &CompileConfig::default());
        proptest::prop_assert_eq!(first.ok(), second.ok());
        let first_json = first.document.map(|d| d.to_json().unwrap());
        let second_json = second.document.map(|d| d.to_json().unwrap());
        proptest::prop_assert_eq!(first_json, second_json);
    }
}

#[test]
fn test_configured_document_version() {
    let config = CompileConfig {
        document_version: "4.0".to_string(),
        ..CompileConfig::default()
    };
    let document = parse("Pantalla A:\nTitulo: x\n", &config).unwrap();
    assert_eq!(document.version, "4.0");
}

#[test]
fn test_compact_vocabulary_rejects_legacy_alias() {
    let config = CompileConfig {
        vocab: flujo_core::vocab::Vocabulary::compact(),
        ..CompileConfig::default()
    };
    // `Opciones` is not a list header in the compact profile; the entry that
    // follows is an option outside a list.
    let result = parse("Pantalla A:\nOpciones tipo:\n1. uno\n", &config);
    assert!(result.is_err());
}
