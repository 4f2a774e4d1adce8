// Análisis de punta a punta con dos programas que comparten un curso.

use horas_aula::analisis::{ejecutar_analisis, DatosPrograma};
use horas_aula::config::Configuracion;
use horas_aula::diagnostics::Diagnosticos;
use horas_aula::models::{CursoMalla, FilaEquivalencia, Periodo, RegistroMatricula};

fn config_dos_programas() -> Configuracion {
    let texto = r#"{
        "metadata": {
            "carrera": "Educación Secundaria",
            "fecha_analisis": "2025-01-15",
            "programa_excluido": "Educación Inicial"
        },
        "parametros": {
            "tamano_seccion_aula": 40,
            "tamano_seccion_laboratorio": 20,
            "tamano_seccion_taller": 25,
            "semanas_por_semestre": 16
        },
        "programas": [
            {
                "id": "C1",
                "nombre_equivalencia": "Ciencias I",
                "archivos": {
                    "malla": "m1.xlsx",
                    "proyeccion": "p1.xlsx",
                    "equivalencias": "e1.xlsx"
                }
            },
            {
                "id": "C2",
                "nombre_equivalencia": "Ciencias II",
                "archivos": {
                    "malla": "m2.xlsx",
                    "proyeccion": "p2.xlsx",
                    "equivalencias": "e2.xlsx"
                }
            }
        ],
        "salida": { "json": "r.json", "excel": "r.xlsx" }
    }"#;
    serde_json::from_str(texto).expect("configuración de prueba")
}

fn curso_intro(codigo: &str) -> CursoMalla {
    CursoMalla {
        codigo: codigo.to_string(),
        nombre: "Intro".to_string(),
        semestre: 1,
        horas_teoricas: 2.0,
        horas_practicas: 3.0,
        ambiente_teoria: None,
        ambiente_practica: Some("Laboratorio de Química".to_string()),
        total_horas_semanales: 5.0,
        creditos: 4.0,
    }
}

fn matricula(codigo: &str, matriculados: u32) -> RegistroMatricula {
    RegistroMatricula {
        codigo: codigo.to_string(),
        semestre: 1,
        periodo: Periodo { anio: 2024, mes: 1 },
        matriculados,
    }
}

fn equivalencia(
    codigo: &str,
    destino: &str,
    codigo_destino: &str,
) -> FilaEquivalencia {
    FilaEquivalencia {
        codigo: codigo.to_string(),
        curso: "Intro".to_string(),
        semestre: 1,
        programa_equivalente: Some(destino.to_string()),
        codigo_equivalente: Some(codigo_destino.to_string()),
        curso_equivalente: Some("Intro".to_string()),
    }
}

#[test]
fn curso_compartido_se_cuenta_una_sola_vez() {
    let config = config_dos_programas();
    let mut diagnosticos = Diagnosticos::nuevo();

    let datos = vec![
        DatosPrograma {
            malla: vec![curso_intro("INT-101")],
            proyeccion: vec![matricula("INT-101", 45)],
            equivalencias: vec![equivalencia("INT-101", "Ciencias II", "INT-201")],
        },
        DatosPrograma {
            malla: vec![curso_intro("INT-201")],
            proyeccion: vec![matricula("INT-201", 15)],
            equivalencias: vec![equivalencia("INT-201", "Ciencias I", "INT-101")],
        },
    ];

    let resultado = ejecutar_analisis(&config, &datos, &mut diagnosticos).unwrap();

    assert_eq!(resultado.consumo_por_periodo.len(), 1);
    let periodo = &resultado.consumo_por_periodo[0];
    assert_eq!(periodo.periodo, "2024-01");
    assert_eq!(periodo.ciclo, "I");

    // Matrícula combinada 45 + 15 = 60:
    //   aula 40 → 2 secciones × 2 hrs = 4; laboratorio 20 → 3 secciones × 3 hrs = 9
    assert_eq!(periodo.horas_semanales.aula, 4.0);
    assert_eq!(periodo.horas_semanales.laboratorio, 9.0);
    assert_eq!(periodo.horas_semanales.total, 13.0);
    assert_eq!(periodo.secciones.aula, 2);
    assert_eq!(periodo.secciones.laboratorio, 3);
    assert_eq!(periodo.estudiantes.total, 60);

    // C2 cedió su registro: el consumo figura sólo bajo C1
    assert!(periodo.detalle_por_programa.contains_key("C1"));
    assert!(!periodo.detalle_por_programa.contains_key("C2"));

    // El detalle específico distingue el laboratorio por su nombre completo
    let detalle = &resultado.detalle_ambientes_especificos[0];
    let lab = &detalle.ambientes["Laboratorio de Química"];
    assert_eq!(lab.horas_semanales, 9.0);
    assert_eq!(lab.secciones, 3);
    assert_eq!(lab.horas_semestre, 144.0);

    assert!(diagnosticos.is_empty());
}

#[test]
fn curso_cedido_al_programa_excluido_desaparece_de_la_salida() {
    let config = config_dos_programas();
    let mut diagnosticos = Diagnosticos::nuevo();

    let mut malla_c1 = vec![curso_intro("INT-101")];
    malla_c1.push(CursoMalla {
        codigo: "MAT-101".to_string(),
        nombre: "Matemática Básica".to_string(),
        semestre: 1,
        horas_teoricas: 4.0,
        horas_practicas: 0.0,
        ambiente_teoria: None,
        ambiente_practica: None,
        total_horas_semanales: 4.0,
        creditos: 3.0,
    });

    let datos = vec![
        DatosPrograma {
            malla: malla_c1,
            proyeccion: vec![matricula("INT-101", 30), matricula("MAT-101", 30)],
            equivalencias: vec![FilaEquivalencia {
                codigo: "MAT-101".to_string(),
                curso: "Matemática Básica".to_string(),
                semestre: 1,
                programa_equivalente: Some("Educación Inicial".to_string()),
                codigo_equivalente: Some("MAT-001".to_string()),
                curso_equivalente: Some("Matemática Básica".to_string()),
            }],
        },
        DatosPrograma { malla: vec![], proyeccion: vec![], equivalencias: vec![] },
    ];

    let resultado = ejecutar_analisis(&config, &datos, &mut diagnosticos).unwrap();

    // Sólo queda el consumo de INT-101 con 30 matriculados
    let periodo = &resultado.consumo_por_periodo[0];
    assert_eq!(periodo.horas_semanales.aula, 2.0);
    assert_eq!(periodo.horas_semanales.laboratorio, 6.0);
    assert_eq!(periodo.estudiantes.total, 30);

    // La malla filtrada tampoco aporta el curso excluido al corte por semestre
    assert_eq!(resultado.consumo_por_semestre_academico.len(), 1);
    assert_eq!(resultado.consumo_por_semestre_academico[0].cursos, 1);

    // Ningún ambiente específico menciona el curso cedido
    let json = serde_json::to_string(&resultado).unwrap();
    assert!(!json.contains("MAT-101"));
    assert!(!json.contains("Matemática Básica"));
}

#[test]
fn matricula_sin_curso_en_la_malla_genera_advertencia() {
    let config = config_dos_programas();
    let mut diagnosticos = Diagnosticos::nuevo();

    let datos = vec![
        DatosPrograma {
            malla: vec![curso_intro("INT-101")],
            proyeccion: vec![matricula("INT-101", 30), matricula("XXX-999", 12)],
            equivalencias: vec![],
        },
        DatosPrograma { malla: vec![], proyeccion: vec![], equivalencias: vec![] },
    ];

    let resultado = ejecutar_analisis(&config, &datos, &mut diagnosticos).unwrap();

    assert_eq!(diagnosticos.len(), 1);
    assert_eq!(resultado.advertencias.len(), 1);

    // El registro huérfano aporta cero horas pero no se pierde
    let periodo = &resultado.consumo_por_periodo[0];
    assert_eq!(periodo.horas_semanales.total, 8.0);
}
