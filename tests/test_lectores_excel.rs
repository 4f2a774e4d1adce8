// Lectores de Excel: columnas requeridas, periodos ilegibles y matrículas
// negativas, sobre workbooks escritos en un directorio temporal.

use std::path::Path;

use horas_aula::diagnostics::Diagnosticos;
use horas_aula::error::AnalisisError;
use horas_aula::excel::{leer_equivalencias_excel, leer_malla_excel, leer_proyeccion_excel};
use horas_aula::models::Periodo;

fn escribir_hoja(ruta: &Path, filas: &[&[&str]]) {
    let mut libro = umya_spreadsheet::new_file();
    let hoja = libro.get_sheet_mut(&0).unwrap();
    for (f, fila) in filas.iter().enumerate() {
        for (c, valor) in fila.iter().enumerate() {
            hoja.get_cell_mut((c as u32 + 1, f as u32 + 1)).set_value(*valor);
        }
    }
    umya_spreadsheet::writer::xlsx::write(&libro, ruta).unwrap();
}

#[test]
fn malla_lee_horas_y_etiquetas_de_ambiente() {
    let dir = tempfile::tempdir().unwrap();
    let ruta = dir.path().join("malla.xlsx");
    escribir_hoja(
        &ruta,
        &[
            &[
                "CODIGO_CURSO",
                "CURSO",
                "SEMESTRE",
                "HORAS_TEORICAS",
                "HORAS_PRACTICAS",
                "TOTAL_HORAS_SEMANALES",
                "CREDITOS",
                "TIPO_AMBIENTE_PRACTICA",
            ],
            &["INT-101", "Intro", "1", "2", "3", "5", "4", "Laboratorio de Química"],
            &["", "fila sin código, se salta", "", "", "", "", "", ""],
            &["SEM-102", "Seminario", "2", "2", "0", "2", "2", ""],
        ],
    );

    let cursos = leer_malla_excel(&ruta, "C1").unwrap();
    assert_eq!(cursos.len(), 2);
    assert_eq!(cursos[0].codigo, "INT-101");
    assert_eq!(cursos[0].horas_practicas, 3.0);
    assert_eq!(cursos[0].ambiente_practica.as_deref(), Some("Laboratorio de Química"));
    assert_eq!(cursos[0].ambiente_teoria, None);
    assert_eq!(cursos[1].semestre, 2);
    assert_eq!(cursos[1].ambiente_practica, None);
}

#[test]
fn malla_sin_columna_requerida_identifica_tabla_y_programa() {
    let dir = tempfile::tempdir().unwrap();
    let ruta = dir.path().join("malla.xlsx");
    // Falta CREDITOS
    escribir_hoja(
        &ruta,
        &[
            &[
                "CODIGO_CURSO",
                "CURSO",
                "SEMESTRE",
                "HORAS_TEORICAS",
                "HORAS_PRACTICAS",
                "TOTAL_HORAS_SEMANALES",
            ],
            &["INT-101", "Intro", "1", "2", "3", "5"],
        ],
    );

    match leer_malla_excel(&ruta, "C1") {
        Err(AnalisisError::ColumnaFaltante { tabla, programa, columna }) => {
            assert_eq!(tabla, "malla");
            assert_eq!(programa, "C1");
            assert_eq!(columna, "CREDITOS");
        }
        otro => panic!("se esperaba ColumnaFaltante, se obtuvo {otro:?}"),
    }
}

#[test]
fn proyeccion_degrada_matricula_negativa_a_cero_con_advertencia() {
    let dir = tempfile::tempdir().unwrap();
    let ruta = dir.path().join("proyeccion.xlsx");
    escribir_hoja(
        &ruta,
        &[
            &["PERIODO", "CODIGO_CURSO", "SEMESTRE", "TOTAL_MATRICULADOS"],
            &["2024-01-15", "INT-101", "1", "45"],
            &["2024-01-15", "MAT-201", "1", "-5"],
        ],
    );

    let mut diagnosticos = Diagnosticos::nuevo();
    let registros = leer_proyeccion_excel(&ruta, "C1", &mut diagnosticos).unwrap();

    assert_eq!(registros.len(), 2);
    assert_eq!(registros[0].periodo, Periodo { anio: 2024, mes: 1 });
    assert_eq!(registros[0].matriculados, 45);
    // La fila negativa no se descarta: queda con 0 y deja advertencia
    assert_eq!(registros[1].matriculados, 0);
    assert_eq!(diagnosticos.len(), 1);
    assert!(diagnosticos.eventos()[0].mensaje().contains("MAT-201"));
}

#[test]
fn proyeccion_con_periodo_ilegible_es_error_fatal_con_fila() {
    let dir = tempfile::tempdir().unwrap();
    let ruta = dir.path().join("proyeccion.xlsx");
    escribir_hoja(
        &ruta,
        &[
            &["PERIODO", "CODIGO_CURSO", "SEMESTRE", "TOTAL_MATRICULADOS"],
            &["sin fecha", "INT-101", "1", "45"],
        ],
    );

    let mut diagnosticos = Diagnosticos::nuevo();
    match leer_proyeccion_excel(&ruta, "C1", &mut diagnosticos) {
        Err(AnalisisError::LecturaTabla { tabla, programa, detalle }) => {
            assert_eq!(tabla, "proyeccion");
            assert_eq!(programa, "C1");
            assert!(detalle.contains("fila 2"));
            assert!(detalle.contains("INT-101"));
        }
        otro => panic!("se esperaba LecturaTabla, se obtuvo {otro:?}"),
    }
}

#[test]
fn equivalencias_con_celdas_vacias_quedan_como_none() {
    let dir = tempfile::tempdir().unwrap();
    let ruta = dir.path().join("equivalencias.xlsx");
    escribir_hoja(
        &ruta,
        &[
            &[
                "CODIGO_CURSO",
                "CURSO",
                "SEMESTRE",
                "PROGRAMA_EQUIVALENTE",
                "CODIGO_CURSO_EQUIVALENTE",
                "CURSO_EQUIVALENTE",
            ],
            &["INT-101", "Intro", "1", "Ciencias II", "INT-201", "Intro"],
            &["COM-102", "Comunicación", "1", "", "", ""],
        ],
    );

    let filas = leer_equivalencias_excel(&ruta, "C1").unwrap();
    assert_eq!(filas.len(), 2);
    assert_eq!(filas[0].programa_equivalente.as_deref(), Some("Ciencias II"));
    assert_eq!(filas[0].codigo_equivalente.as_deref(), Some("INT-201"));
    assert_eq!(filas[1].programa_equivalente, None);
    assert_eq!(filas[1].codigo_equivalente, None);
    assert_eq!(filas[1].curso_equivalente, None);
}
