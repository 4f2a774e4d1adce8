// Lectura de la malla curricular de un programa.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::AnalisisError;
use crate::excel::io::{celda_a_f64, celda_a_string, indice_columna, normalize_header};
use crate::models::CursoMalla;

const TABLA: &str = "malla";

const COLUMNAS_REQUERIDAS: [&str; 7] = [
    "codigo_curso",
    "curso",
    "semestre",
    "horas_teoricas",
    "horas_practicas",
    "total_horas_semanales",
    "creditos",
];

/// Lee la malla curricular. Espera encabezados CODIGO_CURSO, CURSO, SEMESTRE,
/// HORAS_TEORICAS, HORAS_PRACTICAS, TOTAL_HORAS_SEMANALES, CREDITOS y,
/// opcionalmente, TIPO_AMBIENTE_TEORIA / TIPO_AMBIENTE_PRACTICA.
pub fn leer_malla_excel<P: AsRef<Path>>(
    ruta: P,
    programa: &str,
) -> Result<Vec<CursoMalla>, AnalisisError> {
    let error_lectura = |detalle: String| AnalisisError::LecturaTabla {
        tabla: TABLA.to_string(),
        programa: programa.to_string(),
        detalle,
    };

    let mut workbook = open_workbook_auto(&ruta).map_err(|e| error_lectura(e.to_string()))?;
    let sheet_names = workbook.sheet_names().to_owned();
    let primera = sheet_names
        .first()
        .ok_or_else(|| error_lectura("el archivo no tiene hojas".to_string()))?;
    let range = workbook
        .worksheet_range(primera)
        .map_err(|e| error_lectura(e.to_string()))?;

    let mut filas = range.rows();
    let encabezados: Vec<String> = filas
        .next()
        .ok_or_else(|| error_lectura("hoja vacía".to_string()))?
        .iter()
        .map(|c| normalize_header(&celda_a_string(c)))
        .collect();

    let mut indices = [0usize; 7];
    for (pos, columna) in COLUMNAS_REQUERIDAS.iter().enumerate() {
        indices[pos] = indice_columna(&encabezados, columna).ok_or_else(|| {
            AnalisisError::ColumnaFaltante {
                tabla: TABLA.to_string(),
                programa: programa.to_string(),
                columna: columna.to_uppercase(),
            }
        })?;
    }
    let [idx_codigo, idx_curso, idx_semestre, idx_teoricas, idx_practicas, idx_total, idx_creditos] =
        indices;
    let idx_amb_teoria = indice_columna(&encabezados, "tipo_ambiente_teoria");
    let idx_amb_practica = indice_columna(&encabezados, "tipo_ambiente_practica");

    let celda = |fila: &[Data], idx: usize| fila.get(idx).cloned().unwrap_or(Data::Empty);
    let etiqueta = |fila: &[Data], idx: Option<usize>| {
        idx.map(|i| celda_a_string(&celda(fila, i)))
            .filter(|s| !s.is_empty())
    };

    let mut cursos = Vec::new();
    for fila in filas {
        let codigo = celda_a_string(&celda(fila, idx_codigo));
        if codigo.is_empty() {
            continue;
        }
        cursos.push(CursoMalla {
            codigo,
            nombre: celda_a_string(&celda(fila, idx_curso)),
            semestre: celda_a_f64(&celda(fila, idx_semestre)).unwrap_or(0.0) as u32,
            horas_teoricas: celda_a_f64(&celda(fila, idx_teoricas)).unwrap_or(0.0),
            horas_practicas: celda_a_f64(&celda(fila, idx_practicas)).unwrap_or(0.0),
            ambiente_teoria: etiqueta(fila, idx_amb_teoria),
            ambiente_practica: etiqueta(fila, idx_amb_practica),
            total_horas_semanales: celda_a_f64(&celda(fila, idx_total)).unwrap_or(0.0),
            creditos: celda_a_f64(&celda(fila, idx_creditos)).unwrap_or(0.0),
        });
    }

    log::info!("malla {programa}: {} cursos cargados", cursos.len());
    Ok(cursos)
}
