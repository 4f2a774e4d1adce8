// Lectura de la tabla de equivalencias de un programa.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::AnalisisError;
use crate::excel::io::{celda_a_f64, celda_a_string, indice_columna, normalize_header};
use crate::models::FilaEquivalencia;

const TABLA: &str = "equivalencias";

/// Lee la tabla de equivalencias. Espera encabezados CODIGO_CURSO, CURSO,
/// SEMESTRE, PROGRAMA_EQUIVALENTE, CODIGO_CURSO_EQUIVALENTE y
/// CURSO_EQUIVALENTE; las celdas de equivalencia pueden estar vacías.
pub fn leer_equivalencias_excel<P: AsRef<Path>>(
    ruta: P,
    programa: &str,
) -> Result<Vec<FilaEquivalencia>, AnalisisError> {
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

    let indice = |columna: &str| {
        indice_columna(&encabezados, columna).ok_or_else(|| AnalisisError::ColumnaFaltante {
            tabla: TABLA.to_string(),
            programa: programa.to_string(),
            columna: columna.to_uppercase(),
        })
    };
    let idx_codigo = indice("codigo_curso")?;
    let idx_curso = indice("curso")?;
    let idx_semestre = indice("semestre")?;
    let idx_programa_eq = indice("programa_equivalente")?;
    let idx_codigo_eq = indice("codigo_curso_equivalente")?;
    let idx_curso_eq = indice("curso_equivalente")?;

    let celda = |fila: &[Data], idx: usize| fila.get(idx).cloned().unwrap_or(Data::Empty);
    let opcional = |fila: &[Data], idx: usize| {
        let valor = celda_a_string(&celda(fila, idx));
        if valor.is_empty() { None } else { Some(valor) }
    };

    let mut equivalencias = Vec::new();
    for fila in filas {
        let codigo = celda_a_string(&celda(fila, idx_codigo));
        if codigo.is_empty() {
            continue;
        }
        equivalencias.push(FilaEquivalencia {
            codigo,
            curso: celda_a_string(&celda(fila, idx_curso)),
            semestre: celda_a_f64(&celda(fila, idx_semestre)).unwrap_or(0.0) as u32,
            programa_equivalente: opcional(fila, idx_programa_eq),
            codigo_equivalente: opcional(fila, idx_codigo_eq),
            curso_equivalente: opcional(fila, idx_curso_eq),
        });
    }

    log::info!("equivalencias {programa}: {} filas cargadas", equivalencias.len());
    Ok(equivalencias)
}
