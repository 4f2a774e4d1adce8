// Lectura de la proyección de matrícula de un programa.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::diagnostics::{Diagnostico, Diagnosticos};
use crate::error::AnalisisError;
use crate::excel::io::{celda_a_f64, celda_a_i64, celda_a_string, indice_columna, normalize_header, parsear_periodo};
use crate::models::RegistroMatricula;

const TABLA: &str = "proyeccion";

/// Lee la proyección de matrícula. Espera encabezados PERIODO, CODIGO_CURSO,
/// SEMESTRE y TOTAL_MATRICULADOS. El periodo calendario se deriva de la
/// fecha; una matrícula negativa se registra como advertencia y se usa 0.
pub fn leer_proyeccion_excel<P: AsRef<Path>>(
    ruta: P,
    programa: &str,
    diagnosticos: &mut Diagnosticos,
) -> Result<Vec<RegistroMatricula>, AnalisisError> {
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
    let idx_periodo = indice("periodo")?;
    let idx_codigo = indice("codigo_curso")?;
    let idx_semestre = indice("semestre")?;
    let idx_matriculados = indice("total_matriculados")?;

    let celda = |fila: &[Data], idx: usize| fila.get(idx).cloned().unwrap_or(Data::Empty);

    let mut registros = Vec::new();
    for (numero, fila) in filas.enumerate() {
        let codigo = celda_a_string(&celda(fila, idx_codigo));
        if codigo.is_empty() {
            continue;
        }

        let periodo = parsear_periodo(&celda(fila, idx_periodo)).ok_or_else(|| {
            error_lectura(format!(
                "fila {}: PERIODO ilegible para el curso {}",
                numero + 2,
                codigo
            ))
        })?;

        let matriculados = match celda_a_i64(&celda(fila, idx_matriculados)).unwrap_or(0) {
            negativo if negativo < 0 => {
                diagnosticos.registrar(Diagnostico::MatriculaNegativa {
                    programa: programa.to_string(),
                    codigo: codigo.clone(),
                    valor: negativo,
                });
                0
            }
            valor => valor as u32,
        };

        registros.push(RegistroMatricula {
            codigo,
            semestre: celda_a_f64(&celda(fila, idx_semestre)).unwrap_or(0.0) as u32,
            periodo,
            matriculados,
        });
    }

    log::info!("proyección {programa}: {} registros cargados", registros.len());
    Ok(registros)
}
