//! Análisis de consumo de horas-aula para programas académicos.
//!
//! A partir de una configuración JSON y de tres tablas Excel por programa
//! (malla curricular, proyección de matrícula y equivalencias), calcula el
//! consumo de ambientes físicos por periodo, semestre académico y año,
//! reconciliando los cursos compartidos entre programas para no contarlos
//! dos veces.

pub mod analisis;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod excel;
pub mod models;

pub use analisis::resumen::ResultadoAnalisis;
pub use analisis::{ejecutar_analisis, DatosPrograma};
pub use config::Configuracion;
pub use diagnostics::{Diagnostico, Diagnosticos};
pub use error::AnalisisError;

/// Pipeline completo: carga las tablas de todos los programas y corre el
/// análisis. Los diagnósticos acumulados viajan junto al resultado.
pub fn ejecutar_analisis_completo(
    config: &Configuracion,
) -> Result<(ResultadoAnalisis, Diagnosticos), AnalisisError> {
    let mut diagnosticos = Diagnosticos::nuevo();
    let datos = excel::cargar_datos_programas(config, &mut diagnosticos)?;
    let resultado = analisis::ejecutar_analisis(config, &datos, &mut diagnosticos)?;
    Ok((resultado, diagnosticos))
}
