//! Módulo `excel`: lectura de las tres tablas de entrada y escritura del
//! reporte de verificación.
//!
//! Submódulos:
//! - `io`: helpers de parseo de celdas y encabezados
//! - `malla`: lectura de mallas curriculares
//! - `proyeccion`: lectura de proyecciones de matrícula
//! - `equivalencias`: lectura de tablas de equivalencias
//! - `reporte`: generación del workbook de verificación

mod io;

mod equivalencias;
mod malla;
mod proyeccion;
pub mod reporte;

pub use equivalencias::leer_equivalencias_excel;
pub use malla::leer_malla_excel;
pub use proyeccion::leer_proyeccion_excel;
pub use reporte::generar_reporte_excel;

use crate::analisis::DatosPrograma;
use crate::config::Configuracion;
use crate::diagnostics::Diagnosticos;
use crate::error::AnalisisError;

/// Carga las tres tablas de cada programa declarado en la configuración,
/// en el mismo orden que `config.programas`. Cualquier archivo ilegible o
/// tabla malformada detiene la carga completa.
pub fn cargar_datos_programas(
    config: &Configuracion,
    diagnosticos: &mut Diagnosticos,
) -> Result<Vec<DatosPrograma>, AnalisisError> {
    let mut datos = Vec::with_capacity(config.programas.len());
    for programa in &config.programas {
        log::info!("cargando tablas del programa {}", programa.id);
        let malla = leer_malla_excel(&programa.archivos.malla, &programa.id)?;
        let proyeccion =
            leer_proyeccion_excel(&programa.archivos.proyeccion, &programa.id, diagnosticos)?;
        let equivalencias =
            leer_equivalencias_excel(&programa.archivos.equivalencias, &programa.id)?;
        datos.push(DatosPrograma { malla, proyeccion, equivalencias });
    }
    Ok(datos)
}
