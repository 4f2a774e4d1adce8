// Taxonomía de errores fatales del análisis.
//
// Los errores de configuración se detectan antes de procesar tabla alguna;
// los de datos de entrada identifican tabla y programa. Las advertencias de
// integridad de datos NO son errores: se acumulan en `Diagnosticos`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalisisError {
    #[error("error de configuración: {0}")]
    Configuracion(String),

    #[error("columna requerida '{columna}' no encontrada en {tabla} del programa {programa}")]
    ColumnaFaltante {
        tabla: String,
        programa: String,
        columna: String,
    },

    #[error("no se pudo leer {tabla} del programa {programa}: {detalle}")]
    LecturaTabla {
        tabla: String,
        programa: String,
        detalle: String,
    },

    #[error("error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("error de serialización JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("error generando reporte Excel: {0}")]
    Reporte(String),
}
