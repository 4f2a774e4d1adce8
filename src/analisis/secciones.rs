// Cálculo de secciones paralelas según la capacidad del ambiente.

use crate::config::Parametros;
use crate::models::{CategoriaAmbiente, TipoAmbiente};

/// Número de secciones necesarias para `matriculados` estudiantes en un
/// ambiente dado.
///
/// - 0 matriculados → 0 secciones.
/// - Virtual nunca se subdivide: siempre 1 sección.
/// - Cualquier laboratorio usa la capacidad de laboratorio, sin importar
///   cuál laboratorio específico sea.
/// - Etiquetas no reconocidas caen a la capacidad de aula.
///
/// Las capacidades llegan validadas como positivas desde la configuración.
pub fn calcular_secciones(matriculados: u32, ambiente: &TipoAmbiente, parametros: &Parametros) -> u32 {
    if matriculados == 0 {
        return 0;
    }

    let capacidad = match ambiente.categoria() {
        CategoriaAmbiente::Virtual => return 1,
        CategoriaAmbiente::Aula => parametros.tamano_seccion_aula,
        CategoriaAmbiente::Laboratorio => parametros.tamano_seccion_laboratorio,
        CategoriaAmbiente::Taller => parametros.tamano_seccion_taller,
    };

    matriculados.div_ceil(capacidad)
}
