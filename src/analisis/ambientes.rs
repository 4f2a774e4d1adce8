// Clasificación de las horas de un curso en tipos de ambiente.

use std::collections::BTreeMap;

use crate::models::{AmbienteAsignado, CursoMalla, TipoAmbiente};

/// Tabla de cursos cuyas horas publicadas no reflejan el reparto real entre
/// laboratorio y aula. Es un arreglo conocido de calidad de datos: para estos
/// cursos se ignoran las horas de la fila y se usan los pares fijos.
/// Puede sobreescribirse desde la configuración (`cursos_especiales`).
#[derive(Debug, Clone)]
pub struct CursosEspeciales {
    entradas: Vec<(String, Vec<AmbienteAsignado>)>,
}

impl CursosEspeciales {
    pub fn predeterminados() -> CursosEspeciales {
        let lab_fisica = |horas| AmbienteAsignado {
            tipo: TipoAmbiente::Laboratorio("Laboratorio de Física".to_string()),
            horas,
        };
        let lab_quimica = |horas| AmbienteAsignado {
            tipo: TipoAmbiente::Laboratorio("Laboratorio de Química".to_string()),
            horas,
        };
        let aula = |horas| AmbienteAsignado { tipo: TipoAmbiente::Aula, horas };

        let entradas = vec![
            ("Física y Astronomía I".to_string(), vec![lab_fisica(3.0), aula(2.0)]),
            ("Física y Astronomía II".to_string(), vec![lab_fisica(3.0), aula(2.0)]),
            ("Biología".to_string(), vec![lab_quimica(3.0), aula(2.0)]),
            ("Química I".to_string(), vec![lab_quimica(2.0), aula(3.0)]),
            ("Química II".to_string(), vec![lab_quimica(2.0), aula(3.0)]),
            (
                "Didáctica de las Ciencias Naturales I".to_string(),
                vec![lab_quimica(3.0), aula(2.0)],
            ),
            (
                "Didáctica de las Ciencias Naturales II".to_string(),
                vec![lab_fisica(3.0), aula(2.0)],
            ),
        ];
        CursosEspeciales { entradas }
    }

    /// Construye la tabla desde la configuración (nombre → pares etiqueta/horas).
    pub fn desde_config(tabla: &BTreeMap<String, Vec<(String, f64)>>) -> CursosEspeciales {
        let entradas = tabla
            .iter()
            .map(|(nombre, pares)| {
                let ambientes = pares
                    .iter()
                    .map(|(etiqueta, horas)| AmbienteAsignado {
                        tipo: TipoAmbiente::desde_etiqueta(etiqueta),
                        horas: *horas,
                    })
                    .collect();
                (nombre.clone(), ambientes)
            })
            .collect();
        CursosEspeciales { entradas }
    }

    /// Búsqueda por contención, sin distinguir mayúsculas ("Química I" calza
    /// con "Química I (Plan 2020)").
    pub fn buscar(&self, nombre_curso: &str) -> Option<&[AmbienteAsignado]> {
        let nombre_bajo = nombre_curso.to_lowercase();
        self.entradas
            .iter()
            .find(|(especial, _)| nombre_bajo.contains(&especial.to_lowercase()))
            .map(|(_, ambientes)| ambientes.as_slice())
    }
}

/// Expande un curso de la malla en sus asignaciones de ambiente.
///
/// Función pura y total: todo curso produce al menos una asignación, con un
/// placeholder `(Aula, 0)` cuando no declara horas.
pub fn clasificar_ambientes(
    curso: &CursoMalla,
    especiales: &CursosEspeciales,
) -> Vec<AmbienteAsignado> {
    if let Some(ambientes) = especiales.buscar(&curso.nombre) {
        return ambientes.to_vec();
    }

    let mut ambientes = Vec::new();

    if curso.horas_teoricas > 0.0 {
        let tipo = match &curso.ambiente_teoria {
            Some(etiqueta) => TipoAmbiente::desde_etiqueta(etiqueta),
            None => TipoAmbiente::Aula,
        };
        ambientes.push(AmbienteAsignado { tipo, horas: curso.horas_teoricas });
    }

    if curso.horas_practicas > 0.0 {
        let tipo = match &curso.ambiente_practica {
            Some(etiqueta) => TipoAmbiente::desde_etiqueta(etiqueta),
            None => TipoAmbiente::Aula,
        };
        ambientes.push(AmbienteAsignado { tipo, horas: curso.horas_practicas });
    }

    if ambientes.is_empty() {
        ambientes.push(AmbienteAsignado { tipo: TipoAmbiente::Aula, horas: 0.0 });
    }

    ambientes
}
