// Carga y validación de la configuración del análisis (config.json).
//
// La validación corre completa antes de tocar tabla alguna: una capacidad en
// cero o una sección ausente es error fatal de configuración.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AnalisisError;

#[derive(Debug, Clone, Deserialize)]
pub struct Configuracion {
    pub metadata: Metadata,
    pub parametros: Parametros,
    /// Programas en orden de precedencia: el primero es el lado primario
    /// de toda fusión de cursos compartidos.
    pub programas: Vec<ProgramaConfig>,
    pub salida: Salida,
    /// Tabla opcional de cursos especiales: nombre → pares (etiqueta, horas).
    /// Si falta, se usa la tabla predeterminada de `analisis::ambientes`.
    #[serde(default)]
    pub cursos_especiales: Option<BTreeMap<String, Vec<(String, f64)>>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    pub carrera: String,
    pub fecha_analisis: String,
    /// Programa anfitrión excluido: los cursos equivalenciados hacia él se
    /// retiran por completo del análisis (su carga se contabiliza allá).
    pub programa_excluido: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parametros {
    pub tamano_seccion_aula: u32,
    pub tamano_seccion_laboratorio: u32,
    pub tamano_seccion_taller: u32,
    pub semanas_por_semestre: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgramaConfig {
    /// Identificador corto del programa (ej. "LLYA").
    pub id: String,
    /// Nombre con el que otros programas lo referencian en sus tablas de
    /// equivalencias (ej. "Educación LLYA").
    pub nombre_equivalencia: String,
    pub archivos: ArchivosPrograma,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArchivosPrograma {
    pub malla: String,
    pub proyeccion: String,
    pub equivalencias: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Salida {
    pub json: String,
    pub excel: String,
}

impl Configuracion {
    /// Carga el JSON de configuración y lo valida.
    pub fn cargar<P: AsRef<Path>>(ruta: P) -> Result<Configuracion, AnalisisError> {
        let ruta = ruta.as_ref();
        let contenido = fs::read_to_string(ruta).map_err(|e| {
            AnalisisError::Configuracion(format!("no se pudo leer {}: {}", ruta.display(), e))
        })?;
        let config: Configuracion = serde_json::from_str(&contenido).map_err(|e| {
            AnalisisError::Configuracion(format!("{} inválido: {}", ruta.display(), e))
        })?;
        config.validar()?;
        Ok(config)
    }

    /// Verifica capacidades positivas, programas bien formados y salidas.
    pub fn validar(&self) -> Result<(), AnalisisError> {
        let p = &self.parametros;
        for (nombre, valor) in [
            ("tamano_seccion_aula", p.tamano_seccion_aula),
            ("tamano_seccion_laboratorio", p.tamano_seccion_laboratorio),
            ("tamano_seccion_taller", p.tamano_seccion_taller),
            ("semanas_por_semestre", p.semanas_por_semestre),
        ] {
            if valor == 0 {
                return Err(AnalisisError::Configuracion(format!(
                    "parámetro '{nombre}' debe ser un entero positivo"
                )));
            }
        }

        if self.programas.is_empty() {
            return Err(AnalisisError::Configuracion(
                "la lista 'programas' está vacía".to_string(),
            ));
        }

        let mut ids: HashSet<&str> = HashSet::new();
        for programa in &self.programas {
            if programa.id.trim().is_empty() {
                return Err(AnalisisError::Configuracion(
                    "programa con 'id' vacío".to_string(),
                ));
            }
            if !ids.insert(programa.id.as_str()) {
                return Err(AnalisisError::Configuracion(format!(
                    "programa '{}' duplicado",
                    programa.id
                )));
            }
            for (campo, ruta) in [
                ("malla", &programa.archivos.malla),
                ("proyeccion", &programa.archivos.proyeccion),
                ("equivalencias", &programa.archivos.equivalencias),
            ] {
                if ruta.trim().is_empty() {
                    return Err(AnalisisError::Configuracion(format!(
                        "programa '{}' sin archivo de {campo}",
                        programa.id
                    )));
                }
            }
        }

        if self.metadata.programa_excluido.trim().is_empty() {
            return Err(AnalisisError::Configuracion(
                "'programa_excluido' no puede estar vacío".to_string(),
            ));
        }

        Ok(())
    }

    pub fn ids_programas(&self) -> Vec<String> {
        self.programas.iter().map(|p| p.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_base() -> Configuracion {
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
                    "id": "LLYA",
                    "nombre_equivalencia": "Educación LLYA",
                    "archivos": {
                        "malla": "malla_llya.xlsx",
                        "proyeccion": "proyeccion_llya.xlsx",
                        "equivalencias": "equivalencias_llya.xlsx"
                    }
                }
            ],
            "salida": { "json": "resultado.json", "excel": "reporte.xlsx" }
        }"#;
        serde_json::from_str(texto).expect("configuración de prueba")
    }

    #[test]
    fn configuracion_valida_pasa() {
        assert!(config_base().validar().is_ok());
    }

    #[test]
    fn capacidad_cero_es_error_de_configuracion() {
        let mut config = config_base();
        config.parametros.tamano_seccion_laboratorio = 0;
        let err = config.validar().unwrap_err();
        assert!(err.to_string().contains("tamano_seccion_laboratorio"));
    }

    #[test]
    fn programa_sin_archivos_es_error() {
        let mut config = config_base();
        config.programas[0].archivos.equivalencias = String::new();
        assert!(config.validar().is_err());
    }
}
