// Estructuras de datos principales del análisis de horas-aula.
//
// Los registros son tipados y explícitos: la malla y la proyección son
// inmutables tras la carga; `RegistroConsumo` es la única entidad que se
// modifica (y sólo durante la fusión de cursos compartidos).

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

/// Fila de la malla curricular de un programa.
#[derive(Debug, Clone, Serialize)]
pub struct CursoMalla {
    pub codigo: String,
    pub nombre: String,
    pub semestre: u32,
    pub horas_teoricas: f64,
    pub horas_practicas: f64,
    /// Etiqueta de ambiente para las horas teóricas ("Aula", "Virtual", ...).
    pub ambiente_teoria: Option<String>,
    /// Etiqueta de ambiente para las horas prácticas ("Laboratorio de Química", "Taller", ...).
    pub ambiente_practica: Option<String>,
    pub total_horas_semanales: f64,
    pub creditos: f64,
}

/// Categorías agrupadas de ambiente. Los laboratorios específicos colapsan
/// en `Laboratorio`; cualquier etiqueta no reconocida cuenta como `Aula`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoriaAmbiente {
    Aula,
    Laboratorio,
    Taller,
    Virtual,
}

impl CategoriaAmbiente {
    pub fn nombre(&self) -> &'static str {
        match self {
            CategoriaAmbiente::Aula => "aula",
            CategoriaAmbiente::Laboratorio => "laboratorio",
            CategoriaAmbiente::Taller => "taller",
            CategoriaAmbiente::Virtual => "virtual",
        }
    }

    pub const TODAS: [CategoriaAmbiente; 4] = [
        CategoriaAmbiente::Aula,
        CategoriaAmbiente::Laboratorio,
        CategoriaAmbiente::Taller,
        CategoriaAmbiente::Virtual,
    ];
}

/// Tipo de ambiente específico de una asignación de horas.
///
/// Los laboratorios conservan su nombre completo ("Laboratorio de Física")
/// porque el detalle por ambiente específico los reporta por separado.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TipoAmbiente {
    Aula,
    Laboratorio(String),
    Taller,
    Virtual,
    /// Etiqueta no reconocida, conservada verbatim.
    Otro(String),
}

impl TipoAmbiente {
    /// Clasifica una etiqueta de ambiente tal como aparece en la malla.
    /// Una etiqueta vacía o ausente se trata como Aula.
    pub fn desde_etiqueta(etiqueta: &str) -> TipoAmbiente {
        let limpia = etiqueta.trim();
        if limpia.is_empty() {
            return TipoAmbiente::Aula;
        }
        let bajo = limpia.to_lowercase();
        if bajo.contains("laboratorio") {
            TipoAmbiente::Laboratorio(limpia.to_string())
        } else if bajo == "taller" {
            TipoAmbiente::Taller
        } else if bajo == "virtual" {
            TipoAmbiente::Virtual
        } else if bajo == "aula" {
            TipoAmbiente::Aula
        } else {
            TipoAmbiente::Otro(limpia.to_string())
        }
    }

    /// Etiqueta exacta del ambiente, como se reporta en el detalle específico.
    pub fn etiqueta(&self) -> String {
        match self {
            TipoAmbiente::Aula => "Aula".to_string(),
            TipoAmbiente::Laboratorio(nombre) => nombre.clone(),
            TipoAmbiente::Taller => "Taller".to_string(),
            TipoAmbiente::Virtual => "Virtual".to_string(),
            TipoAmbiente::Otro(etiqueta) => etiqueta.clone(),
        }
    }

    pub fn categoria(&self) -> CategoriaAmbiente {
        match self {
            TipoAmbiente::Aula | TipoAmbiente::Otro(_) => CategoriaAmbiente::Aula,
            TipoAmbiente::Laboratorio(_) => CategoriaAmbiente::Laboratorio,
            TipoAmbiente::Taller => CategoriaAmbiente::Taller,
            TipoAmbiente::Virtual => CategoriaAmbiente::Virtual,
        }
    }
}

impl Serialize for TipoAmbiente {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.etiqueta())
    }
}

/// Horas semanales de un curso asignadas a un tipo de ambiente.
/// Un curso produce 0..2 asignaciones (teoría y práctica), con al menos
/// una fila placeholder `(Aula, 0)` cuando no declara horas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmbienteAsignado {
    pub tipo: TipoAmbiente,
    pub horas: f64,
}

/// Periodo calendario: año + mes de inicio. Enero corresponde al ciclo I,
/// cualquier otro mes al ciclo II.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Periodo {
    pub anio: i32,
    pub mes: u32,
}

impl Periodo {
    pub fn desde_fecha(fecha: NaiveDate) -> Periodo {
        Periodo { anio: fecha.year(), mes: fecha.month() }
    }

    pub fn ciclo(&self) -> &'static str {
        if self.mes == 1 { "I" } else { "II" }
    }

    pub fn cadena(&self) -> String {
        format!("{:04}-{:02}", self.anio, self.mes)
    }
}

impl Serialize for Periodo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.cadena())
    }
}

/// Fila de la proyección de matrícula de un programa.
#[derive(Debug, Clone, Serialize)]
pub struct RegistroMatricula {
    pub codigo: String,
    pub semestre: u32,
    pub periodo: Periodo,
    pub matriculados: u32,
}

/// Fila de la tabla de equivalencias de un programa.
#[derive(Debug, Clone, Serialize)]
pub struct FilaEquivalencia {
    pub codigo: String,
    pub curso: String,
    pub semestre: u32,
    pub programa_equivalente: Option<String>,
    pub codigo_equivalente: Option<String>,
    pub curso_equivalente: Option<String>,
}

/// Curso confirmado como compartido entre dos programas (referencias de
/// equivalencia mutuas con nombres idénticos). Inmutable una vez construido.
#[derive(Debug, Clone, Serialize)]
pub struct CursoCompartido {
    pub nombre: String,
    pub codigo_a: String,
    pub codigo_b: String,
    pub semestre_a: u32,
    pub semestre_b: u32,
}

/// Registro de consumo por (curso, periodo, ambiente específico).
///
/// Entidad central del análisis: se crea en el procesamiento del programa y
/// sólo la fusión de cursos compartidos puede modificar `matriculados`,
/// `secciones` y `horas_totales` (o eliminar el registro duplicado).
#[derive(Debug, Clone, Serialize)]
pub struct RegistroConsumo {
    pub programa: String,
    pub codigo: String,
    pub curso: String,
    pub semestre: u32,
    pub periodo: Periodo,
    pub ambiente: TipoAmbiente,
    pub horas_semanales: f64,
    pub matriculados: u32,
    pub secciones: u32,
    pub horas_totales: f64,
}
