// Colector de advertencias de integridad de datos.
//
// Reemplaza al logger global: cada componente recibe `&mut Diagnosticos` y
// registra eventos tipados; el resultado final los expone como advertencias.
// Cada evento pasa además por la fachada `log`.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tipo", rename_all = "snake_case")]
pub enum Diagnostico {
    /// Equivalencia mutua cuyos nombres de curso no coinciden textualmente.
    /// El par NO se fusiona (protege de colisiones código-igual/curso-distinto).
    NombresNoCoinciden {
        codigo: String,
        nombre: String,
        nombre_equivalente: String,
        similitud: f64,
    },
    /// Fila de proyección sin curso correspondiente en la malla expandida.
    MatriculaSinMalla {
        programa: String,
        codigo: String,
        periodo: String,
    },
    /// Matrícula negativa en la proyección; la fila se conserva con 0.
    MatriculaNegativa {
        programa: String,
        codigo: String,
        valor: i64,
    },
    /// Curso compartido sin registros en uno de los dos programas.
    CompartidoSinDatos { nombre: String },
}

impl Diagnostico {
    pub fn mensaje(&self) -> String {
        match self {
            Diagnostico::NombresNoCoinciden { codigo, nombre, nombre_equivalente, similitud } => {
                format!(
                    "equivalencia no fusionada: nombres no coinciden para {codigo}: '{nombre}' vs '{nombre_equivalente}' (similitud {similitud:.2})"
                )
            }
            Diagnostico::MatriculaSinMalla { programa, codigo, periodo } => {
                format!("proyección {programa}: curso {codigo} ({periodo}) sin fila en la malla; registro con 0 horas")
            }
            Diagnostico::MatriculaNegativa { programa, codigo, valor } => {
                format!("proyección {programa}: matrícula negativa ({valor}) en curso {codigo}; se usa 0")
            }
            Diagnostico::CompartidoSinDatos { nombre } => {
                format!("curso compartido '{nombre}' sin datos en ambos programas; no se fusiona")
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct Diagnosticos {
    eventos: Vec<Diagnostico>,
}

impl Diagnosticos {
    pub fn nuevo() -> Diagnosticos {
        Diagnosticos::default()
    }

    pub fn registrar(&mut self, evento: Diagnostico) {
        log::warn!("{}", evento.mensaje());
        self.eventos.push(evento);
    }

    pub fn eventos(&self) -> &[Diagnostico] {
        &self.eventos
    }

    pub fn len(&self) -> usize {
        self.eventos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eventos.is_empty()
    }
}
