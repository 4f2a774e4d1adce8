// Agregación del consumo: resúmenes por periodo, semestre académico y año,
// detalle por ambiente específico y periodo pico.
//
// Toda agrupación usa llaves ordenadas (BTreeMap/BTreeSet): dos corridas
// sobre la misma entrada producen salida byte-idéntica.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use crate::config::{Configuracion, Parametros};
use crate::diagnostics::{Diagnostico, Diagnosticos};
use crate::models::{CategoriaAmbiente, CursoMalla, Periodo, RegistroConsumo};

/// Redondeo a 2 decimales: los números salen como valores fijos, sin
/// residuos de coma flotante.
pub fn redondear2(valor: f64) -> f64 {
    (valor * 100.0).round() / 100.0
}

fn promedio<'a, I: Iterator<Item = &'a f64>>(valores: I) -> f64 {
    let (suma, cuenta) = valores.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if cuenta == 0 { 0.0 } else { suma / cuenta as f64 }
}

/// Horas (o métrica análoga) desglosadas en las cuatro categorías agrupadas.
/// El campo `total` es derivado: siempre igual a la suma de las categorías.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HorasPorCategoria {
    pub aula: f64,
    pub laboratorio: f64,
    pub taller: f64,
    #[serde(rename = "virtual")]
    pub virtual_: f64,
    pub total: f64,
}

impl HorasPorCategoria {
    fn agregar(&mut self, categoria: CategoriaAmbiente, horas: f64) {
        match categoria {
            CategoriaAmbiente::Aula => self.aula += horas,
            CategoriaAmbiente::Laboratorio => self.laboratorio += horas,
            CategoriaAmbiente::Taller => self.taller += horas,
            CategoriaAmbiente::Virtual => self.virtual_ += horas,
        }
    }

    fn acumular(&mut self, otro: &HorasPorCategoria) {
        self.aula += otro.aula;
        self.laboratorio += otro.laboratorio;
        self.taller += otro.taller;
        self.virtual_ += otro.virtual_;
    }

    fn totalizar(&mut self) {
        self.total = self.aula + self.laboratorio + self.taller + self.virtual_;
    }

    fn escalada(&self, factor: f64) -> HorasPorCategoria {
        HorasPorCategoria {
            aula: self.aula * factor,
            laboratorio: self.laboratorio * factor,
            taller: self.taller * factor,
            virtual_: self.virtual_ * factor,
            total: self.total * factor,
        }
    }

    fn redondeada(&self) -> HorasPorCategoria {
        HorasPorCategoria {
            aula: redondear2(self.aula),
            laboratorio: redondear2(self.laboratorio),
            taller: redondear2(self.taller),
            virtual_: redondear2(self.virtual_),
            total: redondear2(self.total),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SeccionesPorCategoria {
    pub aula: u32,
    pub laboratorio: u32,
    pub taller: u32,
    #[serde(rename = "virtual")]
    pub virtual_: u32,
    pub total: u32,
}

impl SeccionesPorCategoria {
    fn agregar(&mut self, categoria: CategoriaAmbiente, secciones: u32) {
        match categoria {
            CategoriaAmbiente::Aula => self.aula += secciones,
            CategoriaAmbiente::Laboratorio => self.laboratorio += secciones,
            CategoriaAmbiente::Taller => self.taller += secciones,
            CategoriaAmbiente::Virtual => self.virtual_ += secciones,
        }
    }

    fn acumular(&mut self, otro: &SeccionesPorCategoria) {
        self.aula += otro.aula;
        self.laboratorio += otro.laboratorio;
        self.taller += otro.taller;
        self.virtual_ += otro.virtual_;
    }

    fn totalizar(&mut self) {
        self.total = self.aula + self.laboratorio + self.taller + self.virtual_;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EstudiantesPeriodo {
    pub total: u32,
    pub por_programa: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetallePrograma {
    pub estudiantes: u32,
    pub horas_semanales: HorasPorCategoria,
    pub secciones: SeccionesPorCategoria,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumenPeriodo {
    pub periodo: String,
    #[serde(rename = "año")]
    pub anio: i32,
    pub ciclo: String,
    pub estudiantes: EstudiantesPeriodo,
    pub horas_semanales: HorasPorCategoria,
    /// Horas semanales × semanas por semestre.
    pub horas_semestre: HorasPorCategoria,
    pub secciones: SeccionesPorCategoria,
    pub detalle_por_programa: BTreeMap<String, DetallePrograma>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EstadisticasSemestre {
    pub promedio_estudiantes: f64,
    pub maximo_estudiantes: u32,
    pub minimo_estudiantes: u32,
    pub promedio_secciones: f64,
    pub promedio_horas_semanales: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DistribucionAmbiente {
    pub horas_semanales: f64,
    pub porcentaje: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumenSemestre {
    pub semestre: u32,
    pub cursos: usize,
    pub creditos_totales: i64,
    /// Horas nominales de la malla, no del consumo.
    pub horas_curso_semanales: i64,
    pub estadisticas: EstadisticasSemestre,
    pub distribucion_tipo_ambiente: BTreeMap<String, DistribucionAmbiente>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromedioSemanal {
    pub ciclo_i: f64,
    pub ciclo_ii: f64,
    pub promedio: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumenAnio {
    #[serde(rename = "año")]
    pub anio: i32,
    /// Máximo de matrícula entre los dos ciclos, nunca la suma: un
    /// estudiante matriculado en ambos ciclos es un solo estudiante.
    #[serde(rename = "total_estudiantes_año")]
    pub total_estudiantes: u32,
    pub horas_anuales: HorasPorCategoria,
    pub promedio_semanal: PromedioSemanal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsumoAmbiente {
    pub horas_semanales: f64,
    pub secciones: u32,
    pub horas_semestre: f64,
}

/// Consumo por ambiente específico (sin agrupar): los laboratorios
/// distintos se reportan por separado.
#[derive(Debug, Clone, Serialize)]
pub struct DetalleAmbientes {
    pub periodo: String,
    pub ambientes: BTreeMap<String, ConsumoAmbiente>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodoPico {
    pub periodo: String,
    pub horas_semanales_totales: f64,
    pub estudiantes: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumenTotal {
    pub periodo_pico: PeriodoPico,
    pub distribucion_pico: HorasPorCategoria,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetadataResultado {
    pub carrera: String,
    pub programas: Vec<String>,
    pub fecha_analisis: String,
    pub periodo_proyeccion: String,
    pub parametros: Parametros,
}

/// Resultado completo del análisis, tal como se serializa a JSON y se
/// vuelca al reporte Excel.
#[derive(Debug, Clone, Serialize)]
pub struct ResultadoAnalisis {
    pub metadata: MetadataResultado,
    pub resumen_total: ResumenTotal,
    pub consumo_por_periodo: Vec<ResumenPeriodo>,
    pub consumo_por_semestre_academico: Vec<ResumenSemestre>,
    #[serde(rename = "consumo_por_año")]
    pub consumo_por_anio: Vec<ResumenAnio>,
    pub detalle_ambientes_especificos: Vec<DetalleAmbientes>,
    pub advertencias: Vec<Diagnostico>,
}

fn registros_de<'a>(
    resultados: &'a HashMap<String, Vec<RegistroConsumo>>,
    orden: &'a [String],
) -> impl Iterator<Item = &'a RegistroConsumo> {
    orden.iter().flat_map(move |id| resultados.get(id).into_iter().flatten())
}

/// Resumen por periodo calendario, con totales agrupados y detalle por
/// programa. La matrícula por programa es el máximo entre sus cursos del
/// periodo (tamaño de cohorte, no suma de inscripciones).
pub fn generar_resumen_por_periodo(
    resultados: &HashMap<String, Vec<RegistroConsumo>>,
    orden: &[String],
    parametros: &Parametros,
) -> Vec<ResumenPeriodo> {
    let periodos: BTreeSet<Periodo> =
        registros_de(resultados, orden).map(|r| r.periodo).collect();

    let mut resumenes = Vec::new();
    for periodo in periodos {
        let mut horas = HorasPorCategoria::default();
        let mut secciones = SeccionesPorCategoria::default();
        let mut por_programa = BTreeMap::new();
        let mut detalle = BTreeMap::new();
        let mut total_estudiantes = 0u32;

        for id in orden {
            let del_periodo: Vec<&RegistroConsumo> = resultados
                .get(id)
                .into_iter()
                .flatten()
                .filter(|r| r.periodo == periodo)
                .collect();
            if del_periodo.is_empty() {
                continue;
            }

            let estudiantes = del_periodo.iter().map(|r| r.matriculados).max().unwrap_or(0);
            total_estudiantes += estudiantes;

            let mut horas_programa = HorasPorCategoria::default();
            let mut secciones_programa = SeccionesPorCategoria::default();
            for registro in &del_periodo {
                let categoria = registro.ambiente.categoria();
                horas_programa.agregar(categoria, registro.horas_totales);
                secciones_programa.agregar(categoria, registro.secciones);
            }
            horas_programa.totalizar();
            secciones_programa.totalizar();

            horas.acumular(&horas_programa);
            secciones.acumular(&secciones_programa);
            por_programa.insert(id.clone(), estudiantes);
            detalle.insert(
                id.clone(),
                DetallePrograma {
                    estudiantes,
                    horas_semanales: horas_programa.redondeada(),
                    secciones: secciones_programa,
                },
            );
        }

        horas.totalizar();
        secciones.totalizar();
        let horas_semestre = horas.escalada(parametros.semanas_por_semestre as f64);

        resumenes.push(ResumenPeriodo {
            periodo: periodo.cadena(),
            anio: periodo.anio,
            ciclo: periodo.ciclo().to_string(),
            estudiantes: EstudiantesPeriodo { total: total_estudiantes, por_programa },
            horas_semanales: horas.redondeada(),
            horas_semestre: horas_semestre.redondeada(),
            secciones,
            detalle_por_programa: detalle,
        });
    }
    resumenes
}

/// Resumen por semestre académico (1..=10). Los semestres sin datos se
/// omiten, no se rellenan con ceros. Los datos nominales (cursos, créditos,
/// horas de malla) vienen de la malla ya filtrada por exclusiones.
pub fn generar_resumen_por_semestre(
    resultados: &HashMap<String, Vec<RegistroConsumo>>,
    orden: &[String],
    mallas: &[CursoMalla],
) -> Vec<ResumenSemestre> {
    let mut resumenes = Vec::new();
    for semestre in 1..=10u32 {
        let registros: Vec<&RegistroConsumo> =
            registros_de(resultados, orden).filter(|r| r.semestre == semestre).collect();
        if registros.is_empty() {
            continue;
        }

        let cursos_malla: Vec<&CursoMalla> =
            mallas.iter().filter(|c| c.semestre == semestre).collect();

        let n = registros.len() as f64;
        let promedio_estudiantes =
            registros.iter().map(|r| r.matriculados as f64).sum::<f64>() / n;
        let maximo = registros.iter().map(|r| r.matriculados).max().unwrap_or(0);
        let minimo = registros.iter().map(|r| r.matriculados).min().unwrap_or(0);
        let promedio_secciones = registros.iter().map(|r| r.secciones as f64).sum::<f64>() / n;

        let mut horas_por_periodo: BTreeMap<Periodo, f64> = BTreeMap::new();
        for registro in &registros {
            *horas_por_periodo.entry(registro.periodo).or_default() += registro.horas_totales;
        }
        let promedio_horas = promedio(horas_por_periodo.values());

        let mut distribucion = BTreeMap::new();
        for categoria in CategoriaAmbiente::TODAS {
            let mut por_periodo: BTreeMap<Periodo, f64> = BTreeMap::new();
            for registro in
                registros.iter().filter(|r| r.ambiente.categoria() == categoria)
            {
                *por_periodo.entry(registro.periodo).or_default() += registro.horas_totales;
            }
            let horas_promedio = promedio(por_periodo.values());
            let porcentaje = if promedio_horas > 0.0 {
                horas_promedio / promedio_horas * 100.0
            } else {
                0.0
            };
            distribucion.insert(
                categoria.nombre().to_string(),
                DistribucionAmbiente {
                    horas_semanales: redondear2(horas_promedio),
                    porcentaje: redondear2(porcentaje),
                },
            );
        }

        resumenes.push(ResumenSemestre {
            semestre,
            cursos: cursos_malla.len(),
            creditos_totales: cursos_malla.iter().map(|c| c.creditos).sum::<f64>().round() as i64,
            horas_curso_semanales: cursos_malla
                .iter()
                .map(|c| c.total_horas_semanales)
                .sum::<f64>()
                .round() as i64,
            estadisticas: EstadisticasSemestre {
                promedio_estudiantes: redondear2(promedio_estudiantes),
                maximo_estudiantes: maximo,
                minimo_estudiantes: minimo,
                promedio_secciones: redondear2(promedio_secciones),
                promedio_horas_semanales: redondear2(promedio_horas),
            },
            distribucion_tipo_ambiente: distribucion,
        });
    }
    resumenes
}

/// Resumen por año calendario: horas anualizadas (semanales × semanas por
/// semestre, sumando ambos ciclos) y matrícula anual como máximo entre
/// ciclos.
pub fn generar_resumen_por_anio(
    resultados: &HashMap<String, Vec<RegistroConsumo>>,
    orden: &[String],
    parametros: &Parametros,
) -> Vec<ResumenAnio> {
    let anios: BTreeSet<i32> =
        registros_de(resultados, orden).map(|r| r.periodo.anio).collect();

    let mut resumenes = Vec::new();
    for anio in anios {
        let del_anio: Vec<&RegistroConsumo> =
            registros_de(resultados, orden).filter(|r| r.periodo.anio == anio).collect();

        let maximo_ciclo = |ciclo: &str| {
            del_anio
                .iter()
                .filter(|r| r.periodo.ciclo() == ciclo)
                .map(|r| r.matriculados)
                .max()
                .unwrap_or(0)
        };
        let total_estudiantes = maximo_ciclo("I").max(maximo_ciclo("II"));

        let mut horas = HorasPorCategoria::default();
        for registro in &del_anio {
            horas.agregar(registro.ambiente.categoria(), registro.horas_totales);
        }
        horas.totalizar();
        let horas_anuales = horas.escalada(parametros.semanas_por_semestre as f64).redondeada();

        let promedio_ciclo = |ciclo: &str| {
            let mut por_periodo: BTreeMap<Periodo, f64> = BTreeMap::new();
            for registro in del_anio.iter().filter(|r| r.periodo.ciclo() == ciclo) {
                *por_periodo.entry(registro.periodo).or_default() += registro.horas_totales;
            }
            promedio(por_periodo.values())
        };
        let ciclo_i = promedio_ciclo("I");
        let ciclo_ii = promedio_ciclo("II");

        resumenes.push(ResumenAnio {
            anio,
            total_estudiantes,
            horas_anuales,
            promedio_semanal: PromedioSemanal {
                ciclo_i: redondear2(ciclo_i),
                ciclo_ii: redondear2(ciclo_ii),
                promedio: redondear2((ciclo_i + ciclo_ii) / 2.0),
            },
        });
    }
    resumenes
}

/// Detalle por ambiente específico: agrupa estrictamente por la etiqueta
/// exacta del ambiente. Existe porque la vista de cuatro categorías colapsa
/// los laboratorios que los consumidores necesitan distinguir.
pub fn generar_detalle_ambientes(
    resultados: &HashMap<String, Vec<RegistroConsumo>>,
    orden: &[String],
    parametros: &Parametros,
) -> Vec<DetalleAmbientes> {
    let periodos: BTreeSet<Periodo> =
        registros_de(resultados, orden).map(|r| r.periodo).collect();
    let semanas = parametros.semanas_por_semestre as f64;

    let mut detalles = Vec::new();
    for periodo in periodos {
        let mut ambientes: BTreeMap<String, ConsumoAmbiente> = BTreeMap::new();
        for registro in registros_de(resultados, orden).filter(|r| r.periodo == periodo) {
            let consumo = ambientes
                .entry(registro.ambiente.etiqueta())
                .or_insert(ConsumoAmbiente { horas_semanales: 0.0, secciones: 0, horas_semestre: 0.0 });
            consumo.horas_semanales += registro.horas_totales;
            consumo.secciones += registro.secciones;
        }
        for consumo in ambientes.values_mut() {
            consumo.horas_semestre = redondear2(consumo.horas_semanales * semanas);
            consumo.horas_semanales = redondear2(consumo.horas_semanales);
        }
        detalles.push(DetalleAmbientes { periodo: periodo.cadena(), ambientes });
    }
    detalles
}

/// Arma el resultado completo: metadata, periodo pico y los cuatro cortes.
pub fn ensamblar_resultado(
    config: &Configuracion,
    resultados: &HashMap<String, Vec<RegistroConsumo>>,
    mallas_filtradas: &[CursoMalla],
    diagnosticos: &Diagnosticos,
) -> ResultadoAnalisis {
    let orden = config.ids_programas();
    let parametros = &config.parametros;

    let consumo_por_periodo = generar_resumen_por_periodo(resultados, &orden, parametros);
    let consumo_por_semestre =
        generar_resumen_por_semestre(resultados, &orden, mallas_filtradas);
    let consumo_por_anio = generar_resumen_por_anio(resultados, &orden, parametros);
    let detalle_ambientes = generar_detalle_ambientes(resultados, &orden, parametros);

    // Periodo pico: máximo estricto; en empate gana el periodo más antiguo
    let pico = consumo_por_periodo.iter().fold(None::<&ResumenPeriodo>, |mejor, actual| {
        match mejor {
            Some(m) if m.horas_semanales.total >= actual.horas_semanales.total => Some(m),
            _ => Some(actual),
        }
    });
    let resumen_total = match pico {
        Some(p) => ResumenTotal {
            periodo_pico: PeriodoPico {
                periodo: p.periodo.clone(),
                horas_semanales_totales: p.horas_semanales.total,
                estudiantes: p.estudiantes.total,
            },
            distribucion_pico: p.horas_semanales.clone(),
        },
        None => ResumenTotal {
            periodo_pico: PeriodoPico {
                periodo: String::new(),
                horas_semanales_totales: 0.0,
                estudiantes: 0,
            },
            distribucion_pico: HorasPorCategoria::default(),
        },
    };

    let periodo_proyeccion = match (consumo_por_periodo.first(), consumo_por_periodo.last()) {
        (Some(primero), Some(ultimo)) => format!("{} a {}", primero.periodo, ultimo.periodo),
        _ => "sin datos".to_string(),
    };

    ResultadoAnalisis {
        metadata: MetadataResultado {
            carrera: config.metadata.carrera.clone(),
            programas: orden,
            fecha_analisis: config.metadata.fecha_analisis.clone(),
            periodo_proyeccion,
            parametros: parametros.clone(),
        },
        resumen_total,
        consumo_por_periodo,
        consumo_por_semestre_academico: consumo_por_semestre,
        consumo_por_anio,
        detalle_ambientes_especificos: detalle_ambientes,
        advertencias: diagnosticos.eventos().to_vec(),
    }
}
