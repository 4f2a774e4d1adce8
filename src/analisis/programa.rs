// Procesamiento de un programa: join de la proyección contra la malla
// expandida por ambientes.

use std::collections::{HashMap, HashSet};

use crate::analisis::ambientes::{clasificar_ambientes, CursosEspeciales};
use crate::analisis::secciones::calcular_secciones;
use crate::config::Parametros;
use crate::diagnostics::{Diagnostico, Diagnosticos};
use crate::models::{AmbienteAsignado, CursoMalla, RegistroConsumo, RegistroMatricula, TipoAmbiente};

/// Produce los registros de consumo de un programa.
///
/// 1. Descarta cursos cedidos al programa excluido (malla y proyección).
/// 2. Expande la malla vía el clasificador de ambientes.
/// 3. Left-join de la proyección sobre (código, semestre): cada fila de
///    matrícula abre un registro por ambiente del curso. Una fila sin curso
///    en la malla produce un registro en cero más una advertencia, nunca se
///    descarta en silencio.
pub fn procesar_programa(
    programa: &str,
    malla: &[CursoMalla],
    proyeccion: &[RegistroMatricula],
    excluidos: &HashSet<String>,
    especiales: &CursosEspeciales,
    parametros: &Parametros,
    diagnosticos: &mut Diagnosticos,
) -> Vec<RegistroConsumo> {
    // Malla expandida: (código, semestre) → (nombre, asignaciones de ambiente)
    let mut malla_expandida: HashMap<(String, u32), (String, Vec<AmbienteAsignado>)> =
        HashMap::new();
    for curso in malla {
        if excluidos.contains(&curso.codigo) {
            continue;
        }
        let ambientes = clasificar_ambientes(curso, especiales);
        malla_expandida
            .insert((curso.codigo.clone(), curso.semestre), (curso.nombre.clone(), ambientes));
    }

    let mut registros = Vec::new();
    for matricula in proyeccion {
        if excluidos.contains(&matricula.codigo) {
            continue;
        }

        let llave = (matricula.codigo.clone(), matricula.semestre);
        match malla_expandida.get(&llave) {
            Some((nombre, ambientes)) => {
                for asignacion in ambientes {
                    let secciones =
                        calcular_secciones(matricula.matriculados, &asignacion.tipo, parametros);
                    registros.push(RegistroConsumo {
                        programa: programa.to_string(),
                        codigo: matricula.codigo.clone(),
                        curso: nombre.clone(),
                        semestre: matricula.semestre,
                        periodo: matricula.periodo,
                        ambiente: asignacion.tipo.clone(),
                        horas_semanales: asignacion.horas,
                        matriculados: matricula.matriculados,
                        secciones,
                        horas_totales: asignacion.horas * secciones as f64,
                    });
                }
            }
            None => {
                // Brecha de integridad: matrícula sin malla. Registro en cero,
                // contabilizado y reportado.
                diagnosticos.registrar(Diagnostico::MatriculaSinMalla {
                    programa: programa.to_string(),
                    codigo: matricula.codigo.clone(),
                    periodo: matricula.periodo.cadena(),
                });
                registros.push(RegistroConsumo {
                    programa: programa.to_string(),
                    codigo: matricula.codigo.clone(),
                    curso: String::new(),
                    semestre: matricula.semestre,
                    periodo: matricula.periodo,
                    ambiente: TipoAmbiente::Aula,
                    horas_semanales: 0.0,
                    matriculados: matricula.matriculados,
                    secciones: 0,
                    horas_totales: 0.0,
                });
            }
        }
    }

    // Orden estable para que dos corridas produzcan la misma salida
    registros.sort_by(|a, b| {
        (&a.codigo, a.periodo, &a.ambiente).cmp(&(&b.codigo, b.periodo, &b.ambiente))
    });

    log::info!("programa {programa}: {} registros de consumo", registros.len());
    registros
}
