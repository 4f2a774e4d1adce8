// Reconciliación de equivalencias entre programas: detección de cursos
// compartidos, exclusión de cursos cedidos y fusión de matrícula.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::analisis::secciones::calcular_secciones;
use crate::config::{Parametros, ProgramaConfig};
use crate::diagnostics::{Diagnostico, Diagnosticos};
use crate::models::{CursoCompartido, FilaEquivalencia, Periodo, RegistroConsumo, TipoAmbiente};

/// Detecta cursos compartidos entre los programas A y B.
///
/// Una fila de A que apunta a B se acepta sólo si B tiene la fila recíproca
/// (mismo par de códigos, apuntando a A) y los nombres legibles coinciden
/// textualmente. Un desajuste de nombres se reporta y el par NO se fusiona:
/// protege de colisiones mismo-código/curso-distinto.
pub fn identificar_cursos_compartidos(
    programa_a: &ProgramaConfig,
    equivalencias_a: &[FilaEquivalencia],
    programa_b: &ProgramaConfig,
    equivalencias_b: &[FilaEquivalencia],
    diagnosticos: &mut Diagnosticos,
) -> Vec<CursoCompartido> {
    // Filas de B que apuntan de vuelta a A, indexadas por código en B
    let reciprocas: HashMap<&str, &FilaEquivalencia> = equivalencias_b
        .iter()
        .filter(|fila| {
            fila.programa_equivalente.as_deref() == Some(programa_a.nombre_equivalencia.as_str())
        })
        .map(|fila| (fila.codigo.as_str(), fila))
        .collect();

    let mut compartidos = Vec::new();
    for fila in equivalencias_a {
        if fila.programa_equivalente.as_deref() != Some(programa_b.nombre_equivalencia.as_str()) {
            continue;
        }
        let Some(codigo_b) = fila.codigo_equivalente.as_deref() else {
            continue;
        };
        let Some(reciproca) = reciprocas.get(codigo_b) else {
            continue;
        };

        let nombre_equivalente = fila.curso_equivalente.clone().unwrap_or_default();
        if fila.curso == nombre_equivalente {
            compartidos.push(CursoCompartido {
                nombre: fila.curso.clone(),
                codigo_a: fila.codigo.clone(),
                codigo_b: codigo_b.to_string(),
                semestre_a: fila.semestre,
                semestre_b: reciproca.semestre,
            });
        } else {
            diagnosticos.registrar(Diagnostico::NombresNoCoinciden {
                codigo: fila.codigo.clone(),
                nombre: fila.curso.clone(),
                nombre_equivalente: nombre_equivalente.clone(),
                similitud: strsim::normalized_levenshtein(&fila.curso, &nombre_equivalente),
            });
        }
    }

    log::info!(
        "{} ↔ {}: {} cursos compartidos",
        programa_a.id,
        programa_b.id,
        compartidos.len()
    );
    compartidos
}

/// Códigos de curso cuya equivalencia apunta al programa anfitrión excluido.
///
/// Sólo ese destino provoca la exclusión: cursos equivalenciados a cualquier
/// otra carrera (Psicología, etc.) se mantienen y se cuentan con normalidad.
/// La distinción es regla de negocio deliberada, no un descuido.
pub fn identificar_cursos_a_eliminar(
    equivalencias: &[FilaEquivalencia],
    programa_excluido: &str,
) -> HashSet<String> {
    equivalencias
        .iter()
        .filter(|fila| fila.programa_equivalente.as_deref() == Some(programa_excluido))
        .map(|fila| fila.codigo.clone())
        .collect()
}

/// Fusiona la matrícula de los cursos compartidos.
///
/// Para cada periodo con datos en AMBOS lados: suma la matrícula, recalcula
/// secciones y horas sobre el total combinado para cada ambiente del lado
/// primario (A, el primero en la configuración) y elimina el registro
/// duplicado del lado secundario. Un periodo con datos en un solo lado se
/// deja intacto. Así cada curso compartido se cuenta exactamente una vez.
pub fn fusionar_cursos_compartidos(
    resultados: &mut HashMap<String, Vec<RegistroConsumo>>,
    id_a: &str,
    id_b: &str,
    compartidos: &[CursoCompartido],
    parametros: &Parametros,
    diagnosticos: &mut Diagnosticos,
) {
    for compartido in compartidos {
        let datos_a = periodos_del_curso(resultados.get(id_a), &compartido.codigo_a);
        let datos_b = periodos_del_curso(resultados.get(id_b), &compartido.codigo_b);

        if datos_a.is_empty() || datos_b.is_empty() {
            diagnosticos.registrar(Diagnostico::CompartidoSinDatos {
                nombre: compartido.nombre.clone(),
            });
            continue;
        }

        let periodos: BTreeSet<Periodo> =
            datos_a.keys().chain(datos_b.keys()).copied().collect();

        for periodo in periodos {
            let (Some(info_a), Some(info_b)) = (datos_a.get(&periodo), datos_b.get(&periodo))
            else {
                // Sólo un lado tiene datos en este periodo: no hay nada que
                // combinar, el registro existente queda como está.
                continue;
            };
            let total = info_a.matriculados + info_b.matriculados;

            for ambiente in &info_a.ambientes {
                let secciones = calcular_secciones(total, ambiente, parametros);

                if let Some(registros_a) = resultados.get_mut(id_a) {
                    for registro in registros_a.iter_mut().filter(|r| {
                        r.codigo == compartido.codigo_a
                            && r.periodo == periodo
                            && r.ambiente == *ambiente
                    }) {
                        registro.matriculados = total;
                        registro.secciones = secciones;
                        registro.horas_totales = registro.horas_semanales * secciones as f64;
                    }
                }

                if let Some(registros_b) = resultados.get_mut(id_b) {
                    registros_b.retain(|r| {
                        !(r.codigo == compartido.codigo_b
                            && r.periodo == periodo
                            && r.ambiente == *ambiente)
                    });
                }
            }
        }

        log::info!(
            "curso compartido '{}': matrícula combinada, duplicado de {} eliminado",
            compartido.nombre,
            id_b
        );
    }
}

struct InfoPeriodo {
    matriculados: u32,
    ambientes: BTreeSet<TipoAmbiente>,
}

fn periodos_del_curso(
    registros: Option<&Vec<RegistroConsumo>>,
    codigo: &str,
) -> HashMap<Periodo, InfoPeriodo> {
    let mut por_periodo: HashMap<Periodo, InfoPeriodo> = HashMap::new();
    let Some(registros) = registros else {
        return por_periodo;
    };
    for registro in registros.iter().filter(|r| r.codigo == codigo) {
        let info = por_periodo.entry(registro.periodo).or_insert_with(|| InfoPeriodo {
            matriculados: registro.matriculados,
            ambientes: BTreeSet::new(),
        });
        info.ambientes.insert(registro.ambiente.clone());
    }
    por_periodo
}
