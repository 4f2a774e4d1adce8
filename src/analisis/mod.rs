//! Módulo `analisis`: el núcleo de reconciliación y agregación.
//!
//! Submódulos:
//! - `ambientes`: clasificación de horas por tipo de ambiente
//! - `secciones`: cálculo de secciones según capacidad
//! - `programa`: join proyección × malla expandida
//! - `equivalencias`: cursos compartidos, exclusiones y fusión
//! - `resumen`: resúmenes por periodo/semestre/año y detalle específico

pub mod ambientes;
pub mod equivalencias;
pub mod programa;
pub mod resumen;
pub mod secciones;

use std::collections::{HashMap, HashSet};

use crate::config::Configuracion;
use crate::diagnostics::Diagnosticos;
use crate::error::AnalisisError;
use crate::models::{CursoCompartido, CursoMalla, FilaEquivalencia, RegistroMatricula};

use ambientes::CursosEspeciales;
use resumen::ResultadoAnalisis;

/// Tablas cargadas de un programa, en el mismo orden que
/// `Configuracion::programas`.
#[derive(Debug, Clone)]
pub struct DatosPrograma {
    pub malla: Vec<CursoMalla>,
    pub proyeccion: Vec<RegistroMatricula>,
    pub equivalencias: Vec<FilaEquivalencia>,
}

/// Ejecuta el análisis completo sobre tablas ya cargadas:
/// exclusiones → detección de compartidos → procesamiento por programa →
/// fusión → agregación. Una sola pasada, secuencial.
pub fn ejecutar_analisis(
    config: &Configuracion,
    datos: &[DatosPrograma],
    diagnosticos: &mut Diagnosticos,
) -> Result<ResultadoAnalisis, AnalisisError> {
    if datos.len() != config.programas.len() {
        return Err(AnalisisError::Configuracion(format!(
            "se esperaban datos de {} programas, llegaron {}",
            config.programas.len(),
            datos.len()
        )));
    }

    let especiales = match &config.cursos_especiales {
        Some(tabla) => CursosEspeciales::desde_config(tabla),
        None => CursosEspeciales::predeterminados(),
    };

    // Exclusiones: cursos cedidos al programa anfitrión excluido
    let excluidos: Vec<HashSet<String>> = datos
        .iter()
        .map(|d| {
            equivalencias::identificar_cursos_a_eliminar(
                &d.equivalencias,
                &config.metadata.programa_excluido,
            )
        })
        .collect();

    // Cursos compartidos por par de programas, en orden de configuración:
    // el programa que aparece primero es el lado primario de la fusión
    let mut compartidos_por_par: Vec<(usize, usize, Vec<CursoCompartido>)> = Vec::new();
    for i in 0..config.programas.len() {
        for j in (i + 1)..config.programas.len() {
            let compartidos = equivalencias::identificar_cursos_compartidos(
                &config.programas[i],
                &datos[i].equivalencias,
                &config.programas[j],
                &datos[j].equivalencias,
                diagnosticos,
            );
            if !compartidos.is_empty() {
                compartidos_por_par.push((i, j, compartidos));
            }
        }
    }

    // Procesamiento independiente de cada programa
    let mut resultados = HashMap::new();
    for (indice, programa) in config.programas.iter().enumerate() {
        let registros = programa::procesar_programa(
            &programa.id,
            &datos[indice].malla,
            &datos[indice].proyeccion,
            &excluidos[indice],
            &especiales,
            &config.parametros,
            diagnosticos,
        );
        resultados.insert(programa.id.clone(), registros);
    }

    // Fusión de compartidos: única fase que muta los registros
    for (i, j, compartidos) in &compartidos_por_par {
        equivalencias::fusionar_cursos_compartidos(
            &mut resultados,
            &config.programas[*i].id,
            &config.programas[*j].id,
            compartidos,
            &config.parametros,
            diagnosticos,
        );
    }

    // Malla combinada sin los cursos excluidos, para los datos nominales
    // del resumen por semestre
    let mallas_filtradas: Vec<CursoMalla> = datos
        .iter()
        .zip(&excluidos)
        .flat_map(|(d, exc)| {
            d.malla.iter().filter(|c| !exc.contains(&c.codigo)).cloned()
        })
        .collect();

    Ok(resumen::ensamblar_resultado(config, &resultados, &mallas_filtradas, diagnosticos))
}
