// Generación del workbook de verificación con umya-spreadsheet.
//
// Una hoja por corte del resultado: Resumen Ejecutivo, Consumo por Periodo,
// Consumo por Semestre, Consumo por Año y Ambientes Específicos.

use std::path::Path;

use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::analisis::resumen::ResultadoAnalisis;
use crate::error::AnalisisError;

fn texto(hoja: &mut Worksheet, columna: u32, fila: u32, valor: &str) {
    hoja.get_cell_mut((columna, fila)).set_value(valor);
}

fn numero(hoja: &mut Worksheet, columna: u32, fila: u32, valor: f64) {
    hoja.get_cell_mut((columna, fila)).set_value_number(valor);
}

fn encabezados(hoja: &mut Worksheet, fila: u32, titulos: &[&str]) {
    for (indice, titulo) in titulos.iter().enumerate() {
        texto(hoja, indice as u32 + 1, fila, titulo);
    }
}

/// Escribe el reporte Excel completo. Si algo falla, no queda archivo
/// parcial: el workbook se escribe de una sola vez al final.
pub fn generar_reporte_excel<P: AsRef<Path>>(
    resultado: &ResultadoAnalisis,
    ruta: P,
) -> Result<(), AnalisisError> {
    let mut libro = umya_spreadsheet::new_file();

    {
        let hoja = libro
            .get_sheet_mut(&0)
            .map_err(|_| AnalisisError::Reporte("hoja inicial no disponible".to_string()))?;
        hoja.set_name("Resumen Ejecutivo");
        hoja_resumen(hoja, resultado);
    }
    hoja_periodos(nueva_hoja(&mut libro, "Consumo por Periodo")?, resultado);
    hoja_semestres(nueva_hoja(&mut libro, "Consumo por Semestre")?, resultado);
    hoja_anios(nueva_hoja(&mut libro, "Consumo por Año")?, resultado);
    hoja_ambientes(nueva_hoja(&mut libro, "Ambientes Específicos")?, resultado);

    umya_spreadsheet::writer::xlsx::write(&libro, ruta.as_ref())
        .map_err(|e| AnalisisError::Reporte(format!("{:?}", e)))?;

    log::info!("reporte Excel escrito en {}", ruta.as_ref().display());
    Ok(())
}

fn nueva_hoja<'a>(
    libro: &'a mut Spreadsheet,
    nombre: &str,
) -> Result<&'a mut Worksheet, AnalisisError> {
    libro
        .new_sheet(nombre)
        .map_err(|e| AnalisisError::Reporte(format!("no se pudo crear la hoja '{nombre}': {e}")))
}

fn hoja_resumen(hoja: &mut Worksheet, resultado: &ResultadoAnalisis) {
    let meta = &resultado.metadata;
    let pico = &resultado.resumen_total.periodo_pico;
    let dist = &resultado.resumen_total.distribucion_pico;

    let mut fila = 1u32;
    let mut par = |concepto: &str, valor: String, hoja: &mut Worksheet| {
        texto(hoja, 1, fila, concepto);
        texto(hoja, 2, fila, &valor);
        fila += 1;
    };

    par("RESUMEN EJECUTIVO - CONSUMO DE HORAS-AULA", String::new(), hoja);
    par("Carrera:", meta.carrera.clone(), hoja);
    par("Programas:", meta.programas.join(", "), hoja);
    par("Periodo de Proyección:", meta.periodo_proyeccion.clone(), hoja);
    par("Fecha de Análisis:", meta.fecha_analisis.clone(), hoja);
    par("", String::new(), hoja);
    par("PARÁMETROS UTILIZADOS", String::new(), hoja);
    par("Tamaño Sección Aula:", meta.parametros.tamano_seccion_aula.to_string(), hoja);
    par(
        "Tamaño Sección Laboratorio:",
        meta.parametros.tamano_seccion_laboratorio.to_string(),
        hoja,
    );
    par("Tamaño Sección Taller:", meta.parametros.tamano_seccion_taller.to_string(), hoja);
    par("Semanas por Semestre:", meta.parametros.semanas_por_semestre.to_string(), hoja);
    par("", String::new(), hoja);
    par("PERIODO PICO", String::new(), hoja);
    par("Periodo:", pico.periodo.clone(), hoja);
    par("Horas Semanales Totales:", format!("{:.2}", pico.horas_semanales_totales), hoja);
    par("Estudiantes:", pico.estudiantes.to_string(), hoja);
    par("", String::new(), hoja);
    par("DISTRIBUCIÓN HORAS PERIODO PICO", "Horas/Semana".to_string(), hoja);
    par("Aula", format!("{:.2}", dist.aula), hoja);
    par("Laboratorio", format!("{:.2}", dist.laboratorio), hoja);
    par("Taller", format!("{:.2}", dist.taller), hoja);
    par("Virtual", format!("{:.2}", dist.virtual_), hoja);
    par("TOTAL", format!("{:.2}", dist.total), hoja);
}

fn hoja_periodos(hoja: &mut Worksheet, resultado: &ResultadoAnalisis) {
    encabezados(
        hoja,
        1,
        &[
            "Periodo",
            "Año",
            "Ciclo",
            "Estudiantes",
            "Aula (hrs/sem)",
            "Laboratorio (hrs/sem)",
            "Taller (hrs/sem)",
            "Virtual (hrs/sem)",
            "Total (hrs/sem)",
            "Total (hrs/semestre)",
            "Secciones Aula",
            "Secciones Laboratorio",
            "Secciones Taller",
            "Secciones Virtual",
            "Secciones Total",
        ],
    );

    for (indice, periodo) in resultado.consumo_por_periodo.iter().enumerate() {
        let fila = indice as u32 + 2;
        texto(hoja, 1, fila, &periodo.periodo);
        numero(hoja, 2, fila, periodo.anio as f64);
        texto(hoja, 3, fila, &periodo.ciclo);
        numero(hoja, 4, fila, periodo.estudiantes.total as f64);
        numero(hoja, 5, fila, periodo.horas_semanales.aula);
        numero(hoja, 6, fila, periodo.horas_semanales.laboratorio);
        numero(hoja, 7, fila, periodo.horas_semanales.taller);
        numero(hoja, 8, fila, periodo.horas_semanales.virtual_);
        numero(hoja, 9, fila, periodo.horas_semanales.total);
        numero(hoja, 10, fila, periodo.horas_semestre.total);
        numero(hoja, 11, fila, periodo.secciones.aula as f64);
        numero(hoja, 12, fila, periodo.secciones.laboratorio as f64);
        numero(hoja, 13, fila, periodo.secciones.taller as f64);
        numero(hoja, 14, fila, periodo.secciones.virtual_ as f64);
        numero(hoja, 15, fila, periodo.secciones.total as f64);
    }
}

fn hoja_semestres(hoja: &mut Worksheet, resultado: &ResultadoAnalisis) {
    encabezados(
        hoja,
        1,
        &[
            "Semestre",
            "Cursos",
            "Créditos Totales",
            "Horas Curso Semanales",
            "Prom Estudiantes",
            "Máx Estudiantes",
            "Mín Estudiantes",
            "Prom Secciones",
            "Prom Horas/Semana",
            "Aula (%)",
            "Laboratorio (%)",
            "Taller (%)",
            "Virtual (%)",
        ],
    );

    for (indice, semestre) in resultado.consumo_por_semestre_academico.iter().enumerate() {
        let fila = indice as u32 + 2;
        let porcentaje = |clave: &str| {
            semestre
                .distribucion_tipo_ambiente
                .get(clave)
                .map(|d| d.porcentaje)
                .unwrap_or(0.0)
        };
        numero(hoja, 1, fila, semestre.semestre as f64);
        numero(hoja, 2, fila, semestre.cursos as f64);
        numero(hoja, 3, fila, semestre.creditos_totales as f64);
        numero(hoja, 4, fila, semestre.horas_curso_semanales as f64);
        numero(hoja, 5, fila, semestre.estadisticas.promedio_estudiantes);
        numero(hoja, 6, fila, semestre.estadisticas.maximo_estudiantes as f64);
        numero(hoja, 7, fila, semestre.estadisticas.minimo_estudiantes as f64);
        numero(hoja, 8, fila, semestre.estadisticas.promedio_secciones);
        numero(hoja, 9, fila, semestre.estadisticas.promedio_horas_semanales);
        numero(hoja, 10, fila, porcentaje("aula"));
        numero(hoja, 11, fila, porcentaje("laboratorio"));
        numero(hoja, 12, fila, porcentaje("taller"));
        numero(hoja, 13, fila, porcentaje("virtual"));
    }
}

fn hoja_anios(hoja: &mut Worksheet, resultado: &ResultadoAnalisis) {
    encabezados(
        hoja,
        1,
        &[
            "Año",
            "Estudiantes",
            "Aula (hrs/año)",
            "Laboratorio (hrs/año)",
            "Taller (hrs/año)",
            "Virtual (hrs/año)",
            "Total (hrs/año)",
            "Prom Ciclo I (hrs/sem)",
            "Prom Ciclo II (hrs/sem)",
            "Prom Anual (hrs/sem)",
        ],
    );

    for (indice, anio) in resultado.consumo_por_anio.iter().enumerate() {
        let fila = indice as u32 + 2;
        numero(hoja, 1, fila, anio.anio as f64);
        numero(hoja, 2, fila, anio.total_estudiantes as f64);
        numero(hoja, 3, fila, anio.horas_anuales.aula);
        numero(hoja, 4, fila, anio.horas_anuales.laboratorio);
        numero(hoja, 5, fila, anio.horas_anuales.taller);
        numero(hoja, 6, fila, anio.horas_anuales.virtual_);
        numero(hoja, 7, fila, anio.horas_anuales.total);
        numero(hoja, 8, fila, anio.promedio_semanal.ciclo_i);
        numero(hoja, 9, fila, anio.promedio_semanal.ciclo_ii);
        numero(hoja, 10, fila, anio.promedio_semanal.promedio);
    }
}

fn hoja_ambientes(hoja: &mut Worksheet, resultado: &ResultadoAnalisis) {
    encabezados(
        hoja,
        1,
        &["Periodo", "Ambiente", "Horas/Semana", "Secciones", "Horas/Semestre"],
    );

    let mut fila = 2u32;
    for detalle in &resultado.detalle_ambientes_especificos {
        for (ambiente, consumo) in &detalle.ambientes {
            texto(hoja, 1, fila, &detalle.periodo);
            texto(hoja, 2, fila, ambiente);
            numero(hoja, 3, fila, consumo.horas_semanales);
            numero(hoja, 4, fila, consumo.secciones as f64);
            numero(hoja, 5, fila, consumo.horas_semestre);
            fila += 1;
        }
    }
}
