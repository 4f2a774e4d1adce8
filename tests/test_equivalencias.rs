// Reconciliación de equivalencias: detección mutua, exclusión y fusión.

use std::collections::HashMap;

use horas_aula::analisis::equivalencias::{
    fusionar_cursos_compartidos, identificar_cursos_a_eliminar, identificar_cursos_compartidos,
};
use horas_aula::config::{ArchivosPrograma, Parametros, ProgramaConfig};
use horas_aula::diagnostics::Diagnosticos;
use horas_aula::models::{
    CursoCompartido, FilaEquivalencia, Periodo, RegistroConsumo, TipoAmbiente,
};

fn programa(id: &str, nombre_equivalencia: &str) -> ProgramaConfig {
    ProgramaConfig {
        id: id.to_string(),
        nombre_equivalencia: nombre_equivalencia.to_string(),
        archivos: ArchivosPrograma {
            malla: "malla.xlsx".to_string(),
            proyeccion: "proyeccion.xlsx".to_string(),
            equivalencias: "equivalencias.xlsx".to_string(),
        },
    }
}

fn fila(
    codigo: &str,
    curso: &str,
    destino: Option<(&str, &str, &str)>,
) -> FilaEquivalencia {
    FilaEquivalencia {
        codigo: codigo.to_string(),
        curso: curso.to_string(),
        semestre: 1,
        programa_equivalente: destino.map(|(p, _, _)| p.to_string()),
        codigo_equivalente: destino.map(|(_, c, _)| c.to_string()),
        curso_equivalente: destino.map(|(_, _, n)| n.to_string()),
    }
}

fn parametros() -> Parametros {
    Parametros {
        tamano_seccion_aula: 40,
        tamano_seccion_laboratorio: 20,
        tamano_seccion_taller: 25,
        semanas_por_semestre: 16,
    }
}

fn registro(
    programa: &str,
    codigo: &str,
    periodo: Periodo,
    ambiente: TipoAmbiente,
    horas: f64,
    matriculados: u32,
    secciones: u32,
) -> RegistroConsumo {
    RegistroConsumo {
        programa: programa.to_string(),
        codigo: codigo.to_string(),
        curso: "Intro".to_string(),
        semestre: 1,
        periodo,
        ambiente,
        horas_semanales: horas,
        matriculados,
        secciones,
        horas_totales: horas * secciones as f64,
    }
}

#[test]
fn compartido_requiere_referencia_mutua() {
    let a = programa("C1", "Ciencias I");
    let b = programa("C2", "Ciencias II");
    let mut diagnosticos = Diagnosticos::nuevo();

    // A apunta a B, pero B no apunta de vuelta: no hay curso compartido
    let eq_a = vec![fila("INT-101", "Intro", Some(("Ciencias II", "INT-201", "Intro")))];
    let eq_b = vec![fila("INT-201", "Intro", None)];
    assert!(identificar_cursos_compartidos(&a, &eq_a, &b, &eq_b, &mut diagnosticos).is_empty());

    // Con la recíproca sí
    let eq_b = vec![fila("INT-201", "Intro", Some(("Ciencias I", "INT-101", "Intro")))];
    let compartidos =
        identificar_cursos_compartidos(&a, &eq_a, &b, &eq_b, &mut diagnosticos);
    assert_eq!(compartidos.len(), 1);
    assert_eq!(compartidos[0].codigo_a, "INT-101");
    assert_eq!(compartidos[0].codigo_b, "INT-201");
}

#[test]
fn nombres_distintos_no_se_fusionan_pero_se_reportan() {
    let a = programa("C1", "Ciencias I");
    let b = programa("C2", "Ciencias II");
    let mut diagnosticos = Diagnosticos::nuevo();

    let eq_a = vec![fila("INT-101", "Intro", Some(("Ciencias II", "INT-201", "Introducción")))];
    let eq_b = vec![fila("INT-201", "Introducción", Some(("Ciencias I", "INT-101", "Intro")))];

    let compartidos =
        identificar_cursos_compartidos(&a, &eq_a, &b, &eq_b, &mut diagnosticos);
    assert!(compartidos.is_empty());
    assert_eq!(diagnosticos.len(), 1);
}

#[test]
fn solo_el_programa_excluido_provoca_exclusion() {
    let equivalencias = vec![
        fila("MAT-101", "Matemática", Some(("Educación Inicial", "MAT-001", "Matemática"))),
        fila("PSI-101", "Psicología", Some(("Psicología", "PSI-001", "Psicología"))),
        fila("COM-101", "Comunicación", None),
    ];

    let excluidos = identificar_cursos_a_eliminar(&equivalencias, "Educación Inicial");
    assert_eq!(excluidos.len(), 1);
    assert!(excluidos.contains("MAT-101"));
    assert!(!excluidos.contains("PSI-101"));
}

#[test]
fn fusion_combina_matricula_y_elimina_el_duplicado() {
    let parametros = parametros();
    let mut diagnosticos = Diagnosticos::nuevo();
    let periodo = Periodo { anio: 2024, mes: 1 };
    let lab = TipoAmbiente::Laboratorio("Laboratorio de Química".to_string());

    let mut resultados = HashMap::new();
    resultados.insert(
        "C1".to_string(),
        vec![
            registro("C1", "INT-101", periodo, TipoAmbiente::Aula, 2.0, 45, 2),
            registro("C1", "INT-101", periodo, lab.clone(), 3.0, 45, 3),
        ],
    );
    resultados.insert(
        "C2".to_string(),
        vec![
            registro("C2", "INT-201", periodo, TipoAmbiente::Aula, 2.0, 15, 1),
            registro("C2", "INT-201", periodo, lab.clone(), 3.0, 15, 1),
        ],
    );

    let compartidos = vec![CursoCompartido {
        nombre: "Intro".to_string(),
        codigo_a: "INT-101".to_string(),
        codigo_b: "INT-201".to_string(),
        semestre_a: 1,
        semestre_b: 1,
    }];

    fusionar_cursos_compartidos(
        &mut resultados,
        "C1",
        "C2",
        &compartidos,
        &parametros,
        &mut diagnosticos,
    );

    // 45 + 15 = 60: ceil(60/40) = 2 aulas, ceil(60/20) = 3 laboratorios
    let c1 = &resultados["C1"];
    let aula = c1.iter().find(|r| r.ambiente == TipoAmbiente::Aula).unwrap();
    assert_eq!(aula.matriculados, 60);
    assert_eq!(aula.secciones, 2);
    assert_eq!(aula.horas_totales, 4.0);
    let lab_r = c1.iter().find(|r| r.ambiente == lab).unwrap();
    assert_eq!(lab_r.matriculados, 60);
    assert_eq!(lab_r.secciones, 3);
    assert_eq!(lab_r.horas_totales, 9.0);

    // El lado secundario queda sin registros del curso compartido
    assert!(resultados["C2"].iter().all(|r| r.codigo != "INT-201"));
}

#[test]
fn periodo_con_datos_en_un_solo_lado_queda_intacto() {
    let parametros = parametros();
    let mut diagnosticos = Diagnosticos::nuevo();
    let comun = Periodo { anio: 2024, mes: 1 };
    let solo_b = Periodo { anio: 2024, mes: 8 };

    let mut resultados = HashMap::new();
    resultados.insert(
        "C1".to_string(),
        vec![registro("C1", "INT-101", comun, TipoAmbiente::Aula, 2.0, 30, 1)],
    );
    resultados.insert(
        "C2".to_string(),
        vec![
            registro("C2", "INT-201", comun, TipoAmbiente::Aula, 2.0, 20, 1),
            registro("C2", "INT-201", solo_b, TipoAmbiente::Aula, 2.0, 18, 1),
        ],
    );

    let compartidos = vec![CursoCompartido {
        nombre: "Intro".to_string(),
        codigo_a: "INT-101".to_string(),
        codigo_b: "INT-201".to_string(),
        semestre_a: 1,
        semestre_b: 1,
    }];

    fusionar_cursos_compartidos(
        &mut resultados,
        "C1",
        "C2",
        &compartidos,
        &parametros,
        &mut diagnosticos,
    );

    // El periodo común se fusionó; el periodo exclusivo de C2 sobrevive tal cual
    assert_eq!(resultados["C1"][0].matriculados, 50);
    let restantes = &resultados["C2"];
    assert_eq!(restantes.len(), 1);
    assert_eq!(restantes[0].periodo, solo_b);
    assert_eq!(restantes[0].matriculados, 18);
}
