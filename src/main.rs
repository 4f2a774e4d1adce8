// --- Analizador de Consumo de Horas-Aula - Archivo principal ---

use std::env;
use std::fs;
use std::process::ExitCode;

use horas_aula::{ejecutar_analisis_completo, excel, Configuracion};

fn main() -> ExitCode {
    env_logger::init();

    println!("=== Analizador de Consumo de Horas-Aula ===");

    let ruta_config = env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    println!("Configuración: {ruta_config}");

    match ejecutar(&ruta_config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn ejecutar(ruta_config: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = Configuracion::cargar(ruta_config)?;
    println!("Carrera: {}", config.metadata.carrera);
    println!("Programas: {}", config.ids_programas().join(", "));

    let (resultado, diagnosticos) = ejecutar_analisis_completo(&config)?;

    let json = serde_json::to_string_pretty(&resultado)?;
    fs::write(&config.salida.json, json)?;
    println!("✅ Resultado JSON: {}", config.salida.json);

    excel::generar_reporte_excel(&resultado, &config.salida.excel)?;
    println!("✅ Reporte Excel: {}", config.salida.excel);

    let pico = &resultado.resumen_total.periodo_pico;
    println!("\n--- Resumen ---");
    println!("Periodos analizados: {}", resultado.consumo_por_periodo.len());
    println!(
        "Periodo pico: {} ({:.2} hrs/sem, {} estudiantes)",
        pico.periodo, pico.horas_semanales_totales, pico.estudiantes
    );
    if !diagnosticos.is_empty() {
        println!("⚠️  Advertencias: {}", diagnosticos.len());
        for evento in diagnosticos.eventos() {
            println!("   - {}", evento.mensaje());
        }
    }

    Ok(())
}
