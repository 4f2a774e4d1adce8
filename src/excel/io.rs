// Helpers de parseo de celdas y encabezados compartidos por los lectores.

use calamine::Data;
use chrono::NaiveDate;

use crate::models::Periodo;

/// Convierte un `Data` de calamine a String (los floats enteros pierden el `.0`).
pub fn celda_a_string(celda: &Data) -> String {
    match celda {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Convierte una celda numérica (acepta coma decimal en celdas de texto).
pub fn celda_a_f64(celda: &Data) -> Option<f64> {
    match celda {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    }
}

pub fn celda_a_i64(celda: &Data) -> Option<i64> {
    match celda {
        Data::Int(i) => Some(*i),
        Data::Float(f) => Some(f.round() as i64),
        Data::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Normaliza encabezados eliminando espacios y pasando a minúsculas.
pub fn normalize_header(s: &str) -> String {
    s.to_lowercase().chars().filter(|c| !c.is_whitespace()).collect()
}

/// Busca el índice de una columna por su nombre normalizado exacto.
pub fn indice_columna(encabezados: &[String], nombre: &str) -> Option<usize> {
    encabezados.iter().position(|h| h == nombre)
}

/// Interpreta una celda de fecha de periodo (fecha Excel, ISO, dd/mm/aaaa
/// o "AAAA-MM") y la reduce a `Periodo`.
pub fn parsear_periodo(celda: &Data) -> Option<Periodo> {
    match celda {
        Data::DateTime(dt) => dt.as_datetime().map(|f| Periodo::desde_fecha(f.date())),
        Data::DateTimeIso(s) => parsear_periodo_texto(s),
        Data::String(s) => parsear_periodo_texto(s),
        _ => None,
    }
}

fn parsear_periodo_texto(texto: &str) -> Option<Periodo> {
    let texto = texto.trim();
    for formato in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(fecha) = NaiveDate::parse_from_str(texto, formato) {
            return Some(Periodo::desde_fecha(fecha));
        }
    }
    // ISO con hora: quedarnos con la parte de fecha
    if let Some((fecha, _)) = texto.split_once('T') {
        if let Ok(fecha) = NaiveDate::parse_from_str(fecha, "%Y-%m-%d") {
            return Some(Periodo::desde_fecha(fecha));
        }
    }
    // "AAAA-MM"
    let partes: Vec<&str> = texto.split('-').collect();
    if partes.len() == 2 {
        if let (Ok(anio), Ok(mes)) = (partes[0].parse::<i32>(), partes[1].parse::<u32>()) {
            if (1..=12).contains(&mes) {
                return Some(Periodo { anio, mes });
            }
        }
    }
    None
}
