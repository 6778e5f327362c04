// src/noyau/format.rs

/// Rend un résultat pour l'affichage (et pour réinjection dans l'entrée,
/// afin d'enchaîner les calculs).
/// - valeur entière : sans partie décimale ("5", pas "5.0")
/// - sinon : rendu décimal de f64 (jamais de notation exponentielle,
///   donc toujours re-tokenisable)
pub fn format_resultat(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        // borne : au-delà de 10^15, trunc/as i64 perdent l'exactitude
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}
