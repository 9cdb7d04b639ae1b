// src/noyau/decimal.rs
//
// Arithmétique décimale EXACTE sur le texte des nombres (jamais via f64).
// Le formateur s’en sert pour arrondir et passer en notation scientifique
// sans introduire d’artefacts binaires absents de la chaîne d’origine.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

pub fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Chiffres ASCII -> entier. Une chaîne vide vaut 0.
pub fn entier(chiffres: &str) -> BigInt {
    BigInt::parse_bytes(chiffres.as_bytes(), 10).unwrap_or_else(BigInt::zero)
}

/// "entier.fraction" (valeur absolue) -> rationnel exact.
pub fn rationnel(chiffres_entiers: &str, fraction: &str) -> BigRational {
    let n = entier(&format!("{chiffres_entiers}{fraction}"));
    BigRational::new(n, pow10(fraction.len()))
}

/// Arrondi à `places` décimales (demi loin de zéro).
/// Retourne (partie entière, fraction sur exactement `places` chiffres).
pub fn arrondir(r: &BigRational, places: usize) -> (BigInt, String) {
    let scale = pow10(places);
    let scaled = (r * BigRational::from_integer(scale.clone()))
        .round()
        .to_integer();

    let int_part = &scaled / &scale;
    if places == 0 {
        return (int_part, String::new());
    }

    let mut frac = (&scaled % &scale).to_str_radix(10);
    while frac.len() < places {
        frac.insert(0, '0');
    }
    (int_part, frac)
}

/// Mantisse scientifique de `entier.fraction × 10^exposant` avec `precision`
/// chiffres après la virgule.
///
/// Retourne (precision + 1 chiffres significatifs, exposant du premier chiffre),
/// ou None si la valeur est nulle.
///
/// Travaille sur les chiffres seulement : l’exposant peut être énorme sans
/// qu’on calcule 10^exposant.
pub fn mantisse(
    chiffres_entiers: &str,
    fraction: &str,
    exposant: i64,
    precision: usize,
) -> Option<(String, i64)> {
    let tous = format!("{chiffres_entiers}{fraction}");
    let k = tous.find(|c: char| c != '0')?;
    let significatifs = &tous[k..];

    // exposant du premier chiffre non nul
    let mut e = exposant
        .saturating_add(chiffres_entiers.len() as i64)
        .saturating_sub(1 + k as i64);

    let voulus = precision + 1;
    let n = entier(significatifs);

    let mut q = if significatifs.len() > voulus {
        let retire = significatifs.len() - voulus;
        BigRational::new(n, pow10(retire)).round().to_integer()
    } else {
        n * pow10(voulus - significatifs.len())
    };

    // retenue : 9.99999 -> 10.0000 => 1.00000 et exposant + 1
    if q >= pow10(voulus) {
        q /= BigInt::from(10);
        e = e.saturating_add(1);
    }

    Some((q.to_str_radix(10), e))
}
