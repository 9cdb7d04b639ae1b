// src/noyau/format.rs
//
// Affichage borné (13 caractères) des nombres et des expressions.
//
// - formater_nombre : un jeton numérique -> texte groupé (1,234,567), arrondi,
//                     ou notation scientifique si la partie entière déborde
// - formater_expr   : expression entière ; seuls les jetons numériques sont touchés,
//                     opérateurs / parenthèses / noms de fonctions restent en place
//
// Le texte BRUT (non formaté) reste dans le tampon : ce module ne sert qu’à l’écran.

use super::decimal;

/// Largeur de l’écran (caractères).
pub const LARGEUR_AFFICHAGE: usize = 13;

/// Au-delà de 10 chiffres entiers, on passe en notation scientifique.
const CHIFFRES_ENTIERS_MAX: usize = 10;

/// Chiffres de mantisse au départ de la recherche du meilleur ajustement.
const PRECISION_SCI_DEPART: usize = 5;

/// Marqueur d’erreur (tampon après une évaluation ratée).
pub const MARQUEUR_ERREUR: &str = "Error";

/* ------------------------ Découpage d’un jeton ------------------------ */

/// Jeton `[-+]?\d+(\.\d+)?([eE][+-]?\d+)?` découpé en morceaux (slices du jeton).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Decoupe<'a> {
    signe: &'a str,
    entier: &'a str,
    fraction: &'a str,
    exposant: Option<&'a str>,
}

fn decouper(jeton: &str) -> Option<Decoupe<'_>> {
    let b = jeton.as_bytes();
    let n = b.len();

    let mut i = 0;
    if matches!(b.first(), Some(b'-') | Some(b'+')) {
        i = 1;
    }
    let signe = &jeton[..i];

    let d0 = i;
    while i < n && b[i].is_ascii_digit() {
        i += 1;
    }
    if i == d0 {
        return None;
    }
    let entier = &jeton[d0..i];

    let mut fraction = "";
    if i < n && b[i] == b'.' {
        let f0 = i + 1;
        let mut j = f0;
        while j < n && b[j].is_ascii_digit() {
            j += 1;
        }
        if j == f0 {
            return None;
        }
        fraction = &jeton[f0..j];
        i = j;
    }

    let mut exposant = None;
    if i < n && (b[i] == b'e' || b[i] == b'E') {
        let e0 = i + 1;
        let mut j = e0;
        if j < n && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let c0 = j;
        while j < n && b[j].is_ascii_digit() {
            j += 1;
        }
        if j == c0 {
            return None;
        }
        exposant = Some(&jeton[e0..j]);
        i = j;
    }

    if i != n {
        return None;
    }

    Some(Decoupe {
        signe,
        entier,
        fraction,
        exposant,
    })
}

/* ------------------------ Groupement des milliers ------------------------ */

/// "1234567" -> "1,234,567" (chiffres seulement, sans signe).
pub fn grouper_milliers(chiffres: &str) -> String {
    let n = chiffres.len();
    let mut out = String::with_capacity(n + n / 3);
    for (i, c) in chiffres.chars().enumerate() {
        if i > 0 && (n - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/* ------------------------ Notation scientifique ------------------------ */

fn ecrire_scientifique(
    signe: &str,
    entier: &str,
    fraction: &str,
    exposant: i64,
    precision: usize,
) -> String {
    let Some((chiffres, e)) = decimal::mantisse(entier, fraction, exposant, precision) else {
        return format!("{signe}0e+0");
    };

    // zéros finaux retirés avant le marqueur d’exposant
    let (tete, reste) = chiffres.split_at(1);
    let reste = reste.trim_end_matches('0');
    let signe_exp = if e < 0 { '-' } else { '+' };

    if reste.is_empty() {
        format!("{signe}{tete}e{signe_exp}{}", e.unsigned_abs())
    } else {
        format!("{signe}{tete}.{reste}e{signe_exp}{}", e.unsigned_abs())
    }
}

/// Meilleur ajustement : 5 chiffres de mantisse, puis 4, 3… jusqu’à 1 chiffre
/// significatif. La longueur ne croît jamais quand la précision baisse.
/// Si rien ne tient, on rend le dernier candidat (dépassement assumé).
fn scientifique_ajuste(signe: &str, entier: &str, fraction: &str, exposant: i64) -> String {
    let mut candidat = String::new();
    for precision in (0..=PRECISION_SCI_DEPART).rev() {
        candidat = ecrire_scientifique(signe, entier, fraction, exposant, precision);
        if candidat.len() <= LARGEUR_AFFICHAGE {
            break;
        }
    }
    candidat
}

/* ------------------------ Nombre ------------------------ */

/// Formate un jeton numérique pour l’écran.
///
/// - scientifique déjà (`1.5e+21`) : tel quel s’il tient, sinon ré-ajusté
/// - non numérique : tel quel
/// - décimal : milliers groupés, fraction arrondie à la place restante,
///   scientifique si la partie entière dépasse
pub fn formater_nombre(jeton: &str) -> String {
    let Some(d) = decouper(jeton) else {
        return jeton.to_string();
    };

    match d.exposant {
        Some(_) if jeton.len() <= LARGEUR_AFFICHAGE => jeton.to_string(),
        Some(exp) => match exp.parse::<i64>() {
            Ok(e) => scientifique_ajuste(d.signe, d.entier, d.fraction, e),
            // exposant hors i64 : on coupe au budget
            Err(_) => jeton.chars().take(LARGEUR_AFFICHAGE).collect(),
        },
        None => formater_decimal(d.signe, d.entier, d.fraction),
    }
}

fn assembler(signe: &str, groupe: &str, fraction: &str) -> String {
    if fraction.is_empty() {
        format!("{signe}{groupe}")
    } else {
        format!("{signe}{groupe}.{fraction}")
    }
}

fn formater_decimal(signe: &str, entier: &str, fraction: &str) -> String {
    let groupe = grouper_milliers(entier);
    let longueur_entiere = signe.len() + groupe.len();

    if longueur_entiere > LARGEUR_AFFICHAGE || entier.len() > CHIFFRES_ENTIERS_MAX {
        return scientifique_ajuste(signe, entier, fraction, 0);
    }

    if fraction.is_empty() {
        return assembler(signe, &groupe, "");
    }

    // place restante après l’entier et le point
    let dispo = LARGEUR_AFFICHAGE as isize - longueur_entiere as isize - 1;
    let valeur = decimal::rationnel(entier, fraction);

    if dispo <= 0 {
        // pas de place pour la fraction : entier le plus proche, reformaté
        let (arrondi, _) = decimal::arrondir(&valeur, 0);
        return formater_nombre(&format!("{signe}{arrondi}"));
    }

    let dispo = dispo as usize;
    if fraction.len() <= dispo {
        return assembler(signe, &groupe, fraction);
    }

    let (ent, frac) = decimal::arrondir(&valeur, dispo);
    let frac = frac.trim_end_matches('0');

    // retenue dans la partie entière (9.99… -> 10) : la largeur a pu changer
    if ent != decimal::entier(entier) {
        return formater_nombre(&assembler(signe, &ent.to_str_radix(10), frac));
    }

    assembler(signe, &groupe, frac)
}

/* ------------------------ Expression ------------------------ */

/// Morceau d’expression : jeton numérique ou tout le reste (opérateurs, noms…).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Nombre(&'a str),
    Autre(&'a str),
}

fn est_ident(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Fin d’un nombre commençant en `i` : `-?\d+(\.\d+)?([eE][+-]?\d+)?`.
fn fin_nombre(b: &[u8], mut i: usize) -> usize {
    if b[i] == b'-' {
        i += 1;
    }
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }

    if i + 1 < b.len() && b[i] == b'.' && b[i + 1].is_ascii_digit() {
        i += 1;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
    }

    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let c0 = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > c0 {
            i = j;
        }
    }

    i
}

/// Petit lexer : découpe l’expression en segments {Nombre, Autre}.
///
/// Un nombre ne commence jamais juste après un caractère d’identifiant
/// (`x2`, `log10` restent du texte). Un '-' n’en fait partie que s’il suit
/// autre chose qu’un identifiant : `5-3` garde l’opérateur, `(-3` porte le signe.
pub fn decouper_segments(expr: &str) -> Vec<Segment<'_>> {
    let b = expr.as_bytes();
    let mut out = Vec::new();
    let mut debut_autre = 0;
    let mut i = 0;

    while i < b.len() {
        let apres_ident = i > 0 && est_ident(b[i - 1]);
        let commence = !apres_ident
            && (b[i].is_ascii_digit()
                || (b[i] == b'-' && b.get(i + 1).is_some_and(u8::is_ascii_digit)));
        if !commence {
            i += 1;
            continue;
        }

        let fin = fin_nombre(b, i);
        if debut_autre < i {
            out.push(Segment::Autre(&expr[debut_autre..i]));
        }
        out.push(Segment::Nombre(&expr[i..fin]));
        i = fin;
        debut_autre = fin;
    }

    if debut_autre < b.len() {
        out.push(Segment::Autre(&expr[debut_autre..]));
    }
    out
}

/// Formate le tampon pour l’écran : "0" si vide, "Error" tel quel,
/// sinon chaque jeton numérique passe par formater_nombre.
pub fn formater_expr(expr: &str) -> String {
    if expr.is_empty() {
        return "0".to_string();
    }
    if expr == MARQUEUR_ERREUR {
        return expr.to_string();
    }

    decouper_segments(expr)
        .into_iter()
        .map(|s| match s {
            Segment::Nombre(n) => formater_nombre(n),
            Segment::Autre(a) => a.to_string(),
        })
        .collect()
}
