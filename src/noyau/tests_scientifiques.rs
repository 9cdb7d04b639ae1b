//! Tests scientifiques (campagne) : oracles fixes + invariants de largeur.
//!
//! But : verrouiller le contrat d’affichage (13 caractères) et l’adaptateur
//! d’évaluation sans dépendre de l’UI.
//! - oracles : valeurs exactes attendues à l’écran
//! - invariants : largeur, déterminisme, brut conservé dans le tampon
//! - budget temps global pour les balayages

use std::time::{Duration, Instant};

use super::erreur::ErreurEval;
use super::format::LARGEUR_AFFICHAGE;
use super::{eval_expression, formater_expr, formater_nombre};

fn eval_ok(expr: &str) -> String {
    eval_expression(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_tient(jeton: &str) {
    let s = formater_nombre(jeton);
    assert!(
        s.len() <= LARGEUR_AFFICHAGE,
        "{jeton:?} -> {s:?} ({} > {LARGEUR_AFFICHAGE})",
        s.len()
    );
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Oracles formatNumber ------------------------ */

#[test]
fn sci_oracles_nombre() {
    assert_eq!(formater_nombre("0"), "0");
    assert_eq!(formater_nombre("-0"), "-0");
    assert_eq!(formater_nombre("1234567"), "1,234,567");

    let s = formater_nombre("12345678901234");
    assert!(s.contains("e+13"), "{s:?}");
    assert!(s.len() <= LARGEUR_AFFICHAGE);
}

/* ------------------------ Oracles formatExpr ------------------------ */

#[test]
fn sci_oracles_expression() {
    assert_eq!(formater_expr(""), "0");
    assert_eq!(formater_expr("Error"), "Error");
    assert_eq!(formater_expr("12345+6"), "12,345+6");
    assert_eq!(formater_expr("sin(1234)+cos(56789)"), "sin(1,234)+cos(56,789)");
    assert_eq!(formater_expr("ln(e)^2!"), "ln(e)^2!");
}

/* ------------------------ Largeur ------------------------ */

#[test]
fn sci_largeur_entiers_toutes_tailles() {
    let start = Instant::now();
    let max = Duration::from_secs(2);

    let mut s = String::new();
    for k in 1..=40 {
        s.push(char::from(b'0' + (k % 10) as u8));
        budget(start, max);
        assert_tient(&s);
        assert_tient(&format!("-{s}"));
        assert_tient(&format!("{s}.5"));
        assert_tient(&format!("-{s}.123456789012345"));
    }
}

#[test]
fn sci_largeur_petites_fractions() {
    for z in 0..30 {
        let t = format!("0.{}123456789", "0".repeat(z));
        assert_tient(&t);
        assert_tient(&format!("-{t}"));
    }
}

#[test]
fn sci_largeur_resultats_extremes() {
    for x in [
        f64::MAX,
        f64::MIN,
        f64::MIN_POSITIVE,
        -f64::MIN_POSITIVE,
        1.0 / 3.0,
        -2.0 / 3.0,
        123456789.123456789,
        9.999999999999999e20,
        1e21,
        5e-324,
    ] {
        let brut = super::eval::texte_canonique(x);
        assert_tient(&brut);
    }
}

/* ------------------------ Adaptateur ------------------------ */

#[test]
fn sci_portee_fonctions() {
    assert_eq!(eval_ok("sin(0)"), "0");
    assert_eq!(eval_ok("ln(e)"), "1");
    assert_eq!(eval_ok("log(100)"), "2");
}

#[test]
fn sci_aller_retour_brut() {
    let r = eval_ok("2+2");
    assert_eq!(r, "4");
    assert_eq!(eval_ok(&format!("{r}*2")), "8");

    // le brut garde la pleine précision, l’écran arrondit
    let r = eval_ok("2/3");
    assert_eq!(r, "0.6666666666666666");
    assert_eq!(formater_expr(&r), "0.66666666667");
    assert_eq!(eval_ok(&format!("{r}*3")), "2");
}

#[test]
fn sci_malformees() {
    for expr in ["(1+2", "1+2)", "sin(", "2**3", "*", "pi pi(", "Error"] {
        assert!(eval_expression(expr).is_err(), "expr={expr:?}");
    }
    assert_eq!(eval_expression("(1+2"), Err(ErreurEval::Parentheses));
}

#[test]
fn sci_determinisme() {
    for t in ["1234567.891", "12345678901234", "-0.000123456789012", "1.5e+300"] {
        assert_eq!(formater_nombre(t), formater_nombre(t));
    }
    for e in ["sqrt(2)", "0.1+0.2", "3!^2"] {
        assert_eq!(eval_expression(e), eval_expression(e));
    }
}
