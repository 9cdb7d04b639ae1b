//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler formateur et évaluateur sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariants clés :
//!   * tout résultat brut tient dans l’écran une fois formaté
//!   * un nombre qui tient déjà n’est modifié que par les virgules
//!   * le formateur ne touche jamais aux caractères non numériques

use std::time::{Duration, Instant};

use super::format::LARGEUR_AFFICHAGE;
use super::{eval_expression, formater_expr, formater_nombre};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération (bornée) ------------------------ */

fn gen_chiffres(rng: &mut Rng, n: usize) -> String {
    (0..n)
        .map(|_| char::from(b'0' + rng.pick(10) as u8))
        .collect()
}

/// Décimal signé quelconque (entier jusqu’à 25 chiffres, fraction jusqu’à 20).
fn gen_decimal(rng: &mut Rng) -> String {
    let signe = if rng.coin() { "-" } else { "" };
    let n = 1 + rng.pick(25) as usize;
    let entier = gen_chiffres(rng, n);
    if rng.coin() {
        let n = 1 + rng.pick(20) as usize;
        let fraction = gen_chiffres(rng, n);
        format!("{signe}{entier}.{fraction}")
    } else {
        format!("{signe}{entier}")
    }
}

/// Nombre qui tient toujours : 7 chiffres entiers max, 2 décimales max.
fn gen_court(rng: &mut Rng) -> String {
    let n = 1 + rng.pick(7) as usize;
    let mut entier = gen_chiffres(rng, n);
    // pas de zéros de tête : le formateur les garderait, mais l’évaluation aussi
    if entier.len() > 1 && entier.starts_with('0') {
        entier.replace_range(0..1, "1");
    }
    if rng.coin() {
        let n = 1 + rng.pick(2) as usize;
        let fraction = gen_chiffres(rng, n);
        format!("{entier}.{fraction}")
    } else {
        entier
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(7) {
        0 => "pi".to_string(),
        1 => "e".to_string(),
        2 => format!("sqrt({})", gen_court(rng)),
        3 => format!("ln({})", gen_court(rng)),
        4 => format!("log({})", gen_court(rng)),
        5 => format!("{}!", rng.pick(12)),
        _ => gen_court(rng),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let a = gen_expr(rng, depth - 1);
    let b = gen_expr(rng, depth - 1);
    match rng.pick(8) {
        0 => gen_atom(rng),
        1 => format!("({a}+{b})"),
        2 => format!("({a}-{b})"),
        3 => format!("({a}*{b})"),
        4 => format!("({a}/{b})"),
        5 => format!("sin({a})"),
        6 => format!("cos({a})*{b}"),
        _ => format!("-{a}"),
    }
}

/* ------------------------ Formateur ------------------------ */

#[test]
fn fuzz_decimaux_largeur_et_valeur() {
    let start = Instant::now();
    let max = Duration::from_secs(3);
    let mut rng = Rng::new(0x5EED_CA1C);

    for _ in 0..3000 {
        budget(start, max);

        let t = gen_decimal(&mut rng);
        let s = formater_nombre(&t);
        assert!(s.len() <= LARGEUR_AFFICHAGE, "{t:?} -> {s:?}");
        assert_eq!(s, formater_nombre(&t), "non déterministe pour {t:?}");

        // valeur préservée (écart d’arrondi seulement)
        let o: f64 = t.parse().unwrap();
        let f: f64 = s.replace(',', "").parse().unwrap_or_else(|_| panic!("{s:?}"));
        assert!(
            (f - o).abs() <= o.abs() * 1e-5 + 0.5,
            "{t:?} -> {s:?} ({f} vs {o})"
        );
    }
}

#[test]
fn fuzz_expressions_seules_les_virgules_changent() {
    let start = Instant::now();
    let max = Duration::from_secs(3);
    let mut rng = Rng::new(42);

    for _ in 0..800 {
        budget(start, max);

        let depth = rng.pick(4) as usize;
        let expr = gen_expr(&mut rng, depth);
        let affiche = formater_expr(&expr);

        assert_eq!(affiche.replace(',', ""), expr, "expr={expr:?} affiche={affiche:?}");
    }
}

/* ------------------------ Évaluateur ------------------------ */

#[test]
fn fuzz_evaluation_resultat_affichable() {
    let start = Instant::now();
    let max = Duration::from_secs(3);
    let mut rng = Rng::new(7);

    let mut ok = 0usize;
    for _ in 0..800 {
        budget(start, max);

        let depth = rng.pick(4) as usize;
        let expr = gen_expr(&mut rng, depth);

        match eval_expression(&expr) {
            Ok(brut) => {
                ok += 1;
                let v: f64 = brut
                    .parse()
                    .unwrap_or_else(|_| panic!("brut illisible {brut:?} pour {expr:?}"));
                assert!(v.is_finite());

                let s = formater_nombre(&brut);
                assert!(s.len() <= LARGEUR_AFFICHAGE, "{expr:?} -> {brut:?} -> {s:?}");

                // chaîner le brut redonne la même valeur
                assert_eq!(eval_expression(&brut), Ok(brut.clone()), "expr={expr:?}");
            }
            Err(e) => {
                // domaine : ln/log de 0, division par 0, débordements
                let msg = e.to_string();
                assert!(msg.contains("non fini"), "expr={expr:?} err={msg}");
            }
        }
    }

    // la grande majorité doit passer
    assert!(ok > 400, "seulement {ok} évaluations réussies");
}
