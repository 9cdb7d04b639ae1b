//! Noyau — évaluation
//!
//! evaluer         : capacité générique  tokenize -> RPN -> valeur f64, sur une Portee
//! eval_expression : adaptateur calculatrice (portée fixe ln/log/pi/e, rejet du non-fini,
//!                   texte canonique du résultat)
//!
//! Le texte canonique est ce qui retourne dans le tampon : pleine précision, jamais formaté.

use super::erreur::ErreurEval;
use super::jetons::{format_tokens, tokenize};
use super::portee::Portee;
use super::rpn::{eval_rpn, to_rpn};

/// Capacité d’évaluation : expression + portée explicite -> nombre.
pub fn evaluer(expr_str: &str, portee: &Portee) -> Result<f64, ErreurEval> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurEval::Vide);
    }

    let jetons = tokenize(s)?;
    log::trace!("jetons: {}", format_tokens(&jetons));

    let rpn = to_rpn(&jetons)?;
    eval_rpn(&rpn, portee)
}

/// API publique : évalue une expression de la calculatrice.
/// - Ok(texte canonique) si le résultat est un réel fini
/// - Err sinon (syntaxe, symbole, NaN, ±∞) ; l’appelant affiche "Error"
pub fn eval_expression(expr_str: &str) -> Result<String, ErreurEval> {
    let v = evaluer(expr_str, &Portee::calculatrice())?;
    if !v.is_finite() {
        return Err(ErreurEval::NonFini(v));
    }

    let texte = texte_canonique(v);
    log::trace!("{expr_str} => {texte}");
    Ok(texte)
}

/// Texte décimal canonique d’un f64 :
/// - chiffres les plus courts qui relisent la même valeur
/// - notation fixe pour 1e-7 < |x| < 1e21, sinon "1e+21" / "1.5e-7"
/// - -0 devient "0"
pub fn texte_canonique(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }

    let signe = if x < 0.0 { "-" } else { "" };

    // "{:e}" donne les chiffres les plus courts : "1.2345e-7", "4e0"
    let sci = format!("{:e}", x.abs());
    let (mantisse, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i64 = exp.parse().unwrap_or(0);

    let chiffres: String = mantisse.chars().filter(char::is_ascii_digit).collect();
    let k = chiffres.len() as i64;
    // valeur = 0.chiffres × 10^n
    let n = exp + 1;

    let corps = if k <= n && n <= 21 {
        format!("{chiffres}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (a, b) = chiffres.split_at(n as usize);
        format!("{a}.{b}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{chiffres}", "0".repeat((-n) as usize))
    } else {
        let e = n - 1;
        let signe_exp = if e < 0 { '-' } else { '+' };
        let (tete, reste) = chiffres.split_at(1);
        if reste.is_empty() {
            format!("{tete}e{signe_exp}{}", e.unsigned_abs())
        } else {
            format!("{tete}.{reste}e{signe_exp}{}", e.unsigned_abs())
        }
    };

    format!("{signe}{corps}")
}
