// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur (f64)
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis évaluer la RPN sur une pile, avec une Portee
//
// Règles:
// - Ident(name) suivi de '(' => appel de fonction (sort après la parenthèse fermante)
// - Ident(name) seul        => constante (résolue à l’évaluation)
// - Moins unaire: si '-' arrive quand on n’attend PAS d’opérateur => Neg
//   (Neg lie plus fort que * et /, moins fort que ^ : -2^2 = -4, 2*-3 = -6)
// - '!' postfixe : sort directement (il lie plus fort que tout, 2^3! = 2^6)
// - Multiplication implicite : valeur suivie de nombre / ident / '(' => '*'

use super::erreur::ErreurEval;
use super::jetons::Tok;
use super::portee::{Portee, Symbole};

#[derive(Clone, Debug, PartialEq)]
pub enum Rpn {
    Num(f64),
    Const(String),
    Appel(String),

    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Neg,
    Fact,
}

/// Ce qui attend sur la pile des opérateurs.
#[derive(Clone, Debug)]
enum SurPile {
    Op(Rpn),
    LPar,
    Fonction(String),
}

fn precedence(op: &Rpn) -> i32 {
    match op {
        Rpn::Add | Rpn::Sub => 1,
        Rpn::Mul | Rpn::Div => 2,
        Rpn::Neg => 3,
        Rpn::Pow => 4,
        _ => 0,
    }
}

fn is_right_associative(op: &Rpn) -> bool {
    matches!(op, Rpn::Pow)
}

/// Dépile tant que la précédence/associativité l’exige, puis empile `op`.
/// On ne traverse jamais '(' ni une fonction (elle reste collée à son argument).
fn pousser_binaire(op: Rpn, out: &mut Vec<Rpn>, ops: &mut Vec<SurPile>) {
    while let Some(SurPile::Op(top)) = ops.last() {
        let p_top = precedence(top);
        let p_op = precedence(&op);

        let doit_pop = if is_right_associative(&op) {
            p_top > p_op
        } else {
            p_top >= p_op
        };
        if !doit_pop {
            break;
        }

        out.push(top.clone());
        ops.pop();
    }

    ops.push(SurPile::Op(op));
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Ident("pi"), Slash, Num(2), RPar]
///   rpn:    [Const("pi"), Num(2), Div, Appel("sin")]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, ErreurEval> {
    let mut out: Vec<Rpn> = Vec::new();
    let mut ops: Vec<SurPile> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et la multiplication implicite.
    let mut prev_was_value = false;

    let mut iter = tokens.iter().peekable();
    while let Some(tok) = iter.next() {
        let commence_valeur = matches!(tok, Tok::Num(_) | Tok::Ident(_) | Tok::LPar);
        if commence_valeur && prev_was_value {
            pousser_binaire(Rpn::Mul, &mut out, &mut ops);
        }

        match tok {
            Tok::Num(v) => {
                out.push(Rpn::Num(*v));
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if matches!(iter.peek(), Some(Tok::LPar)) {
                    // fonction : on la garde sur la pile (elle sortira après son argument)
                    ops.push(SurPile::Fonction(name.clone()));
                    prev_was_value = false;
                } else {
                    out.push(Rpn::Const(name.clone()));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                ops.push(SurPile::LPar);
                prev_was_value = false;
            }

            Tok::RPar => {
                // "()" ou "(2+)" : rien à fermer
                if !prev_was_value {
                    return Err(ErreurEval::Syntaxe);
                }

                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        None => return Err(ErreurEval::Parentheses),
                        Some(SurPile::LPar) => break,
                        Some(SurPile::Op(op)) => out.push(op),
                        Some(SurPile::Fonction(_)) => return Err(ErreurEval::Syntaxe),
                    }
                }

                // si une fonction est au sommet, on la sort aussi
                if let Some(SurPile::Fonction(_)) = ops.last() {
                    if let Some(SurPile::Fonction(name)) = ops.pop() {
                        out.push(Rpn::Appel(name));
                    }
                }

                prev_was_value = true;
            }

            Tok::Bang => {
                if !prev_was_value {
                    return Err(ErreurEval::Syntaxe);
                }
                out.push(Rpn::Fact);
            }

            // signes unaires
            Tok::Minus if !prev_was_value => ops.push(SurPile::Op(Rpn::Neg)),
            Tok::Plus if !prev_was_value => {}

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if !prev_was_value {
                    return Err(ErreurEval::Syntaxe);
                }

                let op = match tok {
                    Tok::Plus => Rpn::Add,
                    Tok::Minus => Rpn::Sub,
                    Tok::Star => Rpn::Mul,
                    Tok::Slash => Rpn::Div,
                    _ => Rpn::Pow,
                };
                pousser_binaire(op, &mut out, &mut ops);
                prev_was_value = false;
            }
        }
    }

    // vide la pile ops
    while let Some(top) = ops.pop() {
        match top {
            SurPile::Op(op) => out.push(op),
            SurPile::LPar | SurPile::Fonction(_) => return Err(ErreurEval::Parentheses),
        }
    }

    Ok(out)
}

/// Évalue une RPN sur une pile de f64.
/// Les symboles sont résolus dans `portee` (portée locale puis défauts).
pub fn eval_rpn(rpn: &[Rpn], portee: &Portee) -> Result<f64, ErreurEval> {
    let mut st: Vec<f64> = Vec::new();

    for op in rpn {
        match op {
            Rpn::Num(v) => st.push(*v),

            Rpn::Const(name) => match portee.resoudre(name) {
                Some(Symbole::Constante(v)) => st.push(v),
                Some(Symbole::Fonction(_)) => {
                    return Err(ErreurEval::FonctionSansAppel(name.clone()))
                }
                None => return Err(ErreurEval::SymboleInconnu(name.clone())),
            },

            Rpn::Appel(name) => {
                let x = st.pop().ok_or(ErreurEval::Syntaxe)?;
                match portee.resoudre(name) {
                    Some(Symbole::Fonction(f)) => st.push(f(x)),
                    Some(Symbole::Constante(_)) => {
                        return Err(ErreurEval::PasUneFonction(name.clone()))
                    }
                    None => return Err(ErreurEval::SymboleInconnu(name.clone())),
                }
            }

            Rpn::Neg => {
                let x = st.pop().ok_or(ErreurEval::Syntaxe)?;
                st.push(-x);
            }

            Rpn::Fact => {
                let x = st.pop().ok_or(ErreurEval::Syntaxe)?;
                st.push(factorielle(x)?);
            }

            Rpn::Add | Rpn::Sub | Rpn::Mul | Rpn::Div | Rpn::Pow => {
                let b = st.pop().ok_or(ErreurEval::Syntaxe)?;
                let a = st.pop().ok_or(ErreurEval::Syntaxe)?;

                let v = match op {
                    Rpn::Add => a + b,
                    Rpn::Sub => a - b,
                    Rpn::Mul => a * b,
                    Rpn::Div => a / b,
                    _ => a.powf(b),
                };
                st.push(v);
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(v), true) => Ok(v),
        _ => Err(ErreurEval::Syntaxe),
    }
}

/// n! pour n entier naturel. Au-delà de 170!, f64 déborde (=> infini, rejeté plus haut).
/// Pas de prolongement gamma : `2.5!` est une erreur, pas ≈ 3.323.
fn factorielle(x: f64) -> Result<f64, ErreurEval> {
    if !x.is_finite() || x < 0.0 || x.fract() != 0.0 {
        return Err(ErreurEval::Factorielle);
    }
    if x > 170.0 {
        return Ok(f64::INFINITY);
    }

    let mut acc = 1.0;
    let mut k = 2.0;
    while k <= x {
        acc *= k;
        k += 1.0;
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::jetons::tokenize;

    fn rpn(s: &str) -> Vec<Rpn> {
        to_rpn(&tokenize(s).unwrap()).unwrap()
    }

    fn val(s: &str) -> f64 {
        eval_rpn(&rpn(s), &Portee::calculatrice()).unwrap()
    }

    #[test]
    fn fonction_sort_apres_son_argument() {
        assert_eq!(
            rpn("sin(pi/2)"),
            vec![
                Rpn::Const("pi".into()),
                Rpn::Num(2.0),
                Rpn::Div,
                Rpn::Appel("sin".into()),
            ]
        );
    }

    #[test]
    fn precedences() {
        assert_eq!(val("1+2*3"), 7.0);
        assert_eq!(val("(1+2)*3"), 9.0);
        assert_eq!(val("2^3^2"), 512.0);
        assert_eq!(val("-2^2"), -4.0);
        assert_eq!(val("2*-3"), -6.0);
        assert_eq!(val("2^-1"), 0.5);
        assert_eq!(val("10-4-3"), 3.0);
        assert_eq!(val("2^3!"), 64.0);
        assert_eq!(val("-3!"), -6.0);
        assert_eq!(val("2++3"), 5.0);
    }

    #[test]
    fn multiplication_implicite() {
        assert_eq!(val("2(3+1)"), 8.0);
        assert_eq!(val("(1+1)(2+2)"), 8.0);
        assert_eq!(val("3!2"), 12.0);
        assert!((val("2pi") - 2.0 * std::f64::consts::PI).abs() < 1e-15);
    }

    #[test]
    fn factorielles() {
        assert_eq!(val("0!"), 1.0);
        assert_eq!(val("5!"), 120.0);
        assert!(val("171!").is_infinite());
        let r = eval_rpn(&rpn("2.5!"), &Portee::calculatrice());
        assert_eq!(r, Err(ErreurEval::Factorielle));
    }

    #[test]
    fn parentheses_desequilibrees() {
        assert_eq!(to_rpn(&tokenize("(1+2").unwrap()), Err(ErreurEval::Parentheses));
        assert_eq!(to_rpn(&tokenize("1+2)").unwrap()), Err(ErreurEval::Parentheses));
        assert_eq!(to_rpn(&tokenize("sin(").unwrap()), Err(ErreurEval::Parentheses));
        assert_eq!(to_rpn(&tokenize("()").unwrap()), Err(ErreurEval::Syntaxe));
    }

    #[test]
    fn operateurs_orphelins() {
        assert_eq!(to_rpn(&tokenize("2*/3").unwrap()), Err(ErreurEval::Syntaxe));
        assert_eq!(to_rpn(&tokenize("!2").unwrap()), Err(ErreurEval::Syntaxe));
        let r = eval_rpn(&rpn("2+"), &Portee::calculatrice());
        assert_eq!(r, Err(ErreurEval::Syntaxe));
    }

    #[test]
    fn symboles_mal_employes() {
        let p = Portee::calculatrice();
        assert_eq!(
            eval_rpn(&rpn("foo+1"), &p),
            Err(ErreurEval::SymboleInconnu("foo".into()))
        );
        assert_eq!(
            eval_rpn(&rpn("pi(2)"), &p),
            Err(ErreurEval::PasUneFonction("pi".into()))
        );
        assert_eq!(
            eval_rpn(&rpn("sin+1"), &p),
            Err(ErreurEval::FonctionSansAppel("sin".into()))
        );
    }
}
