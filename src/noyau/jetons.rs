// src/noyau/jetons.rs

use super::erreur::ErreurEval;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Fonctions + constantes (tout ce qui n’est pas opérateur / nombre)
    // NOTE: la RPN décidera si c’est un appel (suivi de '(') ou une constante.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^
    Bang,  // ! (factorielle, postfixe)

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - décimaux (ex: 12, 1.5, .5, 5.)
/// - exposant collé (ex: 1e+21, 2.5E-3) ; "2e" seul reste 2 puis ident("e")
/// - opérateurs + - * / ^ ! (et × ÷ − des libellés de boutons)
/// - parenthèses ( )
/// - π (équivaut à ident("pi")), √ (équivaut à ident("sqrt"))
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurEval> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Parenthèses + opérateurs
        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' | '−' => Some(Tok::Minus),
            '*' | '×' => Some(Tok::Star),
            '/' | '÷' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '!' => Some(Tok::Bang),
            'π' => Some(Tok::Ident("pi".to_string())),
            '√' => Some(Tok::Ident("sqrt".to_string())),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word.to_lowercase()));
            continue;
        }

        // Nombre décimal (+ exposant éventuel)
        let debut_nombre =
            c.is_ascii_digit() || (c == '.' && chars.get(i + 1).is_some_and(char::is_ascii_digit));
        if debut_nombre {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            i = fin_exposant(&chars, i);

            let txt: String = chars[start..i].iter().collect();

            // "1.2.3" : un second point collé n’est jamais un nouveau nombre
            if i < chars.len() && chars[i] == '.' {
                return Err(ErreurEval::Nombre(format!("{txt}.")));
            }

            let v = txt
                .parse::<f64>()
                .map_err(|_| ErreurEval::Nombre(txt.clone()))?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(ErreurEval::Caractere(c));
    }

    Ok(out)
}

/// Avance après un suffixe d’exposant `e[+-]?\d+` s’il est complet, sinon ne bouge pas.
fn fin_exposant(chars: &[char], i: usize) -> usize {
    if !matches!(chars.get(i), Some('e') | Some('E')) {
        return i;
    }

    let mut j = i + 1;
    if matches!(chars.get(j), Some('+') | Some('-')) {
        j += 1;
    }

    let debut_chiffres = j;
    while j < chars.len() && chars[j].is_ascii_digit() {
        j += 1;
    }

    if j == debut_chiffres {
        i
    } else {
        j
    }
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Bang => "!".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
