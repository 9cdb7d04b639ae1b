// src/noyau/erreur.rs
//
// Erreurs d’évaluation (jetons, RPN, portée, résultat).
// L’UI n’en affiche aucune : tout se replie sur "Error", la cause part dans le journal.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurEval {
    #[error("entrée vide")]
    Vide,

    #[error("caractère inattendu: '{0}'")]
    Caractere(char),

    #[error("nombre invalide: {0}")]
    Nombre(String),

    #[error("parenthèses non équilibrées")]
    Parentheses,

    #[error("expression invalide")]
    Syntaxe,

    #[error("symbole inconnu: {0}")]
    SymboleInconnu(String),

    #[error("{0} n’est pas une fonction")]
    PasUneFonction(String),

    #[error("{0} est une fonction (appel sans parenthèses)")]
    FonctionSansAppel(String),

    #[error("factorielle : entier naturel attendu")]
    Factorielle,

    #[error("résultat non fini ({0})")]
    NonFini(f64),
}
