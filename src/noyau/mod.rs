//! Noyau de la calculatrice
//!
//! Organisation interne :
//! - erreur.rs     : ErreurEval (thiserror)
//! - jetons.rs     : tokenisation
//! - rpn.rs        : shunting-yard + évaluation de la RPN
//! - portee.rs     : portée (constantes / fonctions) + défauts de l’évaluateur
//! - eval.rs       : capacité `evaluer` + adaptateur `eval_expression`
//! - decimal.rs    : arrondis décimaux exacts (num-bigint / num-rational)
//! - format.rs     : affichage borné (13 caractères) des nombres et expressions
//! - historique.rs : fenêtre FIFO des 3 derniers calculs

pub mod decimal;
pub mod erreur;
pub mod eval;
pub mod format;
pub mod historique;
pub mod jetons;
pub mod portee;
pub mod rpn;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::eval_expression;
pub use format::{formater_expr, formater_nombre, MARQUEUR_ERREUR};
pub use historique::Historique;
