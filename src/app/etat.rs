//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir le tampon d’expression (texte BRUT) + la fenêtre d’historique,
//! et offrir les actions des boutons (AC, C, ±, %, =) sans logique d’affichage.
//!
//! Contrats :
//! - Le tampon n’est jamais formaté : l’écran passe par `formater_expr` à chaque rendu.
//! - Évaluation tout-ou-rien : succès => tampon = résultat brut + ligne d’historique ;
//!   échec => tampon = "Error", historique intact.

use crate::noyau::{eval_expression, formater_expr, formater_nombre, Historique, MARQUEUR_ERREUR};

/// Caractères acceptés depuis le clavier (le reste est ignoré).
const VOCABULAIRE: &str = "0123456789.+-*/^!()abcdefghijklmnopqrstuvwxyz";

#[derive(Clone, Debug, Default)]
pub struct AppCalc {
    // --- entrée utilisateur (brute) ---
    pub entree: String,

    // --- 3 derniers calculs "expression=résultat" ---
    pub historique: Historique,
}

fn est_ident(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Repère le nombre en fin de tampon (espaces finaux ignorés).
/// Retourne (début, fin) dans `s` ; `fin` exclut les espaces finaux.
///
/// - un nombre collé à un identifiant (`x2`, `log10`) n’en est pas un
/// - avec `avec_signe`, un '-' qui ne suit pas un identifiant est inclus
fn nombre_final(s: &str, avec_signe: bool) -> Option<(usize, usize)> {
    let fin = s.trim_end().len();
    let b = &s.as_bytes()[..fin];

    let mut i = fin;
    while i > 0 && b[i - 1].is_ascii_digit() {
        i -= 1;
    }
    if i == fin {
        return None;
    }

    // partie fractionnaire : "\d+.\d+"
    if i >= 2 && b[i - 1] == b'.' && b[i - 2].is_ascii_digit() {
        i -= 1;
        while i > 0 && b[i - 1].is_ascii_digit() {
            i -= 1;
        }
    }

    if i > 0 && est_ident(b[i - 1]) {
        return None;
    }

    if avec_signe && i > 0 && b[i - 1] == b'-' && (i == 1 || !est_ident(b[i - 2])) {
        i -= 1;
    }

    Some((i, fin))
}

impl AppCalc {
    /* ------------------------ Affichage ------------------------ */

    /// Tampon formaté pour l’écran (13 caractères par nombre).
    pub fn affichage(&self) -> String {
        formater_expr(&self.entree)
    }

    /// Historique, du plus ancien au plus récent.
    pub fn lignes_historique(&self) -> impl Iterator<Item = &str> {
        self.historique.lignes()
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    /// Ajoute un jeton tel quel ("7", "sin(", "pi", "^"…).
    pub fn ajouter(&mut self, jeton: &str) {
        self.entree.push_str(jeton);
    }

    /// Frappe clavier : '=' évalue, le vocabulaire passe par `ajouter`
    /// (en minuscules), le reste est ignoré.
    pub fn saisir(&mut self, c: char) {
        if c == '=' {
            self.evaluer();
            return;
        }
        let c = c.to_ascii_lowercase();
        if VOCABULAIRE.contains(c) {
            self.ajouter(c.encode_utf8(&mut [0; 4]));
        }
    }

    /// C : retire le dernier caractère.
    pub fn retour_arriere(&mut self) {
        self.entree.pop();
    }

    /// AC : vide le tampon (l’historique reste).
    pub fn effacer_tout(&mut self) {
        self.entree.clear();
    }

    /// ± : inverse le signe du dernier nombre ("12+5" -> "12+-5", "-5" -> "5").
    pub fn inverser_signe(&mut self) {
        let Some((debut, fin)) = nombre_final(&self.entree, true) else {
            return;
        };

        let nombre = &self.entree[debut..fin];
        let inverse = match nombre.strip_prefix('-') {
            Some(abs) => abs.to_string(),
            None => format!("-{nombre}"),
        };

        self.entree.truncate(debut);
        self.entree.push_str(&inverse);
    }

    /// % : remplace le dernier nombre n par "(n/100)".
    pub fn pourcentage(&mut self) {
        let Some((debut, fin)) = nombre_final(&self.entree, false) else {
            return;
        };

        let pourcent = format!("({}/100)", &self.entree[debut..fin]);
        self.entree.truncate(debut);
        self.entree.push_str(&pourcent);
    }

    /// = : évalue le tampon.
    pub fn evaluer(&mut self) {
        match eval_expression(&self.entree) {
            Ok(resultat) => {
                let ligne = format!("{}={}", self.entree, formater_nombre(&resultat));
                self.historique.pousser(ligne);
                self.entree = resultat;
            }
            Err(e) => {
                // cause volontairement absente de l’écran
                log::debug!("évaluation refusée pour {:?}: {e}", self.entree);
                self.entree = MARQUEUR_ERREUR.to_string();
            }
        }
    }
}
