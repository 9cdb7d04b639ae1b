// src/noyau/historique.rs
//
// Fenêtre d’historique : FIFO bornée (3 lignes "expression=résultat").
// Vit le temps d’une session, jamais persistée.

use std::collections::VecDeque;

/// Nombre de lignes conservées.
pub const CAPACITE_HISTORIQUE: usize = 3;

#[derive(Clone, Debug, Default)]
pub struct Historique {
    lignes: VecDeque<String>,
}

impl Historique {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute en fin ; la plus ancienne sort si on dépasse la capacité.
    pub fn pousser(&mut self, ligne: impl Into<String>) {
        self.lignes.push_back(ligne.into());
        while self.lignes.len() > CAPACITE_HISTORIQUE {
            if let Some(sortie) = self.lignes.pop_front() {
                log::debug!("historique plein, on retire {sortie:?}");
            }
        }
    }

    /// Lignes, de la plus ancienne à la plus récente.
    pub fn lignes(&self) -> impl Iterator<Item = &str> {
        self.lignes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lignes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lignes.is_empty()
    }
}
