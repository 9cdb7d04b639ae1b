// src/noyau/portee.rs
//
// Portée d’évaluation : nom -> constante | fonction unaire.
//
// Deux niveaux :
// - les défauts de l’évaluateur (table immuable, construite une seule fois)
// - la portée de l’appelant, consultée EN PREMIER (elle masque les défauts)

use std::collections::HashMap;
use std::f64::consts;
use std::sync::OnceLock;

pub type FonctionUnaire = fn(f64) -> f64;

#[derive(Clone, Copy, Debug)]
pub enum Symbole {
    Constante(f64),
    Fonction(FonctionUnaire),
}

#[derive(Clone, Debug, Default)]
pub struct Portee {
    symboles: HashMap<String, Symbole>,
}

impl Portee {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute (ou remplace) un symbole.
    pub fn avec(mut self, nom: &str, symbole: Symbole) -> Self {
        self.symboles.insert(nom.to_lowercase(), symbole);
        self
    }

    pub fn constante(self, nom: &str, v: f64) -> Self {
        self.avec(nom, Symbole::Constante(v))
    }

    pub fn fonction(self, nom: &str, f: FonctionUnaire) -> Self {
        self.avec(nom, Symbole::Fonction(f))
    }

    /// Résolution : portée locale d’abord, puis défauts de l’évaluateur.
    pub fn resoudre(&self, nom: &str) -> Option<Symbole> {
        self.symboles
            .get(nom)
            .or_else(|| defauts().symboles.get(nom))
            .copied()
    }

    /// Portée fixe de la calculatrice : ln, log (base 10), pi, e.
    /// `log` masque le log naturel des défauts.
    pub fn calculatrice() -> Self {
        Self::new()
            .fonction("ln", f64::ln)
            .fonction("log", f64::log10)
            .constante("pi", consts::PI)
            .constante("e", consts::E)
    }
}

/// Défauts de l’évaluateur générique (comme une lib math classique : log = naturel).
fn defauts() -> &'static Portee {
    static DEFAUTS: OnceLock<Portee> = OnceLock::new();
    DEFAUTS.get_or_init(|| {
        Portee::new()
            .fonction("sin", f64::sin)
            .fonction("cos", f64::cos)
            .fonction("tan", f64::tan)
            .fonction("sqrt", f64::sqrt)
            .fonction("exp", f64::exp)
            .fonction("abs", f64::abs)
            .fonction("log", f64::ln)
            .constante("pi", consts::PI)
            .constante("e", consts::E)
    })
}
