// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Écran : historique (3 lignes, plus ancienne en haut) + tampon formaté
// - Pavé : fonctions, constantes, AC/C/(/)/%, chiffres, opérateurs, ±, =
// - Clavier : Enter/= évalue, Backspace efface, caractères du vocabulaire ajoutés
//
// Note :
// - L’écran affiche TOUJOURS formater_expr(tampon) ; le tampon reste brut.

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::historique::CAPACITE_HISTORIQUE;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        self.clavier(ui);

        ui.heading("Calculatrice");
        ui.add_space(6.0);

        self.ui_ecran(ui);

        ui.add_space(8.0);
        ui.separator();
        ui.add_space(8.0);

        self.ui_fonctions(ui);

        ui.add_space(8.0);

        self.ui_pave_numerique(ui);
    }

    fn clavier(&mut self, ui: &mut egui::Ui) {
        let events = ui.input(|i| i.events.clone());

        for ev in events {
            match ev {
                egui::Event::Key {
                    key: egui::Key::Enter,
                    pressed: true,
                    ..
                } => self.evaluer(),
                egui::Event::Key {
                    key: egui::Key::Backspace,
                    pressed: true,
                    ..
                } => self.retour_arriere(),
                egui::Event::Text(t) => {
                    for c in t.chars() {
                        self.saisir(c);
                    }
                }
                _ => {}
            }
        }
    }

    fn ui_ecran(&self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    // lignes fixes : l’écran ne saute pas quand l’historique se remplit
                    for _ in self.historique.len()..CAPACITE_HISTORIQUE {
                        ui.monospace(" ");
                    }
                    for ligne in self.lignes_historique() {
                        ui.label(
                            egui::RichText::new(ligne)
                                .monospace()
                                .color(ui.visuals().weak_text_color()),
                        );
                    }

                    ui.add_space(4.0);
                    ui.label(egui::RichText::new(self.affichage()).monospace().size(30.0));
                });
            });
    }

    fn ui_fonctions(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_fonctions")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "sin", "sin(");
                self.bouton_insert(ui, "cos", "cos(");
                self.bouton_insert(ui, "tan", "tan(");
                self.bouton_insert(ui, "log", "log(");
                self.bouton_insert(ui, "ln", "ln(");
                ui.end_row();

                self.bouton_insert(ui, "e", "e");
                self.bouton_insert(ui, "π", "pi");
                self.bouton_insert(ui, "x!", "!");
                self.bouton_insert(ui, "xʸ", "^");
                self.bouton_insert(ui, "√", "sqrt(");
                ui.end_row();

                self.bouton_action(ui, "AC", "Vide l’entrée", Action::EffacerTout);
                self.bouton_action(ui, "C", "Efface le dernier caractère", Action::RetourArriere);
                self.bouton_insert(ui, "(", "(");
                self.bouton_insert(ui, ")", ")");
                self.bouton_action(ui, "%", "Dernier nombre / 100", Action::Pourcentage);
                ui.end_row();
            });
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", "7");
                self.bouton_insert(ui, "8", "8");
                self.bouton_insert(ui, "9", "9");
                self.bouton_insert(ui, "÷", "/");
                ui.end_row();

                self.bouton_insert(ui, "4", "4");
                self.bouton_insert(ui, "5", "5");
                self.bouton_insert(ui, "6", "6");
                self.bouton_insert(ui, "×", "*");
                ui.end_row();

                self.bouton_insert(ui, "1", "1");
                self.bouton_insert(ui, "2", "2");
                self.bouton_insert(ui, "3", "3");
                self.bouton_insert(ui, "−", "-");
                ui.end_row();

                self.bouton_insert(ui, "0", "0");
                self.bouton_insert(ui, ".", ".");
                self.bouton_action(ui, "=", "Calculer", Action::Evaluer);
                self.bouton_insert(ui, "+", "+");
                ui.end_row();

                self.bouton_action(ui, "±", "Inverse le signe du dernier nombre", Action::InverserSigne);
                ui.end_row();
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 36.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::EffacerTout => self.effacer_tout(),
                Action::RetourArriere => self.retour_arriere(),
                Action::Pourcentage => self.pourcentage(),
                Action::InverserSigne => self.inverser_signe(),
                Action::Evaluer => self.evaluer(),
            }
        }
    }

    /// Bouton “pousse un jeton” : aucune logique, le tampon reçoit le texte tel quel.
    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str) {
        let resp = ui.add_sized([56.0, 36.0], egui::Button::new(label));
        if resp.clicked() {
            self.ajouter(to_insert);
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    EffacerTout,
    RetourArriere,
    Pourcentage,
    InverserSigne,
    Evaluer,
}
