//! Main application UI.
//! Three tabs: adding cards, browsing/editing them, and the multiple-choice quiz.

use chrono::{DateTime, Local, Utc};
use eframe::egui;
use lingo_flashcards::ai::{ExampleGenerator, GenerationError, OpenAiExampleGenerator};
use lingo_flashcards::config::AppConfig;
use lingo_flashcards::export::{export_cards, import_cards};
use lingo_flashcards::models::flashcard::non_empty;
use lingo_flashcards::models::{
    Flashcard, Language, LanguageFilter, MASTERY_THRESHOLD, NewFlashcard, QuizSession, QuizState,
};
use lingo_flashcards::store::CardStore;
use rand::rngs::ThreadRng;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Application tabs
#[derive(Clone, Copy, Default, PartialEq)]
enum Tab {
    #[default]
    Add,
    Cards,
    Quiz,
}

/// Input fields of the "Add" tab
struct CardForm {
    term: String,
    translation: String,
    source_language: Language,
    target_language: Language,
    example: String,
    comment: String,
}

impl Default for CardForm {
    fn default() -> Self {
        Self {
            term: String::new(),
            translation: String::new(),
            source_language: Language::En,
            target_language: Language::Es,
            example: String::new(),
            comment: String::new(),
        }
    }
}

/// Main application state
pub struct MyApp {
    store: CardStore,
    current_tab: Tab,

    form: CardForm,
    form_error: Option<String>,
    example_generator: Option<Arc<OpenAiExampleGenerator>>,
    pending_example: Option<Receiver<Result<String, GenerationError>>>,

    list_filter: LanguageFilter,
    flipped_cards: HashSet<String>,
    editing_card: Option<Flashcard>,
    pending_delete: Option<String>,

    quiz: QuizSession,
    rng: ThreadRng,

    show_result_dialog: bool,
    result_message: String,
}

/// Formats a UTC timestamp as local YYYY-MM-DD
fn format_date(time: DateTime<Utc>) -> String {
    let local: DateTime<Local> = time.into();
    local.format("%Y-%m-%d").to_string()
}

fn language_picker(ui: &mut egui::Ui, id: &str, value: &mut Language, exclude: Option<Language>) {
    egui::ComboBox::from_id_salt(id)
        .selected_text(value.name())
        .show_ui(ui, |ui| {
            for lang in Language::ALL {
                if Some(lang) != exclude {
                    ui.selectable_value(value, lang, lang.name());
                }
            }
        });
}

/// Returns true when the selection changed
fn filter_picker(
    ui: &mut egui::Ui,
    id: &str,
    value: &mut LanguageFilter,
    languages: &[Language],
) -> bool {
    let before = *value;
    egui::ComboBox::from_id_salt(id)
        .selected_text(value.label())
        .show_ui(ui, |ui| {
            ui.selectable_value(value, LanguageFilter::All, LanguageFilter::All.label());
            for &lang in languages {
                let filter = LanguageFilter::Only(lang);
                ui.selectable_value(value, filter, filter.label());
            }
        });
    *value != before
}

impl eframe::App for MyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_example();

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Language Flashcards");
                ui.separator();
                ui.selectable_value(&mut self.current_tab, Tab::Add, "Add Card");
                ui.selectable_value(&mut self.current_tab, Tab::Cards, "My Cards");
                ui.selectable_value(&mut self.current_tab, Tab::Quiz, "Quiz");
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.current_tab {
            Tab::Add => self.render_add_tab(ui),
            Tab::Cards => self.render_cards_tab(ui),
            Tab::Quiz => self.render_quiz_tab(ui),
        });

        self.render_edit_dialog(ctx);
        self.render_delete_dialog(ctx);

        if self.show_result_dialog {
            egui::Window::new("Import/Export Result")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&self.result_message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.show_result_dialog = false;
                    }
                });
        }
    }
}

impl MyApp {
    /// Creates the application around an already loaded card store
    pub fn new(store: CardStore, config: AppConfig) -> Self {
        let mut rng = rand::rng();
        let quiz = QuizSession::new(LanguageFilter::All, store.cards(), &mut rng);
        Self {
            store,
            current_tab: Tab::Add,
            form: CardForm::default(),
            form_error: None,
            example_generator: config
                .openai
                .map(|openai| Arc::new(OpenAiExampleGenerator::new(openai))),
            pending_example: None,
            list_filter: LanguageFilter::All,
            flipped_cards: HashSet::new(),
            editing_card: None,
            pending_delete: None,
            quiz,
            rng,
            show_result_dialog: false,
            result_message: String::new(),
        }
    }

    fn show_result(&mut self, message: String) {
        self.result_message = message;
        self.show_result_dialog = true;
    }

    /// Renders the form for creating a new card
    fn render_add_tab(&mut self, ui: &mut egui::Ui) {
        ui.heading("Add New Flashcard");
        ui.add_space(10.0);

        egui::Grid::new("add_form").num_columns(2).show(ui, |ui| {
            ui.label("Source language:");
            language_picker(ui, "add_source", &mut self.form.source_language, None);
            ui.end_row();

            self.form.target_language =
                Language::adjust_target(self.form.source_language, self.form.target_language);
            ui.label("Target language:");
            language_picker(
                ui,
                "add_target",
                &mut self.form.target_language,
                Some(self.form.source_language),
            );
            ui.end_row();

            ui.label("Term:");
            ui.text_edit_singleline(&mut self.form.term);
            ui.end_row();

            ui.label("Translation:");
            ui.text_edit_singleline(&mut self.form.translation);
            ui.end_row();

            ui.label("Example:");
            ui.text_edit_multiline(&mut self.form.example);
            ui.end_row();

            ui.label("Comment:");
            ui.text_edit_multiline(&mut self.form.comment);
            ui.end_row();
        });

        if self.example_generator.is_some() {
            let busy = self.pending_example.is_some();
            ui.horizontal(|ui| {
                let enabled = !busy && !self.form.term.trim().is_empty();
                if ui
                    .add_enabled(enabled, egui::Button::new("Generate example"))
                    .clicked()
                {
                    self.request_example(ui.ctx().clone());
                }
                if busy {
                    ui.spinner();
                }
            });
        }

        ui.add_space(10.0);

        if ui.button("Add Flashcard").clicked() {
            self.submit_form();
        }

        if let Some(error) = &self.form_error {
            ui.colored_label(egui::Color32::RED, error);
        }
    }

    fn submit_form(&mut self) {
        if self.form.term.trim().is_empty() || self.form.translation.trim().is_empty() {
            self.form_error = Some("Term and translation are required.".to_string());
            return;
        }

        let form = std::mem::take(&mut self.form);
        let new_card = NewFlashcard::new(
            form.term.trim(),
            form.translation.trim(),
            form.source_language,
            form.target_language,
        )
        .with_example(form.example)
        .with_comment(form.comment);

        self.store.add(new_card);
        self.form_error = None;
        // Keep the language pair for the next card
        self.form.source_language = form.source_language;
        self.form.target_language = form.target_language;
    }

    /// Runs the example request on a worker thread; the result is picked up in `poll_example`
    fn request_example(&mut self, ctx: egui::Context) {
        let Some(generator) = self.example_generator.clone() else {
            return;
        };
        let term = self.form.term.trim().to_string();
        let language_name = self.form.source_language.name();
        let (sender, receiver) = mpsc::channel();

        std::thread::spawn(move || {
            let result = generator.generate_example(&term, language_name);
            let _ = sender.send(result);
            ctx.request_repaint();
        });
        self.pending_example = Some(receiver);
    }

    fn poll_example(&mut self) {
        let Some(receiver) = &self.pending_example else {
            return;
        };
        match receiver.try_recv() {
            Ok(Ok(example)) => {
                self.form.example = example;
                self.form_error = None;
                self.pending_example = None;
            }
            Ok(Err(e)) => {
                tracing::warn!("Failed to generate example: {}", e);
                self.form_error = Some(format!("Failed to generate example: {}", e));
                self.pending_example = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.pending_example = None;
            }
        }
    }

    /// Renders the card list with filter, progress summary and per-card actions
    fn render_cards_tab(&mut self, ui: &mut egui::Ui) {
        let languages = self.store.source_languages();

        ui.horizontal(|ui| {
            ui.heading("Your Flashcards");
            ui.label(self.store.stats(self.list_filter).summary());
        });
        ui.horizontal(|ui| {
            ui.label("Source language:");
            filter_picker(ui, "list_filter", &mut self.list_filter, &languages);
        });
        ui.horizontal(|ui| {
            if ui.button("Export Cards").clicked() {
                self.handle_export();
            }
            if ui.button("Import Cards").clicked() {
                self.handle_import();
            }
        });
        ui.separator();

        let cards = self.store.filtered(self.list_filter);
        if cards.is_empty() {
            if self.store.cards().is_empty() {
                ui.label("No flashcards yet. Add some to get started!");
            } else {
                ui.label(format!(
                    "No flashcards found for {}. Try another language or add some cards.",
                    self.list_filter.label()
                ));
            }
            return;
        }

        // We store actions to execute after UI rendering to avoid borrowing conflicts
        let mut action_flip: Option<String> = None;
        let mut action_toggle: Option<String> = None;
        let mut action_edit: Option<Flashcard> = None;
        let mut action_delete: Option<String> = None;

        egui::ScrollArea::vertical()
            .id_salt("flashcards_list")
            .show(ui, |ui| {
                for card in cards {
                    let flipped = self.flipped_cards.contains(&card.id);
                    ui.group(|ui| {
                        ui.set_min_width(ui.available_width());
                        ui.horizontal(|ui| {
                            if card.is_learned {
                                ui.colored_label(egui::Color32::DARK_GREEN, "Learned!");
                            }
                            ui.label(format!(
                                "{} → {}",
                                card.source_language.name(),
                                card.target_language.name()
                            ));
                        });

                        if flipped {
                            ui.heading(&card.translation);
                        } else {
                            ui.heading(&card.term);
                        }
                        if let Some(example) = &card.example {
                            ui.label(format!("Example: {}", example));
                        }
                        if let Some(comment) = &card.comment {
                            ui.label(format!("Comment: {}", comment));
                        }
                        ui.label(format!(
                            "Progress: {}/{}",
                            card.correct_count.min(MASTERY_THRESHOLD),
                            MASTERY_THRESHOLD
                        ));
                        if let Some(reviewed) = card.last_reviewed {
                            ui.label(format!("Last reviewed: {}", format_date(reviewed)));
                        }

                        ui.horizontal(|ui| {
                            let flip_label = if flipped { "Show term" } else { "Show translation" };
                            if ui.button(flip_label).clicked() {
                                action_flip = Some(card.id.clone());
                            }
                            let toggle_label = if card.is_learned { "Mark as not learned" } else { "Mark as learned" };
                            if ui.button(toggle_label).clicked() {
                                action_toggle = Some(card.id.clone());
                            }
                            if ui.button("Edit").clicked() {
                                action_edit = Some(card.clone());
                            }
                            if ui.button("Delete").clicked() {
                                action_delete = Some(card.id.clone());
                            }
                        });
                    });
                }
            });

        // Execute deferred actions
        if let Some(id) = action_flip {
            if !self.flipped_cards.remove(&id) {
                self.flipped_cards.insert(id);
            }
        }
        if let Some(id) = action_toggle {
            self.store.toggle_learned(&id);
        }
        if action_edit.is_some() {
            self.editing_card = action_edit;
        }
        if action_delete.is_some() {
            self.pending_delete = action_delete;
        }
    }

    fn render_edit_dialog(&mut self, ctx: &egui::Context) {
        let Some(card) = &mut self.editing_card else {
            return;
        };

        let mut action_save = false;
        let mut action_cancel = false;
        let mut example = card.example.clone().unwrap_or_default();
        let mut comment = card.comment.clone().unwrap_or_default();

        egui::Window::new("Edit Flashcard")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("edit_form").num_columns(2).show(ui, |ui| {
                    ui.label("Term:");
                    ui.text_edit_singleline(&mut card.term);
                    ui.end_row();

                    ui.label("Translation:");
                    ui.text_edit_singleline(&mut card.translation);
                    ui.end_row();

                    ui.label("Source language:");
                    language_picker(ui, "edit_source", &mut card.source_language, None);
                    ui.end_row();

                    ui.label("Target language:");
                    language_picker(ui, "edit_target", &mut card.target_language, None);
                    ui.end_row();

                    ui.label("Example:");
                    ui.text_edit_multiline(&mut example);
                    ui.end_row();

                    ui.label("Comment:");
                    ui.text_edit_multiline(&mut comment);
                    ui.end_row();
                });

                ui.horizontal(|ui| {
                    let valid = !card.term.trim().is_empty() && !card.translation.trim().is_empty();
                    if ui.add_enabled(valid, egui::Button::new("Save")).clicked() {
                        action_save = true;
                    }
                    if ui.button("Cancel").clicked() {
                        action_cancel = true;
                    }
                });
            });

        card.example = non_empty(example);
        card.comment = non_empty(comment);

        if action_save {
            if let Some(card) = self.editing_card.take() {
                self.store.update(card);
            }
        } else if action_cancel {
            self.editing_card = None;
        }
    }

    fn render_delete_dialog(&mut self, ctx: &egui::Context) {
        let Some(id) = self.pending_delete.clone() else {
            return;
        };

        egui::Window::new("Delete flashcard?")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Are you sure you want to delete this flashcard?");
                ui.horizontal(|ui| {
                    if ui.button("No").clicked() {
                        self.pending_delete = None;
                    }
                    if ui.button("Yes").clicked() {
                        self.store.delete(&id);
                        self.flipped_cards.remove(&id);
                        self.pending_delete = None;
                    }
                });
            });
    }

    /// Renders the quiz: filter, score, current question and feedback
    fn render_quiz_tab(&mut self, ui: &mut egui::Ui) {
        if self.store.cards().is_empty() {
            ui.heading("Add some flashcards to start the quiz!");
            return;
        }

        self.quiz.refresh(self.store.cards(), &mut self.rng);

        let languages = self.store.source_languages();
        let mut filter = self.quiz.filter();
        ui.horizontal(|ui| {
            ui.label("Source language:");
            if filter_picker(ui, "quiz_filter", &mut filter, &languages) {
                self.quiz.set_filter(filter, self.store.cards(), &mut self.rng);
            }
            ui.separator();
            ui.label(format!("Score: {}", self.quiz.score()));
        });
        ui.separator();

        let mut action_answer: Option<String> = None;
        let mut action_next = false;

        match self.quiz.state() {
            QuizState::NoQuestion => {
                if self.quiz.filter() == LanguageFilter::All {
                    ui.heading("All flashcards have been learned! Add more or reset some cards to continue.");
                } else {
                    ui.heading(format!(
                        "All {} flashcards have been learned! Try another language or add more cards.",
                        self.quiz.filter().label()
                    ));
                }
            }
            QuizState::AwaitingAnswer(question) => {
                ui.label(format!(
                    "Translate from {}:",
                    question.flashcard.source_language.name()
                ));
                ui.heading(&question.flashcard.term);
                ui.add_space(20.0);

                for option in &question.options {
                    if ui.button(option).clicked() {
                        action_answer = Some(option.clone());
                    }
                }
            }
            QuizState::Answered {
                question,
                selected,
                correct,
            } => {
                ui.heading(&question.flashcard.term);
                ui.add_space(20.0);

                for option in &question.options {
                    let text = if question.is_correct(option) {
                        egui::RichText::new(option).color(egui::Color32::DARK_GREEN).strong()
                    } else if option == selected {
                        egui::RichText::new(option).color(egui::Color32::RED)
                    } else {
                        egui::RichText::new(option)
                    };
                    ui.add_enabled(false, egui::Button::new(text));
                }

                ui.add_space(10.0);
                if *correct {
                    ui.colored_label(egui::Color32::DARK_GREEN, "Correct!");
                } else {
                    ui.colored_label(
                        egui::Color32::RED,
                        format!("Incorrect. The correct answer is: {}", question.correct_answer),
                    );
                }
                if let Some(card) = self.store.get(&question.flashcard.id) {
                    ui.label(format!(
                        "Progress: {}/{}",
                        card.correct_count.min(MASTERY_THRESHOLD),
                        MASTERY_THRESHOLD
                    ));
                }

                if ui.button("Next Question").clicked() {
                    action_next = true;
                }
            }
        }

        // Execute deferred actions
        if let Some(answer) = action_answer {
            self.quiz.submit(&answer, &mut self.store);
        }
        if action_next {
            self.quiz.next(self.store.cards(), &mut self.rng);
        }
    }

    /// Handles export of all cards to a JSON file
    fn handle_export(&mut self) {
        // Open file save dialog
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name("flashcards.json")
            .add_filter("JSON files", &["json"])
            .save_file()
        {
            match export_cards(self.store.cards(), &path) {
                Ok(()) => self.show_result(format!(
                    "Exported {} flashcards successfully!",
                    self.store.cards().len()
                )),
                Err(e) => self.show_result(format!("Export failed: {}", e)),
            }
        }
    }

    /// Handles import of cards from a JSON file
    fn handle_import(&mut self) {
        // Open file selection dialog
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        {
            match import_cards(&path) {
                Ok(cards) => {
                    let total = cards.len();
                    let added = self.store.import(cards);
                    self.show_result(format!(
                        "Imported {} of {} flashcards ({} already present).",
                        added,
                        total,
                        total - added
                    ));
                }
                Err(e) => self.show_result(format!(
                    "Import failed: {}\n\nThe file must contain a JSON array of flashcards.",
                    e
                )),
            }
        }
    }
}
