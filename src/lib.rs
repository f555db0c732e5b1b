// Library root
// -----------
// This crate exposes the username generator as a library; the binary
// (`main.rs`) wires it to an interactive terminal session.
//
// Module responsibilities:
// - `words`: built-in word categories, themes and word normalization.
// - `api`: word-supply services (random words, related words) behind the
//   `WordSupplier` trait, with a blocking HTTP implementation.
// - `composer`: generation methods and the batch loop.
// - `report`: statistics and the plain-text export.
// - `config`: environment-driven settings.
// - `ui`: the prompt-driven session.
//
// The composer never touches the terminal, so it can be driven from tests
// with a mock supplier and a seeded RNG.
pub mod api;
pub mod composer;
pub mod config;
pub mod report;
pub mod ui;
pub mod words;
