// =============================================================================
// ERROR — Les erreurs des surfaces textuelles
// =============================================================================
//
// Le cœur (Store, Life) est TOTAL : il n'a aucune erreur. Seuls les bords
// qui lisent du texte peuvent échouer :
//   - RuleError    → rulestring mal formée ("B3/S23")
//   - PatternError → motif plaintext / RLE illisible
//   - ConfigError  → fichier TOML de simulation
//
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Erreur de lecture d'une rulestring
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("rulestring vide")]
    Empty,

    #[error("rulestring '{0}' : séparateur '/' manquant")]
    MissingSeparator(String),

    #[error("rulestring '{0}' : attendu B…/S…, S…/B… ou survie/naissance")]
    Malformed(String),

    #[error("rulestring : '{0}' n'est pas un nombre de voisines (0 à 8)")]
    InvalidDigit(char),
}

/// Erreur de lecture d'un motif
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("motif inconnu : '{0}'")]
    Unknown(String),

    #[error("ligne {line}, colonne {column} : caractère inattendu '{found}'")]
    InvalidCell {
        line: usize,
        column: usize,
        found: char,
    },

    #[error("ligne {line} : en-tête RLE invalide ({detail})")]
    BadHeader { line: usize, detail: String },

    #[error("ligne {line}, colonne {column} : répétition trop longue")]
    RunTooLong { line: usize, column: usize },

    #[error("motif RLE non terminé (il manque '!')")]
    Unterminated,

    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// Erreur de chargement d'une configuration de simulation
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("impossible de lire '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration TOML invalide : {0}")]
    Toml(#[from] toml::de::Error),

    #[error("graine de la simulation invalide : {0}")]
    Pattern(#[from] PatternError),
}
