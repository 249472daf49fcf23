// =============================================================================
// CONFIG — Description TOML d'une simulation
// =============================================================================
//
// Une simulation = une graine, une règle, un nombre de générations et une
// fenêtre d'observation :
//
// ```toml
// name = "planeur"
// rule = "B3/S23"
// generations = 8
//
// [viewport]
// top = -1
// left = -1
// height = 10
// width = 10
//
// [seed]
// kind = "catalog"      # ou "plaintext", "rle", "cells"
// name = "glider"
// ```
//
// Les graines textuelles portent leur motif dans `text` ; `cells`
// (plaintext) et `rle` (rle) sont acceptés comme synonymes.
//
// Tous les champs ont une valeur par défaut (planeur, Conway, 4 générations).
// Si la graine est en RLE, la règle de son en-tête est ignorée : c'est le
// champ `rule` de la configuration qui fait foi.
//
// =============================================================================

use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::core::coord::Viewport;
use crate::core::error::{ConfigError, PatternError};
use crate::core::life::Life;
use crate::core::pattern::{self, Pattern};
use crate::core::rule::Rule;

/// D'où vient la génération 0
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Seed {
    /// Un motif du catalogue, par son nom
    Catalog { name: String },
    /// Un motif au format .cells (`text`, ou `cells`)
    Plaintext {
        #[serde(alias = "cells")]
        text: String,
    },
    /// Un motif au format RLE (`text`, ou `rle`)
    Rle {
        #[serde(alias = "rle")]
        text: String,
    },
    /// Une liste explicite de cellules vivantes [ligne, colonne]
    Cells { cells: Vec<(i64, i64)> },
}

impl Default for Seed {
    fn default() -> Self {
        Seed::Catalog {
            name: "glider".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub name: String,
    pub rule: Rule,
    pub generations: usize,
    pub viewport: Viewport,
    pub seed: Seed,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            name: "demo".to_string(),
            rule: Rule::conway(),
            generations: 4,
            viewport: Viewport::default(),
            seed: Seed::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = toml::from_str(content)?;
        debug!(name = %config.name, rule = %config.rule, "configuration chargée");
        Ok(config)
    }

    /// Lit un fichier de configuration TOML
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "lecture de la configuration");
        SimulationConfig::from_toml_str(&content)
    }

    /// Résout la graine en motif
    pub fn pattern(&self) -> Result<Pattern, PatternError> {
        match &self.seed {
            Seed::Catalog { name } => pattern::by_name(name),
            Seed::Plaintext { text } => Pattern::parse_plaintext(&self.name, text),
            Seed::Rle { text } => Pattern::parse_rle(&self.name, text).map(|(p, _)| p),
            Seed::Cells { cells } => Ok(Pattern::from_cells(&self.name, cells.iter().copied())),
        }
    }

    /// La simulation prête à avancer (génération 0)
    pub fn life(&self) -> Result<Life, ConfigError> {
        Ok(Life::from_pattern(&self.pattern()?, self.rule))
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coord::Coord;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.pattern().unwrap().name, "glider");
    }

    #[test]
    fn test_full_config() {
        let text = r#"
name = "clignotant"
rule = "B36/S23"
generations = 12

[viewport]
top = -3
left = -3
height = 7
width = 7

[seed]
kind = "catalog"
name = "blinker"
"#;
        let config = SimulationConfig::from_toml_str(text).unwrap();
        assert_eq!(config.name, "clignotant");
        assert_eq!(config.rule, Rule::highlife());
        assert_eq!(config.generations, 12);
        assert_eq!(config.viewport, Viewport::new(-3, -3, 7, 7));
        assert_eq!(config.pattern().unwrap().len(), 3);
    }

    #[test]
    fn test_inline_seeds() {
        let plaintext = "[seed]\nkind = \"plaintext\"\ntext = \"\"\"\n.O\nO.\n\"\"\"\n";
        let p = SimulationConfig::from_toml_str(plaintext).unwrap().pattern().unwrap();
        assert!(p.contains(&Coord::new(0, 1)) && p.contains(&Coord::new(1, 0)));

        let rle = "[seed]\nkind = \"rle\"\ntext = \"x = 3, y = 1, rule = B2/S\\n3o!\"\n";
        let config = SimulationConfig::from_toml_str(rle).unwrap();
        assert_eq!(config.pattern().unwrap().len(), 3);
        // La règle de la configuration l'emporte sur l'en-tête RLE
        assert_eq!(config.life().unwrap().rule(), &Rule::conway());

        let cells = "[seed]\nkind = \"cells\"\ncells = [[0, 0], [5, -2]]\n";
        let p = SimulationConfig::from_toml_str(cells).unwrap().pattern().unwrap();
        assert!(p.contains(&Coord::new(5, -2)));
    }

    #[test]
    fn test_seed_field_synonyms() {
        let rle = SimulationConfig::from_toml_str("[seed]\nkind = \"rle\"\nrle = \"3o!\"\n").unwrap();
        assert_eq!(rle.seed, Seed::Rle { text: "3o!".to_string() });
        assert_eq!(rle.pattern().unwrap().len(), 3);

        let plaintext = SimulationConfig::from_toml_str("[seed]\nkind = \"plaintext\"\ncells = \"OOO\"\n").unwrap();
        assert_eq!(plaintext.seed, Seed::Plaintext { text: "OOO".to_string() });
        assert!(plaintext.pattern().unwrap().contains(&Coord::new(0, 2)));

        // Les deux noms à la fois : champ en double
        let both = "[seed]\nkind = \"rle\"\nrle = \"o!\"\ntext = \"o!\"\n";
        assert!(matches!(SimulationConfig::from_toml_str(both), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_errors() {
        let bad_rule = SimulationConfig::from_toml_str("rule = \"B3/S2x\"");
        assert!(matches!(bad_rule, Err(ConfigError::Toml(_))));

        let unknown = SimulationConfig::from_toml_str("[seed]\nkind = \"catalog\"\nname = \"gun\"\n")
            .unwrap();
        assert!(matches!(unknown.life(), Err(ConfigError::Pattern(PatternError::Unknown(_)))));

        let missing = SimulationConfig::load("/nonexistent/storelife.toml");
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = SimulationConfig {
            rule: Rule::seeds(),
            ..SimulationConfig::default()
        };
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("B2/S"));
        assert_eq!(SimulationConfig::from_toml_str(&text).unwrap(), config);
    }
}
