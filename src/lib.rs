// =============================================================================
// STORELIFE — Le comonade Store et le Jeu de la Vie en Rust
// =============================================================================
//
// Storelife implémente un conteneur focalisé générique (le comonade Store)
// et s'en sert pour faire tourner un automate cellulaire sur un plan
// infini : la génération suivante est `extend` de la règle d'une cellule.
//
// Architecture :
//   core/     → Le cœur pur (Store, cache, règles, motifs, générations)
//   render/   → Export textuel d'une fenêtre finie (plaintext, RLE)
//   config    → Description TOML d'une simulation
//
// Concepts fondamentaux :
//   Store      = une fonction index → valeur + un index courant
//   Duplicate  = le store vu depuis chacun de ses index
//   Extend     = une règle locale appliquée à tous les index
//   Génération = une grille immuable Store<Coord, bool>
//
// =============================================================================

pub mod core;
pub mod render;
pub mod config;
