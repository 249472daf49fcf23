// =============================================================================
// CORE — Module principal du cœur fonctionnel
// =============================================================================
//
// Ce module regroupe toute la logique pure :
// pas d'entrée/sortie, pas de threads — uniquement des fonctions totales
// et des valeurs immuables.
//
// Architecture :
//   store    → le comonade Store (lookup + focus, extract/duplicate/extend)
//   memo     → le cache explicite qui rend les générations bon marché
//   coord    → coordonnées du plan infini, voisinage, fenêtres finies
//   rule     → règles life-like (B3/S23 et compagnie)
//   life     → le pas de l'automate : step = extend(cell_rule)
//   pattern  → motifs finis, catalogue, formats plaintext et RLE
//   error    → erreurs des surfaces textuelles
//
// =============================================================================

pub mod store;
pub mod memo;
pub mod coord;
pub mod rule;
pub mod life;
pub mod pattern;
pub mod error;
