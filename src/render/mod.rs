// =============================================================================
// RENDER — Export textuel d'une fenêtre de grille
// =============================================================================
//
// Une grille est infinie ; on ne peut en écrire qu'une FENÊTRE finie.
// Le renderer traduit (grille, fenêtre) en texte dans un format de motif
// standard, relisible par `Pattern::parse_plaintext` / `Pattern::parse_rle` :
//   - Plaintext (.cells) : une ligne de texte par ligne de cellules
//   - RLE                : compressé, avec la règle dans l'en-tête
//
// Le cœur (module core) ne connaît JAMAIS les formats de sortie.
// C'est le renderer qui lit la grille à travers `peek`.
//
// =============================================================================

pub mod plaintext;
pub mod rle;

pub use plaintext::PlaintextRenderer;
pub use rle::RleRenderer;

use crate::core::coord::Viewport;
use crate::core::life::Grid;
use crate::core::pattern::Pattern;

/// Trait commun à tous les formats de sortie.
pub trait Renderer {
    /// Écrit les cellules de `viewport` dans ce format.
    fn render(&self, grid: &Grid, viewport: &Viewport) -> String;

    /// Nom du format
    fn name(&self) -> &str;

    /// Écrit un motif fini sur sa boîte englobante
    fn render_pattern(&self, pattern: &Pattern) -> String {
        let bbox = pattern
            .bounding_box()
            .unwrap_or_else(|| Viewport::new(0, 0, 0, 0));
        self.render(&pattern.to_grid(), &bbox)
    }
}

/// Une ligne de la fenêtre sous forme de booléens
pub(crate) fn row_cells(grid: &Grid, viewport: &Viewport, row: i64) -> Vec<bool> {
    viewport.row(row).map(|c| grid.peek(&c)).collect()
}
