// =============================================================================
// RENDER PLAINTEXT — Le format .cells
// =============================================================================
//
//   !Name: glider
//   .O.
//   ..O
//   OOO
//
// Une ligne par ligne de la fenêtre, 'O' vivante, '.' morte. Les lignes
// qui commencent par '!' sont des commentaires.
//
// =============================================================================

use crate::core::coord::Viewport;
use crate::core::life::Grid;
use crate::render::{row_cells, Renderer};

/// Renderer .cells, avec un titre optionnel en commentaire
#[derive(Debug, Clone, Default)]
pub struct PlaintextRenderer {
    title: Option<String>,
}

impl PlaintextRenderer {
    pub fn new() -> Self {
        PlaintextRenderer { title: None }
    }

    /// Ajoute une ligne `!Name: <title>` en tête
    pub fn with_title(title: &str) -> Self {
        PlaintextRenderer {
            title: Some(title.to_string()),
        }
    }
}

impl Renderer for PlaintextRenderer {
    fn render(&self, grid: &Grid, viewport: &Viewport) -> String {
        let mut out = String::with_capacity((viewport.width + 1) * viewport.height);
        if let Some(title) = &self.title {
            out.push_str(&format!("!Name: {}\n", title));
        }
        for row in viewport.top..viewport.bottom() {
            out.extend(
                row_cells(grid, viewport, row)
                    .into_iter()
                    .map(|alive| if alive { 'O' } else { '.' }),
            );
            out.push('\n');
        }
        out
    }

    fn name(&self) -> &str {
        "plaintext"
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coord::Coord;
    use crate::core::life::step;
    use crate::core::pattern::{by_name, Pattern};

    #[test]
    fn test_render_glider() {
        let glider = by_name("glider").unwrap();
        let text = PlaintextRenderer::with_title("glider").render_pattern(&glider);
        assert_eq!(text, "!Name: glider\n.O.\n..O\nOOO\n");
    }

    #[test]
    fn test_render_blinker_phases() {
        let g0 = Pattern::from_cells("blinker", [(0, -1), (0, 0), (0, 1)]).to_grid();
        let window = Viewport::around(Coord::ORIGIN, 1);
        let r = PlaintextRenderer::new();
        assert_eq!(r.render(&g0, &window), "...\nOOO\n...\n");
        assert_eq!(r.render(&step(&g0), &window), ".O.\n.O.\n.O.\n");
    }

    #[test]
    fn test_output_parses_back() {
        let pulsar = by_name("pulsar").unwrap();
        let text = PlaintextRenderer::with_title("pulsar").render_pattern(&pulsar);
        let back = Pattern::parse_plaintext("pulsar", &text).unwrap();
        assert_eq!(back, pulsar);
    }

    #[test]
    fn test_empty_pattern() {
        let r = PlaintextRenderer::new();
        assert_eq!(r.render_pattern(&Pattern::new("vide")), "");
        assert_eq!(r.name(), "plaintext");
    }
}
