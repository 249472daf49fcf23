// =============================================================================
// RENDER RLE — Le format Run Length Encoded
// =============================================================================
//
//   x = 3, y = 3, rule = B3/S23
//   bo$2bo$3o!
//
// Chaque ligne est une suite de "runs" : <compte><b|o>, le compte 1 étant
// omis. `$` termine une ligne (avec un compte pour sauter des lignes
// vides), `!` termine le motif. Les cellules mortes en fin de ligne et les
// lignes vides en fin de motif ne sont pas écrites. Les lignes de sortie
// font au plus 70 caractères.
//
// =============================================================================

use crate::core::coord::Viewport;
use crate::core::life::Grid;
use crate::core::rule::Rule;
use crate::render::{row_cells, Renderer};

/// Largeur maximale d'une ligne RLE
pub const LINE_WIDTH: usize = 70;

/// Renderer RLE ; la règle est écrite dans l'en-tête
#[derive(Debug, Clone, Copy, Default)]
pub struct RleRenderer {
    rule: Rule,
}

impl RleRenderer {
    pub fn new(rule: Rule) -> Self {
        RleRenderer { rule }
    }
}

/// "3o", "b", "2$"...
fn token(count: usize, tag: char) -> String {
    if count == 1 {
        tag.to_string()
    } else {
        format!("{}{}", count, tag)
    }
}

/// Les runs d'une ligne, sans les cellules mortes finales
fn row_tokens(cells: &[bool]) -> Vec<String> {
    let end = cells.iter().rposition(|&alive| alive).map_or(0, |i| i + 1);
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < end {
        let state = cells[i];
        let run = cells[i..end].iter().take_while(|&&c| c == state).count();
        tokens.push(token(run, if state { 'o' } else { 'b' }));
        i += run;
    }
    tokens
}

impl Renderer for RleRenderer {
    fn render(&self, grid: &Grid, viewport: &Viewport) -> String {
        let mut tokens = Vec::new();
        let mut pending_rows = 0;

        for (i, row) in (viewport.top..viewport.bottom()).enumerate() {
            if i > 0 {
                pending_rows += 1;
            }
            let runs = row_tokens(&row_cells(grid, viewport, row));
            if runs.is_empty() {
                continue;
            }
            if pending_rows > 0 {
                tokens.push(token(pending_rows, '$'));
                pending_rows = 0;
            }
            tokens.extend(runs);
        }
        tokens.push("!".to_string());

        let mut out = format!(
            "x = {}, y = {}, rule = {}\n",
            viewport.width, viewport.height, self.rule
        );
        let mut line_len = 0;
        for t in tokens {
            if line_len > 0 && line_len + t.len() > LINE_WIDTH {
                out.push('\n');
                line_len = 0;
            }
            line_len += t.len();
            out.push_str(&t);
        }
        out.push('\n');
        out
    }

    fn name(&self) -> &str {
        "rle"
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pattern::{by_name, Pattern};

    #[test]
    fn test_render_glider() {
        let text = RleRenderer::default().render_pattern(&by_name("glider").unwrap());
        assert_eq!(text, "x = 3, y = 3, rule = B3/S23\nbo$2bo$3o!\n");
    }

    #[test]
    fn test_blank_rows_are_counted() {
        let p = Pattern::from_cells("p", [(0, 0), (3, 1)]);
        let text = RleRenderer::new(Rule::highlife()).render_pattern(&p);
        assert_eq!(text, "x = 2, y = 4, rule = B36/S23\no3$bo!\n");
    }

    #[test]
    fn test_trailing_dead_cells_elided() {
        let p = Pattern::from_cells("p", [(0, 0)]);
        let grid = p.to_grid();
        let text = RleRenderer::default().render(&grid, &Viewport::new(0, 0, 3, 5));
        assert_eq!(text, "x = 5, y = 3, rule = B3/S23\no!\n");
    }

    #[test]
    fn test_long_output_wraps() {
        // Damier sur une ligne : 200 runs d'une cellule
        let p = Pattern::from_cells("damier", (0..200).map(|c| (0, 2 * c)));
        let text = RleRenderer::default().render_pattern(&p);
        assert!(text.lines().all(|l| l.len() <= LINE_WIDTH));
        assert!(text.lines().count() > 2);
    }

    #[test]
    fn test_output_parses_back() {
        for p in crate::core::pattern::catalog() {
            let text = RleRenderer::default().render_pattern(&p);
            let (back, rule) = Pattern::parse_rle(&p.name, &text).unwrap();
            assert_eq!(back, p, "{}", text);
            assert_eq!(rule, Some(Rule::conway()));
        }
    }
}
