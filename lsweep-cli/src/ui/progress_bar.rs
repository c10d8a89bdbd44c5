/// Eighth-block glyphs for the fractional cell of a progress bar
const EIGHTHS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Render a deletion progress bar `width` cells wide.
///
/// The fill resolves to eighths of a cell, so progress through a long batch
/// still moves visibly between items even on short bars.
pub fn progress_bar(percentage: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }

    let fill = (percentage.clamp(0.0, 100.0) / 100.0) * width as f64;
    let full = (fill.floor() as usize).min(width);
    let eighth = ((fill - fill.floor()) * 8.0).round() as usize;

    let mut bar = String::with_capacity(width * 3);
    for _ in 0..full {
        bar.push(EIGHTHS[8]);
    }
    if full < width && eighth > 0 {
        bar.push(EIGHTHS[eighth]);
    }
    while bar.chars().count() < width {
        bar.push(' ');
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bar() {
        let bar = progress_bar(0.0, 10);
        assert_eq!(bar.chars().count(), 10);
        assert!(bar.chars().all(|c| c == ' '));
    }

    #[test]
    fn test_full_bar() {
        let bar = progress_bar(100.0, 10);
        assert_eq!(bar.chars().count(), 10);
        assert!(bar.chars().all(|c| c == '█'));
    }

    #[test]
    fn test_fractional_fill_uses_eighth_blocks() {
        // 25% of 2 cells is half a cell
        let bar = progress_bar(25.0, 2);
        assert_eq!(bar.chars().count(), 2);
        assert_eq!(bar.chars().next(), Some('▌'));
    }

    #[test]
    fn test_out_of_range_percentages_clamp() {
        assert!(progress_bar(250.0, 4).chars().all(|c| c == '█'));
        assert!(progress_bar(-10.0, 4).chars().all(|c| c == ' '));
    }
}
