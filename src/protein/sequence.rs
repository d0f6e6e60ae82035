//! Amino acid sequence formatting.

use crate::config::DisplayConfig;

/// Heading that introduces the sequence section of a structure report.
pub const SEQUENCE_LABEL: &str = "📄 **Amino Acid Sequence**";

/// Wraps a sequence into lines of at most `width` residues.
///
/// Joining the returned lines without separators yields `sequence` again.
/// A `width` of zero is treated as one residue per line.
#[must_use]
pub fn wrap_sequence(sequence: &str, width: usize) -> String {
    let residues: Vec<char> = sequence.chars().collect();
    residues
        .chunks(width.max(1))
        .map(|line| line.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats the sequence section of a structure report.
///
/// Sequences up to `display.sequence_display_limit` residues are shown in
/// full, wrapped at `display.sequence_line_length`. Longer sequences are
/// replaced by their length so report size stays bounded.
#[must_use]
pub fn format_sequence(sequence: &str, display: &DisplayConfig) -> String {
    let length = sequence.chars().count();

    if length <= display.sequence_display_limit {
        format!(
            "\n\n{SEQUENCE_LABEL}:\n{}",
            wrap_sequence(sequence, display.sequence_line_length)
        )
    } else {
        format!("\n\n{SEQUENCE_LABEL}: Too long to display ({length} amino acids)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residues(n: usize) -> String {
        "ACDEFGHIKLMNPQRSTVWY".chars().cycle().take(n).collect()
    }

    fn body(section: &str) -> &str {
        section
            .strip_prefix(&format!("\n\n{SEQUENCE_LABEL}:\n"))
            .expect("full sequence section")
    }

    #[test]
    fn wraps_at_line_length() {
        let seq = residues(130);
        let wrapped = wrap_sequence(&seq, 60);
        let lines: Vec<_> = wrapped.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 60);
        assert_eq!(lines[1].len(), 60);
        assert_eq!(lines[2].len(), 10);
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_line() {
        let wrapped = wrap_sequence(&residues(120), 60);
        assert_eq!(wrapped.lines().count(), 2);
        assert!(!wrapped.ends_with('\n'));
    }

    #[test]
    fn short_sequences_round_trip() {
        let display = DisplayConfig::default();
        for n in [0, 1, 59, 60, 61, 110, 499, 500] {
            let seq = residues(n);
            let section = format_sequence(&seq, &display);
            assert_eq!(body(&section).replace('\n', ""), seq, "length {n}");
        }
    }

    #[test]
    fn long_sequences_are_elided() {
        let display = DisplayConfig::default();
        let seq = residues(501);
        let section = format_sequence(&seq, &display);
        assert!(section.contains("Too long to display (501 amino acids)"));
        assert!(!section.contains(&seq[..60]));
    }

    #[test]
    fn thresholds_come_from_display_config() {
        let display = DisplayConfig {
            sequence_display_limit: 10,
            sequence_line_length: 4,
        };
        assert_eq!(body(&format_sequence("MALWMRLLPL", &display)), "MALW\nMRLL\nPL");
        assert!(format_sequence("MALWMRLLPLL", &display).contains("(11 amino acids)"));
    }

    #[test]
    fn zero_width_does_not_panic() {
        assert_eq!(wrap_sequence("MAL", 0), "M\nA\nL");
    }
}
