mod common;

use common::Mono;
use scopemate::{Helvetica, TextMeasure, document_lines, sanitize, wrap_line};

const SAMPLES: &[&str] = &[
    "",
    "   ",
    "one",
    "Dear Hiring Manager,",
    "As a passionate Software Developer with a dream to work for and learn from a company that powers some of the biggest gaming companies, I am thrilled to apply.",
    "a supercalifragilisticexpialidociousandthensomemoreletters b c",
    "tabs\tand  double  spaces\tbetween\t\twords",
    "  leading and trailing whitespace   ",
];

#[test]
fn sanitize_keeps_printable_ascii_and_line_controls() {
    let input = "caf\u{e9} \u{2019}quoted\u{201d}\tok\r\nnext\u{0007}line\u{1F600}";
    assert_eq!(sanitize(input), "caf quoted\tok\r\nnextline");
}

#[test]
fn sanitize_output_is_restricted_and_idempotent() {
    let noisy = "Résumé — “smart quotes” • bullets\u{0}\u{1b}[0m\t\r\n~ok~";
    for input in SAMPLES.iter().copied().chain([noisy]) {
        let once = sanitize(input);
        assert!(
            once.chars()
                .all(|c| matches!(c, '\t' | '\n' | '\r' | ' '..='~')),
            "unexpected char in {once:?}"
        );
        assert_eq!(sanitize(&once), once);
    }
}

#[test]
fn document_lines_split_on_lf_and_crlf() {
    assert_eq!(document_lines("a\r\nb\nc"), vec!["a", "b", "c"]);
    assert_eq!(document_lines(""), vec![""]);
    assert_eq!(document_lines("a\n\nb"), vec!["a", "", "b"]);
}

#[test]
fn wrap_fills_greedily() {
    let lines = wrap_line("aaa bbb ccc", 7.0, &Mono, 1.0);
    assert_eq!(lines, vec!["aaa bbb", "ccc"]);
}

#[test]
fn wrap_keeps_candidate_exactly_at_limit() {
    let lines = wrap_line("ab cd ef", 5.0, &Mono, 1.0);
    assert_eq!(lines, vec!["ab cd", "ef"]);
}

#[test]
fn wrap_blank_lines_produce_nothing() {
    assert!(wrap_line("", 10.0, &Mono, 1.0).is_empty());
    assert!(wrap_line(" \t  ", 10.0, &Mono, 1.0).is_empty());
}

#[test]
fn oversized_word_sits_alone_and_overflows() {
    let lines = wrap_line("a verylongword b", 5.0, &Mono, 1.0);
    assert_eq!(lines, vec!["a", "verylongword", "b"]);

    let lines = wrap_line("verylongword", 5.0, &Mono, 1.0);
    assert_eq!(lines, vec!["verylongword"]);
}

#[test]
fn wrap_collapses_whitespace_runs() {
    let lines = wrap_line("  x\t\ty   z  ", 100.0, &Mono, 1.0);
    assert_eq!(lines, vec!["x y z"]);
}

#[test]
fn every_subline_fits_or_is_one_word() {
    for width in [40.0, 120.0, 250.0, 512.0] {
        for sample in SAMPLES {
            for sub in wrap_line(sample, width, &Helvetica, 12.0) {
                let fits = Helvetica.width(&sub, 12.0) <= width;
                let single_word = sub.split_whitespace().count() == 1;
                assert!(fits || single_word, "{sub:?} exceeds {width}");
            }
        }
    }
}

#[test]
fn rewrapping_joined_output_is_stable() {
    for width in [40.0, 120.0, 250.0, 512.0] {
        for sample in SAMPLES {
            let first = wrap_line(sample, width, &Helvetica, 12.0);
            let joined = first.join(" ");
            let second = wrap_line(&joined, width, &Helvetica, 12.0);
            assert_eq!(first, second, "width {width}, sample {sample:?}");
        }
    }
}

#[test]
fn helvetica_widths_match_afm() {
    // H=722 e=556 l=222 l=222 o=556 → 2278 units
    assert!((Helvetica.width("Hello", 1000.0) - 2278.0).abs() < 1e-3);
    assert!((Helvetica.width(" ", 12.0) - 278.0 * 12.0 / 1000.0).abs() < 1e-4);
    assert_eq!(Helvetica.width("\t\r\n", 12.0), 0.0);
    assert_eq!(Helvetica.width("", 12.0), 0.0);
}
